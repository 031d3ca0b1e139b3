use crate::infra::{load_applications, parse_date};
use chrono::NaiveDate;
use clap::Args;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use study_portal::config::AppConfig;
use study_portal::error::AppError;
use study_portal::telemetry;
use study_portal::workflows::applications::{
    ApplicationId, DirectoryDownloader, ExportOptions, ExportReceipt, ExportService,
    RepositoryError,
};

#[derive(Args, Debug)]
pub(crate) struct SingleExportArgs {
    /// JSON file holding one application or an array of applications
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Output format: pdf, excel or csv
    #[arg(long)]
    pub(crate) format: String,
    /// Application to export when the file holds several (defaults to the first)
    #[arg(long)]
    pub(crate) id: Option<String>,
    /// Append the document list (pdf and excel only)
    #[arg(long)]
    pub(crate) include_documents: bool,
    /// Append the status timeline (pdf and excel only)
    #[arg(long)]
    pub(crate) include_timeline: bool,
    /// Directory to write the export into (defaults to APP_EXPORT_DIR)
    #[arg(long)]
    pub(crate) output_dir: Option<PathBuf>,
    /// Override the export date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct BulkExportArgs {
    /// JSON file holding an array of applications
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Output format: excel or csv
    #[arg(long)]
    pub(crate) format: String,
    /// Directory to write the export into (defaults to APP_EXPORT_DIR)
    #[arg(long)]
    pub(crate) output_dir: Option<PathBuf>,
    /// Override the date stamped into the file name (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) fn run_single_export(args: SingleExportArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let receipt = export_single(&args, &config.export.download_dir)?;
    print_receipt(&receipt);
    Ok(())
}

pub(crate) fn run_bulk_export(args: BulkExportArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let receipt = export_bulk(&args, &config.export.download_dir)?;
    print_receipt(&receipt);
    Ok(())
}

pub(crate) fn export_single(
    args: &SingleExportArgs,
    default_dir: &Path,
) -> Result<ExportReceipt, AppError> {
    let records = load_applications(&args.input)?;
    let record = match &args.id {
        Some(id) => {
            let id = ApplicationId::new(id.as_str());
            records.into_iter().find(|record| record.id == id)
        }
        None => records.into_iter().next(),
    }
    .ok_or(RepositoryError::NotFound)?;

    let options = ExportOptions {
        format: args.format.clone(),
        include_documents: args.include_documents,
        include_timeline: args.include_timeline,
    };
    let service = service_for(args.output_dir.as_deref(), default_dir, args.today);
    Ok(service.export_application(&record, &options)?)
}

pub(crate) fn export_bulk(
    args: &BulkExportArgs,
    default_dir: &Path,
) -> Result<ExportReceipt, AppError> {
    let records = load_applications(&args.input)?;
    let service = service_for(args.output_dir.as_deref(), default_dir, args.today);
    Ok(service.export_multiple_applications(&records, &ExportOptions::new(args.format.as_str()))?)
}

pub(crate) fn service_for(
    output_dir: Option<&Path>,
    default_dir: &Path,
    today: Option<NaiveDate>,
) -> ExportService {
    let root = output_dir.unwrap_or(default_dir);
    let service = ExportService::with_downloader(Arc::new(DirectoryDownloader::new(root)));
    match today {
        Some(date) => service.on_date(date),
        None => service,
    }
}

pub(crate) fn print_receipt(receipt: &ExportReceipt) {
    println!("{}", receipt.message);
    println!("  file: {} ({} bytes)", receipt.file_name, receipt.bytes);
}
