use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tracing::{debug, error, info};

use crate::workflows::applications::domain::{ApplicationId, ApplicationRecord};

use super::delimited::{application_csv, applications_csv};
use super::download::{DownloadError, ExportArtifact, FileDownloader};
use super::layout::{application_document, ExtraSections};
use super::options::{BulkExportFormat, ExportFormat, ExportOptions, ExportReceipt};
use super::pdf::{DocumentRenderer, PrintPdfRenderer};
use super::spreadsheet::{
    application_workbook, applications_workbook, SpreadsheetBuilder, XlsxWorkbookBuilder,
};

/// Failure while serializing a document, workbook or CSV table.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("pdf rendering failed: {0}")]
    Pdf(String),
    #[error("spreadsheet rendering failed: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),
    #[error("csv serialization failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("renderer failed: {0}")]
    Backend(String),
}

/// Error raised by the export service.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("unsupported export format '{format}' (expected pdf, excel or csv)")]
    UnsupportedFormat { format: String },
    #[error("unsupported bulk export format '{format}' (expected excel or csv)")]
    UnsupportedBulkFormat { format: String },
    #[error(transparent)]
    Serialization(#[from] RenderError),
    #[error(transparent)]
    Download(#[from] DownloadError),
}

/// `application-<id>.<ext>`, with path separators and NUL in the id replaced by `_`.
pub fn application_file_name(id: &ApplicationId, format: ExportFormat) -> String {
    let id: String = id
        .as_str()
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            other => other,
        })
        .collect();
    format!("application-{}.{}", id, format.extension())
}

/// `applications-<YYYY-MM-DD>.<ext>`
pub fn applications_file_name(date: NaiveDate, format: BulkExportFormat) -> String {
    format!(
        "applications-{}.{}",
        date.format("%Y-%m-%d"),
        format.as_format().extension()
    )
}

/// Turns application records into downloadable reports.
///
/// Stateless apart from its injected capabilities; every call builds the whole
/// artifact in memory and then hands it to the downloader.
#[derive(Clone)]
pub struct ExportService {
    renderer: Arc<dyn DocumentRenderer>,
    spreadsheets: Arc<dyn SpreadsheetBuilder>,
    downloader: Arc<dyn FileDownloader>,
    today: Option<NaiveDate>,
}

impl ExportService {
    pub fn new(
        renderer: Arc<dyn DocumentRenderer>,
        spreadsheets: Arc<dyn SpreadsheetBuilder>,
        downloader: Arc<dyn FileDownloader>,
    ) -> Self {
        Self {
            renderer,
            spreadsheets,
            downloader,
            today: None,
        }
    }

    /// printpdf and rust_xlsxwriter backed service delivering through `downloader`.
    pub fn with_downloader(downloader: Arc<dyn FileDownloader>) -> Self {
        Self::new(
            Arc::new(PrintPdfRenderer),
            Arc::new(XlsxWorkbookBuilder),
            downloader,
        )
    }

    /// Pin the date used in bulk file names.
    pub fn on_date(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Export one application and deliver it as `application-<id>.<ext>`.
    pub fn export_application(
        &self,
        application: &ApplicationRecord,
        options: &ExportOptions,
    ) -> Result<ExportReceipt, ExportError> {
        let result = self
            .prepare_application(application, options)
            .and_then(|artifact| self.deliver(&artifact).map(|()| artifact));

        match result {
            Ok(artifact) => {
                info!(
                    application_id = %application.id,
                    format = %options.format,
                    file = %artifact.file_name,
                    bytes = artifact.len(),
                    "application exported"
                );
                Ok(ExportReceipt {
                    success: true,
                    message: format!(
                        "Application {} exported as {}",
                        application.id,
                        format_label(&options.format)
                    ),
                    file_name: artifact.file_name.clone(),
                    bytes: artifact.len(),
                })
            }
            Err(err) => {
                error!(
                    application_id = %application.id,
                    format = %options.format,
                    error = %err,
                    "application export failed"
                );
                Err(err)
            }
        }
    }

    /// Export many applications into one `applications-<date>.<ext>` file.
    pub fn export_multiple_applications(
        &self,
        applications: &[ApplicationRecord],
        options: &ExportOptions,
    ) -> Result<ExportReceipt, ExportError> {
        let result = self
            .prepare_multiple(applications, options)
            .and_then(|artifact| self.deliver(&artifact).map(|()| artifact));

        match result {
            Ok(artifact) => {
                info!(
                    records = applications.len(),
                    format = %options.format,
                    file = %artifact.file_name,
                    bytes = artifact.len(),
                    "applications exported"
                );
                Ok(ExportReceipt {
                    success: true,
                    message: format!("{} records exported", applications.len()),
                    file_name: artifact.file_name.clone(),
                    bytes: artifact.len(),
                })
            }
            Err(err) => {
                error!(
                    records = applications.len(),
                    format = %options.format,
                    error = %err,
                    "bulk export failed"
                );
                Err(err)
            }
        }
    }

    /// Build the single-application artifact without delivering it.
    pub fn prepare_application(
        &self,
        application: &ApplicationRecord,
        options: &ExportOptions,
    ) -> Result<ExportArtifact, ExportError> {
        let extras = ExtraSections {
            documents: options.include_documents,
            timeline: options.include_timeline,
        };

        match ExportFormat::parse(&options.format)? {
            ExportFormat::Pdf => self.to_pdf(application, extras),
            ExportFormat::Excel => self.to_excel(application, extras),
            ExportFormat::Csv => {
                if options.include_documents || options.include_timeline {
                    debug!(
                        application_id = %application.id,
                        "csv layout is fixed; document and timeline flags ignored"
                    );
                }
                self.to_csv(application)
            }
        }
    }

    /// Build the bulk artifact without delivering it.
    pub fn prepare_multiple(
        &self,
        applications: &[ApplicationRecord],
        options: &ExportOptions,
    ) -> Result<ExportArtifact, ExportError> {
        let format = BulkExportFormat::parse(&options.format)?;
        if options.include_documents || options.include_timeline {
            debug!(
                records = applications.len(),
                "bulk layouts are fixed; document and timeline flags ignored"
            );
        }

        match format {
            BulkExportFormat::Excel => self.multiple_to_excel(applications),
            BulkExportFormat::Csv => self.multiple_to_csv(applications),
        }
    }

    pub fn to_pdf(
        &self,
        application: &ApplicationRecord,
        extras: ExtraSections,
    ) -> Result<ExportArtifact, ExportError> {
        let document = application_document(application, extras);
        let bytes = self.renderer.render(&document)?;
        Ok(single_artifact(application, ExportFormat::Pdf, bytes))
    }

    pub fn to_excel(
        &self,
        application: &ApplicationRecord,
        extras: ExtraSections,
    ) -> Result<ExportArtifact, ExportError> {
        let workbook = application_workbook(application, extras);
        let bytes = self.spreadsheets.build(&workbook)?;
        Ok(single_artifact(application, ExportFormat::Excel, bytes))
    }

    pub fn to_csv(&self, application: &ApplicationRecord) -> Result<ExportArtifact, ExportError> {
        let bytes = application_csv(application)?;
        Ok(single_artifact(application, ExportFormat::Csv, bytes))
    }

    pub fn multiple_to_excel(
        &self,
        applications: &[ApplicationRecord],
    ) -> Result<ExportArtifact, ExportError> {
        let workbook = applications_workbook(applications);
        let bytes = self.spreadsheets.build(&workbook)?;
        Ok(self.bulk_artifact(BulkExportFormat::Excel, bytes))
    }

    pub fn multiple_to_csv(
        &self,
        applications: &[ApplicationRecord],
    ) -> Result<ExportArtifact, ExportError> {
        let bytes = applications_csv(applications)?;
        Ok(self.bulk_artifact(BulkExportFormat::Csv, bytes))
    }

    fn bulk_artifact(&self, format: BulkExportFormat, bytes: Vec<u8>) -> ExportArtifact {
        ExportArtifact {
            file_name: applications_file_name(self.today(), format),
            content_type: format.as_format().content_type(),
            bytes,
        }
    }

    fn deliver(&self, artifact: &ExportArtifact) -> Result<(), ExportError> {
        self.downloader.deliver(artifact)?;
        Ok(())
    }
}

impl std::fmt::Debug for ExportService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportService")
            .field("downloader", &self.downloader)
            .field("today", &self.today)
            .finish_non_exhaustive()
    }
}

fn single_artifact(
    application: &ApplicationRecord,
    format: ExportFormat,
    bytes: Vec<u8>,
) -> ExportArtifact {
    ExportArtifact {
        file_name: application_file_name(&application.id, format),
        content_type: format.content_type(),
        bytes,
    }
}

fn format_label(raw: &str) -> &'static str {
    ExportFormat::parse(raw).map_or("export", ExportFormat::label)
}
