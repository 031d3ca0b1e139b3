use crate::export::{print_receipt, service_for};
use crate::infra::parse_date;
use chrono::NaiveDate;
use clap::Args;
use std::path::PathBuf;
use study_portal::config::AppConfig;
use study_portal::error::AppError;
use study_portal::telemetry;
use study_portal::workflows::applications::{
    ApplicationDocument, ApplicationRecord, ApplicationStatus, BulkExportFormat, ExportFormat,
    ExportOptions, ExportReceipt, ExportService, FieldMap, FieldValue, TimelineEvent,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Directory to write the demo exports into (defaults to APP_EXPORT_DIR)
    #[arg(long)]
    pub(crate) output_dir: Option<PathBuf>,
    /// Override the date stamped into bulk file names (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let service = service_for(
        args.output_dir.as_deref(),
        &config.export.download_dir,
        args.today,
    );

    println!("Application export demo");
    for receipt in export_samples(&service, &sample_applications())? {
        print_receipt(&receipt);
    }
    Ok(())
}

/// Every single-record format for each sample, then every bulk format.
pub(crate) fn export_samples(
    service: &ExportService,
    applications: &[ApplicationRecord],
) -> Result<Vec<ExportReceipt>, AppError> {
    let mut receipts = Vec::new();
    for application in applications {
        for format in [ExportFormat::Pdf, ExportFormat::Excel, ExportFormat::Csv] {
            let options = ExportOptions::from(format).with_documents().with_timeline();
            receipts.push(service.export_application(application, &options)?);
        }
    }
    for format in [BulkExportFormat::Excel, BulkExportFormat::Csv] {
        let options = ExportOptions::from(format.as_format());
        receipts.push(service.export_multiple_applications(applications, &options)?);
    }
    Ok(receipts)
}

pub(crate) fn sample_applications() -> Vec<ApplicationRecord> {
    let mut amira = ApplicationRecord::new(
        "APP-1001",
        ApplicationStatus::UnderReview,
        "2024-03-04T10:15:00Z",
    );
    amira.student_name = Some("Amira Nassar".to_string());
    amira.university_name = Some("University of Toronto".to_string());
    amira.program_name = Some("MEng Electrical Engineering".to_string());
    amira.personal_info = Some(FieldMap::from_iter([
        ("email", FieldValue::from("amira.nassar@example.com")),
        ("phone", FieldValue::from("+20 100 555 0101")),
        ("country", FieldValue::from("Egypt")),
        ("date_of_birth", FieldValue::from("1999-08-21")),
    ]));
    amira.academic_info = Some(FieldMap::from_iter([
        ("gpa", FieldValue::from("3.7")),
        ("ielts", FieldValue::from("7.5")),
        ("graduation_year", FieldValue::from(2021_i64)),
    ]));
    amira.documents = vec![
        ApplicationDocument {
            name: "Passport".to_string(),
            document_type: Some("identity".to_string()),
            status: Some("verified".to_string()),
            uploaded_at: Some("2024-03-04".to_string()),
        },
        ApplicationDocument {
            name: "Statement of Purpose".to_string(),
            document_type: Some("essay".to_string()),
            status: Some("pending".to_string()),
            uploaded_at: None,
        },
    ];
    amira.timeline = vec![
        TimelineEvent {
            occurred_at: "2024-03-04".to_string(),
            event: "Application submitted".to_string(),
            note: None,
        },
        TimelineEvent {
            occurred_at: "2024-03-12".to_string(),
            event: "Moved to review".to_string(),
            note: Some("Awaiting SOP".to_string()),
        },
    ];

    let mut daniel =
        ApplicationRecord::new("APP-1002", ApplicationStatus::Accepted, "2024-02-19");
    daniel.student_name = Some("Daniel Okafor".to_string());
    daniel.university_name = Some("TU Delft".to_string());
    daniel.program_name = Some("MSc Aerospace Engineering".to_string());
    daniel.personal_info = Some(FieldMap::from_iter([
        ("email", FieldValue::from("daniel.okafor@example.com")),
        ("country", FieldValue::from("Nigeria")),
    ]));

    let mut mei = ApplicationRecord::new("APP-1003", ApplicationStatus::Waitlisted, "");
    mei.student_name = Some("Mei Lin".to_string());
    mei.program_name = Some("BSc Economics".to_string());

    vec![amira, daniel, mei]
}
