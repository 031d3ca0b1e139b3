use std::fs;
use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::json;
use study_portal::workflows::applications::{
    ApplicationRecord, DirectoryDownloader, ExportError, ExportOptions, ExportService,
};

fn applications() -> Vec<ApplicationRecord> {
    serde_json::from_value(json!([
        {
            "id": "A1",
            "studentName": "Omar",
            "status": "pending",
            "created_at": "2024-01-01T00:00:00Z"
        },
        {
            "id": "A2",
            "studentName": "Sara",
            "universityName": "TU Munich",
            "programName": "MSc Informatics",
            "personal_info": { "email": "a,b@x.com", "phone": "+49 1512", "country": "Egypt" },
            "academic_info": { "gpa": 3.8, "english_test": "IELTS 7.5" },
            "status": "accepted",
            "created_at": "2024-02-01T08:00:00Z",
            "documents": [{ "name": "Passport", "status": "verified" }]
        },
        {
            "id": "A3",
            "student_name": "Youssef",
            "status": "waitlisted",
            "created_at": "2024-03-15"
        }
    ]))
    .expect("fixture applications parse")
}

fn service(dir: &std::path::Path) -> ExportService {
    ExportService::with_downloader(Arc::new(DirectoryDownloader::new(dir)))
        .on_date(NaiveDate::from_ymd_opt(2024, 4, 1).expect("valid date"))
}

#[test]
fn single_csv_export_writes_ten_rows() {
    let dir = tempfile::tempdir().expect("tempdir");
    let records = applications();

    let receipt = service(dir.path())
        .export_application(&records[0], &ExportOptions::new("csv"))
        .expect("csv export");

    assert!(receipt.success);
    let text = fs::read_to_string(dir.path().join("application-A1.csv")).expect("csv written");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 10);
    assert_eq!(lines[0], "Field,Value");
    assert_eq!(lines[3], "Email,");
}

#[test]
fn quoted_csv_keeps_logical_rows_intact() {
    let dir = tempfile::tempdir().expect("tempdir");
    let records = applications();

    service(dir.path())
        .export_application(&records[1], &ExportOptions::new("csv"))
        .expect("csv export");

    let file = fs::File::open(dir.path().join("application-A2.csv")).expect("csv written");
    let mut reader = csv::ReaderBuilder::new().from_reader(file);
    let rows: Vec<csv::StringRecord> = reader
        .records()
        .collect::<Result<_, _>>()
        .expect("rows parse");

    assert_eq!(rows.len(), 9);
    assert!(rows.iter().all(|row| row.len() == 2));
    assert_eq!(&rows[2][1], "a,b@x.com");
}

#[test]
fn bulk_excel_export_writes_dated_workbook() {
    let dir = tempfile::tempdir().expect("tempdir");
    let records = applications();

    let receipt = service(dir.path())
        .export_multiple_applications(&records, &ExportOptions::new("excel"))
        .expect("bulk export");

    assert_eq!(receipt.message, "3 records exported");
    assert_eq!(receipt.file_name, "applications-2024-04-01.xlsx");
    let bytes = fs::read(dir.path().join("applications-2024-04-01.xlsx")).expect("xlsx written");
    assert!(bytes.starts_with(b"PK"));
    assert_eq!(receipt.bytes, bytes.len());
}

#[test]
fn single_pdf_and_excel_exports_are_written() {
    let dir = tempfile::tempdir().expect("tempdir");
    let records = applications();
    let service = service(dir.path());

    service
        .export_application(&records[1], &ExportOptions::new("pdf").with_documents())
        .expect("pdf export");
    service
        .export_application(&records[1], &ExportOptions::new("excel").with_timeline())
        .expect("excel export");

    let pdf = fs::read(dir.path().join("application-A2.pdf")).expect("pdf written");
    assert!(pdf.starts_with(b"%PDF"));
    let xlsx = fs::read(dir.path().join("application-A2.xlsx")).expect("xlsx written");
    assert!(xlsx.starts_with(b"PK"));
}

#[test]
fn bulk_pdf_export_writes_nothing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let records = applications();

    let result =
        service(dir.path()).export_multiple_applications(&records, &ExportOptions::new("pdf"));

    assert!(matches!(
        result,
        Err(ExportError::UnsupportedBulkFormat { .. })
    ));
    let entries = fs::read_dir(dir.path()).expect("dir readable").count();
    assert_eq!(entries, 0);
}

#[test]
fn free_text_status_and_slashed_id_export_to_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let record: ApplicationRecord = serde_json::from_value(json!({
        "id": "2024/017",
        "studentName": "Hana",
        "status": "submitted",
        "created_at": "2024-05-05"
    }))
    .expect("free-text status parses");

    let receipt = service(dir.path())
        .export_application(&record, &ExportOptions::new("csv"))
        .expect("csv export");

    assert_eq!(receipt.file_name, "application-2024_017.csv");
    let text = fs::read_to_string(dir.path().join("application-2024_017.csv")).expect("written");
    assert!(text.lines().any(|line| line == "Status,submitted"));
}
