use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::workflows::applications::domain::{
    ApplicationDocument, ApplicationId, ApplicationRecord, ApplicationStatus, FieldMap,
    FieldValue, TimelineEvent,
};
use crate::workflows::applications::export::{
    DocumentRenderer, DownloadError, ExportArtifact, ExportService, FileDownloader, RenderError,
    SpreadsheetBuilder, TextDocument, WorkbookModel,
};
use crate::workflows::applications::repository::{ApplicationRepository, RepositoryError};

pub(super) fn export_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).expect("valid date")
}

pub(super) fn omar() -> ApplicationRecord {
    let mut record =
        ApplicationRecord::new("A1", ApplicationStatus::Pending, "2024-01-01T00:00:00Z");
    record.student_name = Some("Omar".to_string());
    record
}

pub(super) fn lina() -> ApplicationRecord {
    let mut record =
        ApplicationRecord::new("B2", ApplicationStatus::Accepted, "2024-02-10T09:30:00Z");
    record.student_name = Some("Lina Haddad".to_string());
    record.university_name = Some("University of Melbourne".to_string());
    record.program_name = Some("MSc Data Science".to_string());
    record.personal_info = Some(FieldMap::from_iter([
        ("email", FieldValue::from("lina@example.com")),
        ("phone", FieldValue::from("+61 400 000 000")),
        ("country", FieldValue::from("Jordan")),
        ("passport_number", FieldValue::Null),
    ]));
    record.documents.push(ApplicationDocument {
        name: "Transcript".to_string(),
        document_type: Some("academic".to_string()),
        status: Some("approved".to_string()),
        uploaded_at: Some("2024-02-11".to_string()),
    });
    record.timeline.push(TimelineEvent {
        occurred_at: "2024-03-01".to_string(),
        event: "Offer received".to_string(),
        note: None,
    });
    record
}

pub(super) fn karim() -> ApplicationRecord {
    let mut record =
        ApplicationRecord::new("C3", ApplicationStatus::Rejected, "2023-11-20T12:00:00Z");
    record.student_name = Some("Karim".to_string());
    record.academic_info = Some(FieldMap::from_iter([
        ("gpa", FieldValue::from("3.4")),
        ("ielts", FieldValue::from(7_i64)),
    ]));
    record
}

#[derive(Debug, Default)]
pub(super) struct RecordingRenderer {
    documents: Mutex<Vec<TextDocument>>,
}

impl RecordingRenderer {
    pub(super) fn documents(&self) -> Vec<TextDocument> {
        self.documents.lock().expect("renderer mutex").clone()
    }
}

impl DocumentRenderer for RecordingRenderer {
    fn render(&self, document: &TextDocument) -> Result<Vec<u8>, RenderError> {
        self.documents
            .lock()
            .expect("renderer mutex")
            .push(document.clone());
        Ok(b"%PDF-fake".to_vec())
    }
}

#[derive(Debug, Default)]
pub(super) struct RecordingSpreadsheets {
    workbooks: Mutex<Vec<WorkbookModel>>,
}

impl RecordingSpreadsheets {
    pub(super) fn workbooks(&self) -> Vec<WorkbookModel> {
        self.workbooks.lock().expect("spreadsheet mutex").clone()
    }
}

impl SpreadsheetBuilder for RecordingSpreadsheets {
    fn build(&self, workbook: &WorkbookModel) -> Result<Vec<u8>, RenderError> {
        self.workbooks
            .lock()
            .expect("spreadsheet mutex")
            .push(workbook.clone());
        Ok(b"PK-fake".to_vec())
    }
}

#[derive(Debug, Default)]
pub(super) struct MemoryDownloader {
    delivered: Mutex<Vec<ExportArtifact>>,
}

impl MemoryDownloader {
    pub(super) fn delivered(&self) -> Vec<ExportArtifact> {
        self.delivered.lock().expect("download mutex").clone()
    }
}

impl FileDownloader for MemoryDownloader {
    fn deliver(&self, artifact: &ExportArtifact) -> Result<(), DownloadError> {
        self.delivered
            .lock()
            .expect("download mutex")
            .push(artifact.clone());
        Ok(())
    }
}

#[derive(Debug)]
pub(super) struct FailingRenderer;

impl DocumentRenderer for FailingRenderer {
    fn render(&self, _document: &TextDocument) -> Result<Vec<u8>, RenderError> {
        Err(RenderError::Pdf("font table missing".to_string()))
    }
}

#[derive(Debug)]
pub(super) struct OfflineDownloader;

impl FileDownloader for OfflineDownloader {
    fn deliver(&self, _artifact: &ExportArtifact) -> Result<(), DownloadError> {
        Err(DownloadError::Unavailable("disk detached".to_string()))
    }
}

pub(super) struct Harness {
    pub(super) service: ExportService,
    pub(super) renderer: Arc<RecordingRenderer>,
    pub(super) spreadsheets: Arc<RecordingSpreadsheets>,
    pub(super) downloads: Arc<MemoryDownloader>,
}

pub(super) fn harness() -> Harness {
    let renderer = Arc::new(RecordingRenderer::default());
    let spreadsheets = Arc::new(RecordingSpreadsheets::default());
    let downloads = Arc::new(MemoryDownloader::default());
    let service = ExportService::new(renderer.clone(), spreadsheets.clone(), downloads.clone())
        .on_date(export_date());
    Harness {
        service,
        renderer,
        spreadsheets,
        downloads,
    }
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    records: Mutex<Vec<ApplicationRecord>>,
}

impl MemoryRepository {
    pub(super) fn seeded(records: Vec<ApplicationRecord>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }
}

impl ApplicationRepository for MemoryRepository {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.iter().any(|existing| existing.id == record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.iter().find(|record| &record.id == id).cloned())
    }

    fn list(&self) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Ok(self.records.lock().expect("repository mutex poisoned").clone())
    }
}

pub(super) struct UnavailableRepository;

impl ApplicationRepository for UnavailableRepository {
    fn insert(&self, _record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("backend offline".to_string()))
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("backend offline".to_string()))
    }

    fn list(&self) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("backend offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) async fn read_text_body(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    String::from_utf8(body.to_vec()).expect("utf8 body")
}
