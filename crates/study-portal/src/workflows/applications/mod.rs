//! Application records as delivered by the platform backend, plus the export
//! pipeline that turns them into downloadable reports.

pub mod domain;
pub mod export;
pub mod repository;

pub use domain::{
    ApplicationDocument, ApplicationId, ApplicationRecord, ApplicationStatus, FieldMap,
    FieldValue, TimelineEvent,
};
pub use export::{
    export_router, BulkExportFormat, DirectoryDownloader, DocumentRenderer, DownloadError,
    ExportArtifact, ExportError, ExportFormat, ExportOptions, ExportReceipt, ExportService,
    ExportState, FileDownloader, PrintPdfRenderer, RenderError, SpreadsheetBuilder,
    XlsxWorkbookBuilder,
};
pub use repository::{ApplicationRepository, RepositoryError};
