//! Application report exports.
//!
//! One application can be exported as PDF, Excel or CSV; many applications as
//! Excel or CSV. Rendering and delivery sit behind [`DocumentRenderer`],
//! [`SpreadsheetBuilder`] and [`FileDownloader`] so the dispatch logic runs
//! against fakes in tests.
//!
//! Missing values are written as empty cells in tabular outputs and as `N/A`
//! in the PDF narrative.

mod delimited;
pub mod download;
pub mod fields;
pub mod layout;
pub mod options;
pub mod pdf;
pub mod router;
pub mod service;
pub mod spreadsheet;

#[cfg(test)]
mod tests;

pub use download::{DirectoryDownloader, DownloadError, ExportArtifact, FileDownloader};
pub use fields::BASIC_COLUMNS;
pub use layout::{ExtraSections, TextDocument, TextLine};
pub use options::{BulkExportFormat, ExportFormat, ExportOptions, ExportReceipt};
pub use pdf::{DocumentRenderer, PrintPdfRenderer};
pub use router::{export_router, ExportState};
pub use service::{
    application_file_name, applications_file_name, ExportError, ExportService, RenderError,
};
pub use spreadsheet::{SheetModel, SpreadsheetBuilder, WorkbookModel, XlsxWorkbookBuilder};
