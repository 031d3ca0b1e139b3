use serde::{Deserialize, Serialize};

use super::ExportError;

pub(crate) const PDF_CONTENT_TYPE: &str = "application/pdf";
pub(crate) const CSV_CONTENT_TYPE: &str = "text/csv; charset=utf-8";
pub(crate) const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Formats a single application can be exported to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Pdf,
    Excel,
    Csv,
}

impl ExportFormat {
    /// Strict parse of a format identifier. No aliases, no case folding.
    pub fn parse(raw: &str) -> Result<Self, ExportError> {
        match raw {
            "pdf" => Ok(Self::Pdf),
            "excel" => Ok(Self::Excel),
            "csv" => Ok(Self::Csv),
            other => Err(ExportError::UnsupportedFormat {
                format: other.to_string(),
            }),
        }
    }

    pub const fn id(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Excel => "excel",
            Self::Csv => "csv",
        }
    }

    pub const fn extension(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Excel => "xlsx",
            Self::Csv => "csv",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Excel => "Excel",
            Self::Csv => "CSV",
        }
    }

    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Pdf => PDF_CONTENT_TYPE,
            Self::Excel => XLSX_CONTENT_TYPE,
            Self::Csv => CSV_CONTENT_TYPE,
        }
    }
}

/// Formats available to bulk exports. PDF has no multi-record layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkExportFormat {
    Excel,
    Csv,
}

impl BulkExportFormat {
    pub fn parse(raw: &str) -> Result<Self, ExportError> {
        match raw {
            "excel" => Ok(Self::Excel),
            "csv" => Ok(Self::Csv),
            other => Err(ExportError::UnsupportedBulkFormat {
                format: other.to_string(),
            }),
        }
    }

    pub const fn as_format(self) -> ExportFormat {
        match self {
            Self::Excel => ExportFormat::Excel,
            Self::Csv => ExportFormat::Csv,
        }
    }
}

/// Caller-supplied export request. `format` stays raw so unsupported
/// identifiers surface as export errors rather than decode failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportOptions {
    pub format: String,
    #[serde(default, alias = "includeDocuments")]
    pub include_documents: bool,
    #[serde(default, alias = "includeTimeline")]
    pub include_timeline: bool,
}

impl ExportOptions {
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
            include_documents: false,
            include_timeline: false,
        }
    }

    pub fn with_documents(mut self) -> Self {
        self.include_documents = true;
        self
    }

    pub fn with_timeline(mut self) -> Self {
        self.include_timeline = true;
        self
    }
}

impl From<ExportFormat> for ExportOptions {
    fn from(format: ExportFormat) -> Self {
        Self::new(format.id())
    }
}

/// Confirmation returned once an artifact has been delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportReceipt {
    pub success: bool,
    pub message: String,
    pub file_name: String,
    pub bytes: usize,
}
