use chrono::{DateTime, NaiveDate};

use crate::workflows::applications::domain::{ApplicationRecord, FieldValue};

/// Column labels shared by the key/value and row-per-record layouts.
pub const BASIC_COLUMNS: [&str; 9] = [
    "ID",
    "Student Name",
    "Email",
    "Phone",
    "Country",
    "University",
    "Program",
    "Status",
    "Applied Date",
];

pub(crate) const TABULAR_PLACEHOLDER: &str = "";
pub(crate) const NARRATIVE_PLACEHOLDER: &str = "N/A";

/// The nine summary values of an application, `None` where the record has nothing to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BasicFields {
    pub(crate) id: String,
    pub(crate) student_name: Option<String>,
    pub(crate) email: Option<String>,
    pub(crate) phone: Option<String>,
    pub(crate) country: Option<String>,
    pub(crate) university: Option<String>,
    pub(crate) program: Option<String>,
    pub(crate) status: String,
    pub(crate) applied_date: Option<String>,
}

impl BasicFields {
    pub(crate) fn from_record(record: &ApplicationRecord) -> Self {
        Self {
            id: record.id.to_string(),
            student_name: non_blank(record.student_name.as_deref()),
            email: personal(record, "email"),
            phone: personal(record, "phone"),
            country: personal(record, "country"),
            university: non_blank(record.university_name.as_deref()),
            program: non_blank(record.program_name.as_deref()),
            status: record.status.label().to_string(),
            applied_date: format_applied_date(&record.created_at),
        }
    }

    /// Values in [`BASIC_COLUMNS`] order with missing entries replaced by `placeholder`.
    pub(crate) fn values(&self, placeholder: &str) -> [String; 9] {
        let or = |value: &Option<String>| value.clone().unwrap_or_else(|| placeholder.to_string());
        [
            self.id.clone(),
            or(&self.student_name),
            or(&self.email),
            or(&self.phone),
            or(&self.country),
            or(&self.university),
            or(&self.program),
            self.status.clone(),
            or(&self.applied_date),
        ]
    }

    /// Row used by spreadsheet and CSV exports.
    pub(crate) fn tabular(&self) -> [String; 9] {
        self.values(TABULAR_PLACEHOLDER)
    }
}

fn personal(record: &ApplicationRecord, key: &str) -> Option<String> {
    record.personal_field(key).and_then(FieldValue::as_display)
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value.filter(|text| !text.is_empty()).map(str::to_string)
}

/// Render `created_at` as a calendar date. Values that are neither RFC 3339
/// nor `YYYY-MM-DD` pass through untouched.
pub(crate) fn format_applied_date(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive().format("%Y-%m-%d").to_string());
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date.format("%Y-%m-%d").to_string());
    }

    Some(trimmed.to_string())
}
