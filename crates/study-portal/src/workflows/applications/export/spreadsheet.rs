//! Workbook layouts and xlsx serialization through rust_xlsxwriter.

use rust_xlsxwriter::{Format, Workbook, Worksheet};

use crate::workflows::applications::domain::{ApplicationRecord, FieldMap, FieldValue};

use super::fields::{BasicFields, BASIC_COLUMNS, TABULAR_PLACEHOLDER};
use super::layout::ExtraSections;
use super::RenderError;

pub const BASIC_INFO_SHEET: &str = "Basic Info";
pub const PERSONAL_INFO_SHEET: &str = "Personal Info";
pub const ACADEMIC_INFO_SHEET: &str = "Academic Info";
pub const DOCUMENTS_SHEET: &str = "Documents";
pub const TIMELINE_SHEET: &str = "Timeline";
pub const APPLICATIONS_SHEET: &str = "Applications";

const KEY_VALUE_HEADER: [&str; 2] = ["Field", "Value"];

/// Named grid of text cells. Row 0 is the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetModel {
    pub name: String,
    pub rows: Vec<Vec<String>>,
}

impl SheetModel {
    fn with_header<I, S>(name: &str, header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.to_string(),
            rows: vec![header.into_iter().map(Into::into).collect()],
        }
    }

    fn push_row<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    pub fn data_rows(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or_default()
    }
}

/// Ordered set of sheets handed to a [`SpreadsheetBuilder`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WorkbookModel {
    pub sheets: Vec<SheetModel>,
}

impl WorkbookModel {
    pub fn sheet(&self, name: &str) -> Option<&SheetModel> {
        self.sheets.iter().find(|sheet| sheet.name == name)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|sheet| sheet.name.as_str()).collect()
    }
}

/// Serializes a workbook model to spreadsheet bytes.
pub trait SpreadsheetBuilder: Send + Sync {
    fn build(&self, workbook: &WorkbookModel) -> Result<Vec<u8>, RenderError>;
}

/// xlsx output with a bold header row on every sheet.
#[derive(Debug, Default, Clone, Copy)]
pub struct XlsxWorkbookBuilder;

impl SpreadsheetBuilder for XlsxWorkbookBuilder {
    fn build(&self, model: &WorkbookModel) -> Result<Vec<u8>, RenderError> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();

        for sheet in &model.sheets {
            let mut worksheet = Worksheet::new();
            worksheet.set_name(&sheet.name)?;

            for (r, row) in sheet.rows.iter().enumerate() {
                let r = u32::try_from(r).map_err(|_| {
                    RenderError::Backend(format!("sheet '{}' has too many rows", sheet.name))
                })?;
                for (c, value) in row.iter().enumerate() {
                    let c = u16::try_from(c).map_err(|_| {
                        RenderError::Backend(format!("sheet '{}' has too many columns", sheet.name))
                    })?;
                    if r == 0 {
                        worksheet.write_string_with_format(r, c, value, &header_format)?;
                    } else {
                        worksheet.write_string(r, c, value)?;
                    }
                }
            }

            workbook.push_worksheet(worksheet);
        }

        let buffer = workbook.save_to_buffer()?;
        Ok(buffer)
    }
}

pub(crate) fn application_workbook(
    record: &ApplicationRecord,
    extras: ExtraSections,
) -> WorkbookModel {
    let fields = BasicFields::from_record(record);
    let mut basic = SheetModel::with_header(BASIC_INFO_SHEET, KEY_VALUE_HEADER);
    for (label, value) in BASIC_COLUMNS.iter().zip(fields.tabular()) {
        basic.push_row([label.to_string(), value]);
    }

    let mut sheets = vec![basic];

    if let Some(info) = &record.personal_info {
        sheets.push(key_value_sheet(PERSONAL_INFO_SHEET, info));
    }
    if let Some(info) = &record.academic_info {
        sheets.push(key_value_sheet(ACADEMIC_INFO_SHEET, info));
    }

    if extras.documents {
        let mut documents =
            SheetModel::with_header(DOCUMENTS_SHEET, ["Name", "Type", "Status", "Uploaded"]);
        for document in &record.documents {
            documents.push_row([
                document.name.clone(),
                document.document_type.clone().unwrap_or_default(),
                document.status.clone().unwrap_or_default(),
                document.uploaded_at.clone().unwrap_or_default(),
            ]);
        }
        sheets.push(documents);
    }

    if extras.timeline {
        let mut timeline = SheetModel::with_header(TIMELINE_SHEET, ["Date", "Event", "Note"]);
        for event in &record.timeline {
            timeline.push_row([
                event.occurred_at.clone(),
                event.event.clone(),
                event.note.clone().unwrap_or_default(),
            ]);
        }
        sheets.push(timeline);
    }

    WorkbookModel { sheets }
}

pub(crate) fn applications_workbook(records: &[ApplicationRecord]) -> WorkbookModel {
    let mut sheet = SheetModel::with_header(APPLICATIONS_SHEET, BASIC_COLUMNS);
    for record in records {
        sheet.push_row(BasicFields::from_record(record).tabular());
    }
    WorkbookModel {
        sheets: vec![sheet],
    }
}

fn key_value_sheet(name: &str, info: &FieldMap) -> SheetModel {
    let mut sheet = SheetModel::with_header(name, KEY_VALUE_HEADER);
    for (key, value) in info.iter() {
        sheet.push_row([key.to_string(), cell_text(value)]);
    }
    sheet
}

fn cell_text(value: &FieldValue) -> String {
    value
        .as_display()
        .unwrap_or_else(|| TABULAR_PLACEHOLDER.to_string())
}
