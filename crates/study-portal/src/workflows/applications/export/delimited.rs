//! Comma-separated output.
//!
//! Fields are quoted by the `csv` writer whenever they contain a delimiter,
//! quote or line break, so embedded commas never shift columns.

use csv::Writer;

use crate::workflows::applications::domain::ApplicationRecord;

use super::fields::{BasicFields, BASIC_COLUMNS};
use super::RenderError;

/// `Field,Value` table with one row per summary field.
pub(crate) fn application_csv(record: &ApplicationRecord) -> Result<Vec<u8>, RenderError> {
    let fields = BasicFields::from_record(record);
    let mut writer = Writer::from_writer(vec![]);

    writer.write_record(["Field", "Value"])?;
    for (label, value) in BASIC_COLUMNS.iter().zip(fields.tabular()) {
        writer.write_record([*label, value.as_str()])?;
    }

    finish(writer)
}

/// Header row plus one row per record, in input order.
pub(crate) fn applications_csv(records: &[ApplicationRecord]) -> Result<Vec<u8>, RenderError> {
    let mut writer = Writer::from_writer(vec![]);

    writer.write_record(BASIC_COLUMNS)?;
    for record in records {
        writer.write_record(BasicFields::from_record(record).tabular())?;
    }

    finish(writer)
}

fn finish(writer: Writer<Vec<u8>>) -> Result<Vec<u8>, RenderError> {
    writer
        .into_inner()
        .map_err(|err| RenderError::Backend(err.to_string()))
}
