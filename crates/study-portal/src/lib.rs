//! Report exports for the study-abroad consulting platform.
//!
//! Application records fetched by the platform front-end are turned into PDF,
//! spreadsheet or CSV files and handed to a download target. The export
//! pipeline lives in [`workflows::applications::export`].

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
