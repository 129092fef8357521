//! Translation export/import formatters.
//!
//! All exporters render to an in-memory `String`; callers decide where the
//! bytes go (HTTP response, file on disk). Entries with an empty target are
//! skipped unless [`ExportOptions::include_empty`] is set.

pub mod csv;
pub mod json;
pub mod po;
pub mod xliff;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use csv::{from_csv, to_csv};
pub use json::to_json;
pub use po::{from_po, to_po};
pub use xliff::to_xliff;

/// Errors from import parsing.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("empty document")]
    Empty,

    #[error("malformed input: {0}")]
    Malformed(String),
}

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Xliff,
    Po,
    Json,
}

impl ExportFormat {
    /// MIME type for HTTP responses.
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Xliff => "application/xml; charset=utf-8",
            ExportFormat::Po => "text/plain; charset=utf-8",
            ExportFormat::Json => "application/json; charset=utf-8",
        }
    }

    /// Conventional file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xliff => "xlf",
            ExportFormat::Po => "po",
            ExportFormat::Json => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "xliff" | "xlf" => Ok(ExportFormat::Xliff),
            "po" => Ok(ExportFormat::Po),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!("unknown export format: {other}")),
        }
    }
}

/// Options shared by all exporters.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub source_lang: String,
    pub target_lang: String,
    pub include_context: bool,
    pub include_notes: bool,
    pub include_empty: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            source_lang: "en".into(),
            target_lang: "en".into(),
            include_context: true,
            include_notes: true,
            include_empty: false,
        }
    }
}
