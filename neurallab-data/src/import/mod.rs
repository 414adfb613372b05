//! Training-panel dataset import and export.
//!
//! Both importers take the graph's input labels so each row carries at most
//! one value per input node.

pub mod csv;
pub mod json;

pub use self::csv::{export_csv, parse_csv};
pub use self::json::parse_json;

use crate::datasets::VecDataset;
use neurallab_core::{DatasetRow, NeuraLabError};
use std::path::Path;

/// Text formats accepted by [`load_dataset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    /// Comma, tab or semicolon separated with a header line.
    Delimited,
    Json,
}

impl ImportFormat {
    /// `.json` files are JSON; everything else is treated as delimited text.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match path.as_ref().extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ImportFormat::Json,
            _ => ImportFormat::Delimited,
        }
    }
}

/// Parses `text` into a dataset whose rows match `input_labels`.
pub fn load_dataset(
    text: &str,
    format: ImportFormat,
    input_labels: &[String],
) -> Result<VecDataset<DatasetRow>, NeuraLabError> {
    let text = text.trim();
    let rows = match format {
        ImportFormat::Delimited => parse_csv(text, input_labels)?,
        ImportFormat::Json => parse_json(text, input_labels)?,
    };
    Ok(VecDataset::new(rows))
}

/// Parses a cell the forgiving way the training panel does: anything that is
/// not a finite number reads as 0.
pub(crate) fn lenient_number(cell: &str) -> f64 {
    match cell.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}
