// neurallab-data/src/import/csv.rs

use super::lenient_number;
use log::debug;
use neurallab_core::{DatasetRow, NeuraLabError};

const SEPARATORS: [char; 3] = [',', '\t', ';'];

/// Header written by [`export_csv`] for the target column.
pub const EXPECTED_HEADER: &str = "expected";

/// Parses delimited text into training rows.
///
/// The first non-blank line is a header and is skipped. Cells may be split by
/// `,`, tab or `;`. The last cell of each row is the expected value and the
/// remaining cells are truncated to `input_labels.len()` inputs.
///
/// # Errors
///
/// `NeuraLabError::DatasetImport` when there is no data row after the header.
pub fn parse_csv(text: &str, input_labels: &[String]) -> Result<Vec<DatasetRow>, NeuraLabError> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    if lines.len() < 2 {
        return Err(NeuraLabError::DatasetImport {
            line: lines.len(),
            message: "need a header and at least one data row".to_string(),
        });
    }

    let rows: Vec<DatasetRow> = lines[1..]
        .iter()
        .map(|line| {
            let mut values: Vec<f64> = line.split(&SEPARATORS[..]).map(lenient_number).collect();
            let expected = values.pop().unwrap_or(0.0);
            values.truncate(input_labels.len());
            DatasetRow::new(values, expected)
        })
        .collect();
    debug!("Imported {} rows from delimited text", rows.len());
    Ok(rows)
}

/// Renders rows as comma-separated text with an `expected` header column.
/// Rows shorter than the label list are padded with 0.
pub fn export_csv(rows: &[DatasetRow], input_labels: &[String]) -> Result<String, NeuraLabError> {
    if rows.is_empty() {
        return Err(NeuraLabError::EmptyDataset);
    }
    let mut lines = Vec::with_capacity(rows.len() + 1);
    let mut header: Vec<&str> = input_labels.iter().map(String::as_str).collect();
    header.push(EXPECTED_HEADER);
    lines.push(header.join(","));

    for row in rows {
        let mut cells: Vec<String> = (0..input_labels.len())
            .map(|i| row.inputs.get(i).copied().unwrap_or(0.0).to_string())
            .collect();
        cells.push(row.expected.to_string());
        lines.push(cells.join(","));
    }
    Ok(lines.join("\n"))
}

#[cfg(test)]
#[path = "csv_test.rs"]
mod tests;
