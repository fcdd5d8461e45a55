use std::fs;
use std::path::Path;

use calamine::{DataType, Reader, Xlsx, open_workbook};
use tracing::debug;

use crate::liftlog::tools::error::{Result, ToolError};

/// A header row plus data rows read from an external file. Cells are kept as
/// raw strings; ragged rows are allowed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SourceTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SourceTable {
    /// Index of the first header equal to `name`.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// Value of `column` in `row`, or an empty string when the row is short.
    pub fn cell<'a>(&self, row: &'a [String], column: usize) -> &'a str {
        row.get(column).map(String::as_str).unwrap_or("")
    }
}

/// Reads an import source. `.xlsx` files are read from their first worksheet;
/// anything else is parsed as delimited text. A path that is missing or
/// cannot be opened fails with [`ToolError::SourceNotFound`].
pub fn read_source(path: &Path) -> Result<SourceTable> {
    if !path.is_file() {
        return Err(ToolError::SourceNotFound(path.to_path_buf()));
    }
    let is_workbook = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"));
    if is_workbook {
        read_workbook(path)
    } else {
        let text = fs::read_to_string(path)
            .map_err(|_| ToolError::SourceNotFound(path.to_path_buf()))?;
        parse_delimited(&text)
    }
}

/// Tab when the header line contains a tab, comma otherwise.
pub fn detect_delimiter(text: &str) -> u8 {
    let header = text.lines().next().unwrap_or("");
    if header.contains('\t') { b'\t' } else { b',' }
}

/// Parses delimited text with a header row.
pub fn parse_delimited(text: &str) -> Result<SourceTable> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    if text.trim().is_empty() {
        return Ok(SourceTable::default());
    }
    let delimiter = detect_delimiter(text);
    debug!(delimiter = %char::from(delimiter).escape_default(), "detected source delimiter");
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(text.as_bytes());
    let headers = reader.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(SourceTable { headers, rows })
}

fn read_workbook(path: &Path) -> Result<SourceTable> {
    let mut workbook: Xlsx<_> = match open_workbook(path) {
        Ok(workbook) => workbook,
        Err(calamine::XlsxError::Io(_)) => {
            return Err(ToolError::SourceNotFound(path.to_path_buf()));
        }
        Err(err) => return Err(err.into()),
    };
    let Some(sheet) = workbook.sheet_names().first().cloned() else {
        return Ok(SourceTable::default());
    };
    let range = workbook
        .worksheet_range(&sheet)
        .ok_or_else(|| ToolError::SourceNotFound(path.to_path_buf()))??;

    let mut rows = range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect::<Vec<_>>());
    let headers = rows.next().unwrap_or_default();
    debug!(sheet = %sheet, "read import source worksheet");
    Ok(SourceTable {
        headers,
        rows: rows.collect(),
    })
}

fn cell_to_string(cell: &DataType) -> String {
    match cell {
        DataType::String(value) => value.clone(),
        DataType::Float(value) => value.to_string(),
        DataType::Int(value) => value.to_string(),
        DataType::Bool(value) => value.to_string(),
        DataType::Empty => String::new(),
        other => other.to_string(),
    }
}
