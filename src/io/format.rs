//! Table sources, format tags and reader dispatch
//!
//! The format of each input is resolved once, when the `TableSource` is
//! built, and selects a `TableReader` implementation. Readers only turn a
//! file into header + string cells; column semantics live in the loader.

use std::fmt;
use std::path::{Path, PathBuf};

use super::delimited::DelimitedReader;
use super::spreadsheet::SpreadsheetReader;
use crate::error::{CorrError, Result};

/// Physical format of an expression table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    /// Tab-delimited text with a header line
    Delimited,
    /// Spreadsheet workbook (first worksheet, first row is the header)
    Spreadsheet,
}

impl TableFormat {
    /// Detect the format from the file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("xlsx") | Some("xlsm") | Some("xlsb") | Some("xls") | Some("ods") => {
                Ok(TableFormat::Spreadsheet)
            }
            Some("tsv") | Some("tab") | Some("txt") | Some("diff") => Ok(TableFormat::Delimited),
            _ => Err(CorrError::UnsupportedFormat {
                path: path.display().to_string(),
            }),
        }
    }

    /// Parse an explicit format name as given on the command line
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "tsv" | "tab" | "txt" | "delimited" => Some(TableFormat::Delimited),
            "xlsx" | "xls" | "excel" | "spreadsheet" => Some(TableFormat::Spreadsheet),
            _ => None,
        }
    }
}

impl fmt::Display for TableFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableFormat::Delimited => write!(f, "tab-delimited"),
            TableFormat::Spreadsheet => write!(f, "spreadsheet"),
        }
    }
}

/// A table as read from disk: header names plus string cells
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Index of the first column with exactly this name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cell value, empty for cells past the end of a ragged row
    pub fn cell<'a>(row: &'a [String], idx: usize) -> &'a str {
        row.get(idx).map(|s| s.as_str()).unwrap_or("")
    }
}

/// Reads one table format into a `RawTable`
pub trait TableReader {
    fn read_table(&self, path: &Path) -> Result<RawTable>;
}

/// Reader implementation for a format tag
pub fn reader_for(format: TableFormat) -> Box<dyn TableReader> {
    match format {
        TableFormat::Delimited => Box::new(DelimitedReader::default()),
        TableFormat::Spreadsheet => Box::new(SpreadsheetReader),
    }
}

/// An input table together with its resolved format
#[derive(Debug, Clone)]
pub struct TableSource {
    pub path: PathBuf,
    pub format: TableFormat,
}

impl TableSource {
    pub fn new<P: Into<PathBuf>>(path: P, format: TableFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    /// Build a source, detecting the format from the extension
    pub fn from_path<P: Into<PathBuf>>(path: P) -> Result<Self> {
        let path = path.into();
        let format = TableFormat::from_path(&path)?;
        Ok(Self { path, format })
    }

    /// Short label for plots and summaries (file stem)
    pub fn label(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn read(&self) -> Result<RawTable> {
        reader_for(self.format).read_table(&self.path)
    }
}
