//! Tab-delimited table reading

use std::path::Path;

use super::format::{RawTable, TableReader};
use crate::error::{CorrError, Result};

/// Reader for tab-separated text with a header line
#[derive(Debug, Clone)]
pub struct DelimitedReader {
    pub delimiter: u8,
}

impl Default for DelimitedReader {
    fn default() -> Self {
        Self { delimiter: b'\t' }
    }
}

impl TableReader for DelimitedReader {
    fn read_table(&self, path: &Path) -> Result<RawTable> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_path(path)?;

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        if headers.iter().all(|h| h.is_empty()) {
            return Err(CorrError::EmptyData {
                reason: format!("no header line in {}", path.display()),
            });
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(|c| c.trim().to_string()).collect());
        }

        log::debug!(
            "Read {} rows x {} columns from {}",
            rows.len(),
            headers.len(),
            path.display()
        );

        Ok(RawTable::new(headers, rows))
    }
}
