//! Correlation report and output tables

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::{FoldChangeRecord, MergeStats, MergedRecord};
use crate::error::{CorrError, Result};
use crate::filter::{LoadStats, WinsorBounds};
use crate::testing::CorrelationResult;

/// Everything reported about one run, serializable as a JSON summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationReport {
    /// Label of the first condition (x-axis)
    pub label_a: String,
    /// Label of the second condition (y-axis)
    pub label_b: String,
    pub correlation: CorrelationResult,
    pub bounds: WinsorBounds,
    pub load_a: LoadStats,
    pub load_b: LoadStats,
    pub merge: MergeStats,
}

/// Thousands separator for gene counts
fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

impl std::fmt::Display for CorrelationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let c = &self.correlation;
        writeln!(f, "log2FC Correlation Summary")?;
        writeln!(f, "==========================")?;
        writeln!(f, "{}: {}", self.label_a, self.load_a)?;
        writeln!(f, "{}: {}", self.label_b, self.load_b)?;
        if self.merge.duplicates_a + self.merge.duplicates_b > 0 {
            writeln!(
                f,
                "Duplicate gene identifiers dropped: {} / {}",
                self.merge.duplicates_a, self.merge.duplicates_b
            )?;
        }
        writeln!(f, "Common genes used after filters: {}", group_thousands(c.n))?;
        writeln!(f, "Pearson r = {:.3} (p={:.3e})", c.pearson_r, c.pearson_p)?;
        writeln!(f, "Spearman ρ = {:.3} (p={:.3e})", c.spearman_rho, c.spearman_p)?;
        Ok(())
    }
}

/// Write merged (winsorized) records as CSV: gene,log2fc_1,log2fc_2
pub fn write_merged_table<P: AsRef<Path>>(path: P, records: &[MergedRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for rec in records {
        writer.serialize(rec)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a table previously written by [`write_merged_table`]
pub fn read_merged_table<P: AsRef<Path>>(path: P) -> Result<Vec<MergedRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for rec in reader.deserialize() {
        records.push(rec?);
    }
    Ok(records)
}

/// Write one table's log2 fold changes as TSV: gene<TAB>log2fc
pub fn write_fold_changes<P: AsRef<Path>>(path: P, records: &[FoldChangeRecord]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .from_path(path)?;
    for rec in records {
        writer.serialize(rec)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the report as pretty-printed JSON
pub fn write_summary_json<P: AsRef<Path>>(path: P, report: &CorrelationReport) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report)?;
    writeln!(writer)?;
    writer.flush().map_err(CorrError::from)
}
