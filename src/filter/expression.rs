//! Row-level filters applied while loading an expression table
//!
//! Filters run in a fixed order (status, gene type, numeric parse, minimum
//! expression) and every dropped row is attributed to exactly one reason.

use serde::{Deserialize, Serialize};

use crate::data::{GeneRecord, GeneStatus};

/// Why a row did not survive loading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// Empty gene identifier cell
    MissingGeneId,
    /// status != "OK" while the status filter is on
    Status,
    /// gene_type does not match the configured category
    GeneType,
    /// value_1 or value_2 missing, non-numeric, negative or non-finite
    UnparseableValue,
    /// value_1 + value_2 below the minimum expression sum
    LowExpression,
}

/// Per-table diagnostics of the loading filters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadStats {
    pub total_rows: usize,
    pub missing_gene_id: usize,
    pub status: usize,
    pub gene_type: usize,
    pub unparseable_value: usize,
    pub low_expression: usize,
    pub retained: usize,
}

impl LoadStats {
    pub fn record_drop(&mut self, reason: DropReason) {
        match reason {
            DropReason::MissingGeneId => self.missing_gene_id += 1,
            DropReason::Status => self.status += 1,
            DropReason::GeneType => self.gene_type += 1,
            DropReason::UnparseableValue => self.unparseable_value += 1,
            DropReason::LowExpression => self.low_expression += 1,
        }
    }

    /// Total number of dropped rows across all reasons
    pub fn dropped(&self) -> usize {
        self.missing_gene_id + self.status + self.gene_type + self.unparseable_value + self.low_expression
    }
}

impl std::fmt::Display for LoadStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} rows, {} retained (dropped: {} missing id, {} status, {} gene type, {} unparseable, {} low expression)",
            self.total_rows,
            self.retained,
            self.missing_gene_id,
            self.status,
            self.gene_type,
            self.unparseable_value,
            self.low_expression
        )
    }
}

/// Parse a raw expression cell.
///
/// Mirrors a lenient numeric coercion: surrounding whitespace is ignored,
/// anything that is not a non-negative finite number is rejected.
pub fn parse_expression(raw: &str) -> Option<f64> {
    let v: f64 = raw.trim().parse().ok()?;
    if v.is_finite() && v >= 0.0 {
        Some(v)
    } else {
        None
    }
}

/// Status filter; rows without a status column always pass
pub fn passes_status(status: Option<&GeneStatus>, use_status_filter: bool) -> bool {
    match (use_status_filter, status) {
        (true, Some(s)) => s.is_ok(),
        _ => true,
    }
}

/// Gene-type filter; rows without a gene_type column always pass
pub fn passes_gene_type(gene_type: Option<&str>, required: Option<&str>) -> bool {
    match (required, gene_type) {
        (Some(req), Some(gt)) => gt == req,
        _ => true,
    }
}

/// Minimum-expression filter on value_1 + value_2
pub fn passes_min_expression(record: &GeneRecord, min_expression_sum: f64) -> bool {
    record.expression_sum() >= min_expression_sum
}
