//! Per-gene record types flowing through the pipeline

use serde::{Deserialize, Serialize};

/// Status value that passes the optional status filter
pub const STATUS_OK: &str = "OK";

/// Test status reported by the upstream differential expression tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeneStatus {
    Ok,
    Other(String),
}

impl GeneStatus {
    pub fn parse(raw: &str) -> Self {
        if raw == STATUS_OK {
            GeneStatus::Ok
        } else {
            GeneStatus::Other(raw.to_string())
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, GeneStatus::Ok)
    }
}

/// One parsed row of an expression table.
///
/// Values are non-negative finite measurements; rows that cannot satisfy
/// that are dropped by the loader before a `GeneRecord` exists.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneRecord {
    pub gene_id: String,
    /// Expression under the first state (`value_1`)
    pub value_1: f64,
    /// Expression under the second state (`value_2`)
    pub value_2: f64,
    pub status: Option<GeneStatus>,
    pub gene_type: Option<String>,
}

impl GeneRecord {
    /// Combined expression used by the minimum-expression filter
    pub fn expression_sum(&self) -> f64 {
        self.value_1 + self.value_2
    }
}

/// Recomputed log2 fold change of a single gene in one table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoldChangeRecord {
    pub gene: String,
    pub log2fc: f64,
}

/// One gene present in both tables; also one row of the output table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedRecord {
    pub gene: String,
    pub log2fc_1: f64,
    pub log2fc_2: f64,
}
