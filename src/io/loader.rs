//! Loading one expression table into per-gene log2 fold changes
//!
//! Column selection:
//! - identifier: `gene_id` if present, otherwise `gene` (renamed to `gene`)
//! - values: `value_1` (first state) and `value_2` (second state), required
//! - `status` and `gene_type` are used only when present
//!
//! Rows failing a filter are dropped and counted in `LoadStats`; they are
//! never an error.

use log::{debug, info};

use super::format::{RawTable, TableSource};
use crate::data::{FoldChangeRecord, GeneRecord, GeneStatus};
use crate::error::{CorrError, Result};
use crate::filter::{
    parse_expression, passes_gene_type, passes_min_expression, passes_status, DropReason, LoadStats,
};
use crate::transform::{compute_fold_changes, validate_pseudocount};

/// Identifier columns, in order of preference
pub const GENE_ID_COLUMNS: [&str; 2] = ["gene_id", "gene"];
pub const VALUE_1_COLUMN: &str = "value_1";
pub const VALUE_2_COLUMN: &str = "value_2";
pub const STATUS_COLUMN: &str = "status";
pub const GENE_TYPE_COLUMN: &str = "gene_type";

/// Default gene category kept when a gene_type column exists
pub const DEFAULT_GENE_TYPE: &str = "protein_coding";

/// Configurable parameters for table loading
#[derive(Debug, Clone)]
pub struct LoadParams {
    /// Added to both values before taking the ratio; must be > 0
    pub pseudocount: f64,
    /// Keep only rows with status == "OK" when a status column exists
    pub use_status_filter: bool,
    /// Rows with value_1 + value_2 below this are dropped
    pub min_expression_sum: f64,
    /// Gene category to keep when a gene_type column exists; `None` keeps all
    pub gene_type_filter: Option<String>,
}

impl Default for LoadParams {
    fn default() -> Self {
        Self {
            pseudocount: 1e-3,
            use_status_filter: false,
            min_expression_sum: 1.0,
            gene_type_filter: Some(DEFAULT_GENE_TYPE.to_string()),
        }
    }
}

impl LoadParams {
    pub fn validate(&self) -> Result<()> {
        validate_pseudocount(self.pseudocount)?;
        if !self.min_expression_sum.is_finite() || self.min_expression_sum < 0.0 {
            return Err(CorrError::InvalidInput {
                reason: format!(
                    "minimum expression sum must be a non-negative finite number, got {}",
                    self.min_expression_sum
                ),
            });
        }
        Ok(())
    }
}

/// Per-gene log2 fold changes of one table plus loading diagnostics
#[derive(Debug, Clone)]
pub struct FoldChangeTable {
    pub records: Vec<FoldChangeRecord>,
    pub stats: LoadStats,
}

impl FoldChangeTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Resolved column positions of a raw table
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    gene: usize,
    value_1: usize,
    value_2: usize,
    status: Option<usize>,
    gene_type: Option<usize>,
}

impl ColumnMap {
    fn resolve(raw: &RawTable) -> Result<Self> {
        let missing = |column: &str| CorrError::MissingColumn {
            column: column.to_string(),
            available: raw.headers.join(", "),
        };

        let gene = GENE_ID_COLUMNS
            .iter()
            .find_map(|name| raw.column_index(name))
            .ok_or_else(|| missing(GENE_ID_COLUMNS.join(" or ").as_str()))?;
        let value_1 = raw
            .column_index(VALUE_1_COLUMN)
            .ok_or_else(|| missing(VALUE_1_COLUMN))?;
        let value_2 = raw
            .column_index(VALUE_2_COLUMN)
            .ok_or_else(|| missing(VALUE_2_COLUMN))?;

        Ok(Self {
            gene,
            value_1,
            value_2,
            status: raw.column_index(STATUS_COLUMN),
            gene_type: raw.column_index(GENE_TYPE_COLUMN),
        })
    }
}

/// Apply the row filters in order; the first failing filter names the reason
fn parse_row(
    row: &[String],
    columns: &ColumnMap,
    params: &LoadParams,
) -> std::result::Result<GeneRecord, DropReason> {
    let gene_id = RawTable::cell(row, columns.gene);
    if gene_id.is_empty() {
        return Err(DropReason::MissingGeneId);
    }

    let status = columns
        .status
        .map(|idx| GeneStatus::parse(RawTable::cell(row, idx)));
    if !passes_status(status.as_ref(), params.use_status_filter) {
        return Err(DropReason::Status);
    }

    let gene_type = columns
        .gene_type
        .map(|idx| RawTable::cell(row, idx).to_string());
    if !passes_gene_type(gene_type.as_deref(), params.gene_type_filter.as_deref()) {
        return Err(DropReason::GeneType);
    }

    let value_1 = parse_expression(RawTable::cell(row, columns.value_1));
    let value_2 = parse_expression(RawTable::cell(row, columns.value_2));
    let (value_1, value_2) = match (value_1, value_2) {
        (Some(v1), Some(v2)) => (v1, v2),
        _ => return Err(DropReason::UnparseableValue),
    };

    let record = GeneRecord {
        gene_id: gene_id.to_string(),
        value_1,
        value_2,
        status,
        gene_type,
    };

    if !passes_min_expression(&record, params.min_expression_sum) {
        return Err(DropReason::LowExpression);
    }

    Ok(record)
}

/// Select columns, filter rows and compute log2FC over an already-read table
pub fn load_from_raw(raw: &RawTable, params: &LoadParams) -> Result<FoldChangeTable> {
    params.validate()?;
    let columns = ColumnMap::resolve(raw)?;

    let mut stats = LoadStats {
        total_rows: raw.n_rows(),
        ..Default::default()
    };

    let mut genes = Vec::with_capacity(raw.n_rows());
    for row in &raw.rows {
        match parse_row(row, &columns, params) {
            Ok(record) => genes.push(record),
            Err(reason) => stats.record_drop(reason),
        }
    }
    stats.retained = genes.len();

    debug!("  {}", stats);

    let records = compute_fold_changes(&genes, params.pseudocount)?;
    Ok(FoldChangeTable { records, stats })
}

/// Read a table from its source and compute per-gene log2 fold changes
pub fn load(source: &TableSource, params: &LoadParams) -> Result<FoldChangeTable> {
    info!("Loading {} table from: {}", source.format, source.path.display());
    let raw = source.read()?;
    let table = load_from_raw(&raw, params)?;
    info!(
        "  {} of {} genes retained after filters",
        table.stats.retained, table.stats.total_rows
    );
    Ok(table)
}
