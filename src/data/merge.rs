//! Inner join of two log2FC series on gene identifier

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::{FoldChangeRecord, MergedRecord};
use crate::error::{CorrError, Result};

/// How repeated gene identifiers within one table are resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Keep the first occurrence, drop later ones with a warning
    #[default]
    KeepFirst,
    /// Abort with `CorrError::DuplicateKey`
    Error,
}

/// Bookkeeping for a single merge
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeStats {
    /// Distinct genes in the first table
    pub genes_a: usize,
    /// Distinct genes in the second table
    pub genes_b: usize,
    /// Repeated identifiers dropped from the first table
    pub duplicates_a: usize,
    /// Repeated identifiers dropped from the second table
    pub duplicates_b: usize,
    /// Genes present in both tables
    pub shared: usize,
}

/// Merged rows plus merge statistics
#[derive(Debug, Clone)]
pub struct MergeOutput {
    pub records: Vec<MergedRecord>,
    pub stats: MergeStats,
}

/// Resolve duplicates, returning the kept records in first-seen order
fn dedup<'a>(
    series: &'a [FoldChangeRecord],
    policy: DuplicatePolicy,
    table: &str,
) -> Result<(Vec<&'a FoldChangeRecord>, usize)> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(series.len());
    let mut kept = Vec::with_capacity(series.len());
    let mut n_dup = 0;

    for rec in series {
        if !seen.insert(rec.gene.as_str()) {
            match policy {
                DuplicatePolicy::Error => {
                    return Err(CorrError::DuplicateKey {
                        gene: rec.gene.clone(),
                        table: table.to_string(),
                    });
                }
                DuplicatePolicy::KeepFirst => {
                    log::debug!("Dropping repeated gene '{}' in {}", rec.gene, table);
                    n_dup += 1;
                }
            }
        } else {
            kept.push(rec);
        }
    }

    if n_dup > 0 {
        log::warn!(
            "{} repeated gene identifiers in {}; kept first occurrence of each",
            n_dup,
            table
        );
    }

    Ok((kept, n_dup))
}

/// Inner-join two log2FC series on gene identifier.
///
/// Only genes present in both series are returned, in the order of
/// `series_a`. Each gene appears at most once in the output.
pub fn merge(
    series_a: &[FoldChangeRecord],
    series_b: &[FoldChangeRecord],
    policy: DuplicatePolicy,
) -> Result<MergeOutput> {
    let (kept_a, duplicates_a) = dedup(series_a, policy, "table A")?;
    let (kept_b, duplicates_b) = dedup(series_b, policy, "table B")?;

    let lookup_b: HashMap<&str, f64> = kept_b
        .iter()
        .map(|rec| (rec.gene.as_str(), rec.log2fc))
        .collect();

    let records: Vec<MergedRecord> = kept_a
        .iter()
        .filter_map(|rec| {
            lookup_b.get(rec.gene.as_str()).map(|&log2fc_2| MergedRecord {
                gene: rec.gene.clone(),
                log2fc_1: rec.log2fc,
                log2fc_2,
            })
        })
        .collect();

    let stats = MergeStats {
        genes_a: kept_a.len(),
        genes_b: kept_b.len(),
        duplicates_a,
        duplicates_b,
        shared: records.len(),
    };

    Ok(MergeOutput { records, stats })
}
