//! Pearson and Spearman correlation between the two log2FC columns

use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};

use super::pvalue::correlation_pvalue;
use crate::data::MergedRecord;
use crate::error::{CorrError, Result};
use crate::stats::rank_average;

/// Correlation statistics over the merged log2FC pairs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrelationResult {
    /// Pearson product-moment correlation, in [-1, 1]
    pub pearson_r: f64,
    /// Two-sided p-value of pearson_r, in [0, 1]
    pub pearson_p: f64,
    /// Spearman rank correlation, in [-1, 1]
    pub spearman_rho: f64,
    /// Two-sided p-value of spearman_rho, in [0, 1]
    pub spearman_p: f64,
    /// Number of pairs
    pub n: usize,
}

fn is_constant(x: ArrayView1<f64>) -> bool {
    match x.get(0) {
        Some(&first) => x.iter().all(|&v| v == first),
        None => true,
    }
}

/// Pearson correlation coefficient.
/// SciPy equivalent: scipy.stats.pearsonr(x, y)[0]
///
/// Fails with `InsufficientData` for fewer than two pairs and with
/// `DegenerateInput` when either column has zero variance.
pub fn pearson_r(x: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<f64> {
    let n = x.len();
    if n != y.len() {
        return Err(CorrError::InvalidInput {
            reason: format!("columns differ in length ({} vs {})", n, y.len()),
        });
    }
    if n < 2 {
        return Err(CorrError::InsufficientData { n, required: 2 });
    }
    if is_constant(x) || is_constant(y) {
        return Err(CorrError::DegenerateInput {
            reason: "zero variance in a log2FC column; correlation is undefined".to_string(),
        });
    }

    let mean_x = x.sum() / n as f64;
    let mean_y = y.sum() / n as f64;
    let dx = x.mapv(|v| v - mean_x);
    let dy = y.mapv(|v| v - mean_y);

    let sxy = dx.dot(&dy);
    let sxx = dx.dot(&dx);
    let syy = dy.dot(&dy);

    let r = sxy / (sxx.sqrt() * syy.sqrt());
    if !r.is_finite() {
        return Err(CorrError::DegenerateInput {
            reason: format!("correlation evaluated to {}", r),
        });
    }

    // Rounding can push |r| marginally past 1
    Ok(r.clamp(-1.0, 1.0))
}

/// Spearman rank correlation: Pearson r of average ranks.
/// SciPy equivalent: scipy.stats.spearmanr(x, y)[0]
pub fn spearman_rho(x: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<f64> {
    let xs: Vec<f64> = x.iter().copied().collect();
    let ys: Vec<f64> = y.iter().copied().collect();
    let rx = Array1::from(rank_average(&xs));
    let ry = Array1::from(rank_average(&ys));
    pearson_r(rx.view(), ry.view())
}

/// Compute both correlations with p-values over the merged records
pub fn correlate(records: &[MergedRecord]) -> Result<CorrelationResult> {
    let n = records.len();
    if n < 2 {
        return Err(CorrError::InsufficientData { n, required: 2 });
    }

    let x: Array1<f64> = records.iter().map(|r| r.log2fc_1).collect();
    let y: Array1<f64> = records.iter().map(|r| r.log2fc_2).collect();

    let pearson = pearson_r(x.view(), y.view())?;
    let spearman = spearman_rho(x.view(), y.view())?;

    Ok(CorrelationResult {
        pearson_r: pearson,
        pearson_p: correlation_pvalue(pearson, n),
        spearman_rho: spearman,
        spearman_p: correlation_pvalue(spearman, n),
        n,
    })
}
