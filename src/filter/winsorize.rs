//! Percentile winsorization of merged log2FC columns
//!
//! Each column is clipped into its own [low, high] range, where low/high are
//! linear-interpolation percentiles of that column. Values are clipped, not
//! removed, so the gene count is preserved.
//!
//! Small inputs are not special-cased: with a single record low == high ==
//! the value and clipping is a no-op; with two records both values are
//! pulled slightly towards each other.

use serde::{Deserialize, Serialize};

use crate::data::MergedRecord;
use crate::error::{CorrError, Result};
use crate::stats::percentile;

/// Percentile range used for clipping
#[derive(Debug, Clone)]
pub struct WinsorParams {
    /// Lower percentile in [0, 100]
    pub percentile_low: f64,
    /// Upper percentile in [0, 100]
    pub percentile_high: f64,
}

impl Default for WinsorParams {
    fn default() -> Self {
        Self {
            percentile_low: 1.0,
            percentile_high: 99.0,
        }
    }
}

impl WinsorParams {
    pub fn validate(&self) -> Result<()> {
        let lo = self.percentile_low;
        let hi = self.percentile_high;
        let in_range = |p: f64| p.is_finite() && (0.0..=100.0).contains(&p);
        if !in_range(lo) || !in_range(hi) || lo > hi {
            return Err(CorrError::InvalidInput {
                reason: format!(
                    "percentiles must satisfy 0 <= low <= high <= 100, got low={} high={}",
                    lo, hi
                ),
            });
        }
        Ok(())
    }
}

/// Closed clipping interval for one column
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipBounds {
    pub low: f64,
    pub high: f64,
}

impl ClipBounds {
    /// Percentile bounds of a column, `None` when the column is empty
    pub fn from_percentiles(values: &[f64], p_lo: f64, p_hi: f64) -> Option<Self> {
        Some(Self {
            low: percentile(values, p_lo)?,
            high: percentile(values, p_hi)?,
        })
    }

    pub fn clip(&self, v: f64) -> f64 {
        if v < self.low {
            self.low
        } else if v > self.high {
            self.high
        } else {
            v
        }
    }
}

/// Bounds applied to both merged columns
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WinsorBounds {
    pub log2fc_1: ClipBounds,
    pub log2fc_2: ClipBounds,
}

/// Clip a column in place. Idempotent for fixed bounds.
pub fn clip_column(values: &mut [f64], bounds: ClipBounds) {
    for v in values.iter_mut() {
        *v = bounds.clip(*v);
    }
}

/// Winsorize both log2FC columns independently, in place
pub fn winsorize(records: &mut [MergedRecord], params: &WinsorParams) -> Result<WinsorBounds> {
    params.validate()?;

    let mut col_1: Vec<f64> = records.iter().map(|r| r.log2fc_1).collect();
    let mut col_2: Vec<f64> = records.iter().map(|r| r.log2fc_2).collect();

    let (b1, b2) = match (
        ClipBounds::from_percentiles(&col_1, params.percentile_low, params.percentile_high),
        ClipBounds::from_percentiles(&col_2, params.percentile_low, params.percentile_high),
    ) {
        (Some(b1), Some(b2)) => (b1, b2),
        _ => return Err(CorrError::InsufficientData { n: 0, required: 1 }),
    };

    log::debug!(
        "Winsorizing log2fc_1 to [{:.4}, {:.4}], log2fc_2 to [{:.4}, {:.4}]",
        b1.low,
        b1.high,
        b2.low,
        b2.high
    );

    clip_column(&mut col_1, b1);
    clip_column(&mut col_2, b2);
    for ((rec, v1), v2) in records.iter_mut().zip(col_1).zip(col_2) {
        rec.log2fc_1 = v1;
        rec.log2fc_2 = v2;
    }

    Ok(WinsorBounds {
        log2fc_1: b1,
        log2fc_2: b2,
    })
}
