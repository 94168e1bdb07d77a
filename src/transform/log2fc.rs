//! Pseudocount-stabilized log2 fold change
//!
//! log2FC = log2((value_2 + pseudocount) / (value_1 + pseudocount))
//!
//! A strictly positive pseudocount keeps the ratio finite and positive even
//! when both raw values are zero.

use ndarray::{Array1, ArrayView1, Zip};

use crate::data::{FoldChangeRecord, GeneRecord};
use crate::error::{CorrError, Result};

/// Reject pseudocounts that could make the logarithm argument non-positive
pub fn validate_pseudocount(pseudocount: f64) -> Result<()> {
    if !(pseudocount.is_finite() && pseudocount > 0.0) {
        return Err(CorrError::InvalidInput {
            reason: format!("pseudocount must be a positive finite number, got {}", pseudocount),
        });
    }
    Ok(())
}

/// log2 fold change of a single gene (second state over first state).
///
/// Taken as a difference of logs so that large finite values cannot
/// overflow the ratio.
pub fn log2_fold_change(value_1: f64, value_2: f64, pseudocount: f64) -> f64 {
    (value_2 + pseudocount).log2() - (value_1 + pseudocount).log2()
}

/// Element-wise log2 fold change over two value columns
pub fn log2_fold_changes(
    value_1: ArrayView1<f64>,
    value_2: ArrayView1<f64>,
    pseudocount: f64,
) -> Result<Array1<f64>> {
    validate_pseudocount(pseudocount)?;

    if value_1.len() != value_2.len() {
        return Err(CorrError::InvalidInput {
            reason: format!(
                "value columns differ in length ({} vs {})",
                value_1.len(),
                value_2.len()
            ),
        });
    }

    let mut out = Array1::zeros(value_1.len());
    Zip::from(&mut out)
        .and(&value_1)
        .and(&value_2)
        .for_each(|o, &v1, &v2| *o = log2_fold_change(v1, v2, pseudocount));

    Ok(out)
}

/// Compute one `FoldChangeRecord` per gene record
pub fn compute_fold_changes(records: &[GeneRecord], pseudocount: f64) -> Result<Vec<FoldChangeRecord>> {
    let v1: Array1<f64> = records.iter().map(|r| r.value_1).collect();
    let v2: Array1<f64> = records.iter().map(|r| r.value_2).collect();

    let lfc = log2_fold_changes(v1.view(), v2.view(), pseudocount)?;

    Ok(records
        .iter()
        .zip(lfc.iter())
        .map(|(rec, &log2fc)| FoldChangeRecord {
            gene: rec.gene_id.clone(),
            log2fc,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn gene(id: &str, v1: f64, v2: f64) -> GeneRecord {
        GeneRecord {
            gene_id: id.to_string(),
            value_1: v1,
            value_2: v2,
            status: None,
            gene_type: None,
        }
    }

    #[test]
    fn test_known_value() {
        let lfc = log2_fold_change(10.0, 20.0, 1e-3);
        let expected = (20.001f64 / 10.001).log2();
        assert!((lfc - expected).abs() < 1e-12);
        assert!((lfc - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_zero_values_finite() {
        assert_eq!(log2_fold_change(0.0, 0.0, 1e-3), 0.0);
        assert!(log2_fold_change(0.0, 5.0, 1e-3).is_finite());
        assert!(log2_fold_change(5.0, 0.0, 1e-3).is_finite());
    }

    #[test]
    fn test_large_values_stay_finite() {
        let up = log2_fold_change(0.0, 1e306, 1e-3);
        let down = log2_fold_change(1e306, 0.0, 1e-3);
        assert!(up.is_finite());
        assert!(down.is_finite());
        assert!((up + down).abs() < 1e-9);
        assert!((up - (1e306f64.log2() - 1e-3f64.log2())).abs() < 1e-9);

        assert_eq!(log2_fold_change(1e308, 1e308, 1e-3), 0.0);
    }

    #[test]
    fn test_monotonic_in_value_2() {
        let mut prev = f64::NEG_INFINITY;
        for v2 in [0.0, 0.5, 1.0, 2.0, 10.0, 1e3, 1e6] {
            let lfc = log2_fold_change(3.0, v2, 1e-3);
            assert!(lfc >= prev, "log2fc decreased at value_2={}", v2);
            prev = lfc;
        }
    }

    #[test]
    fn test_antimonotonic_in_value_1() {
        let mut prev = f64::INFINITY;
        for v1 in [0.0, 0.5, 1.0, 2.0, 10.0, 1e3, 1e6] {
            let lfc = log2_fold_change(v1, 3.0, 1e-3);
            assert!(lfc <= prev, "log2fc increased at value_1={}", v1);
            prev = lfc;
        }
    }

    #[test]
    fn test_invalid_pseudocount() {
        assert!(validate_pseudocount(0.0).is_err());
        assert!(validate_pseudocount(-1e-3).is_err());
        assert!(validate_pseudocount(f64::NAN).is_err());
        assert!(validate_pseudocount(1e-3).is_ok());
    }

    #[test]
    fn test_array_version_matches_scalar() {
        let v1 = array![1.0, 10.0, 0.0];
        let v2 = array![2.0, 5.0, 4.0];
        let lfc = log2_fold_changes(v1.view(), v2.view(), 0.5).unwrap();
        for i in 0..3 {
            assert_eq!(lfc[i], log2_fold_change(v1[i], v2[i], 0.5));
        }
    }

    #[test]
    fn test_compute_fold_changes() {
        let records = vec![gene("A", 10.0, 20.0), gene("B", 8.0, 2.0)];
        let fcs = compute_fold_changes(&records, 1e-3).unwrap();
        assert_eq!(fcs.len(), 2);
        assert_eq!(fcs[0].gene, "A");
        assert!(fcs[0].log2fc > 0.0);
        assert!(fcs[1].log2fc < 0.0);
    }
}
