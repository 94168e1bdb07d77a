//! Statistical utility functions shared across modules
//!
//! Contains the linear-interpolation percentile used by winsorization and
//! the average-rank transform used by Spearman correlation.

use std::cmp::Ordering;

/// Total order on f64 with NaN sorted last
fn cmp_f64(a: &f64, b: &f64) -> Ordering {
    a.partial_cmp(b).unwrap_or_else(|| a.is_nan().cmp(&b.is_nan()))
}

/// Percentile with linear interpolation between closest ranks.
/// NumPy equivalent: np.percentile(x, q) with the default "linear" method
///
/// Algorithm:
/// 1. Sort x ascending
/// 2. pos = q / 100 * (n - 1)
/// 3. lo = floor(pos), hi = min(lo + 1, n - 1), frac = pos - lo
/// 4. result = x[lo] + frac * (x[hi] - x[lo])
///
/// Returns `None` for empty input. `q` is clamped into [0, 100].
pub fn percentile(x: &[f64], q: f64) -> Option<f64> {
    if x.is_empty() {
        return None;
    }

    let mut sorted = x.to_vec();
    sorted.sort_by(cmp_f64);

    Some(percentile_sorted(&sorted, q))
}

/// Same as [`percentile`] for already-sorted, non-empty input
pub fn percentile_sorted(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    let q = q.clamp(0.0, 100.0);

    let pos = q / 100.0 * (n - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    let frac = pos - lo as f64;

    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}

/// Rank data with ties receiving the mean of the ranks they span.
/// SciPy equivalent: scipy.stats.rankdata(x, method="average")
///
/// Ranks are 1-based.
pub fn rank_average(x: &[f64]) -> Vec<f64> {
    let n = x.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| cmp_f64(&x[a], &x[b]));

    let mut ranks = vec![0.0; n];
    let mut i = 0;
    while i < n {
        // Extend over the run of tied values
        let mut j = i;
        while j + 1 < n && x[order[j + 1]] == x[order[i]] {
            j += 1;
        }

        // Positions i..=j hold ranks i+1..=j+1
        let avg_rank = (i + j) as f64 / 2.0 + 1.0;
        for &idx in &order[i..=j] {
            ranks[idx] = avg_rank;
        }
        i = j + 1;
    }

    ranks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile_simple() {
        let x = vec![5.0, 1.0, 3.0, 2.0, 4.0];
        assert_eq!(percentile(&x, 0.0), Some(1.0));
        assert_eq!(percentile(&x, 50.0), Some(3.0));
        assert_eq!(percentile(&x, 100.0), Some(5.0));
    }

    #[test]
    fn test_percentile_interpolates() {
        // np.percentile([0..10], 1) == 0.1, np.percentile([0..10], 99) == 9.9
        let x: Vec<f64> = (0..=10).map(|v| v as f64).collect();
        let p1 = percentile(&x, 1.0).unwrap();
        let p99 = percentile(&x, 99.0).unwrap();
        assert!((p1 - 0.1).abs() < 1e-12, "got {}", p1);
        assert!((p99 - 9.9).abs() < 1e-12, "got {}", p99);

        // np.percentile([1, 2, 3, 4], 25) == 1.75
        let q = percentile(&[4.0, 3.0, 2.0, 1.0], 25.0).unwrap();
        assert!((q - 1.75).abs() < 1e-12);
    }

    #[test]
    fn test_percentile_small_n() {
        assert_eq!(percentile(&[], 50.0), None);
        assert_eq!(percentile(&[2.5], 1.0), Some(2.5));
        assert_eq!(percentile(&[2.5], 99.0), Some(2.5));
    }

    #[test]
    fn test_rank_average_no_ties() {
        let ranks = rank_average(&[10.0, 30.0, 20.0]);
        assert_eq!(ranks, vec![1.0, 3.0, 2.0]);
    }

    #[test]
    fn test_rank_average_ties() {
        // scipy.stats.rankdata([0, 2, 3, 2]) -> [1. , 2.5, 4. , 2.5]
        let ranks = rank_average(&[0.0, 2.0, 3.0, 2.0]);
        assert_eq!(ranks, vec![1.0, 2.5, 4.0, 2.5]);

        let all_tied = rank_average(&[7.0, 7.0, 7.0]);
        assert_eq!(all_tied, vec![2.0, 2.0, 2.0]);
    }
}
