//! P-value calculation for correlation coefficients

use statrs::distribution::{ContinuousCDF, StudentsT};

/// Calculate two-sided p-value from t-statistic with given degrees of freedom
/// SciPy equivalent: 2 * stats.t.sf(abs(t), df)
pub fn calculate_pvalue_t(stat: f64, df: f64) -> f64 {
    if stat.is_nan() || df <= 0.0 {
        return f64::NAN;
    }
    if stat.is_infinite() {
        return 0.0;
    }

    match StudentsT::new(0.0, 1.0, df) {
        Ok(t_dist) => (2.0 * t_dist.cdf(-stat.abs())).clamp(0.0, 1.0),
        Err(_) => f64::NAN,
    }
}

/// Two-sided p-value for H0: rho = 0 given a sample correlation `r` over `n` pairs.
///
/// Uses t = r * sqrt((n - 2) / (1 - r^2)) with n - 2 degrees of freedom, which
/// is the exact test for Pearson r under bivariate normality and the usual
/// large-sample approximation for Spearman rho.
///
/// With n = 2 the coefficient is always +/-1 and carries no evidence; the
/// p-value is 1. A perfect correlation with n > 2 has p-value 0.
pub fn correlation_pvalue(r: f64, n: usize) -> f64 {
    if r.is_nan() || n < 2 {
        return f64::NAN;
    }
    if n == 2 {
        return 1.0;
    }

    let df = (n - 2) as f64;
    let denom = 1.0 - r * r;
    if denom <= 0.0 {
        return 0.0;
    }

    let t = r * (df / denom).sqrt();
    calculate_pvalue_t(t, df)
}
