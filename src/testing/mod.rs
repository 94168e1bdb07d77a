//! Statistical testing of log2FC agreement between two tables

mod correlation;
mod pvalue;

pub use correlation::{correlate, pearson_r, spearman_rho, CorrelationResult};
pub use pvalue::{calculate_pvalue_t, correlation_pvalue};
