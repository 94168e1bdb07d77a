//! Transformation of raw expression values into log2 fold changes

mod log2fc;

pub use log2fc::{compute_fold_changes, log2_fold_change, log2_fold_changes, validate_pseudocount};
