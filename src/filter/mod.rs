//! Row filters applied during loading and percentile clipping after merging

mod expression;
mod winsorize;

pub use expression::{
    parse_expression, passes_gene_type, passes_min_expression, passes_status, DropReason, LoadStats,
};
pub use winsorize::{clip_column, winsorize, ClipBounds, WinsorBounds, WinsorParams};
