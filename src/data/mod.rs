//! Data structures for log2FC correlation

mod merge;
mod records;

pub use merge::{merge, DuplicatePolicy, MergeOutput, MergeStats};
pub use records::{FoldChangeRecord, GeneRecord, GeneStatus, MergedRecord, STATUS_OK};
