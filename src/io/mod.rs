//! Input/Output operations for log2FC correlation

mod delimited;
mod format;
mod loader;
mod results;
mod spreadsheet;

pub use delimited::DelimitedReader;
pub use format::{reader_for, RawTable, TableFormat, TableReader, TableSource};
pub use loader::{load, load_from_raw, FoldChangeTable, LoadParams, DEFAULT_GENE_TYPE};
pub use results::{
    read_merged_table, write_fold_changes, write_merged_table, write_summary_json, CorrelationReport,
};
pub use spreadsheet::SpreadsheetReader;
