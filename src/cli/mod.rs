//! Command-line interface for rust_lfc_corr

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "rust_lfc_corr")]
#[command(author = "SunJu Kim")]
#[command(version)]
#[command(about = "Correlation of per-gene log2 fold changes between two experiments")]
#[command(disable_help_flag = true)]
#[command(disable_version_flag = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Correlate log2FC between two expression tables
    #[command(
        about = "Correlate log2FC between two expression tables",
        long_about = "Correlate log2FC between two expression tables\n\n\
            Recomputes log2((value_2 + pseudocount) / (value_1 + pseudocount)) per gene\n\
            in each table, keeps genes present in both, clips each log2FC column to a\n\
            percentile range and reports Pearson and Spearman correlation. Writes the\n\
            merged table (CSV) and a scatter plot (SVG).",
        after_long_help = "\
Examples:
  # Two Cuffdiff runs, default filters
  rust_lfc_corr run -a five_pct/gene_exp.diff -b ten_pct/gene_exp.diff \\
    --label-a 5% --label-b 10% -o correlation --prefix e_coli_5_vs_10

  # Annotated spreadsheets, only status == OK, no gene-type filter
  rust_lfc_corr run -a neb.xlsx -b depleted.xlsx --status-ok --no-gene-type-filter"
    )]
    Run {
        /// First expression table (x-axis)
        #[arg(short = 'a', long = "table-a",
            long_help = "First expression table (x-axis).\n\
                Tab-delimited text (.tsv/.txt/.tab/.diff) or spreadsheet (.xlsx/.xls/.ods).\n\
                Needs a gene_id (or gene) column and numeric value_1, value_2 columns.")]
        table_a: String,

        /// Second expression table (y-axis)
        #[arg(short = 'b', long = "table-b")]
        table_b: String,

        /// Format of table A: auto, tsv or xlsx [default: auto]
        #[arg(long, default_value = "auto")]
        format_a: String,

        /// Format of table B: auto, tsv or xlsx [default: auto]
        #[arg(long, default_value = "auto")]
        format_b: String,

        /// Axis label for table A [default: file name]
        #[arg(long)]
        label_a: Option<String>,

        /// Axis label for table B [default: file name]
        #[arg(long)]
        label_b: Option<String>,

        /// Output directory (created if missing)
        #[arg(short, long, default_value = ".")]
        output_dir: String,

        /// Base name of output files
        #[arg(long, default_value = "log2fc_correlation")]
        prefix: String,

        /// Pseudocount added to both values
        #[arg(long, default_value = "1e-3")]
        pseudocount: f64,

        /// Minimum value_1 + value_2 for a gene to be kept
        #[arg(long, default_value = "1.0")]
        min_expr: f64,

        /// Keep only rows with status == OK (when a status column exists)
        #[arg(long)]
        status_ok: bool,

        /// Gene type kept when a gene_type column exists
        #[arg(long, default_value = "protein_coding")]
        gene_type: String,

        /// Keep all gene types
        #[arg(long)]
        no_gene_type_filter: bool,

        /// Lower winsorization percentile
        #[arg(long, default_value = "1")]
        p_low: f64,

        /// Upper winsorization percentile
        #[arg(long, default_value = "99")]
        p_high: f64,

        /// Repeated gene identifiers: first or error [default: first]
        #[arg(long, default_value = "first",
            long_help = "How repeated gene identifiers within one table are handled.\n\
                first: keep the first occurrence, drop the rest (with a warning)\n\
                error: abort the run")]
        duplicates: String,

        /// Skip the scatter plot
        #[arg(long)]
        no_plot: bool,

        /// Also write the summary as JSON to this path
        #[arg(long, value_name = "PATH")]
        summary_json: Option<String>,
    },

    /// Compute filtered log2FC for a single table
    #[command(
        about = "Compute filtered log2FC for a single table",
        long_about = "Compute filtered log2FC for a single table\n\n\
            Applies the same column selection, filters and pseudocount as `run`\n\
            and writes gene<TAB>log2fc."
    )]
    Foldchange {
        /// Expression table
        #[arg(short, long)]
        input: String,

        /// Output TSV path
        #[arg(short, long, default_value = "log2fc.tsv")]
        output: String,

        /// Input format: auto, tsv or xlsx [default: auto]
        #[arg(long, default_value = "auto")]
        format: String,

        /// Pseudocount added to both values
        #[arg(long, default_value = "1e-3")]
        pseudocount: f64,

        /// Minimum value_1 + value_2 for a gene to be kept
        #[arg(long, default_value = "1.0")]
        min_expr: f64,

        /// Keep only rows with status == OK (when a status column exists)
        #[arg(long)]
        status_ok: bool,

        /// Gene type kept when a gene_type column exists
        #[arg(long, default_value = "protein_coding")]
        gene_type: String,

        /// Keep all gene types
        #[arg(long)]
        no_gene_type_filter: bool,
    },
}
