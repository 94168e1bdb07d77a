//! rust_lfc_corr command-line interface

use std::path::{Path, PathBuf};

use clap::Parser;
use log::{info, LevelFilter};

use rust_lfc_corr::cli::{Cli, Commands};
use rust_lfc_corr::io::write_fold_changes;
use rust_lfc_corr::prelude::*;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() {
    let args: Vec<String> = std::env::args().collect();

    // Find the first non-flag argument (potential subcommand)
    let first_positional = args.iter().skip(1).find(|a| !a.starts_with('-'));
    let subcommands = ["run", "foldchange", "help"];
    let has_subcommand = first_positional.map_or(false, |a| subcommands.contains(&a.as_str()));

    if !has_subcommand {
        // No subcommand, handle top-level help/version manually
        if args.len() == 1 {
            print_no_args();
            return;
        }
        if args.iter().any(|a| a == "--help") {
            print_long_help();
            return;
        }
        if args.iter().any(|a| a == "-h") {
            print_short_help();
            return;
        }
        if args.iter().any(|a| a == "-V" || a == "--version") {
            println!("rust_lfc_corr {}", VERSION);
            return;
        }
        print_no_args();
        return;
    }

    let cli = Cli::parse();

    let log_level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();

    let command = match cli.command {
        Some(command) => command,
        None => {
            print_no_args();
            return;
        }
    };

    let result = match command {
        Commands::Run {
            table_a,
            table_b,
            format_a,
            format_b,
            label_a,
            label_b,
            output_dir,
            prefix,
            pseudocount,
            min_expr,
            status_ok,
            gene_type,
            no_gene_type_filter,
            p_low,
            p_high,
            duplicates,
            no_plot,
            summary_json,
        } => run_analysis(
            &table_a,
            &table_b,
            &format_a,
            &format_b,
            label_a,
            label_b,
            AnalysisConfig {
                load: load_params(pseudocount, min_expr, status_ok, &gene_type, no_gene_type_filter),
                winsor: WinsorParams {
                    percentile_low: p_low,
                    percentile_high: p_high,
                },
                duplicate_policy: DuplicatePolicy::default(),
            },
            &duplicates,
            Path::new(&output_dir),
            &prefix,
            !no_plot,
            summary_json.as_deref(),
        ),
        Commands::Foldchange {
            input,
            output,
            format,
            pseudocount,
            min_expr,
            status_ok,
            gene_type,
            no_gene_type_filter,
        } => run_foldchange(
            &input,
            &format,
            &load_params(pseudocount, min_expr, status_ok, &gene_type, no_gene_type_filter),
            &output,
        ),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

// ---------------------------------------------------------------------------
// Custom help output
// ---------------------------------------------------------------------------

fn print_no_args() {
    println!("rust_lfc_corr v{}", VERSION);
    println!("Run `rust_lfc_corr -h` for usage or `rust_lfc_corr --help` for detailed information.");
}

fn print_short_help() {
    println!("rust_lfc_corr v{}", VERSION);
    println!();
    println!("Usage: rust_lfc_corr <COMMAND> [OPTIONS]");
    println!();
    println!("Commands:");
    println!("  run         Correlate log2FC between two expression tables");
    println!("  foldchange  Compute filtered log2FC for a single table");
    println!();
    println!("Run `rust_lfc_corr <COMMAND> -h` for command-specific options.");
}

fn print_long_help() {
    println!("rust_lfc_corr v{}", VERSION);
    println!("Correlation of per-gene log2 fold changes between two experiments");
    println!();
    println!("Usage: rust_lfc_corr <COMMAND> [OPTIONS]");
    println!();
    println!("Commands:");
    println!("  run         Correlate log2FC between two expression tables");
    println!("                - log2FC recomputed from value_1/value_2 with a pseudocount");
    println!("                - status, gene type and minimum expression filters");
    println!("                - inner join on gene_id (or gene)");
    println!("                - per-column percentile winsorization");
    println!("                - Pearson and Spearman correlation with p-values");
    println!("                - CSV table, SVG scatter plot, optional JSON summary");
    println!("  foldchange  Compute filtered log2FC for a single table");
    println!();
    println!("Global Options:");
    println!("  -v, --verbose    Enable verbose output");
    println!("  -h               Print short help");
    println!("      --help       Print detailed help");
    println!("  -V, --version    Print version");
    println!();
    println!("Examples:");
    println!("  rust_lfc_corr run -a five_pct/gene_exp.diff -b ten_pct/gene_exp.diff \\");
    println!("    --label-a 5% --label-b 10% -o correlation --prefix e_coli_5_vs_10");
    println!();
    println!("  rust_lfc_corr run -a neb.xlsx -b depleted.xlsx --status-ok --p-low 0.5 --p-high 99.5");
    println!();
    println!("  rust_lfc_corr foldchange -i gene_exp.diff -o gene_exp.log2fc.tsv");
}

// ---------------------------------------------------------------------------
// Argument helpers
// ---------------------------------------------------------------------------

fn resolve_source(path: &str, format: &str) -> Result<TableSource> {
    if format == "auto" {
        return TableSource::from_path(path);
    }
    let format = TableFormat::from_name(format).ok_or_else(|| CorrError::InvalidInput {
        reason: format!("Unknown table format '{}'. Use: auto, tsv or xlsx", format),
    })?;
    Ok(TableSource::new(path, format))
}

fn load_params(
    pseudocount: f64,
    min_expr: f64,
    status_ok: bool,
    gene_type: &str,
    no_gene_type_filter: bool,
) -> LoadParams {
    LoadParams {
        pseudocount,
        use_status_filter: status_ok,
        min_expression_sum: min_expr,
        gene_type_filter: if no_gene_type_filter {
            None
        } else {
            Some(gene_type.to_string())
        },
    }
}

fn parse_duplicate_policy(name: &str) -> Result<DuplicatePolicy> {
    match name {
        "first" => Ok(DuplicatePolicy::KeepFirst),
        "error" => Ok(DuplicatePolicy::Error),
        _ => Err(CorrError::InvalidInput {
            reason: format!("Unknown duplicate policy '{}'. Use 'first' or 'error'.", name),
        }),
    }
}

// ---------------------------------------------------------------------------
// Subcommand implementations
// ---------------------------------------------------------------------------

#[allow(clippy::too_many_arguments)]
fn run_analysis(
    table_a: &str,
    table_b: &str,
    format_a: &str,
    format_b: &str,
    label_a: Option<String>,
    label_b: Option<String>,
    mut config: AnalysisConfig,
    duplicates: &str,
    output_dir: &Path,
    prefix: &str,
    plot: bool,
    summary_json: Option<&str>,
) -> Result<()> {
    let source_a = resolve_source(table_a, format_a)?;
    let source_b = resolve_source(table_b, format_b)?;
    config.duplicate_policy = parse_duplicate_policy(duplicates)?;

    let label_a = label_a.unwrap_or_else(|| source_a.label());
    let label_b = label_b.unwrap_or_else(|| source_b.label());

    let analysis = run_correlation(&source_a, &source_b, &config)?;

    std::fs::create_dir_all(output_dir)?;
    let csv_path: PathBuf = output_dir.join(format!("{}.csv", prefix));
    let svg_path: PathBuf = output_dir.join(format!("{}.svg", prefix));

    let report = analysis.report(&label_a, &label_b);
    println!("\n{}", report);

    info!("Writing merged table to: {}", csv_path.display());
    write_merged_table(&csv_path, &analysis.records)?;
    println!("Saved CSV to: {}", csv_path.display());

    if plot {
        info!("Rendering scatter plot to: {}", svg_path.display());
        plot_scatter(
            &svg_path,
            &analysis.records,
            &analysis.correlation,
            &label_a,
            &label_b,
        )?;
        println!("Saved SVG to: {}", svg_path.display());
    }

    if let Some(path) = summary_json {
        info!("Writing JSON summary to: {}", path);
        write_summary_json(path, &report)?;
    }

    Ok(())
}

fn run_foldchange(input: &str, format: &str, params: &LoadParams, output_path: &str) -> Result<()> {
    let source = resolve_source(input, format)?;
    let table = load(&source, params)?;

    info!("Writing {} log2FC values to: {}", table.len(), output_path);
    write_fold_changes(output_path, &table.records)?;

    info!("Done!");
    Ok(())
}
