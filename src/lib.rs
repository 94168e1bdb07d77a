//! rust_lfc_corr: agreement of log2 fold changes between two experiments
//!
//! Loads two differential expression tables (e.g. Cuffdiff `gene_exp.diff`),
//! recomputes a pseudocount-stabilized log2 fold change per gene in each,
//! joins them on gene identifier, winsorizes both columns and reports
//! Pearson and Spearman correlation.
//!
//! # Example
//!
//! ```ignore
//! use rust_lfc_corr::prelude::*;
//!
//! let a = TableSource::from_path("five_pct/gene_exp.annotated.xlsx")?;
//! let b = TableSource::from_path("ten_pct/gene_exp.diff")?;
//!
//! let analysis = run_correlation(&a, &b, &AnalysisConfig::default())?;
//! println!("Pearson r = {:.3}", analysis.correlation.pearson_r);
//! ```

pub mod cli;
pub mod data;
pub mod error;
pub mod filter;
pub mod io;
pub mod plot;
pub mod stats;
pub mod testing;
pub mod transform;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::data::{merge, DuplicatePolicy, FoldChangeRecord, MergeStats, MergedRecord};
    pub use crate::error::{CorrError, Result};
    pub use crate::filter::{winsorize, LoadStats, WinsorBounds, WinsorParams};
    pub use crate::io::{
        load, read_merged_table, write_merged_table, write_summary_json, CorrelationReport,
        LoadParams, TableFormat, TableSource,
    };
    pub use crate::plot::plot_scatter;
    pub use crate::testing::{correlate, CorrelationResult};
    pub use crate::{run_correlation, AnalysisConfig, CorrelationAnalysis};
}

use log::info;

use prelude::*;

/// Configuration for one correlation run
#[derive(Debug, Clone, Default)]
pub struct AnalysisConfig {
    pub load: LoadParams,
    pub winsor: WinsorParams,
    pub duplicate_policy: DuplicatePolicy,
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<()> {
        self.load.validate()?;
        self.winsor.validate()
    }
}

/// Output of the analytical pipeline, before any reporting
#[derive(Debug, Clone)]
pub struct CorrelationAnalysis {
    /// Merged, winsorized records
    pub records: Vec<MergedRecord>,
    pub correlation: CorrelationResult,
    pub bounds: WinsorBounds,
    pub load_a: LoadStats,
    pub load_b: LoadStats,
    pub merge: MergeStats,
}

impl CorrelationAnalysis {
    pub fn report(&self, label_a: &str, label_b: &str) -> CorrelationReport {
        CorrelationReport {
            label_a: label_a.to_string(),
            label_b: label_b.to_string(),
            correlation: self.correlation,
            bounds: self.bounds,
            load_a: self.load_a.clone(),
            load_b: self.load_b.clone(),
            merge: self.merge.clone(),
        }
    }
}

/// Correlate two already-loaded log2FC series: merge, winsorize, correlate
pub fn correlate_series(
    series_a: &[FoldChangeRecord],
    series_b: &[FoldChangeRecord],
    config: &AnalysisConfig,
) -> Result<(Vec<MergedRecord>, MergeStats, WinsorBounds, CorrelationResult)> {
    let merged = merge(series_a, series_b, config.duplicate_policy)?;
    info!("  {} genes shared between tables", merged.stats.shared);

    let mut records = merged.records;
    if records.len() < 2 {
        return Err(CorrError::InsufficientData {
            n: records.len(),
            required: 2,
        });
    }

    info!(
        "Winsorizing log2FC to percentiles [{}, {}]...",
        config.winsor.percentile_low, config.winsor.percentile_high
    );
    let bounds = winsorize(&mut records, &config.winsor)?;

    info!("Computing Pearson and Spearman correlation...");
    let correlation = correlate(&records)?;

    Ok((records, merged.stats, bounds, correlation))
}

/// Run the complete pipeline on two table sources
pub fn run_correlation(
    source_a: &TableSource,
    source_b: &TableSource,
    config: &AnalysisConfig,
) -> Result<CorrelationAnalysis> {
    config.validate()?;

    // The two tables are independent until the merge
    let (table_a, table_b) = rayon::join(
        || load(source_a, &config.load),
        || load(source_b, &config.load),
    );
    let (table_a, table_b) = (table_a?, table_b?);

    let (records, merge, bounds, correlation) =
        correlate_series(&table_a.records, &table_b.records, config)?;

    Ok(CorrelationAnalysis {
        records,
        correlation,
        bounds,
        load_a: table_a.stats,
        load_b: table_b.stats,
        merge,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::io::Write;
    use std::path::Path;
    use tempfile::tempdir;

    fn write_table(path: &Path, rows: &[(&str, f64, f64)]) {
        let mut file = std::fs::File::create(path).unwrap();
        writeln!(file, "test_id\tgene_id\tgene\tstatus\tvalue_1\tvalue_2").unwrap();
        for (gene, v1, v2) in rows {
            writeln!(file, "{0}\t{0}\t{0}\tOK\t{1}\t{2}", gene, v1, v2).unwrap();
        }
    }

    fn many_genes(n: usize) -> Vec<(String, f64, f64)> {
        (0..n)
            .map(|i| {
                let v1 = 5.0 + (i % 17) as f64 * 3.0;
                let v2 = 2.0 + ((i * 7) % 23) as f64 * 4.0;
                (format!("gene{}", i), v1, v2)
            })
            .collect()
    }

    #[test]
    fn test_single_shared_gene_is_insufficient() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.tsv");
        let b = dir.path().join("b.tsv");
        write_table(&a, &[("A", 10.0, 20.0)]);
        write_table(&b, &[("A", 10.0, 20.0)]);

        let config = AnalysisConfig::default();
        let table_a = load(&TableSource::from_path(&a).unwrap(), &config.load).unwrap();
        let expected = (20.001f64 / 10.001).log2();
        assert!((table_a.records[0].log2fc - expected).abs() < 1e-12);

        let result = run_correlation(
            &TableSource::from_path(&a).unwrap(),
            &TableSource::from_path(&b).unwrap(),
            &config,
        );
        assert!(matches!(
            result,
            Err(CorrError::InsufficientData { n: 1, required: 2 })
        ));
    }

    #[test]
    fn test_identical_tables_correlate_perfectly() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("same.tsv");
        let genes = many_genes(100);
        let rows: Vec<(&str, f64, f64)> = genes.iter().map(|(g, a, b)| (g.as_str(), *a, *b)).collect();
        write_table(&path, &rows);

        let source = TableSource::from_path(&path).unwrap();
        let analysis = run_correlation(&source, &source, &AnalysisConfig::default()).unwrap();

        assert_eq!(analysis.records.len(), 100);
        for rec in &analysis.records {
            assert_eq!(rec.log2fc_1, rec.log2fc_2);
        }
        assert!((analysis.correlation.pearson_r - 1.0).abs() < 1e-9);
        assert!((analysis.correlation.spearman_rho - 1.0).abs() < 1e-9);
        assert!(analysis.correlation.pearson_p < 1e-10);
        assert!(analysis.correlation.spearman_p < 1e-10);
    }

    #[test]
    fn test_merged_genes_are_filtered_intersection() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.tsv");
        let b = dir.path().join("b.tsv");

        let mut rows_a: Vec<(&str, f64, f64)> = vec![
            ("g1", 10.0, 20.0),
            ("g2", 5.0, 1.0),
            ("g3", 8.0, 8.5),
            ("g4", 3.0, 30.0),
            ("only_a", 1000.0, 1.0),
            ("silent", 0.0, 0.0),
        ];
        let rows_b: Vec<(&str, f64, f64)> = vec![
            ("g4", 2.0, 25.0),
            ("g1", 12.0, 18.0),
            ("g2", 6.0, 2.0),
            ("g3", 9.0, 7.0),
            ("silent", 4.0, 4.0),
            ("only_b", 1.0, 1000.0),
        ];
        rows_a.push(("g5", 2.0, 2.5));
        write_table(&a, &rows_a);
        write_table(&b, &rows_b);

        let analysis = run_correlation(
            &TableSource::from_path(&a).unwrap(),
            &TableSource::from_path(&b).unwrap(),
            &AnalysisConfig::default(),
        )
        .unwrap();

        let genes: HashSet<&str> = analysis.records.iter().map(|r| r.gene.as_str()).collect();
        let expected: HashSet<&str> = ["g1", "g2", "g3", "g4"].into_iter().collect();
        assert_eq!(genes, expected);
        assert_eq!(analysis.load_a.low_expression, 1);
        assert_eq!(analysis.merge.shared, 4);
        assert!((-1.0..=1.0).contains(&analysis.correlation.pearson_r));
    }

    #[test]
    fn test_invalid_config_rejected_before_loading() {
        let source = TableSource::new("/nonexistent/a.tsv", TableFormat::Delimited);
        let config = AnalysisConfig {
            winsor: WinsorParams {
                percentile_low: 50.0,
                percentile_high: 10.0,
            },
            ..Default::default()
        };
        assert!(matches!(
            run_correlation(&source, &source, &config),
            Err(CorrError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_report_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("t.tsv");
        let genes = many_genes(30);
        let rows: Vec<(&str, f64, f64)> = genes.iter().map(|(g, a, b)| (g.as_str(), *a, *b)).collect();
        write_table(&path, &rows);
        let source = TableSource::from_path(&path).unwrap();

        let analysis = run_correlation(&source, &source, &AnalysisConfig::default()).unwrap();
        let out = dir.path().join("merged.csv");
        write_merged_table(&out, &analysis.records).unwrap();
        let back = read_merged_table(&out).unwrap();
        assert_eq!(back, analysis.records);

        let report = analysis.report("5%", "10%");
        assert_eq!(report.correlation.n, 30);
    }

    #[test]
    fn test_huge_expression_value_does_not_break_correlation() {
        use crate::io::{load_from_raw, RawTable};

        let table = |rows: &[[&str; 3]]| {
            RawTable::new(
                vec!["gene_id".to_string(), "value_1".to_string(), "value_2".to_string()],
                rows.iter()
                    .map(|r| r.iter().map(|c| c.to_string()).collect())
                    .collect(),
            )
        };
        let config = AnalysisConfig::default();
        let a = load_from_raw(
            &table(&[["g1", "0", "1e306"], ["g2", "10", "20"], ["g3", "8", "2"]]),
            &config.load,
        )
        .unwrap();
        let b = load_from_raw(
            &table(&[["g1", "1", "1e300"], ["g2", "5", "30"], ["g3", "9", "1"]]),
            &config.load,
        )
        .unwrap();
        assert!(a.records.iter().all(|r| r.log2fc.is_finite()));

        let (records, _, _, correlation) = correlate_series(&a.records, &b.records, &config).unwrap();
        assert_eq!(records.len(), 3);
        assert!(correlation.pearson_r.is_finite());
        assert!(correlation.pearson_r > 0.0);
        assert!((correlation.spearman_rho - 1.0).abs() < 1e-12);
    }
}
