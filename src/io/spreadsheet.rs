//! Spreadsheet (xlsx/xls/ods) table reading

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use super::format::{RawTable, TableReader};
use crate::error::{CorrError, Result};

/// Reads the first worksheet of a workbook; the first row is the header
#[derive(Debug, Clone, Copy, Default)]
pub struct SpreadsheetReader;

/// String form of a cell, matching what a delimited export would contain
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

impl TableReader for SpreadsheetReader {
    fn read_table(&self, path: &Path) -> Result<RawTable> {
        let mut workbook = open_workbook_auto(path)?;

        let first_sheet = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| CorrError::EmptyData {
                reason: format!("no worksheets in {}", path.display()),
            })?;

        let range = workbook.worksheet_range(&first_sheet)?;
        let mut rows = range.rows();

        let headers: Vec<String> = rows
            .next()
            .ok_or_else(|| CorrError::EmptyData {
                reason: format!("worksheet '{}' in {} is empty", first_sheet, path.display()),
            })?
            .iter()
            .map(cell_to_string)
            .collect();

        let rows: Vec<Vec<String>> = rows
            .map(|row| row.iter().map(cell_to_string).collect())
            .collect();

        log::debug!(
            "Read {} rows x {} columns from sheet '{}' of {}",
            rows.len(),
            headers.len(),
            first_sheet,
            path.display()
        );

        Ok(RawTable::new(headers, rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{load, LoadParams, TableFormat, TableSource};
    use rust_xlsxwriter::Workbook;
    use std::io::Write;
    use tempfile::{tempdir, Builder};

    #[test]
    fn test_cell_to_string() {
        assert_eq!(cell_to_string(&Data::Empty), "");
        assert_eq!(cell_to_string(&Data::String(" thrL ".to_string())), "thrL");
        assert_eq!(cell_to_string(&Data::Int(7)), "7");

        let parsed: f64 = cell_to_string(&Data::Float(20.5)).parse().unwrap();
        assert_eq!(parsed, 20.5);
    }

    /// Annotated differential expression sheet plus a trailing notes sheet
    fn write_annotated_workbook(path: &Path) {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (col, name) in ["gene_id", "value_1", "value_2", "status", "gene_type"]
            .iter()
            .enumerate()
        {
            sheet.write_string(0, col as u16, *name).unwrap();
        }

        // (gene id, value_1, value_2, status, gene_type); numeric ids are written as numbers
        let rows: [(&str, Option<f64>, f64, &str, &str); 6] = [
            ("b0001", Some(10.0), 20.0, "OK", "protein_coding"),
            ("42", Some(1.5), 9.75, "OK", "protein_coding"),
            ("b0003", Some(3.0), 4.0, "NOTEST", "protein_coding"),
            ("rrsA", Some(100.0), 50.0, "OK", "rRNA"),
            ("b0005", Some(0.0), 0.0, "OK", "protein_coding"),
            ("b0006", None, 5.0, "OK", "protein_coding"),
        ];
        for (i, (gene, v1, v2, status, gene_type)) in rows.iter().enumerate() {
            let row = i as u32 + 1;
            match gene.parse::<f64>() {
                Ok(id) => sheet.write_number(row, 0, id).unwrap(),
                Err(_) => sheet.write_string(row, 0, *gene).unwrap(),
            };
            if let Some(v1) = v1 {
                sheet.write_number(row, 1, *v1).unwrap();
            }
            sheet.write_number(row, 2, *v2).unwrap();
            sheet.write_string(row, 3, *status).unwrap();
            sheet.write_string(row, 4, *gene_type).unwrap();
        }

        let notes = workbook.add_worksheet();
        notes.write_string(0, 0, "comment").unwrap();
        notes.write_string(1, 0, "not an expression table").unwrap();

        workbook.save(path).unwrap();
    }

    #[test]
    fn test_read_first_worksheet() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gene_exp.annotated.xlsx");
        write_annotated_workbook(&path);

        let table = SpreadsheetReader.read_table(&path).unwrap();
        assert_eq!(
            table.headers,
            vec!["gene_id", "value_1", "value_2", "status", "gene_type"]
        );
        assert_eq!(table.n_rows(), 6);
        assert_eq!(RawTable::cell(&table.rows[0], 0), "b0001");
        assert_eq!(RawTable::cell(&table.rows[1], 0), "42");
        assert_eq!(RawTable::cell(&table.rows[1], 2), "9.75");
        assert_eq!(RawTable::cell(&table.rows[5], 1), "");
    }

    #[test]
    fn test_load_annotated_workbook() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gene_exp.annotated.xlsx");
        write_annotated_workbook(&path);

        let source = TableSource::from_path(&path).unwrap();
        assert_eq!(source.format, TableFormat::Spreadsheet);

        let params = LoadParams {
            use_status_filter: true,
            ..Default::default()
        };
        let table = load(&source, &params).unwrap();

        let genes: Vec<&str> = table.records.iter().map(|r| r.gene.as_str()).collect();
        assert_eq!(genes, vec!["b0001", "42"]);
        let expected_b0001 = (20.001f64).log2() - (10.001f64).log2();
        let expected_42 = (9.751f64).log2() - (1.501f64).log2();
        assert!((table.records[0].log2fc - expected_b0001).abs() < 1e-12);
        assert!((table.records[1].log2fc - expected_42).abs() < 1e-12);

        let stats = &table.stats;
        assert_eq!(stats.total_rows, 6);
        assert_eq!(stats.status, 1);
        assert_eq!(stats.gene_type, 1);
        assert_eq!(stats.low_expression, 1);
        assert_eq!(stats.unparseable_value, 1);
        assert_eq!(stats.missing_gene_id, 0);
        assert_eq!(stats.retained, 2);
    }

    #[test]
    fn test_invalid_workbook() {
        let mut file = Builder::new().suffix(".xlsx").tempfile().unwrap();
        writeln!(file, "this is not a zip archive").unwrap();

        assert!(SpreadsheetReader.read_table(file.path()).is_err());
    }
}
