//! Scatter plot of merged log2 fold changes (SVG)

use std::error::Error;
use std::path::Path;

use plotters::prelude::*;

use crate::data::MergedRecord;
use crate::error::{CorrError, Result};
use crate::testing::CorrelationResult;

const GRID_COLOR: RGBColor = RGBColor(128, 128, 128);
const GRID_ALPHA: f64 = 0.4;

/// Axis range covering all values with a 5% margin
fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !lo.is_finite() || !hi.is_finite() {
        return (-1.0, 1.0);
    }
    let pad = if hi > lo { (hi - lo) * 0.05 } else { 0.5 };
    (lo - pad, hi + pad)
}

fn draw_scatter(
    path: &Path,
    records: &[MergedRecord],
    result: &CorrelationResult,
    label_a: &str,
    label_b: &str,
) -> std::result::Result<(), Box<dyn Error>> {
    let root = SVGBackend::new(path, (700, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let root = root.margin(10, 10, 10, 10);
    let (title_area, plot_area) = root.split_vertically(60);

    title_area.draw(&Text::new(
        "Correlation of log2FC",
        (10, 5),
        ("sans-serif", 22).into_font(),
    ))?;
    title_area.draw(&Text::new(
        format!(
            "Pearson r={:.2} | Spearman ρ={:.2}",
            result.pearson_r, result.spearman_rho
        ),
        (10, 32),
        ("sans-serif", 18).into_font(),
    ))?;

    let x_range = padded_range(records.iter().map(|r| r.log2fc_1));
    let y_range = padded_range(records.iter().map(|r| r.log2fc_2));

    let mut chart = ChartBuilder::on(&plot_area)
        .x_label_area_size(45)
        .y_label_area_size(55)
        .build_cartesian_2d(x_range.0..x_range.1, y_range.0..y_range.1)?;

    // Faint grid at major ticks only
    chart
        .configure_mesh()
        .bold_line_style(GRID_COLOR.mix(GRID_ALPHA))
        .light_line_style(TRANSPARENT)
        .x_desc(label_a)
        .y_desc(label_b)
        .draw()?;

    let point_style = RGBColor(31, 119, 180).mix(0.5).filled();
    chart.draw_series(
        records
            .iter()
            .map(|r| Circle::new((r.log2fc_1, r.log2fc_2), 3, point_style)),
    )?;

    root.present()?;
    Ok(())
}

/// Render log2fc_1 (x) against log2fc_2 (y) with both coefficients in the title
pub fn plot_scatter<P: AsRef<Path>>(
    path: P,
    records: &[MergedRecord],
    result: &CorrelationResult,
    label_a: &str,
    label_b: &str,
) -> Result<()> {
    draw_scatter(path.as_ref(), records, result, label_a, label_b).map_err(|e| CorrError::Plot {
        reason: e.to_string(),
    })
}
