//! Arrival time vs. rotation rate figure, rendered from the on-disk table

use anyhow::{bail, Result};
use plotters::prelude::*;
use std::path::Path;
use tracing::info;

use crate::table::read_table;

const NAVY: RGBColor = RGBColor(0, 0, 128);

/// (rotation rate, mean arrival time) points the figure is drawn from.
/// Undetected rows are skipped.
pub fn load_series(table_path: &Path) -> Result<Vec<(f64, f64)>> {
    let rows = read_table(table_path)?;
    Ok(rows
        .iter()
        .filter_map(|row| row.mean_arrival_time.map(|t| (row.rotation_rate, t)))
        .collect())
}

/// Padded axis range that stays non-degenerate for a single point
fn axis_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    let span = max - min;
    let pad = if span.abs() < 1e-9 {
        min.abs().max(1.0) * 0.05
    } else {
        span * 0.1
    };
    (min - pad, max + pad)
}

/// Read `table_path` and draw the arrival-time plot to `png_path`
pub fn render_arrival_plot(table_path: &Path, png_path: &Path) -> Result<()> {
    let series = load_series(table_path)?;
    if series.is_empty() {
        bail!("No detected arrivals in {:?}; nothing to plot", table_path);
    }

    let (x_min, x_max) = axis_range(series.iter().map(|p| p.0));
    let (y_min, y_max) = axis_range(series.iter().map(|p| p.1));

    let root = BitMapBackend::new(png_path, (1600, 1000)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Arrival Time vs. Ω", ("sans-serif", 36))
        .margin(30)
        .x_label_area_size(60)
        .y_label_area_size(90)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Ω (1/step)")
        .y_desc("Arrival Time (dt units)")
        .axis_desc_style(("sans-serif", 24))
        .bold_line_style(BLACK.mix(0.3))
        .light_line_style(BLACK.mix(0.08))
        .draw()?;

    chart.draw_series(LineSeries::new(series.iter().copied(), NAVY.stroke_width(4)))?;
    chart.draw_series(
        series
            .iter()
            .map(|&point| Circle::new(point, 8, NAVY.filled())),
    )?;

    root.present()?;
    info!("Rendered arrival plot: {} points to {:?}", series.len(), png_path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::write_table;
    use pretty_assertions::assert_eq;
    use toroid_fdtd::{SweepEntry, SweepResult};

    #[test]
    fn test_series_reads_back_written_values() {
        let result = SweepResult {
            entries: [(0.0, Some(394.0)), (0.005, None), (0.01, Some(393.5))]
                .into_iter()
                .map(|(rotation_rate, mean_arrival_time)| SweepEntry {
                    rotation_rate,
                    mean_arrival_time,
                    detected_trials: usize::from(mean_arrival_time.is_some()),
                    trials: 1,
                })
                .collect(),
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timing_data.csv");
        write_table(&result, &path).unwrap();

        assert_eq!(load_series(&path).unwrap(), vec![(0.0, 394.0), (0.01, 393.5)]);
    }

    #[test]
    fn test_axis_range_pads_single_point() {
        let (lo, hi) = axis_range([400.0].into_iter());
        assert!(lo < 400.0 && hi > 400.0);

        let (lo, hi) = axis_range([0.0, 0.01].into_iter());
        assert!((lo + 0.001).abs() < 1e-12);
        assert!((hi - 0.011).abs() < 1e-12);
    }

    #[test]
    fn test_empty_series_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("timing_data.csv");
        std::fs::write(&path, format!("{}\n0.000,undetected,undetected,undetected\n", crate::table::HEADER))
            .unwrap();
        let err = render_arrival_plot(&path, &dir.path().join("figure1.png")).unwrap_err();
        assert!(err.to_string().contains("nothing to plot"));
    }
}
