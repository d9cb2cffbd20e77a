//! Sweep table export - comma-separated text, one row per rotation rate
//!
//! Columns: rotation_rate (3 dp), mean_arrival_time (2 dp or `undetected`),
//! delta and percent_delta against the first row (2 dp).

use anyhow::{bail, Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use toroid_fdtd::{SweepResult, SweepRow};
use tracing::info;

pub const HEADER: &str = "rotation_rate,mean_arrival_time,delta,percent_delta";
pub const UNDETECTED: &str = "undetected";

/// A row as read back from disk
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableRow {
    pub rotation_rate: f64,
    pub mean_arrival_time: Option<f64>,
    pub delta: Option<f64>,
    pub percent_delta: Option<f64>,
}

/// Write the sweep table, replacing any existing file
pub fn write_table(result: &SweepResult, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create table: {:?}", path))?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "{}", HEADER)?;
    let rows = result.rows();
    for row in &rows {
        writeln!(writer, "{}", format_row(row))?;
    }

    writer.flush()?;
    info!("Wrote sweep table: {} rows to {:?}", rows.len(), path);
    Ok(())
}

/// Render one row in table format
pub fn format_row(row: &SweepRow) -> String {
    format!(
        "{:.3},{},{},{}",
        row.rotation_rate,
        format_value(row.mean_arrival_time),
        format_value(row.delta),
        format_value(row.percent_delta)
    )
}

fn format_value(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => UNDETECTED.to_string(),
    }
}

/// Read a sweep table written by [`write_table`]
pub fn read_table(path: &Path) -> Result<Vec<TableRow>> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read table: {:?}", path))?;
    parse_table(&text).with_context(|| format!("Malformed table: {:?}", path))
}

pub fn parse_table(text: &str) -> Result<Vec<TableRow>> {
    let mut lines = text.lines();
    match lines.next() {
        Some(header) if header.trim() == HEADER => {}
        Some(header) => bail!("Unexpected header: {}", header),
        None => bail!("Empty table"),
    }

    let mut rows = Vec::new();
    for (i, line) in lines.enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != 4 {
            bail!("Row {}: expected 4 columns, found {}", i + 1, fields.len());
        }
        rows.push(TableRow {
            rotation_rate: fields[0]
                .parse()
                .with_context(|| format!("Row {}: bad rotation rate {:?}", i + 1, fields[0]))?,
            mean_arrival_time: parse_value(fields[1], i + 1)?,
            delta: parse_value(fields[2], i + 1)?,
            percent_delta: parse_value(fields[3], i + 1)?,
        });
    }

    Ok(rows)
}

fn parse_value(field: &str, row: usize) -> Result<Option<f64>> {
    if field == UNDETECTED {
        return Ok(None);
    }
    let value = field
        .parse()
        .with_context(|| format!("Row {}: bad value {:?}", row, field))?;
    Ok(Some(value))
}
