//! Ring animation: E drawn as a radial deformation of the unit circle
//!
//! Cell k sits at angle θ = 2πk/N with radius 1 + 0.5·E[k].

use anyhow::{bail, Result};
use plotters::prelude::*;
use std::f64::consts::PI;
use std::path::Path;
use toroid_fdtd::{Frame, FrameHistory};
use tracing::info;

const SIZE: u32 = 600;
const EXTENT: f64 = 1.6;
const DEFORMATION: f64 = 0.5;

/// Closed polyline (x, y) for one frame
pub fn ring_outline(e: &[f64]) -> Vec<(f64, f64)> {
    let n = e.len();
    let mut points: Vec<(f64, f64)> = e
        .iter()
        .enumerate()
        .map(|(k, &value)| {
            let theta = 2.0 * PI * k as f64 / n as f64;
            let r = 1.0 + DEFORMATION * value;
            (r * theta.cos(), r * theta.sin())
        })
        .collect();
    if let Some(&first) = points.first() {
        points.push(first);
    }
    points
}

fn circle(radius: f64, segments: usize) -> Vec<(f64, f64)> {
    (0..=segments)
        .map(|i| {
            let theta = 2.0 * PI * i as f64 / segments as f64;
            (radius * theta.cos(), radius * theta.sin())
        })
        .collect()
}

pub fn frame_caption(frame: &Frame) -> String {
    format!("Time: {:.1} dt | Lap: {}", frame.time, frame.laps_completed)
}

/// Render every frame of `history` into a looping GIF
pub fn render_animation(history: &FrameHistory, gif_path: &Path, frame_delay_ms: u32) -> Result<()> {
    if history.frames.is_empty() {
        bail!("Frame history is empty; nothing to animate");
    }

    let root = BitMapBackend::gif(gif_path, (SIZE, SIZE), frame_delay_ms)?.into_drawing_area();
    let guides = [0.5, 1.0, 1.5].map(|r| circle(r, 180));

    for frame in &history.frames {
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(frame_caption(frame), ("sans-serif", 22))
            .margin(20)
            .build_cartesian_2d(-EXTENT..EXTENT, -EXTENT..EXTENT)?;

        for guide in &guides {
            chart.draw_series(LineSeries::new(guide.iter().copied(), BLACK.mix(0.15)))?;
        }
        chart.draw_series(LineSeries::new(ring_outline(&frame.e), RED.stroke_width(3)))?;

        root.present()?;
    }

    info!(
        "Rendered animation: {} frames at Ω={:.4} to {:?}",
        history.frames.len(),
        history.rotation_rate,
        gif_path
    );
    Ok(())
}
