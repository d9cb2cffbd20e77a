//! Field snapshots for the ring animation

use crate::config::SimulationConfig;
use crate::error::SimResult;
use crate::sweep::Trial;

/// One recorded snapshot of E
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub step: usize,
    pub time: f64,
    pub laps_completed: u32,
    pub e: Vec<f64>,
}

/// Snapshots of one trial at a fixed stride
#[derive(Debug, Clone, PartialEq)]
pub struct FrameHistory {
    pub rotation_rate: f64,
    pub dt: f64,
    pub ring_size: usize,
    pub stride: usize,
    pub frames: Vec<Frame>,
}

/// Run one trial at `rotation_rate` and record E every `frame_stride` steps,
/// starting with the seeded field
pub fn record_history(config: &SimulationConfig, rotation_rate: f64) -> SimResult<FrameHistory> {
    let stride = config.animation.frame_stride;
    let mut trial = Trial::new(config, rotation_rate);
    let mut frames = vec![snapshot(&trial)];

    while !trial.is_finished() {
        trial.advance()?;
        if trial.steps_taken() % stride == 0 {
            frames.push(snapshot(&trial));
        }
    }

    tracing::info!(
        "Recorded {} frames at Ω={:.4} ({} steps, {} laps)",
        frames.len(),
        rotation_rate,
        trial.steps_taken(),
        trial.laps()
    );

    Ok(FrameHistory {
        rotation_rate,
        dt: config.dt,
        ring_size: config.ring_size,
        stride,
        frames,
    })
}

fn snapshot(trial: &Trial<'_>) -> Frame {
    Frame {
        step: trial.steps_taken(),
        time: trial.time(),
        laps_completed: trial.laps(),
        e: trial.field().e.clone(),
    }
}
