//! toroid-fdtd: 1-D FDTD wave propagation on a ring with a rotating
//! permittivity perturbation
//!
//! This crate provides:
//! - A periodic Yee stepper (E on cells, H on half cells)
//! - Gaussian pulse seeding and a finite-duration drive source
//! - Lap counting at the injection cell
//! - Rotation-rate sweeps with trial averaging
//! - Field snapshots for rendering
//!
//! All quantities are normalized: no physical units are attached to dt, dx
//! or the permittivity.

pub mod config;
pub mod detector;
pub mod error;
pub mod fdtd;
pub mod field;
pub mod history;
pub mod modulator;
pub mod source;
pub mod sweep;

pub use config::{AnimationConfig, SimulationConfig, StepperMode};
pub use detector::ArrivalDetector;
pub use error::{SimError, SimResult};
pub use fdtd::Stepper;
pub use field::FieldState;
pub use history::{record_history, Frame, FrameHistory};
pub use modulator::{permittivity_profile, Modulator};
pub use source::PulseInjector;
pub use sweep::{run_trial, SweepEntry, SweepResult, SweepRow, SweepRunner, Trial, TrialOutcome};

/// Main entry point: run the configured sweep, sequentially or across threads
pub fn simulate(config: &SimulationConfig, parallel: bool) -> SimResult<SweepResult> {
    let runner = SweepRunner::new(config);
    if parallel {
        runner.run_parallel()
    } else {
        runner.run()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// 400-cell ring from the reference sweep, with a budget long enough for one lap
    pub fn reference_config() -> SimulationConfig {
        SimulationConfig {
            ring_size: 400,
            dt: 0.5,
            dx: None,
            base_permittivity: 1.0,
            perturbation_amplitude: 0.1,
            pulse_position: 100,
            pulse_sigma: 3.0,
            injection_duration: 0,
            detection_threshold: 0.2,
            target_circulations: 1,
            max_steps: 2000,
            averaging_runs: 1,
            rotation_rates: vec![0.0, 0.005],
            stepper_mode: StepperMode::Normalized,
            pulse_window: None,
            animation: AnimationConfig::default(),
        }
    }
}
