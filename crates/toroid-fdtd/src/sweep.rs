//! Rotation-rate sweep: trials, averaging and baseline-relative rows

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::config::SimulationConfig;
use crate::detector::ArrivalDetector;
use crate::error::{SimError, SimResult};
use crate::fdtd::Stepper;
use crate::field::FieldState;
use crate::modulator::Modulator;
use crate::source::PulseInjector;

/// One trial: fresh field, stepped until arrival or the step budget runs out
pub struct Trial<'a> {
    config: &'a SimulationConfig,
    modulator: Modulator,
    stepper: Stepper,
    injector: PulseInjector,
    detector: ArrivalDetector,
    field: FieldState,
    eps: Vec<f64>,
    steps_taken: usize,
}

impl<'a> Trial<'a> {
    pub fn new(config: &'a SimulationConfig, rotation_rate: f64) -> Self {
        let injector = PulseInjector::new(config);
        let mut field = FieldState::new(config.ring_size);
        injector.seed(&mut field);
        let detector = ArrivalDetector::new(config, &field);

        Self {
            config,
            modulator: Modulator::new(config, rotation_rate),
            stepper: Stepper::new(config),
            injector,
            detector,
            field,
            eps: vec![0.0; config.ring_size],
            steps_taken: 0,
        }
    }

    /// Whether the trial has stopped (arrived or out of budget)
    pub fn is_finished(&self) -> bool {
        self.detector.arrival_step().is_some() || self.steps_taken >= self.config.max_steps
    }

    /// Take one step; returns the arrival step once detected
    pub fn advance(&mut self) -> SimResult<Option<usize>> {
        let t = self.steps_taken;
        self.modulator.fill(t, &mut self.eps);

        // Leapfrog: H, source, E
        self.stepper.update_h(&mut self.field, &self.eps);
        self.injector.drive(t, &mut self.field);
        self.stepper.update_e(&mut self.field, &self.eps);
        self.steps_taken += 1;

        if !self.field.is_finite() {
            return Err(SimError::NonFinite {
                step: self.steps_taken,
                rotation_rate: self.modulator.rotation_rate(),
            });
        }

        Ok(self.detector.observe(self.steps_taken, &self.field))
    }

    /// Step until finished
    pub fn run(mut self) -> SimResult<TrialOutcome> {
        while !self.is_finished() {
            self.advance()?;
        }
        Ok(self.outcome())
    }

    pub fn outcome(&self) -> TrialOutcome {
        TrialOutcome {
            arrival_step: self.detector.arrival_step(),
            steps_taken: self.steps_taken,
            dt: self.config.dt,
        }
    }

    pub fn field(&self) -> &FieldState {
        &self.field
    }

    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    pub fn laps(&self) -> u32 {
        self.detector.laps()
    }

    pub fn time(&self) -> f64 {
        self.steps_taken as f64 * self.config.dt
    }
}

/// Result of a single trial
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialOutcome {
    /// Step at which the target lap count was reached, if it was
    pub arrival_step: Option<usize>,
    pub steps_taken: usize,
    dt: f64,
}

impl TrialOutcome {
    /// arrival_step * dt, or None if undetected
    pub fn arrival_time(&self) -> Option<f64> {
        self.arrival_step.map(|step| step as f64 * self.dt)
    }
}

/// Run one trial at `rotation_rate`
pub fn run_trial(config: &SimulationConfig, rotation_rate: f64) -> SimResult<TrialOutcome> {
    Trial::new(config, rotation_rate).run()
}

/// Averaged result for one rotation rate
#[derive(Debug, Clone, PartialEq)]
pub struct SweepEntry {
    pub rotation_rate: f64,
    /// Mean over detected trials; None if no trial detected an arrival
    pub mean_arrival_time: Option<f64>,
    pub detected_trials: usize,
    pub trials: usize,
}

/// Ordered sweep results, one entry per configured rotation rate
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SweepResult {
    pub entries: Vec<SweepEntry>,
}

/// Table row derived from a sweep entry, relative to the first entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepRow {
    pub rotation_rate: f64,
    pub mean_arrival_time: Option<f64>,
    /// value - baseline; None when this row is undetected
    pub delta: Option<f64>,
    /// 100 * (value - baseline) / baseline; None when this row is undetected
    pub percent_delta: Option<f64>,
}

impl SweepResult {
    /// Rows with delta and percentage against the first entry.
    /// A zero or undetected baseline yields 0.0 for both.
    pub fn rows(&self) -> Vec<SweepRow> {
        let baseline = self
            .entries
            .first()
            .and_then(|e| e.mean_arrival_time)
            .filter(|&b| b != 0.0);

        self.entries
            .iter()
            .map(|entry| {
                let (delta, percent_delta) = match (entry.mean_arrival_time, baseline) {
                    (Some(value), Some(base)) => {
                        (Some(value - base), Some(100.0 * (value - base) / base))
                    }
                    (Some(_), None) => (Some(0.0), Some(0.0)),
                    (None, _) => (None, None),
                };
                SweepRow {
                    rotation_rate: entry.rotation_rate,
                    mean_arrival_time: entry.mean_arrival_time,
                    delta,
                    percent_delta,
                }
            })
            .collect()
    }
}

/// Repeats detection across the configured rotation rates
pub struct SweepRunner<'a> {
    config: &'a SimulationConfig,
}

impl<'a> SweepRunner<'a> {
    pub fn new(config: &'a SimulationConfig) -> Self {
        Self { config }
    }

    /// Sequential sweep in input order
    pub fn run(&self) -> SimResult<SweepResult> {
        let entries = self
            .config
            .rotation_rates
            .iter()
            .map(|&omega| self.run_rate(omega))
            .collect::<SimResult<Vec<_>>>()?;
        Ok(SweepResult { entries })
    }

    /// Rotation rates in parallel; output order still follows input order
    pub fn run_parallel(&self) -> SimResult<SweepResult> {
        let entries = self
            .config
            .rotation_rates
            .par_iter()
            .map(|&omega| self.run_rate(omega))
            .collect::<SimResult<Vec<_>>>()?;
        Ok(SweepResult { entries })
    }

    /// All averaging trials for one rotation rate
    pub fn run_rate(&self, rotation_rate: f64) -> SimResult<SweepEntry> {
        let trials = self.config.averaging_runs;
        let mut detected = Vec::with_capacity(trials);

        for trial in 0..trials {
            let outcome = run_trial(self.config, rotation_rate)?;
            match (outcome.arrival_step, outcome.arrival_time()) {
                (Some(step), Some(time)) => {
                    debug!(
                        "Ω={:.4} trial {}: arrival at step {} (t={:.2})",
                        rotation_rate, trial, step, time
                    );
                    detected.push(time);
                }
                _ => warn!(
                    "Ω={:.4} trial {}: {} laps not completed within {} steps",
                    rotation_rate, trial, self.config.target_circulations, self.config.max_steps
                ),
            }
        }

        let mean_arrival_time = if detected.is_empty() {
            None
        } else {
            Some(detected.iter().sum::<f64>() / detected.len() as f64)
        };

        info!(
            "Ω={:.4}: mean arrival {} ({}/{} trials detected)",
            rotation_rate,
            mean_arrival_time.map_or("undetected".to_string(), |t| format!("{:.2}", t)),
            detected.len(),
            trials
        );

        Ok(SweepEntry {
            rotation_rate,
            mean_arrival_time,
            detected_trials: detected.len(),
            trials,
        })
    }
}
