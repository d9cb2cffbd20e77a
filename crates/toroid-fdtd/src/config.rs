//! Simulation parameters, loaded once from JSON and immutable afterwards

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{SimError, SimResult};

/// How the stepper scales its update coefficients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepperMode {
    /// dx treated as 1 and left out of the coefficients
    #[default]
    Normalized,
    /// Coefficients divided by the configured dx
    DxScaled,
}

/// Snapshot settings for the ring animation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Record one frame every `frame_stride` steps
    #[serde(default = "default_frame_stride")]
    pub frame_stride: usize,
    /// GIF frame delay in milliseconds
    #[serde(default = "default_frame_delay_ms")]
    pub frame_delay_ms: u32,
}

fn default_frame_stride() -> usize {
    2
}
fn default_frame_delay_ms() -> u32 {
    50
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            frame_stride: default_frame_stride(),
            frame_delay_ms: default_frame_delay_ms(),
        }
    }
}

/// Full parameter set for one sweep.
/// Maps 1:1 to the parameters JSON file; every field without a serde default
/// is required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of E cells around the ring (N)
    pub ring_size: usize,
    /// Time step
    pub dt: f64,
    /// Cell size; only consulted in `dx_scaled` mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dx: Option<f64>,
    /// Background permittivity (eps0)
    pub base_permittivity: f64,
    /// Relative amplitude of the rotating perturbation (A)
    pub perturbation_amplitude: f64,
    /// Injection and probe cell
    pub pulse_position: usize,
    /// Gaussian spread of the seeded pulse, in cells
    pub pulse_sigma: f64,
    /// Number of steps the time-windowed source stays on (0 = seed only)
    pub injection_duration: usize,
    /// E level that counts as a pulse passing the probe
    pub detection_threshold: f64,
    /// Laps to complete before the arrival is recorded
    pub target_circulations: u32,
    /// Step budget per trial
    pub max_steps: usize,
    /// Trials per rotation rate
    pub averaging_runs: usize,
    /// Sweep values of Ω, in output order
    pub rotation_rates: Vec<f64>,
    #[serde(default)]
    pub stepper_mode: StepperMode,
    /// Optional half-width (cells) of the seeding window around pulse_position
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pulse_window: Option<usize>,
    #[serde(default)]
    pub animation: AnimationConfig,
}

impl SimulationConfig {
    /// Read and validate a JSON parameters file
    pub fn load(path: &Path) -> SimResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Parse and validate JSON parameters
    pub fn from_json(json: &str) -> SimResult<Self> {
        let config: SimulationConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject parameter sets the stepper cannot run
    pub fn validate(&self) -> SimResult<()> {
        if self.ring_size < 2 {
            return Err(invalid(format!("ring_size must be >= 2, got {}", self.ring_size)));
        }
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(invalid(format!("dt must be finite and > 0, got {}", self.dt)));
        }
        if let Some(dx) = self.dx {
            if !(dx.is_finite() && dx > 0.0) {
                return Err(invalid(format!("dx must be finite and > 0, got {}", dx)));
            }
        } else if self.stepper_mode == StepperMode::DxScaled {
            return Err(invalid("dx is required when stepper_mode is dx_scaled".to_string()));
        }
        if !(self.base_permittivity.is_finite() && self.base_permittivity > 0.0) {
            return Err(invalid(format!(
                "base_permittivity must be finite and > 0, got {}",
                self.base_permittivity
            )));
        }
        if !self.perturbation_amplitude.is_finite() || self.perturbation_amplitude.abs() >= 1.0 {
            // eps would touch zero somewhere on the ring
            return Err(invalid(format!(
                "perturbation_amplitude must satisfy |A| < 1, got {}",
                self.perturbation_amplitude
            )));
        }
        if self.pulse_position >= self.ring_size {
            return Err(invalid(format!(
                "pulse_position {} outside ring of size {}",
                self.pulse_position, self.ring_size
            )));
        }
        if !(self.pulse_sigma.is_finite() && self.pulse_sigma > 0.0) {
            return Err(invalid(format!("pulse_sigma must be finite and > 0, got {}", self.pulse_sigma)));
        }
        if !self.detection_threshold.is_finite() {
            return Err(invalid("detection_threshold must be finite".to_string()));
        }
        if self.target_circulations == 0 {
            return Err(invalid("target_circulations must be >= 1".to_string()));
        }
        if self.max_steps == 0 {
            return Err(invalid("max_steps must be >= 1".to_string()));
        }
        if self.averaging_runs == 0 {
            return Err(invalid("averaging_runs must be >= 1".to_string()));
        }
        if self.rotation_rates.is_empty() {
            return Err(invalid("rotation_rates must not be empty".to_string()));
        }
        if let Some(omega) = self.rotation_rates.iter().find(|o| !o.is_finite()) {
            return Err(invalid(format!("rotation rate {} is not finite", omega)));
        }
        if self.animation.frame_stride == 0 {
            return Err(invalid("animation.frame_stride must be >= 1".to_string()));
        }
        if self.animation.frame_delay_ms == 0 {
            return Err(invalid("animation.frame_delay_ms must be >= 1".to_string()));
        }

        let courant = self.courant_number();
        if courant > 1.0 {
            tracing::warn!(
                "Courant number {:.3} exceeds 1; the leapfrog update will be unstable",
                courant
            );
        }

        Ok(())
    }

    /// Cell size the stepper divides by
    pub fn effective_dx(&self) -> f64 {
        match self.stepper_mode {
            StepperMode::Normalized => 1.0,
            StepperMode::DxScaled => self.dx.unwrap_or(1.0),
        }
    }

    /// Worst-case dt / (eps_min * dx) over the modulated ring
    pub fn courant_number(&self) -> f64 {
        let eps_min = self.base_permittivity * (1.0 - self.perturbation_amplitude.abs());
        self.dt / (eps_min * self.effective_dx())
    }
}

fn invalid(message: String) -> SimError {
    SimError::Config(message)
}
