//! Gaussian pulse seeding and the finite-duration drive source

use crate::config::SimulationConfig;
use crate::field::FieldState;

/// Seeds the ring and, for the first `duration` steps, drives E at the
/// injection cell with a time-windowed Gaussian
#[derive(Debug, Clone, Copy)]
pub struct PulseInjector {
    position: usize,
    sigma: f64,
    window: Option<usize>,
    duration: usize,
}

impl PulseInjector {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            position: config.pulse_position,
            sigma: config.pulse_sigma,
            window: config.pulse_window,
            duration: config.injection_duration,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Initial profile: E = exp(-d² / 2σ²) around the injection cell, H = 0
    pub fn seed(&self, field: &mut FieldState) {
        let two_sigma_sq = 2.0 * self.sigma * self.sigma;
        for k in 0..field.len() {
            let d = field.ring_distance(k, self.position);
            let inside = self.window.map_or(true, |w| d <= w);
            field.e[k] = if inside {
                let d = d as f64;
                (-d * d / two_sigma_sq).exp()
            } else {
                0.0
            };
        }
        field.h.iter_mut().for_each(|h| *h = 0.0);
    }

    /// Source value for step `t`, zero once the injection window has closed
    pub fn drive_value(&self, t: usize) -> f64 {
        if t >= self.duration {
            return 0.0;
        }
        let duration = self.duration as f64;
        let t0 = duration / 2.0;
        let tau = duration / 4.0;
        (-((t as f64 - t0) / tau).powi(2)).exp()
    }

    /// Add the source term for step `t` to E at the injection cell
    pub fn drive(&self, t: usize, field: &mut FieldState) {
        let value = self.drive_value(t);
        if value != 0.0 {
            field.e[self.position] += value;
        }
    }
}
