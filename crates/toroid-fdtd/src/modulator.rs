//! Rotating permittivity perturbation
//!
//! eps[k](t) = eps0 * (1 + A * sin(2π (k + Ω t) / N))

use std::f64::consts::PI;

use crate::config::SimulationConfig;

/// Permittivity pattern rotating around the ring at `rotation_rate` cells per step
#[derive(Debug, Clone, Copy)]
pub struct Modulator {
    ring_size: usize,
    base_permittivity: f64,
    amplitude: f64,
    rotation_rate: f64,
}

impl Modulator {
    pub fn new(config: &SimulationConfig, rotation_rate: f64) -> Self {
        Self {
            ring_size: config.ring_size,
            base_permittivity: config.base_permittivity,
            amplitude: config.perturbation_amplitude,
            rotation_rate,
        }
    }

    pub fn rotation_rate(&self) -> f64 {
        self.rotation_rate
    }

    /// Permittivity of cell `k` at step `t`
    #[inline]
    pub fn at(&self, k: usize, t: usize) -> f64 {
        let n = self.ring_size as f64;
        let phase = 2.0 * PI * (k as f64 + self.rotation_rate * t as f64) / n;
        self.base_permittivity * (1.0 + self.amplitude * phase.sin())
    }

    /// Write the profile for step `t` into `eps` (length = ring size)
    pub fn fill(&self, t: usize, eps: &mut [f64]) {
        debug_assert_eq!(eps.len(), self.ring_size);
        for (k, slot) in eps.iter_mut().enumerate() {
            *slot = self.at(k, t);
        }
    }
}

/// Allocating form of [`Modulator::fill`]
pub fn permittivity_profile(
    ring_size: usize,
    base_permittivity: f64,
    amplitude: f64,
    rotation_rate: f64,
    t: usize,
) -> Vec<f64> {
    let modulator = Modulator {
        ring_size,
        base_permittivity,
        amplitude,
        rotation_rate,
    };
    let mut eps = vec![0.0; ring_size];
    modulator.fill(t, &mut eps);
    eps
}
