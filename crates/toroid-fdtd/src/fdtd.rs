//! 1-D FDTD (Finite-Difference Time-Domain) stepper on a periodic ring
//!
//! Implements the Yee algorithm reduced to one dimension:
//! - E on integer cells, H on half cells
//! - Leapfrog time-stepping, H before E
//! - Periodic boundaries (cell N-1 couples to cell 0)
//! - Per-cell permittivity supplied each step by the modulator
//!
//! References:
//! - Yee, "Numerical solution of initial boundary value problems" (1966)
//! - Taflove & Hagness, "Computational Electrodynamics" (2005)

use crate::config::{SimulationConfig, StepperMode};
use crate::field::FieldState;

/// Advances (E, H) by one time step
#[derive(Debug, Clone, Copy)]
pub struct Stepper {
    dt: f64,
    /// 1.0 in normalized mode
    dx: f64,
}

impl Stepper {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            dt: config.dt,
            dx: config.effective_dx(),
        }
    }

    /// Stepper with explicit constants
    pub fn with_mode(dt: f64, dx: f64, mode: StepperMode) -> Self {
        let dx = match mode {
            StepperMode::Normalized => 1.0,
            StepperMode::DxScaled => dx,
        };
        Self { dt, dx }
    }

    /// Update H (half step) from the current E
    ///
    /// dH/dt = -(1/eps) dE/dx, with h[i] between e[i-1] and e[i]
    pub fn update_h(&self, field: &mut FieldState, eps: &[f64]) {
        let n = field.len();
        debug_assert_eq!(eps.len(), n);

        for i in 1..n {
            let cb = self.dt / (eps[i - 1] * self.dx);
            field.h[i] += cb * (field.e[i - 1] - field.e[i]);
        }

        // Wrap cell: between e[N-1] and e[0]
        let cb = self.dt / (eps[n - 1] * self.dx);
        field.h[0] += cb * (field.e[n - 1] - field.e[0]);
    }

    /// Update E (half step) from the freshly updated H
    ///
    /// dE/dt = -(1/eps) dH/dx, with e[i] between h[i] and h[i+1]
    pub fn update_e(&self, field: &mut FieldState, eps: &[f64]) {
        let n = field.len();
        debug_assert_eq!(eps.len(), n);

        for i in 0..n - 1 {
            let ca = self.dt / (eps[i] * self.dx);
            field.e[i] += ca * (field.h[i] - field.h[i + 1]);
        }

        // Wrap cell: h[N-1] side couples to h[0]
        let ca = self.dt / (eps[n - 1] * self.dx);
        field.e[n - 1] += ca * (field.h[n - 1] - field.h[0]);
    }

    /// Advance by one full step with no source
    pub fn step(&self, field: &mut FieldState, eps: &[f64]) {
        // Leapfrog: H from the old E, then E from the new H
        self.update_h(field, eps);
        self.update_e(field, eps);
    }
}
