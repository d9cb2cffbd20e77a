//! Lap counting at the injection cell
//!
//! A lap is one threshold crossing of E at the probe. After a crossing the
//! detector stays fired until E drops back to or below the threshold, so a
//! wide pulse that sits above threshold for several steps counts once. The
//! seeded pulse itself starts above threshold, so the detector starts fired
//! and only arms once the pulse has left the probe.
//!
//! The probe is also ignored while the source is injecting and for half the
//! minimum ring transit afterwards. Nothing emitted at the probe can return
//! before a full transit of `N / courant` steps, and a short drive leaves a
//! slowly decaying grid-dispersion ring at the source cell that would
//! otherwise read as a crossing.

use crate::config::SimulationConfig;
use crate::field::FieldState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trigger {
    Armed,
    Fired,
}

/// Probe that reports the step at which the target lap count is reached
#[derive(Debug, Clone)]
pub struct ArrivalDetector {
    probe: usize,
    threshold: f64,
    target: u32,
    laps: u32,
    trigger: Trigger,
    quiet_until: usize,
    arrival_step: Option<usize>,
}

impl ArrivalDetector {
    /// Detector primed against the seeded field
    pub fn new(config: &SimulationConfig, initial: &FieldState) -> Self {
        let threshold = config.detection_threshold;
        let probe = config.pulse_position;
        let settle = (config.ring_size as f64 / (2.0 * config.courant_number())).ceil() as usize;
        Self {
            probe,
            threshold,
            target: config.target_circulations,
            laps: 0,
            trigger: trigger_for(initial.e[probe], threshold),
            quiet_until: config.injection_duration + settle,
            arrival_step: None,
        }
    }

    /// Inspect the field after `step` completed steps.
    /// Returns the arrival step once the target lap count is reached.
    pub fn observe(&mut self, step: usize, field: &FieldState) -> Option<usize> {
        if self.arrival_step.is_some() {
            return self.arrival_step;
        }

        // Held fired, so arming needs a sample at or below threshold afterwards
        if step <= self.quiet_until {
            self.trigger = Trigger::Fired;
            return None;
        }

        let value = field.e[self.probe];
        match self.trigger {
            Trigger::Armed if value > self.threshold => {
                self.laps += 1;
                self.trigger = Trigger::Fired;
                tracing::trace!("Lap {} at step {} (E = {:.4})", self.laps, step, value);
                if self.laps >= self.target {
                    self.arrival_step = Some(step);
                }
            }
            Trigger::Fired if value <= self.threshold => {
                self.trigger = Trigger::Armed;
            }
            _ => {}
        }

        self.arrival_step
    }

    pub fn laps(&self) -> u32 {
        self.laps
    }

    pub fn arrival_step(&self) -> Option<usize> {
        self.arrival_step
    }

    pub fn is_armed(&self) -> bool {
        self.trigger == Trigger::Armed
    }

    /// Last step at which the probe is ignored
    pub fn quiet_until(&self) -> usize {
        self.quiet_until
    }
}

fn trigger_for(value: f64, threshold: f64) -> Trigger {
    if value > threshold {
        Trigger::Fired
    } else {
        Trigger::Armed
    }
}
