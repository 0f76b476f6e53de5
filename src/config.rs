//! Run configuration.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Temperature at or below which annealing stops
pub const FINAL_TEMPERATURE: f64 = 0.01;

/// Iterations per temperature level for standalone annealing
pub const ANNEALING_ITERATIONS: usize = 100;

/// Iterations per temperature level for the annealing phase of the hybrid
pub const HYBRID_ITERATIONS: usize = 50;

/// Largest input the exhaustive search accepts by default
pub const EXHAUSTIVE_LIMIT: usize = 10;

/// Geometric cooling schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// Starting temperature
    pub initial_temperature: f64,
    /// Multiplier applied after each temperature level, in (0, 1)
    pub cooling_ratio: f64,
    /// Stop once the temperature is at or below this value
    pub final_temperature: f64,
    /// Candidate moves per temperature level
    pub iterations_per_temperature: usize,
}

impl Schedule {
    pub fn new(initial_temperature: f64, cooling_ratio: f64) -> Self {
        Schedule {
            initial_temperature,
            cooling_ratio,
            ..Self::default()
        }
    }

    pub fn with_iterations(mut self, iterations_per_temperature: usize) -> Self {
        self.iterations_per_temperature = iterations_per_temperature;
        self
    }

    /// Reject schedules that would never terminate or make the acceptance
    /// probability meaningless
    pub fn validate(&self) -> Result<()> {
        if !self.initial_temperature.is_finite() || self.initial_temperature <= 0.0 {
            return Err(Error::invalid_config(format!(
                "initial temperature must be finite and positive, got {}",
                self.initial_temperature
            )));
        }
        if !(self.cooling_ratio > 0.0 && self.cooling_ratio < 1.0) {
            return Err(Error::invalid_config(format!(
                "cooling ratio must lie strictly between 0 and 1, got {}",
                self.cooling_ratio
            )));
        }
        if !self.final_temperature.is_finite() || self.final_temperature <= 0.0 {
            return Err(Error::invalid_config(format!(
                "final temperature must be finite and positive, got {}",
                self.final_temperature
            )));
        }
        if self.iterations_per_temperature == 0 {
            return Err(Error::invalid_config("iterations per temperature must be at least 1"));
        }
        Ok(())
    }

    /// Number of temperature levels the schedule runs through
    pub fn levels(&self) -> usize {
        let mut temperature = self.initial_temperature;
        let mut levels = 0;
        while temperature > self.final_temperature {
            temperature *= self.cooling_ratio;
            levels += 1;
        }
        levels
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Schedule {
            initial_temperature: 100.0,
            cooling_ratio: 0.99,
            final_temperature: FINAL_TEMPERATURE,
            iterations_per_temperature: ANNEALING_ITERATIONS,
        }
    }
}

/// Parameters of one solver run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Index of the fixed first point, clamped into range by each solver
    pub start_index: usize,
    /// Suspension after every progress event
    pub step_delay: Duration,
    /// Annealing schedule, used by the stochastic solvers only
    pub schedule: Schedule,
    /// RNG seed for the stochastic solvers; `None` draws one from entropy
    pub seed: Option<u64>,
    /// Exhaustive search refuses larger inputs; `None` disables the guard
    pub exhaustive_limit: Option<usize>,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            start_index: 0,
            step_delay: Duration::ZERO,
            schedule: Schedule::default(),
            seed: None,
            exhaustive_limit: Some(EXHAUSTIVE_LIMIT),
        }
    }
}

/// Clamp a requested start index into `[0, count - 1]` (0 for empty inputs)
pub fn clamp_start(start_index: usize, count: usize) -> usize {
    start_index.min(count.saturating_sub(1))
}
