//! Simulated annealing over pairwise swaps.
//!
//! The start point stays at index 0; every other position is open to swaps.
//! Worsening swaps are accepted with the Metropolis probability
//! `exp(-delta / T)` and the temperature follows a geometric schedule.

use super::TourSolver;
use crate::config::{clamp_start, Schedule};
use crate::error::Result;
use crate::points::Point;
use crate::progress::Progress;
use crate::tour::{tour_length, Tour};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Simulated Annealing
pub struct SimulatedAnnealing {
    pub start_index: usize,
    pub schedule: Schedule,
    /// Random seed; `None` seeds from entropy
    pub seed: Option<u64>,
}

/// Counters collected during one annealing run
#[derive(Debug, Default, Clone, Copy)]
struct AnnealStats {
    levels: usize,
    moves: usize,
    accepted: usize,
    improvements: usize,
}

impl SimulatedAnnealing {
    pub fn new(start_index: usize) -> Self {
        SimulatedAnnealing {
            start_index,
            schedule: Schedule::default(),
            seed: None,
        }
    }

    pub fn with_params(start_index: usize, initial_temperature: f64, cooling_ratio: f64) -> Self {
        SimulatedAnnealing {
            start_index,
            schedule: Schedule::new(initial_temperature, cooling_ratio),
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub(crate) fn rng(&self) -> ChaCha8Rng {
        match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        }
    }

    /// Anneal from `initial`, which is both the current and the best tour at
    /// the start. Its first point is never moved.
    pub fn anneal<R: Rng + ?Sized>(&self, initial: Tour, rng: &mut R, progress: &mut Progress<'_>) -> Result<Tour> {
        self.anneal_with_stats(initial, rng, progress).map(|(best, _)| best)
    }

    fn anneal_with_stats<R: Rng + ?Sized>(
        &self,
        initial: Tour,
        rng: &mut R,
        progress: &mut Progress<'_>,
    ) -> Result<(Tour, AnnealStats)> {
        self.schedule.validate()?;

        let n = initial.len();
        if n < 3 {
            return Ok((initial, AnnealStats::default()));
        }

        let mut current: Vec<Point> = initial.points().to_vec();
        let mut current_length = initial.length();
        let mut best = initial;
        let mut temperature = self.schedule.initial_temperature;
        let mut stats = AnnealStats::default();

        log::info!(
            "{}: {} points, initial length {:.4}, T0 {}, ratio {}",
            self.name(),
            n,
            current_length,
            temperature,
            self.schedule.cooling_ratio
        );

        'cooling: while temperature > self.schedule.final_temperature {
            for _ in 0..self.schedule.iterations_per_temperature {
                let i = rng.gen_range(1..n);
                let j = rng.gen_range(1..n);
                stats.moves += 1;

                current.swap(i, j);
                let candidate_length = tour_length(&current);
                let delta = candidate_length - current_length;

                let accept = delta < 0.0 || rng.gen::<f64>() < (-delta / temperature).exp();
                if !accept {
                    current.swap(i, j);
                    continue;
                }

                stats.accepted += 1;
                current_length = candidate_length;

                if current_length < best.length() {
                    stats.improvements += 1;
                    best = Tour::with_length(current.clone(), current_length);
                    log::debug!("{}: new best {:.4} at T = {:.4}", self.name(), current_length, temperature);
                    if progress.emit(&best).is_break() {
                        log::info!("{}: cancelled at T = {:.4}", self.name(), temperature);
                        break 'cooling;
                    }
                }
            }

            temperature *= self.schedule.cooling_ratio;
            stats.levels += 1;
            if progress.checkpoint().is_break() {
                log::info!("{}: cancelled at T = {:.4}", self.name(), temperature);
                break;
            }
        }

        log::info!(
            "{}: best length {:.4} after {} levels, {} moves ({} accepted, {} improvements)",
            self.name(),
            best.length(),
            stats.levels,
            stats.moves,
            stats.accepted,
            stats.improvements
        );
        Ok((best, stats))
    }
}

impl Default for SimulatedAnnealing {
    fn default() -> Self {
        Self::new(0)
    }
}

impl TourSolver for SimulatedAnnealing {
    fn solve(&self, points: &[Point], progress: &mut Progress<'_>) -> Result<Tour> {
        self.schedule.validate()?;
        if points.is_empty() {
            return Ok(Tour::empty());
        }

        // Start point first, then the rest in input order
        let start = clamp_start(self.start_index, points.len());
        let mut order = Vec::with_capacity(points.len());
        order.push(points[start].clone());
        order.extend(points.iter().enumerate().filter(|&(i, _)| i != start).map(|(_, p)| p.clone()));

        let mut rng = self.rng();
        self.anneal(Tour::from_points(order), &mut rng, progress)
    }

    fn name(&self) -> &str {
        "SimulatedAnnealing"
    }
}
