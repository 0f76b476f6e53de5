use super::{NearestNeighbor, SimulatedAnnealing, TourSolver};
use crate::config::{Schedule, HYBRID_ITERATIONS};
use crate::error::Result;
use crate::points::Point;
use crate::progress::Progress;
use crate::tour::Tour;

/// Nearest neighbor construction followed by simulated annealing.
///
/// Both phases report through the same progress handle; the annealing phase
/// starts from the constructed tour and runs fewer moves per temperature level
/// than the standalone annealer.
pub struct HybridSolver {
    pub construction: NearestNeighbor,
    pub annealing: SimulatedAnnealing,
}

impl HybridSolver {
    pub fn new(start_index: usize, initial_temperature: f64, cooling_ratio: f64, seed: Option<u64>) -> Self {
        HybridSolver {
            construction: NearestNeighbor::new(start_index),
            annealing: SimulatedAnnealing {
                start_index,
                schedule: Schedule::new(initial_temperature, cooling_ratio).with_iterations(HYBRID_ITERATIONS),
                seed,
            },
        }
    }
}

impl Default for HybridSolver {
    fn default() -> Self {
        let schedule = Schedule::default();
        Self::new(0, schedule.initial_temperature, schedule.cooling_ratio, None)
    }
}

impl TourSolver for HybridSolver {
    fn solve(&self, points: &[Point], progress: &mut Progress<'_>) -> Result<Tour> {
        self.annealing.schedule.validate()?;

        let constructed = self.construction.solve(points, progress)?;
        if progress.checkpoint().is_break() {
            return Ok(constructed);
        }
        log::info!("{}: construction done, length {:.4}", self.name(), constructed.length());

        let mut rng = self.annealing.rng();
        self.annealing.anneal(constructed, &mut rng, progress)
    }

    fn name(&self) -> &str {
        "Hybrid"
    }
}
