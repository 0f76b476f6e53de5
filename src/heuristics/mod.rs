//! Tour solvers.
//!
//! Every solver implements [`TourSolver`]; [`Algorithm`] names them and builds
//! a boxed solver from a [`RunConfig`].

pub mod annealing;
pub mod exhaustive;
pub mod hybrid;
pub mod insertion;
pub mod nearest_neighbor;

pub use annealing::*;
pub use exhaustive::*;
pub use hybrid::*;
pub use insertion::*;
pub use nearest_neighbor::*;

use crate::config::RunConfig;
use crate::error::Result;
use crate::points::Point;
use crate::progress::Progress;
use crate::tour::Tour;
use serde::{Deserialize, Serialize};

/// A tour solver that streams intermediate tours through `progress`
pub trait TourSolver {
    /// Solve over a borrowed point set; the input is copied, never modified
    fn solve(&self, points: &[Point], progress: &mut Progress<'_>) -> Result<Tour>;
    fn name(&self) -> &str;
}

/// Available solvers
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    BruteForce,
    NearestNeighbor,
    CheapestInsertion,
    SimulatedAnnealing,
    Hybrid,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Algorithm::BruteForce,
        Algorithm::NearestNeighbor,
        Algorithm::CheapestInsertion,
        Algorithm::SimulatedAnnealing,
        Algorithm::Hybrid,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Algorithm::BruteForce => "Brute Force",
            Algorithm::NearestNeighbor => "Greedy (Nearest Neighbor)",
            Algorithm::CheapestInsertion => "Cheapest Insertion",
            Algorithm::SimulatedAnnealing => "Simulated Annealing",
            Algorithm::Hybrid => "Greedy + Simulated Annealing",
        }
    }

    pub fn is_stochastic(&self) -> bool {
        matches!(self, Algorithm::SimulatedAnnealing | Algorithm::Hybrid)
    }

    pub fn build(&self, config: &RunConfig) -> Box<dyn TourSolver + Send + Sync> {
        match self {
            Algorithm::BruteForce => Box::new(ExhaustiveSearch {
                start_index: config.start_index,
                max_points: config.exhaustive_limit,
            }),
            Algorithm::NearestNeighbor => Box::new(NearestNeighbor::new(config.start_index)),
            Algorithm::CheapestInsertion => Box::new(CheapestInsertion::new(config.start_index)),
            Algorithm::SimulatedAnnealing => Box::new(SimulatedAnnealing {
                start_index: config.start_index,
                schedule: config.schedule,
                seed: config.seed,
            }),
            Algorithm::Hybrid => Box::new(HybridSolver::new(
                config.start_index,
                config.schedule.initial_temperature,
                config.schedule.cooling_ratio,
                config.seed,
            )),
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::points::Point;
    use rand::prelude::*;
    use rand_chacha::ChaCha8Rng;

    pub fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    pub fn unit_square() -> Vec<Point> {
        pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)])
    }

    pub fn scattered(count: usize, seed: u64) -> Vec<Point> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        (0..count)
            .map(|_| Point::new(rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::progress::{NoPacing, Recorder};
    use std::time::Duration;

    fn run(algorithm: Algorithm, points: &[Point]) -> (Tour, usize) {
        let config = RunConfig {
            seed: Some(3),
            schedule: crate::config::Schedule::new(10.0, 0.9),
            ..RunConfig::default()
        };
        let solver = algorithm.build(&config);
        let mut recorder = Recorder::default();
        let mut pacer = NoPacing;
        let mut progress = Progress::new(&mut recorder, &mut pacer, Duration::ZERO);
        let tour = solver.solve(points, &mut progress).unwrap();
        (tour, recorder.tours.len())
    }

    #[test]
    fn test_empty_input_for_every_solver() {
        for algorithm in Algorithm::ALL {
            let (tour, events) = run(algorithm, &[]);
            assert!(tour.is_empty(), "{}", algorithm);
            assert_eq!(tour.length(), 0.0, "{}", algorithm);
            assert_eq!(events, 0, "{}", algorithm);
        }
    }

    #[test]
    fn test_two_points_for_every_solver() {
        let points = pts(&[(0.0, 0.0), (3.0, 4.0)]);
        for algorithm in Algorithm::ALL {
            let (tour, _) = run(algorithm, &points);
            assert_eq!(tour.length(), 5.0, "{}", algorithm);
        }
    }

    #[test]
    fn test_every_solver_returns_consistent_tours() {
        let points = scattered(7, 11);
        for algorithm in Algorithm::ALL {
            let (tour, _) = run(algorithm, &points);
            assert!(tour.visits_all(&points), "{}", algorithm);
            assert!((tour.length() - crate::tour::tour_length(tour.points())).abs() < 1e-9);
        }
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Algorithm::CheapestInsertion).unwrap();
        assert_eq!(json, "\"cheapest-insertion\"");
    }
}
