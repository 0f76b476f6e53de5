//! TSP Stream Solver Library
//!
//! Travelling salesman solvers over 2D points that publish every improving
//! tour as they find it, so a front end can animate convergence.
//!
//! # Features
//!
//! - Exhaustive search (exact, small inputs)
//! - Construction heuristics (Nearest Neighbor, Cheapest Insertion)
//! - Simulated Annealing with a geometric cooling schedule
//! - Hybrid: Nearest Neighbor followed by Simulated Annealing
//! - Pacing and cancellation between progress events
//! - Side-by-side comparison with CSV export
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use tsp_stream_solver::heuristics::{NearestNeighbor, TourSolver};
//! use tsp_stream_solver::points::random_points;
//! use tsp_stream_solver::progress::{Progress, ThreadPacer};
//! use tsp_stream_solver::tour::Tour;
//!
//! let points = random_points(20, 800.0, 600.0, 42);
//!
//! let mut sink = |tour: &Tour| println!("{} points, length {:.2}", tour.len(), tour.length());
//! let mut pacer = ThreadPacer;
//! let mut progress = Progress::new(&mut sink, &mut pacer, Duration::from_millis(50));
//!
//! let tour = NearestNeighbor::new(0).solve(&points, &mut progress).unwrap();
//! println!("Final length: {:.2}", tour.length());
//! ```

pub mod cities;
pub mod compare;
pub mod config;
pub mod error;
pub mod heuristics;
pub mod points;
pub mod progress;
pub mod tour;

pub use config::RunConfig;
pub use error::{Error, Result};
pub use heuristics::{Algorithm, TourSolver};
pub use points::Point;
pub use tour::Tour;
