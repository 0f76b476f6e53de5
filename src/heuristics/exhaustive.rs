//! Exhaustive search over every visiting order with a fixed first point.
//!
//! Exact, but `(n - 1)!` orders are evaluated, so the solver refuses inputs
//! above its point limit unless the limit is lifted.

use super::TourSolver;
use crate::config::{clamp_start, EXHAUSTIVE_LIMIT};
use crate::error::{Error, Result};
use crate::points::Point;
use crate::progress::Progress;
use crate::tour::{indexed_length, Tour};

/// Lexicographic permutations of `0..len`, produced lazily.
///
/// The order matches choosing each position in turn from the remaining
/// items and recursing. `len == 0` yields a single empty permutation.
pub struct Permutations {
    next: Option<Vec<usize>>,
}

impl Permutations {
    pub fn new(len: usize) -> Self {
        Permutations {
            next: Some((0..len).collect()),
        }
    }
}

impl Iterator for Permutations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        let current = self.next.take()?;
        let mut following = current.clone();
        if advance(&mut following) {
            self.next = Some(following);
        }
        Some(current)
    }
}

/// Step `order` to its lexicographic successor; false once it is the last one
fn advance(order: &mut [usize]) -> bool {
    let Some(pivot) = order.windows(2).rposition(|w| w[0] < w[1]) else {
        return false;
    };
    let mut successor = order.len() - 1;
    while order[successor] <= order[pivot] {
        successor -= 1;
    }
    order.swap(pivot, successor);
    order[pivot + 1..].reverse();
    true
}

/// Brute-force search for the optimal tour
pub struct ExhaustiveSearch {
    pub start_index: usize,
    /// Inputs larger than this are rejected; `None` accepts any size
    pub max_points: Option<usize>,
}

impl ExhaustiveSearch {
    pub fn new(start_index: usize) -> Self {
        ExhaustiveSearch {
            start_index,
            max_points: Some(EXHAUSTIVE_LIMIT),
        }
    }

    pub fn unbounded(start_index: usize) -> Self {
        ExhaustiveSearch {
            start_index,
            max_points: None,
        }
    }
}

impl Default for ExhaustiveSearch {
    fn default() -> Self {
        Self::new(0)
    }
}

impl TourSolver for ExhaustiveSearch {
    fn solve(&self, points: &[Point], progress: &mut Progress<'_>) -> Result<Tour> {
        let n = points.len();
        if let Some(limit) = self.max_points {
            if n > limit {
                return Err(Error::TooManyPoints { points: n, limit });
            }
        }
        if n < 2 {
            return Ok(Tour::from_points(points.to_vec()));
        }

        // Working copy with the start point moved to the front
        let start = clamp_start(self.start_index, n);
        let mut working = Vec::with_capacity(n);
        working.push(points[start].clone());
        working.extend(points.iter().enumerate().filter(|&(i, _)| i != start).map(|(_, p)| p.clone()));

        log::info!("{}: {} points, start index {}", self.name(), n, start);

        let mut best = Tour::empty();
        let mut best_length = f64::INFINITY;
        let mut order = Vec::with_capacity(n);
        let mut evaluated = 0usize;

        for permutation in Permutations::new(n - 1) {
            order.clear();
            order.push(0);
            order.extend(permutation.iter().map(|&i| i + 1));
            evaluated += 1;

            let length = indexed_length(&working, &order);
            if length < best_length {
                best_length = length;
                best = Tour::with_length(order.iter().map(|&i| working[i].clone()).collect(), length);
                log::debug!("{}: new best {:.4} after {} permutations", self.name(), length, evaluated);
                if progress.emit(&best).is_break() {
                    log::info!("{}: cancelled after {} permutations", self.name(), evaluated);
                    break;
                }
            }
        }

        log::info!("{}: best length {:.4} over {} permutations", self.name(), best.length(), evaluated);
        Ok(best)
    }

    fn name(&self) -> &str {
        "BruteForce"
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::progress::{CancelToken, NoPacing, Recorder};
    use crate::tour::tour_length;
    use std::time::Duration;

    fn solve(solver: &ExhaustiveSearch, points: &[Point]) -> (Result<Tour>, Vec<Tour>) {
        let mut recorder = Recorder::default();
        let mut pacer = NoPacing;
        let mut progress = Progress::new(&mut recorder, &mut pacer, Duration::ZERO);
        let result = solver.solve(points, &mut progress);
        (result, recorder.tours)
    }

    /// Independent oracle: recursive enumeration of all completions
    fn oracle(points: &[Point], start: usize) -> f64 {
        fn recurse(prefix: &mut Vec<Point>, rest: &mut Vec<Point>, best: &mut f64) {
            if rest.is_empty() {
                *best = best.min(tour_length(prefix));
                return;
            }
            for i in 0..rest.len() {
                let p = rest.remove(i);
                prefix.push(p);
                recurse(prefix, rest, best);
                let p = prefix.pop().unwrap();
                rest.insert(i, p);
            }
        }
        let mut prefix = vec![points[start].clone()];
        let mut rest: Vec<Point> = points.iter().enumerate().filter(|&(i, _)| i != start).map(|(_, p)| p.clone()).collect();
        let mut best = f64::INFINITY;
        recurse(&mut prefix, &mut rest, &mut best);
        best
    }

    #[test]
    fn test_permutations_lexicographic() {
        let all: Vec<Vec<usize>> = Permutations::new(3).collect();
        assert_eq!(
            all,
            vec![vec![0, 1, 2], vec![0, 2, 1], vec![1, 0, 2], vec![1, 2, 0], vec![2, 0, 1], vec![2, 1, 0]]
        );
        assert_eq!(Permutations::new(5).count(), 120);
        assert_eq!(Permutations::new(0).collect::<Vec<_>>(), vec![Vec::<usize>::new()]);
    }

    #[test]
    fn test_unit_square_perimeter() {
        let points = unit_square();
        let (result, events) = solve(&ExhaustiveSearch::new(0), &points);
        let tour = result.unwrap();
        assert!((tour.length() - 4.0).abs() < 1e-12);
        // First optimal order wins: the input order itself
        assert_eq!(tour.points(), points.as_slice());
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_matches_oracle() {
        for (size, seed) in [(3, 1), (5, 2), (6, 3), (7, 4), (8, 5)] {
            let points = scattered(size, seed);
            let start = seed as usize % size;
            let (result, _) = solve(&ExhaustiveSearch::new(start), &points);
            let tour = result.unwrap();
            assert!((tour.length() - oracle(&points, start)).abs() < 1e-9, "size {}", size);
            assert_eq!(tour.first(), Some(&points[start]));
            assert!(tour.visits_all(&points));
        }
    }

    #[test]
    fn test_emits_only_strict_improvements() {
        let points = scattered(7, 9);
        let (result, events) = solve(&ExhaustiveSearch::new(2), &points);
        let tour = result.unwrap();
        assert!(!events.is_empty());
        for pair in events.windows(2) {
            assert!(pair[1].length() < pair[0].length());
        }
        assert_eq!(events.last(), Some(&tour));
    }

    #[test]
    fn test_degenerate_inputs() {
        let (result, events) = solve(&ExhaustiveSearch::new(0), &[]);
        assert!(result.unwrap().is_empty());
        assert!(events.is_empty());

        let single = pts(&[(4.0, 2.0)]);
        let (result, events) = solve(&ExhaustiveSearch::new(3), &single);
        let tour = result.unwrap();
        assert_eq!(tour.len(), 1);
        assert_eq!(tour.length(), 0.0);
        assert!(events.is_empty());
    }

    #[test]
    fn test_limit_guard() {
        let points = scattered(11, 1);
        let (result, events) = solve(&ExhaustiveSearch::new(0), &points);
        assert!(matches!(result, Err(Error::TooManyPoints { points: 11, limit: 10 })));
        assert!(events.is_empty());

        let small = scattered(5, 1);
        let bounded = ExhaustiveSearch { start_index: 0, max_points: Some(4) };
        assert!(solve(&bounded, &small).0.is_err());
        assert!(solve(&ExhaustiveSearch::unbounded(0), &small).0.is_ok());
    }

    #[test]
    fn test_out_of_range_start_is_clamped() {
        let points = scattered(5, 6);
        let (result, _) = solve(&ExhaustiveSearch::new(40), &points);
        assert_eq!(result.unwrap().first(), Some(&points[4]));
    }

    #[test]
    fn test_cancellation_returns_best_so_far() {
        let points = scattered(8, 2);
        let token = CancelToken::new();
        token.cancel();
        let mut recorder = Recorder::default();
        let mut pacer = NoPacing;
        let mut progress = Progress::new(&mut recorder, &mut pacer, Duration::ZERO).with_cancel(token);
        let tour = ExhaustiveSearch::new(0).solve(&points, &mut progress).unwrap();
        drop(progress);

        assert_eq!(recorder.tours.len(), 1);
        assert_eq!(tour.points(), points.as_slice());
    }
}
