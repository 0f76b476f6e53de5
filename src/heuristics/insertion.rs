use super::TourSolver;
use crate::config::clamp_start;
use crate::error::Result;
use crate::points::Point;
use crate::progress::Progress;
use crate::tour::{distance, indexed_length, Tour};

/// Cheapest Insertion Heuristic
///
/// Starts from the start point alone and repeatedly inserts the unvisited
/// point with the smallest insertion increase. Selecting the point and placing
/// it are separate steps: the chosen point goes to the slot that minimizes the
/// total tour length, which need not be the edge that made it cheapest.
///
/// No approximation guarantee; this is not Christofides' algorithm.
pub struct CheapestInsertion {
    pub start_index: usize,
}

impl CheapestInsertion {
    pub fn new(start_index: usize) -> Self {
        CheapestInsertion { start_index }
    }

    /// Smallest length increase of inserting `node` on any edge of `path`,
    /// the wrap edge included
    fn insertion_increase(points: &[Point], path: &[usize], node: usize) -> f64 {
        let candidate = &points[node];
        if let [only] = path {
            return distance(&points[*only], candidate);
        }
        (0..path.len())
            .map(|i| {
                let prev = &points[path[i]];
                let next = &points[path[(i + 1) % path.len()]];
                distance(prev, candidate) + distance(candidate, next) - distance(prev, next)
            })
            .fold(f64::INFINITY, f64::min)
    }

    /// Slot (index in the grown path) giving the shortest resulting tour
    fn best_slot(points: &[Point], path: &[usize], node: usize, scratch: &mut Vec<usize>) -> (usize, f64) {
        let mut best_slot = 1;
        let mut best_total = f64::INFINITY;

        for slot in 1..=path.len() {
            scratch.clear();
            scratch.extend_from_slice(&path[..slot]);
            scratch.push(node);
            scratch.extend_from_slice(&path[slot..]);

            let total = indexed_length(points, scratch);
            if total < best_total {
                best_total = total;
                best_slot = slot;
            }
        }

        (best_slot, best_total)
    }
}

impl Default for CheapestInsertion {
    fn default() -> Self {
        Self::new(0)
    }
}

impl TourSolver for CheapestInsertion {
    fn solve(&self, points: &[Point], progress: &mut Progress<'_>) -> Result<Tour> {
        let n = points.len();
        if n < 2 {
            return Ok(Tour::empty());
        }

        let start = clamp_start(self.start_index, n);
        let mut path = Vec::with_capacity(n);
        path.push(start);
        let mut unvisited: Vec<usize> = (0..n).filter(|&i| i != start).collect();
        let mut scratch = Vec::with_capacity(n);

        log::info!("{}: {} points, start index {}", self.name(), n, start);

        while !unvisited.is_empty() {
            let mut chosen = 0;
            let mut best_increase = f64::INFINITY;
            for (position, &node) in unvisited.iter().enumerate() {
                let increase = Self::insertion_increase(points, &path, node);
                if increase < best_increase {
                    best_increase = increase;
                    chosen = position;
                }
            }

            let node = unvisited.remove(chosen);
            let (slot, total) = Self::best_slot(points, &path, node, &mut scratch);
            path.insert(slot, node);

            let snapshot = Tour::with_length(path.iter().map(|&i| points[i].clone()).collect(), total);
            log::debug!(
                "{}: inserted point {} at slot {} (increase {:.4}), length {:.4}",
                self.name(),
                node,
                slot,
                best_increase,
                total
            );
            if progress.emit(&snapshot).is_break() {
                log::info!("{}: cancelled with {} of {} points placed", self.name(), path.len(), n);
                return Ok(snapshot);
            }
        }

        let tour = Tour::from_points(path.into_iter().map(|i| points[i].clone()).collect());
        log::info!("{}: length {:.4}", self.name(), tour.length());
        Ok(tour)
    }

    fn name(&self) -> &str {
        "CheapestInsertion"
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;
    use crate::progress::{NoPacing, Recorder};
    use std::time::Duration;

    fn solve(start: usize, points: &[Point]) -> (Tour, Vec<Tour>) {
        let mut recorder = Recorder::default();
        let mut pacer = NoPacing;
        let mut progress = Progress::new(&mut recorder, &mut pacer, Duration::ZERO);
        let tour = CheapestInsertion::new(start).solve(points, &mut progress).unwrap();
        (tour, recorder.tours)
    }

    #[test]
    fn test_all_points_present_once() {
        let points = scattered(30, 8);
        let (tour, events) = solve(3, &points);
        assert!(tour.length().is_finite());
        assert!(tour.visits_all(&points));
        assert_eq!(tour.first(), Some(&points[3]));
        assert_eq!(events.len(), 29);
        for (step, event) in events.iter().enumerate() {
            assert_eq!(event.len(), step + 2);
        }
    }

    #[test]
    fn test_first_insertion_takes_nearest_point() {
        let points = pts(&[(0.0, 0.0), (5.0, 0.0), (1.0, 1.0), (0.0, 9.0)]);
        let (_, events) = solve(0, &points);
        assert_eq!(events[0].points()[1], points[2]);
    }

    #[test]
    fn test_square_gives_perimeter() {
        let (tour, _) = solve(0, &unit_square());
        assert!((tour.length() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_equal_slots_keep_the_first() {
        // 3-4-5 triangle: both slots for the last point give a length of 12
        let points = pts(&[(0.0, 0.0), (3.0, 0.0), (0.0, 4.0)]);
        let (tour, events) = solve(0, &points);
        assert_eq!(events.len(), 2);
        assert_eq!(tour.length(), 12.0);
        assert_eq!(tour.points(), &[points[0].clone(), points[2].clone(), points[1].clone()]);
    }

    #[test]
    fn test_insertion_increase_includes_wrap_edge() {
        let points = pts(&[(0.0, 0.0), (4.0, 0.0), (4.0, 3.0), (2.0, 1.6)]);
        let increase = CheapestInsertion::insertion_increase(&points, &[0, 1, 2], 3);
        // Only the closing edge (4,3)-(0,0) is this cheap; the others cost more than 1
        let expected = 5.96f64.sqrt() + 6.56f64.sqrt() - 5.0;
        assert!((increase - expected).abs() < 1e-12);
        assert!(increase < 0.01);
    }

    #[test]
    fn test_degenerate_inputs() {
        let (tour, events) = solve(0, &[]);
        assert!(tour.is_empty());
        assert!(events.is_empty());

        let (tour, _) = solve(0, &pts(&[(0.0, 0.0), (3.0, 4.0)]));
        assert_eq!(tour.length(), 5.0);
    }
}
