use super::TourSolver;
use crate::config::clamp_start;
use crate::error::Result;
use crate::points::Point;
use crate::progress::Progress;
use crate::tour::{distance, Tour};
use ordered_float::OrderedFloat;

/// Nearest Neighbor Heuristic
///
/// Grows the tour from the start point by always visiting the closest
/// unvisited point next. Every extension is published, not only improvements.
pub struct NearestNeighbor {
    pub start_index: usize,
}

impl NearestNeighbor {
    pub fn new(start_index: usize) -> Self {
        NearestNeighbor { start_index }
    }
}

impl Default for NearestNeighbor {
    fn default() -> Self {
        Self::new(0)
    }
}

impl TourSolver for NearestNeighbor {
    fn solve(&self, points: &[Point], progress: &mut Progress<'_>) -> Result<Tour> {
        if points.len() < 2 {
            return Ok(Tour::empty());
        }

        let start = clamp_start(self.start_index, points.len());
        let mut path = vec![points[start].clone()];
        let mut remaining: Vec<Point> = points
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != start)
            .map(|(_, p)| p.clone())
            .collect();

        log::info!("{}: {} points, start index {}", self.name(), points.len(), start);

        while !remaining.is_empty() {
            let Some(last) = path.last() else { break };
            // min_by_key keeps the first of equally close points
            let nearest = remaining
                .iter()
                .enumerate()
                .min_by_key(|(_, p)| OrderedFloat(distance(last, p)))
                .map(|(i, _)| i)
                .unwrap_or(0);

            path.push(remaining.remove(nearest));

            let snapshot = Tour::from_points(path.clone());
            log::debug!("{}: {} points placed, length {:.4}", self.name(), path.len(), snapshot.length());
            if progress.emit(&snapshot).is_break() {
                log::info!("{}: cancelled with {} of {} points placed", self.name(), path.len(), points.len());
                return Ok(snapshot);
            }
        }

        let tour = Tour::from_points(path);
        log::info!("{}: length {:.4}", self.name(), tour.length());
        Ok(tour)
    }

    fn name(&self) -> &str {
        "NearestNeighbor"
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
        let tour = NearestNeighbor::new(start).solve(points, &mut progress).unwrap();
        (tour, recorder.tours)
    }

    #[test]
    fn test_visits_every_point_from_start() {
        let points = scattered(25, 4);
        for start in [0, 7, 24] {
            let (tour, _) = solve(start, &points);
            assert_eq!(tour.len(), 25);
            assert_eq!(tour.first(), Some(&points[start]));
            assert!(tour.visits_all(&points));
        }
    }

    #[test]
    fn test_emits_every_extension() {
        let points = scattered(9, 5);
        let (tour, events) = solve(0, &points);
        assert_eq!(events.len(), 8);
        for (step, event) in events.iter().enumerate() {
            assert_eq!(event.len(), step + 2);
        }
        assert_eq!(events.last(), Some(&tour));
    }

    #[test]
    fn test_greedy_order_on_a_line() {
        let points = pts(&[(0.0, 0.0), (10.0, 0.0), (1.0, 0.0), (3.0, 0.0)]);
        let (tour, _) = solve(0, &points);
        let xs: Vec<f64> = tour.points().iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 1.0, 3.0, 10.0]);
    }

    #[test]
    fn test_ties_go_to_first_remaining_point() {
        let points = pts(&[(0.0, 0.0), (0.0, 1.0), (1.0, 0.0), (-1.0, 0.0)]);
        let (tour, _) = solve(0, &points);
        assert_eq!(tour.points()[1], points[1]);
    }

    #[test]
    fn test_degenerate_inputs() {
        let (tour, events) = solve(0, &pts(&[(1.0, 1.0)]));
        assert!(tour.is_empty());
        assert!(events.is_empty());

        let (tour, events) = solve(5, &pts(&[(0.0, 0.0), (3.0, 4.0)]));
        assert_eq!(tour.length(), 5.0);
        assert_eq!(tour.first(), Some(&Point::new(3.0, 4.0)));
        assert_eq!(events.len(), 1);
    }
}
