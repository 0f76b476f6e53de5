//! Geometry primitives and the tour representation.
//!
//! A tour's length follows one rule everywhere in the crate: consecutive
//! distances are summed, and the closing edge back to the first point is added
//! only when the tour has more than two points. A two-point tour is a single
//! segment counted once.

use crate::points::Point;
use serde::Serialize;

/// Euclidean distance between two points
#[inline]
pub fn distance(a: &Point, b: &Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}

/// Length of a visiting sequence
pub fn tour_length(sequence: &[Point]) -> f64 {
    let open: f64 = sequence.windows(2).map(|w| distance(&w[0], &w[1])).sum();
    match sequence {
        [first, .., last] if sequence.len() > 2 => open + distance(last, first),
        _ => open,
    }
}

/// Length of the sequence `order` over `points`, same rule as [`tour_length`]
pub(crate) fn indexed_length(points: &[Point], order: &[usize]) -> f64 {
    let open: f64 = order.windows(2).map(|w| distance(&points[w[0]], &points[w[1]])).sum();
    match order {
        [first, .., last] if order.len() > 2 => open + distance(&points[*last], &points[*first]),
        _ => open,
    }
}

/// An ordered visiting sequence with its cached length
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tour {
    points: Vec<Point>,
    length: f64,
}

impl Tour {
    /// The tour over no points
    pub fn empty() -> Self {
        Tour { points: Vec::new(), length: 0.0 }
    }

    /// Build a tour, computing its length
    pub fn from_points(points: Vec<Point>) -> Self {
        let length = tour_length(&points);
        Tour { points, length }
    }

    /// Build a tour whose length the caller already computed with [`tour_length`]
    pub(crate) fn with_length(points: Vec<Point>, length: f64) -> Self {
        debug_assert!((tour_length(&points) - length).abs() <= 1e-6 * length.max(1.0));
        Tour { points, length }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&Point> {
        self.points.first()
    }

    /// Check that the tour visits every point of `points` exactly once.
    ///
    /// Points are compared by coordinates as a multiset, so duplicated input
    /// coordinates must appear as many times in the tour.
    pub fn visits_all(&self, points: &[Point]) -> bool {
        let key = |p: &Point| (p.x.to_bits(), p.y.to_bits());
        let mut expected: Vec<_> = points.iter().map(key).collect();
        let mut actual: Vec<_> = self.points.iter().map(key).collect();
        expected.sort_unstable();
        actual.sort_unstable();
        expected == actual
    }
}

impl Default for Tour {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Display for Tour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Tour ({} points)", self.points.len())?;
        writeln!(f, "  Length: {:.2}", self.length)?;
        let labels: Vec<String> = self
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| p.label(i))
            .collect();
        writeln!(f, "  Order: {}", labels.join(" -> "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn test_distance() {
        assert_eq!(distance(&Point::new(0.0, 0.0), &Point::new(3.0, 4.0)), 5.0);
    }

    #[test]
    fn test_degenerate_lengths() {
        assert_eq!(tour_length(&[]), 0.0);
        assert_eq!(tour_length(&pts(&[(2.0, 7.0)])), 0.0);
    }

    #[test]
    fn test_two_points_is_open_segment() {
        let tour = Tour::from_points(pts(&[(0.0, 0.0), (3.0, 4.0)]));
        assert_eq!(tour.length(), 5.0);
    }

    #[test]
    fn test_three_points_close_the_loop() {
        let length = tour_length(&pts(&[(0.0, 0.0), (3.0, 0.0), (3.0, 4.0)]));
        assert!((length - 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_unit_square_perimeter() {
        let square = pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
        assert!((tour_length(&square) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_metadata_ignored() {
        let mut named = pts(&[(0.0, 0.0), (3.0, 4.0)]);
        named[0].name = Some("Depot".to_string());
        named[1].lat = Some(10.0);
        assert_eq!(tour_length(&named), 5.0);
    }

    #[test]
    fn test_display_uses_point_labels() {
        let tour = Tour::from_points(vec![Point::named(0.0, 0.0, "Depot"), Point::new(3.0, 4.0)]);
        let text = tour.to_string();
        assert!(text.contains("Length: 5.00"));
        assert!(text.contains("Order: Depot -> Point 2"));
    }

    #[test]
    fn test_visits_all() {
        let input = pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
        let reordered = Tour::from_points(pts(&[(1.0, 1.0), (0.0, 0.0), (1.0, 0.0)]));
        assert!(reordered.visits_all(&input));

        let missing = Tour::from_points(pts(&[(1.0, 1.0), (0.0, 0.0)]));
        assert!(!missing.visits_all(&input));

        let repeated = Tour::from_points(pts(&[(1.0, 1.0), (0.0, 0.0), (0.0, 0.0)]));
        assert!(!repeated.visits_all(&input));
    }
}
