//! Points and point-set sources.
//!
//! A point set can be read from a JSON or CSV file, drawn at random inside a
//! padded plane, or projected from the built-in city catalog
//! (see [`crate::cities`]).

use crate::error::{Error, Result};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Padding kept free around randomly placed points.
pub const PADDING: f64 = 50.0;

/// A 2D point with optional display metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    /// Display label, never used by the solvers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Source latitude, never used by the solvers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    /// Source longitude, never used by the solvers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y, name: None, lat: None, lng: None }
    }

    pub fn named(x: f64, y: f64, name: impl Into<String>) -> Self {
        Point { name: Some(name.into()), ..Point::new(x, y) }
    }

    /// Label used in reports: the name if present, else `Point {index + 1}`
    pub fn label(&self, index: usize) -> String {
        self.name.clone().unwrap_or_else(|| format!("Point {}", index + 1))
    }
}

/// Read a point set from a `.json` or `.csv` file.
///
/// JSON files hold an array of `{x, y, name?, lat?, lng?}` objects; CSV files
/// need a header row with at least `x` and `y`.
pub fn load_points<P: AsRef<Path>>(path: P) -> Result<Vec<Point>> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let points = match extension.as_deref() {
        Some("json") => {
            let reader = BufReader::new(File::open(path)?);
            serde_json::from_reader(reader)?
        }
        Some("csv") => {
            let mut reader = csv::Reader::from_path(path)?;
            reader.deserialize().collect::<std::result::Result<Vec<Point>, _>>()?
        }
        _ => return Err(Error::UnsupportedFormat(path.display().to_string())),
    };

    log::info!("Loaded {} points from {}", points.len(), path.display());
    Ok(points)
}

/// Write a point set as pretty-printed JSON.
pub fn save_points<P: AsRef<Path>>(path: P, points: &[Point]) -> Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, points)?;
    Ok(())
}

/// Draw `count` points uniformly inside a `width` x `height` plane, keeping
/// [`PADDING`] free on every side.
///
/// Each point is labelled `Point i` and carries pseudo lat/lng derived from its
/// position, the way a canvas front end would show them.
pub fn random_points(count: usize, width: f64, height: f64, seed: u64) -> Vec<Point> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let usable_w = (width - 2.0 * PADDING).max(0.0);
    let usable_h = (height - 2.0 * PADDING).max(0.0);

    (0..count)
        .map(|i| {
            let x = rng.gen::<f64>() * usable_w + PADDING;
            let y = rng.gen::<f64>() * usable_h + PADDING;
            Point {
                x,
                y,
                name: Some(format!("Point {}", i + 1)),
                lat: Some(y / height * 180.0 - 90.0),
                lng: Some(x / width * 360.0 - 180.0),
            }
        })
        .collect()
}
