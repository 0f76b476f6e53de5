//! Side-by-side comparison of solvers on one point set.
//!
//! Every run gets its own copy of the input, its own sink and no pacing, so
//! repeated runs of the stochastic solvers can be spread over threads.

use crate::config::RunConfig;
use crate::error::Result;
use crate::heuristics::Algorithm;
use crate::points::Point;
use crate::progress::{NoPacing, NullSink, Progress};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use std::time::Instant;

/// Result of one solver run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRecord {
    /// Algorithm label
    pub algorithm: String,
    /// Run number within the algorithm
    pub run: usize,
    /// Seed used, if the algorithm is stochastic and seeded
    pub seed: Option<u64>,
    /// Input size
    pub points: usize,
    /// Final tour length
    pub length: f64,
    /// Wall time in milliseconds
    pub time_ms: f64,
    /// Progress events published
    pub events: usize,
    /// Local time the run finished
    pub timestamp: String,
}

/// Aggregated statistics for an algorithm
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlgorithmStatistics {
    pub algorithm: String,
    pub runs: usize,
    pub best_length: f64,
    pub worst_length: f64,
    pub mean_length: f64,
    /// Sample standard deviation, 0 for a single run
    pub std_length: f64,
    pub mean_time_ms: f64,
}

/// Comparison configuration
#[derive(Debug, Clone)]
pub struct CompareConfig {
    /// Algorithms to run, in order
    pub algorithms: Vec<Algorithm>,
    /// Runs per stochastic algorithm; deterministic ones run once
    pub runs: usize,
    /// Shared solver parameters; a seed `s` becomes `s + run`
    pub run_config: RunConfig,
    /// Spread repeated runs over the rayon pool
    pub parallel: bool,
}

impl Default for CompareConfig {
    fn default() -> Self {
        CompareConfig {
            algorithms: Algorithm::ALL.to_vec(),
            runs: 1,
            run_config: RunConfig::default(),
            parallel: true,
        }
    }
}

/// Comparison engine
pub struct Comparison {
    config: CompareConfig,
    records: Vec<RunRecord>,
    skipped: Vec<Algorithm>,
}

impl Comparison {
    pub fn new(config: CompareConfig) -> Self {
        Comparison {
            config,
            records: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Run every configured algorithm on `points`
    pub fn run(&mut self, points: &[Point]) -> Result<()> {
        self.config.run_config.schedule.validate()?;
        log::info!("Comparing {} algorithms on {} points", self.config.algorithms.len(), points.len());

        for algorithm in self.config.algorithms.clone() {
            if algorithm == Algorithm::BruteForce {
                if let Some(limit) = self.config.run_config.exhaustive_limit {
                    if points.len() > limit {
                        log::warn!("Skipping {}: {} points exceeds the limit of {}", algorithm, points.len(), limit);
                        self.skipped.push(algorithm);
                        continue;
                    }
                }
            }

            let runs = if algorithm.is_stochastic() { self.config.runs.max(1) } else { 1 };
            let config = &self.config.run_config;
            let mut records: Vec<RunRecord> = if self.config.parallel && runs > 1 {
                (0..runs)
                    .into_par_iter()
                    .map(|run| run_once(algorithm, config, points, run))
                    .collect::<Result<Vec<_>>>()?
            } else {
                (0..runs)
                    .map(|run| run_once(algorithm, config, points, run))
                    .collect::<Result<Vec<_>>>()?
            };

            self.records.append(&mut records);
        }

        Ok(())
    }

    /// Shortest run overall
    pub fn best(&self) -> Option<&RunRecord> {
        self.records
            .iter()
            .min_by(|a, b| a.length.total_cmp(&b.length))
    }

    /// Compute statistics for each algorithm, shortest mean length first
    pub fn compute_statistics(&self) -> Vec<AlgorithmStatistics> {
        let mut grouped: HashMap<&str, Vec<&RunRecord>> = HashMap::new();
        for record in &self.records {
            grouped.entry(record.algorithm.as_str()).or_default().push(record);
        }

        let mut statistics: Vec<AlgorithmStatistics> = grouped
            .into_iter()
            .map(|(algorithm, records)| {
                let lengths: Vec<f64> = records.iter().map(|r| r.length).collect();
                let times: Vec<f64> = records.iter().map(|r| r.time_ms).collect();
                let std_length = if lengths.len() > 1 { lengths.iter().std_dev() } else { 0.0 };

                AlgorithmStatistics {
                    algorithm: algorithm.to_string(),
                    runs: records.len(),
                    best_length: lengths.iter().cloned().fold(f64::INFINITY, f64::min),
                    worst_length: lengths.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
                    mean_length: lengths.iter().mean(),
                    std_length,
                    mean_time_ms: times.iter().mean(),
                }
            })
            .collect();

        statistics.sort_by(|a, b| a.mean_length.total_cmp(&b.mean_length));
        statistics
    }

    /// Export every run to CSV
    pub fn export_to_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = csv::Writer::from_writer(file);

        for record in &self.records {
            writer.serialize(record)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Export per-algorithm statistics to CSV
    pub fn export_statistics_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = csv::Writer::from_writer(file);

        for stat in self.compute_statistics() {
            writer.serialize(stat)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Generate summary report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();

        report.push_str("========================================\n");
        report.push_str("        TSP Algorithm Comparison\n");
        report.push_str("========================================\n\n");

        report.push_str(&format!(
            "{:<30} {:>6} {:>12} {:>12} {:>10} {:>12}\n",
            "Algorithm", "Runs", "Best", "Mean", "Std", "Mean Time"
        ));
        report.push_str("-".repeat(86).as_str());
        report.push('\n');

        for stat in self.compute_statistics() {
            report.push_str(&format!(
                "{:<30} {:>6} {:>12.2} {:>12.2} {:>10.2} {:>12}\n",
                stat.algorithm,
                stat.runs,
                stat.best_length,
                stat.mean_length,
                stat.std_length,
                format_time(stat.mean_time_ms)
            ));
        }

        report.push_str("-".repeat(86).as_str());
        report.push('\n');

        for algorithm in &self.skipped {
            report.push_str(&format!("Skipped {}: too many points for exhaustive search\n", algorithm));
        }

        if let Some(best) = self.best() {
            report.push_str(&format!("\nBest: {} ({:.2})\n", best.algorithm, best.length));
        }

        report
    }

    pub fn records(&self) -> &[RunRecord] {
        &self.records
    }

    pub fn skipped(&self) -> &[Algorithm] {
        &self.skipped
    }
}

fn run_once(algorithm: Algorithm, config: &RunConfig, points: &[Point], run: usize) -> Result<RunRecord> {
    let seed = config.seed.map(|s| s.wrapping_add(run as u64));
    let run_config = RunConfig {
        seed,
        ..config.clone()
    };
    let solver = algorithm.build(&run_config);
    let owned = points.to_vec();

    let mut sink = NullSink;
    let mut pacer = NoPacing;
    let mut progress = Progress::new(&mut sink, &mut pacer, config.step_delay);

    let start = Instant::now();
    let tour = solver.solve(&owned, &mut progress)?;
    let time_ms = start.elapsed().as_secs_f64() * 1000.0;

    log::debug!("{} run {}: length {:.4} in {:.1} ms", algorithm, run, tour.length(), time_ms);

    Ok(RunRecord {
        algorithm: algorithm.label().to_string(),
        run,
        seed: if algorithm.is_stochastic() { seed } else { None },
        points: points.len(),
        length: tour.length(),
        time_ms,
        events: progress.emitted(),
        timestamp: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    })
}

/// `850ms` below a second, `1.25s` above
pub fn format_time(ms: f64) -> String {
    if ms < 1000.0 {
        format!("{}ms", ms.round())
    } else {
        format!("{:.2}s", ms / 1000.0)
    }
}
