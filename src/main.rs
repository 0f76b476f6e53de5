//! TSP Stream Solver - Command Line Interface
//!
//! Builds a point set, runs one solver with live progress or compares all of
//! them side by side.

use clap::{Args, Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tsp_stream_solver::cities::{city_points, VIETNAM_CITIES};
use tsp_stream_solver::compare::{format_time, CompareConfig, Comparison};
use tsp_stream_solver::config::{RunConfig, Schedule, EXHAUSTIVE_LIMIT};
use tsp_stream_solver::heuristics::Algorithm as Solver;
use tsp_stream_solver::points::{load_points, random_points, save_points, Point};
use tsp_stream_solver::progress::{CancelToken, Progress, ThreadPacer};
use tsp_stream_solver::tour::Tour;

use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Parser)]
#[command(name = "tsp-stream-solver")]
#[command(version = "1.0")]
#[command(about = "Travelling salesman solvers with live progress")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one algorithm and follow its progress
    Solve {
        #[command(flatten)]
        source: PointSource,

        /// Algorithm to use
        #[arg(short, long, value_enum, default_value = "nearest-neighbor")]
        algorithm: Algorithm,

        #[command(flatten)]
        params: SolverParams,

        /// Pause after every progress event, in milliseconds
        #[arg(long, default_value = "0")]
        delay_ms: u64,

        /// Stop the run after this many seconds and keep the best tour so far
        #[arg(short, long, value_parser = parse_seconds)]
        time_limit: Option<Duration>,

        /// Write the final tour and run details as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Run every algorithm on the same points and compare them
    Compare {
        #[command(flatten)]
        source: PointSource,

        #[command(flatten)]
        params: SolverParams,

        /// Runs per stochastic algorithm
        #[arg(short, long, default_value = "1")]
        runs: usize,

        /// Export every run to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Export per-algorithm statistics to this CSV file
        #[arg(long)]
        stats_csv: Option<PathBuf>,
    },

    /// List the built-in city catalog with projected coordinates
    Cities {
        #[arg(long, default_value = "800")]
        width: f64,

        #[arg(long, default_value = "600")]
        height: f64,

        /// Save the projected catalog as a JSON point file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args)]
struct PointSource {
    /// Point file (.json or .csv)
    #[arg(short, long, conflicts_with_all = ["random", "cities"])]
    points: Option<PathBuf>,

    /// Number of random points to generate
    #[arg(long)]
    random: Option<usize>,

    /// Use the first N catalog cities (all of them without a value)
    #[arg(long, num_args = 0..=1, default_missing_value = "0")]
    cities: Option<usize>,

    /// Plane width for random points and city projection
    #[arg(long, default_value = "800")]
    width: f64,

    /// Plane height for random points and city projection
    #[arg(long, default_value = "600")]
    height: f64,
}

#[derive(Args)]
struct SolverParams {
    /// Index of the fixed first point (clamped into range)
    #[arg(long, default_value = "0")]
    start: usize,

    /// Initial annealing temperature
    #[arg(long, default_value = "100")]
    initial_temp: f64,

    /// Cooling ratio applied after every temperature level
    #[arg(long, default_value = "0.99")]
    cooling_rate: f64,

    /// Random seed for random points and the stochastic solvers
    #[arg(short, long)]
    seed: Option<u64>,

    /// Let brute force run on any input size
    #[arg(long)]
    no_limit: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
enum Algorithm {
    /// Exhaustive search (exact, small inputs)
    Bruteforce,
    /// Nearest Neighbor construction
    NearestNeighbor,
    /// Cheapest Insertion construction
    CheapestInsertion,
    /// Simulated Annealing
    SimulatedAnnealing,
    /// Nearest Neighbor followed by Simulated Annealing
    Hybrid,
}

impl From<Algorithm> for Solver {
    fn from(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Bruteforce => Solver::BruteForce,
            Algorithm::NearestNeighbor => Solver::NearestNeighbor,
            Algorithm::CheapestInsertion => Solver::CheapestInsertion,
            Algorithm::SimulatedAnnealing => Solver::SimulatedAnnealing,
            Algorithm::Hybrid => Solver::Hybrid,
        }
    }
}

/// JSON written by `solve --output`
#[derive(Serialize)]
struct RunReport<'a> {
    algorithm: &'a str,
    config: &'a RunConfig,
    time_ms: f64,
    events: usize,
    tour: &'a Tour,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Solve { source, algorithm, params, delay_ms, time_limit, output, verbose } => {
            solve(&source, algorithm.into(), &params, delay_ms, time_limit, output, verbose);
        }

        Commands::Compare { source, params, runs, csv, stats_csv } => {
            compare(&source, &params, runs, csv, stats_csv);
        }

        Commands::Cities { width, height, output } => {
            list_cities(width, height, output);
        }
    }
}

/// Finite, non-negative seconds
fn parse_seconds(value: &str) -> Result<Duration, String> {
    let seconds: f64 = value.parse().map_err(|e| format!("{}", e))?;
    Duration::try_from_secs_f64(seconds).map_err(|_| format!("expected a finite, non-negative number of seconds, got {}", value))
}

fn load_source(source: &PointSource, seed: Option<u64>) -> Vec<Point> {
    let points = if let Some(path) = &source.points {
        match load_points(path) {
            Ok(points) => points,
            Err(e) => {
                eprintln!("Error loading points: {}", e);
                std::process::exit(1);
            }
        }
    } else if let Some(count) = source.cities {
        let count = if count == 0 { None } else { Some(count) };
        city_points(count, source.width, source.height)
    } else {
        let count = source.random.unwrap_or(10);
        random_points(count, source.width, source.height, seed.unwrap_or(42))
    };

    if points.len() < 2 {
        eprintln!("At least 2 points are needed, got {}", points.len());
        std::process::exit(1);
    }
    points
}

fn run_config(params: &SolverParams, delay_ms: u64) -> RunConfig {
    let config = RunConfig {
        start_index: params.start,
        step_delay: Duration::from_millis(delay_ms),
        schedule: Schedule::new(params.initial_temp, params.cooling_rate),
        seed: params.seed,
        exhaustive_limit: if params.no_limit { None } else { Some(EXHAUSTIVE_LIMIT) },
    };

    if let Err(e) = config.schedule.validate() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
    config
}

fn solve(
    source: &PointSource,
    algorithm: Solver,
    params: &SolverParams,
    delay_ms: u64,
    time_limit: Option<Duration>,
    output: Option<PathBuf>,
    verbose: bool,
) {
    let points = load_source(source, params.seed);
    let config = run_config(params, delay_ms);

    println!("Solving {} points with {}...", points.len(), algorithm);
    if verbose {
        println!("Configuration: {:?}", config);
    }

    let token = CancelToken::new();
    if let Some(limit) = time_limit {
        let timer = token.clone();
        std::thread::spawn(move || {
            std::thread::sleep(limit);
            timer.cancel();
        });
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );

    let mut sink = |tour: &Tour| {
        spinner.set_message(format!("{} points, length {:.2}", tour.len(), tour.length()));
        spinner.tick();
    };
    let mut pacer = ThreadPacer;
    let mut progress = Progress::new(&mut sink, &mut pacer, config.step_delay).with_cancel(token.clone());

    let solver = algorithm.build(&config);
    let start = Instant::now();
    let result = solver.solve(&points, &mut progress);
    let elapsed = start.elapsed();
    let events = progress.emitted();
    drop(progress);
    spinner.finish_and_clear();

    let tour = match result {
        Ok(tour) => tour,
        Err(e) => {
            eprintln!("Solver error: {}", e);
            std::process::exit(1);
        }
    };

    println!("\n========== Results ==========");
    println!("Algorithm: {}", algorithm);
    println!("Points: {}", points.len());
    println!("Length: {:.2}", tour.length());
    println!("Progress events: {}", events);
    println!("Time: {}", format_time(elapsed.as_secs_f64() * 1000.0));
    if token.is_cancelled() {
        println!("Stopped by time limit");
    }

    if verbose {
        println!("\n{}", tour);
    }

    if let Some(out_path) = output {
        let report = RunReport {
            algorithm: algorithm.label(),
            config: &config,
            time_ms: elapsed.as_secs_f64() * 1000.0,
            events,
            tour: &tour,
        };
        let written = serde_json::to_string_pretty(&report)
            .map_err(|e| e.to_string())
            .and_then(|json| std::fs::write(&out_path, json).map_err(|e| e.to_string()));
        match written {
            Ok(()) => println!("\nTour saved to {:?}", out_path),
            Err(e) => {
                eprintln!("Failed to write {:?}: {}", out_path, e);
                std::process::exit(1);
            }
        }
    }
}

fn compare(source: &PointSource, params: &SolverParams, runs: usize, csv: Option<PathBuf>, stats_csv: Option<PathBuf>) {
    let points = load_source(source, params.seed);
    let config = CompareConfig {
        runs,
        run_config: run_config(params, 0),
        ..Default::default()
    };

    println!("Comparing algorithms on {} points...", points.len());

    let mut comparison = Comparison::new(config);
    if let Err(e) = comparison.run(&points) {
        eprintln!("Comparison failed: {}", e);
        std::process::exit(1);
    }

    println!("\n{}", comparison.generate_report());

    if let Some(path) = csv {
        match comparison.export_to_csv(&path) {
            Ok(()) => println!("Runs exported to {:?}", path),
            Err(e) => eprintln!("Failed to export runs: {}", e),
        }
    }

    if let Some(path) = stats_csv {
        match comparison.export_statistics_csv(&path) {
            Ok(()) => println!("Statistics exported to {:?}", path),
            Err(e) => eprintln!("Failed to export statistics: {}", e),
        }
    }
}

fn list_cities(width: f64, height: f64, output: Option<PathBuf>) {
    let points = city_points(None, width, height);

    println!("{:<4} {:<22} {:>9} {:>9} {:>9} {:>9}", "#", "City", "Lat", "Lng", "X", "Y");
    for (i, (city, point)) in VIETNAM_CITIES.iter().zip(&points).enumerate() {
        println!(
            "{:<4} {:<22} {:>9.4} {:>9.4} {:>9.1} {:>9.1}",
            i, city.name, city.lat, city.lng, point.x, point.y
        );
    }

    if let Some(path) = output {
        match save_points(&path, &points) {
            Ok(()) => println!("\nCatalog saved to {:?}", path),
            Err(e) => {
                eprintln!("Failed to save catalog: {}", e);
                std::process::exit(1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_limit_must_be_finite_and_non_negative() {
        assert_eq!(parse_seconds("1.5"), Ok(Duration::from_millis(1500)));
        assert_eq!(parse_seconds("0"), Ok(Duration::ZERO));
        assert!(parse_seconds("inf").is_err());
        assert!(parse_seconds("NaN").is_err());
        assert!(parse_seconds("-2").is_err());
        assert!(parse_seconds("soon").is_err());

        assert!(Cli::try_parse_from(["tsp-stream-solver", "solve", "--time-limit", "inf"]).is_err());
        assert!(Cli::try_parse_from(["tsp-stream-solver", "solve", "--time-limit", "2"]).is_ok());
    }

    #[test]
    fn test_cities_plane_matches_point_source_default() {
        let cli = Cli::try_parse_from(["tsp-stream-solver", "cities"]).unwrap();
        let Commands::Cities { width, height, .. } = cli.command else {
            panic!("expected the cities command");
        };

        let cli = Cli::try_parse_from(["tsp-stream-solver", "solve", "--cities"]).unwrap();
        let Commands::Solve { source, .. } = cli.command else {
            panic!("expected the solve command");
        };
        assert_eq!((width, height), (source.width, source.height));
        assert_eq!((width, height), (800.0, 600.0));
        assert_eq!(source.cities, Some(0));
    }
}
