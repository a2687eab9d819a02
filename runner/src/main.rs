mod config;
mod report;

use std::process;

use rand::SeedableRng;
use rand::rngs::StdRng;
use strum::IntoEnumIterator;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::{Config, ReportFormat};
use labyrinth::{MazeError, Session, StepEvent, Strategy, bench};
use report::{JsonReport, Pacer};

#[derive(Debug, Error)]
enum RunError {
    #[error(transparent)]
    Maze(#[from] MazeError),
    #[error("failed to encode report: {0}")]
    Json(#[from] serde_json::Error),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: invalid configuration.");
            eprintln!("Details: {}.", e);
            process::exit(1);
        }
    };

    if let Err(e) = run(&config) {
        eprintln!("Error: {}.", e);
        process::exit(1);
    }
}

fn rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

fn run(config: &Config) -> Result<(), RunError> {
    info!(
        width = config.width,
        height = config.height,
        seed = ?config.seed,
        "building maze"
    );
    let mut session = Session::new(config.width, config.height, rng(config.seed))?;
    let text = config.format == ReportFormat::Text;

    if text {
        report::print_maze("Maze", session.grid());
    }

    for strategy in Strategy::iter() {
        let metrics = match config.step_delay() {
            Some(delay) if text => {
                println!("Running {strategy} search:");
                session.solve(strategy, &mut Pacer::new(delay))?
            }
            _ => session.solve(strategy, &mut |_: &StepEvent| {})?,
        };
        info!(%strategy, steps = metrics.steps_count, "solve complete");

        if text {
            report::print_maze(&format!("Path found by {strategy} search"), session.grid());
            report::print_metrics(&metrics);
        }
    }

    let comparison = session.comparison();
    if text {
        if let Some(comparison) = &comparison {
            report::print_comparison(comparison);
        }
        report::print_history(session.history(), config.step_delay().is_some());
    }

    info!(sizes = ?config.bench_sizes, "running benchmark");
    let mut bench_rng = rng(config.seed.map(|seed| seed.wrapping_add(1)));
    let samples = bench::run(&config.bench_sizes, &mut bench_rng)?;

    match config.format {
        ReportFormat::Text => report::print_benchmark(&samples),
        ReportFormat::Json => {
            let report = JsonReport {
                width: session.grid().width(),
                height: session.grid().height(),
                results: Strategy::iter()
                    .filter_map(|strategy| session.results().get(strategy).copied())
                    .collect(),
                comparison,
                history: Strategy::iter()
                    .map(|strategy| (strategy, session.history().summary(strategy)))
                    .collect(),
                path: session.last_path(),
                benchmark: &samples,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;

    #[test]
    fn seeded_rng_repeats_its_sequence() {
        let first: Vec<u32> = rng(Some(7)).random_iter().take(4).collect();
        let second: Vec<u32> = rng(Some(7)).random_iter().take(4).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn seeded_runs_build_the_same_maze() {
        let first = Session::new(9, 9, rng(Some(3))).unwrap();
        let second = Session::new(9, 9, rng(Some(3))).unwrap();
        assert_eq!(first.grid(), second.grid());
    }
}
