use std::env;
use std::str::FromStr;
use std::time::Duration;

use strum::EnumString;
use thiserror::Error;

use labyrinth::bench::DEFAULT_SIZES;

pub const MIN_SIDE: usize = 5;
pub const MAX_SIDE: usize = 50;
pub const DEFAULT_SIDE: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{key} must be a non-negative whole number, got '{value}'")]
    InvalidNumber { key: &'static str, value: String },
    #[error("REPORT_FORMAT must be 'text' or 'json', got '{0}'")]
    InvalidFormat(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub width: usize,
    pub height: usize,
    pub seed: Option<u64>,
    pub animation_speed: Option<u64>,
    pub bench_sizes: Vec<usize>,
    pub format: ReportFormat,
}

impl Config {
    /// Reads the process environment, after loading a `.env` file if one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let width = parse(&lookup, "MAZE_WIDTH")?.unwrap_or(DEFAULT_SIDE);
        let height = parse(&lookup, "MAZE_HEIGHT")?.unwrap_or(DEFAULT_SIDE);
        let seed = parse(&lookup, "MAZE_SEED")?;
        let animation_speed = parse(&lookup, "ANIMATION_SPEED")?.map(|speed: u64| speed.clamp(1, 100));

        let bench_sizes = match lookup("BENCH_SIZES") {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(|item| number("BENCH_SIZES", item).map(clamp_side))
                .collect::<Result<Vec<usize>, _>>()?,
            None => DEFAULT_SIZES.to_vec(),
        };

        let format = match lookup("REPORT_FORMAT") {
            Some(value) => ReportFormat::from_str(value.trim())
                .map_err(|_| ConfigError::InvalidFormat(value))?,
            None => ReportFormat::default(),
        };

        Ok(Config {
            width: clamp_side(width),
            height: clamp_side(height),
            seed,
            animation_speed,
            bench_sizes,
            format,
        })
    }

    /// Pause after each solver event; `None` when animation is off.
    pub fn step_delay(&self) -> Option<Duration> {
        self.animation_speed
            .map(|speed| Duration::from_millis(100u64.saturating_sub(speed).max(1)))
    }
}

// The recursive solvers go one call deeper per cell on the current branch.
fn clamp_side(side: usize) -> usize {
    side.clamp(MIN_SIDE, MAX_SIDE)
}

fn parse<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError> {
    lookup(key)
        .map(|value| number(key, value.trim()))
        .transpose()
}

fn number<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidNumber {
        key,
        value: value.to_string(),
    })
}
