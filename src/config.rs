//! Configuration and CLI argument handling

use std::{path::PathBuf, time::Duration};
use clap::Parser;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "workout-trainer")]
#[command(about = "Run timed workouts from a catalog over a small HTTP API")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20560")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// JSON catalog of exercises and workouts (defaults to the built-in 7 minute workout)
    #[arg(short, long)]
    pub catalog: Option<PathBuf>,

    /// Workout clock period in milliseconds
    #[arg(long, default_value = "1000", value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_millis: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["workout-trainer"]).unwrap();

        assert_eq!(config.address(), "0.0.0.0:20560");
        assert_eq!(config.tick_period(), Duration::from_secs(1));
        assert_eq!(config.log_level(), "info");
        assert!(config.catalog.is_none());
    }

    #[test]
    fn zero_tick_period_is_rejected() {
        assert!(Config::try_parse_from(["workout-trainer", "--tick-millis", "0"]).is_err());
    }

    #[test]
    fn verbose_enables_debug_logging() {
        let config = Config::try_parse_from(["workout-trainer", "-v", "-c", "catalog.json"]).unwrap();

        assert_eq!(config.log_level(), "debug");
        assert_eq!(config.catalog, Some(PathBuf::from("catalog.json")));
    }
}
