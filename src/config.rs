//! Configuration and CLI argument handling

use std::path::PathBuf;
use clap::Parser;

use crate::{
    state::DEFAULT_SAVE_EVERY_SECS,
    store::{FileStore, MemoryStore, TimeStore},
};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "time-timer")]
#[command(about = "A personal stopwatch service that tracks today's active time")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// File holding today's accrued time (defaults to the platform data directory)
    #[arg(long, value_name = "PATH")]
    pub state_file: Option<PathBuf>,

    /// Keep today's time in memory only; nothing survives a restart
    #[arg(long, conflicts_with = "state_file")]
    pub in_memory: bool,

    /// Save while running whenever the elapsed seconds are a multiple of this
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_SAVE_EVERY_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub save_every: u64,

    /// Also save on graceful shutdown (by default only pauses and periodic saves persist)
    #[arg(long)]
    pub save_on_exit: bool,

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

    /// Resolved state file path, `None` when running in memory
    pub fn state_path(&self) -> Option<PathBuf> {
        if self.in_memory {
            None
        } else {
            Some(self.state_file.clone().unwrap_or_else(FileStore::default_path))
        }
    }

    /// Build the persistence store selected by the flags
    pub fn build_store(&self) -> Box<dyn TimeStore> {
        match self.state_path() {
            Some(path) => Box::new(FileStore::with_path(path)),
            None => Box::new(MemoryStore::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["time-timer"]).unwrap();
        assert_eq!(config.port, 20554);
        assert_eq!(config.address(), "127.0.0.1:20554");
        assert_eq!(config.save_every, 15);
        assert!(!config.save_on_exit);
        assert_eq!(config.log_level(), "info");
        assert!(config.state_path().is_some());
    }

    #[test]
    fn explicit_state_file_wins() {
        let config =
            Config::try_parse_from(["time-timer", "--state-file", "/tmp/t.json", "-v"]).unwrap();
        assert_eq!(config.state_path(), Some(PathBuf::from("/tmp/t.json")));
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn in_memory_has_no_path() {
        let config = Config::try_parse_from(["time-timer", "--in-memory"]).unwrap();
        assert_eq!(config.state_path(), None);
    }

    #[test]
    fn zero_save_interval_is_rejected() {
        assert!(Config::try_parse_from(["time-timer", "--save-every", "0"]).is_err());
    }

    #[test]
    fn in_memory_conflicts_with_state_file() {
        assert!(
            Config::try_parse_from(["time-timer", "--in-memory", "--state-file", "x.json"]).is_err()
        );
    }
}
