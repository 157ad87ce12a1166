// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::model::RawWatchSection;
use crate::types::TruncationPolicy;

/// Command-line arguments for `dirwatcher`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "dirwatcher",
    version,
    about = "Watch a directory for text files and report lines containing a magic string.",
    long_about = None
)]
pub struct CliArgs {
    /// Directory to watch (non-recursive).
    ///
    /// Required unless `[watch].dir` is set in the config file.
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Literal, case-sensitive string to search for.
    ///
    /// Required unless `[watch].magic` is set in the config file.
    #[arg(value_name = "MAGIC")]
    pub magic: Option<String>,

    /// File extension to watch (repeatable), e.g. `-e .txt -e .log`.
    ///
    /// Default: `.txt` and `.md`.
    #[arg(short = 'e', long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Seconds between polls. Must be greater than zero.
    #[arg(short, long, value_name = "SECS", allow_negative_numbers = true)]
    pub interval: Option<i64>,

    /// Optional TOML config file. CLI values override values from the file.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// What to do when a tracked file shrinks (`reset` or `clamp`).
    #[arg(long, value_name = "POLICY")]
    pub on_truncate: Option<TruncationPolicy>,

    /// Run a single poll cycle and exit.
    #[arg(long)]
    pub once: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `DIRWATCHER_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Resolve + validate the configuration, print it, but don't watch.
    #[arg(long)]
    pub dry_run: bool,
}

impl CliArgs {
    /// The subset of arguments that overlay the `[watch]` config section.
    pub fn watch_overrides(&self) -> RawWatchSection {
        RawWatchSection {
            dir: self.path.clone(),
            magic: self.magic.clone(),
            extensions: if self.extensions.is_empty() {
                None
            } else {
                Some(self.extensions.clone())
            },
            interval: self.interval,
            on_truncate: self.on_truncate,
        }
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
