// src/engine/mod.rs

//! Watch engine for dirwatcher.
//!
//! This module ties together:
//! - the tracked-file state ([`state`])
//! - one synchronous reconcile + scan cycle ([`core`])
//! - the reporting sink the cycle's events are forwarded to ([`report`])
//! - the cooperative stop flag and OS signal wiring ([`stop`])
//! - the async poll loop that sleeps between cycles ([`runtime`])
//!
//! The pure cycle logic lives in [`core`]; the async/IO shell is
//! implemented in [`runtime`].

use std::io;
use std::time::Duration;

use chrono::{DateTime, Local};

/// Tracked files are keyed by their name inside the watched directory.
pub type FileName = String;

/// Everything the engine reports, in the order it happened.
#[derive(Debug, Clone, PartialEq)]
pub enum WatchEvent {
    RunStarted {
        at: DateTime<Local>,
    },
    FileAdded {
        file: FileName,
    },
    FileRemoved {
        file: FileName,
    },
    /// A tracked file now has fewer lines than its stored offset.
    FileTruncated {
        file: FileName,
        previous: usize,
        current: usize,
    },
    MagicFound {
        file: FileName,
        line: usize,
    },
    ScanError {
        file: FileName,
        kind: io::ErrorKind,
        message: String,
    },
    /// A failure affecting a whole cycle (directory listing, unexpected panic).
    CycleError {
        kind: io::ErrorKind,
        message: String,
    },
    RunStopped {
        uptime: Duration,
    },
}

/// Lifecycle of the poll loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Running,
    Stopping,
    Stopped,
}

/// Options for the async poll loop.
#[derive(Debug, Clone, Copy)]
pub struct RuntimeOptions {
    /// Sleep between two cycles.
    pub poll_interval: Duration,
    /// Stop after this many cycles (used for `--once`). `None` runs until a
    /// stop is requested.
    pub max_cycles: Option<u64>,
}

pub mod core;
pub mod report;
pub mod runtime;
pub mod state;
pub mod stop;

pub use self::core::{CoreEngine, CycleReport};
pub use report::{ReportSink, TracingSink};
pub use runtime::{RunStats, RunSummary, Runtime};
pub use state::WatchState;
pub use stop::{StopHandle, StopSignal, install_signal_handlers, stop_channel};
