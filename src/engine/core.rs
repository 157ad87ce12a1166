// src/engine/core.rs

//! Synchronous watch core.
//!
//! [`CoreEngine::run_cycle`] performs exactly one poll cycle:
//! 1. list the directory (a failed listing counts as an empty one),
//! 2. reconcile the tracked set against the listing,
//! 3. scan every tracked file from its stored offset.
//!
//! A panic while reading one file is contained to that file and reported
//! as a `ScanError`; events already produced in the cycle are kept.
//!
//! It owns the [`WatchState`] and returns the events produced, leaving
//! sleeping, signal handling and reporting to the async shell
//! (`engine::runtime::Runtime`). Everything goes through the
//! [`FileSystem`] trait, so the core can be tested without a real disk.

use std::any::Any;
use std::io;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::config::WatchConfig;
use crate::engine::state::WatchState;
use crate::engine::{FileName, WatchEvent};
use crate::fs::FileSystem;
use crate::types::TruncationPolicy;
use crate::watch::patterns::ExtensionFilter;
use crate::watch::reconcile::plan_reconcile;
use crate::watch::scanner::{ScanOutcome, scan_file};

/// Events produced by one cycle, in emission order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CycleReport {
    pub events: Vec<WatchEvent>,
}

impl CycleReport {
    /// Number of `MagicFound` events in this cycle.
    pub fn matches(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, WatchEvent::MagicFound { .. }))
            .count()
    }
}

/// Watch state plus everything needed to advance it by one cycle.
#[derive(Debug)]
pub struct CoreEngine {
    dir: PathBuf,
    magic: String,
    filter: ExtensionFilter,
    on_truncate: TruncationPolicy,
    fs: Arc<dyn FileSystem>,
    state: WatchState,
}

impl CoreEngine {
    pub fn new(config: &WatchConfig, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            dir: config.dir().to_path_buf(),
            magic: config.magic().to_string(),
            filter: ExtensionFilter::new(config.extensions().iter().cloned()),
            on_truncate: config.on_truncate(),
            fs,
            state: WatchState::new(),
        }
    }

    pub fn state(&self) -> &WatchState {
        &self.state
    }

    /// Run one reconcile + scan cycle.
    pub fn run_cycle(&mut self) -> CycleReport {
        let mut events = Vec::new();

        let listing = match self.fs.list_files(&self.dir) {
            Ok(names) => names,
            Err(e) => {
                events.push(WatchEvent::CycleError {
                    kind: e.kind(),
                    message: format!("listing {:?}: {e}", self.dir),
                });
                Vec::new()
            }
        };

        let plan = plan_reconcile(&self.state, &listing, &self.filter);
        events.extend(plan.apply(&mut self.state));

        // Snapshot the names first; scanning may drop entries that vanished.
        let files: Vec<FileName> = self.state.files().map(str::to_string).collect();
        for file in files {
            self.scan_one(file, &mut events);
        }

        debug!(
            tracked = self.state.len(),
            events = events.len(),
            "cycle complete"
        );

        CycleReport { events }
    }

    fn scan_one(&mut self, file: FileName, events: &mut Vec<WatchEvent>) {
        let Some(offset) = self.state.offset(&file) else {
            return;
        };

        // The read is the only part that can fail unexpectedly; state is
        // only touched once it has returned.
        let path = self.dir.join(&file);
        let read = catch_unwind(AssertUnwindSafe(|| {
            scan_file(self.fs.as_ref(), &path, offset, &self.magic, self.on_truncate)
        }));
        let outcome = match read {
            Ok(outcome) => outcome,
            Err(payload) => {
                events.push(WatchEvent::ScanError {
                    file,
                    kind: io::ErrorKind::Other,
                    message: format!(
                        "unexpected failure while scanning: {}",
                        panic_message(payload.as_ref())
                    ),
                });
                return;
            }
        };

        match outcome {
            ScanOutcome::Scanned(result) => {
                trace!(
                    file = %file,
                    offset,
                    total_lines = result.total_lines,
                    "scanned file"
                );
                if let Some(previous) = result.truncated_from {
                    events.push(WatchEvent::FileTruncated {
                        file: file.clone(),
                        previous,
                        current: result.total_lines,
                    });
                }
                for line in result.matches {
                    events.push(WatchEvent::MagicFound {
                        file: file.clone(),
                        line,
                    });
                }
                self.state.record_scan(&file, result.total_lines);
            }
            ScanOutcome::Gone => {
                self.state.untrack(&file);
                events.push(WatchEvent::FileRemoved { file });
            }
            ScanOutcome::Failed(e) => {
                events.push(scan_error(file, &e));
            }
        }
    }
}

/// Best-effort text of a panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

fn scan_error(file: FileName, e: &io::Error) -> WatchEvent {
    WatchEvent::ScanError {
        file,
        kind: e.kind(),
        message: e.to_string(),
    }
}
