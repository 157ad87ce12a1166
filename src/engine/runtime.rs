// src/engine/runtime.rs

use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Duration;

use anyhow::anyhow;
use chrono::{DateTime, Local};
use tokio::time::Instant;
use tracing::{debug, info};

use crate::errors::Result;

use super::core::{CoreEngine, CycleReport, panic_message};
use super::report::ReportSink;
use super::stop::StopSignal;
use super::{RunPhase, RuntimeOptions, WatchEvent};

/// Start time of a run, read once at start and once at stop.
#[derive(Debug, Clone, Copy)]
pub struct RunStats {
    started_at: DateTime<Local>,
    started: Instant,
}

impl RunStats {
    pub fn start() -> Self {
        Self {
            started_at: Local::now(),
            started: Instant::now(),
        }
    }

    pub fn started_at(&self) -> DateTime<Local> {
        self.started_at
    }

    pub fn uptime(&self) -> Duration {
        self.started.elapsed()
    }
}

/// What a finished run looked like.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub started_at: DateTime<Local>,
    pub uptime: Duration,
    pub cycles: u64,
    pub matches: u64,
    pub phase: RunPhase,
}

/// Drives [`CoreEngine`] cycles on a fixed interval until a stop is
/// requested, forwarding every event to a [`ReportSink`].
///
/// This is a pure IO shell around `CoreEngine`: it owns the only handle to
/// the engine, so cycles never overlap and a stop request can only ever
/// cut a sleep short, never a cycle.
pub struct Runtime<S: ReportSink> {
    // Lent to the blocking pool for the duration of each cycle.
    core: Option<CoreEngine>,
    stop: StopSignal,
    sink: S,
    options: RuntimeOptions,
    phase: RunPhase,
}

impl<S: ReportSink> fmt::Debug for Runtime<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("core", &self.core)
            .field("options", &self.options)
            .field("phase", &self.phase)
            .finish_non_exhaustive()
    }
}

impl<S: ReportSink> Runtime<S> {
    pub fn new(core: CoreEngine, stop: StopSignal, sink: S, options: RuntimeOptions) -> Self {
        Self {
            core: Some(core),
            stop,
            sink,
            options,
            phase: RunPhase::Running,
        }
    }

    /// Main poll loop.
    ///
    /// - `Running`: check the stop flag, run a cycle, report its events,
    ///   then sleep (or wake early on a stop request).
    /// - `Stopping`: no more scans; report uptime.
    /// - `Stopped`: terminal, returned in the summary.
    pub async fn run(mut self) -> Result<RunSummary> {
        let stats = RunStats::start();
        self.sink.report(&WatchEvent::RunStarted {
            at: stats.started_at(),
        });
        info!(
            interval_secs = self.options.poll_interval.as_secs_f64(),
            "dirwatcher poll loop started"
        );

        let mut cycles: u64 = 0;
        let mut matches: u64 = 0;

        while self.phase == RunPhase::Running {
            if self.stop.is_requested() {
                self.transition(RunPhase::Stopping);
                break;
            }

            let report = self.run_cycle_blocking().await?;
            cycles += 1;
            matches += report.matches() as u64;
            for event in &report.events {
                self.sink.report(event);
            }

            if self.options.max_cycles.is_some_and(|max| cycles >= max) {
                debug!(cycles, "cycle limit reached");
                self.transition(RunPhase::Stopping);
                break;
            }

            tokio::select! {
                _ = tokio::time::sleep(self.options.poll_interval) => {}
                _ = self.stop.requested() => {
                    debug!("stop requested during sleep");
                    self.transition(RunPhase::Stopping);
                }
            }
        }

        let uptime = stats.uptime();
        self.sink.report(&WatchEvent::RunStopped { uptime });
        self.transition(RunPhase::Stopped);

        Ok(RunSummary {
            started_at: stats.started_at(),
            uptime,
            cycles,
            matches,
            phase: self.phase,
        })
    }

    /// Run one cycle on the blocking pool, since it does synchronous file
    /// IO. A panic that escapes the per-file guard (listing, reconcile) is
    /// reported as a cycle error and does not end the loop.
    async fn run_cycle_blocking(&mut self) -> Result<CycleReport> {
        let Some(mut core) = self.core.take() else {
            return Err(anyhow!("watch core unavailable after an aborted cycle").into());
        };

        let (core, report) = tokio::task::spawn_blocking(move || {
            let report = match catch_unwind(AssertUnwindSafe(|| core.run_cycle())) {
                Ok(report) => report,
                Err(payload) => CycleReport {
                    events: vec![WatchEvent::CycleError {
                        kind: std::io::ErrorKind::Other,
                        message: format!(
                            "unexpected failure during cycle: {}",
                            panic_message(payload.as_ref())
                        ),
                    }],
                },
            };
            (core, report)
        })
        .await
        .map_err(|e| anyhow!("poll cycle task aborted: {e}"))?;

        self.core = Some(core);
        Ok(report)
    }

    fn transition(&mut self, next: RunPhase) {
        debug!(from = ?self.phase, to = ?next, "poll loop phase change");
        self.phase = next;
    }
}
