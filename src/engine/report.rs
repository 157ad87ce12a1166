// src/engine/report.rs

//! Reporting sink for [`WatchEvent`]s.

use tracing::{error, info, warn};

use crate::engine::WatchEvent;

/// Append-only consumer of engine events.
///
/// Reporting is assumed to always succeed; the engine never retries.
pub trait ReportSink: Send {
    fn report(&mut self, event: &WatchEvent);
}

impl<S: ReportSink + ?Sized> ReportSink for Box<S> {
    fn report(&mut self, event: &WatchEvent) {
        (**self).report(event)
    }
}

/// Production sink: every event becomes a `tracing` record.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ReportSink for TracingSink {
    fn report(&mut self, event: &WatchEvent) {
        match event {
            WatchEvent::RunStarted { at } => {
                info!(started_at = %at.format("%Y-%m-%d %H:%M:%S%.3f"), "dirwatcher started");
            }
            WatchEvent::FileAdded { file } => {
                info!(file = %file, "watching new file");
            }
            WatchEvent::FileRemoved { file } => {
                info!(file = %file, "file removed; no longer watching");
            }
            WatchEvent::FileTruncated {
                file,
                previous,
                current,
            } => {
                warn!(file = %file, previous, current, "file shrank since last scan");
            }
            WatchEvent::MagicFound { file, line } => {
                info!(file = %file, line, "magic string found");
            }
            WatchEvent::ScanError {
                file,
                kind,
                message,
            } => {
                warn!(file = %file, ?kind, error = %message, "failed to scan file; will retry next cycle");
            }
            WatchEvent::CycleError { kind, message } => {
                error!(?kind, error = %message, "poll cycle failed");
            }
            WatchEvent::RunStopped { uptime } => {
                info!(
                    uptime = %format_uptime(*uptime),
                    uptime_secs = uptime.as_secs_f64(),
                    "dirwatcher stopped"
                );
            }
        }
    }
}

/// `HH:MM:SS.mmm`, hours unbounded.
pub fn format_uptime(uptime: std::time::Duration) -> String {
    let secs = uptime.as_secs();
    format!(
        "{:02}:{:02}:{:02}.{:03}",
        secs / 3600,
        (secs / 60) % 60,
        secs % 60,
        uptime.subsec_millis()
    )
}
