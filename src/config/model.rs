// src/config/model.rs

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::types::TruncationPolicy;

/// Poll interval used when neither the CLI nor the config file set one.
pub const DEFAULT_INTERVAL_SECS: u64 = 5;

/// Extensions watched when neither the CLI nor the config file set any.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".txt", ".md"];

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// [watch]
/// dir = "/var/drop"
/// magic = "ERROR"
/// extensions = [".txt", ".log"]
/// interval = 5
/// on_truncate = "reset"
/// ```
///
/// Every field is optional here; required values may come from the CLI
/// instead. See [`RawWatchSection::overlay`].
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub watch: RawWatchSection,
}

/// `[watch]` section, before validation.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RawWatchSection {
    /// Directory to watch.
    #[serde(default)]
    pub dir: Option<PathBuf>,

    /// Literal string to search for.
    #[serde(default)]
    pub magic: Option<String>,

    /// Accepted file extensions (`.txt` or `txt`).
    #[serde(default)]
    pub extensions: Option<Vec<String>>,

    /// Poll interval in seconds. Signed so that non-positive values can be
    /// rejected with a proper message rather than a parse error.
    #[serde(default)]
    pub interval: Option<i64>,

    /// Behaviour for shrunk files.
    #[serde(default)]
    pub on_truncate: Option<TruncationPolicy>,
}

impl RawWatchSection {
    /// Layer `top` over `self`: every field set in `top` wins.
    pub fn overlay(self, top: RawWatchSection) -> RawWatchSection {
        RawWatchSection {
            dir: top.dir.or(self.dir),
            magic: top.magic.or(self.magic),
            extensions: top.extensions.or(self.extensions),
            interval: top.interval.or(self.interval),
            on_truncate: top.on_truncate.or(self.on_truncate),
        }
    }
}

/// Validated watch configuration, read-only to the engine.
///
/// Only constructible through `TryFrom<RawWatchSection>` (see
/// `validate.rs`), so holding one means the invariants below hold:
/// - `magic` is non-empty
/// - `extensions` is non-empty and every entry starts with `.`
/// - `interval` is at least one second
#[derive(Debug, Clone, PartialEq)]
pub struct WatchConfig {
    dir: PathBuf,
    magic: String,
    extensions: Vec<String>,
    interval: Duration,
    on_truncate: TruncationPolicy,
}

impl WatchConfig {
    pub(crate) fn new_unchecked(
        dir: PathBuf,
        magic: String,
        extensions: Vec<String>,
        interval: Duration,
        on_truncate: TruncationPolicy,
    ) -> Self {
        Self {
            dir,
            magic,
            extensions,
            interval,
            on_truncate,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn magic(&self) -> &str {
        &self.magic
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn on_truncate(&self) -> TruncationPolicy {
        self.on_truncate
    }
}
