#![allow(dead_code)]

use std::path::Path;

use dirwatcher::config::{RawWatchSection, WatchConfig};
use dirwatcher::types::TruncationPolicy;

/// Builder for `WatchConfig` to simplify test setup.
///
/// Starts from a valid config watching `dir` for `magic`; every other field
/// falls back to the normal defaults unless set.
pub struct WatchConfigBuilder {
    raw: RawWatchSection,
}

impl WatchConfigBuilder {
    pub fn new(dir: impl AsRef<Path>, magic: &str) -> Self {
        Self {
            raw: RawWatchSection {
                dir: Some(dir.as_ref().to_path_buf()),
                magic: Some(magic.to_string()),
                ..RawWatchSection::default()
            },
        }
    }

    pub fn with_extension(mut self, ext: &str) -> Self {
        self.raw
            .extensions
            .get_or_insert_with(Vec::new)
            .push(ext.to_string());
        self
    }

    pub fn with_interval(mut self, secs: i64) -> Self {
        self.raw.interval = Some(secs);
        self
    }

    pub fn on_truncate(mut self, policy: TruncationPolicy) -> Self {
        self.raw.on_truncate = Some(policy);
        self
    }

    pub fn raw(self) -> RawWatchSection {
        self.raw
    }

    pub fn build(self) -> WatchConfig {
        WatchConfig::try_from(self.raw).expect("Failed to build valid config from builder")
    }
}
