// src/config/validate.rs

use std::path::Path;
use std::time::Duration;

use crate::config::model::{DEFAULT_EXTENSIONS, DEFAULT_INTERVAL_SECS, RawWatchSection, WatchConfig};
use crate::errors::{DirwatcherError, Result};
use crate::fs::FileSystem;

impl TryFrom<RawWatchSection> for WatchConfig {
    type Error = crate::errors::DirwatcherError;

    fn try_from(raw: RawWatchSection) -> std::result::Result<Self, Self::Error> {
        let dir = raw.dir.ok_or_else(|| {
            DirwatcherError::ConfigError(
                "a directory to watch is required (PATH argument or [watch].dir)".to_string(),
            )
        })?;

        let magic = validate_magic(raw.magic)?;
        let extensions = normalize_extensions(raw.extensions)?;
        let interval = validate_interval(raw.interval)?;

        Ok(WatchConfig::new_unchecked(
            dir,
            magic,
            extensions,
            interval,
            raw.on_truncate.unwrap_or_default(),
        ))
    }
}

fn validate_magic(magic: Option<String>) -> Result<String> {
    match magic {
        Some(m) if !m.is_empty() => Ok(m),
        Some(_) => Err(DirwatcherError::ConfigError(
            "magic string must not be empty".to_string(),
        )),
        None => Err(DirwatcherError::ConfigError(
            "a magic string is required (MAGIC argument or [watch].magic)".to_string(),
        )),
    }
}

fn validate_interval(interval: Option<i64>) -> Result<Duration> {
    match interval {
        None => Ok(Duration::from_secs(DEFAULT_INTERVAL_SECS)),
        Some(secs) if secs > 0 => Ok(Duration::from_secs(secs as u64)),
        Some(secs) => Err(DirwatcherError::ConfigError(format!(
            "poll interval must be > 0 seconds (got {secs})"
        ))),
    }
}

/// Apply the default set and give every extension a leading dot, so that
/// `txt` and `.txt` mean the same thing.
fn normalize_extensions(extensions: Option<Vec<String>>) -> Result<Vec<String>> {
    let extensions = match extensions {
        Some(list) if !list.is_empty() => list,
        _ => return Ok(DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect()),
    };

    let mut normalized: Vec<String> = Vec::with_capacity(extensions.len());
    for ext in extensions {
        let ext = ext.trim();
        if ext.is_empty() || ext == "." {
            return Err(DirwatcherError::ConfigError(
                "file extensions must not be empty".to_string(),
            ));
        }
        let ext = if ext.starts_with('.') {
            ext.to_string()
        } else {
            format!(".{ext}")
        };
        if !normalized.contains(&ext) {
            normalized.push(ext);
        }
    }
    Ok(normalized)
}

/// The watched directory must exist and be listable at startup.
pub fn check_directory(fs: &dyn FileSystem, dir: &Path) -> Result<()> {
    if !fs.is_dir(dir) {
        return Err(DirwatcherError::ConfigError(format!(
            "directory {:?} does not exist or is not a directory",
            dir
        )));
    }

    fs.list_files(dir).map_err(|e| {
        DirwatcherError::ConfigError(format!("directory {:?} is not readable: {e}", dir))
    })?;

    Ok(())
}
