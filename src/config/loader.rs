// src/config/loader.rs

use std::fs;
use std::path::Path;

use crate::cli::CliArgs;
use crate::config::model::{RawConfigFile, RawWatchSection, WatchConfig};
use crate::config::validate::check_directory;
use crate::errors::Result;
use crate::fs::FileSystem;

/// Load a configuration file from a given path and return the raw
/// `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Merge the optional config file with the CLI arguments.
///
/// CLI values win over values from the file.
pub fn resolve_raw(args: &CliArgs) -> Result<RawWatchSection> {
    let base = match &args.config {
        Some(path) => load_from_path(path)?.watch,
        None => RawWatchSection::default(),
    };
    Ok(base.overlay(args.watch_overrides()))
}

/// Resolve the effective configuration and validate it.
///
/// This is the recommended entry point for the rest of the application:
///
/// - Reads the TOML file (if `--config` was given).
/// - Overlays CLI values.
/// - Applies defaults and checks field invariants (`WatchConfig::try_from`).
/// - Checks that the directory exists and can be listed.
///
/// Every failure here is a startup error; the poll loop is never entered.
pub fn load_and_validate(args: &CliArgs, fs: &dyn FileSystem) -> Result<WatchConfig> {
    let raw = resolve_raw(args)?;
    let config = WatchConfig::try_from(raw)?;
    check_directory(fs, config.dir())?;
    Ok(config)
}
