// src/config/mod.rs

//! Configuration loading and validation for dirwatcher.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk and overlay CLI values (`loader.rs`).
//! - Validate invariants and check the watched directory (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, resolve_raw};
pub use model::{
    DEFAULT_EXTENSIONS, DEFAULT_INTERVAL_SECS, RawConfigFile, RawWatchSection, WatchConfig,
};
pub use validate::check_directory;
