// src/watch/mod.rs

//! Directory polling and incremental scanning.
//!
//! This module is responsible for:
//! - Deciding which directory entries qualify for tracking (`patterns`).
//! - Reconciling a fresh directory listing with the tracked set (`reconcile`).
//! - Scanning newly appended lines of a tracked file (`scanner`).
//!
//! It does **not** sleep, loop, or listen for signals; that is the
//! engine's job.

pub mod patterns;
pub mod reconcile;
pub mod scanner;

pub use patterns::ExtensionFilter;
pub use reconcile::{ReconcilePlan, plan_reconcile};
pub use scanner::{ScanOutcome, ScanResult, count_lines, scan_file, scan_text};
