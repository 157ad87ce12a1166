// src/watch/scanner.rs

//! Incremental scanning of a single tracked file.
//!
//! A "line" is whatever [`str::lines`] yields: every `\n`-terminated segment
//! (with an optional trailing `\r` stripped) plus a final unterminated
//! segment if it is non-empty. Counting and scanning both walk that same
//! iterator, so a stored offset always lines up with the next line to scan.

use std::io;
use std::path::Path;

use crate::fs::FileSystem;
use crate::types::TruncationPolicy;

/// Number of lines in `text`, as used for offsets.
pub fn count_lines(text: &str) -> usize {
    text.lines().count()
}

/// Result of scanning one file's content from a stored offset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    /// 1-based line numbers of newly scanned lines containing the magic string.
    pub matches: Vec<usize>,
    /// Total line count of the content; the new stored offset.
    pub total_lines: usize,
    /// Set to the old offset when the content had fewer lines than it.
    pub truncated_from: Option<usize>,
}

/// Scan `text` for `magic`, skipping the first `offset` lines.
pub fn scan_text(text: &str, offset: usize, magic: &str, policy: TruncationPolicy) -> ScanResult {
    let total_lines = count_lines(text);

    let (start, truncated_from) = if total_lines < offset {
        let start = match policy {
            TruncationPolicy::Reset => 0,
            TruncationPolicy::Clamp => total_lines,
        };
        (start, Some(offset))
    } else {
        (offset, None)
    };

    let matches = text
        .lines()
        .enumerate()
        .skip(start)
        .filter(|(_, line)| line.contains(magic))
        .map(|(idx, _)| idx + 1)
        .collect();

    ScanResult {
        matches,
        total_lines,
        truncated_from,
    }
}

/// Outcome of trying to scan a file on disk.
#[derive(Debug)]
pub enum ScanOutcome {
    Scanned(ScanResult),
    /// The file no longer exists; it should be dropped, not retried.
    Gone,
    /// Any other read failure; the stored offset must be kept.
    Failed(io::Error),
}

/// Read `path` through `fs` and scan it from `offset`.
///
/// The file is read completely and released before this returns.
pub fn scan_file(
    fs: &dyn FileSystem,
    path: &Path,
    offset: usize,
    magic: &str,
    policy: TruncationPolicy,
) -> ScanOutcome {
    match fs.read_text(path) {
        Ok(text) => ScanOutcome::Scanned(scan_text(&text, offset, magic, policy)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => ScanOutcome::Gone,
        Err(e) => ScanOutcome::Failed(e),
    }
}
