// src/engine/state.rs

use std::collections::BTreeMap;

use crate::engine::FileName;

/// Tracked files and the number of lines already scanned in each.
///
/// Offsets only move forward for a given entry. The ways an offset goes
/// back to 0 are removing the entry and tracking the name again, or a
/// `reset` truncation, which is handled as exactly that.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WatchState {
    tracked: BTreeMap<FileName, usize>,
}

impl WatchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tracked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracked.is_empty()
    }

    pub fn contains(&self, file: &str) -> bool {
        self.tracked.contains_key(file)
    }

    pub fn offset(&self, file: &str) -> Option<usize> {
        self.tracked.get(file).copied()
    }

    /// Tracked names in sorted order.
    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.tracked.keys().map(String::as_str)
    }

    /// Start tracking `file` at offset 0. Returns false if already tracked.
    pub fn track(&mut self, file: FileName) -> bool {
        if self.tracked.contains_key(&file) {
            return false;
        }
        self.tracked.insert(file, 0);
        true
    }

    /// Stop tracking `file`, returning its last offset.
    pub fn untrack(&mut self, file: &str) -> Option<usize> {
        self.tracked.remove(file)
    }

    /// Store the line count reached by a completed scan.
    ///
    /// Returns false if `file` is not tracked.
    pub(crate) fn record_scan(&mut self, file: &str, total_lines: usize) -> bool {
        match self.tracked.get_mut(file) {
            Some(offset) => {
                *offset = total_lines;
                true
            }
            None => false,
        }
    }
}
