use std::sync::{Arc, Mutex};

use dirwatcher::engine::{ReportSink, WatchEvent};

/// A sink that records every reported event.
///
/// Clones share the same buffer, so a test can keep one clone and hand the
/// other to a `Runtime`.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<WatchEvent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<WatchEvent> {
        self.events.lock().unwrap().clone()
    }

    /// `(file, line)` for every `MagicFound` so far.
    pub fn magic_found(&self) -> Vec<(String, usize)> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|e| match e {
                WatchEvent::MagicFound { file, line } => Some((file.clone(), *line)),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, pred: impl Fn(&WatchEvent) -> bool) -> usize {
        self.events.lock().unwrap().iter().filter(|e| pred(e)).count()
    }
}

impl ReportSink for RecordingSink {
    fn report(&mut self, event: &WatchEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
