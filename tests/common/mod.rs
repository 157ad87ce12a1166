#![allow(dead_code)]

use std::sync::Arc;

use dirwatcher::config::WatchConfig;
use dirwatcher::engine::{CoreEngine, WatchEvent};
use dirwatcher::fs::FileSystem;
use dirwatcher::fs::mock::MockFileSystem;

pub use dirwatcher_test_utils::builders::WatchConfigBuilder;
pub use dirwatcher_test_utils::init_tracing;

pub const DIR: &str = "/watch";

/// Full mock path of a file inside the watched directory.
pub fn path(name: &str) -> String {
    format!("{DIR}/{name}")
}

/// A mock filesystem with an empty watched directory.
pub fn mock_dir() -> MockFileSystem {
    let fs = MockFileSystem::new();
    fs.add_dir(DIR);
    fs
}

/// Engine over `fs` watching `DIR` for `magic` with default settings.
pub fn engine(fs: &MockFileSystem, magic: &str) -> CoreEngine {
    engine_with(fs, WatchConfigBuilder::new(DIR, magic).build())
}

pub fn engine_with(fs: &MockFileSystem, config: WatchConfig) -> CoreEngine {
    CoreEngine::new(&config, Arc::new(fs.clone()))
}

pub fn added(name: &str) -> WatchEvent {
    WatchEvent::FileAdded {
        file: name.to_string(),
    }
}

pub fn removed(name: &str) -> WatchEvent {
    WatchEvent::FileRemoved {
        file: name.to_string(),
    }
}

pub fn found(name: &str, line: usize) -> WatchEvent {
    WatchEvent::MagicFound {
        file: name.to_string(),
        line,
    }
}

/// Lists fixed names and delegates reads to a mock, except that reading
/// `panic_on` panics.
#[derive(Debug)]
pub struct PanickingFs {
    pub inner: MockFileSystem,
    pub panic_on: String,
}

impl FileSystem for PanickingFs {
    fn read_text(&self, p: &std::path::Path) -> std::io::Result<String> {
        if p.file_name().and_then(|n| n.to_str()) == Some(self.panic_on.as_str()) {
            panic!("boom");
        }
        self.inner.read_text(p)
    }

    fn is_dir(&self, p: &std::path::Path) -> bool {
        self.inner.is_dir(p)
    }

    fn list_files(&self, dir: &std::path::Path) -> std::io::Result<Vec<String>> {
        self.inner.list_files(dir)
    }
}

/// Engine over a mock where reading `panic_on` panics.
pub fn panicking_engine(fs: &MockFileSystem, magic: &str, panic_on: &str) -> CoreEngine {
    let config = WatchConfigBuilder::new(DIR, magic).build();
    CoreEngine::new(
        &config,
        Arc::new(PanickingFs {
            inner: fs.clone(),
            panic_on: panic_on.to_string(),
        }),
    )
}
