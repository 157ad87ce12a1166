// tests/real_fs.rs

mod common;
use crate::common::{WatchConfigBuilder, init_tracing};

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::sync::Arc;

use tempfile::TempDir;

use dirwatcher::engine::{CoreEngine, WatchEvent};
use dirwatcher::fs::{FileSystem, RealFileSystem};

#[test]
fn list_files_returns_regular_file_names_only() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.txt"), "x").unwrap();
    fs::write(dir.path().join("b.log"), "x").unwrap();
    fs::create_dir(dir.path().join("sub.txt")).unwrap();

    let mut names = RealFileSystem.list_files(dir.path()).unwrap();
    names.sort();
    assert_eq!(names, vec!["a.txt".to_string(), "b.log".to_string()]);
}

#[test]
fn list_files_on_missing_dir_is_not_found() {
    let dir = TempDir::new().unwrap();
    let err = RealFileSystem
        .list_files(&dir.path().join("missing"))
        .unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
}

#[test]
fn engine_follows_a_growing_file_on_disk() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("drop.txt");
    fs::write(&file, "hello\nworld").unwrap();

    let config = WatchConfigBuilder::new(dir.path(), "MAGIC").build();
    let mut core = CoreEngine::new(&config, Arc::new(RealFileSystem));

    let first = core.run_cycle();
    assert_eq!(
        first.events,
        vec![WatchEvent::FileAdded {
            file: "drop.txt".into()
        }]
    );
    assert_eq!(core.state().offset("drop.txt"), Some(2));

    let mut handle = OpenOptions::new().append(true).open(&file).unwrap();
    write!(handle, "\nMAGIC on three\nfour\n").unwrap();
    drop(handle);

    let second = core.run_cycle();
    assert_eq!(
        second.events,
        vec![WatchEvent::MagicFound {
            file: "drop.txt".into(),
            line: 3
        }]
    );
    assert_eq!(core.state().offset("drop.txt"), Some(4));

    fs::remove_file(&file).unwrap();
    let third = core.run_cycle();
    assert_eq!(
        third.events,
        vec![WatchEvent::FileRemoved {
            file: "drop.txt".into()
        }]
    );
    assert!(core.state().is_empty());
}

#[cfg(unix)]
#[test]
fn symlinked_files_are_listed_and_scanned() {
    init_tracing();
    let target_dir = TempDir::new().unwrap();
    let target = target_dir.path().join("real.txt");
    fs::write(&target, "ERROR\n").unwrap();

    let dir = TempDir::new().unwrap();
    std::os::unix::fs::symlink(&target, dir.path().join("link.txt")).unwrap();
    std::os::unix::fs::symlink(target_dir.path(), dir.path().join("dirlink.txt")).unwrap();

    let names = RealFileSystem.list_files(dir.path()).unwrap();
    assert_eq!(names, vec!["link.txt".to_string()]);

    let config = WatchConfigBuilder::new(dir.path(), "ERROR").build();
    let mut core = CoreEngine::new(&config, Arc::new(RealFileSystem));
    assert_eq!(
        core.run_cycle().events,
        vec![
            WatchEvent::FileAdded {
                file: "link.txt".into()
            },
            WatchEvent::MagicFound {
                file: "link.txt".into(),
                line: 1
            },
        ]
    );
}
