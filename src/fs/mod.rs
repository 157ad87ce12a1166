// src/fs/mod.rs

use std::fmt::Debug;
use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

pub mod mock;

/// Abstract filesystem interface.
///
/// Methods return `std::io::Result` so callers can tell a vanished file
/// (`ErrorKind::NotFound`) apart from other failures.
pub trait FileSystem: Send + Sync + Debug {
    /// Read a whole file as text. Invalid UTF-8 is replaced, not rejected.
    fn read_text(&self, path: &Path) -> io::Result<String>;

    fn is_dir(&self, path: &Path) -> bool;

    /// Return the names of the regular files directly inside `dir`
    /// (non-recursive), including symlinks to regular files. Names only,
    /// not full paths.
    fn list_files(&self, dir: &Path) -> io::Result<Vec<String>>;
}

/// Implementation that uses `std::fs`.
#[derive(Debug, Clone, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_text(&self, path: &Path) -> io::Result<String> {
        let bytes = fs::read(path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_files(&self, dir: &Path) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            // An entry that disappears between readdir and stat is simply
            // not part of this listing.
            let file_type = match entry.file_type() {
                Ok(ft) => ft,
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(e),
            };
            // Symlinks count when their target is a regular file.
            let is_file = if file_type.is_symlink() {
                entry.path().is_file()
            } else {
                file_type.is_file()
            };
            if !is_file {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(raw) => debug!(name = ?raw, "skipping non UTF-8 file name"),
            }
        }
        Ok(names)
    }
}
