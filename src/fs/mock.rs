// src/fs/mock.rs

use super::FileSystem;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub enum MockEntry {
    File(Vec<u8>),
    Dir(Vec<String>), // List of child names
}

/// In-memory filesystem for tests.
///
/// Clones share the same underlying tree, so a test can keep one handle to
/// mutate files while the engine reads through another.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    files: Arc<Mutex<HashMap<PathBuf, MockEntry>>>,
    failures: Arc<Mutex<HashMap<PathBuf, io::ErrorKind>>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        let mut files = HashMap::new();
        // Ensure root exists
        files.insert(PathBuf::from("."), MockEntry::Dir(Vec::new()));

        Self {
            files: Arc::new(Mutex::new(files)),
            failures: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let mut files = self.files.lock().unwrap();
        self.ensure_dir_entry(&mut files, path.as_ref());
    }

    /// Create or overwrite a file.
    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        let path = path.as_ref().to_path_buf();
        let mut files = self.files.lock().unwrap();
        files.insert(path.clone(), MockEntry::File(content.into()));

        if let Some(parent) = path.parent() {
            let parent = if parent.as_os_str().is_empty() {
                Path::new(".")
            } else {
                parent
            };

            self.ensure_dir_entry(&mut files, parent);
            if let Some(MockEntry::Dir(children)) = files.get_mut(parent) {
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    if !children.contains(&name.to_string()) {
                        children.push(name.to_string());
                    }
                }
            }
        }
    }

    /// Append to a file, creating it if needed.
    pub fn append(&self, path: impl AsRef<Path>, content: impl AsRef<[u8]>) {
        let path = path.as_ref();
        let mut existing = match self.files.lock().unwrap().get(path) {
            Some(MockEntry::File(bytes)) => bytes.clone(),
            _ => Vec::new(),
        };
        existing.extend_from_slice(content.as_ref());
        self.add_file(path, existing);
    }

    /// Remove a file or directory entry (and its name from the parent).
    pub fn remove(&self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        let mut files = self.files.lock().unwrap();
        files.remove(path);

        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        if let (Some(MockEntry::Dir(children)), Some(name)) = (
            files.get_mut(parent),
            path.file_name().and_then(|n| n.to_str()),
        ) {
            children.retain(|c| c != name);
        }
    }

    /// Make every operation on `path` fail with `kind` until cleared.
    pub fn fail(&self, path: impl AsRef<Path>, kind: io::ErrorKind) {
        self.failures
            .lock()
            .unwrap()
            .insert(path.as_ref().to_path_buf(), kind);
    }

    pub fn clear_failure(&self, path: impl AsRef<Path>) {
        self.failures.lock().unwrap().remove(path.as_ref());
    }

    fn injected_failure(&self, path: &Path) -> Option<io::Error> {
        self.failures
            .lock()
            .unwrap()
            .get(path)
            .map(|kind| io::Error::new(*kind, format!("injected failure for {:?}", path)))
    }

    fn ensure_dir_entry(&self, files: &mut HashMap<PathBuf, MockEntry>, path: &Path) {
        if !files.contains_key(path) {
            files.insert(path.to_path_buf(), MockEntry::Dir(Vec::new()));
            if let Some(parent) = path.parent() {
                let parent = if parent.as_os_str().is_empty() {
                    Path::new(".")
                } else {
                    parent
                };

                if parent != path { // Avoid infinite loop at root
                    self.ensure_dir_entry(files, parent);
                    if let Some(MockEntry::Dir(children)) = files.get_mut(parent) {
                        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                            if !children.contains(&name.to_string()) {
                                children.push(name.to_string());
                            }
                        }
                    }
                }
            }
        }
    }
}

impl FileSystem for MockFileSystem {
    fn read_text(&self, path: &Path) -> io::Result<String> {
        if let Some(err) = self.injected_failure(path) {
            return Err(err);
        }
        let files = self.files.lock().unwrap();
        match files.get(path) {
            Some(MockEntry::File(content)) => Ok(String::from_utf8_lossy(content).into_owned()),
            Some(MockEntry::Dir(_)) => Err(io::Error::other(format!("Is a directory: {:?}", path))),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("File not found: {:?}", path),
            )),
        }
    }

    fn is_dir(&self, path: &Path) -> bool {
        let files = self.files.lock().unwrap();
        matches!(files.get(path), Some(MockEntry::Dir(_)))
    }

    fn list_files(&self, dir: &Path) -> io::Result<Vec<String>> {
        if let Some(err) = self.injected_failure(dir) {
            return Err(err);
        }
        let files = self.files.lock().unwrap();
        match files.get(dir) {
            Some(MockEntry::Dir(children)) => Ok(children
                .iter()
                .filter(|name| matches!(files.get(&dir.join(name)), Some(MockEntry::File(_))))
                .cloned()
                .collect()),
            Some(MockEntry::File(_)) => Err(io::Error::other(format!("Not a directory: {:?}", dir))),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Directory not found: {:?}", dir),
            )),
        }
    }
}
