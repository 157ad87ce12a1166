// src/watch/patterns.rs

use std::fmt;

/// Accepted file extensions for newly discovered files.
///
/// Matching is a plain, case-sensitive suffix test on the file name:
/// `notes.txt` matches `.txt`, `NOTES.TXT` does not.
#[derive(Clone, PartialEq, Eq)]
pub struct ExtensionFilter {
    extensions: Vec<String>,
}

impl fmt::Debug for ExtensionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.extensions).finish()
    }
}

impl ExtensionFilter {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extensions: extensions.into_iter().map(Into::into).collect(),
        }
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Returns true if `file_name` ends with one of the accepted extensions.
    pub fn matches(&self, file_name: &str) -> bool {
        self.extensions
            .iter()
            .any(|ext| file_name.ends_with(ext.as_str()))
    }
}
