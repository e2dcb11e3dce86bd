//! filesystem access used while scanning layer directories
//!
//! Resolution only needs existence checks and path joining. Reading is used by
//! the [crate::loader] once a candidate has been picked.
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub trait FileSystem {
    /// `true` if `path` is an existing file
    fn exists(&self, path: &Path) -> bool;

    fn join(&self, directory: &Path, name: &str) -> PathBuf {
        directory.join(name)
    }

    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;
}

/// The real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }
}

/// Files held in memory, keyed by their full path
///
/// Useful for tests and for templates bundled into an application.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    files: HashMap<PathBuf, String>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, path: impl Into<PathBuf>, contents: impl Into<String>) -> &mut Self {
        self.files.insert(path.into(), contents.into());
        self
    }

    pub fn with_files(
        files: impl IntoIterator<Item = (impl Into<PathBuf>, impl Into<String>)>,
    ) -> Self {
        let mut fs = Self::new();
        for (path, contents) in files {
            fs.add(path, contents);
        }
        fs
    }
}

impl FileSystem for MemoryFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        self.files.get(path).cloned().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            )
        })
    }
}
