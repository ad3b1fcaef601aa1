//! Corpus access abstraction.
//!
//! The resolver never touches the filesystem directly; it goes through a
//! [`CorpusAccessor`] so the lookup logic can be unit-tested against an
//! in-memory corpus. [`FsCorpus`] is the production implementation backed by
//! three root directories, one per content kind.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::meta::ContentKind;

/// Errors raised by corpus access.
#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("failed to list corpus directory {root}: {source}")]
    List {
        root: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read corpus file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Read-only view of a content corpus.
pub trait CorpusAccessor: Send + Sync {
    /// All files under the root for `kind`. A missing root yields an empty
    /// list rather than an error.
    fn list_files(&self, kind: ContentKind) -> Result<Vec<PathBuf>, CorpusError>;

    /// Text contents of a file previously returned by [`Self::list_files`].
    fn read_file(&self, path: &Path) -> Result<String, CorpusError>;
}

/// Filesystem-backed corpus. Discovery is recursive for every kind, so
/// vocabulary entries may be organized in subdirectories.
#[derive(Debug, Clone)]
pub struct FsCorpus {
    content_dir: PathBuf,
}

impl FsCorpus {
    /// Create a corpus rooted at `content_dir`, expecting `vocabulary/`,
    /// `styles/`, and `pages/` subdirectories.
    pub fn new(content_dir: impl Into<PathBuf>) -> Self {
        Self {
            content_dir: content_dir.into(),
        }
    }

    /// Root directory for a content kind.
    pub fn root(&self, kind: ContentKind) -> PathBuf {
        self.content_dir.join(kind.dir_name())
    }
}

impl CorpusAccessor for FsCorpus {
    fn list_files(&self, kind: ContentKind) -> Result<Vec<PathBuf>, CorpusError> {
        let root = self.root(kind);
        if !root.exists() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&root).follow_links(true) {
            let entry = entry.map_err(|e| CorpusError::List {
                root: root.clone(),
                source: e.into(),
            })?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }

        // Deterministic enumeration order across platforms.
        files.sort();
        Ok(files)
    }

    fn read_file(&self, path: &Path) -> Result<String, CorpusError> {
        fs::read_to_string(path).map_err(|e| CorpusError::Read {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// In-memory corpus for tests.
#[derive(Debug, Default)]
pub struct MemoryCorpus {
    files: HashMap<ContentKind, BTreeMap<PathBuf, String>>,
}

impl MemoryCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a file under the given kind. Paths may contain directory
    /// components to mimic a nested corpus.
    pub fn insert(
        &mut self,
        kind: ContentKind,
        path: impl Into<PathBuf>,
        contents: impl Into<String>,
    ) {
        self.files
            .entry(kind)
            .or_default()
            .insert(path.into(), contents.into());
    }
}

impl CorpusAccessor for MemoryCorpus {
    fn list_files(&self, kind: ContentKind) -> Result<Vec<PathBuf>, CorpusError> {
        Ok(self
            .files
            .get(&kind)
            .map(|m| m.keys().cloned().collect())
            .unwrap_or_default())
    }

    fn read_file(&self, path: &Path) -> Result<String, CorpusError> {
        self.files
            .values()
            .find_map(|m| m.get(path))
            .cloned()
            .ok_or_else(|| CorpusError::Read {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such corpus file"),
            })
    }
}
