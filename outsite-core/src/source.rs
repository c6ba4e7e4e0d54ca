//! Access to the exported document set.

use regex::Regex;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Export directory not found: {0:?}")]
    MissingRoot(PathBuf),

    #[error("Unknown document: {0}")]
    UnknownDocument(String),
}

/// One entry of the export: its storage key (with extension) and full text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    pub key: String,
    pub body: String,
}

/// A read-only set of documents addressed by key.
///
/// Bodies are only read on demand so callers can skip documents without
/// touching their content.
pub trait DocumentSource: Sync {
    /// All document keys, in sorted order
    fn keys(&self) -> Vec<String>;

    /// Full text of the document stored under `key`
    fn read(&self, key: &str) -> Result<String, SourceError>;

    /// Fetch a whole document, `None` when the key is not present
    fn get(&self, key: &str) -> Result<Option<RawDocument>, SourceError> {
        if !self.keys().iter().any(|k| k == key) {
            return Ok(None);
        }
        let body = self.read(key)?;
        Ok(Some(RawDocument {
            key: key.to_string(),
            body,
        }))
    }
}

/// Documents held in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: BTreeMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, body: impl Into<String>) {
        self.documents.insert(key.into(), body.into());
    }

    pub fn with(mut self, key: impl Into<String>, body: impl Into<String>) -> Self {
        self.insert(key, body);
        self
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl DocumentSource for MemorySource {
    fn keys(&self) -> Vec<String> {
        self.documents.keys().cloned().collect()
    }

    fn read(&self, key: &str) -> Result<String, SourceError> {
        self.documents
            .get(key)
            .cloned()
            .ok_or_else(|| SourceError::UnknownDocument(key.to_string()))
    }
}

/// An unpacked markdown export on disk.
///
/// Keys are paths relative to the export root, `/`-separated, extension
/// included (`"roam/js/static-site.md"`).
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
    keys: Vec<String>,
}

impl DirectorySource {
    /// Index every `.md` file under `root`, skipping keys matching any of
    /// `ignore_patterns`.
    pub fn open(root: &Path, ignore_patterns: &[String]) -> Result<Self, SourceError> {
        if !root.is_dir() {
            return Err(SourceError::MissingRoot(root.to_path_buf()));
        }

        let ignore = compile_ignore_patterns(ignore_patterns);
        let mut keys = Vec::new();

        for entry in WalkDir::new(root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            if entry.path().extension().map_or(true, |ext| ext != "md") {
                continue;
            }

            let rel = entry.path().strip_prefix(root).unwrap_or(entry.path());
            let key = rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");

            if ignore.iter().any(|re| re.is_match(&key)) {
                tracing::debug!("Ignoring {} due to ignore_patterns", key);
                continue;
            }

            keys.push(key);
        }

        keys.sort();
        tracing::info!("Found {} documents in {:?}", keys.len(), root);

        Ok(Self {
            root: root.to_path_buf(),
            keys,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl DocumentSource for DirectorySource {
    fn keys(&self) -> Vec<String> {
        self.keys.clone()
    }

    fn read(&self, key: &str) -> Result<String, SourceError> {
        if self.keys.binary_search_by(|k| k.as_str().cmp(key)).is_err() {
            return Err(SourceError::UnknownDocument(key.to_string()));
        }
        let path = key.split('/').fold(self.root.clone(), |p, part| p.join(part));
        fs::read_to_string(&path).map_err(|source| SourceError::Io { path, source })
    }
}

fn compile_ignore_patterns(patterns: &[String]) -> Vec<Regex> {
    patterns
        .iter()
        .filter_map(|pattern| match Regex::new(pattern) {
            Ok(re) => Some(re),
            Err(err) => {
                tracing::warn!("Invalid ignore pattern {:?}: {}", pattern, err);
                None
            }
        })
        .collect()
}
