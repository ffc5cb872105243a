//! The set of conflicted files produced by one merge, and its metrics.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::model::ConflictFile;
use crate::errors::DescriptorError;

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

/// Resolved vs. total section counts across a changeset.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub resolved_count: usize,
    pub total_count: usize,
}

impl Progress {
    /// 0-100. An empty changeset has nothing to resolve and reports 100.
    pub fn percent(&self) -> f64 {
        if self.total_count == 0 {
            return 100.0;
        }
        self.resolved_count as f64 / self.total_count as f64 * 100.0
    }

    pub fn is_complete(&self) -> bool {
        self.resolved_count >= self.total_count
    }
}

// ---------------------------------------------------------------------------
// ConflictChangeset
// ---------------------------------------------------------------------------

/// All conflicted files of one merge, keyed by path.
///
/// Metrics are computed on every call rather than cached.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ConflictChangeset {
    files: Vec<ConflictFile>,
}

impl ConflictChangeset {
    pub fn new(files: Vec<ConflictFile>) -> Self {
        for file in files.iter().filter(|f| f.conflicts().is_empty()) {
            warn!(path = file.path(), "conflicted file has no sections");
        }
        Self { files }
    }

    pub fn files(&self) -> &[ConflictFile] {
        &self.files
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn file(&self, path: &str) -> Option<&ConflictFile> {
        self.files.iter().find(|f| f.path() == path)
    }

    pub fn file_mut(&mut self, path: &str) -> Option<&mut ConflictFile> {
        self.files.iter_mut().find(|f| f.path() == path)
    }

    pub fn total_conflicts(&self) -> usize {
        self.files.iter().map(|f| f.conflicts().len()).sum()
    }

    pub fn resolved_conflicts(&self) -> usize {
        self.files.iter().map(ConflictFile::resolved_count).sum()
    }

    pub fn progress(&self) -> Progress {
        Progress {
            resolved_count: self.resolved_conflicts(),
            total_count: self.total_conflicts(),
        }
    }

    /// `true` iff every file is resolved.
    pub fn can_finalize(&self) -> bool {
        self.files.iter().all(ConflictFile::is_resolved)
    }

    // -----------------------------------------------------------------------
    // Descriptor I/O
    // -----------------------------------------------------------------------

    /// Parse a JSON array of conflict file descriptors.
    pub fn from_json(json: &str) -> Result<Self, DescriptorError> {
        let files: Vec<ConflictFile> = serde_json::from_str(json)?;
        debug!(files = files.len(), "parsed conflict descriptors");
        Ok(Self::new(files))
    }

    /// Encode as a pretty-printed JSON array.
    pub fn to_json(&self) -> Result<String, DescriptorError> {
        serde_json::to_string_pretty(self).map_err(|e| DescriptorError::SerializeError(e.to_string()))
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, DescriptorError> {
        let path = path.as_ref();
        info!(path = %path.display(), "loading conflict descriptors");

        if !path.exists() {
            return Err(DescriptorError::FileNotFound(path.display().to_string()));
        }

        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), DescriptorError> {
        let path = path.as_ref();
        let json = self.to_json()?;
        std::fs::write(path, json)?;
        info!(path = %path.display(), files = self.files.len(), "saved conflict descriptors");
        Ok(())
    }
}

impl From<Vec<ConflictFile>> for ConflictChangeset {
    fn from(files: Vec<ConflictFile>) -> Self {
        Self::new(files)
    }
}
