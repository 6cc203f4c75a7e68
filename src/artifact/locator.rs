//! Finds the newest installer in a directory by file name pattern.
//!
//! "Newest" is the lexicographically greatest file name. The installer names
//! embed a build date (`..._INSTALLER_20240101.dmg`), so name order tracks
//! build order as long as the producer keeps that convention.

use crate::error::{ArtifactError, Result};
use std::path::{Path, PathBuf};

/// A local file selected for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Absolute or caller-relative path
    pub path: PathBuf,
    /// Size in bytes
    pub size: u64,
}

impl Artifact {
    /// File name for display
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Size in mebibytes
    pub fn size_mb(&self) -> f64 {
        self.size as f64 / (1024.0 * 1024.0)
    }
}

/// Searches one directory for files matching a glob
#[derive(Debug, Clone)]
pub struct ArtifactLocator {
    directory: PathBuf,
    pattern: String,
}

impl ArtifactLocator {
    /// Create a locator for `pattern` inside `directory`
    pub fn new(directory: impl Into<PathBuf>, pattern: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            pattern: pattern.into(),
        }
    }

    /// Directory being searched
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// All regular files matching the pattern, sorted by file name
    pub fn candidates(&self) -> Result<Vec<PathBuf>> {
        // Directory part is literal; only the file name part is a pattern.
        let escaped_dir = glob::Pattern::escape(&self.directory.to_string_lossy());
        let full_pattern = Path::new(&escaped_dir).join(&self.pattern);
        let full_pattern = full_pattern.to_string_lossy();

        let entries = glob::glob(&full_pattern).map_err(|source| ArtifactError::InvalidPattern {
            pattern: self.pattern.clone(),
            source,
        })?;

        let mut matches = Vec::new();
        for entry in entries {
            let path = entry.map_err(|source| ArtifactError::Unreadable { source })?;
            if path.is_file() {
                matches.push(path);
            }
        }
        matches.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

        log::debug!(
            "{} candidate(s) for {} in {}",
            matches.len(),
            self.pattern,
            self.directory.display()
        );
        Ok(matches)
    }

    /// The match with the greatest file name
    pub fn locate(&self) -> Result<Artifact> {
        self.select(self.candidates()?)
    }

    /// Pick the last of `candidates` (as returned by [`Self::candidates`])
    pub fn select(&self, mut candidates: Vec<PathBuf>) -> Result<Artifact> {
        let path = candidates.pop().ok_or_else(|| ArtifactError::NotFound {
            directory: self.directory.clone(),
            pattern: self.pattern.clone(),
        })?;

        let size = std::fs::metadata(&path)?.len();
        Ok(Artifact { path, size })
    }
}
