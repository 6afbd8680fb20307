//! Archive intake: expand an uploaded zip and enumerate its source files.
//!
//! The archive is unpacked into a temporary directory owned by
//! [`ArchiveWorkspace`]; dropping the workspace removes the directory.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use thiserror::Error;
use walkdir::WalkDir;
use zip::ZipArchive;

/// File extension (without the dot) of the files offered for selection.
pub const SOURCE_EXTENSION: &str = "py";

/// Errors raised while opening an archive or loading a member from it.
#[derive(Debug, Error)]
pub enum IntakeError {
    /// The bytes are not a readable zip archive or could not be expanded.
    #[error("cannot open archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Filesystem failure while creating, walking, or reading the workspace.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Walking the expanded archive failed.
    #[error("cannot walk archive contents: {0}")]
    Walk(#[from] walkdir::Error),

    /// The requested path is not one of the enumerated source files.
    #[error("{0} is not a source file in this archive")]
    UnknownSource(String),
}

/// The text of one selected source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    /// Path relative to the archive root, `/`-separated.
    pub path: String,
    /// Full file contents.
    pub text: String,
}

/// An archive expanded into a transient directory.
#[derive(Debug)]
pub struct ArchiveWorkspace {
    dir: TempDir,
    sources: Vec<String>,
}

impl ArchiveWorkspace {
    /// Expand `bytes` as a zip archive and collect members ending in `.{extension}`.
    ///
    /// Members are listed at any directory depth, relative to the archive root,
    /// sorted so that repeated runs offer the same order.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::Archive`] when the bytes are not a valid zip, and
    /// [`IntakeError::Io`]/[`IntakeError::Walk`] on filesystem failures.
    pub fn open(bytes: &[u8], extension: &str) -> Result<Self, IntakeError> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;
        let dir = tempfile::Builder::new().prefix("docsketch-").tempdir()?;

        tracing::info!(members = archive.len(), dir = %dir.path().display(), "expanding archive");
        archive.extract(dir.path())?;

        let sources = collect_sources(dir.path(), extension)?;
        tracing::info!(count = sources.len(), extension, "enumerated source files");

        Ok(Self { dir, sources })
    }

    /// Read an archive file from disk and expand it.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::Io`] if the file cannot be read, otherwise the
    /// same errors as [`ArchiveWorkspace::open`].
    pub fn open_path(path: &Path, extension: &str) -> Result<Self, IntakeError> {
        let bytes = std::fs::read(path)?;
        Self::open(&bytes, extension)
    }

    /// Relative paths of the matching source files, sorted.
    #[must_use]
    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    /// Returns `true` when no member matched the extension.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// The file selected when the caller does not choose one: the first listed.
    #[must_use]
    pub fn default_selection(&self) -> Option<&str> {
        self.sources.first().map(String::as_str)
    }

    /// Directory the archive was expanded into.
    #[must_use]
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Load one enumerated source file as a [`SourceUnit`].
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::UnknownSource`] if `relative` was not enumerated,
    /// or [`IntakeError::Io`] if the file is unreadable or not UTF-8.
    pub fn load(&self, relative: &str) -> Result<SourceUnit, IntakeError> {
        if !self.sources.iter().any(|s| s == relative) {
            return Err(IntakeError::UnknownSource(relative.to_string()));
        }
        let full: PathBuf =
            relative.split('/').fold(self.dir.path().to_path_buf(), |p, c| p.join(c));
        let text = std::fs::read_to_string(&full)?;
        tracing::debug!(path = relative, bytes = text.len(), "loaded source unit");
        Ok(SourceUnit { path: relative.to_string(), text })
    }
}

fn collect_sources(root: &Path, extension: &str) -> Result<Vec<String>, IntakeError> {
    let mut sources = Vec::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().and_then(|e| e.to_str()) != Some(extension) {
            continue;
        }
        if let Ok(rel) = entry.path().strip_prefix(root) {
            let rel = rel.components().map(|c| c.as_os_str().to_string_lossy()).collect::<Vec<_>>();
            sources.push(rel.join("/"));
        }
    }
    sources.sort();
    Ok(sources)
}
