//! Resource staging module
//!
//! Materializes in-memory HTML content into a scoped temporary directory so
//! the renderer subprocess can read it. The directory and every file inside
//! it are removed when the [`StagedResources`] value is dropped, on every
//! exit path of a render call.

use std::path::{Path, PathBuf};
use tempfile::TempDir;
use thiserror::Error;
use tracing::debug;

/// Staged document filename
const DOCUMENT_FILE: &str = "document.html";

/// Staged header template filename
const HEADER_FILE: &str = "header.html";

/// Staged footer template filename
const FOOTER_FILE: &str = "footer.html";

/// Staging error types
#[derive(Debug, Error)]
pub enum StagingError {
    #[error("Failed to create staging directory: {0}")]
    CreateDir(#[source] std::io::Error),

    #[error("Failed to write staged file [{path}]: {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, StagingError>;

/// A process-unique temporary directory holding the HTML artifacts for one
/// render call
///
/// Each render call stages into its own directory, so concurrent renders
/// never collide. Dropping the value deletes the directory and its contents
/// atomically.
#[derive(Debug)]
pub struct StagedResources {
    dir: TempDir,
    document: Option<PathBuf>,
    header: Option<PathBuf>,
    footer: Option<PathBuf>,
}

impl StagedResources {
    /// Write the given content strings into a fresh staging directory
    ///
    /// Absent strings produce no file; the returned paths reflect exactly
    /// what was written.
    pub fn stage(
        document: Option<&str>,
        header: Option<&str>,
        footer: Option<&str>,
    ) -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("playwright-pdf-")
            .tempdir()
            .map_err(StagingError::CreateDir)?;

        debug!(dir = %dir.path().display(), "staging render resources");

        let document = write_staged(dir.path(), DOCUMENT_FILE, document)?;
        let header = write_staged(dir.path(), HEADER_FILE, header)?;
        let footer = write_staged(dir.path(), FOOTER_FILE, footer)?;

        Ok(Self {
            dir,
            document,
            header,
            footer,
        })
    }

    /// Path of the staging directory
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Path of the staged document, when one was written
    pub fn document(&self) -> Option<&Path> {
        self.document.as_deref()
    }

    /// Path of the staged header template, when one was written
    pub fn header(&self) -> Option<&Path> {
        self.header.as_deref()
    }

    /// Path of the staged footer template, when one was written
    pub fn footer(&self) -> Option<&Path> {
        self.footer.as_deref()
    }
}

fn write_staged(dir: &Path, name: &str, content: Option<&str>) -> Result<Option<PathBuf>> {
    let Some(content) = content else {
        return Ok(None);
    };

    let path = dir.join(name);
    std::fs::write(&path, content).map_err(|source| StagingError::WriteFile {
        path: path.clone(),
        source,
    })?;

    Ok(Some(path))
}
