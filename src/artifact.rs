//! The finished report: in-memory PDF bytes plus a download filename.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

// ---------------------------------------------------------------------------
// ReportArtifact
// ---------------------------------------------------------------------------

/// A generated report held in memory until the session is reset.
#[derive(Clone, PartialEq)]
pub struct ReportArtifact {
    list_name: String,
    file_name: String,
    bytes: Vec<u8>,
}

impl ReportArtifact {
    pub fn new(list_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let list_name = list_name.into();
        let file_name = report_file_name(&list_name);
        Self {
            list_name,
            file_name,
            bytes,
        }
    }

    pub fn list_name(&self) -> &str {
        &self.list_name
    }

    /// Download filename, `collection-report-{sanitized-list-name}.pdf`.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Write the PDF into `dir` under its download filename.
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(&self.file_name);
        fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

impl fmt::Debug for ReportArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportArtifact")
            .field("list_name", &self.list_name)
            .field("file_name", &self.file_name)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Filenames
// ---------------------------------------------------------------------------

/// Lowercase the list name and replace every non-`[a-z0-9]` character
/// with `-`.
pub fn sanitize_list_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}

pub fn report_file_name(list_name: &str) -> String {
    format!("collection-report-{}.pdf", sanitize_list_name(list_name))
}
