//! Acceptance rules for user-selected files.
//!
//! Classification trusts the declared metadata: the media type and the file
//! name. No magic bytes are inspected.

use crate::data_url;
use crate::error::{Result, ScopeError};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const SPECIAL_MEDIA_TYPE: &str = "image/tiff";
const SPECIAL_EXTENSIONS: [&str; 2] = [".tiff", ".tif"];

const PLACEHOLDER_SVG: &str = concat!(
    r##"<svg width="200" height="200" xmlns="http://www.w3.org/2000/svg">"##,
    r##"<rect width="200" height="200" fill="#f5f5f5"/>"##,
    r##"<text x="100" y="100" text-anchor="middle" font-family="Arial" font-size="14" fill="#999">TIFF Image</text>"##,
    "</svg>"
);

/// Where a candidate's bytes come from.
#[derive(Debug, Clone)]
pub enum CandidateSource {
    Path(PathBuf),
    Bytes(Arc<[u8]>),
}

/// A file the user picked or dropped, not yet read.
#[derive(Debug, Clone)]
pub struct UploadCandidate {
    pub source: CandidateSource,
    pub declared_type: String,
    pub name: String,
}

impl UploadCandidate {
    /// Build a candidate from a path, guessing the declared type from the extension.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let declared_type = mime_guess::from_path(&path)
            .first()
            .map(|m| m.essence_str().to_string())
            .unwrap_or_default();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());
        Self {
            source: CandidateSource::Path(path),
            declared_type,
            name,
        }
    }

    pub fn from_bytes(
        bytes: impl Into<Arc<[u8]>>,
        declared_type: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            source: CandidateSource::Bytes(bytes.into()),
            declared_type: declared_type.into(),
            name: name.into(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            CandidateSource::Path(path) => Some(path),
            CandidateSource::Bytes(_) => None,
        }
    }

    /// Read the raw bytes; the only disk access a submission performs.
    pub fn read_bytes(&self) -> Result<Vec<u8>> {
        match &self.source {
            CandidateSource::Path(path) => std::fs::read(path).map_err(|source| ScopeError::Read {
                name: self.name.clone(),
                source,
            }),
            CandidateSource::Bytes(bytes) => Ok(bytes.to_vec()),
        }
    }
}

/// True for the format the host cannot preview natively (TIFF).
pub fn is_special_format(candidate: &UploadCandidate) -> bool {
    if candidate.declared_type == SPECIAL_MEDIA_TYPE {
        return true;
    }
    let name = candidate.name.to_ascii_lowercase();
    SPECIAL_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

/// True when the candidate may be submitted.
pub fn is_acceptable(candidate: &UploadCandidate) -> bool {
    candidate.declared_type.starts_with("image/") || is_special_format(candidate)
}

/// How the upload block should preview a candidate while it is processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preview {
    /// A fixed placeholder image as a data URI.
    Placeholder(String),
    /// Let the host decode the file itself.
    Native,
}

pub fn preview_for(candidate: &UploadCandidate) -> Preview {
    if is_special_format(candidate) {
        Preview::Placeholder(placeholder_data_url())
    } else {
        Preview::Native
    }
}

fn placeholder_data_url() -> String {
    data_url::encode(PLACEHOLDER_SVG.as_bytes(), "image/svg+xml").data_url
}
