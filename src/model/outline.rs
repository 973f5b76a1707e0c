//! Outline types: heading levels, candidates and the per-document result.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Title used when no title span qualifies.
pub const UNTITLED: &str = "Untitled Document";

/// Heading level of an outline entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// All levels, most prominent first.
    pub const ALL: [HeadingLevel; 3] = [HeadingLevel::H1, HeadingLevel::H2, HeadingLevel::H3];

    /// Lowercase tag used in JSON output.
    pub fn as_str(self) -> &'static str {
        match self {
            HeadingLevel::H1 => "h1",
            HeadingLevel::H2 => "h2",
            HeadingLevel::H3 => "h3",
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A span accepted as a heading, before deduplication.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingCandidate {
    pub text: String,
    pub level: HeadingLevel,
    pub page: u32,
    pub size: f64,
    pub is_bold: bool,
}

/// One entry of the public outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    pub text: String,
    pub level: HeadingLevel,
    pub page: u32,
}

impl From<HeadingCandidate> for OutlineEntry {
    fn from(candidate: HeadingCandidate) -> Self {
        Self {
            text: candidate.text,
            level: candidate.level,
            page: candidate.page,
        }
    }
}

/// Outline extracted from one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Detected title, [`UNTITLED`], or a failure message
    pub document_title: String,
    /// Pages processed (capped)
    pub total_pages: u32,
    /// Headings ordered by page
    pub outline: Vec<OutlineEntry>,
    /// Failure cause, present only on failed documents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExtractionResult {
    /// Create a successful result.
    pub fn new(title: Option<String>, total_pages: u32, outline: Vec<OutlineEntry>) -> Self {
        Self {
            document_title: title.unwrap_or_else(|| UNTITLED.to_string()),
            total_pages,
            outline,
            error: None,
        }
    }

    /// Create the result reported for a document that could not be processed.
    pub fn failure(document_name: &str, cause: impl fmt::Display) -> Self {
        Self {
            document_title: format!("Error processing {}", document_name),
            total_pages: 0,
            outline: Vec::new(),
            error: Some(cause.to_string()),
        }
    }

    /// Whether this result describes a failed document.
    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }

    /// Number of outline entries at `level`.
    pub fn count_level(&self, level: HeadingLevel) -> usize {
        self.outline.iter().filter(|e| e.level == level).count()
    }
}
