//! Font-profile-driven outline inference.
//!
//! The pipeline per document is:
//!
//! 1. [`collect_spans`]: qualifying spans from the first `max_pages` pages
//! 2. [`FontProfile::build`]: per-size statistics
//! 3. [`identify_title`] and [`induce`]: title and size-to-level mapping,
//!    both read-only over the same spans; the inducer never assigns the
//!    document's largest size
//! 4. [`HeadingClassifier`]: per-span level decisions and noise removal
//! 5. [`assemble`]: dedup, page ordering and the final [`ExtractionResult`]
//!
//! Each stage consumes the previous stage's output without mutating it.
//!
//! # Example
//!
//! ```
//! use pdfoutline::analysis::OutlineEngine;
//! use pdfoutline::model::TextSpan;
//!
//! let pages = vec![vec![
//!     TextSpan::new("Quarterly Results Report", 1, 24.0),
//!     TextSpan::new("Chapter 1: Introduction", 1, 16.0).bold(true),
//!     TextSpan::new("1.1 Overview", 1, 14.0).bold(true),
//! ]];
//!
//! let result = OutlineEngine::default().extract(&pages).unwrap();
//! assert_eq!(result.document_title, "Quarterly Results Report");
//! assert_eq!(result.outline.len(), 2);
//! ```

mod assemble;
mod classify;
mod collect;
mod heading;
mod hierarchy;
mod profile;
mod title;

pub use assemble::{assemble, dedup};
pub use classify::{HeadingClassifier, SIZE_TOLERANCE};
pub use collect::{collect_spans, SpanSet};
pub use heading::{has_numbering, heading_indicators, is_heading_like, is_noise};
pub use hierarchy::{induce, score_candidates, score_size, HeadingHierarchy, SizeScore};
pub use profile::{FontProfile, FontSizeProfile};
pub use title::{identify_title, title_font_size};

use crate::error::Result;
use crate::model::{ExtractionResult, HeadingCandidate, TextSpan};
use crate::parser::{ExtractOptions, SpanSource};

/// Intermediate products of analysing one document.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Collected spans and capped page count
    pub spans: SpanSet,
    /// Per-size statistics
    pub profile: FontProfile,
    /// The span chosen as title, if any
    pub title: Option<TextSpan>,
    /// Largest page-1 size, skipped by the classifier on page 1
    pub title_size: Option<f64>,
    /// Induced size-to-level mapping
    pub hierarchy: HeadingHierarchy,
}

impl Analysis {
    /// Run the classifier over all collected spans.
    pub fn candidates(&self) -> Vec<HeadingCandidate> {
        HeadingClassifier::new(&self.hierarchy, self.title_size).classify_all(&self.spans.spans)
    }

    /// Classify, dedup and package.
    pub fn to_result(&self) -> ExtractionResult {
        assemble(
            self.title.as_ref().map(|t| t.text.clone()),
            self.spans.total_pages,
            self.candidates(),
        )
    }
}

/// Outline extraction engine.
///
/// Stateless apart from its options; one engine can process any number of
/// documents, from any number of threads.
#[derive(Debug, Clone, Default)]
pub struct OutlineEngine {
    options: ExtractOptions,
}

impl OutlineEngine {
    /// Create an engine with the given options.
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }

    /// Options in use.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Collect, profile, and induce title and hierarchy.
    pub fn analyze<S: SpanSource + ?Sized>(&self, source: &S) -> Result<Analysis> {
        let spans = collect_spans(source, &self.options)?;
        let profile = FontProfile::build(&spans.spans)?;
        let title = identify_title(&spans.spans).cloned();
        let title_size = title_font_size(&spans.spans);
        // the largest size anywhere is reserved for the title
        let hierarchy = induce(&profile, profile.max_size());
        log::info!("Established hierarchy: {}", hierarchy);

        Ok(Analysis {
            spans,
            profile,
            title,
            title_size,
            hierarchy,
        })
    }

    /// Extract the outline of one document.
    pub fn extract<S: SpanSource + ?Sized>(&self, source: &S) -> Result<ExtractionResult> {
        let result = self.analyze(source)?.to_result();
        log::debug!(
            "{} headings over {} pages",
            result.outline.len(),
            result.total_pages
        );
        Ok(result)
    }
}
