//! # pdfoutline
//!
//! Structural outline extraction for PDF documents.
//!
//! This library infers a document's title and a three-level heading
//! hierarchy (h1/h2/h3, each tied to a page) from typographic signal alone:
//! font sizes, weight and position, plus a handful of lexical patterns.
//! Embedded bookmarks are never consulted.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfoutline::{extract_outline_file, render, ExtractOptions};
//!
//! let result = extract_outline_file("report.pdf", &ExtractOptions::default());
//! println!("{}", render::to_json(&result, render::JsonFormat::Pretty).unwrap());
//! ```
//!
//! ## Features
//!
//! - **Font profiling**: per-size statistics drive hierarchy induction
//! - **Noise filtering**: table-of-contents lines, captions and cross references are dropped
//! - **Pluggable input**: any [`SpanSource`] works, PDF or in-memory spans
//! - **Batch processing**: whole directories in parallel with Rayon
//! - **Validation**: results can be checked against the outline invariants

pub mod analysis;
pub mod batch;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;
pub mod validate;

// Re-export commonly used types
pub use analysis::{Analysis, HeadingHierarchy, OutlineEngine};
pub use batch::{BatchOptions, BatchProcessor, BatchSummary, DocumentReport};
pub use detect::{detect_header_from_bytes, detect_header_from_path, PdfHeader};
pub use error::{Error, Result};
pub use model::{
    BBox, ExtractionResult, HeadingCandidate, HeadingLevel, OutlineEntry, StyleFlags, TextSpan,
};
pub use parser::{ErrorMode, ExtractOptions, PdfSpanExtractor, SpanSource};
pub use render::JsonFormat;
pub use validate::{validate_json, validate_result, Violation};

use std::path::Path;

/// Extract the outline of a PDF file.
///
/// Never fails: a document that cannot be processed yields a failure result
/// carrying the cause (see [`ExtractionResult::failure`]).
///
/// # Example
///
/// ```no_run
/// use pdfoutline::{extract_outline_file, ExtractOptions};
///
/// let result = extract_outline_file("report.pdf", &ExtractOptions::default());
/// if let Some(cause) = &result.error {
///     eprintln!("failed: {}", cause);
/// }
/// ```
pub fn extract_outline_file<P: AsRef<Path>>(path: P, options: &ExtractOptions) -> ExtractionResult {
    let path = path.as_ref();
    match try_extract_outline_file(path, options) {
        Ok(result) => result,
        Err(e) => {
            log::error!("Error processing {}: {}", path.display(), e);
            ExtractionResult::failure(&document_name(path), e)
        }
    }
}

/// Extract the outline of a PDF file, propagating errors.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::{try_extract_outline_file, ExtractOptions};
///
/// let options = ExtractOptions::new().with_max_pages(10).lenient();
/// let result = try_extract_outline_file("report.pdf", &options)?;
/// println!("{} headings", result.outline.len());
/// # Ok::<(), pdfoutline::Error>(())
/// ```
pub fn try_extract_outline_file<P: AsRef<Path>>(
    path: P,
    options: &ExtractOptions,
) -> Result<ExtractionResult> {
    let path = path.as_ref();
    log::info!("Processing {}", path.display());
    let extractor = PdfSpanExtractor::open(path)?;
    OutlineEngine::new(options.clone()).extract(&extractor)
}

/// Extract the outline of a PDF held in memory.
pub fn extract_outline_bytes(data: &[u8], options: &ExtractOptions) -> Result<ExtractionResult> {
    let extractor = PdfSpanExtractor::from_bytes(data)?;
    OutlineEngine::new(options.clone()).extract(&extractor)
}

/// Extract an outline from spans that are already in memory, one `Vec` per page.
///
/// # Example
///
/// ```
/// use pdfoutline::{extract_outline_spans, ExtractOptions, TextSpan};
///
/// let pages = vec![vec![TextSpan::new("A Study of Font Sizes", 1, 22.0)]];
/// let result = extract_outline_spans(&pages, &ExtractOptions::default()).unwrap();
/// assert_eq!(result.document_title, "A Study of Font Sizes");
/// assert!(result.outline.is_empty());
/// ```
pub fn extract_outline_spans(
    pages: &[Vec<TextSpan>],
    options: &ExtractOptions,
) -> Result<ExtractionResult> {
    OutlineEngine::new(options.clone()).extract(pages)
}

/// File name used in failure titles.
pub(crate) fn document_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
