//! Data model shared by the span extractor and the outline engine.
//!
//! Spans flow in from a [`SpanSource`](crate::parser::SpanSource); the engine
//! produces one [`ExtractionResult`] per document.

mod outline;
mod span;

pub use outline::{ExtractionResult, HeadingCandidate, HeadingLevel, OutlineEntry, UNTITLED};
pub use span::{BBox, StyleFlags, TextSpan};
