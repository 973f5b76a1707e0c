//! Span extraction: turns PDF pages into typed text spans.

mod backend;
mod extractor;
mod options;
mod source;

pub use backend::{
    decode_text_simple, BackendFontInfo, ContentOp, LopdfBackend, PageId, PdfBackend, PdfValue,
};
pub use extractor::PdfSpanExtractor;
pub use options::{ErrorMode, ExtractOptions, DEFAULT_MAX_PAGES};
pub use source::SpanSource;
