//! The span source seam between PDF parsing and outline inference.

use crate::error::{Error, Result};
use crate::model::TextSpan;

/// Anything that can hand the engine page-ordered text spans.
///
/// Pages are 1-based. `page_spans` returns spans in discovery order for the
/// given page; the engine never asks for a page above `page_count`.
pub trait SpanSource {
    /// True page count of the underlying document.
    fn page_count(&self) -> u32;

    /// Spans of one page, in discovery order.
    fn page_spans(&self, page: u32) -> Result<Vec<TextSpan>>;
}

impl SpanSource for [Vec<TextSpan>] {
    fn page_count(&self) -> u32 {
        self.len() as u32
    }

    fn page_spans(&self, page: u32) -> Result<Vec<TextSpan>> {
        if page == 0 {
            return Err(Error::PageOutOfRange(page, self.page_count()));
        }
        self.get((page - 1) as usize)
            .cloned()
            .ok_or(Error::PageOutOfRange(page, self.page_count()))
    }
}

impl SpanSource for Vec<Vec<TextSpan>> {
    fn page_count(&self) -> u32 {
        self.as_slice().page_count()
    }

    fn page_spans(&self, page: u32) -> Result<Vec<TextSpan>> {
        self.as_slice().page_spans(page)
    }
}

impl<S: SpanSource + ?Sized> SpanSource for &S {
    fn page_count(&self) -> u32 {
        (**self).page_count()
    }

    fn page_spans(&self, page: u32) -> Result<Vec<TextSpan>> {
        (**self).page_spans(page)
    }
}
