//! Span collection from a [`SpanSource`] under the page cap.

use crate::error::{Error, Result};
use crate::model::TextSpan;
use crate::parser::{ErrorMode, ExtractOptions, SpanSource};

/// Spans with this many trimmed characters or fewer never enter analysis.
const MIN_SPAN_CHARS: usize = 3;

/// The spans of one document that analysis works on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpanSet {
    /// Qualifying spans in page, then discovery order; text is trimmed
    pub spans: Vec<TextSpan>,
    /// `min(page_count, max_pages)`
    pub total_pages: u32,
}

impl SpanSet {
    /// Spans on one page.
    pub fn page(&self, page: u32) -> impl Iterator<Item = &TextSpan> {
        self.spans.iter().filter(move |s| s.page == page)
    }
}

/// Collect qualifying spans from the first `options.max_pages` pages.
pub fn collect_spans<S: SpanSource + ?Sized>(
    source: &S,
    options: &ExtractOptions,
) -> Result<SpanSet> {
    let page_count = source.page_count();
    let total_pages = page_count.min(options.max_pages);
    if page_count > options.max_pages {
        log::warn!(
            "Document has {} pages, processing only first {}",
            page_count,
            options.max_pages
        );
    }

    let mut spans = Vec::new();
    for page in 1..=total_pages {
        let page_spans = match source.page_spans(page) {
            Ok(page_spans) => page_spans,
            Err(e) if options.error_mode == ErrorMode::Lenient => {
                log::warn!("Failed to extract spans from page {}: {}", page, e);
                continue;
            }
            Err(e) => return Err(e),
        };

        for mut span in page_spans {
            let trimmed = span.text.trim();
            if trimmed.chars().count() <= MIN_SPAN_CHARS {
                continue;
            }
            if trimmed.len() != span.text.len() {
                span.text = trimmed.to_string();
            }
            check_span(&span, page)?;
            spans.push(span);
        }
    }

    Ok(SpanSet { spans, total_pages })
}

fn check_span(span: &TextSpan, page: u32) -> Result<()> {
    if span.page != page {
        return Err(Error::malformed(
            page,
            format!("span {:?} claims page {}", span.text, span.page),
        ));
    }
    if !span.size.is_finite() || span.size <= 0.0 {
        return Err(Error::malformed(
            page,
            format!("invalid font size {} for {:?}", span.size, span.text),
        ));
    }
    Ok(())
}
