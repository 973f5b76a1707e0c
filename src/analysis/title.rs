//! Title identification from the first page.

use crate::model::TextSpan;

/// Title candidates must be longer than this (trimmed, in characters).
const MIN_TITLE_CHARS: usize = 10;

/// Largest font size among page-1 spans, if page 1 has any.
///
/// This is the size the classifier treats as "title size" on page 1 and the
/// size the hierarchy inducer excludes, whether or not a title qualified.
pub fn title_font_size(spans: &[TextSpan]) -> Option<f64> {
    spans
        .iter()
        .filter(|s| s.page == 1)
        .map(|s| s.size)
        .reduce(f64::max)
}

/// Pick the document title among page-1 spans.
///
/// Candidates have exactly the largest page-1 size and more than ten
/// characters. Bold wins over regular, then the span nearest the top; ties
/// keep discovery order.
pub fn identify_title(spans: &[TextSpan]) -> Option<&TextSpan> {
    let max_size = title_font_size(spans)?;

    spans
        .iter()
        .filter(|s| s.page == 1 && s.size == max_size && s.trimmed_len() > MIN_TITLE_CHARS)
        .min_by(|a, b| {
            (!a.is_bold)
                .cmp(&!b.is_bold)
                .then_with(|| a.bbox.y0.total_cmp(&b.bbox.y0))
        })
}
