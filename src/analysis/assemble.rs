//! Result assembly: dedup, ordering and packaging of the outline.

use std::collections::HashSet;

use crate::model::{ExtractionResult, HeadingCandidate, OutlineEntry};

/// Drop repeated `(text, page)` pairs, keeping the first occurrence.
pub fn dedup(candidates: Vec<HeadingCandidate>) -> Vec<HeadingCandidate> {
    let mut seen: HashSet<(String, u32)> = HashSet::new();
    candidates
        .into_iter()
        .filter(|c| seen.insert((c.text.clone(), c.page)))
        .collect()
}

/// Dedup, order by page (stable) and package the result.
pub fn assemble(
    title: Option<String>,
    total_pages: u32,
    candidates: Vec<HeadingCandidate>,
) -> ExtractionResult {
    let mut headings = dedup(candidates);
    headings.sort_by_key(|c| c.page);

    let outline: Vec<OutlineEntry> = headings.into_iter().map(OutlineEntry::from).collect();
    ExtractionResult::new(title, total_pages, outline)
}
