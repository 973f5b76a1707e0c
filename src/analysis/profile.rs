//! Font profiling: per-size statistics over a document's spans.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::TextSpan;

use super::heading::is_heading_like;

/// Statistics for one exact font size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FontSizeProfile {
    /// Font size in points (exact, as extracted)
    pub size: f64,
    /// Number of spans at this size
    pub total: usize,
    /// Number of bold spans
    pub bold_count: usize,
    /// Number of heading-like spans
    pub heading_like_count: usize,
    /// `bold_count / total`
    pub bold_ratio: f64,
    /// `heading_like_count / total`
    pub heading_pattern_ratio: f64,
    /// `total / spans in the document`
    pub frequency_ratio: f64,
    /// Every span at this size is bold
    pub all_bold: bool,
    /// At least one span at this size is heading-like
    pub has_heading_like: bool,
}

/// Per-size profiles for a whole document.
///
/// Sizes are keyed by exact float equality; two sizes that differ only in
/// the last bit are profiled separately.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FontProfile {
    sizes: Vec<FontSizeProfile>,
    total_spans: usize,
}

#[derive(Default)]
struct Tally {
    size: f64,
    total: usize,
    bold: usize,
    heading_like: usize,
}

impl FontProfile {
    /// Profile `spans`. Fails if a span has a non-finite or non-positive size.
    pub fn build(spans: &[TextSpan]) -> Result<Self> {
        let mut index: HashMap<u64, usize> = HashMap::new();
        let mut tallies: Vec<Tally> = Vec::new();

        for span in spans {
            if !span.size.is_finite() || span.size <= 0.0 {
                return Err(Error::malformed(
                    span.page,
                    format!("invalid font size {} for {:?}", span.size, span.text),
                ));
            }

            let slot = *index.entry(span.size.to_bits()).or_insert_with(|| {
                tallies.push(Tally {
                    size: span.size,
                    ..Tally::default()
                });
                tallies.len() - 1
            });
            let tally = &mut tallies[slot];
            tally.total += 1;
            if span.is_bold {
                tally.bold += 1;
            }
            if is_heading_like(&span.text) {
                tally.heading_like += 1;
            }
        }

        let total_spans = spans.len();
        let mut sizes: Vec<FontSizeProfile> = tallies
            .into_iter()
            .map(|t| FontSizeProfile {
                size: t.size,
                total: t.total,
                bold_count: t.bold,
                heading_like_count: t.heading_like,
                bold_ratio: t.bold as f64 / t.total as f64,
                heading_pattern_ratio: t.heading_like as f64 / t.total as f64,
                frequency_ratio: t.total as f64 / total_spans as f64,
                all_bold: t.bold == t.total,
                has_heading_like: t.heading_like > 0,
            })
            .collect();
        sizes.sort_by(|a, b| b.size.total_cmp(&a.size));

        Ok(Self { sizes, total_spans })
    }

    /// Profiles ordered by size, largest first.
    pub fn sizes(&self) -> &[FontSizeProfile] {
        &self.sizes
    }

    /// Profile for an exact size.
    pub fn get(&self, size: f64) -> Option<&FontSizeProfile> {
        self.sizes.iter().find(|p| p.size == size)
    }

    /// Number of spans profiled.
    pub fn total_spans(&self) -> usize {
        self.total_spans
    }

    /// Number of distinct sizes.
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// Largest size in the document.
    pub fn max_size(&self) -> Option<f64> {
        self.sizes.first().map(|p| p.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(text: &str, size: f64, bold: bool) -> TextSpan {
        TextSpan::new(text, 1, size).bold(bold)
    }

    #[test]
    fn test_profile_ratios() {
        let spans = vec![
            span("1. Introduction", 16.0, true),
            span("2. Methods", 16.0, true),
            span("the body text of the paper", 12.0, false),
            span("more body text goes here", 12.0, false),
            span("Bold lead-in sentence", 12.0, true),
            span("see the appendix, e.g. the tables. Also figures.", 12.0, false),
        ];
        let profile = FontProfile::build(&spans).unwrap();

        assert_eq!(profile.total_spans(), 6);
        assert_eq!(profile.len(), 2);
        assert_eq!(profile.max_size(), Some(16.0));

        let h = profile.get(16.0).unwrap();
        assert_eq!(h.total, 2);
        assert!(h.all_bold);
        assert!(h.has_heading_like);
        assert_eq!(h.bold_ratio, 1.0);
        assert!((h.frequency_ratio - 2.0 / 6.0).abs() < 1e-12);

        let body = profile.get(12.0).unwrap();
        assert_eq!(body.total, 4);
        assert!(!body.all_bold);
        assert_eq!(body.bold_ratio, 0.25);
        // short lowercase lines still clear five indicators; the
        // cross-reference sentence does not
        assert_eq!(body.heading_like_count, 3);
        assert_eq!(body.heading_pattern_ratio, 0.75);
    }

    #[test]
    fn test_sizes_are_exact_keys() {
        let spans = vec![span("Heading One", 14.0, true), span("Heading Two", 14.05, true)];
        let profile = FontProfile::build(&spans).unwrap();
        assert_eq!(profile.len(), 2);
        assert_eq!(profile.sizes()[0].size, 14.05);
        assert!(profile.get(14.01).is_none());
    }

    #[test]
    fn test_empty_profile() {
        let profile = FontProfile::build(&[]).unwrap();
        assert!(profile.is_empty());
        assert_eq!(profile.total_spans(), 0);
        assert_eq!(profile.max_size(), None);
    }

    #[test]
    fn test_invalid_size_is_malformed() {
        let spans = vec![span("Broken span", f64::NAN, false)];
        let err = FontProfile::build(&spans).unwrap_err();
        assert!(matches!(err, Error::MalformedSpan { page: 1, .. }));
    }

    #[test]
    fn test_deterministic() {
        let spans = vec![
            span("Alpha heading", 18.0, true),
            span("beta body", 11.0, false),
            span("Gamma heading", 14.0, true),
        ];
        assert_eq!(
            FontProfile::build(&spans).unwrap(),
            FontProfile::build(&spans).unwrap()
        );
    }
}
