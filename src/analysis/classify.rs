//! Per-span heading classification against an induced hierarchy.

use crate::model::{HeadingCandidate, HeadingLevel, TextSpan};

use super::heading::{is_heading_like, is_noise};
use super::hierarchy::HeadingHierarchy;

/// Sizes closer than this (in points) are treated as the same size.
pub const SIZE_TOLERANCE: f64 = 0.1;
/// h1 spans at or above this size need not be bold.
const LARGE_H1_SIZE: f64 = 16.0;

fn same_size(a: f64, b: f64) -> bool {
    (a - b).abs() < SIZE_TOLERANCE
}

/// Decides which spans are headings.
#[derive(Debug, Clone, Copy)]
pub struct HeadingClassifier<'a> {
    hierarchy: &'a HeadingHierarchy,
    title_size: Option<f64>,
}

impl<'a> HeadingClassifier<'a> {
    /// `title_size` is the largest page-1 size; page-1 spans at that size are
    /// never headings.
    pub fn new(hierarchy: &'a HeadingHierarchy, title_size: Option<f64>) -> Self {
        Self {
            hierarchy,
            title_size,
        }
    }

    /// Classify one span.
    pub fn classify(&self, span: &TextSpan) -> Option<HeadingCandidate> {
        if span.page == 1 && self.title_size.is_some_and(|t| same_size(span.size, t)) {
            return None;
        }

        let text = span.text.trim();
        let level = self
            .hierarchy
            .levels()
            .iter()
            .filter(|(_, size)| same_size(span.size, *size))
            .map(|(level, _)| *level)
            .find(|level| accepts(*level, span, text))?;

        if is_noise(text) {
            return None;
        }

        Some(HeadingCandidate {
            text: text.to_string(),
            level,
            page: span.page,
            size: span.size,
            is_bold: span.is_bold,
        })
    }

    /// Classify spans in order, keeping the accepted ones.
    pub fn classify_all(&self, spans: &[TextSpan]) -> Vec<HeadingCandidate> {
        spans.iter().filter_map(|s| self.classify(s)).collect()
    }
}

fn accepts(level: HeadingLevel, span: &TextSpan, text: &str) -> bool {
    let typographic = match level {
        HeadingLevel::H1 => span.is_bold || span.size >= LARGE_H1_SIZE,
        HeadingLevel::H2 | HeadingLevel::H3 => span.is_bold,
    };
    typographic && is_heading_like(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::hierarchy::induce;
    use crate::analysis::profile::FontProfile;

    fn hierarchy_16_14_13() -> HeadingHierarchy {
        let mut spans = Vec::new();
        for (size, n) in [(16.0, 3), (14.0, 3), (13.0, 3)] {
            for i in 0..n {
                spans.push(TextSpan::new(format!("Heading {}", i + 1), 2, size).bold(true));
            }
        }
        for _ in 0..40 {
            spans.push(TextSpan::new("plain body text", 2, 11.0));
        }
        induce(&FontProfile::build(&spans).unwrap(), None)
    }

    #[test]
    fn test_levels_assigned_by_size() {
        let hierarchy = hierarchy_16_14_13();
        let classifier = HeadingClassifier::new(&hierarchy, Some(24.0));

        let h1 = classifier
            .classify(&TextSpan::new("1. Introduction", 2, 16.0).bold(true))
            .unwrap();
        assert_eq!(h1.level, HeadingLevel::H1);

        let h2 = classifier
            .classify(&TextSpan::new("1.1 Research Questions", 2, 14.05).bold(true))
            .unwrap();
        assert_eq!(h2.level, HeadingLevel::H2);

        let h3 = classifier
            .classify(&TextSpan::new("2.1.1 Core Concepts", 3, 13.0).bold(true))
            .unwrap();
        assert_eq!(h3.level, HeadingLevel::H3);
        assert_eq!(h3.page, 3);
    }

    #[test]
    fn test_large_h1_need_not_be_bold() {
        let hierarchy = hierarchy_16_14_13();
        let classifier = HeadingClassifier::new(&hierarchy, None);
        assert!(classifier
            .classify(&TextSpan::new("Results and Discussion", 4, 16.0))
            .is_some());
        // h2 requires bold
        assert!(classifier
            .classify(&TextSpan::new("Key Findings", 4, 14.0))
            .is_none());
    }

    #[test]
    fn test_title_size_on_first_page_is_skipped() {
        let hierarchy = hierarchy_16_14_13();
        let classifier = HeadingClassifier::new(&hierarchy, Some(16.0));
        let span = TextSpan::new("Abstract Heading", 1, 16.05).bold(true);
        assert!(classifier.classify(&span).is_none());

        // same size on a later page is fine
        let span = TextSpan::new("Abstract Heading", 2, 16.05).bold(true);
        assert!(classifier.classify(&span).is_some());
    }

    #[test]
    fn test_size_outside_tolerance() {
        let hierarchy = hierarchy_16_14_13();
        let classifier = HeadingClassifier::new(&hierarchy, None);
        assert!(classifier
            .classify(&TextSpan::new("Almost A Heading", 2, 15.8).bold(true))
            .is_none());
    }

    #[test]
    fn test_tenth_of_a_point_apart_matches() {
        let mut spans = Vec::new();
        for i in 0..3 {
            spans.push(TextSpan::new(format!("Heading {}", i + 1), 2, 12.0).bold(true));
        }
        for _ in 0..40 {
            spans.push(TextSpan::new("plain body text", 2, 11.0));
        }
        let hierarchy = induce(&FontProfile::build(&spans).unwrap(), None);
        assert_eq!(hierarchy.size_of(HeadingLevel::H1), Some(12.0));

        let classifier = HeadingClassifier::new(&hierarchy, None);
        for size in [12.1, 11.9] {
            let heading = classifier
                .classify(&TextSpan::new("2. Methods", 2, size).bold(true))
                .unwrap();
            assert_eq!(heading.level, HeadingLevel::H1);
            assert_eq!(heading.size, size);
        }
        assert!(classifier
            .classify(&TextSpan::new("2. Methods", 2, 12.2).bold(true))
            .is_none());
    }

    #[test]
    fn test_noise_overrules_match() {
        let hierarchy = hierarchy_16_14_13();
        let classifier = HeadingClassifier::new(&hierarchy, None);
        for text in [
            "Table of Contents",
            "1. Introduction ........................ 3",
            "Figure 1: Conceptual Framework",
            "Refer to Annex B",
        ] {
            let span = TextSpan::new(text, 2, 16.0).bold(true);
            assert!(classifier.classify(&span).is_none(), "{text}");
        }
    }

    #[test]
    fn test_empty_hierarchy_accepts_nothing() {
        let hierarchy = HeadingHierarchy::default();
        let classifier = HeadingClassifier::new(&hierarchy, None);
        let spans = vec![TextSpan::new("1. Introduction", 1, 16.0).bold(true)];
        assert!(classifier.classify_all(&spans).is_empty());
    }
}
