//! Lexical heading tests: the heading-likeness predicate and the noise filter.

use std::sync::OnceLock;

use regex::{Regex, RegexSet};

/// Texts longer than this are never heading-like.
const MAX_HEADING_CHARS: usize = 200;
/// Texts with this many characters or fewer are never heading-like.
const MIN_HEADING_CHARS: usize = 3;
const MAX_HEADING_WORDS: usize = 20;
/// Indicators (out of 8) a text must satisfy to be heading-like.
const REQUIRED_INDICATORS: usize = 5;
/// A run of this many periods is treated as table-of-contents leader dots.
const LEADER_DOT_RUN: usize = 7;

const CAPTION_PREFIXES: [&str; 5] = ["fig", "table", "figure", "image", "photo"];
const REFERENCE_PREFIXES: [&str; 4] = ["page", "see", "refer", "note:"];
const NOISE_FRAGMENTS: [&str; 6] = [
    "table of contents",
    "figure",
    "table 1:",
    "page ",
    "see section",
    "refer to",
];

/// Numbering prefixes such as `1.`, `2.3`, `Chapter 4`, `Part IV`.
fn numbering_patterns() -> &'static RegexSet {
    static PATTERNS: OnceLock<RegexSet> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        RegexSet::new([
            r"(?i)^\d+\.",
            r"(?i)^\d+\.\d+",
            r"(?i)^\d+\.\d+\.\d+",
            r"(?i)^Chapter\s+\d+",
            r"(?i)^Section\s+\d+",
            r"(?i)^Part\s+[IVX]+",
        ])
        .unwrap()
    })
}

/// Decimal digits in any script; fractions and roman numerals do not count.
fn all_digits() -> &'static Regex {
    static DIGITS: OnceLock<Regex> = OnceLock::new();
    DIGITS.get_or_init(|| Regex::new(r"^\d+$").unwrap())
}

/// True if the text starts with a section-numbering prefix.
pub fn has_numbering(text: &str) -> bool {
    numbering_patterns().is_match(text.trim())
}

/// Count how many of the eight heading indicators `text` satisfies.
///
/// Returns 0 when the trimmed length is outside (3, 200].
pub fn heading_indicators(text: &str) -> usize {
    let text = text.trim();
    let len = text.chars().count();
    if len <= MIN_HEADING_CHARS || len > MAX_HEADING_CHARS {
        return 0;
    }

    let lower = text.to_lowercase();
    let starts_upper = text.chars().next().is_some_and(char::is_uppercase);
    let periods = text.matches('.').count();

    let indicators = [
        starts_upper,
        !text.ends_with('.') || periods <= 2,
        text.split_whitespace().count() <= MAX_HEADING_WORDS,
        !CAPTION_PREFIXES.iter().any(|p| lower.starts_with(p)),
        !REFERENCE_PREFIXES.iter().any(|p| lower.starts_with(p)),
        text.matches(':').count() <= 1,
        !all_digits().is_match(text),
        // Deliberately overlaps the first indicator for extra weight.
        has_numbering(text) || starts_upper,
    ];

    indicators.iter().filter(|hit| **hit).count()
}

/// True if `text` reads like a heading, independent of typography.
pub fn is_heading_like(text: &str) -> bool {
    heading_indicators(text) >= REQUIRED_INDICATORS
}

/// True for table-of-contents lines, captions and cross references.
pub fn is_noise(text: &str) -> bool {
    let lower = text.to_lowercase();
    NOISE_FRAGMENTS.iter().any(|f| lower.contains(f)) || has_leader_dots(text)
}

fn has_leader_dots(text: &str) -> bool {
    let mut run = 0;
    for c in text.chars() {
        if c == '.' {
            run += 1;
            if run >= LEADER_DOT_RUN {
                return true;
            }
        } else {
            run = 0;
        }
    }
    false
}
