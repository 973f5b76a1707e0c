//! Hierarchy induction: maps up to three font sizes to h1 > h2 > h3.

use std::fmt;

use serde::Serialize;

use crate::model::HeadingLevel;

use super::profile::{FontProfile, FontSizeProfile};

/// Sizes below this are body or footnote text.
const MIN_HEADING_SIZE: f64 = 10.0;
/// A size this frequent is body text unless mostly bold.
const BODY_FREQUENCY: f64 = 0.5;
const BODY_BOLD_RATIO: f64 = 0.5;
/// Candidates must score above this to be kept.
const MIN_SCORE: f64 = 15.0;

const SCORE_BOLD_HEADINGS: f64 = 100.0;
const SCORE_MOSTLY_BOLD: f64 = 50.0;
const SCORE_HEADING_LIKE: f64 = 25.0;
const SCORE_STRUCTURAL_FREQUENCY: f64 = 20.0;
const STRUCTURAL_FREQUENCY: (f64, f64) = (0.02, 0.3);

/// Induced mapping from heading level to font size.
///
/// Levels are always a prefix of h1, h2, h3 with strictly decreasing sizes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HeadingHierarchy {
    levels: Vec<(HeadingLevel, f64)>,
}

impl HeadingHierarchy {
    /// Build from sizes, largest first. Extra sizes beyond three are ignored.
    fn from_sizes(sizes: impl IntoIterator<Item = f64>) -> Self {
        let levels = HeadingLevel::ALL.into_iter().zip(sizes).collect();
        Self { levels }
    }

    /// Size assigned to `level`.
    pub fn size_of(&self, level: HeadingLevel) -> Option<f64> {
        self.levels
            .iter()
            .find(|(l, _)| *l == level)
            .map(|(_, size)| *size)
    }

    /// (level, size) pairs, h1 first.
    pub fn levels(&self) -> &[(HeadingLevel, f64)] {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl fmt::Display for HeadingHierarchy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (level, size)) in self.levels.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", level, size)?;
        }
        f.write_str("}")
    }
}

/// A font size that survived exclusion, with its score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SizeScore {
    pub size: f64,
    pub score: f64,
}

/// Score one size's heading signal.
pub fn score_size(profile: &FontSizeProfile) -> f64 {
    let mut score = 0.0;
    if profile.all_bold && profile.has_heading_like {
        score += SCORE_BOLD_HEADINGS;
    } else if profile.bold_ratio > 0.5 {
        score += SCORE_MOSTLY_BOLD;
    } else if profile.has_heading_like {
        score += SCORE_HEADING_LIKE;
    }

    let (low, high) = STRUCTURAL_FREQUENCY;
    if (low..=high).contains(&profile.frequency_ratio) {
        score += SCORE_STRUCTURAL_FREQUENCY;
    }

    score + profile.size
}

/// Score every size that is not the title size, not body-sized, and not the
/// dominant regular-weight body text. Ordered by size, largest first.
///
/// The engine passes the largest size in the whole document as `title_size`.
pub fn score_candidates(profile: &FontProfile, title_size: Option<f64>) -> Vec<SizeScore> {
    profile
        .sizes()
        .iter()
        .filter(|p| Some(p.size) != title_size && p.size >= MIN_HEADING_SIZE)
        .filter(|p| !(p.frequency_ratio > BODY_FREQUENCY && p.bold_ratio < BODY_BOLD_RATIO))
        .map(|p| SizeScore {
            size: p.size,
            score: score_size(p),
        })
        .collect()
}

/// Induce the heading hierarchy for a document.
///
/// Kept candidates (score above 15) take h1, h2, h3 by size. If every
/// candidate scored too low, the single best-scoring one becomes h1.
pub fn induce(profile: &FontProfile, title_size: Option<f64>) -> HeadingHierarchy {
    let candidates = score_candidates(profile, title_size);
    for c in &candidates {
        log::debug!("size {} scored {:.2}", c.size, c.score);
    }

    let kept: Vec<f64> = candidates
        .iter()
        .filter(|c| c.score > MIN_SCORE)
        .map(|c| c.size)
        .collect();
    if !kept.is_empty() {
        return HeadingHierarchy::from_sizes(kept);
    }

    // Highest score wins; candidates are size-ordered, so ties go to the larger size.
    let best = candidates.iter().fold(None::<&SizeScore>, |best, c| match best {
        Some(b) if b.score >= c.score => Some(b),
        _ => Some(c),
    });
    match best {
        Some(best) => {
            log::debug!("no size scored above {}; falling back to {}", MIN_SCORE, best.size);
            HeadingHierarchy::from_sizes([best.size])
        }
        None => HeadingHierarchy::default(),
    }
}
