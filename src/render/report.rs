//! Plain-text font profile report for diagnosing hierarchy decisions.

use crate::analysis::{score_candidates, Analysis};

/// Render the intermediate analysis of a document as text.
///
/// Lists the per-size statistics (with the score of each candidate size,
/// `-` for sizes excluded from candidacy), the induced hierarchy, the title,
/// and every collected span grouped by page.
pub fn profile_report(analysis: &Analysis) -> String {
    let mut output = String::new();
    let scores = score_candidates(&analysis.profile, analysis.profile.max_size());

    output.push_str(&format!(
        "Pages: {}  Spans: {}  Sizes: {}\n",
        analysis.spans.total_pages,
        analysis.profile.total_spans(),
        analysis.profile.len()
    ));
    match &analysis.title {
        Some(title) => output.push_str(&format!("Title: {:?} ({}pt)\n", title.text, title.size)),
        None => output.push_str("Title: none\n"),
    }
    output.push_str(&format!("Hierarchy: {}\n\n", analysis.hierarchy));

    output.push_str(&format!(
        "{:>8} {:>6} {:>6} {:>9} {:>6} {:>8}\n",
        "size", "spans", "bold", "heading", "freq", "score"
    ));
    for p in analysis.profile.sizes() {
        let score = scores
            .iter()
            .find(|s| s.size == p.size)
            .map(|s| format!("{:.2}", s.score))
            .unwrap_or_else(|| "-".to_string());
        output.push_str(&format!(
            "{:>8.2} {:>6} {:>5.0}% {:>8.0}% {:>5.1}% {:>8}\n",
            p.size,
            p.total,
            p.bold_ratio * 100.0,
            p.heading_pattern_ratio * 100.0,
            p.frequency_ratio * 100.0,
            score
        ));
    }

    for page in 1..=analysis.spans.total_pages {
        let mut spans = analysis.spans.page(page).peekable();
        if spans.peek().is_none() {
            continue;
        }
        output.push_str(&format!("\nPage {}\n", page));
        for span in spans {
            let style = match (span.is_bold, span.is_italic) {
                (true, true) => "BI",
                (true, false) => "B",
                (false, true) => "I",
                (false, false) => "",
            };
            output.push_str(&format!(
                "  {:>6.2} {:<2} y={:<7.1} {}  [{}]\n",
                span.size, style, span.bbox.y0, span.text, span.font_name
            ));
        }
    }

    output
}
