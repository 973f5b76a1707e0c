//! Structural checks for extraction results.
//!
//! [`validate_result`] checks the invariants every result must satisfy;
//! [`validate_json`] additionally checks the JSON layout of a result file.

use std::collections::HashSet;

use serde_json::Value;
use thiserror::Error;

use crate::model::ExtractionResult;

/// One broken invariant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    #[error("missing field `{0}`")]
    MissingField(String),

    #[error("field `{field}` {reason}")]
    InvalidField { field: String, reason: String },

    #[error("total_pages {total_pages} exceeds page cap {cap}")]
    PageCapExceeded { total_pages: u32, cap: u32 },

    #[error("outline[{index}] page {page} outside 1..={total_pages}")]
    PageOutOfRange {
        index: usize,
        page: u32,
        total_pages: u32,
    },

    #[error("outline[{index}] duplicates {text:?} on page {page}")]
    Duplicate {
        index: usize,
        text: String,
        page: u32,
    },

    #[error("outline[{index}] is on an earlier page than its predecessor")]
    Unordered { index: usize },

    #[error("outline[{index}] has empty text")]
    EmptyText { index: usize },

    #[error("failure result must have no pages and no outline")]
    FailureNotEmpty,
}

/// Check a result against the outline invariants. Empty means valid.
pub fn validate_result(result: &ExtractionResult, page_cap: u32) -> Vec<Violation> {
    let mut violations = Vec::new();

    if result.total_pages > page_cap {
        violations.push(Violation::PageCapExceeded {
            total_pages: result.total_pages,
            cap: page_cap,
        });
    }

    if result.is_failure() && (result.total_pages != 0 || !result.outline.is_empty()) {
        violations.push(Violation::FailureNotEmpty);
    }

    let mut seen = HashSet::new();
    let mut previous_page = 0;
    for (index, entry) in result.outline.iter().enumerate() {
        if entry.text.trim().is_empty() {
            violations.push(Violation::EmptyText { index });
        }
        if entry.page < 1 || entry.page > result.total_pages {
            violations.push(Violation::PageOutOfRange {
                index,
                page: entry.page,
                total_pages: result.total_pages,
            });
        }
        if !seen.insert((entry.text.as_str(), entry.page)) {
            violations.push(Violation::Duplicate {
                index,
                text: entry.text.clone(),
                page: entry.page,
            });
        }
        if entry.page < previous_page {
            violations.push(Violation::Unordered { index });
        }
        previous_page = entry.page;
    }

    violations
}

/// Check a serialized result: layout first, then [`validate_result`].
pub fn validate_json(json: &str, page_cap: u32) -> Vec<Violation> {
    let value: Value = match serde_json::from_str(json) {
        Ok(value) => value,
        Err(e) => return vec![Violation::InvalidJson(e.to_string())],
    };

    let layout = check_layout(&value);
    if !layout.is_empty() {
        return layout;
    }

    match serde_json::from_value::<ExtractionResult>(value) {
        Ok(result) => validate_result(&result, page_cap),
        Err(e) => vec![Violation::InvalidJson(e.to_string())],
    }
}

fn check_layout(value: &Value) -> Vec<Violation> {
    let Some(obj) = value.as_object() else {
        return vec![Violation::InvalidField {
            field: "$".to_string(),
            reason: "must be an object".to_string(),
        }];
    };

    let mut violations = Vec::new();
    let mut require = |field: &str, ok: fn(&Value) -> bool, expected: &str| match obj.get(field) {
        None => violations.push(Violation::MissingField(field.to_string())),
        Some(v) if !ok(v) => violations.push(Violation::InvalidField {
            field: field.to_string(),
            reason: format!("must be {}", expected),
        }),
        _ => {}
    };
    require("document_title", Value::is_string, "a string");
    require("total_pages", Value::is_u64, "a non-negative integer");
    require("outline", Value::is_array, "an array");

    let items = obj.get("outline").and_then(Value::as_array);
    for (index, item) in items.into_iter().flatten().enumerate() {
        let field = |name: &str| format!("outline[{}].{}", index, name);
        let Some(item) = item.as_object() else {
            violations.push(Violation::InvalidField {
                field: format!("outline[{}]", index),
                reason: "must be an object".to_string(),
            });
            continue;
        };
        match item.get("text") {
            Some(Value::String(_)) => {}
            Some(_) => violations.push(Violation::InvalidField {
                field: field("text"),
                reason: "must be a string".to_string(),
            }),
            None => violations.push(Violation::MissingField(field("text"))),
        }
        match item.get("level").map(Value::as_str) {
            Some(Some("h1" | "h2" | "h3")) => {}
            Some(_) => violations.push(Violation::InvalidField {
                field: field("level"),
                reason: "must be one of h1, h2, h3".to_string(),
            }),
            None => violations.push(Violation::MissingField(field("level"))),
        }
        match item.get("page") {
            Some(v) if v.is_u64() => {}
            Some(_) => violations.push(Violation::InvalidField {
                field: field("page"),
                reason: "must be a non-negative integer".to_string(),
            }),
            None => violations.push(Violation::MissingField(field("page"))),
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HeadingLevel, OutlineEntry};

    fn entry(text: &str, level: HeadingLevel, page: u32) -> OutlineEntry {
        OutlineEntry {
            text: text.to_string(),
            level,
            page,
        }
    }

    #[test]
    fn test_valid_result() {
        let result = ExtractionResult::new(
            Some("Report".to_string()),
            3,
            vec![
                entry("1. Introduction", HeadingLevel::H1, 1),
                entry("1.1 Scope", HeadingLevel::H2, 1),
                entry("2. Methods", HeadingLevel::H1, 3),
            ],
        );
        assert!(validate_result(&result, 50).is_empty());
    }

    #[test]
    fn test_detects_broken_invariants() {
        let result = ExtractionResult::new(
            None,
            2,
            vec![
                entry("Results", HeadingLevel::H1, 2),
                entry("Results", HeadingLevel::H1, 2),
                entry("Overview", HeadingLevel::H2, 1),
                entry("Appendix", HeadingLevel::H1, 5),
                entry("  ", HeadingLevel::H3, 5),
            ],
        );
        let violations = validate_result(&result, 50);
        assert!(violations.contains(&Violation::Duplicate {
            index: 1,
            text: "Results".to_string(),
            page: 2
        }));
        assert!(violations.contains(&Violation::Unordered { index: 2 }));
        assert!(violations.contains(&Violation::PageOutOfRange {
            index: 3,
            page: 5,
            total_pages: 2
        }));
        assert!(violations.contains(&Violation::EmptyText { index: 4 }));
    }

    #[test]
    fn test_page_cap() {
        let result = ExtractionResult::new(None, 60, vec![]);
        assert_eq!(
            validate_result(&result, 50),
            vec![Violation::PageCapExceeded {
                total_pages: 60,
                cap: 50
            }]
        );
    }

    #[test]
    fn test_failure_result_is_valid() {
        let result = ExtractionResult::failure("x.pdf", "boom");
        assert!(validate_result(&result, 50).is_empty());

        let mut broken = result;
        broken.total_pages = 2;
        assert_eq!(validate_result(&broken, 50), vec![Violation::FailureNotEmpty]);
    }

    #[test]
    fn test_validate_json_layout() {
        let json = r#"{"document_title": 7, "outline": [{"text": "A", "level": "h4", "page": 1}]}"#;
        let violations = validate_json(json, 50);
        assert!(violations.contains(&Violation::InvalidField {
            field: "document_title".to_string(),
            reason: "must be a string".to_string()
        }));
        assert!(violations.contains(&Violation::MissingField("total_pages".to_string())));
        assert!(violations.contains(&Violation::InvalidField {
            field: "outline[0].level".to_string(),
            reason: "must be one of h1, h2, h3".to_string()
        }));
    }

    #[test]
    fn test_validate_json_roundtrip_ok() {
        let json = r#"{
            "document_title": "Report",
            "total_pages": 2,
            "outline": [{"text": "1. Introduction", "level": "h1", "page": 1}]
        }"#;
        assert!(validate_json(json, 50).is_empty());
    }

    #[test]
    fn test_invalid_json() {
        let violations = validate_json("{not json", 50);
        assert!(matches!(violations.as_slice(), [Violation::InvalidJson(_)]));
    }
}
