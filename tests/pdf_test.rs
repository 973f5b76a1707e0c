//! End-to-end tests on PDFs built in memory.

mod common;

use lopdf::content::Operation;
use lopdf::Object;

use pdfoutline::analysis::OutlineEngine;
use pdfoutline::model::{HeadingLevel, OutlineEntry};
use pdfoutline::{
    extract_outline_bytes, extract_outline_file, render, try_extract_outline_file, Error,
    ExtractOptions, PdfSpanExtractor, SpanSource,
};

use common::{build_pdf, build_pdf_with, line, report_pdf};

fn entry(text: &str, level: HeadingLevel, page: u32) -> OutlineEntry {
    OutlineEntry {
        text: text.to_string(),
        level,
        page,
    }
}

#[test]
fn test_extractor_reads_spans() {
    let extractor = PdfSpanExtractor::from_bytes(&report_pdf()).unwrap();
    assert_eq!(extractor.page_count(), 3);
    assert_eq!(extractor.backend().version(), "1.5");

    let spans = extractor.page_spans(1).unwrap();
    assert_eq!(spans.len(), 2);

    let title = &spans[0];
    assert_eq!(title.text, "Quarterly Business Review");
    assert_eq!(title.page, 1);
    assert_eq!(title.size, 24.0);
    assert!(title.is_bold);
    assert!(title.flags().is_bold());
    assert_eq!(title.font_name, "Helvetica-Bold");
    // top-left origin: 842 - (750 + 0.8 * 24)
    assert!((title.bbox.y0 - 72.8).abs() < 1e-3);
    assert_eq!(title.bbox.x0, 72.0);

    let subtitle = &spans[1];
    assert!(!subtitle.is_bold);
    assert_eq!(subtitle.font_name, "Helvetica");
    assert!(subtitle.bbox.y0 > title.bbox.y0);
}

#[test]
fn test_page_out_of_range() {
    let extractor = PdfSpanExtractor::from_bytes(&report_pdf()).unwrap();
    assert!(matches!(
        extractor.page_spans(4),
        Err(Error::PageOutOfRange(4, 3))
    ));
    assert!(matches!(
        extractor.page_spans(0),
        Err(Error::PageOutOfRange(0, 3))
    ));
}

#[test]
fn test_report_outline() {
    let result = extract_outline_bytes(&report_pdf(), &ExtractOptions::default()).unwrap();
    assert_eq!(result.document_title, "Quarterly Business Review");
    assert_eq!(result.total_pages, 3);
    assert_eq!(
        result.outline,
        vec![
            entry("1. Market Overview", HeadingLevel::H1, 2),
            entry("1.1 Regional Performance", HeadingLevel::H2, 2),
            entry("2. Financial Results", HeadingLevel::H1, 3),
            entry("2.1 Revenue Analysis", HeadingLevel::H2, 3),
        ]
    );
    assert!(result.error.is_none());
}

#[test]
fn test_text_matrix_and_ctm_scaling() {
    let pages = vec![
        vec![line("Annual Sustainability Report", 24, true, 760)],
        vec![
            line("1. Environmental Impact", 16, true, 760),
            line("Emissions fell for the third consecutive year.", 11, false, 730),
            line("Water usage remained flat across all sites.", 11, false, 714),
            line("Waste diversion improved at most facilities.", 11, false, 698),
        ],
    ];
    let pdf = build_pdf_with(&pages, |index| {
        if index != 1 {
            return Vec::new();
        }
        vec![
            // 1pt font scaled by the text matrix
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![Object::Name(b"F2".to_vec()), Object::Integer(1)]),
            Operation::new(
                "Tm",
                vec![16.into(), 0.into(), 0.into(), 16.into(), 72.into(), 500.into()],
            ),
            Operation::new("Tj", vec![Object::string_literal("2. Social Programs")]),
            Operation::new("ET", vec![]),
            // 8pt font doubled by the CTM, shown with a TJ word gap
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![2.into(), 0.into(), 0.into(), 2.into(), 0.into(), 0.into()],
            ),
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![Object::Name(b"F2".to_vec()), Object::Integer(8)]),
            Operation::new("Td", vec![36.into(), 150.into()]),
            Operation::new(
                "TJ",
                vec![Object::Array(vec![
                    Object::string_literal("3."),
                    Object::Integer(-250),
                    Object::string_literal("Governance"),
                ])],
            ),
            Operation::new("ET", vec![]),
            Operation::new("Q", vec![]),
        ]
    });

    let extractor = PdfSpanExtractor::from_bytes(&pdf).unwrap();
    let spans = extractor.page_spans(2).unwrap();
    let scaled: Vec<(&str, f64)> = spans
        .iter()
        .filter(|s| s.is_bold)
        .map(|s| (s.text.as_str(), s.size))
        .collect();
    assert_eq!(
        scaled,
        [
            ("1. Environmental Impact", 16.0),
            ("2. Social Programs", 16.0),
            ("3. Governance", 16.0)
        ]
    );

    let result = OutlineEngine::default().extract(&extractor).unwrap();
    let texts: Vec<&str> = result.outline.iter().map(|e| e.text.as_str()).collect();
    assert_eq!(
        texts,
        ["1. Environmental Impact", "2. Social Programs", "3. Governance"]
    );
    assert!(result.outline.iter().all(|e| e.level == HeadingLevel::H1));
}

#[test]
fn test_page_cap_on_pdf() {
    let options = ExtractOptions::new().with_max_pages(2);
    let result = extract_outline_bytes(&report_pdf(), &options).unwrap();
    assert_eq!(result.total_pages, 2);
    assert!(result.outline.iter().all(|e| e.page <= 2));
}

#[test]
fn test_blank_pdf_is_untitled() {
    let pdf = build_pdf(&[vec![], vec![]]);
    let result = extract_outline_bytes(&pdf, &ExtractOptions::default()).unwrap();
    assert_eq!(result.document_title, "Untitled Document");
    assert_eq!(result.total_pages, 2);
    assert!(result.outline.is_empty());
}

#[test]
fn test_extract_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.pdf");
    std::fs::write(&path, report_pdf()).unwrap();

    let from_file = try_extract_outline_file(&path, &ExtractOptions::default()).unwrap();
    let from_bytes = extract_outline_bytes(&report_pdf(), &ExtractOptions::default()).unwrap();
    assert_eq!(from_file, from_bytes);
}

#[test]
fn test_not_a_pdf_becomes_failure_result() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.pdf");
    std::fs::write(&path, "plain text pretending to be a PDF").unwrap();

    let result = extract_outline_file(&path, &ExtractOptions::default());
    assert_eq!(result.document_title, "Error processing notes.pdf");
    assert_eq!(result.total_pages, 0);
    assert!(result.outline.is_empty());
    assert_eq!(
        result.error.as_deref(),
        Some("Unknown file format: not a valid PDF")
    );

    let json = render::to_json(&result, render::JsonFormat::Compact).unwrap();
    assert!(json.contains("\"error\":"));
}

#[test]
fn test_profile_report_on_pdf() {
    let extractor = PdfSpanExtractor::from_bytes(&report_pdf()).unwrap();
    let analysis = OutlineEngine::default().analyze(&extractor).unwrap();
    let report = render::profile_report(&analysis);
    assert!(report.contains("Title: \"Quarterly Business Review\" (24pt)"));
    assert!(report.contains("[Helvetica-Bold]"));
    assert!(report.contains("Page 3"));
}
