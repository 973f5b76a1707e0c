//! PDF fixtures built in memory with lopdf.

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// One line of text on a page.
pub struct Line {
    pub text: &'static str,
    pub size: i64,
    pub bold: bool,
    pub y: i64,
}

pub fn line(text: &'static str, size: i64, bold: bool, y: i64) -> Line {
    Line {
        text,
        size,
        bold,
        y,
    }
}

fn show_line(ops: &mut Vec<Operation>, l: &Line) {
    let font = if l.bold { "F2" } else { "F1" };
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new(
        "Tf",
        vec![Object::Name(font.as_bytes().to_vec()), Object::Integer(l.size)],
    ));
    ops.push(Operation::new(
        "Td",
        vec![Object::Integer(72), Object::Integer(l.y)],
    ));
    ops.push(Operation::new("Tj", vec![Object::string_literal(l.text)]));
    ops.push(Operation::new("ET", vec![]));
}

/// Build a PDF whose pages hold the given lines, using Helvetica for
/// regular and Helvetica-Bold for bold text on an A4 MediaBox.
pub fn build_pdf(pages: &[Vec<Line>]) -> Vec<u8> {
    build_pdf_with(pages, |_| Vec::new())
}

/// Like [`build_pdf`], appending extra operations to each page (0-based index).
pub fn build_pdf_with(pages: &[Vec<Line>], extra: impl Fn(usize) -> Vec<Operation>) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let bold = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
    });
    let resources = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular,
            "F2" => bold,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for (index, lines) in pages.iter().enumerate() {
        let mut ops = Vec::new();
        for l in lines {
            show_line(&mut ops, l);
        }
        ops.extend(extra(index));

        let content = Content { operations: ops };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

/// A three-page quarterly report with two numbered sections.
pub fn report_pdf() -> Vec<u8> {
    let body = "Revenue grew steadily across all regions during the quarter.";
    let body_lines = |start: i64| -> Vec<Line> {
        (0..8).map(|i| line(body, 11, false, start - i * 16)).collect()
    };

    let mut page2 = vec![
        line("1. Market Overview", 16, true, 760),
        line("1.1 Regional Performance", 14, true, 730),
    ];
    page2.extend(body_lines(700));
    let mut page3 = vec![
        line("2. Financial Results", 16, true, 760),
        line("2.1 Revenue Analysis", 14, true, 730),
    ];
    page3.extend(body_lines(700));

    build_pdf(&[
        vec![
            line("Quarterly Business Review", 24, true, 750),
            line("Prepared for the board of directors", 12, false, 720),
        ],
        page2,
        page3,
    ])
}
