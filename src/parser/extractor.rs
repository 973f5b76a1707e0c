//! Span extraction from PDF content streams.
//!
//! Walks each page's content stream, tracking the text state (font, size,
//! text and line matrices) and the graphics CTM, and emits one
//! [`TextSpan`] per text-showing operator.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use unicode_normalization::UnicodeNormalization;

use crate::detect::{detect_header_from_bytes, detect_header_from_path};
use crate::error::{Error, Result};
use crate::model::{BBox, TextSpan};

use super::backend::{BackendFontInfo, ContentOp, LopdfBackend, PageId, PdfBackend, PdfValue};
use super::source::SpanSource;

/// Approximate ascender and descender as fractions of the font size.
const ASCENT: f64 = 0.8;
const DESCENT: f64 = 0.2;
/// Average glyph advance as a fraction of the font size.
const AVG_GLYPH_WIDTH: f64 = 0.5;
/// TJ adjustment (thousandths of an em) treated as a word gap.
const TJ_SPACE_THRESHOLD: f64 = 200.0;

/// Extracts text spans from a PDF through a [`PdfBackend`].
pub struct PdfSpanExtractor<B: PdfBackend = LopdfBackend> {
    backend: B,
    pages: BTreeMap<u32, PageId>,
}

impl PdfSpanExtractor<LopdfBackend> {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        detect_header_from_path(path)?;
        Ok(Self::new(LopdfBackend::load_file(path)?))
    }

    /// Open a PDF held in memory.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        detect_header_from_bytes(data)?;
        Ok(Self::new(LopdfBackend::load_bytes(data)?))
    }
}

impl<B: PdfBackend> PdfSpanExtractor<B> {
    /// Wrap a backend.
    pub fn new(backend: B) -> Self {
        let pages = backend.pages();
        Self { backend, pages }
    }

    /// Access the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn interpret(
        &self,
        page_num: u32,
        page_id: PageId,
        ops: &[ContentOp],
        fonts: &HashMap<Vec<u8>, BackendFontInfo>,
        page_height: f64,
    ) -> Vec<TextSpan> {
        let mut spans = Vec::new();
        let mut state = TextState::default();
        let mut ctm = Matrix::IDENTITY;
        let mut ctm_stack: Vec<Matrix> = Vec::new();

        for op in ops {
            let nums: Vec<f64> = op.operands.iter().filter_map(PdfValue::as_number).collect();
            match op.operator.as_str() {
                "q" => ctm_stack.push(ctm),
                "Q" => ctm = ctm_stack.pop().unwrap_or(Matrix::IDENTITY),
                "cm" if nums.len() >= 6 => {
                    ctm = Matrix::from_slice(&nums).multiply(&ctm);
                }
                "BT" => {
                    state.in_text = true;
                    state.text_matrix = Matrix::IDENTITY;
                    state.line_matrix = Matrix::IDENTITY;
                }
                "ET" => state.in_text = false,
                "Tf" => {
                    if let Some(PdfValue::Name(name)) = op.operands.first() {
                        state.font = name.clone();
                    }
                    if let Some(size) = op.operands.get(1).and_then(PdfValue::as_number) {
                        state.font_size = size;
                    }
                }
                "TL" if !nums.is_empty() => state.leading = nums[0],
                "Td" if nums.len() >= 2 => state.move_line(nums[0], nums[1]),
                "TD" if nums.len() >= 2 => {
                    state.leading = -nums[1];
                    state.move_line(nums[0], nums[1]);
                }
                "Tm" if nums.len() >= 6 => {
                    state.text_matrix = Matrix::from_slice(&nums);
                    state.line_matrix = state.text_matrix;
                }
                "T*" => state.next_line(),
                "Tj" | "TJ" | "'" | "\"" => {
                    if op.operator == "'" || op.operator == "\"" {
                        state.next_line();
                    }
                    if !state.in_text {
                        continue;
                    }
                    let text = self.show_text(page_id, &state.font, op);
                    if let Some(span) = state.make_span(page_num, text, &ctm, fonts, page_height)
                    {
                        spans.push(span);
                    }
                }
                _ => {}
            }
        }

        spans
    }

    fn show_text(&self, page_id: PageId, font: &[u8], op: &ContentOp) -> String {
        let decode = |bytes: &[u8]| self.backend.decode_text(page_id, font, bytes);
        match op.operator.as_str() {
            "TJ" => {
                let Some(PdfValue::Array(items)) = op.operands.first() else {
                    return String::new();
                };
                let mut combined = String::new();
                for item in items {
                    match item {
                        PdfValue::Str(bytes) => combined.push_str(&decode(bytes)),
                        other => {
                            let gap = other.as_number().map(|n| -n).unwrap_or(0.0);
                            if gap > TJ_SPACE_THRESHOLD
                                && !combined.is_empty()
                                && !combined.ends_with(char::is_whitespace)
                            {
                                combined.push(' ');
                            }
                        }
                    }
                }
                combined
            }
            "\"" => match op.operands.get(2) {
                Some(PdfValue::Str(bytes)) => decode(bytes),
                _ => String::new(),
            },
            _ => match op.operands.first() {
                Some(PdfValue::Str(bytes)) => decode(bytes),
                _ => String::new(),
            },
        }
    }
}

impl<B: PdfBackend> SpanSource for PdfSpanExtractor<B> {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_spans(&self, page: u32) -> Result<Vec<TextSpan>> {
        let page_id = *self
            .pages
            .get(&page)
            .ok_or(Error::PageOutOfRange(page, self.page_count()))?;

        let fonts: HashMap<Vec<u8>, BackendFontInfo> = self
            .backend
            .page_fonts(page_id)?
            .into_iter()
            .map(|f| (f.name.clone(), f))
            .collect();
        let (_, page_height) = self.backend.page_size(page_id);
        let content = self.backend.page_content(page_id)?;
        let ops = self.backend.decode_content(&content)?;

        Ok(self.interpret(page, page_id, &ops, &fonts, page_height))
    }
}

/// 2D affine matrix `[a b c d e f]` as used by PDF.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Matrix {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    f: f64,
}

impl Matrix {
    const IDENTITY: Matrix = Matrix {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    fn from_slice(v: &[f64]) -> Self {
        Self {
            a: v[0],
            b: v[1],
            c: v[2],
            d: v[3],
            e: v[4],
            f: v[5],
        }
    }

    fn translation(tx: f64, ty: f64) -> Self {
        Self {
            e: tx,
            f: ty,
            ..Self::IDENTITY
        }
    }

    /// `self × other`
    fn multiply(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    /// Length of the transformed unit vertical vector.
    fn vertical_scale(&self) -> f64 {
        (self.c * self.c + self.d * self.d).sqrt()
    }
}

#[derive(Debug, Clone)]
struct TextState {
    in_text: bool,
    font: Vec<u8>,
    font_size: f64,
    leading: f64,
    text_matrix: Matrix,
    line_matrix: Matrix,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            in_text: false,
            font: Vec::new(),
            font_size: 12.0,
            leading: 0.0,
            text_matrix: Matrix::IDENTITY,
            line_matrix: Matrix::IDENTITY,
        }
    }
}

impl TextState {
    fn move_line(&mut self, tx: f64, ty: f64) {
        self.line_matrix = Matrix::translation(tx, ty).multiply(&self.line_matrix);
        self.text_matrix = self.line_matrix;
    }

    fn next_line(&mut self) {
        let leading = if self.leading != 0.0 {
            self.leading
        } else {
            self.font_size
        };
        self.move_line(0.0, -leading);
    }

    fn make_span(
        &self,
        page: u32,
        raw: String,
        ctm: &Matrix,
        fonts: &HashMap<Vec<u8>, BackendFontInfo>,
        page_height: f64,
    ) -> Option<TextSpan> {
        let text: String = raw.nfkc().collect();
        if text.trim().is_empty() {
            return None;
        }

        let rendering = self.text_matrix.multiply(ctm);
        let size = round_size(self.font_size.abs() * rendering.vertical_scale());
        if !size.is_finite() || size <= 0.0 {
            return None;
        }

        let (font_name, is_bold, is_italic) = match fonts.get(&self.font) {
            Some(info) => (info.base_font.clone(), info.is_bold(), info.is_italic()),
            None => (String::from_utf8_lossy(&self.font).to_string(), false, false),
        };

        let x = rendering.e;
        let baseline = rendering.f;
        let width = text.chars().count() as f64 * size * AVG_GLYPH_WIDTH;
        let bbox = BBox::new(
            x,
            page_height - (baseline + size * ASCENT),
            x + width,
            page_height - (baseline - size * DESCENT),
        );

        Some(
            TextSpan::new(text, page, size)
                .bold(is_bold)
                .italic(is_italic)
                .with_font(font_name)
                .with_bbox(bbox),
        )
    }
}

/// Round to hundredths so matrix arithmetic does not split one size in two.
fn round_size(size: f64) -> f64 {
    (size * 100.0).round() / 100.0
}
