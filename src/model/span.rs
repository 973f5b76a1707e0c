//! Text span types handed from the span extractor to the outline engine.

use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in top-left-origin page coordinates.
///
/// `y0` is the top edge; smaller values are nearer the top of the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl BBox {
    /// Create a bounding box from its corners.
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }
}

/// Style bitmask as reported by flag-based span sources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StyleFlags(pub u32);

impl StyleFlags {
    pub const ITALIC: u32 = 1 << 1;
    pub const BOLD: u32 = 1 << 4;

    /// Build flags from separate bold/italic booleans.
    pub fn from_style(is_bold: bool, is_italic: bool) -> Self {
        let mut bits = 0;
        if is_bold {
            bits |= Self::BOLD;
        }
        if is_italic {
            bits |= Self::ITALIC;
        }
        Self(bits)
    }

    pub fn is_bold(self) -> bool {
        self.0 & Self::BOLD != 0
    }

    pub fn is_italic(self) -> bool {
        self.0 & Self::ITALIC != 0
    }
}

/// A run of text sharing one font, size and style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpan {
    /// The text content
    pub text: String,
    /// 1-based page number
    pub page: u32,
    /// Font size in points
    pub size: f64,
    /// Whether the font is bold
    pub is_bold: bool,
    /// Whether the font is italic
    pub is_italic: bool,
    /// Font name (e.g., "Helvetica-Bold")
    pub font_name: String,
    /// Position on the page
    pub bbox: BBox,
}

impl TextSpan {
    /// Create a regular-weight span with an empty font name and zero bbox.
    pub fn new(text: impl Into<String>, page: u32, size: f64) -> Self {
        Self {
            text: text.into(),
            page,
            size,
            is_bold: false,
            is_italic: false,
            font_name: String::new(),
            bbox: BBox::default(),
        }
    }

    /// Create a span whose style comes from a flag bitmask.
    pub fn with_flags(text: impl Into<String>, page: u32, size: f64, flags: StyleFlags) -> Self {
        Self {
            is_bold: flags.is_bold(),
            is_italic: flags.is_italic(),
            ..Self::new(text, page, size)
        }
    }

    /// Set the bold flag.
    pub fn bold(mut self, is_bold: bool) -> Self {
        self.is_bold = is_bold;
        self
    }

    /// Set the italic flag.
    pub fn italic(mut self, is_italic: bool) -> Self {
        self.is_italic = is_italic;
        self
    }

    /// Set the font name.
    pub fn with_font(mut self, font_name: impl Into<String>) -> Self {
        self.font_name = font_name.into();
        self
    }

    /// Set the bounding box.
    pub fn with_bbox(mut self, bbox: BBox) -> Self {
        self.bbox = bbox;
        self
    }

    /// Style flags of this span.
    pub fn flags(&self) -> StyleFlags {
        StyleFlags::from_style(self.is_bold, self.is_italic)
    }

    /// Length of the trimmed text in characters.
    pub fn trimmed_len(&self) -> usize {
        self.text.trim().chars().count()
    }
}
