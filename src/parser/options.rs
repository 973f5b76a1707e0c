//! Extraction options and configuration.

/// Default page cap.
pub const DEFAULT_MAX_PAGES: u32 = 50;

/// Options controlling span extraction and the page cap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Pages beyond this cap are ignored and not counted
    pub max_pages: u32,

    /// Error handling mode for per-page extraction failures
    pub error_mode: ErrorMode,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page cap.
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Enable lenient mode (treat unreadable pages as empty).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
            error_mode: ErrorMode::Strict,
        }
    }
}

/// Error handling mode during extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail the document on any page error
    #[default]
    Strict,
    /// Skip unreadable pages and continue
    Lenient,
}
