//! Pipe options and configuration.

use std::fmt;
use std::str::FromStr;

use crate::model::PdfType;
use crate::render::{RenderMode, RenderOptions};

/// Options for driving a pipe.
#[derive(Debug, Clone, Default)]
pub struct PipeOptions {
    /// How structure issues found at parse time are handled
    pub error_mode: ErrorMode,

    /// Asset mode for both renderers
    pub render_mode: RenderMode,

    /// Forwarded to the parse engine
    pub debug: bool,
}

impl PipeOptions {
    /// Create new pipe options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Fail parse on the first structure issue.
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Set render mode.
    pub fn with_render_mode(mut self, mode: RenderMode) -> Self {
        self.render_mode = mode;
        self
    }

    /// Enable or disable engine debug output.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Render options derived from these pipe options.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions::new().with_mode(self.render_mode)
    }
}

/// How structure issues are handled when a document is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on the first issue
    Strict,
    /// Log issues and continue; malformed blocks are dropped at render time
    #[default]
    Lenient,
}

/// Parsing strategy a pipe is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PipeMethod {
    /// Let the classifier choose
    #[default]
    Auto,
    /// Always OCR
    Ocr,
    /// Always use the text layer
    Txt,
}

impl PipeMethod {
    /// Short name, also used as the output directory name.
    pub fn as_str(&self) -> &'static str {
        match self {
            PipeMethod::Auto => "auto",
            PipeMethod::Ocr => "ocr",
            PipeMethod::Txt => "txt",
        }
    }

    /// The type a fixed-strategy method always uses; `None` for `Auto`.
    pub fn fixed_type(&self) -> Option<PdfType> {
        match self {
            PipeMethod::Auto => None,
            PipeMethod::Ocr => Some(PdfType::Ocr),
            PipeMethod::Txt => Some(PdfType::Txt),
        }
    }
}

impl fmt::Display for PipeMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PipeMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(PipeMethod::Auto),
            "ocr" => Ok(PipeMethod::Ocr),
            "txt" => Ok(PipeMethod::Txt),
            other => Err(format!(
                "unknown parse method: {} (expected auto, ocr or txt)",
                other
            )),
        }
    }
}
