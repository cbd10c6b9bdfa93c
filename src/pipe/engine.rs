//! External collaborators of the pipe.
//!
//! Classification and parsing need PDF decoding and layout/OCR inference,
//! which live outside this crate. The pipe reaches them only through these
//! traits.

use serde::Deserialize;
use serde_json::Value;

use crate::error::EngineError;
use crate::model::{Block, Document, Page, PdfType};

/// Layout and OCR inference output handed to the parse engine.
///
/// Opaque to the pipe; only the engine interprets it.
pub type ModelHints = Value;

/// Per-call settings forwarded to the parse engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseContext {
    /// Emit engine debug output
    pub debug: bool,
}

/// Decides whether a PDF's text layer can be trusted.
pub trait Classifier: Send + Sync {
    /// Choose the parse strategy for the given PDF bytes.
    fn classify(&self, pdf_bytes: &[u8]) -> Result<PdfType, EngineError>;
}

/// Turns PDF bytes and model hints into document mid-data.
pub trait ParseEngine: Send + Sync {
    /// Parse the document with the given strategy.
    fn parse(
        &self,
        pdf_bytes: &[u8],
        hints: &ModelHints,
        pdf_type: PdfType,
        ctx: &ParseContext,
    ) -> Result<Document, EngineError>;
}

impl<F> Classifier for F
where
    F: Fn(&[u8]) -> Result<PdfType, EngineError> + Send + Sync,
{
    fn classify(&self, pdf_bytes: &[u8]) -> Result<PdfType, EngineError> {
        self(pdf_bytes)
    }
}

/// Engine for hints that already hold the finished mid-data.
///
/// Accepts either a mid-data object (`{"pdf_info": [...], "_pdf_type": ...}`)
/// or a bare array of pages. Used to re-render stored inference output
/// without running any models.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrecomputedEngine {
    declared_type: Option<PdfType>,
}

/// Stored mid-data as it may appear in the hints.
///
/// Unlike [`Document`] and [`Page`], the `pdf_info` and `para_blocks` keys
/// are required here, so raw layout model output is not mistaken for
/// finished pages.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredMidData {
    Document { pdf_info: Vec<StoredPage> },
    Pages(Vec<StoredPage>),
}

#[derive(Deserialize)]
struct StoredPage {
    #[serde(default)]
    page_idx: usize,
    para_blocks: Vec<Block>,
}

impl From<StoredPage> for Page {
    fn from(page: StoredPage) -> Self {
        Page::with_blocks(page.page_idx, page.para_blocks)
    }
}

impl PrecomputedEngine {
    /// Create an engine with no declared type.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine that classifies by the `_pdf_type` stored in `hints`.
    pub fn for_hints(hints: &ModelHints) -> Self {
        let declared_type = hints
            .get("_pdf_type")
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok());
        Self { declared_type }
    }

    /// Type recorded in the hints, if any.
    pub fn declared_type(&self) -> Option<PdfType> {
        self.declared_type
    }
}

impl Classifier for PrecomputedEngine {
    fn classify(&self, _pdf_bytes: &[u8]) -> Result<PdfType, EngineError> {
        Ok(self.declared_type.unwrap_or_default())
    }
}

impl ParseEngine for PrecomputedEngine {
    fn parse(
        &self,
        _pdf_bytes: &[u8],
        hints: &ModelHints,
        pdf_type: PdfType,
        ctx: &ParseContext,
    ) -> Result<Document, EngineError> {
        let stored = StoredMidData::deserialize(hints).map_err(|_| {
            EngineError::msg(
                "model hints are not mid-data: expected `pdf_info` pages with `para_blocks`",
            )
        })?;
        let pages: Vec<Page> = match stored {
            StoredMidData::Document { pdf_info } => pdf_info,
            StoredMidData::Pages(pages) => pages,
        }
        .into_iter()
        .map(Page::from)
        .collect();
        if ctx.debug {
            log::debug!(
                "loaded {} precomputed pages as {}",
                pages.len(),
                pdf_type
            );
        }
        Ok(Document::with_pages(pdf_type, pages))
    }
}
