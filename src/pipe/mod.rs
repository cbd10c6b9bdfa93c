//! The classify → parse → render state machine.
//!
//! A [`Pipe`] owns the PDF bytes and model hints for one document, asks its
//! collaborators to classify and parse them, then renders the resulting
//! mid-data as often as needed.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use midmark::pipe::{Pipe, PrecomputedEngine};
//! use serde_json::json;
//!
//! let hints = json!({"pdf_info": [{"page_idx": 0, "para_blocks": [
//!     {"type": "text", "lines": [{"spans": [{"type": "text", "content": "Hello"}]}]}
//! ]}]});
//! let mut pipe = Pipe::txt(Vec::new(), hints, Arc::new(PrecomputedEngine::new()));
//! pipe.classify()?;
//! pipe.parse()?;
//! assert_eq!(pipe.render_markdown("images")?, "Hello  ");
//! # Ok::<(), midmark::Error>(())
//! ```

mod engine;
mod options;

pub use engine::{Classifier, ModelHints, ParseContext, ParseEngine, PrecomputedEngine};
pub use options::{ErrorMode, PipeMethod, PipeOptions};

use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::model::{Document, PdfType};
use crate::render::{ContentItem, ContentListRenderer, MarkdownRenderer, PageMarkdown};
use crate::text::TextAssembler;

/// Lifecycle position of a pipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PipeState {
    /// Constructed, nothing run yet
    Created,
    /// Parse strategy chosen
    Classified,
    /// Mid-data available
    Parsed,
    /// Rendered at least once
    Rendered,
}

impl fmt::Display for PipeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipeState::Created => "created",
            PipeState::Classified => "classified",
            PipeState::Parsed => "parsed",
            PipeState::Rendered => "rendered",
        };
        f.write_str(name)
    }
}

/// Single-document conversion pipeline.
pub struct Pipe {
    pdf_bytes: Vec<u8>,
    hints: ModelHints,
    method: PipeMethod,
    engine: Arc<dyn ParseEngine>,
    classifier: Option<Arc<dyn Classifier>>,
    options: PipeOptions,
    assembler: TextAssembler,
    state: PipeState,
    pdf_type: Option<PdfType>,
    document: Option<Document>,
}

impl Pipe {
    fn build(
        pdf_bytes: Vec<u8>,
        hints: ModelHints,
        method: PipeMethod,
        engine: Arc<dyn ParseEngine>,
        classifier: Option<Arc<dyn Classifier>>,
    ) -> Self {
        Self {
            pdf_bytes,
            hints,
            method,
            engine,
            classifier,
            options: PipeOptions::default(),
            assembler: TextAssembler::default(),
            state: PipeState::Created,
            pdf_type: None,
            document: None,
        }
    }

    /// Pipe that asks `classifier` which strategy to use.
    pub fn universal(
        pdf_bytes: Vec<u8>,
        hints: ModelHints,
        engine: Arc<dyn ParseEngine>,
        classifier: Arc<dyn Classifier>,
    ) -> Self {
        Self::build(pdf_bytes, hints, PipeMethod::Auto, engine, Some(classifier))
    }

    /// Pipe that always parses with OCR.
    pub fn ocr(pdf_bytes: Vec<u8>, hints: ModelHints, engine: Arc<dyn ParseEngine>) -> Self {
        Self::build(pdf_bytes, hints, PipeMethod::Ocr, engine, None)
    }

    /// Pipe that always parses the text layer.
    pub fn txt(pdf_bytes: Vec<u8>, hints: ModelHints, engine: Arc<dyn ParseEngine>) -> Self {
        Self::build(pdf_bytes, hints, PipeMethod::Txt, engine, None)
    }

    /// Set the pipe options.
    pub fn with_options(mut self, options: PipeOptions) -> Self {
        self.options = options;
        self
    }

    /// Use a custom text assembler for both render modes.
    pub fn with_assembler(mut self, assembler: TextAssembler) -> Self {
        self.assembler = assembler;
        self
    }

    /// Current lifecycle state.
    pub fn state(&self) -> PipeState {
        self.state
    }

    /// Strategy this pipe was built for.
    pub fn method(&self) -> PipeMethod {
        self.method
    }

    /// Chosen parse strategy, once classified.
    pub fn pdf_type(&self) -> Option<PdfType> {
        self.pdf_type
    }

    /// Parsed mid-data, once parsed.
    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    /// Get the options.
    pub fn options(&self) -> &PipeOptions {
        &self.options
    }

    /// Choose the parse strategy.
    ///
    /// Fixed-strategy pipes set their constant type; the universal pipe
    /// delegates to its classifier. Only valid on a fresh pipe.
    pub fn classify(&mut self) -> Result<PdfType> {
        self.expect_state("classify", PipeState::Created)?;

        let pdf_type = match &self.classifier {
            Some(classifier) => classifier.classify(&self.pdf_bytes)?,
            None => self.method.fixed_type().unwrap_or_default(),
        };

        log::debug!("{} pipe classified document as {}", self.method, pdf_type);
        self.pdf_type = Some(pdf_type);
        self.state = PipeState::Classified;
        Ok(pdf_type)
    }

    /// Run the parse engine and keep the resulting mid-data.
    ///
    /// Engine errors are returned unchanged and leave the pipe classified.
    /// Structure issues are logged, or fail the call in strict mode.
    pub fn parse(&mut self) -> Result<&Document> {
        self.expect_state("parse", PipeState::Classified)?;
        let pdf_type = self.pdf_type.unwrap_or_default();

        let ctx = ParseContext {
            debug: self.options.debug,
        };
        let document = self
            .engine
            .parse(&self.pdf_bytes, &self.hints, pdf_type, &ctx)?;

        let issues = document.structure_issues();
        match self.options.error_mode {
            ErrorMode::Strict => {
                if let Some(issue) = issues.first() {
                    return Err(Error::Structural(issue.to_string()));
                }
            }
            ErrorMode::Lenient => {
                for issue in &issues {
                    log::warn!("structure issue at {}", issue);
                }
            }
        }

        log::debug!(
            "parsed {} pages ({} structure issues)",
            document.page_count(),
            issues.len()
        );
        self.state = PipeState::Parsed;
        Ok(&*self.document.insert(document))
    }

    /// Render the whole document as Markdown.
    pub fn render_markdown(&mut self, asset_base: &str) -> Result<String> {
        let markdown = self
            .markdown_renderer()
            .render(self.parsed("render markdown")?, asset_base);
        self.state = PipeState::Rendered;
        Ok(markdown)
    }

    /// Render Markdown page by page.
    pub fn render_markdown_pages(&mut self, asset_base: &str) -> Result<Vec<PageMarkdown>> {
        let pages = self
            .markdown_renderer()
            .render_pages(self.parsed("render markdown pages")?, asset_base);
        self.state = PipeState::Rendered;
        Ok(pages)
    }

    /// Render the uniform content list.
    pub fn render_uniform(&mut self, asset_base: &str) -> Result<Vec<ContentItem>> {
        let items = self
            .content_list_renderer()
            .render(self.parsed("render uniform content")?, asset_base);
        self.state = PipeState::Rendered;
        Ok(items)
    }

    fn markdown_renderer(&self) -> MarkdownRenderer {
        MarkdownRenderer::new(self.options.render_options()).with_assembler(self.assembler.clone())
    }

    fn content_list_renderer(&self) -> ContentListRenderer {
        ContentListRenderer::new(self.options.render_options())
            .with_assembler(self.assembler.clone())
    }

    fn parsed(&self, operation: &'static str) -> Result<&Document> {
        match (&self.document, self.state) {
            (Some(document), PipeState::Parsed | PipeState::Rendered) => Ok(document),
            _ => Err(self.illegal(operation)),
        }
    }

    fn expect_state(&self, operation: &'static str, expected: PipeState) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(self.illegal(operation))
        }
    }

    fn illegal(&self, operation: &'static str) -> Error {
        Error::IllegalState {
            operation,
            state: self.state.to_string(),
        }
    }
}

impl fmt::Debug for Pipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipe")
            .field("method", &self.method)
            .field("state", &self.state)
            .field("pdf_type", &self.pdf_type)
            .field("pdf_bytes", &self.pdf_bytes.len())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use serde_json::json;

    fn hints() -> ModelHints {
        json!({"pdf_info": [{"page_idx": 0, "para_blocks": [
            {"type": "title", "lines": [{"spans": [{"type": "text", "content": "Intro"}]}]}
        ]}]})
    }

    fn engine() -> Arc<dyn ParseEngine> {
        Arc::new(PrecomputedEngine::new())
    }

    struct FailingEngine;

    impl ParseEngine for FailingEngine {
        fn parse(
            &self,
            _pdf_bytes: &[u8],
            _hints: &ModelHints,
            _pdf_type: PdfType,
            _ctx: &ParseContext,
        ) -> std::result::Result<Document, EngineError> {
            Err(EngineError::msg("model crashed"))
        }
    }

    #[test]
    fn test_fixed_pipes_classify_constant() {
        let mut ocr = Pipe::ocr(Vec::new(), hints(), engine());
        assert_eq!(ocr.classify().unwrap(), PdfType::Ocr);
        assert_eq!(ocr.state(), PipeState::Classified);

        let mut txt = Pipe::txt(Vec::new(), hints(), engine());
        assert_eq!(txt.classify().unwrap(), PdfType::Txt);
        assert_eq!(txt.method(), PipeMethod::Txt);
    }

    #[test]
    fn test_universal_delegates_to_classifier() {
        let classifier: Arc<dyn Classifier> =
            Arc::new(|_: &[u8]| -> std::result::Result<PdfType, EngineError> { Ok(PdfType::Ocr) });
        let mut pipe = Pipe::universal(b"%PDF".to_vec(), hints(), engine(), classifier);
        assert_eq!(pipe.classify().unwrap(), PdfType::Ocr);
        let doc = pipe.parse().unwrap();
        assert_eq!(doc.pdf_type, PdfType::Ocr);
    }

    #[test]
    fn test_out_of_order_calls() {
        let mut pipe = Pipe::txt(Vec::new(), hints(), engine());
        assert!(matches!(pipe.parse(), Err(Error::IllegalState { operation: "parse", .. })));
        assert!(matches!(pipe.render_markdown(""), Err(Error::IllegalState { .. })));
        assert!(matches!(pipe.render_uniform(""), Err(Error::IllegalState { .. })));

        pipe.classify().unwrap();
        assert!(matches!(pipe.classify(), Err(Error::IllegalState { .. })));
        assert!(matches!(pipe.render_markdown_pages(""), Err(Error::IllegalState { .. })));

        pipe.parse().unwrap();
        assert!(matches!(pipe.parse(), Err(Error::IllegalState { .. })));
        assert_eq!(pipe.state(), PipeState::Parsed);
    }

    #[test]
    fn test_render_is_repeatable() {
        let mut pipe = Pipe::txt(Vec::new(), hints(), engine());
        pipe.classify().unwrap();
        pipe.parse().unwrap();

        let first = pipe.render_markdown("imgs").unwrap();
        assert_eq!(pipe.state(), PipeState::Rendered);
        let second = pipe.render_markdown("imgs").unwrap();
        assert_eq!(first, "# Intro  ");
        assert_eq!(first, second);

        let items = pipe.render_uniform("imgs").unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(pipe.render_markdown_pages("imgs").unwrap().len(), 1);
    }

    #[test]
    fn test_engine_error_propagates() {
        let mut pipe = Pipe::ocr(Vec::new(), hints(), Arc::new(FailingEngine));
        pipe.classify().unwrap();
        let err = pipe.parse().unwrap_err();
        assert!(matches!(err, Error::Engine(_)));
        assert_eq!(err.to_string(), "External engine error: model crashed");
        assert_eq!(pipe.state(), PipeState::Classified);
        assert!(pipe.document().is_none());
    }

    #[test]
    fn test_strict_mode_rejects_structure_issues() {
        let broken = json!({"pdf_info": [{"para_blocks": [
            {"type": "image", "blocks": [{"type": "image_caption", "lines": []}]}
        ]}]});

        let mut strict = Pipe::txt(Vec::new(), broken.clone(), engine())
            .with_options(PipeOptions::new().strict());
        strict.classify().unwrap();
        assert!(matches!(strict.parse(), Err(Error::Structural(_))));

        let mut lenient = Pipe::txt(Vec::new(), broken, engine());
        lenient.classify().unwrap();
        assert!(lenient.parse().is_ok());
        assert!(lenient.render_uniform("").unwrap().is_empty());
    }
}
