//! # midmark
//!
//! Markdown and structured content from parsed PDF mid-data.
//!
//! Layout and OCR inference turn a PDF into a tree of pages, blocks, lines
//! and spans ("mid-data"). This library takes that tree and renders it as
//! Markdown, either whole or page by page, or as a uniform content list of
//! typed records for downstream tools.
//!
//! ## Quick Start
//!
//! ```
//! use midmark::{from_json, render};
//!
//! fn main() -> midmark::Result<()> {
//!     let doc = from_json(r#"{"pdf_info": [{"page_idx": 0, "para_blocks": [
//!         {"type": "title", "lines": [{"spans": [{"type": "text", "content": "Intro"}]}]}
//!     ]}]}"#)?;
//!
//!     let markdown = render::to_markdown(&doc, "images");
//!     assert_eq!(markdown, "# Intro  ");
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Two render modes**: Markdown for reading, content list for machines
//! - **Pipe state machine**: classify, parse and render with pluggable engines
//! - **CJK support**: no inter-word spaces for Chinese, Japanese and Korean
//! - **Word segmentation**: splits run-together English words from bad text layers
//! - **Artifacts**: writes Markdown, mid-data and content list side by side

pub mod error;
pub mod model;
pub mod output;
pub mod pipe;
pub mod render;
pub mod text;

// Re-export commonly used types
pub use error::{EngineError, Error, Result};
pub use model::{
    Block, BlockType, CompositeBlock, ContentType, Document, LeafBlock, Line, Page, PdfType,
    Span, StructureIssue,
};
pub use output::{write_artifacts, ArtifactPaths, OutputLayout};
pub use pipe::{
    Classifier, ErrorMode, ModelHints, ParseContext, ParseEngine, Pipe, PipeMethod, PipeOptions,
    PipeState, PrecomputedEngine,
};
pub use render::{
    ContentItem, ContentListRenderer, JsonFormat, MarkdownRenderer, PageMarkdown, RenderMode,
    RenderOptions,
};

use std::path::Path;

/// Load mid-data from a JSON string.
///
/// # Example
///
/// ```
/// let doc = midmark::from_json(r#"{"pdf_info": [], "_pdf_type": "ocr"}"#).unwrap();
/// assert_eq!(doc.pdf_type, midmark::PdfType::Ocr);
/// ```
pub fn from_json(json: &str) -> Result<Document> {
    Document::from_json(json)
}

/// Load mid-data from a JSON file.
///
/// # Example
///
/// ```no_run
/// use midmark::from_file;
///
/// let doc = from_file("paper.json").unwrap();
/// println!("Pages: {}", doc.page_count());
/// ```
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let json = std::fs::read_to_string(path)?;
    Document::from_json(&json)
}

/// Render a mid-data file to Markdown.
///
/// # Arguments
///
/// * `path` - Path to the mid-data JSON
/// * `asset_base` - Prefix for image and table references
///
/// # Example
///
/// ```no_run
/// let markdown = midmark::to_markdown("paper.json", "images").unwrap();
/// std::fs::write("paper.md", markdown).unwrap();
/// ```
pub fn to_markdown<P: AsRef<Path>>(path: P, asset_base: &str) -> Result<String> {
    let doc = from_file(path)?;
    Ok(render::to_markdown(&doc, asset_base))
}

/// Render a mid-data file to Markdown with custom options.
pub fn to_markdown_with_options<P: AsRef<Path>>(
    path: P,
    asset_base: &str,
    options: RenderOptions,
) -> Result<String> {
    let doc = from_file(path)?;
    Ok(MarkdownRenderer::new(options).render(&doc, asset_base))
}

/// Render a mid-data file to a JSON content list.
///
/// # Example
///
/// ```no_run
/// use midmark::JsonFormat;
///
/// let json = midmark::to_content_list("paper.json", "images", JsonFormat::Pretty).unwrap();
/// std::fs::write("paper_content_list.json", json).unwrap();
/// ```
pub fn to_content_list<P: AsRef<Path>>(
    path: P,
    asset_base: &str,
    format: JsonFormat,
) -> Result<String> {
    let doc = from_file(path)?;
    let items = render::to_content_list(&doc, asset_base);
    render::to_json(&items, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const MID_DATA: &str = r#"{"pdf_info": [{"page_idx": 0, "para_blocks": [
        {"type": "text", "lines": [{"spans": [{"type": "text", "content": "Hello"}]}]},
        {"type": "table", "blocks": [
            {"type": "table_body", "lines": [{"spans": [{"type": "table", "image_path": "t.jpg"}]}]}
        ]}
    ]}], "_pdf_type": "txt"}"#;

    fn mid_data_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(MID_DATA.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_to_markdown_file() {
        let file = mid_data_file();
        let markdown = to_markdown(file.path(), "imgs").unwrap();
        assert_eq!(markdown, "Hello  \n\n\n![](imgs/t.jpg)  ");

        let text_only =
            to_markdown_with_options(file.path(), "imgs", RenderOptions::text_only()).unwrap();
        assert_eq!(text_only, "Hello  ");
    }

    #[test]
    fn test_to_content_list_file() {
        let file = mid_data_file();
        let json = to_content_list(file.path(), "", JsonFormat::Compact).unwrap();
        assert_eq!(
            json,
            r#"[{"type":"text","text":"Hello "},{"type":"table","img_path":"t.jpg"}]"#
        );
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(from_file("/nonexistent/mid.json"), Err(Error::Io(_))));
    }
}
