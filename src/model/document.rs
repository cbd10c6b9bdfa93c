//! Document-level types.

use super::{Block, BlockType, CompositeBlock, Page};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Parsed document mid-data: every page plus the strategy that produced it.
///
/// Built once by the parse engine and never mutated by rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Pages in document order
    #[serde(default)]
    pub pdf_info: Vec<Page>,

    /// Strategy used to parse the document
    #[serde(rename = "_pdf_type", default)]
    pub pdf_type: PdfType,
}

impl Document {
    /// Create a new empty document.
    pub fn new(pdf_type: PdfType) -> Self {
        Self {
            pdf_info: Vec::new(),
            pdf_type,
        }
    }

    /// Create a document from pages.
    pub fn with_pages(pdf_type: PdfType, pages: Vec<Page>) -> Self {
        Self {
            pdf_info: pages,
            pdf_type,
        }
    }

    /// Deserialize a document from its JSON dump.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Get the number of pages.
    pub fn page_count(&self) -> usize {
        self.pdf_info.len()
    }

    /// Check if the document has no pages.
    pub fn is_empty(&self) -> bool {
        self.pdf_info.is_empty()
    }

    /// Add a page to the document.
    pub fn add_page(&mut self, page: Page) {
        self.pdf_info.push(page);
    }

    /// Iterate over all top-level blocks in reading order.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.pdf_info.iter().flat_map(|page| page.para_blocks.iter())
    }

    /// Walk the tree once and report every role violation.
    ///
    /// Unknown block kinds are never reported; they render as nothing.
    pub fn structure_issues(&self) -> Vec<StructureIssue> {
        let mut issues = Vec::new();

        for (page, page_info) in self.pdf_info.iter().enumerate() {
            for (block, para) in page_info.para_blocks.iter().enumerate() {
                let mut report = |message: String| {
                    issues.push(StructureIssue {
                        page,
                        block,
                        message,
                    })
                };

                let block_type = para.block_type();
                if !block_type.is_top_level() {
                    report(format!("{} block outside of a composite", block_type));
                    continue;
                }

                match para {
                    Block::Image(composite) => check_composite(
                        composite,
                        BlockType::ImageBody,
                        &[BlockType::ImageCaption],
                        &mut report,
                    ),
                    Block::Table(composite) => check_composite(
                        composite,
                        BlockType::TableBody,
                        &[BlockType::TableCaption, BlockType::TableFootnote],
                        &mut report,
                    ),
                    _ => {}
                }
            }
        }

        issues
    }
}

fn check_composite(
    composite: &CompositeBlock,
    body_role: BlockType,
    optional_roles: &[BlockType],
    report: &mut impl FnMut(String),
) {
    let bodies: Vec<_> = composite.children(body_role).collect();
    match bodies.as_slice() {
        [] => report(format!("missing {} child", body_role)),
        [body] => {
            if body.leading_asset_ref().is_none() {
                report(format!("{} has no asset reference", body_role));
            }
        }
        _ => report(format!("{} {} children, expected one", bodies.len(), body_role)),
    }

    for role in optional_roles {
        let count = composite.children(*role).count();
        if count > 1 {
            report(format!("{} {} children, expected at most one", count, role));
        }
    }

    for child in &composite.blocks {
        let role = child.block_type();
        if role != body_role && role != BlockType::Unknown && !optional_roles.contains(&role) {
            report(format!("unexpected {} child", role));
        }
    }
}

/// A single role violation found by [`Document::structure_issues`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureIssue {
    /// Page position (0-indexed)
    pub page: usize,
    /// Block position within the page (0-indexed)
    pub block: usize,
    /// What is wrong
    pub message: String,
}

impl fmt::Display for StructureIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page {} block {}: {}", self.page, self.block, self.message)
    }
}

/// Parsing strategy chosen for a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PdfType {
    /// Text layer is trustworthy; extract it directly
    #[default]
    Txt,
    /// Text must be recovered with OCR
    Ocr,
}

impl fmt::Display for PdfType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PdfType::Txt => write!(f, "txt"),
            PdfType::Ocr => write!(f, "ocr"),
        }
    }
}

impl FromStr for PdfType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "txt" => Ok(PdfType::Txt),
            "ocr" => Ok(PdfType::Ocr),
            other => Err(format!("unknown pdf type: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LeafBlock, Line, Span};

    #[test]
    fn test_document_new() {
        let doc = Document::new(PdfType::Ocr);
        assert!(doc.is_empty());
        assert_eq!(doc.page_count(), 0);
        assert_eq!(doc.pdf_type, PdfType::Ocr);
    }

    #[test]
    fn test_document_from_json() {
        let json = r#"{
            "pdf_info": [
                {"page_idx": 0, "para_blocks": [
                    {"type": "title", "lines": [{"spans": [{"type": "text", "content": "Intro"}]}]}
                ]},
                {"page_idx": 1, "para_blocks": []}
            ],
            "_pdf_type": "ocr",
            "_parse_type": "ocr"
        }"#;
        let doc = Document::from_json(json).unwrap();
        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.pdf_type, PdfType::Ocr);
        assert_eq!(doc.blocks().count(), 1);
    }

    #[test]
    fn test_pdf_type_round_trip_names() {
        assert_eq!("OCR".parse::<PdfType>(), Ok(PdfType::Ocr));
        assert_eq!("txt".parse::<PdfType>(), Ok(PdfType::Txt));
        assert!("auto".parse::<PdfType>().is_err());
        assert_eq!(serde_json::to_string(&PdfType::Ocr).unwrap(), "\"ocr\"");
    }

    #[test]
    fn test_well_formed_tree_has_no_issues() {
        let page = Page::with_blocks(
            0,
            vec![
                Block::text_line("Hello"),
                Block::image("fig1.png", Some(vec![Line::single(Span::text("Figure 1"))])),
                Block::table("t1.png", None, None),
                Block::Unknown,
            ],
        );
        let doc = Document::with_pages(PdfType::Txt, vec![page]);
        assert!(doc.structure_issues().is_empty());
    }

    #[test]
    fn test_structure_issues_reported() {
        let missing_body = Block::Image(CompositeBlock::new(vec![Block::ImageCaption(
            LeafBlock::default(),
        )]));
        let foreign_child = Block::Table(CompositeBlock::new(vec![
            Block::TableBody(LeafBlock::new(vec![Line::single(Span::table("t.png"))])),
            Block::ImageCaption(LeafBlock::default()),
        ]));
        let empty_body = Block::Table(CompositeBlock::new(vec![Block::TableBody(
            LeafBlock::default(),
        )]));
        let stray_role = Block::ImageBody(LeafBlock::default());

        let page = Page::with_blocks(0, vec![missing_body, foreign_child, empty_body, stray_role]);
        let doc = Document::with_pages(PdfType::Txt, vec![page]);
        let issues = doc.structure_issues();

        assert_eq!(issues.len(), 4);
        assert_eq!(issues[0].block, 0);
        assert!(issues[0].message.contains("missing image_body"));
        assert!(issues[1].message.contains("unexpected image_caption"));
        assert!(issues[2].message.contains("no asset reference"));
        assert!(issues[3].to_string().starts_with("page 0 block 3"));
    }
}
