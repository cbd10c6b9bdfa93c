//! Markdown rendering of document mid-data.

use serde::{Deserialize, Serialize};

use crate::model::{Block, BlockType, CompositeBlock, ContentType, Document, Page};
use crate::text::TextAssembler;

use super::{join_path, RenderOptions};

/// Separator between paragraph fragments.
const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Hard line break appended to every fragment.
const HARD_BREAK: &str = "  ";

/// Convert a document to Markdown with default options.
pub fn to_markdown(doc: &Document, asset_base: &str) -> String {
    MarkdownRenderer::default().render(doc, asset_base)
}

/// Markdown of a single page, as produced by [`MarkdownRenderer::render_pages`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMarkdown {
    /// Position among emitted pages; pages with no content are not counted
    pub page_no: usize,
    /// Joined paragraph fragments of the page
    pub md_content: String,
}

/// Markdown renderer.
///
/// Emits one fragment per top-level block. Fragments that are blank after
/// trimming are dropped; the rest get a trailing hard break and are
/// separated by a blank line.
#[derive(Debug, Clone, Default)]
pub struct MarkdownRenderer {
    options: RenderOptions,
    assembler: TextAssembler,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            assembler: TextAssembler::default(),
        }
    }

    /// Replace the text assembler.
    pub fn with_assembler(mut self, assembler: TextAssembler) -> Self {
        self.assembler = assembler;
        self
    }

    /// Get the render options.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render the whole document.
    pub fn render(&self, doc: &Document, asset_base: &str) -> String {
        let fragments: Vec<String> = doc
            .pdf_info
            .iter()
            .flat_map(|page| self.page_fragments(page, asset_base))
            .collect();
        fragments.join(PARAGRAPH_SEPARATOR)
    }

    /// Render each page separately.
    ///
    /// Pages without any non-empty fragment are omitted and `page_no` counts
    /// only the pages that are emitted.
    pub fn render_pages(&self, doc: &Document, asset_base: &str) -> Vec<PageMarkdown> {
        doc.pdf_info
            .iter()
            .map(|page| self.page_fragments(page, asset_base))
            .filter(|fragments| !fragments.is_empty())
            .enumerate()
            .map(|(page_no, fragments)| PageMarkdown {
                page_no,
                md_content: fragments.join(PARAGRAPH_SEPARATOR),
            })
            .collect()
    }

    /// Render a single block to its finished fragment, if it has content.
    pub fn render_block(&self, block: &Block, asset_base: &str) -> Option<String> {
        let raw = self.block_text(block, asset_base)?;
        let text = raw.trim_end();
        if text.trim_start().is_empty() {
            return None;
        }
        Some(format!("{}{}", text, HARD_BREAK))
    }

    fn page_fragments(&self, page: &Page, asset_base: &str) -> Vec<String> {
        let fragments: Vec<String> = page
            .para_blocks
            .iter()
            .filter_map(|block| self.render_block(block, asset_base))
            .collect();
        if fragments.is_empty() && !page.is_empty() {
            log::debug!("page {} rendered no markdown", page.page_idx);
        }
        fragments
    }

    fn block_text(&self, block: &Block, asset_base: &str) -> Option<String> {
        match block {
            Block::Text(leaf) | Block::InterlineEquation(leaf) => {
                Some(self.assembler.merge_lines(&leaf.lines))
            }
            Block::Title(leaf) => Some(format!("# {}", self.assembler.merge_lines(&leaf.lines))),
            Block::Image(composite) if self.options.mode.includes_assets() => Some(self.composite_text(
                composite,
                (BlockType::ImageBody, ContentType::Image),
                &[BlockType::ImageCaption],
                asset_base,
            )),
            Block::Table(composite) if self.options.mode.includes_assets() => Some(self.composite_text(
                composite,
                (BlockType::TableBody, ContentType::Table),
                &[BlockType::TableCaption, BlockType::TableFootnote],
                asset_base,
            )),
            Block::Image(_) | Block::Table(_) => None,
            other => {
                log::debug!("skipping {} block at top level", other.block_type());
                None
            }
        }
    }

    fn composite_text(
        &self,
        composite: &CompositeBlock,
        (body_role, asset_kind): (BlockType, ContentType),
        text_roles: &[BlockType],
        asset_base: &str,
    ) -> String {
        let mut out = String::new();

        let asset = composite
            .child(body_role)
            .and_then(|body| body.find_asset_ref(asset_kind));
        match asset {
            Some(asset_ref) => {
                out.push_str("\n![](");
                out.push_str(&join_path(asset_base, asset_ref));
                out.push_str(")\n");
            }
            None => log::debug!("{} without {} asset, rendering text only", body_role, asset_kind),
        }

        for role in text_roles {
            if let Some(leaf) = composite.child(*role) {
                out.push_str(&self.assembler.merge_lines(&leaf.lines));
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Line, PdfType, Span};
    use crate::render::RenderMode;

    fn doc(blocks: Vec<Block>) -> Document {
        Document::with_pages(PdfType::Txt, vec![Page::with_blocks(0, blocks)])
    }

    #[test]
    fn test_text_paragraph() {
        let md = to_markdown(&doc(vec![Block::text_line("Hello")]), "");
        assert_eq!(md, "Hello  ");
    }

    #[test]
    fn test_title_paragraph() {
        let md = to_markdown(&doc(vec![Block::title(vec![Line::single(Span::text("Intro"))])]), "");
        assert_eq!(md, "# Intro  ");
    }

    #[test]
    fn test_paragraphs_joined_with_blank_line() {
        let md = to_markdown(
            &doc(vec![Block::text_line("One"), Block::text_line("   "), Block::text_line("Two")]),
            "",
        );
        assert_eq!(md, "One  \n\nTwo  ");
    }

    #[test]
    fn test_image_with_caption() {
        let block = Block::image("fig1.png", Some(vec![Line::single(Span::text("Figure 1"))]));
        let md = to_markdown(&doc(vec![block]), "imgs");
        assert_eq!(md, "\n![](imgs/fig1.png)\nFigure 1  ");
    }

    #[test]
    fn test_image_children_fixed_order() {
        let block = Block::Image(CompositeBlock::new(vec![
            Block::ImageCaption(crate::model::LeafBlock::new(vec![Line::single(Span::text(
                "Caption",
            ))])),
            Block::ImageBody(crate::model::LeafBlock::new(vec![Line::single(Span::image(
                "a.png",
            ))])),
        ]));
        let md = to_markdown(&doc(vec![block]), "");
        assert_eq!(md, "\n![](a.png)\nCaption  ");
    }

    #[test]
    fn test_table_body_caption_footnote() {
        let block = Block::table(
            "t1.png",
            Some(vec![Line::single(Span::text("Table 1"))]),
            Some(vec![Line::single(Span::text("Source: survey"))]),
        );
        let md = to_markdown(&doc(vec![block]), "imgs/");
        assert_eq!(md, "\n![](imgs/t1.png)\nTable 1 Source: survey  ");
    }

    #[test]
    fn test_text_only_drops_assets() {
        let renderer = MarkdownRenderer::new(RenderOptions::new().with_mode(RenderMode::TextOnly));
        let document = doc(vec![
            Block::table("t1.png", Some(vec![Line::single(Span::text("Table 1"))]), None),
            Block::text_line("Body"),
        ]);
        assert_eq!(renderer.render(&document, "imgs"), "Body  ");
    }

    #[test]
    fn test_unknown_blocks_dropped() {
        let md = to_markdown(&doc(vec![Block::Unknown, Block::text_line("Kept")]), "");
        assert_eq!(md, "Kept  ");
    }

    #[test]
    fn test_render_pages_dense_numbering() {
        let document = Document::with_pages(
            PdfType::Txt,
            vec![
                Page::with_blocks(0, vec![Block::text_line("First")]),
                Page::new(1),
                Page::with_blocks(2, vec![Block::text_line("Third")]),
            ],
        );
        let pages = MarkdownRenderer::default().render_pages(&document, "");
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].page_no, 0);
        assert_eq!(pages[1].page_no, 1);
        assert_eq!(pages[1].md_content, "Third  ");
    }
}
