//! Uniform content list rendering.
//!
//! Each top-level block becomes one typed record, in reading order. This is
//! the machine-facing counterpart of the Markdown output.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{Block, BlockType, CompositeBlock, Document};
use crate::text::TextAssembler;

use super::{join_path, RenderOptions};

/// Format tag attached to equation records.
pub const LATEX_FORMAT: &str = "latex";

/// Convert a document to a content list with default options.
pub fn to_content_list(doc: &Document, asset_base: &str) -> Vec<ContentItem> {
    ContentListRenderer::default().render(doc, asset_base)
}

/// One record of the uniform content list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentItem {
    /// Paragraph or title text
    Text {
        /// Assembled text
        text: String,
        /// Heading level; set to 1 for titles
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text_level: Option<u8>,
    },

    /// Display equation
    Equation {
        /// Assembled equation text
        text: String,
        /// Always [`LATEX_FORMAT`]
        text_format: String,
    },

    /// Figure
    Image {
        /// Resolved asset path
        img_path: String,
        /// Caption text
        #[serde(default, skip_serializing_if = "Option::is_none")]
        img_caption: Option<String>,
    },

    /// Table rendered as a bitmap
    Table {
        /// Resolved asset path
        img_path: String,
        /// Caption text
        #[serde(default, skip_serializing_if = "Option::is_none")]
        table_caption: Option<String>,
        /// Footnote text
        #[serde(default, skip_serializing_if = "Option::is_none")]
        table_footnote: Option<String>,
    },
}

impl ContentItem {
    /// Record kind as written on the wire.
    pub fn kind(&self) -> &'static str {
        match self {
            ContentItem::Text { .. } => "text",
            ContentItem::Equation { .. } => "equation",
            ContentItem::Image { .. } => "image",
            ContentItem::Table { .. } => "table",
        }
    }

    /// Resolved asset path of image and table records.
    pub fn asset_path(&self) -> Option<&str> {
        match self {
            ContentItem::Image { img_path, .. } | ContentItem::Table { img_path, .. } => {
                Some(img_path)
            }
            _ => None,
        }
    }
}

/// Renderer for the uniform content list.
#[derive(Debug, Clone, Default)]
pub struct ContentListRenderer {
    options: RenderOptions,
    assembler: TextAssembler,
}

impl ContentListRenderer {
    /// Create a new content list renderer.
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

    /// Render the document, dropping blocks that violate their structure.
    ///
    /// A malformed block is logged and skipped; its siblings still render.
    pub fn render(&self, doc: &Document, asset_base: &str) -> Vec<ContentItem> {
        self.render_checked(doc, asset_base)
            .into_iter()
            .filter_map(|record| match record {
                Ok(item) => Some(item),
                Err(e) => {
                    log::warn!("dropping content record: {}", e);
                    None
                }
            })
            .collect()
    }

    /// Render the document, keeping per-block structural errors.
    ///
    /// Blocks that produce no record at all (empty text, assets in
    /// text-only mode, unknown kinds) do not appear.
    pub fn render_checked(&self, doc: &Document, asset_base: &str) -> Vec<Result<ContentItem>> {
        let mut records = Vec::new();
        for page in &doc.pdf_info {
            for (index, block) in page.para_blocks.iter().enumerate() {
                match self.render_block(block, asset_base) {
                    Ok(Some(item)) => records.push(Ok(item)),
                    Ok(None) => {}
                    Err(Error::Structural(msg)) => records.push(Err(Error::Structural(format!(
                        "page {} block {}: {}",
                        page.page_idx, index, msg
                    )))),
                    Err(e) => records.push(Err(e)),
                }
            }
        }
        records
    }

    /// Render a single top-level block.
    ///
    /// Returns `Ok(None)` for blocks that yield no record.
    pub fn render_block(&self, block: &Block, asset_base: &str) -> Result<Option<ContentItem>> {
        let item = match block {
            Block::Text(leaf) => ContentItem::Text {
                text: self.assembler.merge_lines(&leaf.lines),
                text_level: None,
            },
            Block::Title(leaf) => ContentItem::Text {
                text: self.assembler.merge_lines(&leaf.lines),
                text_level: Some(1),
            },
            Block::InterlineEquation(leaf) => ContentItem::Equation {
                text: self.assembler.merge_lines(&leaf.lines),
                text_format: LATEX_FORMAT.to_string(),
            },
            Block::Image(_) | Block::Table(_) if !self.options.mode.includes_assets() => {
                return Ok(None)
            }
            Block::Image(composite) => ContentItem::Image {
                img_path: self.body_path(composite, BlockType::ImageBody, asset_base)?,
                img_caption: self.role_text(composite, BlockType::ImageCaption),
            },
            Block::Table(composite) => ContentItem::Table {
                img_path: self.body_path(composite, BlockType::TableBody, asset_base)?,
                table_caption: self.role_text(composite, BlockType::TableCaption),
                table_footnote: self.role_text(composite, BlockType::TableFootnote),
            },
            _ => return Ok(None),
        };

        match &item {
            ContentItem::Text { text, .. } | ContentItem::Equation { text, .. }
                if text.trim().is_empty() =>
            {
                Ok(None)
            }
            _ => Ok(Some(item)),
        }
    }

    fn body_path(
        &self,
        composite: &CompositeBlock,
        body_role: BlockType,
        asset_base: &str,
    ) -> Result<String> {
        let body = composite
            .child(body_role)
            .ok_or_else(|| Error::Structural(format!("missing {} child", body_role)))?;
        let asset_ref = body
            .leading_asset_ref()
            .ok_or_else(|| Error::Structural(format!("{} has no asset reference", body_role)))?;
        Ok(join_path(asset_base, asset_ref))
    }

    fn role_text(&self, composite: &CompositeBlock, role: BlockType) -> Option<String> {
        composite
            .child(role)
            .map(|leaf| self.assembler.merge_lines(&leaf.lines))
    }
}
