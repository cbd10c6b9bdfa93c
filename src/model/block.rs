//! Block-level types.

use super::{ContentType, Line, Span};
use serde::{Deserialize, Serialize};

/// A layout block.
///
/// `Text`, `Title` and `InterlineEquation` are the leaf paragraph kinds.
/// `Image` and `Table` are composites whose children play a fixed role
/// (body, caption, footnote). The role kinds only appear as children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// Body text paragraph
    Text(LeafBlock),

    /// Section title
    Title(LeafBlock),

    /// Display equation paragraph
    InterlineEquation(LeafBlock),

    /// Figure: one `ImageBody`, optional `ImageCaption`
    Image(CompositeBlock),

    /// Table: one `TableBody`, optional `TableCaption` and `TableFootnote`
    Table(CompositeBlock),

    /// Image bitmap holder
    ImageBody(LeafBlock),

    /// Image caption text
    ImageCaption(LeafBlock),

    /// Table bitmap holder
    TableBody(LeafBlock),

    /// Table caption text
    TableCaption(LeafBlock),

    /// Table footnote text
    TableFootnote(LeafBlock),

    /// A block kind this version does not know about
    #[serde(other)]
    Unknown,
}

impl Block {
    /// Create a text block.
    pub fn text(lines: Vec<Line>) -> Self {
        Block::Text(LeafBlock::new(lines))
    }

    /// Create a text block holding one line with one text span.
    pub fn text_line(content: impl Into<String>) -> Self {
        Block::text(vec![Line::single(Span::text(content))])
    }

    /// Create a title block.
    pub fn title(lines: Vec<Line>) -> Self {
        Block::Title(LeafBlock::new(lines))
    }

    /// Create an interline equation block from a LaTeX body.
    pub fn interline_equation(latex: impl Into<String>) -> Self {
        Block::InterlineEquation(LeafBlock::new(vec![Line::single(
            Span::interline_equation(latex),
        )]))
    }

    /// Create an image block from an asset reference and optional caption.
    pub fn image(asset_ref: impl Into<String>, caption: Option<Vec<Line>>) -> Self {
        let mut blocks = vec![Block::ImageBody(LeafBlock::new(vec![Line::single(
            Span::image(asset_ref),
        )]))];
        if let Some(lines) = caption {
            blocks.push(Block::ImageCaption(LeafBlock::new(lines)));
        }
        Block::Image(CompositeBlock::new(blocks))
    }

    /// Create a table block from an asset reference, caption and footnote.
    pub fn table(
        asset_ref: impl Into<String>,
        caption: Option<Vec<Line>>,
        footnote: Option<Vec<Line>>,
    ) -> Self {
        let mut blocks = vec![Block::TableBody(LeafBlock::new(vec![Line::single(
            Span::table(asset_ref),
        )]))];
        if let Some(lines) = caption {
            blocks.push(Block::TableCaption(LeafBlock::new(lines)));
        }
        if let Some(lines) = footnote {
            blocks.push(Block::TableFootnote(LeafBlock::new(lines)));
        }
        Block::Table(CompositeBlock::new(blocks))
    }

    /// Get the kind tag of this block.
    pub fn block_type(&self) -> BlockType {
        match self {
            Block::Text(_) => BlockType::Text,
            Block::Title(_) => BlockType::Title,
            Block::InterlineEquation(_) => BlockType::InterlineEquation,
            Block::Image(_) => BlockType::Image,
            Block::Table(_) => BlockType::Table,
            Block::ImageBody(_) => BlockType::ImageBody,
            Block::ImageCaption(_) => BlockType::ImageCaption,
            Block::TableBody(_) => BlockType::TableBody,
            Block::TableCaption(_) => BlockType::TableCaption,
            Block::TableFootnote(_) => BlockType::TableFootnote,
            Block::Unknown => BlockType::Unknown,
        }
    }

    /// Lines of a leaf block; `None` for composites and unknown blocks.
    pub fn as_leaf(&self) -> Option<&LeafBlock> {
        match self {
            Block::Text(leaf)
            | Block::Title(leaf)
            | Block::InterlineEquation(leaf)
            | Block::ImageBody(leaf)
            | Block::ImageCaption(leaf)
            | Block::TableBody(leaf)
            | Block::TableCaption(leaf)
            | Block::TableFootnote(leaf) => Some(leaf),
            _ => None,
        }
    }

    /// Children of a composite block; `None` for everything else.
    pub fn as_composite(&self) -> Option<&CompositeBlock> {
        match self {
            Block::Image(composite) | Block::Table(composite) => Some(composite),
            _ => None,
        }
    }
}

/// Kind tag of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockType {
    Text,
    Title,
    InterlineEquation,
    Image,
    Table,
    ImageBody,
    ImageCaption,
    TableBody,
    TableCaption,
    TableFootnote,
    Unknown,
}

impl BlockType {
    /// Check if this kind may appear directly in a page's paragraph list.
    pub fn is_top_level(&self) -> bool {
        matches!(
            self,
            BlockType::Text
                | BlockType::Title
                | BlockType::InterlineEquation
                | BlockType::Image
                | BlockType::Table
                | BlockType::Unknown
        )
    }
}

impl std::fmt::Display for BlockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BlockType::Text => "text",
            BlockType::Title => "title",
            BlockType::InterlineEquation => "interline_equation",
            BlockType::Image => "image",
            BlockType::Table => "table",
            BlockType::ImageBody => "image_body",
            BlockType::ImageCaption => "image_caption",
            BlockType::TableBody => "table_body",
            BlockType::TableCaption => "table_caption",
            BlockType::TableFootnote => "table_footnote",
            BlockType::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// A block that owns lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeafBlock {
    /// Lines in reading order
    #[serde(default)]
    pub lines: Vec<Line>,
}

impl LeafBlock {
    /// Create a leaf block from lines.
    pub fn new(lines: Vec<Line>) -> Self {
        Self { lines }
    }

    /// Asset reference of the first span of the first line.
    ///
    /// This is where body blocks carry their bitmap.
    pub fn leading_asset_ref(&self) -> Option<&str> {
        self.lines.first()?.spans.first()?.asset_ref()
    }

    /// First asset reference of the given span kind, scanning every line.
    pub fn find_asset_ref(&self, kind: ContentType) -> Option<&str> {
        self.lines
            .iter()
            .flat_map(|line| line.spans.iter())
            .filter(|span| span.content_type() == kind)
            .find_map(Span::asset_ref)
    }
}

/// A block that owns role-tagged child blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompositeBlock {
    /// Child blocks, in whatever order upstream produced them
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl CompositeBlock {
    /// Create a composite block from children.
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// First child with the given role.
    pub fn child(&self, role: BlockType) -> Option<&LeafBlock> {
        self.children(role).next()
    }

    /// All children with the given role, in array order.
    pub fn children(&self, role: BlockType) -> impl Iterator<Item = &LeafBlock> {
        self.blocks
            .iter()
            .filter(move |block| block.block_type() == role)
            .filter_map(Block::as_leaf)
    }
}
