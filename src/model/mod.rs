//! Content model for parsed document mid-data.
//!
//! This module defines the immutable tree (Page → Block → Line → Span) handed
//! over by the external parse engine. Every node kind is a closed enum so the
//! renderer can match exhaustively; unrecognised kinds deserialize to an
//! `Unknown` variant and render as empty content.

mod block;
mod document;
mod page;
mod span;

pub use block::{Block, BlockType, CompositeBlock, LeafBlock};
pub use document::{Document, PdfType, StructureIssue};
pub use page::Page;
pub use span::{ContentType, Line, Span};
