//! Rendering of document mid-data.
//!
//! Two modes share one traversal and one text assembler: Markdown for
//! people, and the uniform content list for downstream tools.

mod content_list;
mod json;
mod markdown;
mod options;

pub use content_list::{to_content_list, ContentItem, ContentListRenderer, LATEX_FORMAT};
pub use json::{to_json, JsonFormat};
pub use markdown::{to_markdown, MarkdownRenderer, PageMarkdown};
pub use options::{join_path, RenderMode, RenderOptions};
