//! Text assembly utilities.
//!
//! Pure functions and read-only services shared by both render modes:
//! Markdown escaping, CJK/Latin script detection, dictionary-based splitting
//! of run-together words, and the per-span assembly that ties them together.

mod assemble;
mod escape;
mod language;
mod segment;

pub use assemble::TextAssembler;
pub use escape::{escape_markdown, MARKDOWN_SPECIAL_CHARS};
pub use language::{is_cjk_char, LanguageDetector, Script, ScriptDetector};
pub use segment::{WordDictionary, WordSegmenter, LONG_WORD_THRESHOLD};
