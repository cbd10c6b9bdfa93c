//! Per-span text assembly shared by both render modes.

use std::fmt;
use std::sync::Arc;

use super::{escape_markdown, LanguageDetector, ScriptDetector, WordSegmenter};
use crate::model::{Line, Span};

/// Merges the lines of a leaf block into one paragraph string.
///
/// Latin text spans are segmented, escaped and followed by a single space.
/// CJK text spans are escaped and concatenated directly. Equations are
/// wrapped in their delimiters; image and table spans contribute nothing.
#[derive(Clone)]
pub struct TextAssembler {
    detector: Arc<dyn LanguageDetector>,
    segmenter: WordSegmenter,
}

impl TextAssembler {
    /// Create an assembler with a custom detector and segmenter.
    pub fn new(detector: Arc<dyn LanguageDetector>, segmenter: WordSegmenter) -> Self {
        Self {
            detector,
            segmenter,
        }
    }

    /// Concatenate the assembled text of every span, line by line.
    pub fn merge_lines(&self, lines: &[Line]) -> String {
        let mut text = String::new();
        for span in lines.iter().flat_map(|line| line.spans.iter()) {
            self.push_span(&mut text, span);
        }
        text
    }

    fn push_span(&self, out: &mut String, span: &Span) {
        match span {
            Span::Text { content } => {
                if content.is_empty() {
                    return;
                }
                if self.detector.detect(content).uses_word_spacing() {
                    let segmented = self.segmenter.split_long_words(content);
                    out.push_str(&escape_markdown(&segmented));
                    out.push(' ');
                } else {
                    out.push_str(&escape_markdown(content));
                }
            }
            Span::InlineEquation { content } => {
                out.push('$');
                out.push_str(content);
                out.push('$');
            }
            Span::InterlineEquation { content } => {
                out.push_str("\n$$\n");
                out.push_str(content);
                out.push_str("\n$$\n");
            }
            Span::Image { .. } | Span::Table { .. } | Span::Unknown => {}
        }
    }
}

impl Default for TextAssembler {
    fn default() -> Self {
        Self::new(Arc::new(ScriptDetector::new()), WordSegmenter::default())
    }
}

impl fmt::Debug for TextAssembler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextAssembler")
            .field("segmenter", &self.segmenter)
            .finish_non_exhaustive()
    }
}
