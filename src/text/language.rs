//! Script detection for text spans.

/// Writing-system family of a text span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Script {
    /// Chinese, Japanese or Korean: no spaces between words
    Cjk,
    /// Alphabetic scripts with space-separated words
    Latin,
}

impl Script {
    /// Check if consecutive spans of this script need a separating space.
    pub fn uses_word_spacing(&self) -> bool {
        matches!(self, Script::Latin)
    }
}

/// Decides the script of a piece of text.
pub trait LanguageDetector: Send + Sync {
    /// Classify `text` as CJK or Latin.
    fn detect(&self, text: &str) -> Script;
}

/// Character-counting detector.
///
/// Text is CJK when it has at least one CJK character and CJK characters
/// are not outnumbered by other letters. Text without letters is Latin.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptDetector;

impl ScriptDetector {
    /// Create a new detector.
    pub fn new() -> Self {
        Self
    }
}

impl LanguageDetector for ScriptDetector {
    fn detect(&self, text: &str) -> Script {
        let mut cjk = 0usize;
        let mut other = 0usize;
        for c in text.chars() {
            if is_cjk_char(c) {
                cjk += 1;
            } else if c.is_alphabetic() {
                other += 1;
            }
        }

        if cjk > 0 && cjk >= other {
            Script::Cjk
        } else {
            Script::Latin
        }
    }
}

/// Check if a character belongs to a CJK block.
#[inline]
pub fn is_cjk_char(c: char) -> bool {
    let code = c as u32;
    (0x4E00..=0x9FFF).contains(&code) || // CJK Unified Ideographs
    (0x3400..=0x4DBF).contains(&code) || // CJK Extension A
    (0xF900..=0xFAFF).contains(&code) || // CJK Compatibility Ideographs
    (0x3000..=0x303F).contains(&code) || // CJK Symbols and Punctuation
    (0x3040..=0x309F).contains(&code) || // Hiragana
    (0x30A0..=0x30FF).contains(&code) || // Katakana
    (0x1100..=0x11FF).contains(&code) || // Hangul Jamo
    (0xAC00..=0xD7AF).contains(&code) || // Hangul Syllables
    (0xFF00..=0xFFEF).contains(&code) // Halfwidth and Fullwidth Forms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_latin() {
        let detector = ScriptDetector::new();
        assert_eq!(detector.detect("Hello world"), Script::Latin);
        assert_eq!(detector.detect("Überprüfung der Ergebnisse"), Script::Latin);
        assert_eq!(detector.detect("2024"), Script::Latin);
        assert_eq!(detector.detect(""), Script::Latin);
    }

    #[test]
    fn test_detect_cjk() {
        let detector = ScriptDetector::new();
        assert_eq!(detector.detect("文档解析"), Script::Cjk);
        assert_eq!(detector.detect("これはテストです"), Script::Cjk);
        assert_eq!(detector.detect("한국어 문서"), Script::Cjk);
        assert_eq!(detector.detect("使用PDF文件"), Script::Cjk);
        assert_eq!(detector.detect("，。"), Script::Cjk);
    }

    #[test]
    fn test_mixed_text_majority() {
        let detector = ScriptDetector::new();
        assert_eq!(detector.detect("The word 中 appears once"), Script::Latin);
    }

    #[test]
    fn test_word_spacing() {
        assert!(Script::Latin.uses_word_spacing());
        assert!(!Script::Cjk.uses_word_spacing());
    }
}
