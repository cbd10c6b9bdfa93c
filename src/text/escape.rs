//! Markdown escaping for plain text spans.

/// Characters that are backslash-escaped in plain text.
///
/// `$` is included because equations are delimited with it.
pub const MARKDOWN_SPECIAL_CHARS: &[char] = &['\\', '`', '*', '_', '~', '#', '[', ']', '$'];

/// Escape special Markdown characters.
///
/// Only used on text span content. Equation bodies and asset paths are
/// emitted verbatim.
pub fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        if MARKDOWN_SPECIAL_CHARS.contains(&c) {
            result.push('\\');
        }
        result.push(c);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_markdown() {
        assert_eq!(escape_markdown("Hello *world*"), "Hello \\*world\\*");
        assert_eq!(escape_markdown("[link]"), "\\[link\\]");
        assert_eq!(escape_markdown("snake_case # $5"), "snake\\_case \\# \\$5");
        assert_eq!(escape_markdown("a\\b"), "a\\\\b");
    }

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(escape_markdown("Hello, world!"), "Hello, world!");
        assert_eq!(escape_markdown("中文文本"), "中文文本");
        assert_eq!(escape_markdown(""), "");
    }
}
