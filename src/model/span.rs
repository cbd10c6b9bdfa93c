//! Line and span types.

use serde::{Deserialize, Serialize};

/// A visual line: spans in reading order, resolved upstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Spans in reading order
    #[serde(default)]
    pub spans: Vec<Span>,
}

impl Line {
    /// Create a line from spans.
    pub fn new(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    /// Create a line holding a single span.
    pub fn single(span: Span) -> Self {
        Self { spans: vec![span] }
    }

    /// Check if the line has no spans.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

/// The smallest unit of content.
///
/// Textual kinds carry `content`; image and table kinds carry the logical
/// path of the stored bitmap in `image_path`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Span {
    /// Plain text
    Text {
        /// Text content
        #[serde(default)]
        content: String,
    },

    /// Inline LaTeX equation
    InlineEquation {
        /// LaTeX body without delimiters
        #[serde(default)]
        content: String,
    },

    /// Display (interline) LaTeX equation
    InterlineEquation {
        /// LaTeX body without delimiters
        #[serde(default)]
        content: String,
    },

    /// Cropped image
    Image {
        /// Asset reference of the stored image
        #[serde(default, skip_serializing_if = "Option::is_none")]
        image_path: Option<String>,
    },

    /// Cropped table bitmap
    Table {
        /// Asset reference of the stored image
        #[serde(default, skip_serializing_if = "Option::is_none")]
        image_path: Option<String>,
    },

    /// A span kind this version does not know about
    #[serde(other)]
    Unknown,
}

impl Span {
    /// Create a text span.
    pub fn text(content: impl Into<String>) -> Self {
        Span::Text {
            content: content.into(),
        }
    }

    /// Create an inline equation span.
    pub fn inline_equation(content: impl Into<String>) -> Self {
        Span::InlineEquation {
            content: content.into(),
        }
    }

    /// Create an interline equation span.
    pub fn interline_equation(content: impl Into<String>) -> Self {
        Span::InterlineEquation {
            content: content.into(),
        }
    }

    /// Create an image span.
    pub fn image(image_path: impl Into<String>) -> Self {
        Span::Image {
            image_path: Some(image_path.into()),
        }
    }

    /// Create a table span.
    pub fn table(image_path: impl Into<String>) -> Self {
        Span::Table {
            image_path: Some(image_path.into()),
        }
    }

    /// Get the content type of this span.
    pub fn content_type(&self) -> ContentType {
        match self {
            Span::Text { .. } => ContentType::Text,
            Span::InlineEquation { .. } => ContentType::InlineEquation,
            Span::InterlineEquation { .. } => ContentType::InterlineEquation,
            Span::Image { .. } => ContentType::Image,
            Span::Table { .. } => ContentType::Table,
            Span::Unknown => ContentType::Unknown,
        }
    }

    /// Textual content, for text and equation spans.
    pub fn text_content(&self) -> Option<&str> {
        match self {
            Span::Text { content }
            | Span::InlineEquation { content }
            | Span::InterlineEquation { content } => Some(content),
            _ => None,
        }
    }

    /// Asset reference, for image and table spans.
    pub fn asset_ref(&self) -> Option<&str> {
        match self {
            Span::Image { image_path } | Span::Table { image_path } => {
                image_path.as_deref().filter(|p| !p.is_empty())
            }
            _ => None,
        }
    }
}

/// Kind tag of a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// Plain text
    Text,
    /// Inline equation
    InlineEquation,
    /// Interline equation
    InterlineEquation,
    /// Image
    Image,
    /// Table
    Table,
    /// Unrecognised kind
    Unknown,
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentType::Text => write!(f, "text"),
            ContentType::InlineEquation => write!(f, "inline_equation"),
            ContentType::InterlineEquation => write!(f, "interline_equation"),
            ContentType::Image => write!(f, "image"),
            ContentType::Table => write!(f, "table"),
            ContentType::Unknown => write!(f, "unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_accessors() {
        let text = Span::text("Hello");
        assert_eq!(text.text_content(), Some("Hello"));
        assert_eq!(text.asset_ref(), None);

        let image = Span::image("fig1.png");
        assert_eq!(image.text_content(), None);
        assert_eq!(image.asset_ref(), Some("fig1.png"));
        assert_eq!(image.content_type(), ContentType::Image);
    }

    #[test]
    fn test_empty_image_path_is_no_asset() {
        let span = Span::Image {
            image_path: Some(String::new()),
        };
        assert_eq!(span.asset_ref(), None);
    }

    #[test]
    fn test_span_wire_format() {
        let span: Span =
            serde_json::from_str(r#"{"type":"inline_equation","content":"x^2","score":0.9}"#)
                .unwrap();
        assert_eq!(span, Span::inline_equation("x^2"));

        let span: Span = serde_json::from_str(r#"{"type":"table","image_path":"t.jpg"}"#).unwrap();
        assert_eq!(span.asset_ref(), Some("t.jpg"));
    }

    #[test]
    fn test_unknown_span_kind() {
        let span: Span = serde_json::from_str(r#"{"type":"hologram","content":"?"}"#).unwrap();
        assert_eq!(span, Span::Unknown);
        assert_eq!(span.content_type(), ContentType::Unknown);
    }
}
