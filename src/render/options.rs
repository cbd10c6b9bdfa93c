//! Rendering options and configuration.

use std::fmt;
use std::str::FromStr;

/// Whether image and table assets contribute to the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RenderMode {
    /// Include image/table references ("mm")
    #[default]
    Multimedia,
    /// Drop image/table blocks entirely ("nlp")
    TextOnly,
}

impl RenderMode {
    /// Short name used in logs and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderMode::Multimedia => "mm",
            RenderMode::TextOnly => "nlp",
        }
    }

    /// Check if asset blocks are rendered.
    pub fn includes_assets(&self) -> bool {
        matches!(self, RenderMode::Multimedia)
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RenderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mm" | "multimedia" => Ok(RenderMode::Multimedia),
            "nlp" | "text" | "text-only" => Ok(RenderMode::TextOnly),
            other => Err(format!("unknown render mode: {}", other)),
        }
    }
}

/// Options for rendering document content.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Asset mode
    pub mode: RenderMode,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the asset mode.
    pub fn with_mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    /// Shorthand for text-only rendering.
    pub fn text_only() -> Self {
        Self::new().with_mode(RenderMode::TextOnly)
    }
}

/// Resolve an asset reference against a base path.
///
/// One `/` separates the two parts no matter how either side is slashed.
/// An empty base leaves the reference unchanged.
pub fn join_path(base: &str, asset_ref: &str) -> String {
    let base = base.trim_end_matches('/');
    if base.is_empty() {
        return asset_ref.to_string();
    }
    format!("{}/{}", base, asset_ref.trim_start_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("imgs", "fig1.png"), "imgs/fig1.png");
        assert_eq!(join_path("imgs/", "/fig1.png"), "imgs/fig1.png");
        assert_eq!(join_path("s3://bucket/doc", "a/b.jpg"), "s3://bucket/doc/a/b.jpg");
        assert_eq!(join_path("", "fig1.png"), "fig1.png");
    }

    #[test]
    fn test_render_mode_parse() {
        assert_eq!("mm".parse::<RenderMode>(), Ok(RenderMode::Multimedia));
        assert_eq!("NLP".parse::<RenderMode>(), Ok(RenderMode::TextOnly));
        assert!("html".parse::<RenderMode>().is_err());
        assert_eq!(RenderMode::TextOnly.to_string(), "nlp");
    }

    #[test]
    fn test_options_builder() {
        let options = RenderOptions::new();
        assert!(options.mode.includes_assets());
        assert_eq!(RenderOptions::text_only().mode, RenderMode::TextOnly);
    }
}
