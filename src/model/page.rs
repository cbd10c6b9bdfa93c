//! Page-level types.

use super::Block;
use serde::{Deserialize, Serialize};

/// A single page of mid-data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Position of the page in the source document (0-indexed)
    #[serde(default)]
    pub page_idx: usize,

    /// Top-level blocks in reading order
    #[serde(default)]
    pub para_blocks: Vec<Block>,
}

impl Page {
    /// Create a new empty page.
    pub fn new(page_idx: usize) -> Self {
        Self {
            page_idx,
            para_blocks: Vec::new(),
        }
    }

    /// Create a page from blocks.
    pub fn with_blocks(page_idx: usize, para_blocks: Vec<Block>) -> Self {
        Self {
            page_idx,
            para_blocks,
        }
    }

    /// Check if the page has no blocks.
    pub fn is_empty(&self) -> bool {
        self.para_blocks.is_empty()
    }

    /// Get the number of top-level blocks.
    pub fn block_count(&self) -> usize {
        self.para_blocks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_new() {
        let page = Page::new(3);
        assert_eq!(page.page_idx, 3);
        assert!(page.is_empty());
    }

    #[test]
    fn test_page_missing_blocks_key() {
        let page: Page = serde_json::from_str(r#"{"page_idx": 2, "page_size": [612, 792]}"#).unwrap();
        assert_eq!(page.page_idx, 2);
        assert_eq!(page.block_count(), 0);
    }
}
