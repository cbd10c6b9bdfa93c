//! On-disk output artifacts.
//!
//! A converted document gets its own directory,
//! `<root>/<doc_name>/<method>/`, holding the Markdown, the mid-data dump,
//! the content list and an `images/` directory that the Markdown links into.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::pipe::{Pipe, PipeMethod};
use crate::render::{to_json, JsonFormat};

/// Name of the image directory, also used as the asset base in Markdown.
pub const IMAGE_DIR_NAME: &str = "images";

/// Directory layout for one document's artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    doc_name: String,
    dir: PathBuf,
    image_dir: PathBuf,
}

impl OutputLayout {
    /// Create the output and image directories for a document.
    ///
    /// Existing directories are reused.
    pub fn prepare(root: impl AsRef<Path>, doc_name: &str, method: PipeMethod) -> Result<Self> {
        if doc_name.is_empty() {
            return Err(Error::Render("document name is empty".to_string()));
        }

        let dir = root.as_ref().join(doc_name).join(method.as_str());
        let image_dir = dir.join(IMAGE_DIR_NAME);
        fs::create_dir_all(&image_dir)?;

        Ok(Self {
            doc_name: doc_name.to_string(),
            dir,
            image_dir,
        })
    }

    /// Document name used for artifact file names.
    pub fn doc_name(&self) -> &str {
        &self.doc_name
    }

    /// Directory holding the artifacts.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Directory for extracted images.
    pub fn image_dir(&self) -> &Path {
        &self.image_dir
    }

    /// Path of the Markdown file.
    pub fn markdown_path(&self) -> PathBuf {
        self.dir.join(format!("{}.md", self.doc_name))
    }

    /// Path of the mid-data dump.
    pub fn mid_data_path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", self.doc_name))
    }

    /// Path of the content list.
    pub fn content_list_path(&self) -> PathBuf {
        self.dir.join(format!("{}_content_list.json", self.doc_name))
    }
}

/// Files written by [`write_artifacts`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    /// Markdown file
    pub markdown: PathBuf,
    /// Mid-data dump
    pub mid_data: PathBuf,
    /// Uniform content list
    pub content_list: PathBuf,
}

/// Render a parsed pipe and write its three artifacts.
///
/// Images are referenced relative to the Markdown file, under
/// [`IMAGE_DIR_NAME`].
pub fn write_artifacts(pipe: &mut Pipe, layout: &OutputLayout) -> Result<ArtifactPaths> {
    let markdown = pipe.render_markdown(IMAGE_DIR_NAME)?;
    let content_list = pipe.render_uniform(IMAGE_DIR_NAME)?;
    let document = pipe.document().ok_or_else(|| Error::IllegalState {
        operation: "write artifacts",
        state: pipe.state().to_string(),
    })?;

    let paths = ArtifactPaths {
        markdown: layout.markdown_path(),
        mid_data: layout.mid_data_path(),
        content_list: layout.content_list_path(),
    };

    fs::write(&paths.markdown, markdown)?;
    fs::write(&paths.mid_data, to_json(document, JsonFormat::Pretty)?)?;
    fs::write(&paths.content_list, to_json(&content_list, JsonFormat::Pretty)?)?;

    log::debug!("wrote artifacts to {}", layout.dir().display());
    Ok(paths)
}
