//! Local file locators with optional byte ranges.
//!
//! A locator is a path, optionally followed by `?bytes=offset,length` to
//! address one record inside a larger file such as a JSONL manifest.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;
use serde_json::Value;

const RANGE_PREFIX: &str = "bytes=";

/// A file path plus an optional byte range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    pub path: PathBuf,
    /// `(offset, length)` in bytes
    pub range: Option<(u64, u64)>,
}

impl Locator {
    /// File name without extension, used to name output artifacts.
    pub fn stem(&self) -> Option<String> {
        self.path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
    }

    /// Read the addressed bytes.
    pub fn read(&self) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
        let mut file = File::open(&self.path)
            .map_err(|e| format!("Cannot open {}: {}", self.path.display(), e))?;
        let mut data = Vec::new();
        match self.range {
            Some((offset, length)) => {
                file.seek(SeekFrom::Start(offset))?;
                file.take(length).read_to_end(&mut data)?;
                if (data.len() as u64) < length {
                    return Err(format!(
                        "Range {},{} is past the end of {}",
                        offset,
                        length,
                        self.path.display()
                    )
                    .into());
                }
            }
            None => {
                file.read_to_end(&mut data)?;
            }
        }
        Ok(data)
    }
}

impl FromStr for Locator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some((scheme, _)) = s.split_once("://") {
            return Err(format!(
                "Unsupported locator scheme '{}': only local paths are supported",
                scheme
            ));
        }

        let (path, query) = match s.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (s, None),
        };
        if path.is_empty() {
            return Err("Empty locator path".to_string());
        }

        let mut range = None;
        for param in query.into_iter().flat_map(|q| q.split('&')) {
            if let Some(spec) = param.strip_prefix(RANGE_PREFIX) {
                range = Some(parse_range(spec)?);
            }
        }

        Ok(Self {
            path: PathBuf::from(path),
            range,
        })
    }
}

fn parse_range(spec: &str) -> Result<(u64, u64), String> {
    let (offset, length) = spec
        .split_once(',')
        .ok_or_else(|| format!("Invalid byte range '{}', expected offset,length", spec))?;
    let offset = offset
        .trim()
        .parse()
        .map_err(|_| format!("Invalid range offset '{}'", offset))?;
    let length = length
        .trim()
        .parse()
        .map_err(|_| format!("Invalid range length '{}'", length))?;
    Ok((offset, length))
}

/// One manifest record: where the PDF lives and its layout inference output.
#[derive(Debug, Clone, Deserialize)]
pub struct ManifestRecord {
    pub file_location: String,
    pub doc_layout_result: Value,
}

impl ManifestRecord {
    /// Read the first record addressed by a manifest locator.
    pub fn read(locator: &Locator) -> Result<Self, Box<dyn std::error::Error>> {
        let data = locator.read()?;
        let text = String::from_utf8(data)
            .map_err(|_| format!("Manifest {} is not UTF-8", locator.path.display()))?;
        let line = text
            .lines()
            .find(|line| !line.trim().is_empty())
            .ok_or_else(|| format!("No record found in {}", locator.path.display()))?;
        Ok(serde_json::from_str(line)?)
    }

    /// Locator of the document this record describes.
    pub fn document_locator(&self) -> Result<Locator, String> {
        self.file_location.parse()
    }
}

/// Path of the model file that sits next to a PDF.
pub fn default_model_path(pdf: &Path) -> PathBuf {
    pdf.with_extension("json")
}
