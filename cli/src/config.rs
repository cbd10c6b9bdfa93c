//! User configuration file.
//!
//! Read from `~/midmark.json`, or from the path in `MIDMARK_CONFIG`.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "MIDMARK_CONFIG";

/// Config file name looked up in the home directory.
pub const CONFIG_FILE_NAME: &str = "midmark.json";

/// Directory created under the configured or temporary root.
const OUTPUT_SUBDIR: &str = "midmark";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Root for output artifacts
    #[serde(rename = "temp-output-dir")]
    pub temp_output_dir: Option<PathBuf>,
}

impl Config {
    /// Load the user config; a missing file yields the defaults.
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        match config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            Some(path) => {
                log::debug!("no config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Load a config from a specific file.
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let text = fs::read_to_string(path)
            .map_err(|e| format!("Cannot read config {}: {}", path.display(), e))?;
        let config = serde_json::from_str(&text)
            .map_err(|e| format!("Invalid config {}: {}", path.display(), e))?;
        Ok(config)
    }

    /// Directory that receives per-document output folders.
    ///
    /// An explicit directory is used as is; otherwise a `midmark` folder
    /// under the configured directory or the system temp directory.
    pub fn output_root(&self, explicit: Option<&Path>) -> PathBuf {
        if let Some(dir) = explicit {
            return dir.to_path_buf();
        }
        self.temp_output_dir
            .clone()
            .unwrap_or_else(env::temp_dir)
            .join(OUTPUT_SUBDIR)
    }
}

fn config_path() -> Option<PathBuf> {
    if let Some(path) = env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    env::var_os("HOME")
        .or_else(|| env::var_os("USERPROFILE"))
        .map(|home| PathBuf::from(home).join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"temp-output-dir": "/data/out", "bucket_info": {{}}}}"#).unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.temp_output_dir, Some(PathBuf::from("/data/out")));
        assert_eq!(config.output_root(None), PathBuf::from("/data/out/midmark"));
    }

    #[test]
    fn test_invalid_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(Config::from_file(file.path()).is_err());
    }

    #[test]
    fn test_output_root_precedence() {
        let config = Config {
            temp_output_dir: Some(PathBuf::from("/configured")),
        };
        assert_eq!(
            config.output_root(Some(Path::new("/explicit"))),
            PathBuf::from("/explicit")
        );
        assert_eq!(
            Config::default().output_root(None),
            env::temp_dir().join("midmark")
        );
    }
}
