//! Run configuration
//!
//! A run needs an input (a directory to scan or an explicit file list) and
//! may carry an ignore list. Values can come from a TOML file and are then
//! overridden by command-line flags.
//!
//! ## Example
//!
//! ```toml
//! dir = "./cmd"
//! out-dir = "./docs"
//! ignore = ["init", "must"]
//! languages = ["go"]
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::filter::IgnoreSet;
use crate::parser::Language;

pub const DEFAULT_OUT_DIR: &str = "./files";
pub const DEFAULT_OUTPUT_FILE: &str = "flowchart.md";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Directory to scan recursively
    pub dir: Option<PathBuf>,
    /// Explicit source files, used when `dir` is not set
    pub files: Vec<PathBuf>,
    /// Where the diagram is written
    pub out_dir: PathBuf,
    pub output_file: String,
    /// Function names left out of the diagram
    pub ignore: Vec<String>,
    pub languages: Vec<Language>,
    /// Also print the diagram to stdout
    pub print: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dir: None,
            files: Vec::new(),
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
            ignore: Vec::new(),
            languages: vec![Language::Go],
            print: true,
        }
    }
}

impl Config {
    /// Load a config from a TOML file; missing keys take their defaults
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_toml_str(&content).map_err(|message| Error::Config {
            path: path.to_path_buf(),
            message,
        })
    }

    fn from_toml_str(content: &str) -> std::result::Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    pub fn ignore_set(&self) -> IgnoreSet {
        self.ignore.iter().collect()
    }

    /// Full path of the diagram file
    pub fn output_path(&self) -> PathBuf {
        self.out_dir.join(&self.output_file)
    }

    /// Fails with `Error::NoInput` when there is nothing to analyze
    pub fn validate(&self) -> Result<()> {
        if self.dir.is_none() && self.files.is_empty() {
            return Err(Error::NoInput);
        }
        Ok(())
    }
}
