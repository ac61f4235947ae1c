//! Error types for call graph extraction
//!
//! Errors fall into two user-facing groups: input errors (a source unit
//! could not be read or parsed) and configuration errors (nothing to analyze,
//! or a broken config file). Both abort the run before any output is written.

use std::path::PathBuf;

/// Result alias used throughout the core crate
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A path could not be inspected or read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source unit is not syntactically well-formed
    #[error("syntax error in {} at line {line}", path.display())]
    Syntax { path: PathBuf, line: usize },

    /// Directory traversal failed
    #[error("failed to walk directory: {0}")]
    Walk(#[from] ignore::Error),

    #[error("invalid glob pattern: {0}")]
    Glob(#[from] globset::Error),

    #[error("failed to load grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    /// Neither a directory nor explicit files were given
    #[error("no input specified: pass a directory or a list of files")]
    NoInput,

    #[error("invalid config file {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("node `{0}` already exists")]
    DuplicateNode(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    /// True for failures caused by an unreadable or malformed source unit
    pub fn is_input_error(&self) -> bool {
        matches!(self, Error::Io { .. } | Error::Syntax { .. } | Error::Walk(_))
    }

    /// True for failures detected before any parsing starts
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Error::NoInput | Error::Config { .. } | Error::Glob(_))
    }
}
