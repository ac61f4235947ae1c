//! Source front ends built on tree-sitter
//!
//! Each supported language walks its syntax tree and produces a flat list of
//! [`ExtractionEvent`]s in document order: one `Declaration` per function or
//! method, and one `Call` per call expression whose target can be named.
//! Call targets are resolved by shape only:
//!
//! - a bare name (`helper()`) becomes [`CallTarget::Direct`]
//! - a member access (`obj.helper()`) becomes [`CallTarget::Member`], the
//!   receiver expression is not looked at
//! - anything else (calls through an index, a parenthesized expression, a
//!   function literal) is skipped
//!
//! A file that does not parse cleanly is rejected with [`Error::Syntax`]
//! rather than yielding a partial set of events.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use tree_sitter::{Node, Parser as TsParser, Tree};

use crate::collector::{CallTarget, ExtractionEvent};
use crate::error::{Error, Result};

pub mod go;
pub mod python;

/// Supported programming languages for parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Go,
    Python,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Go, Language::Python];

    /// Detect language from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        Self::ALL.into_iter().find(|lang| lang.extension() == ext)
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Language::Go => "go",
            Language::Python => "py",
        }
    }

    /// Glob matching every source file of this language under a root
    pub fn glob(&self) -> String {
        format!("**/*.{}", self.extension())
    }

    fn grammar(&self) -> tree_sitter::Language {
        match self {
            Language::Go => tree_sitter_go::LANGUAGE.into(),
            Language::Python => tree_sitter_python::LANGUAGE.into(),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Go => write!(f, "go"),
            Language::Python => write!(f, "python"),
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "go" | "golang" => Ok(Language::Go),
            "python" | "py" => Ok(Language::Python),
            other => Err(format!("unsupported language `{other}` (expected go or python)")),
        }
    }
}

/// Parser turning source files into extraction events
pub struct Parser;

impl Parser {
    /// Create a new parser instance
    pub fn new() -> Self {
        Parser
    }

    /// Read and parse a source file
    pub fn parse_file(&self, path: &Path, lang: Language) -> Result<Vec<ExtractionEvent>> {
        let source = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        self.parse_source(&source, path, lang)
    }

    /// Parse source text; `path` is only used for error reporting
    pub fn parse_source(
        &self,
        source: &str,
        path: &Path,
        lang: Language,
    ) -> Result<Vec<ExtractionEvent>> {
        let tree = parse_tree(source, path, lang)?;
        let root = tree.root_node();
        let bytes = source.as_bytes();

        // a Go file without a package clause is not a compilation unit
        if lang == Language::Go && !go::has_package_clause(&root) {
            return Err(Error::Syntax {
                path: path.to_path_buf(),
                line: 1,
            });
        }

        let events = match lang {
            Language::Go => go::extract_events(&root, bytes),
            Language::Python => python::extract_events(&root, bytes),
        };
        Ok(events)
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_tree(source: &str, path: &Path, lang: Language) -> Result<Tree> {
    let mut parser = TsParser::new();
    parser.set_language(&lang.grammar())?;

    let tree = parser.parse(source, None).ok_or_else(|| Error::Syntax {
        path: path.to_path_buf(),
        line: 1,
    })?;

    if let Some(line) = first_error_line(&tree.root_node()) {
        return Err(Error::Syntax {
            path: path.to_path_buf(),
            line,
        });
    }
    Ok(tree)
}

/// 1-based line of the first ERROR or MISSING node, if any
fn first_error_line(node: &Node) -> Option<usize> {
    if !node.has_error() {
        return None;
    }
    if node.is_error() || node.is_missing() {
        return Some(node.start_position().row + 1);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(line) = first_error_line(&child) {
            return Some(line);
        }
    }
    Some(node.start_position().row + 1)
}

/// Text of a named field (e.g., the "name" of a function definition)
fn field_text(node: &Node, field: &str, source: &[u8]) -> Option<String> {
    node.child_by_field_name(field)
        .and_then(|child| node_text(&child, source))
}

fn node_text(node: &Node, source: &[u8]) -> Option<String> {
    node.utf8_text(source)
        .ok()
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

/// Resolve a callee expression given the kinds used by a grammar
///
/// `member_kind` is the member access node and `member_field` its field
/// holding the accessed name.
fn call_target(
    function: &Node,
    source: &[u8],
    member_kind: &str,
    member_field: &str,
) -> Option<CallTarget> {
    match function.kind() {
        "identifier" => node_text(function, source).map(CallTarget::Direct),
        kind if kind == member_kind => {
            field_text(function, member_field, source).map(CallTarget::Member)
        }
        _ => None,
    }
}
