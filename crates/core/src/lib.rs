//! Callflow Core Library
//!
//! This library extracts caller → callee relationships from source code and
//! renders them as a Mermaid flowchart. The pipeline is:
//!
//! 1. [`parser`] turns each source file into extraction events
//! 2. [`CallCollector`] builds a deduplicated [`Graph`] and the set of
//!    declared names
//! 3. [`filter`] keeps calls between declared, non-ignored functions
//! 4. [`order`] sorts them so entry points come first
//! 5. [`render`] writes the diagram text
//!
//! ```no_run
//! use callflow_core::{analyze, Config};
//!
//! let config = Config {
//!     dir: Some("my_project".into()),
//!     ..Config::default()
//! };
//! let report = analyze(&config)?;
//! println!("{}", report.mermaid());
//! # Ok::<(), callflow_core::Error>(())
//! ```

pub mod analyzer;
pub mod collector;
pub mod config;
pub mod discovery;
pub mod error;
pub mod filter;
pub mod graph;
pub mod order;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use analyzer::{analyze, Analyzer};
pub use collector::{CallCollector, CallTarget, ExtractionEvent};
pub use config::Config;
pub use error::{Error, Result};
pub use filter::{DeclaredSet, IgnoreSet};
pub use graph::{EdgeRef, Graph, Node};
pub use parser::Language;
pub use render::{CallReport, FunctionCall};
