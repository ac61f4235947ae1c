//! Call filtering against declared and ignored function names
//!
//! The graph holds every call target seen during collection, including
//! library functions that were never declared in the analyzed source. Only
//! edges whose caller and callee were both declared, and neither is
//! ignored, make it into the diagram.

use std::collections::HashSet;

use crate::graph::EdgeRef;

/// Names of functions declared in the analyzed source
///
/// Insert-only during collection, then used purely as a predicate.
#[derive(Debug, Clone, Default)]
pub struct DeclaredSet {
    names: HashSet<String>,
}

impl DeclaredSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a declared name; redeclaration is not an error
    pub fn insert(&mut self, name: &str) {
        if !self.names.contains(name) {
            self.names.insert(name.to_string());
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Function names excluded from the output
#[derive(Debug, Clone, Default)]
pub struct IgnoreSet {
    names: HashSet<String>,
}

impl IgnoreSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a comma-separated list such as `"init,log"`
    ///
    /// Surrounding whitespace is trimmed and empty entries are skipped.
    pub fn from_comma_list(list: &str) -> Self {
        list.split(',').collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for IgnoreSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let names = iter
            .into_iter()
            .map(|name| name.as_ref().trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();
        Self { names }
    }
}

/// Keep only edges between declared, non-ignored functions
///
/// Pure: the input order is preserved and nothing is mutated.
pub fn filter_calls<'g>(
    edges: impl IntoIterator<Item = EdgeRef<'g>>,
    declared: &DeclaredSet,
    ignore: &IgnoreSet,
) -> Vec<EdgeRef<'g>> {
    edges
        .into_iter()
        .filter(|edge| {
            let (caller, callee) = edge.key();
            declared.contains(caller)
                && declared.contains(callee)
                && !ignore.contains(caller)
                && !ignore.contains(callee)
        })
        .collect()
}
