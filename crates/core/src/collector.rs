//! Turning extraction events into graph edges
//!
//! Front ends walk syntax trees and emit [`ExtractionEvent`]s; the collector
//! is the single writer that owns the graph and the set of declared names.
//! Once collection is done, [`CallCollector::finish`] filters, orders and
//! packages the result.

use tracing::{debug, info};

use crate::filter::{filter_calls, DeclaredSet, IgnoreSet};
use crate::graph::Graph;
use crate::order::sort_by_degree;
use crate::render::{CallReport, FunctionCall};

/// How a call expression named its target
///
/// The receiver of a member call is not resolved; only the member name is
/// kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallTarget {
    /// `helper()`
    Direct(String),
    /// `client.Fetch()`, `self.save()`
    Member(String),
}

impl CallTarget {
    /// The callee identity recorded in the graph
    pub fn name(&self) -> &str {
        match self {
            CallTarget::Direct(name) | CallTarget::Member(name) => name,
        }
    }
}

/// A declaration or call site found by a front end
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionEvent {
    Declaration(String),
    /// `caller` is the enclosing declaration, `None` at file or module level
    Call {
        caller: Option<String>,
        target: CallTarget,
    },
}

impl ExtractionEvent {
    pub fn declaration(name: impl Into<String>) -> Self {
        ExtractionEvent::Declaration(name.into())
    }

    pub fn call(caller: impl Into<String>, target: CallTarget) -> Self {
        ExtractionEvent::Call {
            caller: Some(caller.into()),
            target,
        }
    }
}

/// Accumulates call edges and declared names for one analysis run
#[derive(Debug, Default)]
pub struct CallCollector {
    graph: Graph,
    declared: DeclaredSet,
}

impl CallCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a single event
    ///
    /// Calls without an enclosing declaration, and events with an empty
    /// name, are dropped.
    pub fn record(&mut self, event: ExtractionEvent) {
        match event {
            ExtractionEvent::Declaration(name) => {
                if !name.is_empty() {
                    self.declared.insert(&name);
                }
            }
            ExtractionEvent::Call {
                caller: Some(caller),
                target,
            } => {
                let callee = target.name();
                if caller.is_empty() || callee.is_empty() {
                    return;
                }
                self.graph.add_edge(&caller, callee);
            }
            ExtractionEvent::Call { caller: None, target } => {
                debug!(callee = target.name(), "dropping call outside any declaration");
            }
        }
    }

    pub fn record_all(&mut self, events: impl IntoIterator<Item = ExtractionEvent>) {
        for event in events {
            self.record(event);
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn declared(&self) -> &DeclaredSet {
        &self.declared
    }

    /// Filter to declared, non-ignored calls and order them for rendering
    pub fn finish(&self, ignore: &IgnoreSet) -> CallReport {
        let mut edges = filter_calls(self.graph.edges(), &self.declared, ignore);
        sort_by_degree(&mut edges);

        info!(
            declared = self.declared.len(),
            nodes = self.graph.node_count(),
            edges = self.graph.edge_count(),
            retained = edges.len(),
            "call graph collected"
        );

        CallReport::new(edges.into_iter().map(FunctionCall::from).collect())
    }
}
