//! Mermaid flowchart rendering

use serde::Serialize;

use crate::graph::EdgeRef;

const HEADER: &str = "```mermaid\nflowchart LR\n";
const FOOTER: &str = "```";

/// One retained `caller → callee` relationship
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionCall {
    pub caller: String,
    pub callee: String,
}

impl FunctionCall {
    pub fn new(caller: impl Into<String>, callee: impl Into<String>) -> Self {
        Self {
            caller: caller.into(),
            callee: callee.into(),
        }
    }
}

impl From<EdgeRef<'_>> for FunctionCall {
    fn from(edge: EdgeRef<'_>) -> Self {
        Self::new(edge.from.key.as_str(), edge.to.key.as_str())
    }
}

/// The filtered, ordered result of an analysis run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CallReport {
    pub calls: Vec<FunctionCall>,
}

impl CallReport {
    pub fn new(calls: Vec<FunctionCall>) -> Self {
        Self { calls }
    }

    /// Render as a Mermaid flowchart
    pub fn mermaid(&self) -> String {
        mermaid(&self.calls)
    }
}

/// Render calls as a left-to-right Mermaid flowchart, in the given order
///
/// An empty slice still yields a complete (empty) diagram.
pub fn mermaid(calls: &[FunctionCall]) -> String {
    let mut out = String::from(HEADER);
    for call in calls {
        out.push_str(&call.caller);
        out.push_str(" --> ");
        out.push_str(&call.callee);
        out.push('\n');
    }
    out.push_str(FOOTER);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_diagram() {
        assert_eq!(mermaid(&[]), "```mermaid\nflowchart LR\n```");
    }

    #[test]
    fn test_one_line_per_call_in_input_order() {
        let calls = vec![
            FunctionCall::new("main", "run"),
            FunctionCall::new("run", "step"),
            FunctionCall::new("main", "exit"),
        ];
        let expected = "```mermaid\nflowchart LR\nmain --> run\nrun --> step\nmain --> exit\n```";
        assert_eq!(mermaid(&calls), expected);
    }

    #[test]
    fn test_report_renders_its_calls() {
        let report = CallReport::new(vec![FunctionCall::new("A", "B")]);
        assert_eq!(report.mermaid(), "```mermaid\nflowchart LR\nA --> B\n```");
    }

    #[test]
    fn test_function_call_serialization() {
        let call = FunctionCall::new("main", "run");
        let json = serde_json::to_value(&call).unwrap();
        assert_eq!(json, serde_json::json!({"caller": "main", "callee": "run"}));
    }
}
