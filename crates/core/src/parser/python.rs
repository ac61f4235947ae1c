//! Python front end
//!
//! Every `def` is a declaration, at any depth: module functions, methods and
//! nested functions alike. A call belongs to the innermost enclosing `def`;
//! calls made at module or class level have no caller.

use tree_sitter::Node;

use super::{call_target, field_text};
use crate::collector::ExtractionEvent;

pub fn extract_events(root: &Node, source: &[u8]) -> Vec<ExtractionEvent> {
    let mut events = Vec::new();
    walk(root, None, source, &mut events);
    events
}

fn walk(node: &Node, caller: Option<&str>, source: &[u8], events: &mut Vec<ExtractionEvent>) {
    match node.kind() {
        "function_definition" => {
            if let Some(name) = field_text(node, "name", source) {
                events.push(ExtractionEvent::declaration(name.as_str()));
                // default values and decorators run in the enclosing scope,
                // so only the body is attributed to this function
                if let Some(body) = node.child_by_field_name("body") {
                    walk(&body, Some(name.as_str()), source, events);
                }
                return;
            }
        }
        "call" => {
            let target = node
                .child_by_field_name("function")
                .and_then(|function| call_target(&function, source, "attribute", "attribute"));
            if let Some(target) = target {
                events.push(ExtractionEvent::Call {
                    caller: caller.map(str::to_string),
                    target,
                });
            }
        }
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        walk(&child, caller, source, events);
    }
}
