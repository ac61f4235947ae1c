//! Go front end
//!
//! Top-level `func` and method declarations are recorded by their bare
//! name; the receiver type of a method is not part of its identity. Calls
//! are attributed to the declaration whose body contains them, including
//! calls made inside function literals.

use tree_sitter::Node;

use super::{call_target, field_text};
use crate::collector::ExtractionEvent;

pub fn extract_events(root: &Node, source: &[u8]) -> Vec<ExtractionEvent> {
    let mut events = Vec::new();
    let mut cursor = root.walk();

    // Only iterate over direct children of root (top-level declarations)
    for node in root.children(&mut cursor) {
        if !matches!(node.kind(), "function_declaration" | "method_declaration") {
            continue;
        }
        let Some(name) = field_text(&node, "name", source) else {
            continue;
        };
        events.push(ExtractionEvent::declaration(name.as_str()));

        // external (assembly-backed) declarations have no body
        if let Some(body) = node.child_by_field_name("body") {
            collect_calls(&body, &name, source, &mut events);
        }
    }

    events
}

pub(super) fn has_package_clause(root: &Node) -> bool {
    let mut cursor = root.walk();
    let found = root
        .children(&mut cursor)
        .any(|node| node.kind() == "package_clause");
    found
}

/// Pre-order walk: an outer call is recorded before calls in its operands
fn collect_calls(node: &Node, caller: &str, source: &[u8], events: &mut Vec<ExtractionEvent>) {
    if node.kind() == "call_expression" {
        let target = node
            .child_by_field_name("function")
            .and_then(|function| call_target(&function, source, "selector_expression", "field"));
        if let Some(target) = target {
            events.push(ExtractionEvent::call(caller, target));
        }
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        collect_calls(&child, caller, source, events);
    }
}

#[cfg(test)]
mod tests {
    use crate::collector::{CallTarget, ExtractionEvent};
    use crate::parser::{Language, Parser};
    use std::path::Path;

    fn events(source: &str) -> Vec<ExtractionEvent> {
        Parser::new()
            .parse_source(source, Path::new("test.go"), Language::Go)
            .unwrap()
    }

    fn direct(caller: &str, callee: &str) -> ExtractionEvent {
        ExtractionEvent::call(caller, CallTarget::Direct(callee.to_string()))
    }

    fn member(caller: &str, callee: &str) -> ExtractionEvent {
        ExtractionEvent::call(caller, CallTarget::Member(callee.to_string()))
    }

    #[test]
    fn test_functions_and_direct_calls() {
        let source = r#"
package main

func main() {
	run()
	run()
}

func run() {}
"#;
        assert_eq!(
            events(source),
            vec![
                ExtractionEvent::declaration("main"),
                direct("main", "run"),
                direct("main", "run"),
                ExtractionEvent::declaration("run"),
            ]
        );
    }

    #[test]
    fn test_member_calls_keep_member_name() {
        let source = r#"
package main

import "fmt"

type Server struct{}

func (s *Server) Start() {
	s.listen()
	fmt.Println("started")
}

func (s *Server) listen() {}
"#;
        assert_eq!(
            events(source),
            vec![
                ExtractionEvent::declaration("Start"),
                member("Start", "listen"),
                member("Start", "Println"),
                ExtractionEvent::declaration("listen"),
            ]
        );
    }

    #[test]
    fn test_outer_call_before_argument_calls() {
        let source = r#"
package main

func main() {
	outer(inner(), other())
}
"#;
        assert_eq!(
            events(source),
            vec![
                ExtractionEvent::declaration("main"),
                direct("main", "outer"),
                direct("main", "inner"),
                direct("main", "other"),
            ]
        );
    }

    #[test]
    fn test_chained_calls_record_each_member() {
        let source = r#"
package main

func build() {
	newBuilder().WithName("x").Build()
}
"#;
        assert_eq!(
            events(source),
            vec![
                ExtractionEvent::declaration("build"),
                member("build", "Build"),
                member("build", "WithName"),
                direct("build", "newBuilder"),
            ]
        );
    }

    #[test]
    fn test_calls_in_function_literals_belong_to_enclosing_declaration() {
        let source = r#"
package main

func main() {
	go func() {
		worker()
	}()
	defer cleanup()
}
"#;
        // the immediately-invoked literal itself has no nameable target
        assert_eq!(
            events(source),
            vec![
                ExtractionEvent::declaration("main"),
                direct("main", "worker"),
                direct("main", "cleanup"),
            ]
        );
    }

    #[test]
    fn test_unnameable_targets_are_skipped() {
        let source = r#"
package main

func dispatch(handlers []func()) {
	handlers[0]()
	getHandler()()
}
"#;
        assert_eq!(
            events(source),
            vec![
                ExtractionEvent::declaration("dispatch"),
                direct("dispatch", "getHandler"),
            ]
        );
    }

    #[test]
    fn test_package_level_calls_are_ignored() {
        let source = r#"
package main

var started = time.Now()

func main() {}
"#;
        assert_eq!(events(source), vec![ExtractionEvent::declaration("main")]);
    }

    #[test]
    fn test_empty_file() {
        assert!(events("package main\n").is_empty());
    }
}
