//! Walks a Python syntax tree and records which definitions assign which names.
//!
//! The scan is deliberately one level deep:
//!
//! - a function contributes edges only for simple assignments that are direct
//!   statements of its body; assignments inside its `if`/`for`/`with`/...
//!   blocks are ignored;
//! - any simple assignment not enclosed by a function is attributed to the
//!   module scope;
//! - only `name = value` counts. Tuple/list targets, chained targets
//!   (`a = b = 1`), annotated and augmented assignments, and attribute or
//!   subscript targets produce nothing.
//!
//! Names are not scoped: two functions assigning `result` share one node.

use thiserror::Error;
use tree_sitter::{Node, Parser, Tree};

use super::graph::{Graph, MODULE_SCOPE};

/// Errors raised while extracting a graph.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    /// The Python grammar could not be loaded into the parser.
    #[error("failed to load Python grammar: {0}")]
    Language(String),

    /// The parser gave up without producing a tree.
    #[error("parser produced no syntax tree")]
    Aborted,

    /// The source contains a syntax error.
    #[error("syntax error at line {line}, column {column}")]
    Syntax {
        /// 1-based line of the first erroneous node.
        line: usize,
        /// 1-based column of the first erroneous node.
        column: usize,
    },
}

/// Parse `source` and build its assignment graph.
///
/// # Errors
///
/// Returns [`ExtractError::Syntax`] if the source does not parse cleanly or
/// uses Python 2 `print`/`exec` statements; no partial graph is produced.
pub fn extract(source: &str) -> Result<Graph, ExtractError> {
    let tree = parse(source)?;
    let root = tree.root_node();
    if root.has_error() {
        let (line, column) = first_error_position(root);
        return Err(ExtractError::Syntax { line, column });
    }

    let bytes = source.as_bytes();
    let mut graph = Graph::new();

    // (node, enclosed by a function definition)
    let mut stack: Vec<(Node<'_>, bool)> = vec![(root, false)];
    let mut cursor = root.walk();

    while let Some((node, in_function)) = stack.pop() {
        match node.kind() {
            // Python 2 only; the grammar still accepts them.
            "print_statement" | "exec_statement" => {
                let pos = node.start_position();
                return Err(ExtractError::Syntax { line: pos.row + 1, column: pos.column + 1 });
            }
            "function_definition" => record_function(node, bytes, &mut graph),
            "expression_statement" if !in_function => {
                if let Some(target) = simple_target(node, bytes) {
                    graph.add_node(target);
                    graph.add_edge(MODULE_SCOPE, target);
                }
            }
            _ => {}
        }

        let child_in_function = in_function || node.kind() == "function_definition";
        let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
        stack.extend(children.into_iter().rev().map(|child| (child, child_in_function)));
    }

    tracing::debug!(nodes = graph.nodes().len(), edges = graph.edges().len(), "extracted graph");
    Ok(graph)
}

fn parse(source: &str) -> Result<Tree, ExtractError> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_python::language())
        .map_err(|e| ExtractError::Language(e.to_string()))?;
    parser.parse(source, None).ok_or(ExtractError::Aborted)
}

/// Add the function's node and one edge per simple assignment in its body.
fn record_function(function: Node<'_>, bytes: &[u8], graph: &mut Graph) {
    let Some(name) = function.child_by_field_name("name").and_then(|n| n.utf8_text(bytes).ok())
    else {
        return;
    };
    graph.add_node(name);

    let Some(body) = function.child_by_field_name("body") else {
        return;
    };
    let mut cursor = body.walk();
    for statement in body.named_children(&mut cursor) {
        if let Some(target) = simple_target(statement, bytes) {
            graph.add_node(target);
            graph.add_edge(name, target);
        }
    }
}

/// The target name if `statement` is exactly `identifier = value`.
fn simple_target<'a>(statement: Node<'_>, bytes: &'a [u8]) -> Option<&'a str> {
    if statement.kind() != "expression_statement" {
        return None;
    }
    let mut cursor = statement.walk();
    let mut parts = statement.named_children(&mut cursor).filter(|n| n.kind() != "comment");
    let assignment = parts.next()?;
    if parts.next().is_some() || assignment.kind() != "assignment" {
        return None;
    }
    if assignment.child_by_field_name("type").is_some() {
        return None;
    }
    let right = assignment.child_by_field_name("right")?;
    if right.kind() == "assignment" {
        return None;
    }
    let left = assignment.child_by_field_name("left")?;
    if left.kind() != "identifier" {
        return None;
    }
    left.utf8_text(bytes).ok()
}

/// 1-based position of the first ERROR or MISSING node in pre-order.
fn first_error_position(root: Node<'_>) -> (usize, usize) {
    let mut stack = vec![root];
    let mut cursor = root.walk();
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            let pos = node.start_position();
            return (pos.row + 1, pos.column + 1);
        }
        if node.has_error() {
            let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
            stack.extend(children.into_iter().rev());
        }
    }
    let pos = root.start_position();
    (pos.row + 1, pos.column + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(graph: &Graph) -> Vec<&str> {
        graph.node_names().collect()
    }

    fn edges(graph: &Graph) -> Vec<(&str, &str)> {
        graph.edges().iter().map(|e| (e.from.as_str(), e.to.as_str())).collect()
    }

    #[test]
    fn no_assignments_or_functions_yields_module_scope_only() {
        let graph = extract("import os\nprint(os.getcwd())\n").unwrap();
        assert_eq!(names(&graph), [MODULE_SCOPE]);
        assert!(graph.edges().is_empty());
    }

    #[test]
    fn empty_source_yields_module_scope_only() {
        let graph = extract("").unwrap();
        assert_eq!(names(&graph), [MODULE_SCOPE]);
    }

    #[test]
    fn top_level_assignment_links_module_scope() {
        let graph = extract("x = compute(1, 2)\n").unwrap();
        assert_eq!(names(&graph), [MODULE_SCOPE, "x"]);
        assert_eq!(edges(&graph), [(MODULE_SCOPE, "x")]);
    }

    #[test]
    fn function_body_assignment_links_function() {
        let graph = extract("def f():\n    y = 1\n").unwrap();
        assert_eq!(names(&graph), [MODULE_SCOPE, "f", "y"]);
        assert_eq!(edges(&graph), [("f", "y")]);
    }

    #[test]
    fn extraction_is_deterministic() {
        let source = "a = 1\ndef g():\n    b = a\n    c = b\nd = g()\n";
        assert_eq!(extract(source).unwrap(), extract(source).unwrap());
    }

    #[test]
    fn syntax_error_is_reported_with_position() {
        let err = extract("x = 1\ndef broken(:\n    pass\n").unwrap_err();
        assert!(matches!(err, ExtractError::Syntax { line, .. } if line >= 2), "got {err:?}");
    }

    #[test]
    fn python2_print_statement_is_a_syntax_error() {
        let err = extract("print \"hi\"\nx = 1\n").unwrap_err();
        assert_eq!(err, ExtractError::Syntax { line: 1, column: 1 });
    }

    #[test]
    fn python2_exec_statement_inside_function_is_a_syntax_error() {
        let err = extract("def run():\n    exec \"x = 1\"\n").unwrap_err();
        assert_eq!(err, ExtractError::Syntax { line: 2, column: 5 });
    }

    #[test]
    fn print_call_is_not_a_print_statement() {
        let graph = extract("print(\"hi\")\nx = 1\n").unwrap();
        assert_eq!(edges(&graph), [(MODULE_SCOPE, "x")]);
    }

    #[test]
    fn compound_targets_are_skipped() {
        let source = "\
a, b = 1, 2
[c, d] = pair
e = f = 0
g: int = 3
h += 1
obj.attr = 4
items[0] = 5
";
        let graph = extract(source).unwrap();
        assert_eq!(names(&graph), [MODULE_SCOPE]);
        assert!(graph.edges().is_empty());
    }

    #[test]
    fn nested_blocks_inside_functions_are_skipped() {
        let source = "\
def run(flag):
    if flag:
        hidden = 1
    for i in range(3):
        also_hidden = i
    visible = 2
";
        let graph = extract(source).unwrap();
        assert_eq!(names(&graph), [MODULE_SCOPE, "run", "visible"]);
        assert_eq!(edges(&graph), [("run", "visible")]);
    }

    #[test]
    fn module_level_blocks_count_as_module_scope() {
        let source = "\
if DEBUG:
    level = 10
class Settings:
    timeout = 30
";
        let graph = extract(source).unwrap();
        assert_eq!(edges(&graph), [(MODULE_SCOPE, "level"), (MODULE_SCOPE, "timeout")]);
    }

    #[test]
    fn shared_names_collapse_and_edges_repeat() {
        let source = "\
def first():
    result = 1
    result = 2
def second():
    result = 3
";
        let graph = extract(source).unwrap();
        assert_eq!(names(&graph), [MODULE_SCOPE, "first", "result", "second"]);
        assert_eq!(
            edges(&graph),
            [("first", "result"), ("first", "result"), ("second", "result")]
        );
    }

    #[test]
    fn methods_async_and_decorated_functions_are_recorded() {
        let source = "\
class Service:
    def start(self):
        state = 'up'
@cached
async def fetch():
    payload = await get()
";
        let graph = extract(source).unwrap();
        assert_eq!(names(&graph), [MODULE_SCOPE, "start", "state", "fetch", "payload"]);
        assert_eq!(edges(&graph), [("start", "state"), ("fetch", "payload")]);
    }

    #[test]
    fn nested_function_gets_its_own_node() {
        let source = "\
def outer():
    x = 1
    def inner():
        y = 2
";
        let graph = extract(source).unwrap();
        assert_eq!(names(&graph), [MODULE_SCOPE, "outer", "x", "inner", "y"]);
        assert_eq!(edges(&graph), [("outer", "x"), ("inner", "y")]);
    }

    #[test]
    fn trailing_comment_does_not_hide_assignment() {
        let graph = extract("x = 1  # the answer\n").unwrap();
        assert_eq!(edges(&graph), [(MODULE_SCOPE, "x")]);
    }
}
