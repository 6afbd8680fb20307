//! Graphviz DOT rendering of an assignment [`Graph`].

use std::fmt::Write;

use super::graph::Graph;

/// Quote a DOT identifier, escaping backslashes and double quotes.
fn quote(id: &str) -> String {
    let mut out = String::with_capacity(id.len() + 2);
    out.push('"');
    for ch in id.chars() {
        if ch == '"' || ch == '\\' {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
    out
}

impl Graph {
    /// Render as a `digraph`: one boxed vertex line per node, then one line
    /// per edge, both in insertion order.
    #[must_use]
    pub fn to_dot(&self) -> String {
        let mut dot = String::from("digraph {\n");
        for node in self.nodes() {
            writeln!(dot, "\t{} [shape=box]", quote(&node.name)).ok();
        }
        for edge in self.edges() {
            writeln!(dot, "\t{} -> {}", quote(&edge.from), quote(&edge.to)).ok();
        }
        dot.push_str("}\n");
        dot
    }
}
