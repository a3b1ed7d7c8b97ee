//! DOT graph description

use crate::state_machine::StateGraph;
use regex::Regex;
use std::fmt::{self, Display, Formatter};
use std::sync::LazyLock;

/// IDs Graphviz accepts without quoting: C-style names or numerals
static BARE_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Za-z_\x80-\xFF][A-Za-z0-9_\x80-\xFF]*|-?(?:\.[0-9]+|[0-9]+(?:\.[0-9]*)?))$")
        .unwrap()
});

/// Whether `name` can appear unquoted in a DOT edge statement
pub fn is_bare_id(name: &str) -> bool {
    BARE_ID.is_match(name)
}

/// Writes one `source -> destination;` line per transition.
///
/// Identifiers are emitted verbatim. States that never transition produce no
/// line at all.
pub struct Dot<'a> {
    graph: &'a StateGraph,
    name: &'a str,
}

impl<'a> Dot<'a> {
    pub fn new(graph: &'a StateGraph, name: &'a str) -> Self {
        Self { graph, name }
    }
}

impl Display for Dot<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "digraph {} {{", self.name)?;
        for transition in self.graph.transitions() {
            writeln!(f, "{} -> {};", transition.from_state, transition.to_state)?;
        }
        writeln!(f, "}}")
    }
}

/// Render `graph` as a DOT digraph called `name`
pub fn to_dot(graph: &StateGraph, name: &str) -> String {
    Dot::new(graph, name).to_string()
}
