//! Extractor module - Recover a state machine from switch-based source text
//!
//! The extractor is a single line-oriented pass:
//! - each line is classified as dispatch-open, branch-label, state-assignment
//!   or irrelevant ([`classifier`]);
//! - the [`builder`] pairs every assignment to the state variable with the
//!   nearest preceding branch label and appends it to the state graph.
//!
//! Only the first dispatch construct is considered. Anomalies never fail the
//! pass; they are collected as [`Diagnostic`]s and logged.

use crate::config::ExtractConfig;
use crate::state_machine::StateGraph;
use serde::Serialize;
use std::fmt;

pub mod builder;
pub mod classifier;

pub use builder::StateGraphBuilder;
pub use classifier::{LineClass, LineClassifier};

/// Non-fatal anomaly found during a pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A second dispatch construct; extraction stopped at this line
    SecondDispatch { line: usize },
    /// Assignment to the state variable before any branch label
    OrphanAssignment { line: usize, destination: String },
    /// Dispatch keyword without a parenthesised variable
    MissingDispatchVariable { line: usize },
    /// Branch keyword without a label
    MissingBranchName { line: usize },
    /// State name that is not a bare DOT identifier
    UnsafeIdentifier { name: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::SecondDispatch { line } => write!(
                f,
                "line {}: found a second dispatch construct, stopping after the first FSM",
                line
            ),
            Diagnostic::OrphanAssignment { line, destination } => write!(
                f,
                "line {}: assignment to {} before any branch label",
                line, destination
            ),
            Diagnostic::MissingDispatchVariable { line } => {
                write!(f, "line {}: dispatch without a state variable, ignored", line)
            }
            Diagnostic::MissingBranchName { line } => {
                write!(f, "line {}: branch label without a name, ignored", line)
            }
            Diagnostic::UnsafeIdentifier { name } => write!(
                f,
                "state {:?} is not a valid unquoted DOT identifier",
                name
            ),
        }
    }
}

/// Outcome of one extraction pass
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Variable the first dispatch construct switches on, if one was found
    pub state_variable: Option<String>,
    pub graph: StateGraph,
    pub diagnostics: Vec<Diagnostic>,
    /// True when the pass stopped at a second dispatch construct
    pub stopped_early: bool,
}

/// Run the extraction pass over `source`
pub fn extract(source: &str, config: &ExtractConfig) -> Extraction {
    let mut builder = StateGraphBuilder::new(config);
    for (idx, line) in source.lines().enumerate() {
        if builder.feed(idx + 1, line).is_break() {
            break;
        }
    }

    let extraction = builder.finish();
    tracing::info!(
        "Extracted {} transitions from {} states",
        extraction.graph.transition_count(),
        extraction.graph.states().len()
    );
    extraction
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::dot::to_dot;

    const TOGGLE: &str =
        "switch (st) {\ncase A:\n    st = B;\n    break;\ncase B:\n    st = A;\n    break;\n}\n";

    const SERIAL_LINK: &str = r#"
void loop() {
    char c = Serial.read();
    switch (link_state) {
        case WAIT_CMD:
            if (c == 'A') link_state = READ_ADDR;
            else if (c == 'D') link_state = READ_DELTA;
            break;
        case READ_ADDR:
            address = address * 10 + (c - '0');
            if (++digits == 3) {
                link_state = WAIT_SEP;
            }
            break;
        case WAIT_SEP:
            if (c != ':') {
                link_state = WAIT_CMD;
            } else {
                link_state = READ_DIR;
            }
            break;
        case READ_DIR:
            forward = (c == 'F');
            link_state = WAIT_CMD;
            break;
        case READ_DELTA:
            link_state = WAIT_CMD;
            break;
    }
}
"#;

    fn run(source: &str) -> Extraction {
        extract(source, &ExtractConfig::default())
    }

    #[test]
    fn test_toggle_round_trip() {
        let extraction = run(TOGGLE);
        assert_eq!(extraction.state_variable.as_deref(), Some("st"));
        assert_eq!(
            extraction.graph.adjacency(),
            vec![("A", vec!["B"]), ("B", vec!["A"])]
        );
        assert!(extraction.diagnostics.is_empty());
        assert!(!extraction.stopped_early);
        assert_eq!(
            to_dot(&extraction.graph, "DDC_IO_FSM"),
            "digraph DDC_IO_FSM {\nA -> B;\nB -> A;\n}\n"
        );
    }

    #[test]
    fn test_assignments_pair_with_nearest_label() {
        let extraction = run(SERIAL_LINK);
        assert_eq!(extraction.state_variable.as_deref(), Some("link_state"));
        assert_eq!(
            extraction.graph.adjacency(),
            vec![
                ("WAIT_CMD", vec!["READ_ADDR", "READ_DELTA"]),
                ("READ_ADDR", vec!["WAIT_SEP"]),
                ("WAIT_SEP", vec!["WAIT_CMD", "READ_DIR"]),
                ("READ_DIR", vec!["WAIT_CMD"]),
                ("READ_DELTA", vec!["WAIT_CMD"]),
            ]
        );
        let lines: Vec<usize> = extraction
            .graph
            .outgoing("WAIT_CMD")
            .iter()
            .map(|t| t.line)
            .collect();
        assert_eq!(lines, vec![6, 7]);
    }

    #[test]
    fn test_idempotent_output() {
        let first = to_dot(&run(SERIAL_LINK).graph, "DDC_IO_FSM");
        let second = to_dot(&run(SERIAL_LINK).graph, "DDC_IO_FSM");
        assert_eq!(first, second);
    }

    #[test]
    fn test_no_dispatch_gives_empty_graph() {
        let extraction = run("int main() {\n    st = B;\n    return 0;\n}\n");
        assert_eq!(extraction.state_variable, None);
        assert!(extraction.graph.is_empty());
        assert_eq!(to_dot(&extraction.graph, "DDC_IO_FSM"), "digraph DDC_IO_FSM {\n}\n");
    }

    #[test]
    fn test_zero_branch_labels() {
        let extraction = run("switch (st) {\ndefault:\n    break;\n}\n");
        assert_eq!(extraction.state_variable.as_deref(), Some("st"));
        assert!(extraction.graph.is_empty());
    }

    #[test]
    fn test_second_dispatch_halts_pass() {
        let source = format!(
            "{}switch (other) {{\ncase C:\n    st = A;\n}}\ncase D:\n    st = B;\n",
            TOGGLE
        );
        let extraction = run(&source);
        assert!(extraction.stopped_early);
        assert_eq!(
            extraction.graph.adjacency(),
            vec![("A", vec!["B"]), ("B", vec!["A"])]
        );
        assert_eq!(
            extraction.diagnostics,
            vec![Diagnostic::SecondDispatch { line: 9 }]
        );
    }

    #[test]
    fn test_repeated_destinations_are_kept() {
        let source = "switch (st) {\ncase A:\n    if (x) st = B;\n    if (y) st = B;\n}\n";
        let extraction = run(source);
        assert_eq!(extraction.graph.destinations("A"), vec!["B", "B"]);
    }

    #[test]
    fn test_windows_line_endings() {
        let extraction = run(&TOGGLE.replace('\n', "\r\n"));
        assert_eq!(
            extraction.graph.adjacency(),
            vec![("A", vec!["B"]), ("B", vec!["A"])]
        );
    }

    #[test]
    fn test_diagnostic_display() {
        let diagnostic = Diagnostic::SecondDispatch { line: 12 };
        assert_eq!(
            diagnostic.to_string(),
            "line 12: found a second dispatch construct, stopping after the first FSM"
        );
    }
}
