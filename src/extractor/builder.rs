//! State graph builder
//!
//! Threads the classifier over the input one line at a time and accumulates
//! the state graph. All parsing state lives in the builder so a pass can be
//! driven from a string, a file or a test without any global state.

use super::classifier::{LineClass, LineClassifier};
use super::{Diagnostic, Extraction};
use crate::config::ExtractConfig;
use crate::render::dot;
use crate::state_machine::{StateGraph, StateName, Transition};
use std::ops::ControlFlow;

/// Incremental builder for a single extraction pass
#[derive(Debug)]
pub struct StateGraphBuilder {
    classifier: LineClassifier,
    /// Write-once: captured from the first dispatch-open line
    state_variable: Option<String>,
    /// Label of the branch currently being scanned
    current_state: Option<StateName>,
    graph: StateGraph,
    diagnostics: Vec<Diagnostic>,
    stopped_early: bool,
}

impl Default for StateGraphBuilder {
    fn default() -> Self {
        Self::new(&ExtractConfig::default())
    }
}

impl StateGraphBuilder {
    pub fn new(config: &ExtractConfig) -> Self {
        Self {
            classifier: LineClassifier::new(config),
            state_variable: None,
            current_state: None,
            graph: StateGraph::new(),
            diagnostics: Vec::new(),
            stopped_early: false,
        }
    }

    pub fn state_variable(&self) -> Option<&str> {
        self.state_variable.as_deref()
    }

    pub fn current_state(&self) -> Option<&str> {
        self.current_state.as_deref()
    }

    /// Feed one raw line (1-based `line_number`).
    ///
    /// Returns `Break` once a second dispatch construct is seen; the caller
    /// must not feed any further lines.
    pub fn feed(&mut self, line_number: usize, line: &str) -> ControlFlow<()> {
        if self.stopped_early {
            return ControlFlow::Break(());
        }

        let line = line.trim();
        match self.classifier.classify(line, self.state_variable.as_deref()) {
            LineClass::DispatchOpen { .. } if self.state_variable.is_some() => {
                self.report(Diagnostic::SecondDispatch { line: line_number });
                self.stopped_early = true;
                return ControlFlow::Break(());
            }
            LineClass::DispatchOpen { variable: None } => {
                self.report(Diagnostic::MissingDispatchVariable { line: line_number });
            }
            LineClass::DispatchOpen {
                variable: Some(variable),
            } => {
                tracing::info!("State variable: {}", variable);
                self.state_variable = Some(variable.to_string());
                // Labels seen before the dispatch do not own its assignments
                self.current_state = None;
            }
            LineClass::BranchLabel { state: None } => {
                self.report(Diagnostic::MissingBranchName { line: line_number });
            }
            LineClass::BranchLabel { state: Some(state) } => {
                tracing::trace!("line {}: entering state {}", line_number, state);
                self.current_state = Some(state.to_string());
            }
            LineClass::Assignment { destination } => {
                let from = match self.current_state.clone() {
                    Some(state) => state,
                    None => {
                        self.report(Diagnostic::OrphanAssignment {
                            line: line_number,
                            destination: destination.clone(),
                        });
                        StateName::new()
                    }
                };
                tracing::debug!("line {}: {} -> {}", line_number, from, destination);
                self.graph
                    .add_transition(Transition::new(from, destination, line_number));
            }
            LineClass::Irrelevant => {}
        }

        ControlFlow::Continue(())
    }

    /// Close the pass and hand over the finished graph
    pub fn finish(mut self) -> Extraction {
        let unsafe_names: Vec<String> = self
            .graph
            .states()
            .into_iter()
            .filter(|name| !name.is_empty() && !dot::is_bare_id(name))
            .map(str::to_string)
            .collect();
        for name in unsafe_names {
            self.report(Diagnostic::UnsafeIdentifier { name });
        }

        if self.state_variable.is_none() {
            tracing::warn!("No dispatch construct found; the state graph is empty");
        }

        Extraction {
            state_variable: self.state_variable,
            graph: self.graph,
            diagnostics: self.diagnostics,
            stopped_early: self.stopped_early,
        }
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        tracing::warn!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }
}
