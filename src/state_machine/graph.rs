use crate::state_machine::{StateName, Transition};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, HashSet};

/// The state machine recovered from a dispatch construct.
///
/// Maps every source state to the destinations it was seen assigning, in the
/// order the assignments appear in the source. Repeated destinations are
/// kept. Source states iterate in the order they first received a
/// transition, so anything derived from the graph is reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateGraph {
    /// Source states in first-insertion order.
    sources: Vec<StateName>,

    /// Outgoing transitions per source state.
    transitions: HashMap<StateName, Vec<Transition>>,
}

impl StateGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a transition under its source state, creating the key if absent.
    pub fn add_transition(&mut self, transition: Transition) {
        match self.transitions.get_mut(&transition.from_state) {
            Some(outgoing) => outgoing.push(transition),
            None => {
                self.sources.push(transition.from_state.clone());
                self.transitions
                    .insert(transition.from_state.clone(), vec![transition]);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Source states in first-insertion order
    pub fn sources(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().map(String::as_str)
    }

    /// Destinations of `state` in source order, empty if it never transitions
    pub fn destinations(&self, state: &str) -> Vec<&str> {
        self.outgoing(state)
            .iter()
            .map(|t| t.to_state.as_str())
            .collect()
    }

    /// Outgoing transitions of `state` in source order
    pub fn outgoing(&self, state: &str) -> &[Transition] {
        self.transitions
            .get(state)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Every transition, grouped by source state in first-insertion order
    pub fn transitions(&self) -> impl Iterator<Item = &Transition> {
        self.sources
            .iter()
            .flat_map(|source| self.outgoing(source).iter())
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.values().map(Vec::len).sum()
    }

    /// All state names, sources and destinations, in order of first mention
    pub fn states(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut states = Vec::new();
        for transition in self.transitions() {
            for name in [transition.from_state.as_str(), transition.to_state.as_str()] {
                if seen.insert(name) {
                    states.push(name);
                }
            }
        }
        states
    }

    /// Mapping view: each source state with its ordered destinations
    pub fn adjacency(&self) -> Vec<(&str, Vec<&str>)> {
        self.sources()
            .map(|source| (source, self.destinations(source)))
            .collect()
    }

    /// Builds a petgraph view with one node per state and one edge per transition
    pub fn to_petgraph(&self) -> DiGraph<&str, usize> {
        let mut graph = DiGraph::new();
        let mut index: HashMap<&str, NodeIndex> = HashMap::new();

        for state in self.states() {
            index.insert(state, graph.add_node(state));
        }

        for transition in self.transitions() {
            if let (Some(&from), Some(&to)) = (
                index.get(transition.from_state.as_str()),
                index.get(transition.to_state.as_str()),
            ) {
                graph.add_edge(from, to, transition.line);
            }
        }

        graph
    }
}
