//! Topology analyzer
//!
//! Summarises the shape of a recovered state machine: where it starts, where
//! it can get stuck, and whether it loops. This is descriptive only; nothing
//! here rejects a graph.

use super::StateGraph;
use petgraph::Direction;
use serde::Serialize;

/// Analysis report over a finished state graph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisReport {
    pub total_states: usize,
    pub total_transitions: usize,
    /// States nothing transitions into
    pub initial_states: Vec<String>,
    /// States with no recorded outgoing transition
    pub terminal_states: Vec<String>,
    /// States that assign themselves
    pub self_loops: Vec<String>,
    pub has_cycles: bool,
}

/// Analyze a state graph
pub fn analyze(graph: &StateGraph) -> AnalysisReport {
    let pg = graph.to_petgraph();

    if pg.node_count() == 0 {
        return AnalysisReport::default();
    }

    let states_where = |direction: Direction| -> Vec<String> {
        pg.node_indices()
            .filter(|&idx| pg.neighbors_directed(idx, direction).next().is_none())
            .map(|idx| pg[idx].to_string())
            .collect()
    };

    let mut self_loops: Vec<String> = graph
        .transitions()
        .filter(|t| t.is_self_loop())
        .map(|t| t.from_state.clone())
        .collect();
    self_loops.dedup();

    AnalysisReport {
        total_states: pg.node_count(),
        total_transitions: pg.edge_count(),
        initial_states: states_where(Direction::Incoming),
        terminal_states: states_where(Direction::Outgoing),
        self_loops,
        has_cycles: petgraph::algo::is_cyclic_directed(&pg),
    }
}
