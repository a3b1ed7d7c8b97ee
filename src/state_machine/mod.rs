//! State machine module - The recovered state graph and its analysis

pub mod analyzer;
pub mod graph;
pub mod transition;

// Re-export key types
pub use analyzer::{AnalysisReport, analyze};
pub use graph::StateGraph;
pub use transition::Transition;

/// Name of one branch of the dispatch construct. Compared by exact equality.
pub type StateName = String;
