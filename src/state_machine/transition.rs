//! Transition representation

use crate::state_machine::StateName;

/// A transition between states, as found in the source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub from_state: StateName,
    pub to_state: StateName,
    /// 1-based line of the assignment that produced this transition
    pub line: usize,
}

impl Transition {
    pub fn new(
        from_state: impl Into<StateName>,
        to_state: impl Into<StateName>,
        line: usize,
    ) -> Self {
        Self {
            from_state: from_state.into(),
            to_state: to_state.into(),
            line,
        }
    }

    /// Whether the assignment appeared before any branch label
    pub fn is_orphan(&self) -> bool {
        self.from_state.is_empty()
    }

    pub fn is_self_loop(&self) -> bool {
        self.from_state == self.to_state
    }
}
