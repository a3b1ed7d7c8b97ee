//! Firmware FSM Visualizer
//!
//! Recovers the state machine encoded in a `switch` dispatch over a single
//! state variable and renders it as a Graphviz digraph.
//!
//! This library provides functionality for:
//! - Classifying source lines and building the state graph in one pass
//! - Analyzing the recovered topology (initial/terminal states, cycles)
//! - Writing the DOT description and running the layout tool on it

pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod render;
pub mod state_machine;

pub use config::Config;
pub use error::{Error, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Initialize logging with the given log level
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert_eq!(NAME, "fsm-viz");
    }
}
