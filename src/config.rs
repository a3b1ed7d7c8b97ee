//! Configuration management
//!
//! This module handles loading and managing configuration from:
//! - Command-line arguments
//! - Environment variables
//! - Configuration files (TOML)
//! - Defaults

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub extract: ExtractConfig,

    #[serde(default)]
    pub render: RenderConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Keywords and token rules used by the line classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Keyword opening the dispatch construct
    #[serde(default = "default_dispatch_keyword")]
    pub dispatch_keyword: String,

    /// Keyword introducing a branch label
    #[serde(default = "default_branch_keyword")]
    pub branch_keyword: String,

    /// Strip embedded whitespace from destination tokens
    #[serde(default = "default_strip_whitespace")]
    pub strip_whitespace: bool,
}

/// Graph description and layout tool settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Name written after `digraph`
    #[serde(default = "default_graph_name")]
    pub graph_name: String,

    /// Path of the graph description file
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Layout tool executable
    #[serde(default = "default_tool")]
    pub tool: String,

    /// Image format passed to the layout tool as `-T<format>`
    #[serde(default = "default_format")]
    pub format: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions

fn default_dispatch_keyword() -> String {
    "switch".to_string()
}

fn default_branch_keyword() -> String {
    "case".to_string()
}

fn default_strip_whitespace() -> bool {
    true
}

fn default_graph_name() -> String {
    "DDC_IO_FSM".to_string()
}

fn default_output() -> PathBuf {
    PathBuf::from("fsm.dot")
}

fn default_tool() -> String {
    "dot".to_string()
}

fn default_format() -> String {
    "svg".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// Default implementations

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            dispatch_keyword: default_dispatch_keyword(),
            branch_keyword: default_branch_keyword(),
            strip_whitespace: default_strip_whitespace(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            graph_name: default_graph_name(),
            output: default_output(),
            tool: default_tool(),
            format: default_format(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let contents = std::fs::read_to_string(&path)
            .map_err(|e| Error::Config(format!("Failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config file {:?}: {}", path, e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default locations
    ///
    /// Searches in order:
    /// 1. ./fsm-viz.toml
    /// 2. ~/.fsm-viz/config.toml
    /// 3. /etc/fsm-viz/config.toml
    pub fn load() -> Result<Self> {
        let mut paths = vec![PathBuf::from("fsm-viz.toml")];
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".fsm-viz").join("config.toml"));
        }
        paths.push(PathBuf::from("/etc/fsm-viz/config.toml"));

        for path in paths {
            if path.exists() {
                tracing::info!("Loading config from {:?}", path);
                return Self::from_file(path);
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Config::default())
    }

    /// Reject settings the classifier or renderer cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.extract.dispatch_keyword.trim().is_empty() {
            return Err(Error::Config("extract.dispatch_keyword cannot be empty".into()));
        }
        if self.extract.branch_keyword.trim().is_empty() {
            return Err(Error::Config("extract.branch_keyword cannot be empty".into()));
        }
        if self.render.graph_name.trim().is_empty() {
            return Err(Error::Config("render.graph_name cannot be empty".into()));
        }
        if self.render.format.trim().is_empty() {
            return Err(Error::Config("render.format cannot be empty".into()));
        }
        Ok(())
    }
}
