//! Render module - Graph description output and image generation
//!
//! The renderer writes the DOT description of a state graph to disk and then
//! runs the Graphviz layout tool on it. The tool is awaited and its exit
//! status checked; a missing tool or a failed layout is an error.

use crate::config::RenderConfig;
use crate::state_machine::StateGraph;
use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tokio::process::Command;

pub mod dot;

pub use dot::{Dot, to_dot};

/// Files produced by a render run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOutput {
    pub description: PathBuf,
    pub image: Option<PathBuf>,
}

/// Writes graph descriptions and drives the layout tool
#[derive(Debug, Clone)]
pub struct Renderer {
    graph_name: String,
    tool: String,
    format: String,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(&RenderConfig::default())
    }
}

impl Renderer {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            graph_name: config.graph_name.clone(),
            tool: config.tool.clone(),
            format: config.format.clone(),
        }
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        self.tool = tool.into();
        self
    }

    pub fn description(&self, graph: &StateGraph) -> String {
        to_dot(graph, &self.graph_name)
    }

    /// Image path next to `description`, with the format as extension
    pub fn image_path(&self, description: &Path) -> PathBuf {
        description.with_extension(&self.format)
    }

    /// Write the DOT description of `graph` to `path`
    pub async fn write_description(&self, graph: &StateGraph, path: &Path) -> Result<()> {
        tokio::fs::write(path, self.description(graph)).await?;
        tracing::info!("Graph description written to {:?}", path);
        Ok(())
    }

    /// Run the layout tool on `description` and wait for it
    pub async fn render_image(&self, description: &Path) -> Result<PathBuf> {
        let image = self.image_path(description);
        tracing::debug!(
            "Running {} {:?} -T{} -o {:?}",
            self.tool,
            description,
            self.format,
            image
        );

        let output = Command::new(&self.tool)
            .arg(description)
            .arg(format!("-T{}", self.format))
            .arg("-o")
            .arg(&image)
            .output()
            .await
            .map_err(|e| Error::render(format!("failed to start {}: {}", self.tool, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::render(format!(
                "{} exited with {}: {}",
                self.tool,
                output.status,
                stderr.trim()
            )));
        }

        tracing::info!("Image written to {:?}", image);
        Ok(image)
    }

    /// Write the description and, if `with_image`, render it
    pub async fn render(
        &self,
        graph: &StateGraph,
        description: &Path,
        with_image: bool,
    ) -> Result<RenderOutput> {
        self.write_description(graph, description).await?;

        let image = if with_image {
            Some(self.render_image(description).await?)
        } else {
            None
        };

        Ok(RenderOutput {
            description: description.to_path_buf(),
            image,
        })
    }
}
