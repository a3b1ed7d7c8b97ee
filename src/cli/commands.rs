//! CLI command implementations
//!
//! This module contains the implementation for each CLI command.

use crate::config::Config;
use crate::extractor::{self, Extraction};
use crate::{Error, Result};
use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// Read `input` and run the extraction pass over it
async fn extract_file(input: &Path, config: &Config) -> Result<Extraction> {
    tracing::info!("Reading {:?}", input);
    let bytes = tokio::fs::read(input).await.map_err(|source| Error::Input {
        path: input.to_path_buf(),
        source,
    })?;

    let source = String::from_utf8_lossy(&bytes);
    if matches!(source, Cow::Owned(_)) {
        tracing::warn!("{:?} is not valid UTF-8; invalid bytes were replaced", input);
    }

    let extraction = extractor::extract(&source, &config.extract);
    if extraction.stopped_early {
        tracing::warn!("Extraction stopped at a second dispatch construct");
    }
    Ok(extraction)
}

/// Render command implementation
pub mod render {
    use super::*;
    use crate::render::Renderer;

    /// Execute the render command
    pub async fn execute(
        input: PathBuf,
        output: Option<PathBuf>,
        format: Option<String>,
        with_image: bool,
        config: &Config,
    ) -> Result<()> {
        let description = output.unwrap_or_else(|| config.render.output.clone());
        crate::ensure!(
            description.file_name().is_some(),
            "Output path {:?} does not name a file",
            description
        );

        let mut renderer = Renderer::new(&config.render);
        if let Some(format) = format {
            renderer = renderer.with_format(format);
        }
        if with_image {
            let image = renderer.image_path(&description);
            crate::ensure!(
                image != description,
                "Output path {:?} would be overwritten by the rendered image",
                description
            );
        }

        let extraction = extract_file(&input, config).await?;

        let written = renderer
            .render(&extraction.graph, &description, with_image)
            .await?;

        println!(
            "{}: {} transitions -> {}",
            input.display(),
            extraction.graph.transition_count(),
            written.description.display()
        );
        if let Some(image) = written.image {
            println!("Rendered {}", image.display());
        }

        Ok(())
    }
}

/// Show command implementation
pub mod show {
    use super::*;
    use crate::cli::{OutputFormat, output};
    use crate::state_machine::analyze;

    /// Execute the show command
    pub async fn execute(input: PathBuf, format: OutputFormat, config: &Config) -> Result<()> {
        let extraction = extract_file(&input, config).await?;
        let mut stdout = std::io::stdout();

        match format {
            OutputFormat::Dot => {
                output::output_dot(&mut stdout, &extraction, &config.render.graph_name)?;
            }
            OutputFormat::Json => {
                let report = analyze(&extraction.graph);
                output::output_json(&mut stdout, &extraction, &report)?;
            }
            OutputFormat::Table => {
                let report = analyze(&extraction.graph);
                output::output_table(&mut stdout, &extraction, &report)?;
            }
        }

        Ok(())
    }
}
