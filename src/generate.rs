//! The diagram pipeline.
//!
//! ```text
//! 1. Prepare   create the output directory if it does not exist
//! 2. Render    external tool writes one image per grammar rule
//! 3. Index     scan the images, sort them, write index.html
//! ```
//!
//! Each step runs once, in order. A failure in any step is logged and
//! returned; nothing is retried. When rendering fails the index step never
//! runs, so no index is produced from a half-finished render.

use crate::config::{ConfigError, DiagramConfig, IndexConfig};
use crate::index;
use crate::renderer::{self, DiagramRenderer, RenderError, RenderRequest};
use crate::scan::{self, Diagram, ScanError};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Failed to generate syntax diagrams: {0}")]
    Render(#[from] RenderError),
    #[error("Failed to scan diagrams: {0}")]
    Scan(#[from] ScanError),
}

/// What a pipeline run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateSummary {
    pub output_dir: PathBuf,
    pub index_path: PathBuf,
    pub diagrams: Vec<Diagram>,
}

/// Result of a dry-run check of the configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckReport {
    pub grammar_file: PathBuf,
    pub output_dir: PathBuf,
    pub output_dir_exists: bool,
    pub renderer_command: String,
    pub renderer_path: PathBuf,
    pub format: String,
}

/// Create the output directory (and any missing parents).
pub fn prepare_output_dir(dir: &Path) -> std::io::Result<()> {
    if !dir.exists() {
        info!("creating output directory {}", dir.display());
    }
    fs::create_dir_all(dir)
}

/// Run the full pipeline: prepare, render, index.
pub fn generate(
    config: &DiagramConfig,
    renderer: &dyn DiagramRenderer,
) -> Result<GenerateSummary, GenerateError> {
    config.validate()?;
    let grammar_file = config.grammar_file()?;
    let output_dir = config.output_dir.as_path();

    info!("outputDirectory: {}", output_dir.display());
    info!("grammarFile: {}", grammar_file.display());

    prepare_output_dir(output_dir)?;

    let request = RenderRequest {
        grammar_file,
        output_dir,
        format: &config.renderer.format,
    };
    if let Err(e) = renderer.render(&request) {
        error!("failed to generate syntax diagrams: {e}");
        return Err(e.into());
    }

    build_index(output_dir, &config.renderer.format, &config.index)
}

/// Validate the config and its environment without writing anything.
///
/// Fails when the grammar file is missing or the renderer cannot be found
/// on `PATH`.
pub fn check(config: &DiagramConfig) -> Result<CheckReport, GenerateError> {
    config.validate()?;
    let grammar_file = config.grammar_file()?;
    if !grammar_file.is_file() {
        return Err(RenderError::GrammarNotFound(grammar_file.to_path_buf()).into());
    }
    let command = &config.renderer.command;
    let renderer_path = renderer::find_command(command)
        .ok_or_else(|| RenderError::CommandNotFound(command.clone()))?;

    Ok(CheckReport {
        grammar_file: grammar_file.to_path_buf(),
        output_dir: config.output_dir.clone(),
        output_dir_exists: config.output_dir.is_dir(),
        renderer_command: command.clone(),
        renderer_path,
        format: config.renderer.format.clone(),
    })
}

/// Scan `output_dir` for `.<format>` images and write the index page.
pub fn build_index(
    output_dir: &Path,
    format: &str,
    index_config: &IndexConfig,
) -> Result<GenerateSummary, GenerateError> {
    let diagrams = scan::scan_diagrams(output_dir, format).inspect_err(|e| {
        error!("failed to generate index file: {e}");
    })?;
    if diagrams.is_empty() {
        warn!(
            "no .{format} diagrams found in {}; writing an empty index",
            output_dir.display()
        );
    }

    let page = index::render_index(&index_config.title, &diagrams);
    let index_path = index::write_index(output_dir, &index_config.filename, page)
        .inspect_err(|e| error!("failed to generate index file: {e}"))?;
    info!(
        "wrote {} with {} diagrams",
        index_path.display(),
        diagrams.len()
    );

    Ok(GenerateSummary {
        output_dir: output_dir.to_path_buf(),
        index_path,
        diagrams,
    })
}
