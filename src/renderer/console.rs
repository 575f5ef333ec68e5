//! Renderer that delegates to an external console tool.
//!
//! The default configuration targets ANTLRWorks' console mode:
//!
//! ```text
//! antlrworks -f /abs/Expr.g -o /abs/target/antlrdiagrams -sd png
//! ```
//!
//! Any tool with a comparable command line can be plugged in through the
//! argument template in [`RendererConfig`].

use super::backend::{DiagramRenderer, RenderError, RenderRequest};
use crate::config::RendererConfig;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct ConsoleRenderer {
    command: String,
    args: Vec<String>,
}

impl ConsoleRenderer {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }

    pub fn from_config(config: &RendererConfig) -> Self {
        Self::new(config.command.clone(), config.args.clone())
    }
}

/// Substitute `{grammar}`, `{output}` and `{format}` in every argument.
pub fn expand_args(template: &[String], grammar: &Path, output: &Path, format: &str) -> Vec<String> {
    let grammar = grammar.to_string_lossy();
    let output = output.to_string_lossy();
    template
        .iter()
        .map(|arg| {
            arg.replace("{grammar}", &grammar)
                .replace("{output}", &output)
                .replace("{format}", format)
        })
        .collect()
}

/// Resolve a command on `PATH`. Paths containing a separator are checked as-is.
pub fn find_command(command: &str) -> Option<PathBuf> {
    which::which(command).ok()
}

impl DiagramRenderer for ConsoleRenderer {
    fn render(&self, request: &RenderRequest<'_>) -> Result<(), RenderError> {
        if !request.grammar_file.is_file() {
            return Err(RenderError::GrammarNotFound(
                request.grammar_file.to_path_buf(),
            ));
        }
        let grammar = std::path::absolute(request.grammar_file)?;
        let output = std::path::absolute(request.output_dir)?;
        let args = expand_args(&self.args, &grammar, &output, request.format);

        info!(
            "generate diagrams using {} with arguments: {}",
            self.command,
            args.join(" ")
        );

        let result = Command::new(&self.command).args(&args).output();
        let output = match result {
            Ok(output) => output,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(RenderError::CommandNotFound(self.command.clone()));
            }
            Err(e) => return Err(e.into()),
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        for line in stdout.lines().chain(stderr.lines()) {
            debug!(target: "syntax_diagrams::renderer::tool", "{line}");
        }

        if !output.status.success() {
            return Err(RenderError::Failed {
                command: self.command.clone(),
                status: output.status,
                stderr: stderr.trim().to_string(),
            });
        }
        Ok(())
    }
}
