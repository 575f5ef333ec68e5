//! Diagram configuration module.
//!
//! Handles loading, validating, and merging `diagrams.toml`. Stock defaults
//! are overridden by the user's config file, which is in turn overridden by
//! command-line flags.
//!
//! ## Configuration Options
//!
//! ```toml
//! grammar_file = "src/grammar/Expr.g"   # Required (or pass --grammar)
//! output_dir = "target/antlrdiagrams"   # Created if missing
//!
//! [renderer]
//! command = "antlrworks"
//! args = ["-f", "{grammar}", "-o", "{output}", "-sd", "{format}"]
//! format = "png"
//!
//! [index]
//! filename = "index.html"
//! title = "Syntax Diagrams"
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! grammar_file = "grammar/Sql.g"
//!
//! [renderer]
//! format = "svg"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "diagrams.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `diagrams.toml`.
///
/// Everything except the grammar file has a default. The grammar file may
/// come from the config file or from `--grammar`; it must be set by one of
/// them before [`DiagramConfig::validate`] passes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiagramConfig {
    /// Grammar whose rules should be rendered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grammar_file: Option<PathBuf>,
    /// Directory receiving the rendered images and the index page.
    pub output_dir: PathBuf,
    /// External rendering tool invocation.
    pub renderer: RendererConfig,
    /// Generated index page.
    pub index: IndexConfig,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            grammar_file: None,
            output_dir: PathBuf::from("target/antlrdiagrams"),
            renderer: RendererConfig::default(),
            index: IndexConfig::default(),
        }
    }
}

/// How to call the external diagram tool.
///
/// Arguments are templates: `{grammar}`, `{output}` and `{format}` are
/// replaced with the absolute grammar path, the absolute output directory
/// and the format token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RendererConfig {
    pub command: String,
    pub args: Vec<String>,
    /// Image format token passed to the tool; also the file suffix scanned for.
    pub format: String,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            command: "antlrworks".to_string(),
            args: ["-f", "{grammar}", "-o", "{output}", "-sd", "{format}"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            format: "png".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexConfig {
    /// File name of the index page, written inside the output directory.
    pub filename: String,
    /// Page `<title>` and top heading.
    pub title: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            filename: "index.html".to_string(),
            title: "Syntax Diagrams".to_string(),
        }
    }
}

/// Values given on the command line. `Some` wins over the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub grammar_file: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

impl DiagramConfig {
    /// Apply command-line overrides on top of the loaded file values.
    pub fn apply_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(grammar) = overrides.grammar_file {
            self.grammar_file = Some(grammar);
        }
        if let Some(output) = overrides.output_dir {
            self.output_dir = output;
        }
        self
    }

    /// The grammar file, or a validation error if neither file nor flag set it.
    pub fn grammar_file(&self) -> Result<&Path, ConfigError> {
        match self.grammar_file.as_deref() {
            Some(path) if !path.as_os_str().is_empty() => Ok(path),
            _ => Err(ConfigError::Validation(
                "grammar_file is required (set it in the config or pass --grammar)".into(),
            )),
        }
    }

    /// Validate config values. Requires the grammar file to be set.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grammar_file()?;
        self.validate_output()
    }

    /// Validate everything the indexing step needs (no grammar file involved).
    pub fn validate_output(&self) -> Result<(), ConfigError> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "output_dir must not be empty".into(),
            ));
        }
        if self.renderer.command.trim().is_empty() {
            return Err(ConfigError::Validation(
                "renderer.command must not be empty".into(),
            ));
        }
        let format = &self.renderer.format;
        if format.is_empty() || !format.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ConfigError::Validation(format!(
                "renderer.format must be a non-empty alphanumeric token, got {format:?}"
            )));
        }
        let filename = &self.index.filename;
        if filename.is_empty() || filename.contains(['/', '\\']) {
            return Err(ConfigError::Validation(
                "index.filename must be a bare file name".into(),
            ));
        }
        if crate::scan::is_diagram_file(filename, format) {
            return Err(ConfigError::Validation(format!(
                "index.filename must not end in .{format}; it would be listed as a diagram"
            )));
        }
        Ok(())
    }
}

// =============================================================================
// Config loading and merging
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(DiagramConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely, arrays included.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file as a raw TOML value. `Ok(None)` when the file is absent.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Load config from the given file, merged over stock defaults.
///
/// Rejects unknown keys. Does not validate: command-line overrides are
/// applied afterwards and the caller validates the final result.
pub fn load_config(path: &Path) -> Result<DiagramConfig, ConfigError> {
    let merged = match load_raw_config(path)? {
        Some(overlay) => merge_toml(stock_defaults_value(), overlay),
        None => stock_defaults_value(),
    };
    Ok(merged.try_into()?)
}

/// Returns a fully-commented stock `diagrams.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Syntax Diagrams Configuration
# =============================
#
# All options except grammar_file are optional; defaults are shown.
# Command-line flags (--grammar, --output) override values in this file.

# Grammar whose rules are rendered, one image per rule. Required.
# grammar_file = "src/grammar/Expr.g"

# Where images and the index page are written. Created if missing.
output_dir = "target/antlrdiagrams"

# ---------------------------------------------------------------------------
# External rendering tool
# ---------------------------------------------------------------------------
[renderer]
# Executable to run (looked up on PATH).
command = "antlrworks"

# Argument template. Placeholders:
#   {grammar}  absolute path of the grammar file
#   {output}   absolute path of the output directory
#   {format}   the format token below
args = ["-f", "{grammar}", "-o", "{output}", "-sd", "{format}"]

# Image format produced by the tool. Files ending in .<format> are indexed.
format = "png"

# ---------------------------------------------------------------------------
# Index page
# ---------------------------------------------------------------------------
[index]
filename = "index.html"
title = "Syntax Diagrams"
"##
}

// =============================================================================
// Tests
// =============================================================================
