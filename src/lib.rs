//! # Syntax Diagrams
//!
//! Renders one syntax diagram per grammar rule with an external tool and
//! links them all from a static HTML index page. Meant to be run as a build
//! step: the grammar is the data source, the output directory is the artifact.
//!
//! # Pipeline
//!
//! ```text
//! 1. Prepare   create output dir if missing
//! 2. Render    antlrworks -f Expr.g -o out/ -sd png   →  out/*.png
//! 3. Index     out/*.png (sorted, case-insensitive)   →  out/index.html
//! ```
//!
//! Parsing and drawing are delegated to the external tool. This crate owns
//! the orchestration, the file discovery, and the index page.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `diagrams.toml` loading, stock defaults, CLI overrides, validation |
//! | [`renderer`] | [`renderer::DiagramRenderer`] trait and the external console renderer |
//! | [`scan`] | Finds `.<format>` images and sorts them case-insensitively |
//! | [`index`] | Renders and writes the HTML index using Maud |
//! | [`generate`] | The pipeline: prepare, render, index; plus `check` |
//! | [`output`] | CLI output formatting |
//! | [`logging`] | `tracing` subscriber setup |
//!
//! # Failure Behavior
//!
//! A failing renderer aborts the run before the index step, so the output
//! directory never gets an index describing a partial render. The index
//! itself is written to a staging file and renamed into place.

pub mod config;
pub mod generate;
pub mod index;
pub mod logging;
pub mod output;
pub mod renderer;
pub mod scan;

#[cfg(test)]
pub(crate) mod test_helpers;
