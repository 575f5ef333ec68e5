//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.
//!
//! ## Generate / Index
//!
//! ```text
//! Diagrams
//! 001 Atom → Atom.png
//! 002 expr → expr.png
//! 003 prog → prog.png
//!
//! Index → target/antlrdiagrams/index.html
//! Generated 3 diagrams
//! ```
//!
//! ## Check
//!
//! ```text
//! Grammar: src/grammar/Expr.g
//! Output: target/antlrdiagrams (will be created)
//! Renderer: antlrworks → /usr/local/bin/antlrworks
//! Format: png
//! ```

use crate::generate::{CheckReport, GenerateSummary};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}

pub fn format_generate_output(summary: &GenerateSummary) -> Vec<String> {
    let mut lines = vec!["Diagrams".to_string()];
    if summary.diagrams.is_empty() {
        lines.push("    (none)".to_string());
    }
    for (i, diagram) in summary.diagrams.iter().enumerate() {
        lines.push(format!(
            "{} {} → {}",
            format_index(i + 1),
            diagram.rule,
            diagram.filename
        ));
    }
    lines.push(String::new());
    lines.push(format!("Index → {}", summary.index_path.display()));
    lines.push(format!(
        "Generated {}",
        plural(summary.diagrams.len(), "diagram")
    ));
    lines
}

pub fn print_generate_output(summary: &GenerateSummary) {
    for line in format_generate_output(summary) {
        println!("{}", line);
    }
}

pub fn format_check_output(report: &CheckReport) -> Vec<String> {
    let output_state = if report.output_dir_exists {
        "exists"
    } else {
        "will be created"
    };
    vec![
        format!("Grammar: {}", report.grammar_file.display()),
        format!(
            "Output: {} ({})",
            report.output_dir.display(),
            output_state
        ),
        format!(
            "Renderer: {} → {}",
            report.renderer_command,
            report.renderer_path.display()
        ),
        format!("Format: {}", report.format),
    ]
}

pub fn print_check_output(report: &CheckReport) {
    for line in format_check_output(report) {
        println!("{}", line);
    }
}
