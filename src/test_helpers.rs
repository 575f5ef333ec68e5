//! Shared test utilities.
//!
//! Provides output-directory fixtures, diagram extractors, small HTML
//! scanners for checking the anchors of a rendered index, and log capture.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use crate::scan::Diagram;

// =========================================================================
// Fixture setup
// =========================================================================

/// A temp directory pre-populated with empty files of the given names.
pub fn output_dir_with(files: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for file in files {
        std::fs::write(tmp.path().join(file), b"").unwrap();
    }
    tmp
}

/// Path of the sample grammar shipped in `fixtures/`.
pub fn fixture_grammar() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/Expr.g")
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// All rule names in order.
pub fn rules(diagrams: &[Diagram]) -> Vec<&str> {
    diagrams.iter().map(|d| d.rule.as_str()).collect()
}

/// All file names in order.
pub fn filenames(diagrams: &[Diagram]) -> Vec<&str> {
    diagrams.iter().map(|d| d.filename.as_str()).collect()
}

// =========================================================================
// HTML anchor scanners
// =========================================================================

/// Collect every attribute value following `prefix` up to the closing quote.
fn attribute_values<'a>(html: &'a str, prefix: &str) -> Vec<&'a str> {
    html.match_indices(prefix)
        .filter_map(|(pos, _)| {
            let rest = &html[pos + prefix.len()..];
            rest.find('"').map(|end| &rest[..end])
        })
        .collect()
}

/// Table-of-contents link targets, in document order.
///
/// Only links inside the `<ol class="toc">` list count; "up" links are
/// outside it.
pub fn toc_anchors(html: &str) -> Vec<&str> {
    let start = html
        .find("<ol class=\"toc\">")
        .expect("index has no table of contents");
    let end = start + html[start..].find("</ol>").expect("unterminated toc");
    attribute_values(&html[start..end], "<a href=\"#")
}

/// Named section anchors, in document order.
pub fn section_anchors(html: &str) -> Vec<&str> {
    attribute_values(html, "<a name=\"")
}

// =========================================================================
// Log capture
// =========================================================================

/// In-memory sink for a `tracing_subscriber::fmt` writer.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a debug-level subscriber installed on this thread and
/// return its result together with everything that was logged.
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(true)
        .with_writer(move || writer.clone())
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    let logs = String::from_utf8_lossy(&buffer.0.lock().unwrap()).to_string();
    (result, logs)
}
