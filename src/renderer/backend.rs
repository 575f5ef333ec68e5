//! Renderer trait and shared types.
//!
//! The [`DiagramRenderer`] trait is the single seam between the pipeline and
//! whatever produces the images. The production implementation is
//! [`ConsoleRenderer`](super::console::ConsoleRenderer), which shells out to
//! an external tool.

use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Grammar file not found: {0}")]
    GrammarNotFound(PathBuf),
    #[error("Renderer command not found: {0}")]
    CommandNotFound(String),
    #[error("Renderer `{command}` exited with {status}: {stderr}")]
    Failed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },
}

/// One rendering job: every rule of `grammar_file` into `output_dir`.
#[derive(Debug, Clone, Copy)]
pub struct RenderRequest<'a> {
    pub grammar_file: &'a Path,
    pub output_dir: &'a Path,
    /// Image format token, e.g. `png`.
    pub format: &'a str,
}

/// Produces one image per grammar rule in the request's output directory.
pub trait DiagramRenderer {
    fn render(&self, request: &RenderRequest<'_>) -> Result<(), RenderError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Mock renderer that records requests and writes empty image files
    /// for a fixed list of rule names, like the real tool would.
    #[derive(Default)]
    pub struct MockRenderer {
        pub rules: Vec<String>,
        pub fail: bool,
        pub requests: Mutex<Vec<RecordedRequest>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct RecordedRequest {
        pub grammar_file: PathBuf,
        pub output_dir: PathBuf,
        pub format: String,
    }

    impl MockRenderer {
        pub fn with_rules(rules: &[&str]) -> Self {
            Self {
                rules: rules.iter().map(|r| r.to_string()).collect(),
                ..Self::default()
            }
        }

        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        pub fn get_requests(&self) -> Vec<RecordedRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl DiagramRenderer for MockRenderer {
        fn render(&self, request: &RenderRequest<'_>) -> Result<(), RenderError> {
            self.requests.lock().unwrap().push(RecordedRequest {
                grammar_file: request.grammar_file.to_path_buf(),
                output_dir: request.output_dir.to_path_buf(),
                format: request.format.to_string(),
            });

            if self.fail {
                return Err(RenderError::CommandNotFound("mock".to_string()));
            }
            for rule in &self.rules {
                let file = request.output_dir.join(format!("{rule}.{}", request.format));
                std::fs::write(file, b"")?;
            }
            Ok(())
        }
    }

    #[test]
    fn mock_records_request_and_writes_images() {
        let tmp = tempfile::TempDir::new().unwrap();
        let renderer = MockRenderer::with_rules(&["expr", "term"]);

        renderer
            .render(&RenderRequest {
                grammar_file: Path::new("/grammars/Expr.g"),
                output_dir: tmp.path(),
                format: "png",
            })
            .unwrap();

        let requests = renderer.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].grammar_file, PathBuf::from("/grammars/Expr.g"));
        assert_eq!(requests[0].format, "png");
        assert!(tmp.path().join("expr.png").exists());
        assert!(tmp.path().join("term.png").exists());
    }

    #[test]
    fn failing_mock_writes_nothing() {
        let tmp = tempfile::TempDir::new().unwrap();
        let renderer = MockRenderer {
            rules: vec!["expr".to_string()],
            fail: true,
            ..MockRenderer::default()
        };

        let result = renderer.render(&RenderRequest {
            grammar_file: Path::new("Expr.g"),
            output_dir: tmp.path(),
            format: "png",
        });

        assert!(result.is_err());
        assert!(!tmp.path().join("expr.png").exists());
        assert_eq!(renderer.get_requests().len(), 1);
    }
}
