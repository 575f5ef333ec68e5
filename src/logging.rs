//! Logging setup using `tracing`.
//!
//! Log records go to stderr so the stdout report stays clean for scripts.
//!
//! # Configuration
//!
//! Level and format come from, in order of precedence:
//!
//! 1. `--log-level` / `--log-format` flags
//! 2. `SYNTAX_DIAGRAMS_LOG` / `SYNTAX_DIAGRAMS_LOG_FORMAT`
//! 3. `RUST_LOG` (level only)
//! 4. `info`, `compact`
//!
//! Output from the external renderer is logged at `debug` under the
//! `syntax_diagrams::renderer::tool` target:
//!
//! ```bash
//! RUST_LOG="info,syntax_diagrams::renderer::tool=debug" syntax-diagrams generate
//! ```

use std::str::FromStr;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const LEVEL_ENV: &str = "SYNTAX_DIAGRAMS_LOG";
pub const FORMAT_ENV: &str = "SYNTAX_DIAGRAMS_LOG_FORMAT";

/// Log format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Compact single-line format
    Compact,
    /// Pretty multi-line format with colors
    Pretty,
    /// JSON format for log aggregation
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

/// Build the level filter from an explicit directive or the environment.
///
/// Unparseable directives fall back to `info`.
pub fn build_filter(level: Option<&str>) -> EnvFilter {
    let directive = level
        .map(|s| s.to_string())
        .or_else(|| std::env::var(LEVEL_ENV).ok())
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "info".to_string());

    EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global tracing subscriber.
///
/// Returns an error for an unknown format or if a subscriber is already set.
pub fn init_logging(
    level: Option<&str>,
    format: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let filter = build_filter(level);

    let format = format
        .map(|s| s.to_string())
        .or_else(|| std::env::var(FORMAT_ENV).ok())
        .unwrap_or_else(|| "compact".to_string());
    let format = LogFormat::from_str(&format)?;

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()?,
        LogFormat::Pretty => registry
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .try_init()?,
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?,
    }
    Ok(())
}
