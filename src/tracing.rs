//! Debug tracing infrastructure for development diagnostics
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=wikitext::update=trace` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/wikitext/logs/wikitext.log` with daily rotation.
//! File logging uses debug level by default for more verbose troubleshooting.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config_paths::ConfigPaths;
use crate::model::WikiModel;
use crate::position::Position;
use crate::registry::PatternId;

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG (default `warn`).
/// File logging writes to `~/.config/wikitext/logs/wikitext.log` with daily rotation.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let logs_dir = ConfigPaths::user()
        .ok_or_else(|| anyhow::anyhow!("No config directory available"))
        .and_then(|paths| paths.ensure_logs_dir());
    let file_layer = match logs_dir {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "wikitext.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    // A host application may already own the global subscriber
    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

/// Lightweight snapshot of a span set for diffing between passes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanSnapshot {
    pub revision: u64,
    pub spans: Vec<(Position, PatternId)>,
}

impl SpanSnapshot {
    pub fn from_model(model: &WikiModel) -> Self {
        Self {
            revision: model.spans_revision,
            spans: model
                .spans
                .iter()
                .map(|span| (span.position, span.pattern))
                .collect(),
        }
    }

    /// Describe what changed between two snapshots
    pub fn diff(&self, other: &SpanSnapshot) -> Option<String> {
        let removed: Vec<_> = self
            .spans
            .iter()
            .filter(|s| !other.spans.contains(s))
            .collect();
        let added: Vec<_> = other
            .spans
            .iter()
            .filter(|s| !self.spans.contains(s))
            .collect();

        if removed.is_empty() && added.is_empty() {
            return None;
        }

        let mut changes = vec![format!(
            "rev {} → {}: {} → {} spans",
            self.revision,
            other.revision,
            self.spans.len(),
            other.spans.len()
        )];
        for (position, pattern) in removed {
            changes.push(format!("-{} #{}", position, pattern.0));
        }
        for (position, pattern) in added {
            changes.push(format!("+{} #{}", position, pattern.0));
        }
        Some(changes.join("; "))
    }
}
