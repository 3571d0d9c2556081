//! Model types for the wiki text widget
//!
//! Everything the update function reads or writes lives in [`WikiModel`].

pub mod document;

use std::sync::Arc;

pub use document::Document;

use crate::click::ClickTracker;
use crate::config::WikiConfig;
use crate::dispatch::{resolve_action, ResolvedAction};
use crate::position::Position;
use crate::registry::{PatternRegistry, PatternSpec, RegistryError};
use crate::render::{self, ActionResolver, DrawContext, PaintedRun, RunRenderer, StyledRun};
use crate::style::StyleSheet;
use crate::tokenizer::{tokenize, SpanMap};

/// Widget state: buffer, patterns, current spans and click tracking
#[derive(Debug, Clone)]
pub struct WikiModel {
    pub document: Document,
    /// Shared, read-only after construction; swapped wholesale on extension
    pub registry: Arc<PatternRegistry>,
    /// Spans from the most recent committed pass
    pub spans: SpanMap,
    /// Document revision `spans` was computed for
    pub spans_revision: u64,
    pub clicks: ClickTracker,
    pub config: WikiConfig,
    pub style_sheet: StyleSheet,
}

impl WikiModel {
    /// Create a model and run the first tokenizer pass
    pub fn new(text: &str, registry: Arc<PatternRegistry>, config: WikiConfig) -> Self {
        let mut model = Self {
            document: Document::with_text(text),
            registry,
            spans: SpanMap::new(),
            spans_revision: 0,
            clicks: ClickTracker::new(),
            config,
            style_sheet: StyleSheet::default_sheet(),
        };
        model.retokenize();
        model
    }

    /// Model over the stock wiki registry plus any patterns named in `config`
    pub fn with_wiki_defaults(text: &str, config: WikiConfig) -> Result<Self, RegistryError> {
        let registry = PatternRegistry::wiki_defaults()?.extended(&config.patterns)?;
        Ok(Self::new(text, Arc::new(registry), config))
    }

    pub fn with_style_sheet(mut self, sheet: StyleSheet) -> Self {
        self.style_sheet = sheet;
        self
    }

    pub fn text(&self) -> String {
        self.document.text()
    }

    pub fn char_len(&self) -> usize {
        self.document.char_len()
    }

    pub fn revision(&self) -> u64 {
        self.document.revision
    }

    /// True when the committed spans predate the current buffer
    pub fn spans_are_stale(&self) -> bool {
        self.spans_revision != self.document.revision
    }

    /// Text covered by `position`; empty when out of range
    pub fn text_at(&self, position: Position) -> String {
        self.document.text_at(position)
    }

    /// Run a full pass over the current buffer inline
    pub fn retokenize(&mut self) {
        let source = self.document.text();
        self.spans = tokenize(&source, &self.registry);
        self.spans_revision = self.document.revision;
        tracing::debug!(
            "Tokenized rev {} ({} chars): {} spans",
            self.spans_revision,
            self.document.char_len(),
            self.spans.len()
        );
    }

    /// Commit spans from a pass over `revision`. Stale results are dropped.
    /// Returns whether the spans were applied.
    pub fn commit_spans(&mut self, revision: u64, spans: SpanMap) -> bool {
        if revision != self.document.revision {
            tracing::debug!(
                "Discarding stale tokenize results: doc revision {} != result revision {}",
                self.document.revision,
                revision
            );
            return false;
        }
        self.spans = spans;
        self.spans_revision = revision;
        true
    }

    /// Append patterns to the registry.
    ///
    /// On error the current registry stays in place. On success the document
    /// revision is bumped so in-flight passes over the old registry go stale;
    /// the caller must schedule a new pass.
    pub fn install_patterns(&mut self, extra: &[PatternSpec]) -> Result<(), RegistryError> {
        let registry = self.registry.extended(extra)?;
        tracing::info!(
            "Installed {} pattern(s), registry now has {}",
            extra.len(),
            registry.len()
        );
        self.registry = Arc::new(registry);
        self.document.revision += 1;
        Ok(())
    }

    /// Runs for `range` with styles resolved against the current sheet
    pub fn paint(&self, range: Position, context: DrawContext) -> Vec<PaintedRun> {
        let runs = self.render(range, context);
        render::paint(&runs, &self.registry, &self.style_sheet)
    }
}

impl RunRenderer for WikiModel {
    fn render(&self, range: Position, context: DrawContext) -> Vec<StyledRun> {
        render::render_in_context(&self.spans, self.document.char_len(), range, context)
    }
}

impl ActionResolver for WikiModel {
    fn resolve_action(&self, offset: usize) -> Option<ResolvedAction> {
        if offset > self.document.char_len() {
            return None;
        }
        resolve_action(&self.spans, &self.registry, offset)
    }
}
