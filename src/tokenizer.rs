//! Full-text tokenizer
//!
//! Runs every registry pattern over the whole text, in priority order, and
//! keeps each match unless a span claimed earlier already contains it.
//!
//! Only containment disqualifies a match. A later match that straddles the
//! edge of an earlier span, or encloses it, is kept, so the result can hold
//! overlapping spans. Lookup and rendering resolve those by priority: where
//! spans overlap, the lower [`PatternId`] owns the text.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::position::Position;
use crate::registry::{PatternId, PatternRegistry};
use crate::util::CharIndex;

/// A pattern-tagged text interval
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Span {
    pub position: Position,
    pub pattern: PatternId,
    /// Matched text
    pub text: String,
}

/// Result of one tokenizer pass, ordered by `(start, end)`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpanMap {
    spans: BTreeMap<Position, Span>,
    /// Width of the widest span; bounds how far back a containing span can start
    max_len: usize,
}

impl SpanMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spans whose start lies in `[lo, hi]`, in document order
    fn starting_between(&self, lo: usize, hi: usize) -> impl Iterator<Item = &Span> {
        let from = Position { start: lo, end: 0 };
        let to = Position {
            start: hi,
            end: usize::MAX,
        };
        self.spans.range(from..=to).map(|(_, span)| span)
    }

    /// True if an existing span fully contains `position`
    pub fn already_matched(&self, position: &Position) -> bool {
        if position.span_len() > self.max_len {
            return false;
        }
        let lo = position.end.saturating_sub(self.max_len);
        self.starting_between(lo, position.start)
            .any(|existing| existing.position.contains(position.start, position.end))
    }

    /// Insert unless already matched. Returns whether the span was kept.
    pub fn claim(&mut self, span: Span) -> bool {
        if self.already_matched(&span.position) {
            return false;
        }
        self.max_len = self.max_len.max(span.position.span_len());
        self.spans.insert(span.position, span);
        true
    }

    pub fn get(&self, position: &Position) -> Option<&Span> {
        self.spans.get(position)
    }

    /// Highest-priority span whose bounds include `offset`.
    ///
    /// A lower-priority span may enclose a higher-priority one; inside the
    /// inner span the inner one wins.
    pub fn span_at(&self, offset: usize) -> Option<&Span> {
        self.starting_between(offset.saturating_sub(self.max_len), offset)
            .filter(|span| span.position.contains(offset, offset))
            .min_by_key(|span| span.pattern)
    }

    /// Spans sharing at least one character with `range`, in document order
    pub fn overlapping(&self, range: Position) -> impl Iterator<Item = &Span> {
        self.starting_between(range.start.saturating_sub(self.max_len), range.end)
            .filter(move |span| span.position.start < range.end && span.position.end > range.start)
    }

    /// Spans in document order
    pub fn iter(&self) -> impl Iterator<Item = &Span> {
        self.spans.values()
    }

    pub fn positions(&self) -> impl Iterator<Item = &Position> {
        self.spans.keys()
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

/// Tokenize `text` against `registry`.
///
/// Offsets in the result are character offsets. Zero-length matches are
/// ignored since they cannot be styled or clicked.
pub fn tokenize(text: &str, registry: &PatternRegistry) -> SpanMap {
    #[cfg(feature = "profile-tracing")]
    let _span = tracing::trace_span!("tokenize", chars = text.len()).entered();

    let index = CharIndex::new(text);
    let mut map = SpanMap::new();

    for entry in registry.iter() {
        let mut kept = 0usize;
        let mut dropped = 0usize;
        for m in entry.regex.find_iter(text) {
            if m.start() == m.end() {
                continue;
            }
            let span = Span {
                position: Position::new(index.char_offset(m.start()), index.char_offset(m.end())),
                pattern: entry.id,
                text: m.as_str().to_string(),
            };
            if map.claim(span) {
                kept += 1;
            } else {
                dropped += 1;
            }
        }
        if kept + dropped > 0 {
            tracing::trace!(
                "pattern '{}': {} kept, {} already matched",
                entry.name,
                kept,
                dropped
            );
        }
    }

    map
}
