//! Styled-run production for the host widget's paint pass
//!
//! Emits plain runs for the gaps and styled runs for the spans. The runs for
//! a requested range cover it exactly once, in ascending order.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::dispatch::ResolvedAction;
use crate::position::Position;
use crate::registry::{PatternId, PatternRegistry};
use crate::style::{StyleSheet, TextStyle};
use crate::tokenizer::SpanMap;

/// Which paint path the host is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawContext {
    Selected,
    Unselected,
}

/// How a run should be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "pattern", rename_all = "snake_case")]
pub enum RunKind {
    Plain,
    Styled(PatternId),
}

/// One contiguous run of text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StyledRun {
    pub position: Position,
    pub kind: RunKind,
}

/// A run with its style resolved against a sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaintedRun {
    pub position: Position,
    pub style: TextStyle,
    /// Style id, None for plain text
    pub style_id: Option<String>,
}

/// Produces styled runs for a text range
pub trait RunRenderer {
    fn render(&self, range: Position, context: DrawContext) -> Vec<StyledRun>;
}

/// Finds the action bound to the span under an offset
pub trait ActionResolver {
    fn resolve_action(&self, offset: usize) -> Option<ResolvedAction>;
}

/// Partition `range` (clamped to `text_len`) into plain and styled runs.
///
/// Where spans overlap, the higher-priority (lower id) span owns the shared
/// text and the other is cut around it, so an enclosing span may yield
/// several runs.
pub fn render_runs(spans: &SpanMap, text_len: usize, range: Position) -> Vec<StyledRun> {
    let range = range.clamp_to(text_len);

    let mut by_priority: Vec<_> = spans.overlapping(range).collect();
    by_priority.sort_by_key(|span| (span.pattern, span.position));

    // Disjoint owned pieces keyed by start: start -> (end, pattern)
    let mut owned: BTreeMap<usize, (usize, PatternId)> = BTreeMap::new();
    for span in by_priority {
        let start = span.position.start.max(range.start);
        let end = span.position.end.min(range.end);
        for piece in unowned_pieces(&owned, start, end) {
            owned.insert(piece.start, (piece.end, span.pattern));
        }
    }

    let mut runs = Vec::new();
    let mut cursor = range.start;
    for (&start, &(end, pattern)) in &owned {
        if start > cursor {
            runs.push(StyledRun {
                position: Position::new(cursor, start),
                kind: RunKind::Plain,
            });
        }
        runs.push(StyledRun {
            position: Position::new(start, end),
            kind: RunKind::Styled(pattern),
        });
        cursor = end;
    }
    if cursor < range.end {
        runs.push(StyledRun {
            position: Position::new(cursor, range.end),
            kind: RunKind::Plain,
        });
    }

    runs
}

/// Parts of `[start, end)` not covered by any piece in `owned`
fn unowned_pieces(
    owned: &BTreeMap<usize, (usize, PatternId)>,
    start: usize,
    end: usize,
) -> Vec<Position> {
    let mut free = Vec::new();
    if start >= end {
        return free;
    }

    // Pieces are disjoint, so only the last one starting before `start` can reach into it
    let before = owned.range(..start).next_back();
    let inside = owned.range(start..end);

    let mut cursor = start;
    for (&piece_start, &(piece_end, _)) in before.into_iter().chain(inside) {
        if piece_start > cursor {
            free.push(Position::new(cursor, piece_start));
        }
        cursor = cursor.max(piece_end);
    }
    if cursor < end {
        free.push(Position::new(cursor, end));
    }
    free
}

/// Runs for the selected-text paint path. Styling matches the unselected
/// path; the selection background is drawn by the host.
pub fn render_selected(spans: &SpanMap, text_len: usize, range: Position) -> Vec<StyledRun> {
    render_runs(spans, text_len, range)
}

/// Runs for the unselected-text paint path
pub fn render_unselected(spans: &SpanMap, text_len: usize, range: Position) -> Vec<StyledRun> {
    render_runs(spans, text_len, range)
}

/// Dispatch on draw context
pub fn render_in_context(
    spans: &SpanMap,
    text_len: usize,
    range: Position,
    context: DrawContext,
) -> Vec<StyledRun> {
    match context {
        DrawContext::Selected => render_selected(spans, text_len, range),
        DrawContext::Unselected => render_unselected(spans, text_len, range),
    }
}

/// Resolve each run's style id through the registry and its style through the sheet
pub fn paint(runs: &[StyledRun], registry: &PatternRegistry, sheet: &StyleSheet) -> Vec<PaintedRun> {
    runs.iter()
        .map(|run| match run.kind {
            RunKind::Plain => PaintedRun {
                position: run.position,
                style: sheet.plain,
                style_id: None,
            },
            RunKind::Styled(pattern) => match registry.get(pattern) {
                Some(entry) => PaintedRun {
                    position: run.position,
                    style: sheet.resolve(&entry.style),
                    style_id: Some(entry.style.clone()),
                },
                None => PaintedRun {
                    position: run.position,
                    style: sheet.plain,
                    style_id: None,
                },
            },
        })
        .collect()
}
