//! Document model - the text buffer being highlighted

use ropey::Rope;

use crate::position::Position;

/// Text buffer plus a revision counter bumped on every change.
///
/// Offsets are character offsets and are clamped to the buffer, so callers
/// may pass positions from stale pointer events.
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// The text buffer
    pub buffer: Rope,
    /// Incremented on each edit; tokenizer results carry the revision they
    /// were computed for
    pub revision: u64,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document with initial text
    pub fn with_text(text: &str) -> Self {
        Self {
            buffer: Rope::from(text),
            revision: 0,
        }
    }

    /// Number of characters in the buffer
    pub fn char_len(&self) -> usize {
        self.buffer.len_chars()
    }

    /// Snapshot of the full text
    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    /// Insert `text` at `offset` (clamped to the end). Returns the offset used.
    pub fn insert(&mut self, offset: usize, text: &str) -> usize {
        let offset = offset.min(self.char_len());
        self.buffer.insert(offset, text);
        self.revision += 1;
        offset
    }

    /// Remove up to `len` characters starting at `offset`. Returns the range
    /// actually removed.
    pub fn remove(&mut self, offset: usize, len: usize) -> Position {
        let range = Position::new(offset, offset.saturating_add(len)).clamp_to(self.char_len());
        if !range.is_empty() {
            self.buffer.remove(range.start..range.end);
        }
        self.revision += 1;
        range
    }

    /// Replace the whole buffer
    pub fn set_text(&mut self, text: &str) {
        self.buffer = Rope::from(text);
        self.revision += 1;
    }

    /// Text covered by `position`; empty when out of range
    pub fn text_at(&self, position: Position) -> String {
        let range = position.clamp_to(self.char_len());
        if range.is_empty() {
            return String::new();
        }
        self.buffer.slice(range.start..range.end).to_string()
    }
}
