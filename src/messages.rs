//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use crate::tokenizer::SpanMap;

/// Buffer mutations reported by the host widget (character offsets)
#[derive(Debug, Clone)]
pub enum BufferMsg {
    /// Insert text at offset
    Insert { offset: usize, text: String },
    /// Remove `len` characters starting at offset
    Remove { offset: usize, len: usize },
    /// Replace the whole buffer
    SetText(String),
}

/// Pointer input, already mapped from screen to text offset by the host
#[derive(Debug, Clone)]
pub enum PointerMsg {
    /// Button pressed over `offset`. `click_count` is the host's own count,
    /// if it tracks one.
    Press {
        offset: usize,
        click_count: Option<u32>,
    },
    /// Debounce timer started by a press has expired
    TimerFired { generation: u64 },
}

/// Tokenizer results arriving from a background pass
#[derive(Debug, Clone)]
pub enum TokenizeMsg {
    /// Pass over the buffer at `revision` finished
    Completed { revision: u64, spans: SpanMap },
}

/// Runtime configuration changes
#[derive(Debug, Clone)]
pub enum ConfigMsg {
    /// Toggle one-click object selection
    SetAllowOneClick(bool),
    /// Change the debounce window
    SetClickDebounce(u64),
    /// Switch between inline and background tokenizing
    SetBackgroundTokenize(bool),
}

/// Top-level message
#[derive(Debug, Clone)]
pub enum Msg {
    Buffer(BufferMsg),
    Pointer(PointerMsg),
    Tokenize(TokenizeMsg),
    Config(ConfigMsg),
}
