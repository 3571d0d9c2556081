//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod buffer;
mod config;
mod pointer;
mod tokenize;

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::WikiModel;

#[cfg(debug_assertions)]
use crate::tracing::SpanSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use buffer::update_buffer;
pub use config::{install_patterns, update_config};
pub use pointer::update_pointer;
pub use tokenize::{schedule_tokenize, update_tokenize};

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut WikiModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

/// Inner update logic (no tracing)
fn update_inner(model: &mut WikiModel, msg: Msg) -> Option<Cmd> {
    match msg {
        Msg::Buffer(m) => buffer::update_buffer(model, m),
        Msg::Pointer(m) => pointer::update_pointer(model, m),
        Msg::Tokenize(m) => tokenize::update_tokenize(model, m),
        Msg::Config(m) => config::update_config(model, m),
    }
}

/// Traced update wrapper (debug builds only)
///
/// Captures the span set before and after and logs the diff.
#[cfg(debug_assertions)]
fn update_traced(model: &mut WikiModel, msg: Msg) -> Option<Cmd> {
    let msg_name = msg_type_name(&msg);
    let _span = span!(Level::DEBUG, "update", msg = %msg_name).entered();

    let before = SpanSnapshot::from_model(model);
    debug!(target: "message", msg = %msg_name, "processing");

    let result = update_inner(model, msg);

    if let Some(diff) = before.diff(&SpanSnapshot::from_model(model)) {
        debug!(target: "spans", %diff, "spans changed");
    }

    result
}

/// Get a display name for a message type
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    use crate::messages::TokenizeMsg;

    match msg {
        Msg::Buffer(m) => format!("Buffer::{:?}", m),
        Msg::Pointer(m) => format!("Pointer::{:?}", m),
        // Span maps are too noisy to print whole
        Msg::Tokenize(TokenizeMsg::Completed { revision, spans }) => {
            format!("Tokenize::Completed(rev {}, {} spans)", revision, spans.len())
        }
        Msg::Config(m) => format!("Config::{:?}", m),
    }
}
