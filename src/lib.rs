//! wikitext - regex-driven wiki markup highlighting
//!
//! Turns plain text containing wiki-style markup (URLs, object references,
//! `[[links]]`, bold/italic quotes) into non-overlapping styled spans for a
//! text widget, and turns clicks on those spans into typed notifications.
//!
//! State changes follow the Elm Architecture: the host feeds [`Msg`]s to
//! [`update::update`], which mutates the [`WikiModel`] and returns a [`Cmd`]
//! describing side effects. [`runtime::Runtime`] is a ready-made executor for
//! those commands.

pub mod cli;
pub mod click;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod dispatch;
pub mod events;
pub mod messages;
pub mod model;
pub mod position;
pub mod registry;
pub mod render;
pub mod runtime;
pub mod style;
pub mod tokenizer;
pub mod tracing;
pub mod update;
pub mod util;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::WikiConfig;
pub use events::{ObjectDescriptor, ObjectKind, SelectionEvent};
pub use messages::Msg;
pub use model::WikiModel;
pub use position::Position;
pub use registry::{PatternRegistry, PatternSpec, RegistryError, SelectionAction};
pub use render::{ActionResolver, DrawContext, RunRenderer, StyledRun};
pub use tokenizer::{tokenize, Span, SpanMap};
