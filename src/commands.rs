//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.

use crate::events::SelectionEvent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cmd {
    /// No-op command
    None,
    /// Repaint the widget
    Redraw,
    /// Start the click debounce timer.
    /// After delay_ms, sends Msg::Pointer(TimerFired { generation })
    StartClickTimer { generation: u64, delay_ms: u64 },
    /// Tokenize a snapshot off the event thread.
    /// Sends Msg::Tokenize(Completed) when done
    RunTokenize { revision: u64, source: String },
    /// Open a URL in the default browser
    LaunchUrl { url: String },
    /// Deliver a selection notification to subscribers
    Notify(SelectionEvent),
    /// Multiple commands to execute
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Redraw => true,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
            // Timers and workers report back through messages
            Cmd::StartClickTimer { .. } => false,
            Cmd::RunTokenize { .. } => false,
            Cmd::LaunchUrl { .. } => false,
            Cmd::Notify(_) => false,
        }
    }

    /// Flatten nested batches into a list of leaf commands
    pub fn into_vec(self) -> Vec<Cmd> {
        match self {
            Cmd::None => Vec::new(),
            Cmd::Batch(cmds) => cmds.into_iter().flat_map(Cmd::into_vec).collect(),
            other => vec![other],
        }
    }
}
