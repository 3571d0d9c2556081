//! Host-side driver for the update loop
//!
//! Executes the commands returned by `update`. Anything asynchronous (the
//! click debounce timer, background tokenize passes) runs on a helper thread
//! that posts a message back to the channel; `pump` drains that channel on
//! the thread that owns the runtime, so every update still runs there.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use crate::commands::Cmd;
use crate::events::SelectionEvent;
use crate::messages::{Msg, PointerMsg, TokenizeMsg};
use crate::model::WikiModel;
use crate::registry::{PatternSpec, RegistryError};
use crate::tokenizer::tokenize;
use crate::update::{install_patterns, update};

/// Opens URLs activated by a click
pub trait UrlLauncher: Send {
    fn launch(&self, url: &str) -> Result<()>;
}

/// Opens URLs in the system's default browser
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

impl UrlLauncher for SystemLauncher {
    fn launch(&self, url: &str) -> Result<()> {
        let target = if url.contains("://") {
            url.to_string()
        } else {
            format!("http://{}", url)
        };
        open::that(&target).with_context(|| format!("Failed to open {}", target))
    }
}

/// Owns the model and the message channel
pub struct Runtime {
    model: WikiModel,
    msg_tx: Sender<Msg>,
    msg_rx: Receiver<Msg>,
    subscribers: Vec<Sender<SelectionEvent>>,
    launcher: Box<dyn UrlLauncher>,
    /// Timers and workers that have not reported back yet
    pending: usize,
}

impl Runtime {
    pub fn new(model: WikiModel) -> Self {
        Self::with_launcher(model, Box::new(SystemLauncher))
    }

    pub fn with_launcher(model: WikiModel, launcher: Box<dyn UrlLauncher>) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        Self {
            model,
            msg_tx,
            msg_rx,
            subscribers: Vec::new(),
            launcher,
            pending: 0,
        }
    }

    pub fn model(&self) -> &WikiModel {
        &self.model
    }

    /// Sender for messages produced on other threads
    pub fn sender(&self) -> Sender<Msg> {
        self.msg_tx.clone()
    }

    /// Register for selection notifications
    pub fn subscribe(&mut self) -> Receiver<SelectionEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    /// Timers or workers still outstanding
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Run one message through `update` and execute the resulting command.
    /// Returns whether the host should repaint.
    pub fn send(&mut self, msg: Msg) -> bool {
        match update(&mut self.model, msg) {
            Some(cmd) => {
                let redraw = cmd.needs_redraw();
                self.process_cmd(cmd);
                redraw
            }
            None => false,
        }
    }

    /// Add patterns to the registry and schedule a new pass
    pub fn install_patterns(&mut self, extra: &[PatternSpec]) -> Result<bool, RegistryError> {
        let cmd = install_patterns(&mut self.model, extra)?;
        Ok(cmd.map(|cmd| {
            let redraw = cmd.needs_redraw();
            self.process_cmd(cmd);
            redraw
        })
        .unwrap_or(false))
    }

    fn process_cmd(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::None => {}
            Cmd::Redraw => {}
            Cmd::StartClickTimer {
                generation,
                delay_ms,
            } => {
                let tx = self.msg_tx.clone();
                self.pending += 1;
                std::thread::spawn(move || {
                    std::thread::sleep(Duration::from_millis(delay_ms));
                    let _ = tx.send(Msg::Pointer(PointerMsg::TimerFired { generation }));
                });
            }
            Cmd::RunTokenize { revision, source } => {
                let tx = self.msg_tx.clone();
                let registry = Arc::clone(&self.model.registry);
                self.pending += 1;
                std::thread::spawn(move || {
                    let spans = tokenize(&source, &registry);
                    let _ = tx.send(Msg::Tokenize(TokenizeMsg::Completed { revision, spans }));
                });
            }
            Cmd::LaunchUrl { url } => {
                if let Err(e) = self.launcher.launch(&url) {
                    tracing::warn!("URL launch failed: {:#}", e);
                }
            }
            Cmd::Notify(event) => {
                self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
            }
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd);
                }
            }
        }
    }

    fn handle_async(&mut self, msg: Msg) -> bool {
        if matches!(
            msg,
            Msg::Pointer(PointerMsg::TimerFired { .. }) | Msg::Tokenize(_)
        ) {
            self.pending = self.pending.saturating_sub(1);
        }
        self.send(msg)
    }

    /// Process every message already queued. Returns whether any of them
    /// asked for a repaint.
    pub fn pump(&mut self) -> bool {
        let mut needs_redraw = false;
        while let Ok(msg) = self.msg_rx.try_recv() {
            needs_redraw |= self.handle_async(msg);
        }
        needs_redraw
    }

    /// Block until every outstanding timer and worker has reported back, or
    /// `timeout` elapses.
    pub fn pump_until_idle(&mut self, timeout: Duration) -> Result<bool> {
        // None when the timeout runs past what Instant can represent
        let deadline = Instant::now().checked_add(timeout);
        let mut needs_redraw = false;

        while self.pending > 0 {
            let received = match deadline {
                Some(deadline) => {
                    let remaining = deadline.saturating_duration_since(Instant::now());
                    self.msg_rx.recv_timeout(remaining)
                }
                None => self
                    .msg_rx
                    .recv()
                    .map_err(|_| RecvTimeoutError::Disconnected),
            };
            match received {
                Ok(msg) => needs_redraw |= self.handle_async(msg),
                Err(RecvTimeoutError::Timeout) => {
                    anyhow::bail!("{} task(s) still pending after {:?}", self.pending, timeout)
                }
                // Unreachable while we hold msg_tx
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        Ok(needs_redraw | self.pump())
    }
}
