//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use wikitext::commands::Cmd;
use wikitext::events::SelectionEvent;
use wikitext::messages::{Msg, PointerMsg};
use wikitext::registry::{PatternRegistry, SelectionAction};
use wikitext::runtime::UrlLauncher;
use wikitext::update::update;
use wikitext::{WikiConfig, WikiModel};

/// Model over the stock wiki patterns with default config
pub fn test_model(text: &str) -> WikiModel {
    WikiModel::with_wiki_defaults(text, WikiConfig::default()).unwrap()
}

/// Model over the stock wiki patterns with one-click selection on
pub fn one_click_model(text: &str) -> WikiModel {
    let config = WikiConfig {
        allow_one_click: true,
        ..Default::default()
    };
    WikiModel::with_wiki_defaults(text, config).unwrap()
}

/// Model over a custom registry built from `(name, pattern, action)` triples
pub fn custom_model(text: &str, patterns: &[(&str, &str, SelectionAction)]) -> WikiModel {
    let mut builder = PatternRegistry::builder();
    for (name, pattern, action) in patterns {
        builder.add_pattern(name, pattern, name, *action).unwrap();
    }
    WikiModel::new(text, Arc::new(builder.build()), WikiConfig::default())
}

/// Send a press and return the generation of the timer it started
pub fn press(model: &mut WikiModel, offset: usize) -> u64 {
    match update(
        model,
        Msg::Pointer(PointerMsg::Press {
            offset,
            click_count: None,
        }),
    ) {
        Some(Cmd::StartClickTimer { generation, .. }) => generation,
        other => panic!("expected StartClickTimer, got {:?}", other),
    }
}

/// Fire the timer for `generation` and return the command it produced
pub fn fire(model: &mut WikiModel, generation: u64) -> Option<Cmd> {
    update(model, Msg::Pointer(PointerMsg::TimerFired { generation }))
}

/// Press `count` times at `offset` and fire only the last timer
pub fn click(model: &mut WikiModel, offset: usize, count: u32) -> Option<Cmd> {
    let mut generation = 0;
    for _ in 0..count {
        generation = press(model, offset);
    }
    fire(model, generation)
}

/// Selection events contained in a command
pub fn events(cmd: Option<Cmd>) -> Vec<SelectionEvent> {
    cmd.map(Cmd::into_vec)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|cmd| match cmd {
            Cmd::Notify(event) => Some(event),
            _ => None,
        })
        .collect()
}

/// Launcher that records URLs instead of opening them
#[derive(Clone, Default)]
pub struct RecordingLauncher {
    pub launched: Arc<Mutex<Vec<String>>>,
}

impl RecordingLauncher {
    pub fn urls(&self) -> Vec<String> {
        self.launched.lock().unwrap().clone()
    }
}

impl UrlLauncher for RecordingLauncher {
    fn launch(&self, url: &str) -> anyhow::Result<()> {
        self.launched.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

/// Text in `text` covered by the char range `[start, end)`
pub fn chars(text: &str, start: usize, end: usize) -> String {
    wikitext::util::char_slice(text, start, end).to_string()
}
