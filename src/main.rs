//! wikitext demo binary
//!
//! Highlights wiki markup in the terminal and replays clicks through the
//! same update loop a GUI host would drive.

use std::io::Read;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use wikitext::cli::{CliArgs, ClickRequest, InputSource, OutputFormat};
use wikitext::messages::{Msg, PointerMsg};
use wikitext::render::PaintedRun;
use wikitext::runtime::{Runtime, SystemLauncher, UrlLauncher};
use wikitext::style::{load_style_sheet, StyleSheet, TextStyle};
use wikitext::{DrawContext, Position, WikiConfig, WikiModel};

/// Reports URLs instead of opening them
struct DryRunLauncher;

impl UrlLauncher for DryRunLauncher {
    fn launch(&self, url: &str) -> Result<()> {
        eprintln!("would open {}", url);
        Ok(())
    }
}

#[derive(Serialize)]
struct JsonRun<'a> {
    #[serde(flatten)]
    run: &'a PaintedRun,
    text: String,
}

fn main() -> Result<()> {
    wikitext::tracing::init();

    let run = CliArgs::parse()
        .into_config()
        .map_err(anyhow::Error::msg)?;

    let mut config = WikiConfig::load();
    if let Some(one_click) = run.one_click {
        config.allow_one_click = one_click;
    }

    let text = read_input(&run.input)?;

    let sheet_id = run.style.clone().unwrap_or_else(|| config.style_sheet.clone());
    let sheet = load_style_sheet(&sheet_id).unwrap_or_else(|e| {
        tracing::warn!("Falling back to default style sheet: {}", e);
        StyleSheet::default_sheet()
    });

    let model = WikiModel::with_wiki_defaults(&text, config)
        .context("Invalid pattern in configuration")?
        .with_style_sheet(sheet);

    let painted = model.paint(Position::new(0, model.char_len()), DrawContext::Unselected);
    match run.output {
        OutputFormat::Ansi => println!("{}", to_ansi(&model, &painted)),
        OutputFormat::Json => {
            let runs: Vec<_> = painted
                .iter()
                .map(|run| JsonRun {
                    run,
                    text: model.text_at(run.position),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&runs)?);
        }
    }

    if let Some(click) = run.click {
        let launcher: Box<dyn UrlLauncher> = if run.launch {
            Box::new(SystemLauncher)
        } else {
            Box::new(DryRunLauncher)
        };
        simulate_click(model, launcher, click)?;
    }

    Ok(())
}

fn read_input(input: &InputSource) -> Result<String> {
    match input {
        InputSource::File(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        InputSource::Text(text) => Ok(text.clone()),
        InputSource::Stdin => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

/// Press `count` times at the offset, wait for the debounce timer, print events
fn simulate_click(
    model: WikiModel,
    launcher: Box<dyn UrlLauncher>,
    click: ClickRequest,
) -> Result<()> {
    let delay_ms = model.config.click_debounce_ms;
    let mut runtime = Runtime::with_launcher(model, launcher);
    let events = runtime.subscribe();

    for _ in 0..click.count {
        runtime.send(Msg::Pointer(PointerMsg::Press {
            offset: click.offset,
            click_count: None,
        }));
    }
    runtime.pump_until_idle(click.wait_timeout(delay_ms))?;

    let mut fired = false;
    for event in events.try_iter() {
        fired = true;
        println!("{}", serde_json::to_string(&event)?);
    }
    if !fired {
        println!("no action at offset {}", click.offset);
    }
    Ok(())
}

fn to_ansi(model: &WikiModel, runs: &[PaintedRun]) -> String {
    let mut out = String::new();
    for run in runs {
        let text = model.text_at(run.position);
        match sgr_codes(&run.style) {
            Some(codes) => {
                out.push_str(&format!("\x1b[{}m{}\x1b[0m", codes, text));
            }
            None => out.push_str(&text),
        }
    }
    out
}

fn sgr_codes(style: &TextStyle) -> Option<String> {
    let mut codes = Vec::new();
    if style.bold {
        codes.push("1".to_string());
    }
    if style.italic {
        codes.push("3".to_string());
    }
    if style.underline {
        codes.push("4".to_string());
    }
    if let Some(fg) = style.foreground {
        codes.push(format!("38;2;{};{};{}", fg.r, fg.g, fg.b));
    }
    if let Some(bg) = style.background {
        codes.push(format!("48;2;{};{};{}", bg.r, bg.g, bg.b));
    }
    (!codes.is_empty()).then(|| codes.join(";"))
}
