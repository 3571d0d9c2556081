//! Command-line argument parsing for the demo binary
//!
//! Supports:
//! - Highlighting a file, a literal string, or stdin
//! - ANSI or JSON output
//! - Simulating clicks at an offset

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Highlight wiki markup and simulate clicks on it
#[derive(Parser, Debug)]
#[command(
    name = "wikitext",
    version,
    about = "Highlight wiki markup and simulate clicks on it"
)]
pub struct CliArgs {
    /// File to highlight (reads stdin when neither FILE nor --text is given)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Highlight this text instead of a file
    #[arg(short, long, conflicts_with = "file")]
    pub text: Option<String>,

    /// Simulate presses at this character offset
    #[arg(long, value_name = "OFFSET")]
    pub at: Option<usize>,

    /// Number of presses inside one debounce window (used with --at)
    #[arg(long, value_name = "N", default_value_t = 1)]
    pub clicks: u32,

    /// Fire provisional selections on single click
    #[arg(long)]
    pub one_click: bool,

    /// Print runs as JSON instead of ANSI-styled text
    #[arg(long)]
    pub json: bool,

    /// Style sheet id (overrides config)
    #[arg(long, value_name = "ID")]
    pub style: Option<String>,

    /// Actually open activated URLs in the browser
    #[arg(long)]
    pub launch: bool,
}

/// Where the text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    File(PathBuf),
    Text(String),
    Stdin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Ansi,
    Json,
}

/// Presses to simulate after highlighting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickRequest {
    pub offset: usize,
    pub count: u32,
}

impl ClickRequest {
    /// How long to wait for the presses to settle: one debounce per press
    /// plus slack for the timer thread
    pub fn wait_timeout(&self, debounce_ms: u64) -> Duration {
        let presses = debounce_ms.saturating_mul(u64::from(self.count));
        Duration::from_millis(presses.saturating_add(2000))
    }
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input: InputSource,
    pub output: OutputFormat,
    pub click: Option<ClickRequest>,
    /// None = keep the configured value
    pub one_click: Option<bool>,
    pub style: Option<String>,
    pub launch: bool,
}

impl CliArgs {
    /// Convert parsed CLI args into a run configuration
    pub fn into_config(self) -> Result<RunConfig, String> {
        if self.at.is_none() && self.clicks != 1 {
            return Err("--clicks requires --at".to_string());
        }
        if !(1..=3).contains(&self.clicks) {
            return Err(format!("--clicks must be 1, 2 or 3 (got {})", self.clicks));
        }

        let input = match (self.file, self.text) {
            (Some(path), _) => InputSource::File(path),
            (None, Some(text)) => InputSource::Text(text),
            (None, None) => InputSource::Stdin,
        };

        Ok(RunConfig {
            input,
            output: if self.json {
                OutputFormat::Json
            } else {
                OutputFormat::Ansi
            },
            click: self.at.map(|offset| ClickRequest {
                offset,
                count: self.clicks,
            }),
            one_click: self.one_click.then_some(true),
            style: self.style,
            launch: self.launch,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> CliArgs {
        CliArgs {
            file: None,
            text: None,
            at: None,
            clicks: 1,
            one_click: false,
            json: false,
            style: None,
            launch: false,
        }
    }

    #[test]
    fn test_no_input_reads_stdin() {
        let config = args().into_config().unwrap();
        assert_eq!(config.input, InputSource::Stdin);
        assert_eq!(config.output, OutputFormat::Ansi);
        assert!(config.click.is_none());
        assert_eq!(config.one_click, None);
    }

    #[test]
    fn test_text_input() {
        let config = CliArgs {
            text: Some("hi".into()),
            json: true,
            ..args()
        }
        .into_config()
        .unwrap();
        assert_eq!(config.input, InputSource::Text("hi".into()));
        assert_eq!(config.output, OutputFormat::Json);
    }

    #[test]
    fn test_click_request() {
        let config = CliArgs {
            at: Some(5),
            clicks: 2,
            one_click: true,
            ..args()
        }
        .into_config()
        .unwrap();
        assert_eq!(config.click, Some(ClickRequest { offset: 5, count: 2 }));
        assert_eq!(config.one_click, Some(true));
    }

    #[test]
    fn test_clicks_without_at_rejected() {
        assert!(CliArgs {
            clicks: 2,
            ..args()
        }
        .into_config()
        .is_err());
    }

    #[test]
    fn test_clicks_out_of_range_rejected() {
        assert!(CliArgs {
            at: Some(0),
            clicks: 0,
            ..args()
        }
        .into_config()
        .is_err());
    }

    #[test]
    fn test_click_wait_timeout() {
        let click = ClickRequest { offset: 0, count: 2 };
        assert_eq!(click.wait_timeout(400), Duration::from_millis(2800));
        assert_eq!(
            click.wait_timeout(u64::MAX),
            Duration::from_millis(u64::MAX)
        );
    }

    #[test]
    fn test_parse_from_argv() {
        let parsed = CliArgs::try_parse_from(["wikitext", "--text", "x", "--at", "0"]).unwrap();
        assert_eq!(parsed.at, Some(0));
        assert!(CliArgs::try_parse_from(["wikitext", "f.txt", "--text", "x"]).is_err());
    }
}
