//! Configuration system tests
//!
//! Tests for config paths, config persistence and style sheet loading.

mod common;

use common::click;
use tempfile::TempDir;
use wikitext::config_paths::ConfigPaths;
use wikitext::style::{self, StyleError, StyleSheet};
use wikitext::{ObjectKind, SelectionAction, SelectionEvent, WikiConfig, WikiModel};

// ========================================================================
// Config Paths Tests
// ========================================================================

#[test]
fn test_user_dir_is_named_for_the_app() {
    if let Some(paths) = ConfigPaths::user() {
        assert!(paths.root().ends_with("wikitext"));
        assert!(paths.config_file().starts_with(paths.root()));
        assert!(paths.logs_dir().starts_with(paths.root()));
    }
}

#[test]
fn test_ensure_logs_dir_creates_it() {
    let dir = TempDir::new().unwrap();
    let paths = ConfigPaths::at(dir.path().join("wikitext"));
    let logs = paths.ensure_logs_dir().unwrap();
    assert!(logs.is_dir());
    assert_eq!(logs, paths.logs_dir());
}

// ========================================================================
// WikiConfig Tests
// ========================================================================

#[test]
fn test_save_and_load_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.yaml");

    let config = WikiConfig {
        allow_one_click: true,
        click_debounce_ms: 250,
        background_tokenize: true,
        style_sheet: "dark".to_string(),
        patterns: Vec::new(),
    };
    config.save_to(&path).unwrap();

    assert_eq!(WikiConfig::load_from(&path), config);
}

#[test]
fn test_missing_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let config = WikiConfig::load_from(&dir.path().join("absent.yaml"));
    assert_eq!(config, WikiConfig::default());
}

#[test]
fn test_malformed_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "allow_one_click: [not, a, bool\n").unwrap();
    assert_eq!(WikiConfig::load_from(&path), WikiConfig::default());
}

#[test]
fn test_partial_file_fills_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "allow_one_click: true\n").unwrap();

    let config = WikiConfig::load_from(&path);
    assert!(config.allow_one_click);
    assert_eq!(config.click_debounce_ms, 400);
    assert_eq!(config.style_sheet, "default");
}

#[test]
fn test_configured_patterns_are_registered() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(
        &path,
        r#"
patterns:
  - name: ticket
    pattern: 'TICKET-\d+'
    style: object
    action:
      type: select_object
      kind: other
"#,
    )
    .unwrap();

    let config = WikiConfig::load_from(&path);
    assert_eq!(config.patterns.len(), 1);
    assert_eq!(
        config.patterns[0].action,
        SelectionAction::SelectObject(ObjectKind::Other)
    );

    let mut model = WikiModel::with_wiki_defaults("see TICKET-42", config).unwrap();
    let span = model.spans.iter().next().unwrap();
    assert_eq!(model.registry.get(span.pattern).unwrap().name, "ticket");

    match common::events(click(&mut model, 6, 2)).as_slice() {
        [SelectionEvent::FullySelected(d)] => {
            assert_eq!(d.kind, ObjectKind::Other);
            assert_eq!(d.id, Some(42));
        }
        other => panic!("expected FullySelected, got {:?}", other),
    }
}

#[test]
fn test_invalid_configured_pattern_is_an_error() {
    let config = WikiConfig {
        patterns: vec![wikitext::PatternSpec::new(
            "broken",
            "[a-",
            "object",
            SelectionAction::None,
        )],
        ..Default::default()
    };
    assert!(WikiModel::with_wiki_defaults("", config).is_err());
}

// ========================================================================
// Style Sheet Tests
// ========================================================================

#[test]
fn test_builtin_sheets_load() {
    for id in ["default", "dark"] {
        let sheet = StyleSheet::from_builtin(id).unwrap();
        for style in ["url", "object", "wiki_link", "bold", "italic"] {
            assert!(sheet.has_style(style), "{} missing {}", id, style);
        }
    }
}

#[test]
fn test_unknown_builtin_sheet() {
    assert!(matches!(
        StyleSheet::from_builtin("no-such-sheet"),
        Err(StyleError::UnknownSheet(_))
    ));
}

#[test]
fn test_sheet_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.yaml");
    std::fs::write(
        &path,
        r##"
version: 1
name: Custom
plain: {}
styles:
  ticket:
    foreground: "#FF0000"
    bold: true
"##,
    )
    .unwrap();

    let sheet = style::from_file(&path).unwrap();
    assert_eq!(sheet.name, "Custom");
    let ticket = sheet.resolve("ticket");
    assert!(ticket.bold);
    assert_eq!(ticket.foreground.map(|c| (c.r, c.g, c.b)), Some((255, 0, 0)));
    assert_eq!(sheet.resolve("unknown"), sheet.plain);
}

#[test]
fn test_missing_sheet_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(
        style::from_file(&dir.path().join("absent.yaml")),
        Err(StyleError::Io(_))
    ));
}

#[test]
fn test_user_sheet_overrides_builtin() {
    let dir = TempDir::new().unwrap();
    let paths = ConfigPaths::at(dir.path());
    std::fs::create_dir_all(paths.styles_dir()).unwrap();
    std::fs::write(
        paths.style_file("default"),
        "version: 1\nname: Mine\nplain: {}\nstyles: {}\n",
    )
    .unwrap();

    let sheet = style::load_style_sheet_from(Some(&paths), "default").unwrap();
    assert_eq!(sheet.name, "Mine");

    let builtin = style::load_style_sheet_from(Some(&paths), "dark").unwrap();
    assert_eq!(builtin.name, StyleSheet::from_builtin("dark").unwrap().name);
    assert!(style::load_style_sheet_from(None, "dark").is_ok());
}
