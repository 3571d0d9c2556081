//! Runtime tests: real timers, background tokenize, pattern installation

mod common;

use std::time::Duration;

use common::RecordingLauncher;
use wikitext::messages::{BufferMsg, ConfigMsg, Msg, PointerMsg};
use wikitext::registry::RegistryError;
use wikitext::runtime::Runtime;
use wikitext::{ObjectKind, PatternSpec, SelectionAction, SelectionEvent, WikiConfig, WikiModel};

const TIMEOUT: Duration = Duration::from_secs(5);

fn runtime(text: &str, config: WikiConfig) -> (Runtime, RecordingLauncher) {
    let launcher = RecordingLauncher::default();
    let model = WikiModel::with_wiki_defaults(text, config).unwrap();
    (
        Runtime::with_launcher(model, Box::new(launcher.clone())),
        launcher,
    )
}

fn fast_clicks() -> WikiConfig {
    WikiConfig {
        click_debounce_ms: 20,
        ..Default::default()
    }
}

fn press(offset: usize) -> Msg {
    Msg::Pointer(PointerMsg::Press {
        offset,
        click_count: None,
    })
}

// ========================================================================
// Clicks
// ========================================================================

#[test]
fn test_single_click_opens_url_after_debounce() {
    let (mut rt, launcher) = runtime("see http://example.com now", fast_clicks());
    let events = rt.subscribe();

    rt.send(press(10));
    assert_eq!(rt.pending(), 1);
    assert!(launcher.urls().is_empty());

    rt.pump_until_idle(TIMEOUT).unwrap();
    assert_eq!(rt.pending(), 0);
    assert_eq!(launcher.urls(), vec!["http://example.com".to_string()]);

    let received: Vec<_> = events.try_iter().collect();
    assert!(matches!(
        received.as_slice(),
        [SelectionEvent::UrlActivated { url, .. }] if url == "http://example.com"
    ));
}

#[test]
fn test_unbounded_wait_still_returns() {
    let (mut rt, launcher) = runtime("see http://example.com now", fast_clicks());

    rt.send(press(10));
    rt.pump_until_idle(Duration::MAX).unwrap();

    assert_eq!(rt.pending(), 0);
    assert_eq!(launcher.urls(), vec!["http://example.com".to_string()]);
}

#[test]
fn test_double_click_dispatches_once() {
    let (mut rt, launcher) = runtime("see Dataset: 9 now", fast_clicks());
    let events = rt.subscribe();

    rt.send(press(6));
    rt.send(press(6));
    assert_eq!(rt.pending(), 2);

    rt.pump_until_idle(TIMEOUT).unwrap();

    let received: Vec<_> = events.try_iter().collect();
    match received.as_slice() {
        [SelectionEvent::FullySelected(d)] => {
            assert_eq!(d.kind, ObjectKind::Dataset);
            assert_eq!(d.id, Some(9));
        }
        other => panic!("expected one FullySelected, got {:?}", other),
    }
    assert!(launcher.urls().is_empty());
}

#[test]
fn test_every_subscriber_is_notified() {
    let (mut rt, _) = runtime("Image: 3", fast_clicks());
    let a = rt.subscribe();
    let b = rt.subscribe();
    drop(rt.subscribe());

    rt.send(press(1));
    rt.send(press(1));
    rt.pump_until_idle(TIMEOUT).unwrap();

    assert_eq!(a.try_iter().count(), 1);
    assert_eq!(b.try_iter().count(), 1);
}

#[test]
fn test_config_message_enables_one_click() {
    let (mut rt, _) = runtime("Image: 3", fast_clicks());
    let events = rt.subscribe();

    rt.send(Msg::Config(ConfigMsg::SetAllowOneClick(true)));
    rt.send(press(1));
    rt.pump_until_idle(TIMEOUT).unwrap();

    assert!(matches!(
        events.try_iter().collect::<Vec<_>>().as_slice(),
        [SelectionEvent::ProvisionallySelected(_)]
    ));
}

// ========================================================================
// Background tokenize
// ========================================================================

fn background() -> WikiConfig {
    WikiConfig {
        background_tokenize: true,
        ..Default::default()
    }
}

#[test]
fn test_inline_edit_tokenizes_immediately() {
    let (mut rt, _) = runtime("", WikiConfig::default());
    let redraw = rt.send(Msg::Buffer(BufferMsg::Insert {
        offset: 0,
        text: "Image: 5".to_string(),
    }));

    assert!(redraw);
    assert_eq!(rt.pending(), 0);
    assert_eq!(rt.model().spans.len(), 1);
}

#[test]
fn test_background_edit_commits_after_worker() {
    let (mut rt, _) = runtime("plain", background());
    rt.send(Msg::Buffer(BufferMsg::SetText("Image: 5".to_string())));

    assert!(rt.model().spans_are_stale());
    assert!(rt.model().spans.is_empty());

    assert!(rt.pump_until_idle(TIMEOUT).unwrap());
    assert!(!rt.model().spans_are_stale());
    assert_eq!(rt.model().spans.len(), 1);
}

#[test]
fn test_newer_edit_supersedes_pending_pass() {
    let (mut rt, _) = runtime("", background());
    for i in 0..5 {
        let offset = rt.model().char_len();
        rt.send(Msg::Buffer(BufferMsg::Insert {
            offset,
            text: format!("image {} ", i),
        }));
    }
    assert_eq!(rt.pending(), 5);

    rt.pump_until_idle(TIMEOUT).unwrap();
    assert!(!rt.model().spans_are_stale());
    assert_eq!(rt.model().spans.len(), 5);
    assert_eq!(rt.model().spans_revision, rt.model().revision());
}

#[test]
fn test_removal_in_background_mode() {
    let (mut rt, _) = runtime("Image: 5 and Image: 6", background());
    assert_eq!(rt.model().spans.len(), 2);

    rt.send(Msg::Buffer(BufferMsg::Remove { offset: 8, len: 13 }));
    rt.pump_until_idle(TIMEOUT).unwrap();

    assert_eq!(rt.model().text(), "Image: 5");
    assert_eq!(rt.model().spans.len(), 1);
}

// ========================================================================
// Pattern installation
// ========================================================================

#[test]
fn test_install_patterns_retokenizes() {
    let (mut rt, _) = runtime("ticket TCK-17 open", WikiConfig::default());
    assert!(rt.model().spans.is_empty());

    let redraw = rt
        .install_patterns(&[PatternSpec::new(
            "ticket",
            r"TCK-\d+",
            "object",
            SelectionAction::SelectObject(ObjectKind::Other),
        )])
        .unwrap();

    assert!(redraw);
    let span = rt.model().spans.iter().next().unwrap();
    assert_eq!(span.text, "TCK-17");
    assert_eq!(rt.model().registry.get(span.pattern).unwrap().name, "ticket");
}

#[test]
fn test_install_invalid_pattern_keeps_registry() {
    let (mut rt, _) = runtime("Image: 1", WikiConfig::default());
    let before = rt.model().registry.len();
    let revision = rt.model().revision();

    let err = rt
        .install_patterns(&[PatternSpec::new(
            "broken",
            "(unclosed",
            "object",
            SelectionAction::None,
        )])
        .unwrap_err();

    assert!(matches!(err, RegistryError::InvalidPattern { ref name, .. } if name == "broken"));
    assert_eq!(rt.model().registry.len(), before);
    assert_eq!(rt.model().revision(), revision);
    assert_eq!(rt.model().spans.len(), 1);
}

#[test]
fn test_install_duplicate_name_rejected() {
    let (mut rt, _) = runtime("", WikiConfig::default());
    let err = rt
        .install_patterns(&[PatternSpec::new("url", "x+", "url", SelectionAction::None)])
        .unwrap_err();
    assert!(matches!(err, RegistryError::DuplicatePattern(ref name) if name == "url"));
}

#[test]
fn test_install_in_background_mode() {
    let (mut rt, _) = runtime("TCK-1", background());
    let redraw = rt
        .install_patterns(&[PatternSpec::new(
            "ticket",
            r"TCK-\d+",
            "object",
            SelectionAction::None,
        )])
        .unwrap();

    assert!(!redraw);
    assert!(rt.model().spans_are_stale());
    rt.pump_until_idle(TIMEOUT).unwrap();
    assert_eq!(rt.model().spans.len(), 1);
}
