//! Typed notifications fired when a highlighted span is activated
//!
//! Subscribers receive these over a channel instead of listening for
//! string-named property changes.

use serde::{Deserialize, Serialize};

use crate::position::Position;

/// Kind of object an object-reference pattern points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    Image,
    Dataset,
    Project,
    Protocol,
    File,
    /// `[[target]]` wiki link
    Link,
    /// Anything a custom pattern wants to report
    Other,
}

impl ObjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Image => "image",
            ObjectKind::Dataset => "dataset",
            ObjectKind::Project => "project",
            ObjectKind::Protocol => "protocol",
            ObjectKind::File => "file",
            ObjectKind::Link => "link",
            ObjectKind::Other => "other",
        }
    }
}

/// The object referenced by a clicked span
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectDescriptor {
    pub kind: ObjectKind,
    /// Numeric id (last run of digits in the matched text), if any
    pub id: Option<i64>,
    /// Link target for `[[target|label]]`, otherwise None
    pub target: Option<String>,
    /// Full matched text
    pub text: String,
    /// Where the match sits in the buffer
    pub position: Position,
}

impl ObjectDescriptor {
    pub fn from_match(kind: ObjectKind, text: &str, position: Position) -> Self {
        let target = match kind {
            ObjectKind::Link => link_target(text),
            _ => None,
        };
        Self {
            kind,
            id: trailing_id(text),
            target,
            text: text.to_string(),
            position,
        }
    }
}

/// Notification fired on a successful match-click
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SelectionEvent {
    /// Object reference double-clicked
    FullySelected(ObjectDescriptor),
    /// Object reference single-clicked while one-click mode is enabled
    ProvisionallySelected(ObjectDescriptor),
    /// URL clicked; the launcher has been asked to open it
    UrlActivated { url: String, position: Position },
}

/// Last run of ASCII digits in `text`, parsed as an id
fn trailing_id(text: &str) -> Option<i64> {
    let end = text.rfind(|c: char| c.is_ascii_digit())? + 1;
    let start = text[..end]
        .rfind(|c: char| !c.is_ascii_digit())
        .map(|i| i + 1)
        .unwrap_or(0);
    text[start..end].parse().ok()
}

/// `[[target|label]]` → `target`
fn link_target(text: &str) -> Option<String> {
    let inner = text.strip_prefix("[[")?.strip_suffix("]]")?;
    let target = inner.split('|').next()?.trim();
    if target.is_empty() {
        None
    } else {
        Some(target.to_string())
    }
}
