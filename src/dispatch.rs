//! Selection dispatch
//!
//! Maps a click on a span to a notification:
//!
//! | Action         | count 1                                  | count 2         |
//! |----------------|------------------------------------------|-----------------|
//! | `LaunchUrl`    | `UrlActivated`                           | nothing         |
//! | `SelectObject` | `ProvisionallySelected` if one-click on  | `FullySelected` |
//! | `None`         | nothing                                  | nothing         |

use serde::Serialize;

use crate::events::{ObjectDescriptor, SelectionEvent};
use crate::position::Position;
use crate::registry::{PatternId, PatternRegistry, SelectionAction};
use crate::tokenizer::SpanMap;

/// The span under an offset together with its registered action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedAction {
    pub pattern: PatternId,
    pub action: SelectionAction,
    pub position: Position,
    /// Matched text the action is bound to
    pub text: String,
}

/// Find the span containing `offset` and look up its action.
///
/// Offsets outside every span (or outside the document) resolve to None.
pub fn resolve_action(
    spans: &SpanMap,
    registry: &PatternRegistry,
    offset: usize,
) -> Option<ResolvedAction> {
    let span = spans.span_at(offset)?;
    let entry = registry.get(span.pattern)?;
    Some(ResolvedAction {
        pattern: span.pattern,
        action: entry.action,
        position: span.position,
        text: span.text.clone(),
    })
}

/// Decide which notification, if any, a click with `count` presses fires
pub fn dispatch_click(
    resolved: &ResolvedAction,
    count: u32,
    allow_one_click: bool,
) -> Option<SelectionEvent> {
    match resolved.action {
        SelectionAction::None => None,
        SelectionAction::LaunchUrl => (count == 1).then(|| SelectionEvent::UrlActivated {
            url: resolved.text.clone(),
            position: resolved.position,
        }),
        SelectionAction::SelectObject(kind) => {
            let descriptor = || ObjectDescriptor::from_match(kind, &resolved.text, resolved.position);
            match count {
                2 => Some(SelectionEvent::FullySelected(descriptor())),
                1 if allow_one_click => Some(SelectionEvent::ProvisionallySelected(descriptor())),
                _ => None,
            }
        }
    }
}
