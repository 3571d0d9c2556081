//! Pointer press and click-timer handlers

use crate::commands::Cmd;
use crate::dispatch::dispatch_click;
use crate::events::SelectionEvent;
use crate::messages::PointerMsg;
use crate::model::WikiModel;
use crate::render::ActionResolver;

/// Handle pointer messages
///
/// A press never dispatches directly: it (re)starts the debounce timer. The
/// click count is read when the current timer fires.
pub fn update_pointer(model: &mut WikiModel, msg: PointerMsg) -> Option<Cmd> {
    match msg {
        PointerMsg::Press {
            offset,
            click_count,
        } => {
            let generation = model.clicks.press(offset, click_count);
            Some(Cmd::StartClickTimer {
                generation,
                delay_ms: model.config.click_debounce_ms,
            })
        }

        PointerMsg::TimerFired { generation } => {
            let click = model.clicks.timer_fired(generation)?;
            let Some(resolved) = model.resolve_action(click.offset) else {
                tracing::trace!("click at {} hit no span", click.offset);
                return None;
            };

            let event = dispatch_click(&resolved, click.count, model.config.allow_one_click)?;
            tracing::debug!(
                "Dispatching {:?} for '{}' (count {})",
                resolved.action,
                resolved.text,
                click.count
            );

            match event {
                SelectionEvent::UrlActivated { ref url, .. } => Some(Cmd::batch(vec![
                    Cmd::LaunchUrl { url: url.clone() },
                    Cmd::Notify(event.clone()),
                ])),
                _ => Some(Cmd::Notify(event)),
            }
        }
    }
}
