//! Buffer mutation handlers

use crate::commands::Cmd;
use crate::messages::BufferMsg;
use crate::model::WikiModel;

use super::tokenize::schedule_tokenize;

/// Apply an edit, then re-tokenize the whole buffer
pub fn update_buffer(model: &mut WikiModel, msg: BufferMsg) -> Option<Cmd> {
    match msg {
        BufferMsg::Insert { offset, text } => {
            if text.is_empty() {
                return None;
            }
            let at = model.document.insert(offset, &text);
            tracing::trace!("inserted {} chars at {}", text.chars().count(), at);
        }
        BufferMsg::Remove { offset, len } => {
            let removed = model.document.remove(offset, len);
            tracing::trace!("removed {}", removed);
        }
        BufferMsg::SetText(text) => {
            model.document.set_text(&text);
        }
    }

    schedule_tokenize(model)
}
