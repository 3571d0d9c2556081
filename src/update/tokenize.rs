//! Tokenizer scheduling and result handlers

use crate::commands::Cmd;
use crate::messages::TokenizeMsg;
use crate::model::WikiModel;

/// Bring the spans up to date with the buffer (call after every edit)
///
/// Inline mode tokenizes right here and asks for a repaint. Background mode
/// returns a `Cmd::RunTokenize` for the current revision; the old spans stay
/// on screen until the result arrives.
pub fn schedule_tokenize(model: &mut WikiModel) -> Option<Cmd> {
    if model.config.background_tokenize {
        Some(Cmd::RunTokenize {
            revision: model.document.revision,
            source: model.document.text(),
        })
    } else {
        model.retokenize();
        Some(Cmd::Redraw)
    }
}

/// Handle tokenizer results
pub fn update_tokenize(model: &mut WikiModel, msg: TokenizeMsg) -> Option<Cmd> {
    match msg {
        TokenizeMsg::Completed { revision, spans } => {
            tracing::debug!(
                "update_tokenize: Completed received for rev {} ({} spans)",
                revision,
                spans.len()
            );
            model
                .commit_spans(revision, spans)
                .then_some(Cmd::Redraw)
        }
    }
}
