//! Configuration change handlers

use crate::commands::Cmd;
use crate::messages::ConfigMsg;
use crate::model::WikiModel;
use crate::registry::{PatternSpec, RegistryError};

use super::tokenize::schedule_tokenize;

/// Handle config messages
pub fn update_config(model: &mut WikiModel, msg: ConfigMsg) -> Option<Cmd> {
    match msg {
        ConfigMsg::SetAllowOneClick(enabled) => {
            model.config.allow_one_click = enabled;
            None
        }
        ConfigMsg::SetClickDebounce(delay_ms) => {
            model.config.click_debounce_ms = delay_ms;
            None
        }
        ConfigMsg::SetBackgroundTokenize(enabled) => {
            model.config.background_tokenize = enabled;
            None
        }
    }
}

/// Add patterns after construction and re-tokenize.
///
/// Invalid patterns are reported to the caller and leave the registry as it was.
pub fn install_patterns(
    model: &mut WikiModel,
    extra: &[PatternSpec],
) -> Result<Option<Cmd>, RegistryError> {
    model.install_patterns(extra)?;
    Ok(schedule_tokenize(model))
}
