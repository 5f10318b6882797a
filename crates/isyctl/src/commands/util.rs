//! Shared helpers for command handlers.

use std::borrow::Cow;
use std::io::IsTerminal;

use isyctl_core::{Controller, Entity};

use crate::error::CliError;

/// Undo percent-encoding in a name typed or relayed from a URL
/// (`hall%20light` -> `hall light`). Invalid sequences pass through.
pub fn decode_name(raw: &str) -> Cow<'_, str> {
    urlencoding::decode(raw).unwrap_or(Cow::Borrowed(raw))
}

/// Resolve a command-line name to an entity handle.
pub fn resolve(controller: &Controller, raw: &str) -> Result<Entity, CliError> {
    let name = decode_name(raw);
    Ok(controller.resolve(&name)?)
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: message.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}
