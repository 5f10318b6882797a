//! Command dispatch: bridges CLI args -> core entity operations -> output.

pub mod config_cmd;
pub mod control;
pub mod devices;
pub mod util;

use isyctl_core::Controller;

use crate::cli::{Command, GlobalOpts};
use crate::config::Session;
use crate::error::CliError;

/// Dispatch a controller-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    controller: &Controller,
    session: &Session,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::On(args) => control::on(controller, args, global).await,
        Command::Off(args) => control::off(controller, args, global).await,
        Command::Status(args) => control::status(controller, &args.name, global).await,
        Command::Level(args) => control::level(controller, args, global).await,
        Command::Brighten(args) => control::brighten(controller, &args.name, global).await,
        Command::Dim(args) => control::dim(controller, &args.name, global).await,
        Command::Devices(args) => devices::handle(controller, args, session, global).await,
        Command::Config(_) | Command::Completions(_) => Err(CliError::Internal(
            "config and completions run without a controller".into(),
        )),
    }
}
