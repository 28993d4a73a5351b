//! Command handlers, one module per top-level subcommand.

pub mod catalog;
pub mod config_cmd;
pub mod info;
pub mod set;
pub mod status;
pub mod util;
pub mod watch;

use ambeo_core::{AdapterConfig, CatalogList};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Route a device command to its handler.
pub async fn dispatch(
    cmd: Command,
    config: AdapterConfig,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Info => info::handle(config, global).await,
        Command::Status => status::handle(config, global).await,
        Command::Set(args) => set::handle(args, config, global).await,
        Command::Sources => catalog::handle(CatalogList::Inputs, config, global).await,
        Command::Presets => catalog::handle(CatalogList::Presets, config, global).await,
        Command::Watch(args) => watch::handle(args, config, global).await,
        // Handled in main before a config is resolved
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
