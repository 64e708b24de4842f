mod list;
mod roles;
mod set;
mod watch;

use tracing::debug;

use super::{Commands, CommandResult};
use crate::services::MixerService;

/// Run a subcommand against a connected service.
///
/// Waits for enumeration before reading rows; `watch` subscribes first so
/// it also sees the rows being listed. `roles` ignores the service and may be
/// given `None`.
///
/// # Errors
/// Returns the command's error, or [`super::CliError::Mixer`] with
/// [`crate::services::MixerError::SessionClosed`] if a server command has no
/// service.
pub async fn execute(service: Option<&MixerService>, command: Commands) -> CommandResult {
    let Some(service) = service else {
        return match command {
            Commands::Roles => Ok(roles::execute()),
            _ => Err(crate::services::MixerError::SessionClosed.into()),
        };
    };

    match command {
        Commands::Watch => return watch::execute(service).await,
        Commands::Roles => return Ok(roles::execute()),
        _ => {}
    }
    service.wait_for_enumeration().await?;
    debug!(rows = service.model().row_count(), "Devices enumerated");

    match command {
        Commands::List { json } => list::execute(service, json),
        Commands::Set { row, level } => set::by_row(service, row, &level).await,
        Commands::SetDevice {
            class,
            index,
            channel,
            level,
        } => set::by_device(service, class.into(), index, channel, &level).await,
        Commands::Watch => watch::execute(service).await,
        Commands::Roles => Ok(roles::execute()),
    }
}
