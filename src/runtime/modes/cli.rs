//! CLI mode
//!
//! Delegates management commands to the CLI implementation.

use crate::cli::{CliError, Commands, run_cli_command};

/// Run CLI mode
pub async fn run_cli(cmd: Commands) -> Result<(), CliError> {
    run_cli_command(cmd).await
}
