//! Form entry commands

use colored::Colorize;
use std::sync::Arc;

use crate::cli::{CliError, EntryCommands};
use crate::storage::{EntryFilter, SeaOrmStorage};
use crate::utils::csv_handler::write_entries_csv;

pub async fn run(storage: Arc<SeaOrmStorage>, action: EntryCommands) -> Result<(), CliError> {
    match action {
        EntryCommands::Export {
            file_path,
            campaign,
        } => {
            let entries = storage
                .list_entries(EntryFilter {
                    campaign_id: campaign,
                    limit: None,
                })
                .await?;

            match file_path {
                Some(path) => {
                    let file = std::fs::File::create(&path).map_err(|e| {
                        CliError::CommandError(format!("Failed to create {}: {}", path, e))
                    })?;
                    write_entries_csv(file, &entries)?;
                    println!(
                        "{} Exported {} entries to {}",
                        "✓".bold().green(),
                        entries.len().to_string().green(),
                        path.blue()
                    );
                }
                None => {
                    write_entries_csv(std::io::stdout().lock(), &entries)?;
                }
            }
            Ok(())
        }
    }
}
