//! Agent commands

use colored::Colorize;
use std::sync::Arc;

use crate::cli::{AgentCommands, CliError};
use crate::services::{AgentInput, AgentService};
use crate::storage::SeaOrmStorage;

pub async fn run(storage: Arc<SeaOrmStorage>, action: AgentCommands) -> Result<(), CliError> {
    let service = AgentService::new(storage);

    match action {
        AgentCommands::Add {
            display_name,
            email,
            referral_code,
            phone,
        } => {
            let input = AgentInput {
                display_name,
                email,
                referral_code,
                phone_number: phone,
            };
            let agent = service.create_agent(input).await?;
            println!(
                "{} Added agent #{}: {} (code: {})",
                "✓".bold().green(),
                agent.id.to_string().magenta(),
                agent.display_name.cyan(),
                agent.referral_code.yellow()
            );
            Ok(())
        }
        AgentCommands::List => {
            let rows = service.list_agents().await?;
            if rows.is_empty() {
                println!("{} No agents found", "ℹ".bold().blue());
                return Ok(());
            }

            println!("{}", "Agent list:".bold().green());
            println!();
            for row in &rows {
                println!(
                    "  {} {} {} {} {}",
                    format!("#{}", row.id).magenta(),
                    row.display_name.cyan(),
                    format!("[{}]", row.affiliate).yellow(),
                    row.contact.phone.white(),
                    row.contact.email.dimmed()
                );
            }
            println!();
            println!(
                "{} Total {} agents",
                "ℹ".bold().blue(),
                rows.len().to_string().green()
            );
            Ok(())
        }
        AgentCommands::Remove { id } => {
            service.delete_agent(id).await?;
            println!("{} Removed agent #{}", "✓".bold().green(), id.to_string().magenta());
            Ok(())
        }
    }
}
