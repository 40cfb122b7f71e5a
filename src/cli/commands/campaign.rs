//! Campaign commands

use colored::Colorize;
use std::sync::Arc;

use crate::cli::{CampaignCommands, CliError};
use crate::config::StaticConfig;
use crate::services::{CampaignInput, CampaignLinks, CampaignService};
use crate::storage::SeaOrmStorage;

pub async fn run(
    storage: Arc<SeaOrmStorage>,
    config: &StaticConfig,
    action: CampaignCommands,
) -> Result<(), CliError> {
    let service = CampaignService::new(storage, CampaignLinks::from_config(config));

    match action {
        CampaignCommands::Add {
            title,
            phone,
            message,
            slug,
            zapier,
            draft,
        } => {
            let input = CampaignInput {
                title,
                slug,
                admin_phone: phone,
                whatsapp_message: message,
                zapier_link: zapier,
                published: Some(!draft),
            };
            add_campaign(&service, input).await
        }
        CampaignCommands::List => list_campaigns(&service).await,
        CampaignCommands::Remove { id } => remove_campaign(&service, id).await,
        CampaignCommands::Links { id } => show_links(&service, id).await,
    }
}

async fn add_campaign(service: &CampaignService, input: CampaignInput) -> Result<(), CliError> {
    let campaign = service.create_campaign(input).await?;

    println!(
        "{} Added campaign #{}: {} -> {}",
        "✓".bold().green(),
        campaign.id.to_string().magenta(),
        campaign.title.cyan(),
        service.links().campaign_url(&campaign.slug).blue().underline()
    );
    if !campaign.published {
        println!("{} Saved as draft, the page returns 404 until published", "ℹ".bold().blue());
    }
    Ok(())
}

async fn list_campaigns(service: &CampaignService) -> Result<(), CliError> {
    let rows = service.list_campaigns().await?;

    if rows.is_empty() {
        println!("{} No campaigns found", "ℹ".bold().blue());
        return Ok(());
    }

    println!("{}", "Campaign list:".bold().green());
    println!();
    for row in &rows {
        println!(
            "  {} {} {}",
            format!("#{}", row.id).magenta(),
            row.title.cyan(),
            format!("(default number: {})", row.default_number).dimmed()
        );
    }
    println!();
    println!(
        "{} Total {} campaigns",
        "ℹ".bold().blue(),
        rows.len().to_string().green()
    );
    Ok(())
}

async fn remove_campaign(service: &CampaignService, id: i64) -> Result<(), CliError> {
    service.delete_campaign(id).await?;
    println!("{} Removed campaign #{}", "✓".bold().green(), id.to_string().magenta());
    Ok(())
}

async fn show_links(service: &CampaignService, id: i64) -> Result<(), CliError> {
    let campaign = service.get_campaign(id).await?;
    let links = service.referral_links(id).await?;

    println!(
        "{} {}",
        "Referral links for".bold().green(),
        campaign.title.cyan().bold()
    );
    println!();
    if links.is_empty() {
        println!("  {}", "No agents registered yet".dimmed());
    }
    for link in &links {
        println!(
            "  {} {} {}",
            link.display_name.cyan(),
            format!("[{}]", link.referral_code).yellow(),
            link.url.blue().underline()
        );
    }
    Ok(())
}
