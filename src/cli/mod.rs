//! Command-line interface
//!
//! clap 定义 + 各子命令的执行入口。管理类命令直接读写数据库，不经过 HTTP。

pub mod commands;

use clap::{Parser, Subcommand};
use std::fmt;

use crate::config::get_config;
use crate::storage::StorageFactory;
use commands::{agent, campaign, config_gen, entry};

/// walink - WhatsApp campaign referral links
#[derive(Parser)]
#[command(name = "walink")]
#[command(version)]
#[command(about = "WhatsApp campaign referral links with per-agent attribution", long_about = None)]
pub struct Cli {
    /// Configuration file path (default: config.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Manage campaigns
    Campaign {
        #[command(subcommand)]
        action: CampaignCommands,
    },

    /// Manage agents
    Agent {
        #[command(subcommand)]
        action: AgentCommands,
    },

    /// Form entries
    Entry {
        #[command(subcommand)]
        action: EntryCommands,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum CampaignCommands {
    /// Create a campaign
    Add {
        /// Campaign title
        title: String,

        /// Default WhatsApp number (international format, digits only)
        #[arg(long)]
        phone: String,

        /// Pre-filled WhatsApp message
        #[arg(long)]
        message: String,

        /// URL slug (derived from the title when omitted)
        #[arg(long)]
        slug: Option<String>,

        /// Zapier webhook URL (stored only)
        #[arg(long)]
        zapier: Option<String>,

        /// Create as draft
        #[arg(long)]
        draft: bool,
    },

    /// List campaigns
    List,

    /// Remove a campaign
    Remove {
        /// Campaign id
        id: i64,
    },

    /// Show every agent's referral link for a campaign
    Links {
        /// Campaign id
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum AgentCommands {
    /// Create an agent
    Add {
        /// Display name
        display_name: String,

        /// Email address
        #[arg(long)]
        email: String,

        /// Referral code used in `?ref=`
        #[arg(long = "code")]
        referral_code: String,

        /// WhatsApp number (international format, digits only)
        #[arg(long)]
        phone: String,
    },

    /// List agents
    List,

    /// Remove an agent
    Remove {
        /// Agent id
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum EntryCommands {
    /// Export form entries as CSV
    Export {
        /// Output file path (default: stdout)
        file_path: Option<String>,

        /// Only entries of this campaign
        #[arg(long)]
        campaign: Option<i64>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,

        /// Force overwrite existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug)]
pub enum CliError {
    StorageError(String),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::StorageError(msg) => format!("Storage error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::StorageError(msg) => {
                format!("{} {}", "Storage error:".red().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<crate::errors::WalinkError> for CliError {
    fn from(err: crate::errors::WalinkError) -> Self {
        CliError::CommandError(err.format_simple())
    }
}

/// Run a management command (everything except `serve`)
pub async fn run_cli_command(cmd: Commands) -> Result<(), CliError> {
    // 生成配置不需要数据库
    if let Commands::Config {
        action: ConfigCommands::Generate { output_path, force },
    } = cmd
    {
        return config_gen::generate_config(output_path, force);
    }

    let config = get_config();
    let storage = StorageFactory::create(&config.database)
        .await
        .map_err(|e| CliError::StorageError(e.to_string()))?;

    match cmd {
        Commands::Campaign { action } => campaign::run(storage, &config, action).await,
        Commands::Agent { action } => agent::run(storage, action).await,
        Commands::Entry { action } => entry::run(storage, action).await,
        Commands::Serve => Err(CliError::CommandError(
            "serve is handled by server mode".to_string(),
        )),
        Commands::Config { .. } => unreachable!("handled above"),
    }
}
