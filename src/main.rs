use clap::Parser;
use colored::Colorize;

use walink::cli::{Cli, Commands};
use walink::config::{get_config, init_config};
use walink::runtime::modes;
use walink::system::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_config(cli.config.as_deref());

    match cli.command {
        None | Some(Commands::Serve) => {
            let config = get_config();
            // guard 必须活到进程结束
            let _log_guard = init_logging(&config.logging)?;

            if let Err(e) = modes::run_server().await {
                eprintln!("{} {:#}", "[ERROR]".red().bold(), e);
                return Err(e);
            }
            Ok(())
        }
        Some(cmd) => {
            if let Err(e) = modes::run_cli(cmd).await {
                eprintln!("{}", e.format_colored());
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
