use std::sync::Arc;

use anyhow::{Context, Result};
use clinicore::config::{self, Settings};
use clinicore::core::init_logger;

use clinicweb::cli::{Cli, Commands};
use clinicweb::{start_web_server, WebState};

/// Entry point of the clinic site backend
///
/// Parses CLI arguments and dispatches to the selected subcommand.
///
/// # Errors
/// Returns an error if logging, configuration or the server fail to start.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // .env is optional; real deployments set the environment directly
    let _ = dotenvy::dotenv();

    init_logger()?;

    let settings = Settings::from_env().context("invalid configuration")?;

    match cli.command.unwrap_or(Commands::Serve { port: None }) {
        Commands::Serve { port } => {
            settings.log_summary();
            let port = port.unwrap_or(settings.web_port);
            let state = Arc::new(WebState::from_settings(settings)?);
            start_web_server(port, state).await
        }
        Commands::CheckConfig => {
            print_config_summary(&settings);
            Ok(())
        }
        Commands::Roster { subject } => {
            let roster = match (&settings.doctors, subject) {
                (Some(directory), Some(tag_id)) => directory.roster_for(tag_id),
                (Some(directory), None) => directory.roster(),
                (None, _) => Vec::new(),
            };
            println!("{}", serde_json::to_string_pretty(&roster)?);
            Ok(())
        }
    }
}

fn print_config_summary(settings: &Settings) {
    let present = |set: bool| if set { "set" } else { "missing" };

    match &settings.doctors {
        Some(directory) => println!("{}: {} doctors", config::DOCTORS_DATA_VAR, directory.len()),
        None => println!("{}: missing", config::DOCTORS_DATA_VAR),
    }
    match &settings.intake_url {
        Some(url) => println!("{}: {}", config::INTAKE_URL_VAR, url.host_str().unwrap_or("")),
        None => println!("{}: missing", config::INTAKE_URL_VAR),
    }
    println!("{}: {}", config::BOT_TOKEN_VAR, present(settings.bot_token.is_some()));
    println!("{}: {}", config::DIRECT_RELAY_VAR, settings.direct_relay);
    println!("{}: {}s", config::INTAKE_TIMEOUT_VAR, settings.intake_timeout.as_secs());
    println!("{}: {}", config::WEB_PORT_VAR, settings.web_port);
}
