mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use std::fs::{self, OpenOptions};

use cli::{Args, Command};
use lcu_companion_core::{
    config::{self, AppConfig},
    HttpGateway,
};
use tracing_subscriber::{prelude::*, EnvFilter};

fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = match args.config {
        Some(path) => path,
        None => config::ensure_default_config()?,
    };
    let config = AppConfig::load_from(&config_path)?;

    init_logging(config.log_to_file)?;
    tracing::debug!("loaded configuration from {}", config_path.display());

    HttpGateway::install(config.request_timeout())?;

    match args.command {
        Command::Credentials => commands::credentials(&config),
        Command::Summoner { json } => commands::summoner(&config, json),
        Command::Rank { puuid, json } => commands::rank(&config, puuid, json),
        Command::Matches { puuid, limit } => commands::matches(&config, puuid, limit),
        Command::Champion { ids, json } => commands::champion(&config, &ids, json),
        Command::Overview { limit } => commands::overview(&config, limit),
    }
}

fn init_logging(log_to_file: bool) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .compact()
        .with_writer(std::io::stderr);

    let file_layer = if log_to_file {
        let log_dir = std::env::current_dir()?.join("logs");
        fs::create_dir_all(&log_dir)?;
        let log_file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_dir.join("lcu-companion.log"))?;

        Some(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .compact()
                .with_writer(std::sync::Mutex::new(log_file)),
        )
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(())
}
