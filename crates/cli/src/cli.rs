//! Command-line definitions for lcu-companion.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "lcu-companion")]
#[command(about = "Summoner, rank and match lookups against the local League client", version)]
pub struct Args {
    /// Configuration file (defaults to the user config directory)
    #[arg(long, value_name = "FILE", env = "LCU_COMPANION_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the credentials discovered for the running client
    Credentials,
    /// Show the logged-in summoner
    Summoner {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the ranked summary of a player (defaults to the logged-in summoner)
    Rank {
        /// Player PUUID
        puuid: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show recent matches of a player (defaults to the logged-in summoner)
    Matches {
        /// Player PUUID
        puuid: Option<String>,
        /// Number of matches to list
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },
    /// Look up champion metadata by id
    Champion {
        /// Champion ids
        #[arg(required = true)]
        ids: Vec<u32>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Summoner, ranked summary and recent matches in one go
    Overview {
        /// Number of matches to list
        #[arg(short, long, default_value = "5")]
        limit: usize,
    },
}
