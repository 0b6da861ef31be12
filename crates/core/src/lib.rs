#![warn(clippy::all, missing_docs)]

//! Core of the League client companion.
//!
//! Discovers the credentials of the locally running client, keeps a single
//! authenticated session against its HTTPS API, caches champion metadata and
//! localises ranked data for display. Frontends (the CLI, or a desktop shell)
//! sit on top of [`LocalClient`].

pub mod client;
pub mod config;
pub mod discovery;
pub mod error;
pub mod gateway;
pub mod models;
pub mod rank;
pub mod resource;
pub mod session;

pub use client::LocalClient;
pub use config::AppConfig;
pub use discovery::{Credentials, DiscoverCredentials, ProcessDiscovery, RegionPolicy};
pub use error::{CredentialField, Error, Result};
pub use gateway::HttpGateway;
pub use models::{ChampionInfo, MatchHistory, RankedStats, Summoner};
pub use resource::ResourceCache;
pub use session::{LocalApi, Session};
