#![allow(missing_docs)]

//! Shared domain models mirroring the local client API payloads.

mod matches;
mod ranked;
mod summoner;

pub use matches::{Game, MatchHistory, MatchHistoryGames, Participant, ParticipantStats};
pub use ranked::{RankedEntry, RankedStats, SeasonInfo};
pub use summoner::{RerollPoints, Summoner};

use serde::{Deserialize, Serialize};

/// Champion metadata held by the resource cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChampionInfo {
    /// Numeric champion id.
    #[serde(default)]
    pub id: u32,
    /// Localised champion name.
    pub name: String,
    /// Absolute URL of the square portrait once fetched.
    pub square_portrait_path: String,
    /// Portrait inlined as a `data:` URI, when the download succeeded.
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "iconDataURI")]
    pub icon_data_uri: Option<String>,
}

impl ChampionInfo {
    /// Image source for a frontend: the inlined icon if present, else the URL.
    pub fn image_src(&self) -> &str {
        self.icon_data_uri
            .as_deref()
            .unwrap_or(&self.square_portrait_path)
    }
}
