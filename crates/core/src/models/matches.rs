use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Payload of `/lol-match-history/v1/products/lol/{puuid}/matches`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchHistory {
    pub account_id: u64,
    pub games: MatchHistoryGames,
    pub platform_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchHistoryGames {
    pub game_begin_date: String,
    pub game_count: u32,
    pub game_end_date: String,
    pub game_index_begin: u32,
    pub game_index_end: u32,
    pub games: Vec<Game>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Game {
    pub end_of_game_result: String,
    /// Seconds.
    pub game_duration: u64,
    pub queue_id: u32,
    pub game_mode: String,
    pub participants: Vec<Participant>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Participant {
    pub champion_id: u32,
    pub stats: ParticipantStats,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticipantStats {
    pub win: bool,
    pub kills: u32,
    pub deaths: u32,
    pub assists: u32,
}

impl MatchHistory {
    /// Distinct champion ids across every participant, in ascending order.
    pub fn champion_ids(&self) -> Vec<u32> {
        self.games
            .games
            .iter()
            .flat_map(|game| game.participants.iter())
            .map(|participant| participant.champion_id)
            .filter(|id| *id > 0)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
