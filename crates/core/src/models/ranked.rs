use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Payload of `/lol-ranked/v1/ranked-stats/{puuid}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RankedStats {
    pub current_season_split_points: i64,
    pub earned_regalia_reward_ids: Vec<String>,
    #[serde(rename = "highestCurrentSeasonReachedTierSR")]
    pub highest_current_season_reached_tier_sr: String,
    pub highest_previous_season_end_division: String,
    pub highest_previous_season_end_tier: String,
    pub highest_ranked_entry: RankedEntry,
    #[serde(rename = "highestRankedEntrySR")]
    pub highest_ranked_entry_sr: RankedEntry,
    pub previous_season_split_points: i64,
    pub queue_map: BTreeMap<String, RankedEntry>,
    pub queues: Vec<RankedEntry>,
    pub ranked_regalia_level: i64,
    pub seasons: BTreeMap<String, SeasonInfo>,
    pub splits_progress: Value,
}

/// Standing in a single ranked queue.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RankedEntry {
    pub current_season_wins_for_rewards: i64,
    pub division: String,
    pub highest_division: String,
    pub highest_tier: String,
    pub is_provisional: bool,
    pub league_points: i64,
    pub losses: i64,
    pub mini_series_progress: String,
    pub previous_season_end_division: String,
    pub previous_season_end_tier: String,
    pub previous_season_highest_division: String,
    pub previous_season_highest_tier: String,
    pub previous_season_wins_for_rewards: i64,
    pub provisional_game_threshold: i64,
    pub provisional_games_remaining: i64,
    pub queue_type: String,
    pub rated_rating: i64,
    pub rated_tier: String,
    pub tier: String,
    pub warnings: Value,
    pub wins: i64,
    /// Display label for `queue_type`, attached during localisation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue_label: Option<String>,
}

impl RankedEntry {
    /// Win rate in percent, or `None` when no games were played.
    pub fn win_rate(&self) -> Option<f64> {
        let games = self.wins + self.losses;
        if games > 0 {
            Some(self.wins as f64 / games as f64 * 100.0)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeasonInfo {
    pub current_season_end: i64,
    pub current_season_id: i64,
    pub next_season_start: i64,
}
