use serde::{Deserialize, Serialize};

/// Payload of `/lol-summoner/v1/current-summoner`, extended with display fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Summoner {
    pub account_id: u64,
    pub display_name: String,
    pub game_name: String,
    pub internal_name: String,
    pub name_change_flag: bool,
    pub percent_complete_for_next_level: u32,
    pub privacy: String,
    pub profile_icon_id: u32,
    pub puuid: String,
    pub reroll_points: RerollPoints,
    pub summoner_id: u64,
    pub summoner_level: u32,
    pub tag_line: String,
    pub unnamed: bool,
    pub xp_since_last_level: u64,
    pub xp_until_next_level: u64,
    /// Profile icon as a data URI; filled by the client, not the API.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub icon_img_src: String,
    /// Server display name; filled by the client, not the API.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub region: String,
}

impl Summoner {
    /// `GameName#TAG`, falling back to the legacy display name.
    pub fn riot_id(&self) -> String {
        match (self.game_name.is_empty(), self.tag_line.is_empty()) {
            (false, false) => format!("{}#{}", self.game_name, self.tag_line),
            (false, true) => self.game_name.clone(),
            _ => self.display_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RerollPoints {
    pub current_points: u32,
    pub max_rolls: u32,
    pub number_of_rolls: u32,
    pub points_cost_to_roll: u32,
    pub points_to_reroll: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_partial_payload() {
        let summoner: Summoner = serde_json::from_str(
            r#"{"gameName":"Teemo","tagLine":"0001","profileIconId":29,"puuid":"p-1","extra":true}"#,
        )
        .unwrap();
        assert_eq!(summoner.riot_id(), "Teemo#0001");
        assert_eq!(summoner.profile_icon_id, 29);
        assert!(summoner.region.is_empty());
    }
}
