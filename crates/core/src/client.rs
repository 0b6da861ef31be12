//! Domain lookups against the local client API.

use std::{collections::HashMap, sync::Arc};

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::{
    error::{Error, Result},
    models::{ChampionInfo, MatchHistory, RankedStats, Summoner},
    rank,
    resource::ResourceCache,
    session::{LocalApi, Session},
};

/// The logged-in summoner.
pub const CURRENT_SUMMONER_ENDPOINT: &str = "/lol-summoner/v1/current-summoner";
/// Profile icons, addressed as `{id}.jpg`.
pub const PROFILE_ICON_PATH: &str = "/lol-game-data/assets/v1/profile-icons";
/// Icon shown when a summoner reports no profile icon.
pub const DEFAULT_PROFILE_ICON_ID: u32 = 4804;

/// Summoner, rank, match and champion lookups sharing one champion cache.
pub struct LocalClient<A = Session> {
    api: Arc<A>,
    cache: Arc<ResourceCache>,
    display_region: String,
}

impl LocalClient<Session> {
    /// Client over an explicit session with a fresh cache.
    pub fn new(session: Arc<Session>) -> Self {
        let region = session.display_region().to_string();
        Self::with_api(session, Arc::new(ResourceCache::new()), region)
    }

    /// Client over the process-wide session, if it has been initialised.
    pub fn from_global() -> Option<Self> {
        Session::instance().map(Self::new)
    }
}

impl<A: LocalApi> LocalClient<A> {
    /// Client over any [`LocalApi`] implementation and a shared cache.
    pub fn with_api(
        api: Arc<A>,
        cache: Arc<ResourceCache>,
        display_region: impl Into<String>,
    ) -> Self {
        Self {
            api,
            cache,
            display_region: display_region.into(),
        }
    }

    /// Champion cache used by this client.
    pub fn cache(&self) -> &Arc<ResourceCache> {
        &self.cache
    }

    fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let body = self.api.get(endpoint)?;
        debug!("decoding {} bytes from {}", body.len(), endpoint);
        Ok(serde_json::from_slice(&body)?)
    }

    /// The logged-in summoner with region and profile icon filled in.
    pub fn current_summoner(&self) -> Result<Summoner> {
        let mut summoner: Summoner = self.get_json(CURRENT_SUMMONER_ENDPOINT)?;
        summoner.region = self.display_region.clone();

        match self.profile_icon(summoner.profile_icon_id) {
            Ok(src) => summoner.icon_img_src = src,
            Err(err) => warn!(
                "failed to load profile icon {}: {}",
                summoner.profile_icon_id, err
            ),
        }
        Ok(summoner)
    }

    /// Profile icon as a JPEG data URI. Icon `0` maps to the default icon.
    pub fn profile_icon(&self, icon_id: u32) -> Result<String> {
        let icon_id = if icon_id == 0 {
            DEFAULT_PROFILE_ICON_ID
        } else {
            icon_id
        };
        let bytes = self.api.get(&format!("{PROFILE_ICON_PATH}/{icon_id}.jpg"))?;
        debug!("received {} bytes for icon {}", bytes.len(), icon_id);
        Ok(format!("data:image/jpeg;base64,{}", STANDARD.encode(bytes)))
    }

    /// Ranked stats for `puuid`, localised for display.
    pub fn ranked_stats(&self, puuid: &str) -> Result<RankedStats> {
        let puuid = require_puuid(puuid)?;
        let mut stats: RankedStats =
            self.get_json(&format!("/lol-ranked/v1/ranked-stats/{puuid}"))?;
        rank::localize(&mut stats);
        Ok(stats)
    }

    /// Recent matches for `puuid`.
    pub fn match_history(&self, puuid: &str) -> Result<MatchHistory> {
        let puuid = require_puuid(puuid)?;
        self.get_json(&format!(
            "/lol-match-history/v1/products/lol/{puuid}/matches"
        ))
    }

    /// Metadata for every champion appearing in `history`.
    pub fn champions_for(&self, history: &MatchHistory) -> Result<HashMap<u32, ChampionInfo>> {
        self.cache.get_or_fetch(&*self.api, history.champion_ids())
    }

    /// Metadata for a single champion.
    pub fn champion(&self, id: u32) -> Result<ChampionInfo> {
        self.cache.get_or_fetch_single(&*self.api, id)
    }

    /// Metadata for a set of champions.
    pub fn champions(&self, ids: &[u32]) -> Result<HashMap<u32, ChampionInfo>> {
        self.cache.get_or_fetch(&*self.api, ids.iter().copied())
    }
}

fn require_puuid(puuid: &str) -> Result<&str> {
    let puuid = puuid.trim();
    if puuid.is_empty() {
        return Err(Error::InvalidArgument("empty puuid provided".to_string()));
    }
    Ok(puuid)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use parking_lot::Mutex;

    use super::*;

    struct RoutedApi {
        routes: HashMap<String, Vec<u8>>,
        hits: Mutex<Vec<String>>,
    }

    impl RoutedApi {
        fn new(routes: &[(&str, &[u8])]) -> Self {
            Self {
                routes: routes
                    .iter()
                    .map(|(path, body)| (path.to_string(), body.to_vec()))
                    .collect(),
                hits: Mutex::new(Vec::new()),
            }
        }
    }

    impl LocalApi for RoutedApi {
        fn get(&self, endpoint: &str) -> Result<Vec<u8>> {
            self.hits.lock().push(endpoint.to_string());
            let path = endpoint
                .strip_prefix(&self.origin())
                .unwrap_or(endpoint);
            self.routes
                .get(path)
                .cloned()
                .ok_or_else(|| Error::HttpStatus {
                    code: 404,
                    status: "Not Found".to_string(),
                })
        }

        fn origin(&self) -> String {
            "https://127.0.0.1:2999".to_string()
        }
    }

    fn client(routes: &[(&str, &[u8])]) -> LocalClient<RoutedApi> {
        LocalClient::with_api(
            Arc::new(RoutedApi::new(routes)),
            Arc::new(ResourceCache::new()),
            "艾欧尼亚",
        )
    }

    #[test]
    fn current_summoner_gets_region_and_icon() -> Result<()> {
        let client = client(&[
            (
                CURRENT_SUMMONER_ENDPOINT,
                br#"{"gameName":"Teemo","tagLine":"HN1","profileIconId":29,"puuid":"p-1"}"#,
            ),
            ("/lol-game-data/assets/v1/profile-icons/29.jpg", b"jpg"),
        ]);

        let summoner = client.current_summoner()?;
        assert_eq!(summoner.region, "艾欧尼亚");
        assert_eq!(summoner.icon_img_src, "data:image/jpeg;base64,anBn");
        assert_eq!(summoner.puuid, "p-1");
        Ok(())
    }

    #[test]
    fn missing_profile_icon_is_tolerated() -> Result<()> {
        let client = client(&[(CURRENT_SUMMONER_ENDPOINT, br#"{"displayName":"Annie"}"#)]);

        let summoner = client.current_summoner()?;
        assert_eq!(summoner.riot_id(), "Annie");
        assert!(summoner.icon_img_src.is_empty());
        let hits = client.api.hits.lock();
        assert!(hits.contains(&format!("{PROFILE_ICON_PATH}/{DEFAULT_PROFILE_ICON_ID}.jpg")));
        Ok(())
    }

    #[test]
    fn ranked_stats_are_localised() -> Result<()> {
        let client = client(&[(
            "/lol-ranked/v1/ranked-stats/p-1",
            br#"{"queueMap":{"RANKED_SOLO_5x5":{"queueType":"RANKED_SOLO_5x5","tier":"GOLD","wins":3,"losses":1}},"highestCurrentSeasonReachedTierSR":"GOLD"}"#,
        )]);

        let stats = client.ranked_stats("p-1")?;
        assert_eq!(stats.highest_current_season_reached_tier_sr, "黄金");
        assert_eq!(
            stats.queue_map["RANKED_SOLO_5x5"].queue_label.as_deref(),
            Some("单双排")
        );
        assert!(rank::format_summary(&stats).contains("胜率75.0%"));
        Ok(())
    }

    #[test]
    fn empty_puuid_is_rejected_without_a_request() {
        let client = client(&[]);
        assert!(matches!(
            client.ranked_stats("  "),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            client.match_history(""),
            Err(Error::InvalidArgument(_))
        ));
        assert!(client.api.hits.lock().is_empty());
    }

    #[test]
    fn malformed_payload_is_a_decode_error() {
        let client = client(&[(CURRENT_SUMMONER_ENDPOINT, b"not json")]);
        assert!(matches!(client.current_summoner(), Err(Error::Decode(_))));
    }

    #[test]
    fn match_history_champions_resolve_through_cache() -> Result<()> {
        let client = client(&[
            (
                "/lol-match-history/v1/products/lol/p-1/matches",
                br#"{"games":{"games":[{"queueId":420,"participants":[{"championId":7},{"championId":3}]}]}}"#,
            ),
            (
                "/lol-game-data/assets/v1/champions/7.json",
                br#"{"id":7,"name":"LeBlanc","squarePortraitPath":"/icons/7.png"}"#,
            ),
            (
                "/lol-game-data/assets/v1/champions/3.json",
                br#"{"id":3,"name":"Galio","squarePortraitPath":"/icons/3.png"}"#,
            ),
            ("/icons/7.png", b"png"),
        ]);

        let history = client.match_history("p-1")?;
        let champions = client.champions_for(&history)?;
        assert_eq!(champions[&7].name, "LeBlanc");
        assert!(champions[&7].icon_data_uri.is_some());
        assert_eq!(champions[&3].icon_data_uri, None);
        assert_eq!(client.cache().len(), 2);

        let galio = client.champion(3)?;
        assert_eq!(galio.square_portrait_path, "https://127.0.0.1:2999/icons/3.png");
        Ok(())
    }
}
