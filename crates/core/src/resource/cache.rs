use std::collections::{HashMap, HashSet};

use base64::{engine::general_purpose::STANDARD, Engine};
use parking_lot::RwLock;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{
    error::{Error, Result},
    models::ChampionInfo,
    session::LocalApi,
};

/// Champion metadata document served by the game-data plugin.
pub const CHAMPION_PATH: &str = "/lol-game-data/assets/v1/champions";

/// Thread-safe, read-through cache of champion metadata keyed by id.
///
/// Entries are never evicted. A batch either returns every requested id or
/// fails without storing anything it fetched.
#[derive(Default)]
pub struct ResourceCache {
    entries: RwLock<HashMap<u32, ChampionInfo>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawChampion {
    #[serde(default)]
    id: Option<i64>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    square_portrait_path: String,
}

impl ResourceCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached champions.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Cached entry for `id`, without fetching.
    pub fn cached(&self, id: u32) -> Option<ChampionInfo> {
        self.entries.read().get(&id).cloned()
    }

    /// Resolve every id in `ids`, fetching the ones not cached yet.
    ///
    /// Duplicate ids and id `0` are ignored. Missing ids are fetched one after
    /// another; the first failure aborts the batch.
    pub fn get_or_fetch<A, I>(&self, api: &A, ids: I) -> Result<HashMap<u32, ChampionInfo>>
    where
        A: LocalApi + ?Sized,
        I: IntoIterator<Item = u32>,
    {
        let mut result = HashMap::new();
        let mut seen = HashSet::new();
        let mut missing = Vec::new();

        for id in ids {
            if id == 0 || !seen.insert(id) {
                continue;
            }
            match self.cached(id) {
                Some(info) => {
                    result.insert(id, info);
                }
                None => missing.push(id),
            }
        }

        if missing.is_empty() {
            return Ok(result);
        }
        debug!("fetching {} uncached champions: {:?}", missing.len(), missing);

        let mut fetched = Vec::with_capacity(missing.len());
        for id in missing {
            fetched.push(fetch_champion(api, id)?);
        }

        let mut entries = self.entries.write();
        for info in fetched {
            entries.insert(info.id, info.clone());
            result.insert(info.id, info);
        }

        Ok(result)
    }

    /// Resolve one id through [`ResourceCache::get_or_fetch`].
    pub fn get_or_fetch_single<A>(&self, api: &A, id: u32) -> Result<ChampionInfo>
    where
        A: LocalApi + ?Sized,
    {
        self.get_or_fetch(api, [id])?
            .remove(&id)
            .ok_or(Error::NotFound { id })
    }
}

fn fetch_champion<A>(api: &A, id: u32) -> Result<ChampionInfo>
where
    A: LocalApi + ?Sized,
{
    let body = api.get(&format!("{CHAMPION_PATH}/{id}.json"))?;
    let raw: RawChampion = serde_json::from_slice(&body)?;
    if let Some(reported) = raw.id.filter(|reported| *reported != i64::from(id)) {
        warn!("champion document for {} reports id {}", id, reported);
    }

    let portrait_url = format!("{}{}", api.origin(), raw.square_portrait_path);
    let icon_data_uri = match api.get(&portrait_url) {
        Ok(bytes) if !bytes.is_empty() => Some(png_data_uri(&bytes)),
        Ok(_) => None,
        Err(err) => {
            warn!("failed to download icon {}: {}", portrait_url, err);
            None
        }
    };

    Ok(ChampionInfo {
        id,
        name: raw.name,
        square_portrait_path: portrait_url,
        icon_data_uri,
    })
}

fn png_data_uri(bytes: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(bytes))
}
