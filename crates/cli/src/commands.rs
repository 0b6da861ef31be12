//! Subcommand implementations. Failures from the client are logged and
//! rendered as neutral output; only local plumbing errors abort the process.

use std::{collections::HashMap, sync::Arc, thread};

use anyhow::Result;
use lcu_companion_core::{
    models::Game, rank, AppConfig, ChampionInfo, LocalApi as _, LocalClient, MatchHistory,
    Session, Summoner,
};
use tracing::{error, warn};

/// Discover credentials and bring up the process-wide session.
fn open_session(config: &AppConfig) -> Option<Arc<Session>> {
    let credentials = match config.discovery().discover() {
        Ok(credentials) => credentials,
        Err(err) => {
            warn!("failed to detect League client credentials: {err}");
            println!("League client not detected.");
            return None;
        }
    };

    Session::init(credentials)
        .map_err(|err| error!("failed to initialise session: {err}"))
        .ok()
}

fn connect(config: &AppConfig) -> Option<LocalClient> {
    open_session(config).map(LocalClient::new)
}

pub fn credentials(config: &AppConfig) -> Result<()> {
    let Some(session) = open_session(config) else {
        return Ok(());
    };
    println!("origin: {}", session.origin());
    println!("port:   {}", session.port());
    println!(
        "region: {} {}",
        session.region_code().unwrap_or("-"),
        session.display_region()
    );
    Ok(())
}

fn current_summoner(client: &LocalClient) -> Option<Summoner> {
    client
        .current_summoner()
        .map_err(|err| warn!("summoner lookup failed: {err}"))
        .ok()
}

fn render_summoner(summoner: &Summoner) -> String {
    let mut lines = vec![
        summoner.riot_id(),
        format!("level:  {}", summoner.summoner_level),
    ];
    if !summoner.region.is_empty() {
        lines.push(format!("server: {}", summoner.region));
    }
    lines.push(format!("puuid:  {}", summoner.puuid));
    lines.iter().map(|line| format!("{line}\n")).collect()
}

pub fn summoner(config: &AppConfig, json: bool) -> Result<()> {
    let Some(client) = connect(config) else {
        return Ok(());
    };
    let summoner = current_summoner(&client).unwrap_or_default();

    if json {
        println!("{}", serde_json::to_string_pretty(&summoner)?);
    } else {
        print!("{}", render_summoner(&summoner));
    }
    Ok(())
}

/// Use the given PUUID, or fall back to the logged-in summoner's.
fn resolve_puuid(client: &LocalClient, puuid: Option<String>) -> Option<String> {
    puuid
        .filter(|value| !value.trim().is_empty())
        .or_else(|| current_summoner(client).map(|summoner| summoner.puuid))
        .filter(|value| !value.is_empty())
}

fn rank_summary(client: &LocalClient, puuid: &str) -> String {
    match client.ranked_stats(puuid) {
        Ok(stats) => rank::format_summary(&stats),
        Err(err) => {
            warn!("ranked lookup failed: {err}");
            String::new()
        }
    }
}

pub fn rank(config: &AppConfig, puuid: Option<String>, json: bool) -> Result<()> {
    let Some(client) = connect(config) else {
        return Ok(());
    };
    let Some(puuid) = resolve_puuid(&client, puuid) else {
        println!("No player to look up.");
        return Ok(());
    };

    if json {
        let stats = client
            .ranked_stats(&puuid)
            .map_err(|err| warn!("ranked lookup failed: {err}"))
            .unwrap_or_default();
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print!("{}", rank_summary(&client, &puuid));
    }
    Ok(())
}

fn format_duration(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

fn render_game(game: &Game, champions: &HashMap<u32, ChampionInfo>) -> String {
    let queue = rank::queue_id_label(game.queue_id);
    let Some(player) = game.participants.first() else {
        return format!("{queue:<8} -");
    };
    let champion = champions
        .get(&player.champion_id)
        .map(|info| info.name.clone())
        .unwrap_or_else(|| player.champion_id.to_string());
    let stats = &player.stats;
    format!(
        "{queue:<8} {result} {champion:<12} {}/{}/{}  {}",
        stats.kills,
        stats.deaths,
        stats.assists,
        format_duration(game.game_duration),
        result = if stats.win { "胜" } else { "负" },
    )
}

fn render_matches(client: &LocalClient, history: &MatchHistory, limit: usize) -> String {
    let champions = client.champions_for(history).unwrap_or_else(|err| {
        warn!("champion lookup failed: {err}");
        HashMap::new()
    });

    history
        .games
        .games
        .iter()
        .take(limit)
        .map(|game| format!("{}\n", render_game(game, &champions)))
        .collect()
}

fn match_lines(client: &LocalClient, puuid: &str, limit: usize) -> String {
    match client.match_history(puuid) {
        Ok(history) => render_matches(client, &history, limit),
        Err(err) => {
            warn!("match history lookup failed: {err}");
            String::new()
        }
    }
}

pub fn matches(config: &AppConfig, puuid: Option<String>, limit: usize) -> Result<()> {
    let Some(client) = connect(config) else {
        return Ok(());
    };
    let Some(puuid) = resolve_puuid(&client, puuid) else {
        println!("No player to look up.");
        return Ok(());
    };

    print!("{}", match_lines(&client, &puuid, limit));
    Ok(())
}

pub fn champion(config: &AppConfig, ids: &[u32], json: bool) -> Result<()> {
    let Some(client) = connect(config) else {
        return Ok(());
    };
    let champions = client.champions(ids).unwrap_or_else(|err| {
        warn!("champion lookup failed: {err}");
        HashMap::new()
    });

    let mut sorted: Vec<_> = champions.into_values().collect();
    sorted.sort_by_key(|info| info.id);

    if json {
        println!("{}", serde_json::to_string_pretty(&sorted)?);
    } else {
        for info in &sorted {
            println!("{:>4}  {}  {}", info.id, info.name, info.square_portrait_path);
        }
    }
    Ok(())
}

pub fn overview(config: &AppConfig, limit: usize) -> Result<()> {
    let Some(client) = connect(config) else {
        return Ok(());
    };
    let Some(summoner) = current_summoner(&client) else {
        println!("No player to look up.");
        return Ok(());
    };
    print!("{}", render_summoner(&summoner));

    let puuid = summoner.puuid.as_str();
    let (summary, games) = thread::scope(|scope| {
        let ranked = scope.spawn(|| rank_summary(&client, puuid));
        let games = scope.spawn(|| match_lines(&client, puuid, limit));
        (
            ranked.join().unwrap_or_default(),
            games.join().unwrap_or_default(),
        )
    });

    println!();
    print!("{summary}");
    println!();
    print!("{games}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use lcu_companion_core::models::{Participant, ParticipantStats};

    use super::*;

    #[test]
    fn renders_game_line_with_champion_name() {
        let game = Game {
            queue_id: 420,
            game_duration: 1865,
            participants: vec![Participant {
                champion_id: 7,
                stats: ParticipantStats {
                    win: true,
                    kills: 5,
                    deaths: 2,
                    assists: 9,
                },
            }],
            ..Default::default()
        };
        let champions = HashMap::from([(
            7,
            ChampionInfo {
                id: 7,
                name: "LeBlanc".to_string(),
                square_portrait_path: String::new(),
                icon_data_uri: None,
            },
        )]);

        let line = render_game(&game, &champions);
        assert!(line.starts_with("单双排"));
        assert!(line.contains("胜 LeBlanc"));
        assert!(line.contains("5/2/9"));
        assert!(line.ends_with("31:05"));
    }

    #[test]
    fn unknown_champion_renders_its_id() {
        let game = Game {
            queue_id: 1700,
            participants: vec![Participant {
                champion_id: 99,
                ..Default::default()
            }],
            ..Default::default()
        };
        let line = render_game(&game, &HashMap::new());
        assert!(line.starts_with("1700"));
        assert!(line.contains("负 99"));
    }

    #[test]
    fn summoner_render_skips_empty_region() {
        let summoner = Summoner {
            game_name: "Teemo".to_string(),
            tag_line: "0001".to_string(),
            summoner_level: 30,
            ..Default::default()
        };
        let text = render_summoner(&summoner);
        assert!(text.starts_with("Teemo#0001\nlevel:  30\n"));
        assert!(!text.contains("server"));
    }
}
