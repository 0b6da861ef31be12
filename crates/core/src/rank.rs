//! Display localisation for ranked data.

use crate::models::{RankedEntry, RankedStats};

/// Label used for empty or unrated tiers.
pub const UNRANKED: &str = "未定级";

/// Display string for a coded tier, `None` when the code is unknown.
pub fn tier_label(code: &str) -> Option<&'static str> {
    let label = match code {
        "IRON" => "黑铁",
        "BRONZE" => "青铜",
        "SILVER" => "白银",
        "GOLD" => "黄金",
        "PLATINUM" => "白金",
        "EMERALD" => "翡翠",
        "DIAMOND" => "钻石",
        "MASTER" => "大师",
        "GRANDMASTER" => "宗师",
        "CHALLENGER" => "王者",
        "" | "NA" => UNRANKED,
        _ => return None,
    };
    Some(label)
}

/// Display string for a ranked queue type, `None` when the code is unknown.
pub fn queue_label(code: &str) -> Option<&'static str> {
    let label = match code {
        "RANKED_SOLO_5x5" => "单双排",
        "RANKED_FLEX_SR" => "灵活组排",
        "RANKED_TFT" => "云顶之弈",
        "RANKED_TFT_DOUBLE_UP" => "云顶双人",
        "RANKED_TFT_TURBO" => "云顶快速",
        _ => return None,
    };
    Some(label)
}

/// Display string for a numeric match queue id; unknown ids render as the number.
pub fn queue_id_label(queue_id: u32) -> String {
    match queue_id {
        420 => "单双排".to_string(),
        430 => "匹配模式".to_string(),
        440 => "灵活排位".to_string(),
        450 => "大乱斗".to_string(),
        other => other.to_string(),
    }
}

fn localize_tier(value: &mut String) {
    if let Some(label) = tier_label(value) {
        *value = label.to_string();
    }
}

fn localize_entry(entry: &mut RankedEntry) {
    localize_tier(&mut entry.tier);
    localize_tier(&mut entry.highest_tier);
    localize_tier(&mut entry.previous_season_end_tier);
    localize_tier(&mut entry.previous_season_highest_tier);
    localize_tier(&mut entry.rated_tier);

    if let Some(label) = queue_label(&entry.queue_type) {
        entry.queue_label = Some(label.to_string());
    }
}

/// Rewrite every tier field of `stats` to its display string and label each
/// queue entry. Unknown codes are left as they are, so repeated calls are
/// harmless.
pub fn localize(stats: &mut RankedStats) {
    localize_tier(&mut stats.highest_current_season_reached_tier_sr);
    localize_tier(&mut stats.highest_previous_season_end_tier);

    for (queue_type, entry) in stats.queue_map.iter_mut() {
        localize_entry(entry);
        // Entries keyed by queue may omit their own queueType.
        if entry.queue_label.is_none() {
            entry.queue_label = queue_label(queue_type).map(str::to_string);
        }
    }
    stats.queues.iter_mut().for_each(localize_entry);
    localize_entry(&mut stats.highest_ranked_entry);
    localize_entry(&mut stats.highest_ranked_entry_sr);
}

fn is_ranked(tier: &str) -> bool {
    !tier.is_empty() && tier != UNRANKED
}

/// Multi-section text report of already localised ranked stats.
pub fn format_summary(stats: &RankedStats) -> String {
    let mut out = String::new();

    out.push_str("=== 排位信息汇总 ===\n");
    out.push_str(&format!(
        "当前赛季最高段位: {}\n",
        stats.highest_current_season_reached_tier_sr
    ));
    out.push_str(&format!(
        "上赛季最高段位: {} {}\n",
        stats.highest_previous_season_end_tier, stats.highest_previous_season_end_division
    ));

    for (queue_type, entry) in &stats.queue_map {
        if !is_ranked(&entry.tier) {
            continue;
        }

        let name = entry
            .queue_label
            .clone()
            .or_else(|| queue_label(queue_type).map(str::to_string))
            .unwrap_or_else(|| queue_type.clone());
        out.push_str(&format!("\n【{name}】\n"));

        out.push_str(&format!("当前段位: {} {}", entry.tier, entry.division));
        if entry.league_points > 0 {
            out.push_str(&format!(" ({}胜点)", entry.league_points));
        }
        out.push('\n');

        if is_ranked(&entry.highest_tier) {
            out.push_str(&format!(
                "历史最高: {} {}\n",
                entry.highest_tier, entry.highest_division
            ));
        }

        if let Some(rate) = entry.win_rate() {
            out.push_str(&format!(
                "战绩: {}胜 {}负 (胜率{:.1}%)\n",
                entry.wins, entry.losses, rate
            ));
        }
    }

    out
}
