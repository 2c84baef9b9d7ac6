//! Daily box-office leaderboard report

use super::{FieldValue, field, is_truthy, or_default, or_na, record};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Reply when the leaderboard cannot be fetched
pub const FETCH_FAILED: &str = "⚠️ 获取票房数据失败，请稍后重试";

/// Ranks the upstream publishes (`Top_1` .. `Top_8`)
pub const MAX_RANK: usize = 8;

const RULE_WIDTH: usize = 30;

/// One `Top_N` entry
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovieEntry {
    pub name: Option<FieldValue>,
    #[serde(rename = "release date")]
    pub release_date: Option<FieldValue>,
    #[serde(rename = "Box Office Million")]
    pub box_office_million: Option<FieldValue>,
    #[serde(rename = "Share of box office")]
    pub box_office_share: Option<FieldValue>,
    #[serde(rename = "Row Films")]
    pub screening_share: Option<FieldValue>,
    #[serde(rename = "Row seats")]
    pub seat_share: Option<FieldValue>,
}

/// Marker shown in front of a rank
pub fn medal(rank: usize) -> &'static str {
    match rank {
        1 => "🥇",
        2 => "🥈",
        3 => "🥉",
        _ => "🎯",
    }
}

/// Leaderboard entries in rank order, stopping at the first missing rank
pub fn entries(payload: &Map<String, Value>) -> Vec<MovieEntry> {
    (1..=MAX_RANK)
        .map_while(|rank| {
            payload
                .get(&format!("Top_{rank}"))
                .filter(|value| value.is_object() && is_truthy(value))
                .map(record::<MovieEntry>)
        })
        .collect()
}

/// Render the leaderboard. The upstream reports success as the string `"200"`.
pub fn render(payload: &Map<String, Value>) -> String {
    if payload.get("code").and_then(Value::as_str) != Some("200") {
        return FETCH_FAILED.to_string();
    }

    let day = field(payload, "day");
    let rule = "=".repeat(RULE_WIDTH);

    let mut lines = vec![
        format!("🎬 {}全国电影票房榜 🎬", or_default(day.as_ref(), "当日")),
        rule.clone(),
        String::new(),
    ];

    for (index, movie) in entries(payload).iter().enumerate() {
        let rank = index + 1;
        lines.push(format!(
            "{} No.{rank} {}",
            medal(rank),
            or_default(movie.name.as_ref(), "未知")
        ));
        lines.push(format!("├ 上映日期：{}", or_na(movie.release_date.as_ref())));
        lines.push(format!("├ 实时票房：{}", or_na(movie.box_office_million.as_ref())));
        lines.push(format!("├ 票房占比：{}", or_na(movie.box_office_share.as_ref())));
        lines.push(format!("├ 排片占比：{}", or_na(movie.screening_share.as_ref())));
        lines.push(format!("└ 排座占比：{}", or_na(movie.seat_share.as_ref())));
        lines.push(String::new());
    }

    lines.push(rule);
    lines.push(format!(
        "数据更新时间：{} ⏰",
        or_default(day.as_ref(), "未知时间")
    ));
    lines.join("\n")
}
