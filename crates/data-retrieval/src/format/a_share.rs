//! A-share daily history report

use super::{FieldValue, field, or_default, or_na, record};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Reply when the history cannot be fetched or the code is unknown
pub const FETCH_FAILED: &str = "⚠️ 获取股票数据失败，请检查代码是否正确";

const RULE_WIDTH: usize = 40;

/// One trading day
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyRecord {
    pub time: Option<FieldValue>,
    pub opening: Option<FieldValue>,
    pub closing: Option<FieldValue>,
    pub highest: Option<FieldValue>,
    pub lowest: Option<FieldValue>,
    /// Change in percent
    pub inorde: Option<FieldValue>,
    /// Change in price
    pub inorde_amount: Option<FieldValue>,
    pub trading_volume: Option<FieldValue>,
}

/// Whether the payload carries the numeric success status `200`
pub fn is_ok(payload: &Map<String, Value>) -> bool {
    payload
        .get("code")
        .and_then(Value::as_f64)
        .is_some_and(|code| code == 200.0)
}

/// The first `count` records of `data`, in upstream order
pub fn records(payload: &Map<String, Value>, count: usize) -> Vec<DailyRecord> {
    payload
        .get("data")
        .and_then(Value::as_array)
        .map(|items| items.iter().take(count).map(record::<DailyRecord>).collect())
        .unwrap_or_default()
}

/// Render up to `count` trading days
pub fn render(payload: &Map<String, Value>, count: usize) -> String {
    if payload.is_empty() || !is_ok(payload) {
        return FETCH_FAILED.to_string();
    }

    let name = field(payload, "name");
    let secid = field(payload, "secid");
    let days = records(payload, count);
    let rule = "=".repeat(RULE_WIDTH);
    let separator = "-".repeat(RULE_WIDTH);

    let mut lines = vec![
        format!(
            "📊 {} ({}) 近期数据",
            or_default(name.as_ref(), "未知股票"),
            or_default(secid.as_ref(), "000000")
        ),
        format!("📈 显示最近{}个交易日记录", days.len()),
        rule.clone(),
    ];

    for day in &days {
        lines.push(format!("📅 {}", or_default(day.time.as_ref(), "未知日期")));
        lines.push(format!("▪️ 开盘：{}", or_na(day.opening.as_ref())));
        lines.push(format!("▪️ 收盘：{}", or_na(day.closing.as_ref())));
        lines.push(format!(
            "▪️ 最高/最低：{}/{}",
            or_na(day.highest.as_ref()),
            or_na(day.lowest.as_ref())
        ));
        lines.push(format!(
            "▪️ 涨跌：{} ({})",
            or_na(day.inorde.as_ref()),
            or_na(day.inorde_amount.as_ref())
        ));
        lines.push(format!("▪️ 成交量：{}", or_na(day.trading_volume.as_ref())));
        lines.push(separator.clone());
    }

    lines.push("💡 高级功能支持：".to_string());
    lines.push("1. 输入完整代码查看更多数据（例：股票 300033 15）".to_string());
    lines.push("2. 输入'分析 股票代码'获取AI解读（功能开发中）".to_string());
    lines.push(rule);
    lines.push("数据来源：PearkTrue Stock API".to_string());
    lines.join("\n")
}
