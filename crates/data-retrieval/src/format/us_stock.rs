//! US-stock real-time quote report

use super::{FieldValue, NOT_AVAILABLE, is_truthy, or_default, or_na, record};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::ops::RangeInclusive;

/// Reply when the quote request itself failed
pub const FETCH_FAILED: &str = "⚠️ 获取美股数据失败，请稍后重试";

/// Reply when the response has no entry for the ticker
pub const NOT_FOUND: &str = "⚠️ 未找到该股票数据";

/// Market-cap values that mean "unknown"
const MARKET_CAP_SENTINELS: [&str; 3] = ["none", "null", "0"];

/// Quote for one ticker, as keyed under `data.<TICKER>`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsQuote {
    pub name: Option<FieldValue>,
    pub ticker: Option<FieldValue>,
    pub price: Option<FieldValue>,
    pub day_open: Option<FieldValue>,
    pub day_high: Option<FieldValue>,
    pub day_low: Option<FieldValue>,
    #[serde(rename = "52_week_high")]
    pub week_52_high: Option<FieldValue>,
    #[serde(rename = "52_week_low")]
    pub week_52_low: Option<FieldValue>,
    pub market_cap: Option<FieldValue>,
    pub volume: Option<FieldValue>,
    pub previous_close_price: Option<FieldValue>,
    pub day_change: Option<FieldValue>,
    pub last_trade_time: Option<FieldValue>,
}

impl UsQuote {
    /// Market cap, unless absent or a sentinel non-value
    pub fn displayable_market_cap(&self) -> Option<String> {
        let cap = self.market_cap.as_ref().filter(|cap| cap.is_truthy())?;
        let text = cap.to_string();
        let lowered = text.to_lowercase();
        if MARKET_CAP_SENTINELS.contains(&lowered.as_str()) {
            None
        } else {
            Some(text)
        }
    }

    /// Last trade time in display form; unparseable values are shown as-is
    pub fn display_trade_time(&self) -> String {
        match &self.last_trade_time {
            None => NOT_AVAILABLE.to_string(),
            Some(FieldValue::Text(raw)) => {
                localize_trade_time(raw).unwrap_or_else(|| raw.clone())
            }
            Some(other) => other.to_string(),
        }
    }
}

/// Re-render `YYYY-MM-DDTHH:MM:SS.ffffff` as `YYYY年MM月DD日 HH:MM:SS`.
///
/// The year is four ASCII digits, the other fields one or two, and the
/// fraction 1 to 6. Signs, whitespace and out-of-range values reject.
pub fn localize_trade_time(raw: &str) -> Option<String> {
    let (whole, fraction) = raw.split_once('.')?;
    if !digits(fraction, 1..=6) {
        return None;
    }

    let (date, time) = whole.split_once('T')?;
    let [year, month, day] = fields(date, '-', [4..=4, 1..=2, 1..=2])?;
    let [hour, minute, second] = fields(time, ':', [1..=2, 1..=2, 1..=2])?;

    let date = NaiveDate::from_ymd_opt(year.try_into().ok()?, month, day)?;
    let time = NaiveTime::from_hms_opt(hour, minute, second)?;
    Some(
        NaiveDateTime::new(date, time)
            .format("%Y年%m月%d日 %H:%M:%S")
            .to_string(),
    )
}

fn digits(text: &str, width: RangeInclusive<usize>) -> bool {
    width.contains(&text.len()) && text.bytes().all(|b| b.is_ascii_digit())
}

/// Split `text` on `sep` into exactly three all-digit fields of the given widths
fn fields(text: &str, sep: char, widths: [RangeInclusive<usize>; 3]) -> Option<[u32; 3]> {
    let mut parts = text.split(sep);
    let mut values = [0; 3];
    for (value, width) in values.iter_mut().zip(widths) {
        let part = parts.next()?;
        if !digits(part, width) {
            return None;
        }
        *value = part.parse().ok()?;
    }
    parts.next().is_none().then_some(values)
}

/// Find the quote for `symbol` under the payload's `data` map
pub fn lookup(payload: &Map<String, Value>, symbol: &str) -> Option<UsQuote> {
    let data = payload.get("data").filter(|data| is_truthy(data))?;
    let entry = data.as_object()?.get(symbol)?;
    entry.is_object().then(|| record(entry))
}

/// Render the quote for `symbol`
pub fn render(payload: &Map<String, Value>, symbol: &str) -> String {
    let Some(quote) = lookup(payload, symbol) else {
        return NOT_FOUND.to_string();
    };

    let mut text = format!(
        "📊 {} ({})\n",
        or_default(quote.name.as_ref(), symbol),
        or_default(quote.ticker.as_ref(), symbol)
    );
    text.push_str(&format!("最新价格：{} USD\n", or_na(quote.price.as_ref())));
    text.push_str(&format!("开盘价：{} USD\n", or_na(quote.day_open.as_ref())));
    text.push_str(&format!(
        "当日最高：{}  当日最低：{} USD\n",
        or_na(quote.day_high.as_ref()),
        or_na(quote.day_low.as_ref())
    ));
    text.push_str(&format!(
        "52周最高：{}  52周最低：{} USD\n",
        or_na(quote.week_52_high.as_ref()),
        or_na(quote.week_52_low.as_ref())
    ));
    if let Some(cap) = quote.displayable_market_cap() {
        text.push_str(&format!("市值：{cap} USD\n"));
    }
    text.push_str(&format!("成交量：{}\n", or_na(quote.volume.as_ref())));
    text.push_str(&format!(
        "前收盘价：{} USD\n",
        or_na(quote.previous_close_price.as_ref())
    ));
    text.push_str(&format!("涨跌幅：{}%\n", or_na(quote.day_change.as_ref())));
    text.push_str(&format!("最后交易时间：{}\n", quote.display_trade_time()));
    text
}
