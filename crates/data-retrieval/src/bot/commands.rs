//! Command parsing for the retrieval plugin
//!
//! Triggers are checked in a fixed order and the first match wins:
//! `票房` (exact), then `股票` (prefix), then `美股` (prefix).

use crate::error::UsageError;
use std::num::IntErrorKind;

/// Default number of A-share records
pub const DEFAULT_COUNT: u32 = 5;
/// Smallest accepted record count
pub const MIN_COUNT: u32 = 1;
/// Largest accepted record count
pub const MAX_COUNT: u32 = 50;

const BOX_OFFICE_TRIGGER: &str = "票房";
const STOCK_TRIGGER: &str = "股票";
const US_STOCK_TRIGGER: &str = "美股";

/// Recognized command category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    BoxOffice,
    Stock,
    UsStock,
}

impl Intent {
    /// Detect the intent of trimmed, lower-cased text
    pub fn detect(normalized: &str) -> Option<Self> {
        if normalized == BOX_OFFICE_TRIGGER {
            Some(Intent::BoxOffice)
        } else if normalized.starts_with(STOCK_TRIGGER) {
            Some(Intent::Stock)
        } else if normalized.starts_with(US_STOCK_TRIGGER) {
            Some(Intent::UsStock)
        } else {
            None
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Intent::BoxOffice => "box_office",
            Intent::Stock => "stock",
            Intent::UsStock => "us_stock",
        }
    }
}

/// Parsed command from a chat message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Today's box-office leaderboard
    BoxOffice,
    /// Recent A-share history
    Stock { secid: String, count: u32 },
    /// US-stock quote
    UsStock { symbol: String },
}

impl Command {
    /// Parse a chat message.
    ///
    /// `Ok(None)` means no trigger matched and the message belongs to someone
    /// else. Malformed arguments for a matched trigger yield a [`UsageError`].
    pub fn parse(input: &str) -> Result<Option<Self>, UsageError> {
        let trimmed = input.trim();
        let Some(intent) = Intent::detect(&trimmed.to_lowercase()) else {
            return Ok(None);
        };

        // Arguments come from the original text so codes keep their case.
        let parts: Vec<&str> = trimmed.split_whitespace().collect();

        let command = match intent {
            Intent::BoxOffice => Command::BoxOffice,
            Intent::Stock => {
                let secid = parts.get(1).ok_or(UsageError::MissingStockCode)?;
                let count = match parts.get(2) {
                    Some(raw) => parse_count(raw)?,
                    None => DEFAULT_COUNT,
                };
                Command::Stock {
                    secid: (*secid).to_string(),
                    count,
                }
            }
            Intent::UsStock => {
                let symbol = parts.get(1).ok_or(UsageError::MissingTicker)?;
                Command::UsStock {
                    symbol: symbol.to_uppercase(),
                }
            }
        };

        Ok(Some(command))
    }

    pub fn intent(&self) -> Intent {
        match self {
            Command::BoxOffice => Intent::BoxOffice,
            Command::Stock { .. } => Intent::Stock,
            Command::UsStock { .. } => Intent::UsStock,
        }
    }

    /// User help for the plugin
    pub fn help_text() -> &'static str {
        r#"💼 金融数据查询插件

【票房查询】
输入"票房"获取实时电影票房排行榜

【股票查询】
A股查询：股票 代码
查询中国A股市场：股票 300033

美股查询：美股 代码
查询美股市场股票：美股 AAPL

A股多日查询：股票 代码 数量
示例：股票 600519 10

【注意事项】
1. 股票代码需请确保输入正确的股票代码。对于中国A股市场，股票代码通常为6位数字；
对于美股市场，股票代码通常为3-4个字母
2. A股数量参数范围1-50
3. 数据仅供参考，投资需谨慎

📌 数据更新频率：每30分钟刷新一次
"#
    }
}

/// Parse the optional record count and clamp it to `MIN_COUNT..=MAX_COUNT`.
///
/// Full-width digits and single `_` separators between digits are accepted.
/// Integers beyond `i64` clamp like any other out-of-range value.
fn parse_count(raw: &str) -> Result<u32, UsageError> {
    let ascii: String = raw.chars().map(fullwidth_to_ascii).collect();
    let number = strip_digit_separators(&ascii).ok_or(UsageError::InvalidCount)?;

    match number.parse::<i64>() {
        Ok(n) => Ok(n.clamp(i64::from(MIN_COUNT), i64::from(MAX_COUNT)) as u32),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Ok(MAX_COUNT),
            IntErrorKind::NegOverflow => Ok(MIN_COUNT),
            _ => Err(UsageError::InvalidCount),
        },
    }
}

/// Drop `_` separators; leading, trailing or doubled ones reject
fn strip_digit_separators(text: &str) -> Option<String> {
    let body = text.strip_prefix(['+', '-']).unwrap_or(text);
    if body.starts_with('_') || body.ends_with('_') || body.contains("__") {
        return None;
    }
    let sign = &text[..text.len() - body.len()];
    Some(format!("{sign}{}", body.replace('_', "")))
}

fn fullwidth_to_ascii(c: char) -> char {
    match c {
        '０'..='９' => char::from_u32(u32::from(c) - u32::from('０') + u32::from('0')).unwrap_or(c),
        '＋' => '+',
        '－' => '-',
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stock(secid: &str, count: u32) -> Option<Command> {
        Some(Command::Stock {
            secid: secid.to_string(),
            count,
        })
    }

    #[test]
    fn test_parse_box_office_exact_only() {
        assert_eq!(Command::parse("票房"), Ok(Some(Command::BoxOffice)));
        assert_eq!(Command::parse("  票房\n"), Ok(Some(Command::BoxOffice)));
        assert_eq!(Command::parse("票房 今天"), Ok(None));
        assert_eq!(Command::parse("今日票房"), Ok(None));
    }

    #[test]
    fn test_parse_stock_default_count() {
        assert_eq!(Command::parse("股票 600519"), Ok(stock("600519", 5)));
    }

    #[test]
    fn test_parse_stock_clamps_count() {
        assert_eq!(Command::parse("股票 600519 15"), Ok(stock("600519", 15)));
        assert_eq!(Command::parse("股票 600519 999"), Ok(stock("600519", 50)));
        assert_eq!(Command::parse("股票 600519 0"), Ok(stock("600519", 1)));
        assert_eq!(Command::parse("股票 600519 -7"), Ok(stock("600519", 1)));
        assert_eq!(
            Command::parse("股票 600519 99999999999999999999999"),
            Ok(stock("600519", 50))
        );
        assert_eq!(Command::parse("股票 600519 １０"), Ok(stock("600519", 10)));
    }

    #[test]
    fn test_parse_stock_invalid_count() {
        assert_eq!(
            Command::parse("股票 600519 abc"),
            Err(UsageError::InvalidCount)
        );
        assert_eq!(
            Command::parse("股票 600519 1.5"),
            Err(UsageError::InvalidCount)
        );
    }

    #[test]
    fn test_parse_stock_count_digit_separators() {
        assert_eq!(Command::parse("股票 600519 1_0"), Ok(stock("600519", 10)));
        assert_eq!(Command::parse("股票 600519 +2_0"), Ok(stock("600519", 20)));
        assert_eq!(Command::parse("股票 600519 1_0_0"), Ok(stock("600519", 50)));
        for raw in ["_10", "10_", "1__0", "-_1", "_"] {
            assert_eq!(
                Command::parse(&format!("股票 600519 {raw}")),
                Err(UsageError::InvalidCount),
                "{raw:?} should be rejected"
            );
        }
        // Only ASCII and full-width digits count
        assert_eq!(
            Command::parse("股票 600519 ٥"),
            Err(UsageError::InvalidCount)
        );
    }

    #[test]
    fn test_parse_stock_missing_code() {
        assert_eq!(Command::parse("股票"), Err(UsageError::MissingStockCode));
        assert_eq!(Command::parse("股票600519"), Err(UsageError::MissingStockCode));
    }

    #[test]
    fn test_parse_stock_keeps_code_case() {
        assert_eq!(Command::parse("股票 sh600519"), Ok(stock("sh600519", 5)));
        assert_eq!(Command::parse("股票 SH600519"), Ok(stock("SH600519", 5)));
    }

    #[test]
    fn test_parse_us_stock() {
        assert_eq!(
            Command::parse("美股 aapl"),
            Ok(Some(Command::UsStock {
                symbol: "AAPL".to_string()
            }))
        );
        assert_eq!(
            Command::parse("美股 brk.b extra"),
            Ok(Some(Command::UsStock {
                symbol: "BRK.B".to_string()
            }))
        );
        assert_eq!(Command::parse("美股"), Err(UsageError::MissingTicker));
    }

    #[test]
    fn test_parse_unrecognized() {
        for text in ["", "   ", "hello", "/analyze AAPL", "查股票 600519", "港股 0700"] {
            assert_eq!(Command::parse(text), Ok(None), "{text:?}");
        }
    }

    #[test]
    fn test_first_trigger_wins() {
        assert_eq!(Intent::detect("股票美股"), Some(Intent::Stock));
        assert_eq!(Intent::detect("美股股票"), Some(Intent::UsStock));
    }

    #[test]
    fn test_help_text_mentions_every_trigger() {
        let help = Command::help_text();
        assert!(help.contains("票房"));
        assert!(help.contains("股票 600519 10"));
        assert!(help.contains("美股 AAPL"));
    }
}
