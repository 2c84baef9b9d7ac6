//! Data retrieval bot
//!
//! Routes chat messages to the upstream APIs and turns the payloads into
//! reply text.
//!
//! # Example
//!
//! ```rust,ignore
//! use data_retrieval::bot::DataRetrievalBot;
//! use data_retrieval::RetrievalConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = RetrievalConfig::builder().with_env_api_token().build()?;
//!     let bot = DataRetrievalBot::from_config(config)?;
//!     if let Some(reply) = bot.handle_text("股票 600519 3").await {
//!         println!("{reply}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod commands;

use crate::api::{ApiClient, ApiResult, DataSource, QuerySpec};
use crate::config::RetrievalConfig;
use crate::error::Result;
use crate::format::{a_share, box_office, us_stock};
use crate::interface::{EventContext, InboundMessage};
use std::sync::Arc;

pub use commands::{Command, Intent};

/// Registration metadata reported to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluginInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub version: &'static str,
    /// Higher runs earlier
    pub priority: i32,
}

pub const PLUGIN_INFO: PluginInfo = PluginInfo {
    name: "DataRetrieval",
    description: "数据查询（支持票房和股票）",
    version: env!("CARGO_PKG_VERSION"),
    priority: 500,
};

/// Chat command handler for box-office and stock queries
pub struct DataRetrievalBot {
    config: RetrievalConfig,
    source: Arc<dyn DataSource>,
}

impl DataRetrievalBot {
    /// Create a bot that fetches through `source`
    pub fn new(config: RetrievalConfig, source: Arc<dyn DataSource>) -> Self {
        if !config.has_us_stock_token() {
            tracing::warn!("US stock API token not configured; 美股 queries will be rejected upstream");
        }
        tracing::info!("[{}] 插件初始化成功", PLUGIN_INFO.name);

        Self { config, source }
    }

    /// Create a bot backed by the HTTP [`ApiClient`]
    pub fn from_config(config: RetrievalConfig) -> Result<Self> {
        let client = ApiClient::new(&config)?;
        Ok(Self::new(config, Arc::new(client)))
    }

    pub fn info(&self) -> PluginInfo {
        PLUGIN_INFO
    }

    pub fn help_text(&self) -> &'static str {
        Command::help_text()
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    /// Handle one host event.
    ///
    /// For a recognized command exactly one reply is set and propagation is
    /// stopped. Anything else leaves the context untouched.
    pub async fn on_handle_context(&self, ctx: &mut EventContext) {
        if !ctx.message.is_text() {
            return;
        }

        let command = match Command::parse(&ctx.message.content) {
            Ok(Some(command)) => command,
            Ok(None) => return,
            Err(usage) => {
                tracing::debug!("rejected command arguments: {usage:?}");
                ctx.reply_and_break(usage.to_string());
                return;
            }
        };

        tracing::debug!(intent = command.intent().name(), "handling command");
        let reply = self.execute_command(command).await;
        ctx.reply_and_break(reply);
    }

    /// Handle plain text; `None` when the text is not a command
    pub async fn handle_text(&self, text: &str) -> Option<String> {
        let mut ctx = EventContext::new(InboundMessage::text(text));
        self.on_handle_context(&mut ctx).await;
        ctx.reply.map(|reply| reply.content)
    }

    /// Fetch and render the reply for a parsed command
    pub async fn execute_command(&self, command: Command) -> String {
        match command {
            Command::BoxOffice => {
                let result = self.source.fetch(QuerySpec::box_office()).await;
                tracing::debug!("Fetched box office data: {result:?}");
                box_office::render(&result.into_payload())
            }
            Command::Stock { secid, count } => {
                let result = self
                    .source
                    .fetch(QuerySpec::stock_history(&secid, count))
                    .await;
                a_share::render(&result.into_payload(), count as usize)
            }
            Command::UsStock { symbol } => {
                let query = QuerySpec::us_stock_quote(&self.config.us_stock_api_token, &symbol);
                match self.source.fetch(query).await {
                    ApiResult::Success(payload) => us_stock::render(&payload, &symbol),
                    ApiResult::Empty => us_stock::FETCH_FAILED.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Endpoint, MockDataSource};
    use crate::error::UsageError;
    use crate::interface::{ContentKind, EventAction};
    use serde_json::{Value, json};

    fn config() -> RetrievalConfig {
        RetrievalConfig::builder()
            .us_stock_api_token("test-token")
            .build()
            .unwrap()
    }

    fn success(value: Value) -> ApiResult {
        ApiResult::from_value(value)
    }

    fn bot_with(mock: MockDataSource) -> DataRetrievalBot {
        DataRetrievalBot::new(config(), Arc::new(mock))
    }

    fn no_network() -> DataRetrievalBot {
        let mut mock = MockDataSource::new();
        mock.expect_fetch().never();
        bot_with(mock)
    }

    #[tokio::test]
    async fn test_unrecognized_text_is_noop() {
        let bot = no_network();
        for text in ["你好", "hello", "票房排行", "", "/help"] {
            let mut ctx = EventContext::new(InboundMessage::text(text));
            let before = ctx.clone();
            bot.on_handle_context(&mut ctx).await;
            assert_eq!(ctx, before, "{text:?} should be ignored");
        }
    }

    #[tokio::test]
    async fn test_non_text_message_is_noop() {
        let bot = no_network();
        let mut ctx = EventContext::new(InboundMessage {
            kind: ContentKind::Image,
            content: "票房".to_string(),
        });
        bot.on_handle_context(&mut ctx).await;
        assert!(ctx.reply.is_none());
        assert_eq!(ctx.action, EventAction::Continue);
    }

    #[tokio::test]
    async fn test_usage_errors_skip_network() {
        let bot = no_network();

        assert_eq!(
            bot.handle_text("股票 600519 abc").await.as_deref(),
            Some("⚠️ 数量参数需为整数")
        );
        assert_eq!(
            bot.handle_text("股票").await,
            Some(UsageError::MissingStockCode.to_string())
        );
        assert_eq!(
            bot.handle_text("美股").await,
            Some(UsageError::MissingTicker.to_string())
        );
    }

    #[tokio::test]
    async fn test_usage_error_breaks_propagation() {
        let bot = no_network();
        let mut ctx = EventContext::new(InboundMessage::text("股票"));
        bot.on_handle_context(&mut ctx).await;
        assert!(ctx.is_handled());
        assert!(ctx.reply.is_some());
    }

    #[tokio::test]
    async fn test_stock_count_is_clamped_in_query() {
        let mut mock = MockDataSource::new();
        mock.expect_fetch()
            .withf(|query| {
                query.endpoint == Endpoint::StockData
                    && query.param("secid") == Some("600519")
                    && query.param("num") == Some("50")
            })
            .times(1)
            .returning(|_| ApiResult::Empty);
        let bot = bot_with(mock);

        let reply = bot.handle_text("股票 600519 999").await;
        assert_eq!(reply.as_deref(), Some(a_share::FETCH_FAILED));
    }

    #[tokio::test]
    async fn test_stock_success() {
        let mut mock = MockDataSource::new();
        mock.expect_fetch().times(1).returning(|_| {
            success(json!({
                "code": 200,
                "name": "贵州茅台",
                "secid": "1.600519",
                "data": [
                    {"time": "2025-01-03", "closing": "1500"},
                    {"time": "2025-01-02", "closing": "1490"},
                    {"time": "2025-01-01", "closing": "1480"}
                ]
            }))
        });
        let bot = bot_with(mock);

        let reply = bot.handle_text("股票 600519 2").await.unwrap();
        assert!(reply.starts_with("📊 贵州茅台 (1.600519) 近期数据"));
        assert_eq!(reply.matches("📅 ").count(), 2);
    }

    #[tokio::test]
    async fn test_box_office_failure_and_success() {
        let mut mock = MockDataSource::new();
        mock.expect_fetch()
            .withf(|query| query.endpoint == Endpoint::BoxOffice && query.params.is_empty())
            .times(1)
            .returning(|_| ApiResult::Empty);
        let bot = bot_with(mock);
        assert_eq!(
            bot.handle_text("票房").await.as_deref(),
            Some(box_office::FETCH_FAILED)
        );

        let mut mock = MockDataSource::new();
        mock.expect_fetch().times(1).returning(|_| {
            success(json!({
                "code": "200",
                "day": "2025-02-01",
                "Top_1": {"name": "哪吒之魔童闹海"}
            }))
        });
        let bot = bot_with(mock);
        let reply = bot.handle_text("票房").await.unwrap();
        assert!(reply.contains("🥇 No.1 哪吒之魔童闹海"));
    }

    #[tokio::test]
    async fn test_us_stock_routes_token_and_symbol() {
        let mut mock = MockDataSource::new();
        mock.expect_fetch()
            .withf(|query| {
                query.endpoint == Endpoint::UsStockQuote
                    && query.param("api_token") == Some("test-token")
                    && query.param("symbols") == Some("AAPL")
            })
            .times(1)
            .returning(|_| success(json!({"data": {"AAPL": {"price": 227.5}}})));
        let bot = bot_with(mock);

        let reply = bot.handle_text("美股 aapl").await.unwrap();
        assert!(reply.starts_with("📊 AAPL (AAPL)\n"));
        assert!(reply.contains("最新价格：227.5 USD"));
    }

    #[tokio::test]
    async fn test_us_stock_failure_vs_not_found() {
        let mut mock = MockDataSource::new();
        mock.expect_fetch().times(1).returning(|_| ApiResult::Empty);
        let bot = bot_with(mock);
        assert_eq!(
            bot.handle_text("美股 AAPL").await.as_deref(),
            Some(us_stock::FETCH_FAILED)
        );

        let mut mock = MockDataSource::new();
        mock.expect_fetch()
            .times(1)
            .returning(|_| success(json!({"data": {}})));
        let bot = bot_with(mock);
        assert_eq!(
            bot.handle_text("美股 AAPL").await.as_deref(),
            Some(us_stock::NOT_FOUND)
        );
    }

    #[test]
    fn test_plugin_info() {
        let bot = no_network();
        assert_eq!(bot.info().name, "DataRetrieval");
        assert_eq!(bot.info().priority, 500);
        assert!(bot.help_text().contains("【股票查询】"));
    }

    #[test]
    fn test_handle_text_blocking() {
        let bot = no_network();
        let reply = tokio_test::block_on(bot.handle_text("今天天气"));
        assert!(reply.is_none());
    }
}
