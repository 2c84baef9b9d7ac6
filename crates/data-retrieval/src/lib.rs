//! Financial data retrieval plugin for chat bots
//!
//! Answers three chat commands by querying third-party APIs and replying with
//! formatted text:
//!
//! - `票房`: today's box-office leaderboard
//! - `股票 <code> [count]`: recent A-share daily history (count 1-50, default 5)
//! - `美股 <ticker>`: US-stock real-time quote
//!
//! # Architecture
//!
//! - [`bot::DataRetrievalBot`] parses the message and dispatches it
//! - [`api::DataSource`] performs the upstream call; [`api::ApiClient`] is the
//!   reqwest implementation and reports every failure as [`api::ApiResult::Empty`]
//! - [`format`] holds one pure formatter per upstream payload
//!
//! Messages that match no trigger are left alone so other handlers can take them.

pub mod api;
pub mod bot;
pub mod config;
pub mod error;
pub mod format;
pub mod interface;

pub use api::{ApiClient, ApiResult, DataSource, Endpoint, QuerySpec};
pub use bot::{Command, DataRetrievalBot, Intent, PLUGIN_INFO, PluginInfo};
pub use config::{EndpointTable, RetrievalConfig};
pub use error::{Result, RetrievalError, UsageError};
pub use interface::{EventAction, EventContext, InboundMessage, Reply};
