//! Upstream API access
//!
//! Every upstream call is a single GET. Failures never propagate: callers get
//! [`ApiResult::Empty`] and pick the reply text themselves.

pub mod client;

use async_trait::async_trait;
use serde_json::{Map, Value};

pub use client::ApiClient;

/// Upstream endpoint identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Daily box-office leaderboard (no auth)
    BoxOffice,
    /// A-share daily history
    StockData,
    /// US-stock real-time quote (token required)
    UsStockQuote,
}

impl Endpoint {
    /// All endpoints, in dispatch priority order
    pub const ALL: [Endpoint; 3] = [
        Endpoint::BoxOffice,
        Endpoint::StockData,
        Endpoint::UsStockQuote,
    ];

    /// Stable identifier used in logs and config keys
    pub fn id(self) -> &'static str {
        match self {
            Endpoint::BoxOffice => "box_office",
            Endpoint::StockData => "stock_data",
            Endpoint::UsStockQuote => "us_stock_quote",
        }
    }
}

/// One upstream request: endpoint plus query parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    pub endpoint: Endpoint,
    pub params: Vec<(String, String)>,
}

impl QuerySpec {
    /// Box-office leaderboard, no parameters
    pub fn box_office() -> Self {
        Self {
            endpoint: Endpoint::BoxOffice,
            params: Vec::new(),
        }
    }

    /// A-share history for `secid`, `count` most recent records
    pub fn stock_history(secid: &str, count: u32) -> Self {
        Self {
            endpoint: Endpoint::StockData,
            params: vec![
                ("secid".to_string(), secid.to_string()),
                ("num".to_string(), count.to_string()),
            ],
        }
    }

    /// US-stock quote keyed by ticker
    pub fn us_stock_quote(api_token: &str, symbol: &str) -> Self {
        Self {
            endpoint: Endpoint::UsStockQuote,
            params: vec![
                ("api_token".to_string(), api_token.to_string()),
                ("symbols".to_string(), symbol.to_string()),
                ("extended_hours".to_string(), "false".to_string()),
                ("key_by_ticker".to_string(), "true".to_string()),
            ],
        }
    }

    /// Value of a query parameter
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Outcome of an upstream call
///
/// Timeouts, HTTP errors and undecodable bodies all collapse into `Empty`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ApiResult {
    /// Decoded JSON object
    Success(Map<String, Value>),
    /// Any failure
    #[default]
    Empty,
}

impl ApiResult {
    /// Build a result from a decoded body; only JSON objects count as success
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => ApiResult::Success(map),
            _ => ApiResult::Empty,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ApiResult::Success(_))
    }

    /// Borrow the payload, if any
    pub fn payload(&self) -> Option<&Map<String, Value>> {
        match self {
            ApiResult::Success(map) => Some(map),
            ApiResult::Empty => None,
        }
    }

    /// Take the payload; an empty result yields an empty map
    pub fn into_payload(self) -> Map<String, Value> {
        match self {
            ApiResult::Success(map) => map,
            ApiResult::Empty => Map::new(),
        }
    }
}

/// Source of upstream payloads
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Perform the request described by `query`
    async fn fetch(&self, query: QuerySpec) -> ApiResult;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_spec_params() {
        let query = QuerySpec::stock_history("600519", 15);
        assert_eq!(query.endpoint, Endpoint::StockData);
        assert_eq!(query.param("secid"), Some("600519"));
        assert_eq!(query.param("num"), Some("15"));

        let query = QuerySpec::us_stock_quote("tok", "AAPL");
        assert_eq!(query.param("api_token"), Some("tok"));
        assert_eq!(query.param("symbols"), Some("AAPL"));
        assert_eq!(query.param("extended_hours"), Some("false"));
        assert_eq!(query.param("key_by_ticker"), Some("true"));

        assert!(QuerySpec::box_office().params.is_empty());
    }

    #[test]
    fn test_api_result_from_value() {
        let result = ApiResult::from_value(json!({"code": "200"}));
        assert!(result.is_success());
        assert_eq!(result.payload().unwrap()["code"], "200");

        assert_eq!(ApiResult::from_value(json!([1, 2, 3])), ApiResult::Empty);
        assert_eq!(ApiResult::from_value(Value::Null), ApiResult::Empty);
        assert!(ApiResult::Empty.into_payload().is_empty());
    }

    #[test]
    fn test_endpoint_ids() {
        let ids: Vec<_> = Endpoint::ALL.iter().map(|e| e.id()).collect();
        assert_eq!(ids, ["box_office", "stock_data", "us_stock_quote"]);
    }
}
