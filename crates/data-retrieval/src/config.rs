//! Configuration for the retrieval plugin

use crate::api::Endpoint;
use crate::error::{Result, RetrievalError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Environment variable holding the US-stock API token
pub const US_STOCK_TOKEN_ENV: &str = "US_STOCK_API_TOKEN";

const DEFAULT_BOX_OFFICE_URL: &str = "http://shanhe.kim/api/za/piaofang.php";
const DEFAULT_STOCK_DATA_URL: &str = "https://api.pearktrue.cn/api/stock/";
const DEFAULT_US_STOCK_QUOTE_URL: &str = "https://api.stockdata.org/v1/data/quote";

/// Fixed upstream URL for each endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointTable {
    pub box_office: String,
    pub stock_data: String,
    pub us_stock_quote: String,
}

impl Default for EndpointTable {
    fn default() -> Self {
        Self {
            box_office: DEFAULT_BOX_OFFICE_URL.to_string(),
            stock_data: DEFAULT_STOCK_DATA_URL.to_string(),
            us_stock_quote: DEFAULT_US_STOCK_QUOTE_URL.to_string(),
        }
    }
}

impl EndpointTable {
    /// Look up the URL for an endpoint
    pub fn url(&self, endpoint: Endpoint) -> &str {
        match endpoint {
            Endpoint::BoxOffice => &self.box_office,
            Endpoint::StockData => &self.stock_data,
            Endpoint::UsStockQuote => &self.us_stock_quote,
        }
    }

    /// Point every endpoint at `base` followed by the default URL's path.
    ///
    /// Used to redirect all traffic to a local server.
    pub fn rebased(base: &str) -> Result<Self> {
        let base = Url::parse(base)?;
        let defaults = Self::default();
        let rebase = |original: &str| -> Result<String> {
            let path = Url::parse(original)?.path().to_string();
            Ok(base.join(&path)?.to_string())
        };

        Ok(Self {
            box_office: rebase(&defaults.box_office)?,
            stock_data: rebase(&defaults.stock_data)?,
            us_stock_quote: rebase(&defaults.us_stock_quote)?,
        })
    }
}

/// Configuration for the retrieval plugin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Upstream endpoint URLs
    pub endpoints: EndpointTable,

    /// stockdata.org API token; empty means unset
    pub us_stock_api_token: String,

    /// Timeout applied to every upstream request
    pub request_timeout: Duration,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            endpoints: EndpointTable::default(),
            us_stock_api_token: String::new(),
            request_timeout: Duration::from_secs(15),
        }
    }
}

/// On-disk shape of the plugin config file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    us_stock_api_token: Option<String>,
    request_timeout_secs: Option<u64>,
    endpoints: Option<EndpointTable>,
}

impl RetrievalConfig {
    /// Create a new configuration builder
    pub fn builder() -> RetrievalConfigBuilder {
        RetrievalConfigBuilder::default()
    }

    /// Load configuration from a JSON config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&raw)
    }

    /// Parse configuration from the JSON config file format
    pub fn from_json(raw: &str) -> Result<Self> {
        let file: ConfigFile = serde_json::from_str(raw)?;

        let mut builder = Self::builder();
        if let Some(token) = file.us_stock_api_token {
            builder = builder.us_stock_api_token(token);
        }
        if let Some(secs) = file.request_timeout_secs {
            builder = builder.request_timeout(Duration::from_secs(secs));
        }
        if let Some(endpoints) = file.endpoints {
            builder = builder.endpoints(endpoints);
        }
        builder.build()
    }

    /// Load from an optional config file, then let `US_STOCK_API_TOKEN`
    /// override the file's token
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_token(std::env::var(US_STOCK_TOKEN_ENV).ok());
        config.validate()?;
        Ok(config)
    }

    /// Replace the US-stock token when one is given
    pub fn apply_token(&mut self, token: Option<String>) {
        if let Some(token) = token {
            self.us_stock_api_token = token;
        }
    }

    /// Whether a US-stock token is configured
    pub fn has_us_stock_token(&self) -> bool {
        !self.us_stock_api_token.trim().is_empty()
    }

    /// Validate the configuration
    ///
    /// A missing token is accepted; the upstream rejects such requests.
    pub fn validate(&self) -> Result<()> {
        for endpoint in Endpoint::ALL {
            let raw = self.endpoints.url(endpoint);
            let url = Url::parse(raw)?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(RetrievalError::Config(format!(
                    "endpoint {} must use http or https, got {raw}",
                    endpoint.id()
                )));
            }
        }

        if self.request_timeout.is_zero() {
            return Err(RetrievalError::Config(
                "request_timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for RetrievalConfig
#[derive(Debug, Default)]
pub struct RetrievalConfigBuilder {
    endpoints: Option<EndpointTable>,
    us_stock_api_token: Option<String>,
    request_timeout: Option<Duration>,
}

impl RetrievalConfigBuilder {
    /// Override the endpoint table
    pub fn endpoints(mut self, endpoints: EndpointTable) -> Self {
        self.endpoints = Some(endpoints);
        self
    }

    /// Set the US-stock API token
    pub fn us_stock_api_token(mut self, token: impl Into<String>) -> Self {
        self.us_stock_api_token = Some(token.into());
        self
    }

    /// Set request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Load the US-stock API token from `US_STOCK_API_TOKEN` if set
    pub fn with_env_api_token(mut self) -> Self {
        if let Ok(token) = std::env::var(US_STOCK_TOKEN_ENV) {
            self.us_stock_api_token = Some(token);
        }
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<RetrievalConfig> {
        let defaults = RetrievalConfig::default();

        let config = RetrievalConfig {
            endpoints: self.endpoints.unwrap_or(defaults.endpoints),
            us_stock_api_token: self
                .us_stock_api_token
                .unwrap_or(defaults.us_stock_api_token),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
        };

        config.validate()?;
        Ok(config)
    }
}
