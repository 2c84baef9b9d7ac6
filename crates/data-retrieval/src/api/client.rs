//! HTTP client for the upstream data APIs

use super::{ApiResult, DataSource, QuerySpec};
use crate::config::{EndpointTable, RetrievalConfig};
use crate::error::{Result, RetrievalError};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

/// reqwest-backed [`DataSource`]
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    endpoints: EndpointTable,
}

impl ApiClient {
    /// Create a client with the configured endpoints and timeout
    pub fn new(config: &RetrievalConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            endpoints: config.endpoints.clone(),
        })
    }

    /// Endpoint table this client sends requests to
    pub fn endpoints(&self) -> &EndpointTable {
        &self.endpoints
    }

    async fn request(&self, query: &QuerySpec) -> Result<Value> {
        let url = self.endpoints.url(query.endpoint);

        let response = self
            .client
            .get(url)
            .query(&query.params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RetrievalError::Other(format!(
                "{} returned HTTP {status}",
                query.endpoint.id()
            )));
        }

        Ok(response.json::<Value>().await?)
    }
}

#[async_trait]
impl DataSource for ApiClient {
    async fn fetch(&self, query: QuerySpec) -> ApiResult {
        match self.request(&query).await {
            Ok(value) => {
                let result = ApiResult::from_value(value);
                if !result.is_success() {
                    tracing::error!(
                        endpoint = query.endpoint.id(),
                        "API请求失败: response body is not a JSON object"
                    );
                }
                result
            }
            Err(e) => {
                tracing::error!(endpoint = query.endpoint.id(), "API请求失败: {e}");
                ApiResult::Empty
            }
        }
    }
}
