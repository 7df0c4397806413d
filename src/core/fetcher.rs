use crate::core::{Category, ConfigProvider, FetchOutcome};
use crate::utils::error::{EtlError, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

/// Search response envelope. Only `results` is read; a missing array means zero results.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<Value>,
}

/// HTTP client for the marketplace search endpoint.
#[derive(Debug, Clone)]
pub struct MarketplaceClient {
    client: Client,
    endpoint: String,
    limit: usize,
}

impl MarketplaceClient {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let mut headers = HeaderMap::new();
        for (key, value) in config.request_headers() {
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
                EtlError::InvalidConfigValueError {
                    field: "source.headers".to_string(),
                    value: key.clone(),
                    reason: format!("Invalid header name: {}", e),
                }
            })?;
            let value =
                HeaderValue::from_str(value).map_err(|e| EtlError::InvalidConfigValueError {
                    field: format!("source.headers.{}", key),
                    value: value.clone(),
                    reason: format!("Invalid header value: {}", e),
                })?;
            headers.insert(name, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_seconds()))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.api_endpoint().to_string(),
            limit: config.result_limit(),
        })
    }

    /// Queries one category. Every error is logged and reported as [`FetchOutcome::Failed`].
    pub async fn search(&self, category: &Category) -> FetchOutcome {
        tracing::info!("⬇️  Downloading listings for {}...", category.name);

        match self.fetch_results(&category.query).await {
            Ok(results) => {
                tracing::info!("✅ {}: {} listings fetched", category.name, results.len());
                FetchOutcome::Listings(results)
            }
            Err(e) => {
                tracing::error!("❌ Failed to fetch {}: {}", category.name, e);
                FetchOutcome::Failed
            }
        }
    }

    async fn fetch_results(&self, query: &str) -> Result<Vec<Value>> {
        tracing::debug!(
            "Making API request to: {} (q={}, limit={})",
            self.endpoint,
            query,
            self.limit
        );

        let limit = self.limit.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("q", query), ("limit", limit.as_str())])
            .send()
            .await?
            .error_for_status()?;

        tracing::debug!("API response status: {}", response.status());

        let body = response.bytes().await?;
        let parsed: SearchResponse = serde_json::from_slice(&body)?;
        Ok(parsed.results)
    }
}
