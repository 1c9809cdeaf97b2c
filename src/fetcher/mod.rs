//! HTTP fetcher for the Tian content API
//!
//! One fetch routine serves every category: the category supplies its
//! endpoint path and extra query parameters, the fetcher supplies the shared
//! client, API key and timeout. [`TianFetcher::fetch_raw`] surfaces the full
//! [`FetchError`] taxonomy, including provider status codes (rate limit,
//! invalid key, other) mapped to error variants. The public [`fetch`] wraps
//! it and absorbs every failure mode into `None` — nothing above this
//! boundary handles errors, only the absence of data.
//!
//! [`fetch`]: TianFetcher::fetch

use reqwest::Client;
use std::time::Duration;
use url::Url;

use crate::config::ProviderConfig;
use crate::error::FetchError;
use crate::models::{
    ApiResponse, Category, CategoryPayload, CODE_INVALID_KEY, CODE_RATE_LIMIT, CODE_SUCCESS,
};

/// Tian API fetcher with provider status classification
pub struct TianFetcher {
    /// HTTP client with configured timeout and compression
    client: Client,

    /// API key appended to every request
    api_key: String,

    /// Provider host, overridable for mock-server tests
    base_url: String,
}

impl TianFetcher {
    /// Create a new fetcher from provider configuration
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn new(config: &ProviderConfig) -> Result<Self, FetchError> {
        Self::with_timeout(config, Duration::from_secs(config.request_timeout_secs))
    }

    /// Create a new fetcher with an explicit timeout
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn with_timeout(config: &ProviderConfig, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(timeout).gzip(true).build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a fetcher pointed at a custom base URL for testing
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn with_base_url(base_url: &str, api_key: &str) -> Result<Self, FetchError> {
        let config = ProviderConfig {
            api_key: api_key.to_string(),
            base_url: base_url.to_string(),
            request_timeout_secs: 15,
        };
        Self::new(&config)
    }

    /// Fetch one category, absorbing every failure into `None`
    ///
    /// Log severity follows the error: rate limit is transient and logged as
    /// a warning; an invalid key is persistent and logged as an error, as are
    /// other provider codes and transport failures.
    pub async fn fetch(&self, category: Category) -> Option<CategoryPayload> {
        match self.fetch_raw(category).await {
            Ok(payload) => {
                tracing::debug!(category = %category, "API响应成功");
                Some(payload)
            }
            Err(FetchError::RateLimit) => {
                tracing::warn!(category = %category, "API调用频率超限，请稍后再试");
                None
            }
            Err(FetchError::InvalidKey(msg)) => {
                tracing::error!(category = %category, msg = %msg, "API密钥错误");
                None
            }
            Err(FetchError::Provider { code, msg }) => {
                tracing::error!(category = %category, code = %code, msg = %msg, "API返回错误");
                None
            }
            Err(e) => {
                tracing::error!(
                    category = %category,
                    error = %e,
                    kind = ?e.category(),
                    recoverable = %e.is_recoverable(),
                    "获取API数据时出错"
                );
                None
            }
        }
    }

    /// Perform the request, decode the body and classify the provider code
    ///
    /// # Errors
    ///
    /// Returns a `FetchError` for transport failures, non-200 HTTP statuses,
    /// timeouts, malformed bodies, and provider-level error codes
    /// (`RateLimit` for 130, `InvalidKey` for 100, `Provider` otherwise)
    pub async fn fetch_raw(&self, category: Category) -> Result<CategoryPayload, FetchError> {
        let url = self.build_url(category)?;

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout
            } else {
                FetchError::Http(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::ServerError(status.as_u16()));
        }

        let body = response
            .json::<ApiResponse>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))?;

        Self::classify(body)
    }

    fn classify(response: ApiResponse) -> Result<CategoryPayload, FetchError> {
        match response.code {
            CODE_SUCCESS => Ok(CategoryPayload::from_response(response)),
            CODE_RATE_LIMIT => Err(FetchError::RateLimit),
            CODE_INVALID_KEY => Err(FetchError::InvalidKey(
                response.msg.unwrap_or_else(|| String::from("未知错误")),
            )),
            code => Err(FetchError::Provider {
                code,
                msg: response.msg.unwrap_or_else(|| String::from("未知错误")),
            }),
        }
    }

    fn build_url(&self, category: Category) -> Result<Url, FetchError> {
        let raw = format!("{}/{}", self.base_url, category.endpoint_path());
        let mut url = Url::parse(&raw).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("key", &self.api_key);
            for (name, value) in category.query_params() {
                pairs.append_pair(name, value);
            }
        }

        Ok(url)
    }
}
