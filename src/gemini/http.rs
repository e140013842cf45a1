//! HTTP client implementation for the Gemini API
//!
//! Handles authentication, URL construction, status mapping and response
//! parsing. Quota control and retries live above this layer, in the
//! request log, the rate limiter and the generation executor.

use crate::error::{Error, Result};
use crate::gemini::types::HttpOptions;
use reqwest::{Client as ReqwestClient, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, instrument};
use url::Url;

/// Default timeout for HTTP requests in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// HTTP client for making requests to the Gemini API
#[derive(Clone)]
pub struct HttpClient {
    /// The underlying reqwest client
    client: ReqwestClient,

    /// Base URL for API requests
    base_url: String,

    /// API key for authentication
    api_key: String,

    /// API version
    api_version: String,
}

#[cfg(test)]
impl HttpClient {
    /// Set the base URL (for testing only)
    pub fn set_base_url(&mut self, url: String) {
        self.base_url = url;
    }
}

impl HttpClient {
    /// Create a new HTTP client with an API key
    pub fn with_api_key(api_key: String) -> Result<Self> {
        Self::with_api_key_and_options(api_key, HttpOptions::default())
    }

    /// Create a new HTTP client with an API key and custom options
    pub fn with_api_key_and_options(api_key: String, options: HttpOptions) -> Result<Self> {
        let client = ReqwestClient::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: options.base_url.trim_end_matches('/').to_string(),
            api_key,
            api_version: options.api_version,
        })
    }

    /// Build a URL for an API path
    fn build_url(&self, path: &str) -> Result<Url> {
        let url = format!("{}/{}/{}", self.base_url, self.api_version, path);
        Url::parse(&url).map_err(|e| Error::Other(format!("Invalid URL: {}", e)))
    }

    /// Prepare a GET request
    #[instrument(skip(self), level = "debug")]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.build_url(path)?;
        let request = self.client.get(url).query(&[("key", &self.api_key)]);

        debug!("Sending GET request to {}", path);
        self.execute_request(request).await
    }

    /// Prepare a POST request with a JSON body
    #[instrument(skip(self, body), level = "debug")]
    pub async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let url = self.build_url(path)?;
        let request = self
            .client
            .post(url)
            .json(body)
            .query(&[("key", &self.api_key)]);

        debug!("Sending POST request to {}", path);
        self.execute_request(request).await
    }

    /// Download the raw bytes behind an absolute URI returned by the API
    #[instrument(skip(self), level = "debug")]
    pub async fn download(&self, uri: &str) -> Result<Vec<u8>> {
        let url = Url::parse(uri).map_err(|e| Error::Other(format!("Invalid URL: {}", e)))?;
        let response = self
            .client
            .get(url)
            .query(&[("key", &self.api_key)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let response_text = response.text().await?;
            return Err(map_status(status, response_text));
        }

        let bytes = response.bytes().await?;
        debug!("Downloaded {} bytes", bytes.len());
        Ok(bytes.to_vec())
    }

    /// Execute an HTTP request and handle the response
    async fn execute_request<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;

        let status = response.status();
        let response_text = response.text().await?;

        if status.is_success() {
            serde_json::from_str(&response_text).map_err(|e| {
                error!("Failed to parse response: {}", e);
                Error::UnexpectedResponse(format!("Failed to parse response: {}", e))
            })
        } else {
            Err(map_status(status, response_text))
        }
    }
}

fn map_status(status: StatusCode, response_text: String) -> Error {
    error!("API error: {} - {}", status, response_text);

    if status == StatusCode::TOO_MANY_REQUESTS {
        Error::RateLimit {
            retry_after_secs: 60,
        }
    } else if status == StatusCode::UNAUTHORIZED {
        Error::Auth("Invalid API key or credentials".to_string())
    } else {
        Error::Api {
            status_code: status.as_u16(),
            message: response_text,
        }
    }
}
