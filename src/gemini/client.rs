//! Client implementation for the Gemini API
//!
//! This module provides the main client interface and its
//! [`GenerativeBackend`] implementation.

use async_trait::async_trait;

use crate::backend::GenerativeBackend;
use crate::error::Result;
use crate::gemini::http::HttpClient;
use crate::gemini::models::ModelsService;
use crate::gemini::types::{
    GenerateContentRequest, GenerateContentResponse, GenerateVideosRequest, HttpOptions, Operation,
};

/// Client for the Gemini API
#[derive(Clone)]
pub struct Client {
    http_client: HttpClient,
}

impl Client {
    /// Create a new client with an API key
    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self> {
        let http_client = HttpClient::with_api_key(api_key.into())?;
        Ok(Self { http_client })
    }

    /// Create a new client with custom HTTP options
    pub fn with_options(api_key: impl Into<String>, options: HttpOptions) -> Result<Self> {
        let http_client = HttpClient::with_api_key_and_options(api_key.into(), options)?;
        Ok(Self { http_client })
    }

    /// Access the models service
    pub fn models(&self) -> ModelsService {
        ModelsService::new(self.http_client.clone())
    }
}

#[async_trait]
impl GenerativeBackend for Client {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        self.models().generate_content(model, request).await
    }

    async fn generate_videos(
        &self,
        model: &str,
        request: &GenerateVideosRequest,
    ) -> Result<Operation> {
        self.models().generate_videos(model, request).await
    }

    async fn get_operation(&self, name: &str) -> Result<Operation> {
        self.models().get_operation(name).await
    }

    async fn download(&self, uri: &str) -> Result<Vec<u8>> {
        self.http_client.download(uri).await
    }
}
