//! Models service for the Gemini API
//!
//! Content generation and long-running video generation operations.

use crate::error::Result;
use crate::gemini::http::HttpClient;
use crate::gemini::types::{
    GenerateContentRequest, GenerateContentResponse, GenerateVideosRequest, Operation,
};
use tracing::{debug, instrument};

/// Service for interacting with Gemini models
#[derive(Clone)]
pub struct ModelsService {
    /// HTTP client for making API requests
    http_client: HttpClient,
}

impl ModelsService {
    /// Create a new models service
    pub(crate) fn new(http_client: HttpClient) -> Self {
        Self { http_client }
    }

    /// Generate content from a model
    #[instrument(skip(self, request), level = "debug")]
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let path = format!("models/{}:generateContent", model);

        debug!("Generating content from model {}", model);
        self.http_client.post(&path, request).await
    }

    /// Start a video generation and return its operation handle
    #[instrument(skip(self, request), level = "debug")]
    pub async fn generate_videos(
        &self,
        model: &str,
        request: &GenerateVideosRequest,
    ) -> Result<Operation> {
        let path = format!("models/{}:predictLongRunning", model);

        debug!("Starting video generation with model {}", model);
        self.http_client.post(&path, request).await
    }

    /// Fetch the current state of an operation
    #[instrument(skip(self), level = "debug")]
    pub async fn get_operation(&self, name: &str) -> Result<Operation> {
        self.http_client.get(name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemini::types::{VideoInstance, VideoParameters};
    use mockito::Server;

    fn service_for(server: &Server) -> ModelsService {
        let mut http = HttpClient::with_api_key("test-key".to_string()).unwrap();
        http.set_base_url(server.url());
        ModelsService::new(http)
    }

    #[tokio::test]
    async fn test_generate_content_path() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1beta/models/gemini-3-pro-preview:generateContent")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"candidates": [{"content": {"parts": [{"text": "{}"}]}}]}"#)
            .expect(1)
            .create_async()
            .await;

        let service = service_for(&server);
        let response = service
            .generate_content(
                "gemini-3-pro-preview",
                &GenerateContentRequest::from_prompt("hi"),
            )
            .await
            .unwrap();
        assert_eq!(response.text(), "{}");

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_video_operation_round_trip() {
        let mut server = Server::new_async().await;
        let start = server
            .mock("POST", "/v1beta/models/veo-2.0-generate-001:predictLongRunning")
            .match_query(mockito::Matcher::Any)
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "instances": [{"prompt": "waves"}],
                "parameters": {"durationSeconds": 5}
            })))
            .with_status(200)
            .with_body(r#"{"name": "models/veo-2.0-generate-001/operations/op1"}"#)
            .expect(1)
            .create_async()
            .await;
        let poll = server
            .mock("GET", "/v1beta/models/veo-2.0-generate-001/operations/op1")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"name": "models/veo-2.0-generate-001/operations/op1", "done": true}"#)
            .expect(1)
            .create_async()
            .await;

        let service = service_for(&server);
        let request = GenerateVideosRequest {
            instances: vec![VideoInstance {
                prompt: Some("waves".to_string()),
                image: None,
            }],
            parameters: VideoParameters {
                aspect_ratio: Some("16:9".to_string()),
                duration_seconds: Some(5),
            },
        };
        let op = service
            .generate_videos("veo-2.0-generate-001", &request)
            .await
            .unwrap();
        assert!(!op.done);

        let op = service.get_operation(&op.name).await.unwrap();
        assert!(op.done);

        start.assert_async().await;
        poll.assert_async().await;
    }
}
