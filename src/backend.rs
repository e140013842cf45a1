//! The remote generative service as seen by the executor and materializer.

use async_trait::async_trait;

use crate::error::Result;
use crate::gemini::types::{
    GenerateContentRequest, GenerateContentResponse, GenerateVideosRequest, Operation,
};

/// Remote calls needed to produce an artifact
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Single request/response generation
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse>;

    /// Start a long-running video generation
    async fn generate_videos(&self, model: &str, request: &GenerateVideosRequest)
    -> Result<Operation>;

    /// Re-fetch a long-running operation by name
    async fn get_operation(&self, name: &str) -> Result<Operation>;

    /// Fetch the bytes behind a remote artifact URI
    async fn download(&self, uri: &str) -> Result<Vec<u8>>;
}
