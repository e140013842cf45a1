//! Type definitions for the Gemini REST API
//!
//! Request and response bodies for content generation and for long-running
//! video generation operations.

use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::wal::TokenUsage;

/// Content represents a piece of content that can be processed by the model.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    /// The role of the content (e.g., "user", "model")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// The parts that make up this content
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// Create a new empty content
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the role for this content
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Add text to this content
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.parts.push(Part {
            text: Some(text.into()),
            inline_data: None,
        });
        self
    }
}

/// A part of content: text or inline binary data
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<Blob>,
}

/// Base64-encoded inline data
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blob {
    /// MIME type of the data
    #[serde(default)]
    pub mime_type: String,

    /// Base64-encoded bytes
    #[serde(default)]
    pub data: String,
}

/// Generation configuration for content generation
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// MIME type the model must answer with
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,

    /// OpenAPI-style schema of the answer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
}

impl GenerationConfig {
    /// Configuration forcing a JSON answer shaped like a generated file
    pub fn file_result_schema() -> Self {
        Self {
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(serde_json::json!({
                "type": "OBJECT",
                "properties": {
                    "filePath": {
                        "type": "STRING",
                        "description": "The output file path"
                    },
                    "data": {
                        "type": "STRING",
                        "description": "The complete generated file content without any omissions"
                    },
                    "mime": {
                        "type": "STRING",
                        "description": "The MIME type of the generated file"
                    },
                    "check": {
                        "type": "BOOLEAN",
                        "description": concat!(
                            "true if the prompt instructions were followed, ",
                            "false otherwise"
                        )
                    }
                },
                "required": ["filePath", "data", "mime", "check"]
            })),
        }
    }
}

/// Request for generating content
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// The contents to generate from
    pub contents: Vec<Content>,

    /// Generation configuration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// A single user turn holding `prompt`
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content::new().with_role("user").with_text(prompt)],
            generation_config: None,
        }
    }

    /// Attach a generation configuration
    pub fn with_config(mut self, config: GenerationConfig) -> Self {
        self.generation_config = Some(config);
        self
    }
}

/// Response from content generation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    /// The generated candidates
    #[serde(default)]
    pub candidates: Vec<Candidate>,

    /// Token accounting for the call
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_metadata: Option<UsageMetadata>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }

    /// First inline data part across all candidates
    pub fn first_inline_data(&self) -> Option<&Blob> {
        self.candidates
            .iter()
            .filter_map(|c| c.content.as_ref())
            .flat_map(|content| content.parts.iter())
            .find_map(|p| p.inline_data.as_ref())
    }
}

/// A candidate response from the model
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// The content of the candidate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,

    /// Finish reason
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Token counts reported for a call
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_token_count: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidates_token_count: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_token_count: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cached_content_token_count: Option<u64>,
}

impl From<UsageMetadata> for TokenUsage {
    fn from(usage: UsageMetadata) -> Self {
        TokenUsage {
            prompt: usage.prompt_token_count,
            candidates: usage.candidates_token_count,
            total: usage.total_token_count,
            cached: usage.cached_content_token_count,
        }
    }
}

/// Reference image for image-to-video generation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoImage {
    pub bytes_base64_encoded: String,
    pub mime_type: String,
}

impl VideoImage {
    /// Encode raw image bytes
    pub fn from_bytes(bytes: &[u8], mime_type: impl Into<String>) -> Self {
        Self {
            bytes_base64_encoded: base64::engine::general_purpose::STANDARD.encode(bytes),
            mime_type: mime_type.into(),
        }
    }
}

/// One video generation instance
#[derive(Debug, Clone, Default, Serialize)]
pub struct VideoInstance {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<VideoImage>,
}

/// Video generation parameters
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<u32>,
}

/// Request for a long-running video generation
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerateVideosRequest {
    pub instances: Vec<VideoInstance>,
    pub parameters: VideoParameters,
}

/// Handle of a long-running operation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Operation {
    /// Resource name used to poll the operation
    #[serde(default)]
    pub name: String,

    /// Whether the operation has finished
    #[serde(default)]
    pub done: bool,

    /// Error object, set when the operation failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<serde_json::Value>,

    /// Result body, set when the operation succeeded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<OperationResponse>,
}

/// Body of a finished video operation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generate_video_response: Option<GenerateVideoResponse>,
}

/// Generated samples and safety filtering details
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateVideoResponse {
    #[serde(default)]
    pub generated_samples: Vec<GeneratedSample>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rai_media_filtered_count: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rai_media_filtered_reasons: Option<Vec<String>>,
}

/// One generated artifact
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratedSample {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<VideoFile>,
}

/// Remote video reference
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

/// HTTP options for client configuration
#[derive(Debug, Clone)]
pub struct HttpOptions {
    /// Base URL of the API
    pub base_url: String,

    /// API version
    pub api_version: String,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            api_version: "v1beta".to_string(),
        }
    }
}
