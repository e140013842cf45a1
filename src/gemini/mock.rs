//! # Scripted Backend for Testing
//!
//! Provides a `MockBackend` that implements [`GenerativeBackend`] from queued
//! responses, so executor and pipeline tests run without network access.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::backend::GenerativeBackend;
use crate::error::{Error, Result};
use crate::gemini::types::{
    Blob, Candidate, Content, GenerateContentRequest, GenerateContentResponse,
    GenerateVideosRequest, Operation, Part,
};

/// Call counters recorded by the mock
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Calls {
    pub content: usize,
    pub videos: usize,
    pub polls: usize,
    pub downloads: usize,
}

#[derive(Default)]
pub struct MockBackend {
    content: Mutex<VecDeque<Result<GenerateContentResponse>>>,
    repeated_content: Mutex<Option<GenerateContentResponse>>,
    operations: Mutex<VecDeque<Result<Operation>>>,
    downloads: Mutex<HashMap<String, Vec<u8>>>,
    calls: Mutex<Calls>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one content response
    pub fn push_content(&self, response: Result<GenerateContentResponse>) {
        self.content.lock().unwrap().push_back(response);
    }

    /// Response returned whenever the content queue is empty
    pub fn repeat_content(&self, response: GenerateContentResponse) {
        *self.repeated_content.lock().unwrap() = Some(response);
    }

    /// Queue one operation, served by `generate_videos` and `get_operation` in order
    pub fn push_operation(&self, operation: Result<Operation>) {
        self.operations.lock().unwrap().push_back(operation);
    }

    pub fn add_download(&self, uri: &str, bytes: &[u8]) {
        self.downloads
            .lock()
            .unwrap()
            .insert(uri.to_string(), bytes.to_vec());
    }

    pub fn calls(&self) -> Calls {
        *self.calls.lock().unwrap()
    }

    fn next_operation(&self) -> Result<Operation> {
        self.operations
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::Other("no scripted operation".to_string())))
    }
}

/// A response whose first candidate holds `text`
pub fn text_response(text: &str) -> GenerateContentResponse {
    GenerateContentResponse {
        candidates: vec![Candidate {
            content: Some(Content::new().with_role("model").with_text(text)),
            finish_reason: Some("STOP".to_string()),
        }],
        usage_metadata: None,
    }
}

/// A response whose first candidate holds inline data
pub fn inline_response(mime_type: &str, data: &str) -> GenerateContentResponse {
    GenerateContentResponse {
        candidates: vec![Candidate {
            content: Some(Content {
                role: Some("model".to_string()),
                parts: vec![Part {
                    text: None,
                    inline_data: Some(Blob {
                        mime_type: mime_type.to_string(),
                        data: data.to_string(),
                    }),
                }],
            }),
            finish_reason: Some("STOP".to_string()),
        }],
        usage_metadata: None,
    }
}

#[async_trait]
impl GenerativeBackend for MockBackend {
    async fn generate_content(
        &self,
        _model: &str,
        _request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        self.calls.lock().unwrap().content += 1;
        if let Some(response) = self.content.lock().unwrap().pop_front() {
            return response;
        }
        self.repeated_content
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| Error::Other("no scripted content".to_string()))
    }

    async fn generate_videos(
        &self,
        _model: &str,
        _request: &GenerateVideosRequest,
    ) -> Result<Operation> {
        self.calls.lock().unwrap().videos += 1;
        self.next_operation()
    }

    async fn get_operation(&self, _name: &str) -> Result<Operation> {
        self.calls.lock().unwrap().polls += 1;
        self.next_operation()
    }

    async fn download(&self, uri: &str) -> Result<Vec<u8>> {
        self.calls.lock().unwrap().downloads += 1;
        self.downloads
            .lock()
            .unwrap()
            .get(uri)
            .cloned()
            .ok_or_else(|| Error::Api {
                status_code: 404,
                message: format!("no download scripted for {uri}"),
            })
    }
}
