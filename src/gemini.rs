//! Gemini API implementation
//!
//! REST client for Google's Gemini API: content generation for the SVG and
//! binary-image paths, long-running operations for video.

mod client;
mod http;
mod models;
pub mod types;

#[cfg(test)]
pub(crate) mod mock;

pub use client::Client;
pub use models::ModelsService;
