//! # genmedia - Quota-aware image and video generation
//!
//! This crate drives Gemini image and Veo video models from a JSON array of
//! generation specs and writes each artifact to disk. Every outbound call is
//! recorded in a durable request log, and a sliding-window limiter keeps usage
//! under the per-model request and token quotas before each attempt.
//!
//! ## Features
//!
//! - Model catalog mapping quality tiers to models and quota ceilings
//! - Durable request log mirrored to `wal.json` in the log directory
//! - Bounded retries with client-error short-circuiting
//! - Long-running operation polling for video generation
//! - Repair of loosely formatted JSON answers
//! - Optional ffmpeg post-processing of videos
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use genmedia::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::default();
//!     let backend: Arc<dyn GenerativeBackend> =
//!         Arc::new(genmedia::gemini::Client::with_api_key(config.api_key()?)?);
//!     let generator = Generator::new(&config, backend.clone(), Arc::new(SystemClock));
//!     let pipeline = Pipeline::new(generator, Materializer::new(None), backend);
//!
//!     let mut ctx = Context::load(&config).await?;
//!     let specs = r#"[{
//!         "filePath": "logo.svg",
//!         "mime": "image/svg+xml",
//!         "prompt": "a fox",
//!         "mode": "fast"
//!     }]"#;
//!     pipeline.run_images(specs, &mut ctx, &mut std::io::stdout()).await?;
//!     Ok(())
//! }
//! ```

mod error;

pub mod backend;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod executor;
pub mod gemini;
pub mod materializer;
pub mod normalize;
pub mod operation;
pub mod pipeline;
pub mod prompt;
pub mod rate_limiter;
pub mod spec;
pub mod transcoder;
pub mod wal;

pub use error::{Error, Result};

/// Re-export of the types needed to run a pipeline
pub mod prelude {
    pub use crate::backend::GenerativeBackend;
    pub use crate::clock::{Clock, SystemClock};
    pub use crate::config::Config;
    pub use crate::error::Error;
    pub use crate::error::Result;
    pub use crate::executor::Generator;
    pub use crate::materializer::Materializer;
    pub use crate::pipeline::Pipeline;
    pub use crate::transcoder::{Ffmpeg, Transcoder};
    pub use crate::wal::Context;
}
