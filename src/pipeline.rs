//! # Generation Pipeline
//!
//! Runs a JSON array of specs one element at a time: validate, generate,
//! materialize, then report the written path. The first error stops the run;
//! artifacts written before it stay on disk and have already been reported.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::backend::GenerativeBackend;
use crate::error::Result;
use crate::executor::Generator;
use crate::materializer::{Materializer, PostProcess};
use crate::spec::{ImageSpecInput, VideoContainer, VideoSpec, VideoSpecInput};
use crate::wal::Context;

/// Generator, materializer and backend wired together for one invocation
pub struct Pipeline {
    generator: Generator,
    materializer: Materializer,
    backend: Arc<dyn GenerativeBackend>,
}

impl Pipeline {
    pub fn new(
        generator: Generator,
        materializer: Materializer,
        backend: Arc<dyn GenerativeBackend>,
    ) -> Self {
        Self {
            generator,
            materializer,
            backend,
        }
    }

    /// Generate every image in the JSON array `specs`, writing each path to `out`
    pub async fn run_images(
        &self,
        specs: &str,
        ctx: &mut Context,
        out: &mut impl Write,
    ) -> Result<Vec<PathBuf>> {
        let inputs: Vec<ImageSpecInput> = serde_json::from_str(specs)?;
        info!("Processing {} image spec(s)", inputs.len());

        let mut written = Vec::with_capacity(inputs.len());
        for input in inputs {
            let spec = input.validate()?;
            let result = self.generator.generate_image(&spec, ctx).await?;
            let path = self
                .materializer
                .materialize(&result, PostProcess::None, self.backend.as_ref())
                .await?;
            report(out, &path)?;
            written.push(path);
        }
        Ok(written)
    }

    /// Generate every video in the JSON array `specs`, writing each path to `out`
    pub async fn run_videos(
        &self,
        specs: &str,
        ctx: &mut Context,
        out: &mut impl Write,
    ) -> Result<Vec<PathBuf>> {
        let inputs: Vec<VideoSpecInput> = serde_json::from_str(specs)?;
        info!("Processing {} video spec(s)", inputs.len());

        let mut written = Vec::with_capacity(inputs.len());
        for input in inputs {
            let spec = input.validate()?;
            let result = self.generator.generate_video(&spec, ctx).await?;
            let path = self
                .materializer
                .materialize(&result, post_process(&spec), self.backend.as_ref())
                .await?;
            report(out, &path)?;
            written.push(path);
        }
        Ok(written)
    }
}

fn post_process(spec: &VideoSpec) -> PostProcess {
    match spec.container {
        VideoContainer::Gif => PostProcess::ConvertToGif,
        VideoContainer::Mp4 if !spec.generate_audio => PostProcess::StripAudio,
        VideoContainer::Mp4 => PostProcess::None,
    }
}

fn report(out: &mut impl Write, path: &std::path::Path) -> Result<()> {
    writeln!(out, "{}", path.display())?;
    out.flush()?;
    Ok(())
}
