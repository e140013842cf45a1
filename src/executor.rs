//! # Generation Executor
//!
//! Runs one generation request end to end with a bounded number of attempts.
//! Each attempt waits for admission, records itself in the request log, calls
//! the backend and validates what comes back. Retryable failures start a new
//! attempt from the admission step; final failures are returned at once.
//!
//! Every attempt also writes its raw request and response into the log
//! directory for inspection. Those files are overwritten on each attempt.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tokio::fs;
use tracing::{debug, error, info, warn};

use crate::backend::GenerativeBackend;
use crate::catalog::{self, Modality};
use crate::clock::Clock;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::gemini::types::{
    GenerateContentRequest, GenerateVideosRequest, GenerationConfig, VideoImage, VideoInstance,
    VideoParameters,
};
use crate::normalize::normalize_json_text;
use crate::operation::OperationPoller;
use crate::prompt::{build_image_prompt, build_svg_prompt};
use crate::rate_limiter;
use crate::spec::{ImageSpec, VideoSpec};
use crate::wal::{Context, IMAGE_INPUT_SURCHARGE, RequestHistoryEntry, TokenUsage};

const PROMPT_FILE: &str = "prompt.txt";
const OUTPUT_FILE: &str = "output.json";
const NORMALIZED_FILE: &str = "output_norm.json";
const SPEC_FILE: &str = "spec.json";
const OUTPUT_INFO_FILE: &str = "output_info.json";

/// Generated artifact content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Text, or base64 for binary MIME types
    Inline(String),
    /// Remote artifact to download
    Remote { uri: String },
}

/// Normalized outcome of a successful attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    pub file_path: PathBuf,
    pub payload: Payload,
    pub mime: String,
    pub check: bool,
}

/// Scratch files written for post-hoc debugging
#[derive(Debug, Clone)]
pub struct DebugFiles {
    dir: PathBuf,
}

impl DebugFiles {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Overwrite `name` in the debug directory
    pub async fn write(&self, name: &str, content: &str) -> Result<()> {
        fs::create_dir_all(&self.dir).await?;
        fs::write(self.dir.join(name), content).await?;
        Ok(())
    }
}

/// Answer shape requested from the text model
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileResult {
    file_path: Option<String>,
    data: Option<String>,
    mime: Option<String>,
    check: Option<bool>,
}

impl FileResult {
    fn validate(self, requested: &Path) -> Result<GenerationResult> {
        let file_path = present(self.file_path, "filePath")?;
        let data = present(self.data, "data")?;
        let mime = present(self.mime, "mime")?;
        match self.check {
            None => {
                return Err(Error::UnexpectedResponse(
                    "check is missing in generation result".to_string(),
                ));
            }
            Some(false) => return Err(Error::NotCompliant),
            Some(true) => {}
        }

        if Path::new(&file_path) != requested {
            warn!(
                "Model answered with path {}, writing to {}",
                file_path,
                requested.display()
            );
        }

        Ok(GenerationResult {
            file_path: requested.to_path_buf(),
            payload: Payload::Inline(data),
            mime,
            check: true,
        })
    }
}

fn present(value: Option<String>, field: &str) -> Result<String> {
    value.filter(|v| !v.is_empty()).ok_or_else(|| {
        Error::UnexpectedResponse(format!("{field} is missing in generation result"))
    })
}

/// What one successful attempt produced
struct Attempt<T> {
    value: T,
    usage: Option<TokenUsage>,
}

/// Bounded-retry generation executor
pub struct Generator {
    backend: Arc<dyn GenerativeBackend>,
    clock: Arc<dyn Clock>,
    debug: DebugFiles,
    poller: OperationPoller,
    max_attempts: u32,
    admission_wait: Duration,
}

impl Generator {
    pub fn new(
        config: &Config,
        backend: Arc<dyn GenerativeBackend>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            backend,
            clock,
            debug: DebugFiles::new(&config.log_dir),
            poller: OperationPoller::new(config.poll_interval, config.poll_timeout),
            max_attempts: config.max_attempts.max(1),
            admission_wait: config.admission_wait,
        }
    }

    /// Generate an SVG or a binary image for `spec`
    pub async fn generate_image(
        &self,
        spec: &ImageSpec,
        ctx: &mut Context,
    ) -> Result<GenerationResult> {
        let quota = catalog::lookup(spec.modality(), spec.tier)?;
        let model = quota.model;
        info!("Using AI model: {}", model);
        ctx.select_model(quota);

        if spec.is_svg() {
            let prompt = build_svg_prompt(&spec.prompt, &spec.file_path, &spec.mime);
            debug!("Prompt built:\n{}", prompt);
            let cost = prompt.chars().count() as u64;
            self.with_retry(ctx, "SVG", cost, |_| self.svg_attempt(model, &prompt, spec))
                .await
        } else {
            let prompt = build_image_prompt(&spec.prompt, &spec.file_path, &spec.mime);
            debug!("Prompt built:\n{}", prompt);
            let cost = prompt.chars().count() as u64;
            self.with_retry(ctx, "binary image", cost, |_| {
                self.binary_image_attempt(model, &prompt, spec)
            })
            .await
        }
    }

    /// Generate a video for `spec`; the result carries a remote download handle
    pub async fn generate_video(
        &self,
        spec: &VideoSpec,
        ctx: &mut Context,
    ) -> Result<GenerationResult> {
        let quota = catalog::lookup(Modality::Video, spec.tier)?;
        let model = quota.model;
        info!("Using AI model: {}", model);
        ctx.select_model(quota);

        let request = build_video_request(spec).await?;
        self.debug
            .write(SPEC_FILE, &serde_json::to_string_pretty(&video_spec_json(spec))?)
            .await?;

        let prompt_chars = spec.prompt.as_deref().map_or(0, |p| p.chars().count()) as u64;
        let surcharge = if spec.image_path.is_some() {
            IMAGE_INPUT_SURCHARGE
        } else {
            0
        };

        self.with_retry(ctx, "video", prompt_chars + surcharge, |_| {
            self.video_attempt(model, &request, spec)
        })
        .await
    }

    async fn with_retry<T, F, Fut>(
        &self,
        ctx: &mut Context,
        what: &'static str,
        cost: u64,
        mut call: F,
    ) -> Result<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<Attempt<T>>>,
    {
        let model = ctx.model()?.model;
        let mut last_error = None;

        for attempt in 1..=self.max_attempts {
            rate_limiter::await_admission(ctx, self.clock.as_ref(), self.admission_wait).await?;

            let entry = RequestHistoryEntry::new(model, cost, self.clock.now_ms());
            let key = entry.key.clone();
            ctx.log.append(entry).await?;

            info!("Calling API... attempt={}", attempt);
            match call(attempt).await {
                Ok(Attempt { value, usage }) => {
                    if let Some(usage) = usage {
                        ctx.log.record_usage(&key, usage).await?;
                    }
                    return Ok(value);
                }
                Err(e) if !e.is_retryable() => {
                    error!("Attempt {} failed with a non-retryable error: {}", attempt, e);
                    return Err(e);
                }
                Err(e) => {
                    error!("Attempt {} failed: {}", attempt, e);
                    if attempt < self.max_attempts {
                        warn!("Retrying... ({}/{})", attempt, self.max_attempts);
                    }
                    last_error = Some(e);
                }
            }
        }

        Err(Error::RetriesExhausted {
            what,
            attempts: self.max_attempts,
            last: Box::new(
                last_error.unwrap_or_else(|| Error::Other("no attempt was made".to_string())),
            ),
        })
    }

    async fn svg_attempt(
        &self,
        model: &str,
        prompt: &str,
        spec: &ImageSpec,
    ) -> Result<Attempt<GenerationResult>> {
        self.debug.write(PROMPT_FILE, prompt).await?;

        let request = GenerateContentRequest::from_prompt(prompt)
            .with_config(GenerationConfig::file_result_schema());
        let response = self.backend.generate_content(model, &request).await?;

        info!("API call succeeded, parsing response...");
        let text = response.text();
        self.debug.write(OUTPUT_FILE, &text).await?;

        let normalized = normalize_json_text(&text);
        self.debug.write(NORMALIZED_FILE, &normalized).await?;

        let answer: FileResult = serde_json::from_str(&normalized)?;
        Ok(Attempt {
            value: answer.validate(&spec.file_path)?,
            usage: response.usage_metadata.map(Into::into),
        })
    }

    async fn binary_image_attempt(
        &self,
        model: &str,
        prompt: &str,
        spec: &ImageSpec,
    ) -> Result<Attempt<GenerationResult>> {
        self.debug.write(PROMPT_FILE, prompt).await?;

        let request = GenerateContentRequest::from_prompt(prompt);
        let response = self.backend.generate_content(model, &request).await?;

        info!("API call succeeded, parsing response...");
        self.debug
            .write(OUTPUT_FILE, &serde_json::to_string_pretty(&response)?)
            .await?;

        let blob = response.first_inline_data().ok_or_else(|| {
            Error::UnexpectedResponse("No inline image data in response".to_string())
        })?;
        if blob.data.is_empty() || blob.mime_type.is_empty() {
            return Err(Error::UnexpectedResponse(
                "Inline image data is incomplete".to_string(),
            ));
        }

        Ok(Attempt {
            value: GenerationResult {
                file_path: spec.file_path.clone(),
                payload: Payload::Inline(blob.data.clone()),
                mime: blob.mime_type.clone(),
                check: true,
            },
            usage: response.usage_metadata.map(Into::into),
        })
    }

    async fn video_attempt(
        &self,
        model: &str,
        request: &GenerateVideosRequest,
        spec: &VideoSpec,
    ) -> Result<Attempt<GenerationResult>> {
        let operation = self.backend.generate_videos(model, request).await?;
        info!("Video generation started, polling for completion...");

        let operation = self
            .poller
            .wait(self.backend.as_ref(), self.clock.as_ref(), operation)
            .await?;
        info!("Video generation completed");

        let response = operation
            .response
            .and_then(|r| r.generate_video_response)
            .ok_or_else(|| {
                Error::UnexpectedResponse("Video generation response is undefined".to_string())
            })?;
        let video = response
            .generated_samples
            .first()
            .and_then(|sample| sample.video.clone())
            .ok_or_else(|| Error::UnexpectedResponse("No videos were generated".to_string()))?;

        let info = serde_json::json!({
            "uri": video.uri,
            "mimeType": video.mime_type,
            "raiMediaFilteredCount": response.rai_media_filtered_count,
            "raiMediaFilteredReasons": response.rai_media_filtered_reasons,
        });
        self.debug
            .write(OUTPUT_INFO_FILE, &serde_json::to_string_pretty(&info)?)
            .await?;

        let uri = video.uri.filter(|u| !u.is_empty()).ok_or_else(|| {
            Error::UnexpectedResponse("Video URI is missing in the response".to_string())
        })?;

        Ok(Attempt {
            value: GenerationResult {
                file_path: spec.file_path.clone(),
                payload: Payload::Remote { uri },
                mime: video.mime_type.unwrap_or_else(|| "video/mp4".to_string()),
                check: true,
            },
            usage: None,
        })
    }
}

/// Build the video request body, loading the reference image when given
async fn build_video_request(spec: &VideoSpec) -> Result<GenerateVideosRequest> {
    let image = match &spec.image_path {
        Some(path) => {
            let bytes = fs::read(path).await?;
            let mime = image_mime(path);
            info!("Input image loaded: {} ({})", path.display(), mime);
            Some(VideoImage::from_bytes(&bytes, mime))
        }
        None => None,
    };

    Ok(GenerateVideosRequest {
        instances: vec![VideoInstance {
            prompt: spec.prompt.clone(),
            image,
        }],
        parameters: VideoParameters {
            aspect_ratio: Some(spec.aspect_ratio.as_str().to_string()),
            duration_seconds: Some(spec.duration_seconds),
        },
    })
}

/// MIME type of a reference image, from its extension
fn image_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "image/jpeg",
    }
}

fn video_spec_json(spec: &VideoSpec) -> serde_json::Value {
    serde_json::json!({
        "filePath": spec.file_path,
        "prompt": spec.prompt,
        "imagePath": spec.image_path,
        "mode": spec.tier,
        "mimeType": match spec.container {
            crate::spec::VideoContainer::Mp4 => "video/mp4",
            crate::spec::VideoContainer::Gif => "image/gif",
        },
        "aspectRatio": spec.aspect_ratio.as_str(),
        "durationSeconds": spec.duration_seconds,
        "generateAudio": spec.generate_audio,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Tier;
    use crate::clock::manual::ManualClock;
    use crate::gemini::mock::{MockBackend, inline_response, text_response};
    use crate::gemini::types::{
        GenerateVideoResponse, GeneratedSample, Operation, OperationResponse, UsageMetadata,
        VideoFile,
    };
    use crate::spec::{AspectRatio, VideoContainer};
    use tempfile::TempDir;

    const NOW: i64 = 1_700_000_000_000;

    struct Harness {
        _dir: TempDir,
        config: Config,
        backend: Arc<MockBackend>,
        clock: Arc<ManualClock>,
        generator: Generator,
        ctx: Context,
    }

    async fn harness() -> Harness {
        let dir = TempDir::new().unwrap();
        let config = Config::builder().log_dir(dir.path().join(".logs")).build();
        let backend = Arc::new(MockBackend::new());
        let clock = Arc::new(ManualClock::starting_at(NOW));
        let generator = Generator::new(&config, backend.clone(), clock.clone());
        let ctx = Context::load(&config).await.unwrap();
        Harness {
            _dir: dir,
            config,
            backend,
            clock,
            generator,
            ctx,
        }
    }

    fn svg_spec() -> ImageSpec {
        ImageSpec {
            file_path: PathBuf::from("out/logo.svg"),
            mime: "image/svg+xml".to_string(),
            prompt: "a red circle".to_string(),
            tier: Tier::Fast,
        }
    }

    fn png_spec() -> ImageSpec {
        ImageSpec {
            file_path: PathBuf::from("out/cat.png"),
            mime: "image/png".to_string(),
            prompt: "a cat".to_string(),
            tier: Tier::Quality,
        }
    }

    fn video_spec() -> VideoSpec {
        VideoSpec {
            file_path: PathBuf::from("out/clip.mp4"),
            prompt: Some("waves".to_string()),
            image_path: None,
            tier: Tier::Fast,
            container: VideoContainer::Mp4,
            aspect_ratio: AspectRatio::Landscape,
            duration_seconds: 5,
            generate_audio: false,
        }
    }

    fn svg_answer(check: bool) -> String {
        svg_answer_at("out/logo.svg", check)
    }

    fn svg_answer_at(path: &str, check: bool) -> String {
        format!(
            "{{\"filePath\": \"{path}\", \"data\": \"<svg>\n<circle/>\n</svg>\", \
             \"mime\": \"image/svg+xml\", \"check\": {check}}}"
        )
    }

    fn finished_video(uri: &str) -> Operation {
        Operation {
            name: "models/veo/operations/op1".to_string(),
            done: true,
            error: None,
            response: Some(OperationResponse {
                generate_video_response: Some(GenerateVideoResponse {
                    generated_samples: vec![GeneratedSample {
                        video: Some(VideoFile {
                            uri: Some(uri.to_string()),
                            mime_type: None,
                        }),
                    }],
                    rai_media_filtered_count: None,
                    rai_media_filtered_reasons: None,
                }),
            }),
        }
    }

    #[tokio::test]
    async fn test_svg_success_normalizes_answer() {
        let mut h = harness().await;
        h.backend.push_content(Ok(text_response(&svg_answer(true))));

        let result = h.generator.generate_image(&svg_spec(), &mut h.ctx).await.unwrap();
        assert_eq!(result.payload, Payload::Inline("<svg>\n<circle/>\n</svg>".to_string()));
        assert_eq!(result.mime, "image/svg+xml");
        assert!(result.check);

        assert_eq!(h.ctx.log.entries().len(), 1);
        assert_eq!(h.ctx.log.entries()[0].ai_model, "gemini-3-flash-preview");
        assert!(h.config.log_dir.join(PROMPT_FILE).exists());
        assert!(h.config.log_dir.join(OUTPUT_FILE).exists());
        let normalized = std::fs::read_to_string(h.config.log_dir.join(NORMALIZED_FILE)).unwrap();
        assert!(normalized.contains("<svg>\\n<circle/>"));
    }

    #[tokio::test]
    async fn test_answer_path_is_replaced_by_requested_path() {
        let mut h = harness().await;
        h.backend
            .push_content(Ok(text_response(&svg_answer_at("/tmp/elsewhere/other.svg", true))));
        let requested = h.config.log_dir.with_file_name("art").join("logo.svg");
        let spec = ImageSpec {
            file_path: requested.clone(),
            ..svg_spec()
        };

        let result = h.generator.generate_image(&spec, &mut h.ctx).await.unwrap();
        assert_eq!(result.file_path, requested);

        let written = crate::materializer::Materializer::new(None)
            .materialize(&result, crate::materializer::PostProcess::None, h.backend.as_ref())
            .await
            .unwrap();
        assert_eq!(written, requested);
        assert_eq!(
            std::fs::read_to_string(&requested).unwrap(),
            "<svg>\n<circle/>\n</svg>"
        );
    }

    #[tokio::test]
    async fn test_non_compliant_answer_exhausts_attempts() {
        let mut h = harness().await;
        h.backend.repeat_content(text_response(&svg_answer(false)));

        let err = h.generator.generate_image(&svg_spec(), &mut h.ctx).await.unwrap_err();
        assert!(matches!(
            err,
            Error::RetriesExhausted { attempts: 3, ref last, .. }
                if matches!(**last, Error::NotCompliant)
        ));
        assert_eq!(h.backend.calls().content, 3);
        assert_eq!(h.ctx.log.entries().len(), 3);

        let persisted = crate::wal::RequestLog::load(h.config.wal_path()).await.unwrap();
        assert_eq!(persisted.entries().len(), 3);
    }

    #[tokio::test]
    async fn test_malformed_then_valid_answer() {
        let mut h = harness().await;
        h.backend.push_content(Ok(text_response("not json at all")));
        let without_data =
            r#"{"filePath": "out/logo.svg", "mime": "image/svg+xml", "check": true}"#;
        h.backend.push_content(Ok(text_response(without_data)));
        h.backend.push_content(Ok(text_response(&svg_answer(true))));

        let result = h.generator.generate_image(&svg_spec(), &mut h.ctx).await;
        tokio_test::assert_ok!(result);
        assert_eq!(h.backend.calls().content, 3);
        assert_eq!(h.ctx.log.entries().len(), 3);
    }

    #[tokio::test]
    async fn test_client_error_is_not_retried() {
        let mut h = harness().await;
        h.backend.push_content(Err(Error::Api {
            status_code: 400,
            message: "invalid argument".to_string(),
        }));

        let err = h.generator.generate_image(&png_spec(), &mut h.ctx).await.unwrap_err();
        assert!(matches!(err, Error::Api { status_code: 400, .. }));
        assert_eq!(h.backend.calls().content, 1);
        assert_eq!(h.ctx.log.entries().len(), 1);
    }

    #[tokio::test]
    async fn test_provider_rate_limit_is_retried() {
        let mut h = harness().await;
        h.backend.push_content(Err(Error::RateLimit {
            retry_after_secs: 60,
        }));
        h.backend.push_content(Ok(inline_response("image/png", "iVBORw0KGgo=")));

        let result = h.generator.generate_image(&png_spec(), &mut h.ctx).await.unwrap();
        assert_eq!(result.payload, Payload::Inline("iVBORw0KGgo=".to_string()));
        assert_eq!(result.file_path, PathBuf::from("out/cat.png"));
        assert_eq!(h.backend.calls().content, 2);
    }

    #[tokio::test]
    async fn test_missing_inline_data_is_retried() {
        let mut h = harness().await;
        h.backend.push_content(Ok(text_response("I cannot draw that")));
        h.backend.push_content(Ok(inline_response("image/png", "AAAA")));

        let result = h.generator.generate_image(&png_spec(), &mut h.ctx).await.unwrap();
        assert_eq!(result.mime, "image/png");
        assert_eq!(h.ctx.log.entries().len(), 2);
    }

    #[tokio::test]
    async fn test_reported_usage_is_recorded() {
        let mut h = harness().await;
        let mut response = inline_response("image/png", "AAAA");
        response.usage_metadata = Some(UsageMetadata {
            prompt_token_count: Some(20),
            candidates_token_count: Some(1290),
            total_token_count: Some(1310),
            cached_content_token_count: None,
        });
        h.backend.push_content(Ok(response));

        h.generator.generate_image(&png_spec(), &mut h.ctx).await.unwrap();
        let entry = &h.ctx.log.entries()[0];
        assert_eq!(entry.total_token_count, Some(1310));
        assert_eq!(entry.token_cost(), 1310);
    }

    #[tokio::test]
    async fn test_admission_waits_for_quota() {
        let mut h = harness().await;
        // the fast video tier allows one request per minute
        h.ctx
            .log
            .append(RequestHistoryEntry::new("veo-2.0-generate-001", 5, NOW - 10_000))
            .await
            .unwrap();
        h.backend.push_operation(Ok(finished_video("https://files/v.mp4")));

        h.generator.generate_video(&video_spec(), &mut h.ctx).await.unwrap();
        assert_eq!(h.clock.sleeps(), vec![Duration::from_secs(60)]);
        assert_eq!(h.ctx.log.entries().len(), 2);
    }

    #[tokio::test]
    async fn test_video_polls_then_returns_remote_handle() {
        let mut h = harness().await;
        h.backend.push_operation(Ok(Operation {
            name: "models/veo/operations/op1".to_string(),
            ..Operation::default()
        }));
        h.backend.push_operation(Ok(finished_video("https://files/v.mp4")));

        let result = h.generator.generate_video(&video_spec(), &mut h.ctx).await.unwrap();
        assert_eq!(
            result.payload,
            Payload::Remote {
                uri: "https://files/v.mp4".to_string()
            }
        );
        assert_eq!(result.mime, "video/mp4");
        assert_eq!(h.backend.calls().polls, 1);
        assert_eq!(h.clock.sleeps(), vec![Duration::from_secs(10)]);
        assert_eq!(h.ctx.log.entries()[0].prompt_length, 5);
        assert!(h.config.log_dir.join(SPEC_FILE).exists());
        assert!(h.config.log_dir.join(OUTPUT_INFO_FILE).exists());
    }

    #[tokio::test]
    async fn test_video_failure_then_success() {
        let mut h = harness().await;
        h.backend.push_operation(Ok(Operation {
            name: "op".to_string(),
            done: true,
            error: Some(serde_json::json!({"message": "backend error"})),
            response: None,
        }));
        h.backend.push_operation(Ok(finished_video("https://files/v.mp4")));

        h.generator.generate_video(&video_spec(), &mut h.ctx).await.unwrap();
        assert_eq!(h.backend.calls().videos, 2);
        assert_eq!(h.ctx.log.entries().len(), 2);
    }

    #[tokio::test]
    async fn test_image_to_video_charges_surcharge() {
        let mut h = harness().await;
        let image = h.config.log_dir.join("still.PNG");
        std::fs::write(&image, b"png-bytes").unwrap();
        let spec = VideoSpec {
            prompt: None,
            image_path: Some(image),
            ..video_spec()
        };
        h.backend.push_operation(Ok(finished_video("https://files/v.mp4")));

        h.generator.generate_video(&spec, &mut h.ctx).await.unwrap();
        assert_eq!(h.ctx.log.entries()[0].prompt_length, IMAGE_INPUT_SURCHARGE);
    }

    #[test]
    fn test_image_mime_from_extension() {
        assert_eq!(image_mime(Path::new("a.png")), "image/png");
        assert_eq!(image_mime(Path::new("a.WEBP")), "image/webp");
        assert_eq!(image_mime(Path::new("a.gif")), "image/gif");
        assert_eq!(image_mime(Path::new("a.jpg")), "image/jpeg");
        assert_eq!(image_mime(Path::new("noext")), "image/jpeg");
    }
}
