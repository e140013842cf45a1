//! # Artifact Materializer
//!
//! Writes a validated [`GenerationResult`] to its output path. Inline text is
//! written verbatim, inline binary is base64-decoded, and remote videos are
//! downloaded and optionally post-processed by a [`Transcoder`].
//!
//! Post-processing is best effort. When no transcoder is available or the
//! subprocess fails, the downloaded file is kept as it is.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use base64::Engine;
use tokio::fs;
use tracing::{info, warn};

use crate::backend::GenerativeBackend;
use crate::error::{Error, Result};
use crate::executor::{GenerationResult, Payload};
use crate::transcoder::Transcoder;

/// What to do with a downloaded video before it is final
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostProcess {
    #[default]
    None,
    StripAudio,
    ConvertToGif,
}

/// Whether `mime` is written as UTF-8 text
pub fn is_text_mime(mime: &str) -> bool {
    let mime = mime.to_lowercase();
    mime.starts_with("image/svg")
        || mime.starts_with("text/")
        || mime.starts_with("application/javascript")
        || mime.starts_with("application/x-typescript")
        || mime.starts_with("application/json")
}

pub struct Materializer {
    transcoder: Option<Arc<dyn Transcoder>>,
}

impl Materializer {
    /// `transcoder` is `None` when no transcoder was found at start-up
    pub fn new(transcoder: Option<Arc<dyn Transcoder>>) -> Self {
        Self { transcoder }
    }

    /// Write `result` to disk and return the final path
    pub async fn materialize(
        &self,
        result: &GenerationResult,
        post: PostProcess,
        backend: &dyn GenerativeBackend,
    ) -> Result<PathBuf> {
        if result.mime.is_empty() {
            return Err(Error::Contract("mime is required".to_string()));
        }
        if result.file_path.as_os_str().is_empty() {
            return Err(Error::Contract("filePath is required".to_string()));
        }
        if !result.check {
            return Err(Error::Contract(
                "result did not pass the compliance check".to_string(),
            ));
        }

        let path = result.file_path.as_path();
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir).await?;
            }
        }

        match &result.payload {
            Payload::Inline(data) if is_text_mime(&result.mime) => {
                fs::write(path, data.as_bytes()).await?;
            }
            Payload::Inline(data) => {
                let bytes = base64::engine::general_purpose::STANDARD
                    .decode(data.trim())
                    .map_err(|e| Error::Contract(format!("data is not valid base64: {e}")))?;
                fs::write(path, bytes).await?;
            }
            Payload::Remote { uri } => {
                info!("Downloading video...");
                let bytes = backend.download(uri).await?;
                self.write_video(path, &bytes, post).await?;
            }
        }

        info!("File saved: {}", path.display());
        Ok(path.to_path_buf())
    }

    async fn write_video(&self, path: &Path, bytes: &[u8], post: PostProcess) -> Result<()> {
        let transcoder = match (post, &self.transcoder) {
            (PostProcess::None, _) => {
                fs::write(path, bytes).await?;
                return Ok(());
            }
            (_, None) => {
                warn!("ffmpeg not available, skipping {:?}", post);
                fs::write(path, bytes).await?;
                return Ok(());
            }
            (_, Some(transcoder)) => transcoder.as_ref(),
        };

        match post {
            PostProcess::ConvertToGif => {
                let temp = sibling(path, ".tmp.mp4");
                fs::write(&temp, bytes).await?;
                match transcoder.convert_to_gif(&temp, path).await {
                    Ok(()) => {
                        fs::remove_file(&temp).await?;
                        info!("Converted to GIF");
                    }
                    Err(e) => {
                        warn!("GIF conversion failed, keeping the MP4 data: {}", e);
                        fs::rename(&temp, path).await?;
                    }
                }
            }
            PostProcess::StripAudio => {
                let original = sibling(path, ".with_audio.mp4");
                fs::write(&original, bytes).await?;
                match transcoder.strip_audio(&original, path).await {
                    Ok(()) => {
                        fs::remove_file(&original).await?;
                        info!("Audio track removed");
                    }
                    Err(e) => {
                        warn!("Audio removal failed, keeping the audio track: {}", e);
                        fs::rename(&original, path).await?;
                    }
                }
            }
            PostProcess::None => {}
        }
        Ok(())
    }
}

/// `path` with `suffix` appended to its file name
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(suffix);
    path.with_file_name(name)
}
