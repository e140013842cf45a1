//! External media transcoding through an `ffmpeg` executable.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Post-processing operations on a downloaded video
#[async_trait]
pub trait Transcoder: Send + Sync {
    /// Copy `src` to `dest` without its audio track
    async fn strip_audio(&self, src: &Path, dest: &Path) -> Result<()>;

    /// Convert the video `src` to an animated GIF at `dest`
    async fn convert_to_gif(&self, src: &Path, dest: &Path) -> Result<()>;
}

/// Transcoder backed by an `ffmpeg` binary
#[derive(Debug, Clone)]
pub struct Ffmpeg {
    program: PathBuf,
}

impl Ffmpeg {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Return a transcoder when `program -version` runs successfully
    pub async fn probe(program: impl Into<PathBuf>) -> Option<Self> {
        let ffmpeg = Self::new(program);
        match Command::new(&ffmpeg.program).arg("-version").output().await {
            Ok(output) if output.status.success() => {
                debug!("Found transcoder at {}", ffmpeg.program.display());
                Some(ffmpeg)
            }
            Ok(output) => {
                debug!(
                    "{} -version exited with {:?}",
                    ffmpeg.program.display(),
                    output.status.code()
                );
                None
            }
            Err(e) => {
                debug!("Transcoder {} unavailable: {}", ffmpeg.program.display(), e);
                None
            }
        }
    }

    async fn run(&self, args: Vec<String>) -> Result<()> {
        info!("running {} {}", self.program.display(), args.join(" "));
        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .await
            .map_err(|e| {
                Error::Transcode(format!("failed to start {}: {e}", self.program.display()))
            })?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(Error::Transcode(format!(
                "{} exited with {:?}: {}",
                self.program.display(),
                output.status.code(),
                stderr.lines().last().unwrap_or_default()
            )))
        }
    }
}

fn strip_audio_args(src: &Path, dest: &Path) -> Vec<String> {
    vec![
        "-i".to_string(),
        src.display().to_string(),
        "-an".to_string(),
        "-c:v".to_string(),
        "copy".to_string(),
        "-y".to_string(),
        dest.display().to_string(),
    ]
}

fn gif_args(src: &Path, dest: &Path) -> Vec<String> {
    vec![
        "-i".to_string(),
        src.display().to_string(),
        "-vf".to_string(),
        "fps=10,scale=480:-1:flags=lanczos".to_string(),
        "-y".to_string(),
        dest.display().to_string(),
    ]
}

#[async_trait]
impl Transcoder for Ffmpeg {
    async fn strip_audio(&self, src: &Path, dest: &Path) -> Result<()> {
        self.run(strip_audio_args(src, dest)).await
    }

    async fn convert_to_gif(&self, src: &Path, dest: &Path) -> Result<()> {
        self.run(gif_args(src, dest)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_audio_args() {
        let args = strip_audio_args(Path::new("in.mp4"), Path::new("out.mp4"));
        assert_eq!(args.join(" "), "-i in.mp4 -an -c:v copy -y out.mp4");
    }

    #[test]
    fn test_gif_args() {
        let args = gif_args(Path::new("in.mp4"), Path::new("out.gif"));
        assert_eq!(
            args.join(" "),
            "-i in.mp4 -vf fps=10,scale=480:-1:flags=lanczos -y out.gif"
        );
    }

    #[tokio::test]
    async fn test_probe_missing_program() {
        assert!(Ffmpeg::probe("/nonexistent/ffmpeg-binary").await.is_none());
    }

    #[tokio::test]
    async fn test_failed_run_is_transcode_error() {
        let ffmpeg = Ffmpeg::new("/nonexistent/ffmpeg-binary");
        let err = ffmpeg
            .strip_audio(Path::new("a.mp4"), Path::new("b.mp4"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Transcode(_)));
    }
}
