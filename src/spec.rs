//! # Generation Specs
//!
//! Caller-supplied requests as they arrive in the JSON argument, and their
//! validated forms. Every field of the raw forms is optional so an array can
//! be parsed in one go and each element validated right before it runs.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::catalog::{self, Modality, ModelQuota, Tier};
use crate::error::{Error, Result};

/// Raw image request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSpecInput {
    pub file_path: Option<String>,
    pub mime: Option<String>,
    pub prompt: Option<String>,
    pub mode: Option<String>,
}

/// Validated image request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSpec {
    pub file_path: PathBuf,
    pub mime: String,
    pub prompt: String,
    pub tier: Tier,
}

impl ImageSpecInput {
    /// Check required fields and closed sets
    pub fn validate(self) -> Result<ImageSpec> {
        let file_path = required(self.file_path, "filePath")?;
        let mime = required(self.mime, "mime")?;
        let prompt = required(self.prompt, "prompt")?;
        let mode = required(self.mode, "mode")?;
        let tier = parse_tier(&mode, Modality::Image)?;

        Ok(ImageSpec {
            file_path: PathBuf::from(file_path),
            mime,
            prompt,
            tier,
        })
    }
}

impl ImageSpec {
    /// SVG requests go through the structured-text path
    pub fn is_svg(&self) -> bool {
        self.mime.to_lowercase().contains("svg")
    }

    /// Modality serving this request
    pub fn modality(&self) -> Modality {
        if self.is_svg() {
            Modality::Text
        } else {
            Modality::Image
        }
    }
}

/// Output container of a video request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VideoContainer {
    #[default]
    Mp4,
    Gif,
}

impl VideoContainer {
    fn parse(mime: &str) -> Result<Self> {
        match mime {
            "video/mp4" => Ok(VideoContainer::Mp4),
            "image/gif" => Ok(VideoContainer::Gif),
            _ => Err(Error::InvalidSpec(
                "mimeType must be 'video/mp4' or 'image/gif'".to_string(),
            )),
        }
    }
}

/// Frame aspect ratio of a video request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AspectRatio {
    #[default]
    Landscape,
    Portrait,
}

impl AspectRatio {
    fn parse(value: &str) -> Result<Self> {
        match value {
            "16:9" => Ok(AspectRatio::Landscape),
            "9:16" => Ok(AspectRatio::Portrait),
            _ => Err(Error::InvalidSpec(
                "aspectRatio must be '16:9' or '9:16'".to_string(),
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Landscape => "16:9",
            AspectRatio::Portrait => "9:16",
        }
    }
}

/// Raw video request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSpecInput {
    pub file_path: Option<String>,
    pub prompt: Option<String>,
    pub image_path: Option<String>,
    pub mode: Option<String>,
    pub mime_type: Option<String>,
    pub aspect_ratio: Option<String>,
    pub duration_seconds: Option<u32>,
    pub generate_audio: Option<bool>,
}

/// Validated video request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoSpec {
    pub file_path: PathBuf,
    pub prompt: Option<String>,
    pub image_path: Option<PathBuf>,
    pub tier: Tier,
    pub container: VideoContainer,
    pub aspect_ratio: AspectRatio,
    pub duration_seconds: u32,
    pub generate_audio: bool,
}

impl VideoSpecInput {
    /// Check required fields, closed sets and the tier's duration set
    pub fn validate(self) -> Result<VideoSpec> {
        let file_path = required(self.file_path, "filePath")?;
        let prompt = self.prompt.filter(|p| !p.is_empty());
        let image_path = self.image_path.filter(|p| !p.is_empty());
        if prompt.is_none() && image_path.is_none() {
            return Err(Error::InvalidSpec(
                "Either prompt or imagePath must be provided".to_string(),
            ));
        }

        let mode = required(self.mode, "mode")?;
        let tier = parse_tier(&mode, Modality::Video)?;
        let container = self
            .mime_type
            .as_deref()
            .map(VideoContainer::parse)
            .transpose()?
            .unwrap_or_default();
        let aspect_ratio = self
            .aspect_ratio
            .as_deref()
            .map(AspectRatio::parse)
            .transpose()?
            .unwrap_or_default();

        let quota = catalog::lookup(Modality::Video, tier)?;
        let duration_seconds = match self.duration_seconds {
            Some(d) if quota.durations.contains(&d) => d,
            Some(_) => {
                return Err(Error::InvalidSpec(format!(
                    "durationSeconds must be one of {:?} for mode '{}'",
                    quota.durations, tier
                )));
            }
            None => default_duration(&quota)?,
        };

        Ok(VideoSpec {
            file_path: PathBuf::from(file_path),
            prompt,
            image_path: image_path.map(PathBuf::from),
            tier,
            container,
            aspect_ratio,
            duration_seconds,
            generate_audio: self.generate_audio.unwrap_or(false),
        })
    }
}

fn default_duration(quota: &ModelQuota) -> Result<u32> {
    quota
        .default_duration()
        .ok_or_else(|| Error::InvalidSpec(format!("{} has no clip durations", quota.model)))
}

fn required(value: Option<String>, field: &str) -> Result<String> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::InvalidSpec(format!("{field} is missing")))
}

fn parse_tier(mode: &str, modality: Modality) -> Result<Tier> {
    let tier: Tier = mode.parse()?;
    if !modality.tiers().contains(&tier) {
        let names: Vec<String> = modality.tiers().iter().map(Tier::to_string).collect();
        return Err(Error::InvalidSpec(format!(
            "mode must be one of {}",
            names.join(", ")
        )));
    }
    Ok(tier)
}
