//! # Model Catalog
//!
//! Maps a quality tier and a modality to a backend model and its quota
//! ceilings. Every ceiling is scaled below the provider's documented limit so
//! the local limiter trips before the provider would reject a call.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Fraction of the provider limit the limiter allows
pub const SAFETY_FACTOR: f64 = 0.95;

const fn scaled(limit: u64) -> u64 {
    (limit as f64 * SAFETY_FACTOR) as u64
}

/// Quality tier requested by a spec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Fast,
    Quality,
    Ultra,
}

impl FromStr for Tier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "fast" => Ok(Tier::Fast),
            "quality" => Ok(Tier::Quality),
            "ultra" => Ok(Tier::Ultra),
            other => Err(Error::InvalidSpec(format!("unknown mode '{other}'"))),
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tier::Fast => "fast",
            Tier::Quality => "quality",
            Tier::Ultra => "ultra",
        };
        f.write_str(name)
    }
}

/// Category of generated artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modality {
    /// Structured text (SVG) returned as JSON
    Text,
    /// Binary image returned inline
    Image,
    /// Video produced by a long-running operation
    Video,
}

impl Modality {
    /// Tiers offered for this modality
    pub fn tiers(&self) -> &'static [Tier] {
        match self {
            Modality::Text | Modality::Image => &[Tier::Fast, Tier::Quality],
            Modality::Video => &[Tier::Fast, Tier::Quality, Tier::Ultra],
        }
    }
}

/// Quota descriptor for one backend model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelQuota {
    /// Backend model identifier
    pub model: &'static str,

    /// Requests per minute
    pub rpm: u64,

    /// Requests per day
    pub rpd: u64,

    /// Tokens per minute, when the provider meters tokens for this model
    pub tpm: Option<u64>,

    /// Legal clip durations in seconds (video only)
    pub durations: &'static [u32],
}

impl ModelQuota {
    const fn text(model: &'static str, rpm: u64, tpm: u64, rpd: u64) -> Self {
        Self {
            model,
            rpm: scaled(rpm),
            rpd: scaled(rpd),
            tpm: Some(scaled(tpm)),
            durations: &[],
        }
    }

    const fn video(model: &'static str, rpm: u64, rpd: u64, durations: &'static [u32]) -> Self {
        Self {
            model,
            rpm: scaled(rpm),
            rpd: scaled(rpd),
            tpm: None,
            durations,
        }
    }

    /// Default clip duration for this model
    pub fn default_duration(&self) -> Option<u32> {
        self.durations.first().copied()
    }
}

/// Look up the model serving `tier` for `modality`.
pub fn lookup(modality: Modality, tier: Tier) -> Result<ModelQuota> {
    let quota = match (modality, tier) {
        (Modality::Text, Tier::Fast) => {
            ModelQuota::text("gemini-3-flash-preview", 1000, 1_000_000, 10_000)
        }
        (Modality::Text, Tier::Quality) => {
            ModelQuota::text("gemini-3-pro-preview", 25, 1_000_000, 250)
        }
        (Modality::Image, Tier::Fast) => {
            ModelQuota::text("gemini-2.5-flash-image", 500, 500_000, 2000)
        }
        (Modality::Image, Tier::Quality) => {
            ModelQuota::text("gemini-3-pro-image-preview", 20, 100_000, 250)
        }
        (Modality::Video, Tier::Fast) => {
            ModelQuota::video("veo-2.0-generate-001", 2, 50, &[5, 6, 7, 8])
        }
        (Modality::Video, Tier::Quality) => {
            ModelQuota::video("veo-3.1-fast-generate-preview", 5, 10, &[4, 6, 8])
        }
        (Modality::Video, Tier::Ultra) => {
            ModelQuota::video("veo-3.1-generate-preview", 2, 10, &[4, 6, 8])
        }
        (_, Tier::Ultra) => {
            return Err(Error::InvalidSpec(
                "mode must be 'fast' or 'quality'".to_string(),
            ));
        }
    };
    Ok(quota)
}
