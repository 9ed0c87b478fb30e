//! Explicit configuration passed into every scene entry point.

use std::str::FromStr;

use crate::foundation::core::{Canvas, Fps, Rgba8, palette};
use crate::foundation::error::ReelError;

/// Seed used when none is given.
pub const DEFAULT_SEED: u64 = 42;

/// Output quality presets.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Quality {
    /// 854×480 at 15 fps.
    Low,
    /// 1280×720 at 30 fps.
    Medium,
    /// 1920×1080 at 60 fps.
    #[default]
    High,
    /// 2560×1440 at 60 fps.
    Production,
    /// 3840×2160 at 60 fps.
    Fourk,
}

impl Quality {
    /// Every preset, lowest first.
    pub const ALL: [Quality; 5] = [
        Self::Low,
        Self::Medium,
        Self::High,
        Self::Production,
        Self::Fourk,
    ];

    /// Output canvas.
    pub fn canvas(self) -> Canvas {
        let (width, height) = match self {
            Self::Low => (854, 480),
            Self::Medium => (1280, 720),
            Self::High => (1920, 1080),
            Self::Production => (2560, 1440),
            Self::Fourk => (3840, 2160),
        };
        Canvas { width, height }
    }

    /// Output frame rate.
    pub fn fps(self) -> Fps {
        let num = match self {
            Self::Low => 15,
            Self::Medium => 30,
            Self::High | Self::Production | Self::Fourk => 60,
        };
        Fps { num, den: 1 }
    }

    /// Stable lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Production => "production",
            Self::Fourk => "fourk",
        }
    }
}

impl FromStr for Quality {
    type Err = ReelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|q| q.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ReelError::validation(format!("unknown quality preset '{s}'")))
    }
}

/// Seed, background and quality shared read-only by every scene of a run.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneConfig {
    /// Seed of the cosmetic random generator. Each scene starts its own generator from it.
    pub seed: u64,
    /// Background color.
    pub background: Rgba8,
    /// Output preset.
    pub quality: Quality,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            background: palette::BACKGROUND,
            quality: Quality::default(),
        }
    }
}

impl SceneConfig {
    /// Same config with `seed`.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Same config with `quality`.
    pub fn with_quality(mut self, quality: Quality) -> Self {
        self.quality = quality;
        self
    }
}
