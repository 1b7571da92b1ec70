use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_SPEED_PER_SEGMENT: f64 = 0.001;
pub const DEFAULT_MIN_INTERVAL: f64 = 0.02;
pub const DEFAULT_FRAME_COUNT: usize = 5;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];

    /// Playable side length, not counting the border.
    pub fn interior(self) -> usize {
        match self {
            Difficulty::Easy => 6,
            Difficulty::Medium => 8,
            Difficulty::Hard => 12,
            Difficulty::Expert => 14,
        }
    }

    /// Seconds between ticks at spawn length.
    pub fn base_interval(self) -> f64 {
        match self {
            Difficulty::Easy => 0.30,
            Difficulty::Medium => 0.20,
            Difficulty::Hard => 0.15,
            Difficulty::Expert => 0.09,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Hard => "HARD",
            Difficulty::Expert => "EXPERT",
        }
    }

    pub fn level(self) -> u8 {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
            Difficulty::Hard => 2,
            Difficulty::Expert => 3,
        }
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = Error;

    fn try_from(level: u8) -> Result<Self> {
        Difficulty::ALL.get(level as usize).copied().ok_or(Error::Difficulty(level))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: Difficulty,
    /// Seconds shaved off the tick interval per grown segment.
    pub speed_per_segment: f64,
    /// Floor for the tick interval.
    pub min_interval: f64,
    /// Sprite frames per tick.
    pub frame_count: usize,
    pub volume: f32,
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            speed_per_segment: DEFAULT_SPEED_PER_SEGMENT,
            min_interval: DEFAULT_MIN_INTERVAL,
            frame_count: DEFAULT_FRAME_COUNT,
            volume: 1.0,
            seed: None,
        }
    }
}

impl Settings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.min_interval > 0.0) {
            return Err(Error::Invalid {
                field: "min_interval",
                reason: "must be positive",
            });
        }
        if !(self.speed_per_segment >= 0.0) {
            return Err(Error::Invalid {
                field: "speed_per_segment",
                reason: "must not be negative",
            });
        }
        if self.frame_count == 0 {
            return Err(Error::Invalid {
                field: "frame_count",
                reason: "must be at least 1",
            });
        }
        if !(0.0..=1.0).contains(&self.volume) {
            return Err(Error::Invalid {
                field: "volume",
                reason: "must be within 0..=1",
            });
        }
        Ok(())
    }
}
