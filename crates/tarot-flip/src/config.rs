use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tarot_engine::Easing;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be a finite, non-negative number of seconds, got {value}")]
    Duration { field: &'static str, value: f32 },
    #[error("title_fade_start ({start}) is past the end of intro_hold ({hold})")]
    TitleFade { start: f32, hold: f32 },
}

/// Timing and layout of the daily card video. All times in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlipConfig {
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub card_width: f32,
    pub card_height: f32,
    /// Face-down hold before the flip. The title fades out over its tail.
    pub intro_hold: f32,
    /// When, within the intro, the title starts to fade.
    pub title_fade_start: f32,
    pub flip_duration: f32,
    pub hold_after_flip: f32,
    /// Fade-in of the card name during the hold.
    pub label_fade: f32,
    pub shrink_duration: f32,
    pub shrink_scale: f32,
    /// How far the card rises while shrinking.
    pub shrink_offset: f32,
    pub shrink_easing: Easing,
    pub description_fade: f32,
    /// Shortest time the description stays up.
    pub description_min: f32,
    /// Time the finished text must sit still before moving on.
    pub description_quiet: f32,
    pub fade_out: f32,
    pub cta_hold: f32,
    pub fps: u32,
    /// Seconds per typed character.
    pub typing_speed: f32,
    pub wrap_columns: usize,
    /// Recording stops with an error past this many frames.
    pub max_frames: u64,
}

impl Default for FlipConfig {
    fn default() -> Self {
        Self {
            canvas_width: 600.0,
            canvas_height: 1000.0,
            card_width: 300.0,
            card_height: 500.0,
            intro_hold: 3.0,
            title_fade_start: 2.0,
            flip_duration: 1.0,
            hold_after_flip: 2.0,
            label_fade: 0.5,
            shrink_duration: 1.0,
            shrink_scale: 0.5,
            shrink_offset: 200.0,
            shrink_easing: Easing::Linear,
            description_fade: 0.5,
            description_min: 6.0,
            description_quiet: 2.0,
            fade_out: 0.5,
            cta_hold: 3.0,
            fps: 30,
            typing_speed: 0.04,
            wrap_columns: 35,
            max_frames: 30 * 120,
        }
    }
}

impl FlipConfig {
    /// Parse and validate a config from JSON. Missing fields keep their
    /// defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Reject timings the animator cannot run: every duration must be
    /// finite and non-negative, and the title fade must start inside the
    /// intro.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let durations = [
            ("intro_hold", self.intro_hold),
            ("title_fade_start", self.title_fade_start),
            ("flip_duration", self.flip_duration),
            ("hold_after_flip", self.hold_after_flip),
            ("label_fade", self.label_fade),
            ("shrink_duration", self.shrink_duration),
            ("description_fade", self.description_fade),
            ("description_min", self.description_min),
            ("description_quiet", self.description_quiet),
            ("fade_out", self.fade_out),
            ("cta_hold", self.cta_hold),
            ("typing_speed", self.typing_speed),
        ];
        for (field, value) in durations {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Duration { field, value });
            }
        }
        if self.title_fade_start > self.intro_hold {
            return Err(ConfigError::TitleFade {
                start: self.title_fade_start,
                hold: self.intro_hold,
            });
        }
        Ok(())
    }

    pub fn frame_dt(&self) -> f32 {
        1.0 / self.fps.max(1) as f32
    }
}
