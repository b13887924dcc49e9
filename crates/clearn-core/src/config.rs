use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;

use super::state::FontScale;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("dialogue.reply_delay_ms must be greater than zero")]
    ZeroReplyDelay,
    #[error("carousel.period_ms must be greater than zero")]
    ZeroCarouselPeriod,
    #[error("font_scale.large_px ({large}) must be greater than font_scale.medium_px ({medium})")]
    FontScaleNotIncreasing { medium: u16, large: u16 },
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct SiteConfig {
    pub storage: StorageConfig,
    pub dialogue: DialogueConfig,
    pub carousel: CarouselConfig,
    pub font_scale: FontScaleConfig,
    pub log_level: String,
    /// Seed for the fallback reply picker; unset means OS entropy.
    pub seed: Option<u64>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            dialogue: DialogueConfig::default(),
            carousel: CarouselConfig::default(),
            font_scale: FontScaleConfig::default(),
            log_level: "warn".to_string(),
            seed: None,
        }
    }
}

impl SiteConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dialogue.reply_delay_ms == 0 {
            return Err(ConfigError::ZeroReplyDelay);
        }
        if self.carousel.period_ms == 0 {
            return Err(ConfigError::ZeroCarouselPeriod);
        }
        if self.font_scale.large_px <= self.font_scale.medium_px {
            return Err(ConfigError::FontScaleNotIncreasing {
                medium: self.font_scale.medium_px,
                large: self.font_scale.large_px,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(default)]
pub struct StorageConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct DialogueConfig {
    pub reply_delay_ms: u64,
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            reply_delay_ms: 1_000,
        }
    }
}

impl DialogueConfig {
    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct CarouselConfig {
    pub period_ms: u64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self { period_ms: 8_000 }
    }
}

impl CarouselConfig {
    pub fn period(&self) -> Duration {
        Duration::from_millis(self.period_ms)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct FontScaleConfig {
    pub medium_px: u16,
    pub large_px: u16,
}

impl Default for FontScaleConfig {
    fn default() -> Self {
        Self {
            medium_px: 16,
            large_px: 18,
        }
    }
}

impl FontScaleConfig {
    pub fn px_for(&self, scale: FontScale) -> u16 {
        match scale {
            FontScale::Medium => self.medium_px,
            FontScale::Large => self.large_px,
        }
    }
}
