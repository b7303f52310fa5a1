//! Page tunables.
//!
//! Every field has a default, so a partial JSON document (or none at all) is a
//! valid configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::assets::AssetLayout;
use crate::error::ConfigError;

pub const DEFAULT_NAME: &str = "Samriddhi";

/// How the photo section below the greeting is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum GalleryMode {
    #[default]
    Carousel,
    Grid,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PageConfig {
    pub fallback_name: String,
    pub photo_count: usize,
    pub photo_dir: String,
    pub photo_extensions: Vec<String>,
    pub slideshow_interval_ms: u32,
    pub crossfade_ms: u32,
    pub evasive_padding_px: f64,
    pub swipe_threshold_px: f64,
    pub first_burst: usize,
    pub second_burst: usize,
    pub second_burst_delay_ms: u32,
    pub hint_duration_ms: u32,
    pub music_src: String,
    pub gallery: GalleryMode,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            fallback_name: DEFAULT_NAME.to_string(),
            photo_count: 6,
            photo_dir: "assets/photos".to_string(),
            photo_extensions: ["jpg", "jpeg", "png", "webp"]
                .iter()
                .map(|e| e.to_string())
                .collect(),
            slideshow_interval_ms: 6000,
            crossfade_ms: 1200,
            evasive_padding_px: 10.0,
            swipe_threshold_px: 40.0,
            first_burst: 170,
            second_burst: 120,
            second_burst_delay_ms: 240,
            hint_duration_ms: 2600,
            music_src: "assets/music.mp3".to_string(),
            gallery: GalleryMode::Carousel,
        }
    }
}

impl PageConfig {
    #[cfg(feature = "serde")]
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let cfg: PageConfig = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse `raw` if present, otherwise defaults. Errors are logged, never returned.
    #[cfg(feature = "serde")]
    pub fn from_json_or_default(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
            return Self::default();
        };
        match Self::from_json(raw) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!("{e}; using default page config");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.photo_count == 0 {
            return Err(ConfigError::Invalid {
                field: "photo_count",
                reason: "must be at least 1",
            });
        }
        if self.photo_extensions.iter().all(|e| e.trim().is_empty()) {
            return Err(ConfigError::Invalid {
                field: "photo_extensions",
                reason: "needs at least one extension",
            });
        }
        if self.slideshow_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "slideshow_interval_ms",
                reason: "must be positive",
            });
        }
        if !(self.swipe_threshold_px > 0.0) {
            return Err(ConfigError::Invalid {
                field: "swipe_threshold_px",
                reason: "must be positive",
            });
        }
        if !(self.evasive_padding_px >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "evasive_padding_px",
                reason: "must not be negative",
            });
        }
        Ok(())
    }

    pub fn asset_layout(&self) -> AssetLayout {
        AssetLayout::new(
            self.photo_dir.trim_end_matches('/'),
            self.photo_extensions
                .iter()
                .map(|e| e.trim().trim_start_matches('.').to_string())
                .filter(|e| !e.is_empty())
                .collect(),
            self.photo_count,
        )
    }
}
