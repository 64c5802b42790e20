//! Card configuration

use crate::viewport::{level_extent, DEFAULT_ZOOM_LEVEL, MAX_ZOOM_LEVEL, MIN_ZOOM_LEVEL};
use crate::{Result, SolarViewError};
use serde::{Deserialize, Serialize};

/// User-supplied card options; unknown keys are ignored
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_zoom: Option<i64>,
}

impl CardConfig {
    pub fn with_default_zoom(level: i64) -> Self {
        Self {
            default_zoom: Some(level),
        }
    }

    /// Parse a JSON configuration object
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a JSON configuration object, falling back to defaults on error
    pub fn from_json_lenient(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring invalid card configuration: {}", e);
                Self::default()
            }
        }
    }

    /// Reject a `default_zoom` outside the supported levels
    pub fn validate(&self) -> Result<()> {
        match self.default_zoom {
            Some(level) if !is_valid_level(level) => Err(SolarViewError::Config(format!(
                "default_zoom must be between {} and {}, got {}",
                MIN_ZOOM_LEVEL, MAX_ZOOM_LEVEL, level
            ))),
            _ => Ok(()),
        }
    }

    /// Zoom level to start at, level 1 when absent or out of range
    pub fn effective_zoom_level(&self) -> u8 {
        match self.default_zoom {
            Some(level) if is_valid_level(level) => level as u8,
            Some(level) => {
                log::debug!("default_zoom {} out of range, using {}", level, DEFAULT_ZOOM_LEVEL);
                DEFAULT_ZOOM_LEVEL
            }
            None => DEFAULT_ZOOM_LEVEL,
        }
    }
}

fn is_valid_level(level: i64) -> bool {
    u8::try_from(level).ok().and_then(level_extent).is_some()
}
