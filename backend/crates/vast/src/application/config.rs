//! Application Configuration
//!
//! Configuration for the VAST application layer.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// What the rotation bucket is derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationMode {
    /// Wall-clock window from the injected clock
    #[default]
    WallClock,
    /// Playback position (`pos`), scoped per ad break (`break`)
    PlaybackPosition,
}

impl RotationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RotationMode::WallClock => "wall-clock",
            RotationMode::PlaybackPosition => "playback-position",
        }
    }
}

impl fmt::Display for RotationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown rotation mode: {0} (expected wall-clock or playback-position)")]
pub struct ParseRotationModeError(String);

impl FromStr for RotationMode {
    type Err = ParseRotationModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wall-clock" | "wallclock" | "time" => Ok(RotationMode::WallClock),
            "playback-position" | "position" => Ok(RotationMode::PlaybackPosition),
            other => Err(ParseRotationModeError(other.to_string())),
        }
    }
}

/// VAST application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VastConfig {
    /// Width of a wall-clock rotation window
    pub bucket_window: Duration,
    pub rotation_mode: RotationMode,
    /// Width of a playback-position rotation window
    pub position_window: Duration,
    /// `<AdSystem>` text
    pub ad_system: String,
    /// `<AdSystem version="...">`
    pub ad_system_version: String,
    /// Beacon sink; `None` emits the minimal document without beacons
    pub tracking_url: Option<String>,
    pub media_width: u32,
    pub media_height: u32,
}

impl Default for VastConfig {
    fn default() -> Self {
        Self {
            bucket_window: Duration::from_secs(600),
            rotation_mode: RotationMode::WallClock,
            position_window: Duration::from_secs(900),
            ad_system: "FlamingElephantTV".to_string(),
            ad_system_version: "1.0".to_string(),
            tracking_url: None,
            media_width: 1920,
            media_height: 1080,
        }
    }
}

impl VastConfig {
    /// Create config for development (1-minute rotation for quick checks)
    pub fn development() -> Self {
        Self {
            bucket_window: Duration::from_secs(60),
            ..Self::default()
        }
    }

    pub fn bucket_window_ms(&self) -> u128 {
        self.bucket_window.as_millis()
    }

    pub fn position_window_secs(&self) -> u64 {
        self.position_window.as_secs()
    }
}
