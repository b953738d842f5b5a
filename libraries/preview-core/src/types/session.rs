//! Audio session settings
//!
//! Describes how the shared device audio output is configured before the
//! engine starts producing sound.

use serde::{Deserialize, Serialize};

/// Audio session category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionCategory {
    /// Audio is central to the app; keeps playing with the ringer muted
    Playback,

    /// Mixes with other apps and respects the silent switch
    Ambient,
}

/// Audio session mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionMode {
    /// Platform default behaviour
    Default,

    /// Tuned for spoken audio
    SpokenAudio,
}

/// Audio session category options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionOption {
    /// Allow routing to AirPlay receivers
    AllowAirPlay,

    /// Allow routing to Bluetooth devices
    AllowBluetooth,

    /// Mix with audio from other apps
    MixWithOthers,
}

/// Settings applied by the audio session gate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Session category (default: Playback)
    pub category: SessionCategory,

    /// Session mode (default: Default)
    pub mode: SessionMode,

    /// Category options (default: AirPlay + Bluetooth)
    pub options: Vec<SessionOption>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            category: SessionCategory::Playback,
            mode: SessionMode::Default,
            options: vec![SessionOption::AllowAirPlay, SessionOption::AllowBluetooth],
        }
    }
}
