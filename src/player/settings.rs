//! Player configuration
//!
//! Settings are an immutable snapshot passed in when the controller is
//! created; a settings change means building a new controller, not patching
//! a live one.

use serde::{Deserialize, Serialize};

/// Which control surfaces the UI should render
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ControlsConfig {
    #[serde(default = "default_true")]
    pub play_pause: bool,
    #[serde(default = "default_true")]
    pub progress: bool,
    #[serde(default = "default_true")]
    pub volume: bool,
    #[serde(default = "default_true")]
    pub fullscreen: bool,
    #[serde(default = "default_true")]
    pub quality: bool,
    #[serde(default = "default_true")]
    pub speed: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ControlsConfig {
    fn default() -> Self {
        ControlsConfig {
            play_pause: true,
            progress: true,
            volume: true,
            fullscreen: true,
            quality: true,
            speed: true,
        }
    }
}

/// Player settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerSettings {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default)]
    pub controls: ControlsConfig,
    #[serde(default)]
    pub autoplay: bool,
    #[serde(default, rename = "loop")]
    pub loop_playback: bool,
    #[serde(default)]
    pub muted: bool,
    #[serde(default = "default_preload")]
    pub preload: String,
    /// Playback rates the rate selector may choose from
    #[serde(default = "default_playback_rates")]
    pub playback_rates: Vec<f64>,
    /// Quality levels the quality selector may choose from
    #[serde(default = "default_quality_levels")]
    pub quality_levels: Vec<String>,
}

fn default_theme() -> String {
    "default".to_string()
}

fn default_preload() -> String {
    "metadata".to_string()
}

fn default_playback_rates() -> Vec<f64> {
    vec![0.5, 1.0, 1.25, 1.5, 2.0]
}

fn default_quality_levels() -> Vec<String> {
    vec![
        "auto".to_string(),
        "1080p".to_string(),
        "720p".to_string(),
        "480p".to_string(),
        "360p".to_string(),
    ]
}

impl Default for PlayerSettings {
    fn default() -> Self {
        PlayerSettings {
            theme: default_theme(),
            controls: ControlsConfig::default(),
            autoplay: false,
            loop_playback: false,
            muted: false,
            preload: default_preload(),
            playback_rates: default_playback_rates(),
            quality_levels: default_quality_levels(),
        }
    }
}
