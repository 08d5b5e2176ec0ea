use crate::player::settings::PlayerSettings;
use crate::player::time_ranges::BufferedRanges;
use tokio::sync::oneshot;

/// Commands that can be sent to the controller task.
#[derive(Debug)]
pub enum PlayerCommand {
    Play,
    Pause,
    /// Target position in seconds; clamped to `[0, duration]` once the
    /// duration is known
    Seek(f64),
    /// Clamped to `[0, 1]`; does not alter the mute flag
    SetVolume(f64),
    ToggleMute,
    ToggleFullscreen,
    /// Validated against the configured quality levels
    SetQuality(String),
    /// Validated against the configured playback rates
    SetPlaybackRate(f64),
    GetState(oneshot::Sender<PlaybackState>),
    Shutdown,
}

/// Observable snapshot mirroring the attached resource.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub is_playing: bool,
    pub current_time: f64,
    /// Unknown until the resource reports its metadata
    pub duration: Option<f64>,
    /// 0.0-1.0, independent of `is_muted`
    pub volume: f64,
    pub is_muted: bool,
    pub is_fullscreen: bool,
    pub quality: String,
    pub playback_rate: f64,
    pub buffered: BufferedRanges,
    /// Set by a resource-level error event; halts further optimistic mutation
    pub error: Option<String>,
}

impl PlaybackState {
    /// Initial snapshot derived from the settings defaults.
    pub fn initial(settings: &PlayerSettings) -> Self {
        PlaybackState {
            is_playing: false,
            current_time: 0.0,
            duration: None,
            volume: 1.0,
            is_muted: settings.muted,
            is_fullscreen: false,
            quality: "auto".to_string(),
            playback_rate: 1.0,
            buffered: BufferedRanges::new(),
            error: None,
        }
    }
}

/// Updates broadcast by the controller about its state changes.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerStateUpdate {
    Playing,
    Paused,
    /// Playback ended and looping is disabled
    Stopped,
    TimeChanged(f64),
    DurationKnown(f64),
    BufferedChanged(BufferedRanges),
    VolumeChanged { volume: f64, muted: bool },
    FullscreenChanged(bool),
    QualityChanged(String),
    PlaybackRateChanged(f64),
    PlaybackError(String),
    /// A command was refused without mutating state
    CommandRejected {
        command: &'static str,
        reason: String,
    },
}
