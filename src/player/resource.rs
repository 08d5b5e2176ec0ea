//! The playable resource seam
//!
//! The controller never talks to a concrete media element. It commands an
//! abstract resource through this trait and mirrors the resource's event
//! stream back into its state snapshot. All commands are best-effort: a
//! resource that cannot honor a request simply does not emit the matching
//! event, and state stays truthful.

use async_trait::async_trait;

/// Command surface of the underlying media resource.
#[async_trait]
pub trait PlayableResource: Send + Sync {
    /// Ask the resource to start playing. `is_playing` only flips when the
    /// resource emits its own `Play` event.
    async fn request_play(&self);

    /// Ask the resource to pause.
    async fn request_pause(&self);

    /// Move the playhead to the given position in seconds.
    async fn set_position(&self, seconds: f64);

    /// Set the output volume, 0.0-1.0.
    async fn set_volume(&self, volume: f64);

    /// Flip the mute flag without touching the volume value.
    async fn set_muted(&self, muted: bool);

    /// Change the playback rate.
    async fn set_playback_rate(&self, rate: f64);

    /// Request fullscreen entry (`true`) or exit (`false`) on the
    /// resource's container.
    async fn request_fullscreen(&self, enter: bool);

    /// Renegotiate the delivered quality level, e.g. an adaptive-stream
    /// source switch.
    async fn switch_quality(&self, level: &str);
}

/// Events emitted by the resource. One-way mirroring: resource -> state.
/// Fields update independently and out of order relative to each other.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceEvent {
    /// Playhead moved; position in seconds
    TimeUpdate(f64),
    /// Media metadata loaded or changed; duration in seconds
    DurationChange(f64),
    /// Buffered data changed; raw `(start, end)` pairs
    BufferedChange(Vec<(f64, f64)>),
    Play,
    Pause,
    /// Playback reached the end of the media
    Ended,
    VolumeChange { volume: f64, muted: bool },
    FullscreenChange(bool),
    /// Resource-level decode or network error
    Error(String),
}
