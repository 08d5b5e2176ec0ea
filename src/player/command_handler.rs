use super::{PlayerController, PlayerStateUpdate, PLAYER_LOG_TARGET};
use tracing::{debug, instrument, warn};

#[instrument(skip(controller))]
pub async fn handle_play(controller: &mut PlayerController) {
    debug!(target: PLAYER_LOG_TARGET, "Handling Play command.");
    // Not optimistic: is_playing flips on the resource's own Play event,
    // so a refused request (e.g. autoplay policy) cannot drift state.
    controller.resource.request_play().await;
}

#[instrument(skip(controller))]
pub async fn handle_pause(controller: &mut PlayerController) {
    debug!(target: PLAYER_LOG_TARGET, "Handling Pause command.");
    controller.resource.request_pause().await;
}

#[instrument(skip(controller))]
pub async fn handle_seek(controller: &mut PlayerController, seconds: f64) {
    let mut target = seconds.max(0.0);
    if let Some(duration) = controller.state.duration {
        target = target.min(duration);
    }
    debug!(target: PLAYER_LOG_TARGET, "Handling Seek command: requested {}, clamped to {}.", seconds, target);
    // current_time updates on the resource's next TimeUpdate event
    controller.resource.set_position(target).await;
}

#[instrument(skip(controller))]
pub async fn handle_set_volume(controller: &mut PlayerController, volume: f64) {
    let clamped = volume.clamp(0.0, 1.0);
    debug!(target: PLAYER_LOG_TARGET, "Handling SetVolume command: {} (clamped {}).", volume, clamped);
    controller.resource.set_volume(clamped).await;
}

#[instrument(skip(controller))]
pub async fn handle_toggle_mute(controller: &mut PlayerController) {
    let muted = !controller.state.is_muted;
    debug!(target: PLAYER_LOG_TARGET, "Handling ToggleMute command: muted = {}.", muted);
    // Volume value is untouched; unmuting restores the prior level
    controller.resource.set_muted(muted).await;
}

#[instrument(skip(controller))]
pub async fn handle_toggle_fullscreen(controller: &mut PlayerController) {
    let enter = !controller.state.is_fullscreen;
    debug!(target: PLAYER_LOG_TARGET, "Handling ToggleFullscreen command: enter = {}.", enter);
    // is_fullscreen derives from the FullscreenChange event, so a denied
    // request leaves it correctly false
    controller.resource.request_fullscreen(enter).await;
}

#[instrument(skip(controller, level))]
pub async fn handle_set_quality(controller: &mut PlayerController, level: String) {
    if let Some(reason) = refuse_mutation(controller, "SetQuality") {
        controller.broadcast_update(reason);
        return;
    }
    if !controller.settings.quality_levels.iter().any(|q| q == &level) {
        warn!(target: PLAYER_LOG_TARGET, "SetQuality rejected: '{}' is not a configured level.", level);
        controller.broadcast_update(PlayerStateUpdate::CommandRejected {
            command: "SetQuality",
            reason: format!("Quality level '{}' is not configured", level),
        });
        return;
    }
    debug!(target: PLAYER_LOG_TARGET, "Handling SetQuality command: {}.", level);
    controller.state.quality = level.clone();
    controller.broadcast_update(PlayerStateUpdate::QualityChanged(level.clone()));
    controller.resource.switch_quality(&level).await;
}

#[instrument(skip(controller))]
pub async fn handle_set_playback_rate(controller: &mut PlayerController, rate: f64) {
    if let Some(reason) = refuse_mutation(controller, "SetPlaybackRate") {
        controller.broadcast_update(reason);
        return;
    }
    if !controller.settings.playback_rates.iter().any(|r| *r == rate) {
        warn!(target: PLAYER_LOG_TARGET, "SetPlaybackRate rejected: {} is not a configured rate.", rate);
        controller.broadcast_update(PlayerStateUpdate::CommandRejected {
            command: "SetPlaybackRate",
            reason: format!("Playback rate {} is not configured", rate),
        });
        return;
    }
    debug!(target: PLAYER_LOG_TARGET, "Handling SetPlaybackRate command: {}.", rate);
    controller.state.playback_rate = rate;
    controller.broadcast_update(PlayerStateUpdate::PlaybackRateChanged(rate));
    controller.resource.set_playback_rate(rate).await;
}

/// After a resource-level error, commands that mutate state directly are
/// refused until a fresh resource is attached.
fn refuse_mutation(
    controller: &PlayerController,
    command: &'static str,
) -> Option<PlayerStateUpdate> {
    controller.state.error.as_ref().map(|error| {
        warn!(target: PLAYER_LOG_TARGET, "{} refused after playback error: {}", command, error);
        PlayerStateUpdate::CommandRejected {
            command,
            reason: format!("Playback error pending: {}", error),
        }
    })
}
