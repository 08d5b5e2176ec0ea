// src/player/run_loop.rs
use super::{command_handler, PlayerCommand, PlayerController, PlayerStateUpdate, PLAYER_LOG_TARGET};
use crate::player::resource::ResourceEvent;
use crate::player::time_ranges::BufferedRanges;
use tracing::{debug, info, trace, warn};

/// Runs the controller's event/command processing loop.
pub async fn run_controller_loop(controller: &mut PlayerController) {
    info!(target: PLAYER_LOG_TARGET, "Player controller loop started.");

    if controller.settings.autoplay {
        debug!(target: PLAYER_LOG_TARGET, "Autoplay enabled, requesting playback.");
        controller.resource.request_play().await;
    }

    loop {
        tokio::select! {
            // Resource truth first: state is event-derived, so pending
            // events are applied before the next command reads state.
            biased;

            Some(event) = controller.event_rx.recv() => {
                apply_event(controller, event).await;
            }

            Some(command) = controller.command_rx.recv() => {
                trace!(target: PLAYER_LOG_TARGET, "Received command: {:?}", command);
                match command {
                    PlayerCommand::Play => command_handler::handle_play(controller).await,
                    PlayerCommand::Pause => command_handler::handle_pause(controller).await,
                    PlayerCommand::Seek(seconds) => command_handler::handle_seek(controller, seconds).await,
                    PlayerCommand::SetVolume(volume) => command_handler::handle_set_volume(controller, volume).await,
                    PlayerCommand::ToggleMute => command_handler::handle_toggle_mute(controller).await,
                    PlayerCommand::ToggleFullscreen => command_handler::handle_toggle_fullscreen(controller).await,
                    PlayerCommand::SetQuality(level) => command_handler::handle_set_quality(controller, level).await,
                    PlayerCommand::SetPlaybackRate(rate) => command_handler::handle_set_playback_rate(controller, rate).await,
                    PlayerCommand::GetState(responder) => {
                        let _ = responder.send(controller.state.clone()); // Ignore error if receiver dropped
                    }
                    PlayerCommand::Shutdown => {
                        info!(target: PLAYER_LOG_TARGET, "Shutdown command received. Exiting controller loop.");
                        break;
                    }
                }
            }

            else => {
                info!(target: PLAYER_LOG_TARGET, "Command and event channels closed. Exiting controller loop.");
                break;
            }
        }
    }

    info!(target: PLAYER_LOG_TARGET, "Player controller loop finished.");
}

/// Applies one resource event to the snapshot, replacing only the affected
/// fields, and broadcasts the change.
async fn apply_event(controller: &mut PlayerController, event: ResourceEvent) {
    trace!(target: PLAYER_LOG_TARGET, "Received resource event: {:?}", event);
    match event {
        ResourceEvent::TimeUpdate(seconds) => {
            let mut time = seconds.max(0.0);
            if let Some(duration) = controller.state.duration {
                time = time.min(duration);
            }
            controller.state.current_time = time;
            controller.broadcast_update(PlayerStateUpdate::TimeChanged(time));
        }
        ResourceEvent::DurationChange(duration) => {
            if !duration.is_finite() || duration < 0.0 {
                warn!(target: PLAYER_LOG_TARGET, "Ignoring invalid duration: {}", duration);
                return;
            }
            controller.state.duration = Some(duration);
            controller.state.current_time = controller.state.current_time.min(duration);
            controller.state.buffered.clamp_to(duration);
            controller.broadcast_update(PlayerStateUpdate::DurationKnown(duration));
        }
        ResourceEvent::BufferedChange(pairs) => {
            let mut buffered = BufferedRanges::from_pairs(pairs);
            if let Some(duration) = controller.state.duration {
                buffered.clamp_to(duration);
            }
            controller.state.buffered = buffered.clone();
            controller.broadcast_update(PlayerStateUpdate::BufferedChanged(buffered));
        }
        ResourceEvent::Play => {
            controller.state.is_playing = true;
            controller.broadcast_update(PlayerStateUpdate::Playing);
        }
        ResourceEvent::Pause => {
            controller.state.is_playing = false;
            controller.broadcast_update(PlayerStateUpdate::Paused);
        }
        ResourceEvent::Ended => {
            if controller.settings.loop_playback {
                debug!(target: PLAYER_LOG_TARGET, "Playback ended, looping enabled: restarting.");
                controller.resource.set_position(0.0).await;
                controller.resource.request_play().await;
            } else {
                controller.state.is_playing = false;
                controller.broadcast_update(PlayerStateUpdate::Stopped);
            }
        }
        ResourceEvent::VolumeChange { volume, muted } => {
            controller.state.volume = volume.clamp(0.0, 1.0);
            controller.state.is_muted = muted;
            controller.broadcast_update(PlayerStateUpdate::VolumeChanged {
                volume: controller.state.volume,
                muted,
            });
        }
        ResourceEvent::FullscreenChange(active) => {
            controller.state.is_fullscreen = active;
            controller.broadcast_update(PlayerStateUpdate::FullscreenChanged(active));
        }
        ResourceEvent::Error(message) => {
            warn!(target: PLAYER_LOG_TARGET, "Resource reported playback error: {}", message);
            controller.state.error = Some(message.clone());
            controller.broadcast_update(PlayerStateUpdate::PlaybackError(message));
        }
    }
}
