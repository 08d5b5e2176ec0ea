//! Media playback state controller
//!
//! Keeps an observable [`PlaybackState`] snapshot synchronized with an
//! attached [`PlayableResource`] and exposes the only sanctioned command
//! surface for mutating playback. State is always event-derived: commands
//! ask the resource, the resource's own events feed the snapshot.

use crate::player::resource::{PlayableResource, ResourceEvent};
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, instrument, trace};

mod command_handler;
pub mod resource;
mod run_loop;
pub mod settings;
mod state;
pub mod time_ranges;

// Re-export key types for convenience
pub use settings::{ControlsConfig, PlayerSettings};
pub use state::{PlaybackState, PlayerCommand, PlayerStateUpdate};
pub use time_ranges::BufferedRanges;

pub(crate) const PLAYER_LOG_TARGET: &str = "mediacli::player";

/// Mirrors a playable resource's event stream into a state snapshot and
/// executes the command surface against it.
pub struct PlayerController {
    // --- Configuration ---
    resource: Arc<dyn PlayableResource>,
    settings: PlayerSettings,

    // --- State ---
    state: PlaybackState,

    // --- Communication ---
    command_rx: mpsc::Receiver<PlayerCommand>,
    event_rx: mpsc::Receiver<ResourceEvent>,
    update_tx: broadcast::Sender<PlayerStateUpdate>,
}

impl PlayerController {
    /// Creates a new controller attached to `resource`, plus the command
    /// sender and the event sender the resource feeds its events into.
    /// The controller itself should be run in a separate task using
    /// [`PlayerController::run`].
    pub fn new(
        resource: Arc<dyn PlayableResource>,
        settings: PlayerSettings,
        command_buffer_size: usize,
        event_buffer_size: usize,
    ) -> (
        Self,
        mpsc::Sender<PlayerCommand>,
        mpsc::Sender<ResourceEvent>,
    ) {
        let (command_tx, command_rx) = mpsc::channel(command_buffer_size);
        let (event_tx, event_rx) = mpsc::channel(event_buffer_size);
        let (update_tx, _) = broadcast::channel(64);

        let state = PlaybackState::initial(&settings);
        let controller = PlayerController {
            resource,
            settings,
            state,
            command_rx,
            event_rx,
            update_tx,
        };

        (controller, command_tx, event_tx)
    }

    /// Subscribes to controller state updates.
    pub fn subscribe_state_updates(&self) -> broadcast::Receiver<PlayerStateUpdate> {
        self.update_tx.subscribe()
    }

    /// Sends a state update via the broadcast channel.
    fn broadcast_update(&self, update: PlayerStateUpdate) {
        trace!(target: PLAYER_LOG_TARGET, "Broadcasting state update: {:?}", update);
        if self.update_tx.send(update.clone()).is_err() {
            // Normal if there are no active receivers yet
            debug!(target: PLAYER_LOG_TARGET, "No active listeners for state update: {:?}", update);
        }
    }

    /// Runs the controller's processing loop. This should be spawned as a
    /// Tokio task; it exits on `Shutdown` or when both channels close.
    #[instrument(skip(self))]
    pub async fn run(&mut self) {
        run_loop::run_controller_loop(self).await;
    }
}
