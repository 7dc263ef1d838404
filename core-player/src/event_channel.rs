//! Inbound event routing.
//!
//! Raw JSON text from the player-hosting context enters here. Command
//! results and id-carrying errors go back to the [`CommandChannel`] pending
//! table; everything else fans out to the [`ListenerRegistry`].

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use core_protocol::{EventEnvelope, PlayerError};

use crate::command_channel::CommandChannel;
use crate::events::{ListenerRegistry, PlayerEvent};

pub struct EventChannel {
    commands: Arc<CommandChannel>,
    registry: Arc<ListenerRegistry>,
}

impl EventChannel {
    pub fn new(commands: Arc<CommandChannel>, registry: Arc<ListenerRegistry>) -> Self {
        Self { commands, registry }
    }

    /// Processes one raw payload from the context.
    ///
    /// Empty or JSON-`null` payloads are ignored. Unparseable text becomes a
    /// synthetic error event (code 1000). An envelope whose `type` is
    /// outside the known set is logged and dropped, never an error.
    pub fn handle_raw(&self, payload: &str) {
        if payload.trim().is_empty() {
            return;
        }

        let value: Value = match serde_json::from_str(payload) {
            Ok(value) => value,
            Err(error) => {
                warn!(%error, "unparseable event payload");
                self.registry
                    .emit(&PlayerEvent::Error(PlayerError::parse_failure()));
                return;
            }
        };
        if value.is_null() {
            return;
        }

        match serde_json::from_value::<EventEnvelope>(value) {
            Ok(envelope) => self.dispatch(envelope),
            Err(error) => {
                debug!(%error, "dropping unrecognized event envelope");
            }
        }
    }

    fn dispatch(&self, envelope: EventEnvelope) {
        match envelope {
            EventEnvelope::CommandResult { id, result } => {
                if !self.commands.resolve(&id, result) {
                    debug!(id = %id, "result for unknown or expired command id");
                }
            }
            EventEnvelope::Error { id, error } => {
                // a failed command must not leave its caller pending
                if let Some(id) = id {
                    self.commands.resolve(&id, Value::Null);
                }
                self.registry.emit(&PlayerEvent::Error(error));
            }
            EventEnvelope::Ready { player_info } => {
                self.registry.emit(&PlayerEvent::Ready(player_info));
            }
            EventEnvelope::StateChange { state } => {
                self.registry.emit(&PlayerEvent::StateChange(state));
            }
            EventEnvelope::Progress { progress } => {
                self.registry.emit(&PlayerEvent::Progress(progress));
            }
            EventEnvelope::PlaybackRateChange { playback_rate } => {
                self.registry
                    .emit(&PlayerEvent::PlaybackRateChange(playback_rate));
            }
            EventEnvelope::PlaybackQualityChange { quality } => {
                self.registry
                    .emit(&PlayerEvent::PlaybackQualityChange(quality));
            }
            EventEnvelope::AutoplayBlocked => {
                self.registry.emit(&PlayerEvent::AutoplayBlocked);
            }
        }
    }
}
