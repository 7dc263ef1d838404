//! Context → host event envelopes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::PlayerError;
use crate::player::{PlaybackQuality, PlayerInfo, PlayerState, ProgressData};

/// The tagged union arriving from the player-hosting context.
///
/// Spontaneous player events and command results share one channel; the
/// `type` discriminant separates them. `commandResult` (and `error` when it
/// carries an `id`) correlate back to a pending command, everything else
/// fans out to event subscribers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EventEnvelope {
    #[serde(rename_all = "camelCase")]
    Ready { player_info: PlayerInfo },
    StateChange {
        state: PlayerState,
    },
    Error {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        error: PlayerError,
    },
    Progress {
        #[serde(flatten)]
        progress: ProgressData,
    },
    #[serde(rename_all = "camelCase")]
    PlaybackRateChange { playback_rate: f64 },
    PlaybackQualityChange {
        quality: PlaybackQuality,
    },
    AutoplayBlocked,
    CommandResult {
        id: String,
        result: Value,
    },
}

impl EventEnvelope {
    /// Envelope for a successfully executed result-bearing command.
    pub fn command_result(id: impl Into<String>, result: Value) -> Self {
        EventEnvelope::CommandResult {
            id: id.into(),
            result,
        }
    }

    /// Error envelope, optionally keyed to a pending command.
    pub fn error(error: PlayerError, id: Option<String>) -> Self {
        EventEnvelope::Error { id, error }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn command_result_wire_shape() {
        let envelope = EventEnvelope::command_result("7", json!(42.0));
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({"type": "commandResult", "id": "7", "result": 42.0})
        );
    }

    #[test]
    fn progress_fields_are_flattened() {
        let raw = json!({
            "type": "progress",
            "currentTime": 12.0,
            "duration": 48.0,
            "percentage": 25.0,
            "loadedFraction": 0.6,
        });
        let envelope: EventEnvelope = serde_json::from_value(raw.clone()).unwrap();
        match &envelope {
            EventEnvelope::Progress { progress } => {
                assert_eq!(progress.current_time, 12.0);
                assert_eq!(progress.loaded_fraction, 0.6);
            }
            other => panic!("unexpected envelope: {other:?}"),
        }
        assert_eq!(serde_json::to_value(&envelope).unwrap(), raw);
    }

    #[test]
    fn ready_carries_the_player_info_snapshot() {
        let raw = json!({
            "type": "ready",
            "playerInfo": {"volume": 80.0, "playerState": 5}
        });
        let envelope: EventEnvelope = serde_json::from_value(raw).unwrap();
        match envelope {
            EventEnvelope::Ready { player_info } => {
                assert_eq!(player_info.volume, Some(80.0));
                assert_eq!(player_info.player_state, Some(PlayerState::Cued));
            }
            other => panic!("unexpected envelope: {other:?}"),
        }
    }

    #[test]
    fn error_envelope_with_and_without_id() {
        let keyed: EventEnvelope = serde_json::from_value(json!({
            "type": "error",
            "id": "3",
            "error": {"code": -5, "message": "Execution failed: boom"}
        }))
        .unwrap();
        match keyed {
            EventEnvelope::Error { id, error } => {
                assert_eq!(id.as_deref(), Some("3"));
                assert_eq!(error.code, -5);
            }
            other => panic!("unexpected envelope: {other:?}"),
        }

        let spontaneous = EventEnvelope::error(PlayerError::from_player_code(100), None);
        let json = serde_json::to_string(&spontaneous).unwrap();
        assert!(!json.contains("\"id\""));
    }

    #[test]
    fn autoplay_blocked_has_no_payload() {
        let envelope: EventEnvelope =
            serde_json::from_value(json!({"type": "autoplayBlocked"})).unwrap();
        assert_eq!(envelope, EventEnvelope::AutoplayBlocked);
    }

    #[test]
    fn unrecognized_type_fails_to_parse() {
        let raw = json!({"type": "telemetry", "payload": {}});
        assert!(serde_json::from_value::<EventEnvelope>(raw).is_err());
    }
}
