//! Player-facing data types: states, snapshots, progress samples, and the
//! host configuration surface.

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Playback lifecycle state as reported by the official player.
///
/// The set is closed. Any other integer arriving on the wire is a protocol
/// violation and fails deserialization; it is never treated as a new state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerState {
    Unstarted,
    Ended,
    Playing,
    Paused,
    Buffering,
    Cued,
}

impl PlayerState {
    /// The official numeric code for this state.
    pub fn code(&self) -> i32 {
        match self {
            PlayerState::Unstarted => -1,
            PlayerState::Ended => 0,
            PlayerState::Playing => 1,
            PlayerState::Paused => 2,
            PlayerState::Buffering => 3,
            PlayerState::Cued => 5,
        }
    }

    /// States during which the progress pump should be running.
    pub fn is_playing_like(&self) -> bool {
        matches!(self, PlayerState::Playing | PlayerState::Buffering)
    }
}

impl TryFrom<i64> for PlayerState {
    type Error = i64;

    fn try_from(value: i64) -> Result<Self, i64> {
        match value {
            -1 => Ok(PlayerState::Unstarted),
            0 => Ok(PlayerState::Ended),
            1 => Ok(PlayerState::Playing),
            2 => Ok(PlayerState::Paused),
            3 => Ok(PlayerState::Buffering),
            5 => Ok(PlayerState::Cued),
            other => Err(other),
        }
    }
}

impl Serialize for PlayerState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.code())
    }
}

impl<'de> Deserialize<'de> for PlayerState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = i64::deserialize(deserializer)?;
        PlayerState::try_from(value)
            .map_err(|other| de::Error::custom(format!("invalid player state code: {other}")))
    }
}

/// Playback quality labels reported by the official player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackQuality {
    Small,
    Medium,
    Large,
    Hd720,
    Hd1080,
    Highres,
}

/// Player dimensions carried inside the ready snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerSize {
    pub width: f64,
    pub height: f64,
}

/// Snapshot of the player captured when the `ready` event fires.
///
/// Every field is optional: the official player populates what it knows at
/// the moment the embed finishes bootstrapping.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_playback_rates: Option<Vec<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_quality_levels: Option<Vec<PlaybackQuality>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muted: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playback_quality: Option<PlaybackQuality>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playback_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_state: Option<PlayerState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<PlayerSize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
}

/// One sample from the progress pump.
///
/// `percentage` is derived (`currentTime / duration * 100`, zero when the
/// duration is unknown); `loaded_fraction` is read from the buffering
/// accessor immediately after the time pair; the reads are back-to-back but
/// not atomic with respect to each other.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressData {
    pub current_time: f64,
    pub duration: f64,
    pub percentage: f64,
    pub loaded_fraction: f64,
}

impl ProgressData {
    /// Build a sample from raw accessor reads, deriving the percentage.
    pub fn from_readings(current_time: f64, duration: f64, loaded_fraction: f64) -> Self {
        let percentage = if duration > 0.0 {
            current_time / duration * 100.0
        } else {
            0.0
        };
        Self {
            current_time,
            duration,
            percentage,
            loaded_fraction,
        }
    }
}

/// Host-facing player configuration.
///
/// Each field maps 1:1 to an official embed parameter; booleans are coerced
/// to `0`/`1` at the wire boundary by [`PlayerVars::embed_params`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerVars {
    #[serde(default)]
    pub autoplay: bool,
    /// Player controls display. On by default, matching the official embed.
    #[serde(default = "default_controls")]
    pub controls: bool,
    #[serde(default, rename = "loop")]
    pub loop_playback: bool,
    #[serde(default)]
    pub muted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<f64>,
    #[serde(default)]
    pub playsinline: bool,
    #[serde(default)]
    pub rel: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
}

fn default_controls() -> bool {
    true
}

impl Default for PlayerVars {
    fn default() -> Self {
        Self {
            autoplay: false,
            controls: true,
            loop_playback: false,
            muted: false,
            start_time: None,
            end_time: None,
            playsinline: false,
            rel: false,
            origin: None,
        }
    }
}

impl PlayerVars {
    /// Translate into official embed parameters.
    ///
    /// Booleans become `0`/`1`; `enablejsapi` is always on since the bridge
    /// cannot function without the scripting API.
    pub fn embed_params(&self) -> Vec<(&'static str, String)> {
        fn flag(value: bool) -> String {
            if value { "1" } else { "0" }.to_owned()
        }

        let mut params = vec![
            ("autoplay", flag(self.autoplay)),
            ("controls", flag(self.controls)),
            ("loop", flag(self.loop_playback)),
            ("mute", flag(self.muted)),
            ("playsinline", flag(self.playsinline)),
            ("rel", flag(self.rel)),
            ("enablejsapi", "1".to_owned()),
        ];
        if let Some(start) = self.start_time {
            params.push(("start", (start as i64).to_string()));
        }
        if let Some(end) = self.end_time {
            params.push(("end", (end as i64).to_string()));
        }
        if let Some(origin) = &self.origin {
            params.push(("origin", origin.clone()));
        }
        params
    }
}
