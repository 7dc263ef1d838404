//! The unified imperative player surface exposed to applications.

use async_trait::async_trait;
use core_protocol::PlayerState;

use crate::error::Result;
use crate::platform::PlatformSendSync;

/// Imperative control over a player instance, independent of where the
/// player actually runs.
///
/// The serialized implementation in `core-player` forwards every call over
/// a [`CommandTransport`](crate::CommandTransport); a direct implementation
/// may call into an in-process player. Either way the calling convention is
/// the same:
///
/// - Mutating calls return once the command is handed to the transport.
/// - Getters always produce a value. When the far side cannot answer
///   (player not ready, command timed out, value undefined) the
///   implementation substitutes the documented default rather than
///   surfacing an error: `0.0` for numeric getters, `false` for boolean
///   ones, an empty string for text, `1.0` for the playback rate, `[1.0]`
///   for the rate list, and [`PlayerState::Unstarted`] for the state
///   getter.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait PlayerController: PlatformSendSync {
    async fn play(&self) -> Result<()>;
    async fn pause(&self) -> Result<()>;
    async fn stop(&self) -> Result<()>;

    /// Seeks to `seconds`. `allow_seek_ahead` controls whether the player
    /// may request unbuffered data from the server.
    async fn seek_to(&self, seconds: f64, allow_seek_ahead: bool) -> Result<()>;

    async fn set_volume(&self, volume: f64) -> Result<()>;
    async fn get_volume(&self) -> f64;
    async fn mute(&self) -> Result<()>;
    async fn un_mute(&self) -> Result<()>;
    async fn is_muted(&self) -> bool;

    async fn get_current_time(&self) -> f64;
    async fn get_duration(&self) -> f64;
    async fn get_video_url(&self) -> String;
    async fn get_video_embed_code(&self) -> String;

    async fn get_playback_rate(&self) -> f64;
    async fn set_playback_rate(&self, rate: f64) -> Result<()>;
    async fn get_available_playback_rates(&self) -> Vec<f64>;

    async fn get_player_state(&self) -> PlayerState;
    async fn get_video_loaded_fraction(&self) -> f64;

    /// Loads a new video and starts playback.
    async fn load_video_by_id(
        &self,
        video_id: &str,
        start_seconds: Option<f64>,
        end_seconds: Option<f64>,
    ) -> Result<()>;

    /// Queues a new video without starting playback.
    async fn cue_video_by_id(
        &self,
        video_id: &str,
        start_seconds: Option<f64>,
        end_seconds: Option<f64>,
    ) -> Result<()>;

    async fn set_size(&self, width: f64, height: f64) -> Result<()>;

    /// Changes the progress reporting cadence, in milliseconds. `0`
    /// disables progress reporting.
    async fn update_progress_interval(&self, interval_ms: u64) -> Result<()>;

    /// Tears the player down. After this call every other method is a
    /// no-op; events stop being delivered.
    async fn destroy(&self) -> Result<()>;
}
