//! The player as seen from inside the hosting context.

use async_trait::async_trait;
use core_protocol::PlayerState;

use crate::error::Result;
use crate::platform::PlatformSendSync;

/// A handle to an actual player instance inside the hosting context,
/// mirroring the official embedded player API.
///
/// This is the surface the command dispatcher in `core-context` drives.
/// Getters return `Ok(None)` when the underlying player has no value yet
/// (for example before the first video is loaded); the dispatcher turns
/// `None` into the documented wire default so the host-side controller
/// never observes an absence.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait IframePlayer: PlatformSendSync {
    async fn play_video(&self) -> Result<()>;
    async fn pause_video(&self) -> Result<()>;
    async fn stop_video(&self) -> Result<()>;
    async fn seek_to(&self, seconds: f64, allow_seek_ahead: bool) -> Result<()>;

    async fn set_volume(&self, volume: f64) -> Result<()>;
    async fn get_volume(&self) -> Result<Option<f64>>;
    async fn mute(&self) -> Result<()>;
    async fn un_mute(&self) -> Result<()>;
    async fn is_muted(&self) -> Result<Option<bool>>;

    async fn get_current_time(&self) -> Result<Option<f64>>;
    async fn get_duration(&self) -> Result<Option<f64>>;
    async fn get_video_url(&self) -> Result<Option<String>>;
    async fn get_video_embed_code(&self) -> Result<Option<String>>;

    async fn get_playback_rate(&self) -> Result<Option<f64>>;
    async fn set_playback_rate(&self, rate: f64) -> Result<()>;
    async fn get_available_playback_rates(&self) -> Result<Option<Vec<f64>>>;

    async fn get_player_state(&self) -> Result<Option<PlayerState>>;
    async fn get_video_loaded_fraction(&self) -> Result<Option<f64>>;

    async fn load_video_by_id(
        &self,
        video_id: &str,
        start_seconds: Option<f64>,
        end_seconds: Option<f64>,
    ) -> Result<()>;

    async fn cue_video_by_id(
        &self,
        video_id: &str,
        start_seconds: Option<f64>,
        end_seconds: Option<f64>,
    ) -> Result<()>;

    async fn set_size(&self, width: f64, height: f64) -> Result<()>;

    async fn destroy(&self) -> Result<()>;
}

/// Loads the official player script into the hosting context.
///
/// `core-context` wraps implementations with shared-init semantics: the
/// first `load` runs, concurrent callers await the same outcome, and the
/// result (success or failure) is cached for the life of the context.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait ApiBootstrap: PlatformSendSync {
    async fn load(&self) -> Result<()>;
}
