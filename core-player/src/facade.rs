//! The application-facing player handle.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::warn;

use bridge_traits::PlayerController;
use core_protocol::{
    resolve_video_source, PlayerError, PlayerState, PlayerVars,
};

use crate::events::{ListenerFn, ListenerRegistry, PlayerEvent, PlayerEventKind, Subscription};

/// A player instance as the application sees it.
///
/// Clones share one underlying player. The handle never rejects: mutating
/// calls on an unbound or destroyed player are no-ops, getters fall back to
/// documented defaults, and every failure the application should react to
/// arrives as a [`PlayerEvent::Error`] through [`YoutubePlayer::subscribe`].
#[derive(Clone)]
pub struct YoutubePlayer {
    pub(crate) inner: Arc<PlayerInner>,
}

pub(crate) struct PlayerInner {
    pub(crate) registry: Arc<ListenerRegistry>,
    pub(crate) controller: Mutex<Option<Arc<dyn PlayerController>>>,
    pub(crate) progress_interval_ms: AtomicU64,
    pub(crate) destroyed: AtomicBool,
    video_id: Mutex<String>,
    options: PlayerVars,
}

impl std::fmt::Debug for YoutubePlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YoutubePlayer").finish_non_exhaustive()
    }
}

impl YoutubePlayer {
    /// Creates a player for a video id or any recognized video URL shape.
    ///
    /// The source is validated up front; an unrecognizable source is the one
    /// construction-time error (code 1002).
    pub fn new(source: &str, options: PlayerVars) -> Result<Self, PlayerError> {
        let video_id = resolve_video_source(source)?;
        Ok(Self {
            inner: Arc::new(PlayerInner {
                registry: Arc::new(ListenerRegistry::new()),
                controller: Mutex::new(None),
                progress_interval_ms: AtomicU64::new(0),
                destroyed: AtomicBool::new(false),
                video_id: Mutex::new(video_id),
                options,
            }),
        })
    }

    /// Registers a callback for one event kind.
    pub fn subscribe(
        &self,
        kind: PlayerEventKind,
        callback: impl ListenerFn + 'static,
    ) -> Subscription {
        self.inner.registry.subscribe(kind, callback)
    }

    pub fn video_id(&self) -> String {
        self.inner.video_id.lock().clone()
    }

    pub fn options(&self) -> &PlayerVars {
        &self.inner.options
    }

    pub fn is_destroyed(&self) -> bool {
        self.inner.destroyed.load(Ordering::SeqCst)
    }

    // ========================================================================
    // Playback control
    // ========================================================================

    pub async fn play(&self) {
        if let Some(controller) = self.controller() {
            if let Err(error) = controller.play().await {
                warn!(%error, "play failed");
            }
        }
    }

    pub async fn pause(&self) {
        if let Some(controller) = self.controller() {
            if let Err(error) = controller.pause().await {
                warn!(%error, "pause failed");
            }
        }
    }

    pub async fn stop(&self) {
        if let Some(controller) = self.controller() {
            if let Err(error) = controller.stop().await {
                warn!(%error, "stop failed");
            }
        }
    }

    pub async fn seek_to(&self, seconds: f64, allow_seek_ahead: bool) {
        if let Some(controller) = self.controller() {
            if let Err(error) = controller.seek_to(seconds, allow_seek_ahead).await {
                warn!(%error, "seek failed");
            }
        }
    }

    /// Loads and plays a new video. An unrecognizable source emits error
    /// 1002 and leaves the current video untouched.
    pub async fn load_video_by_id(
        &self,
        source: &str,
        start_seconds: Option<f64>,
        end_seconds: Option<f64>,
    ) {
        if let Some(video_id) = self.accept_source(source) {
            if let Some(controller) = self.controller() {
                if let Err(error) = controller
                    .load_video_by_id(&video_id, start_seconds, end_seconds)
                    .await
                {
                    warn!(%error, "loadVideoById failed");
                }
            }
        }
    }

    /// Queues a new video without playing it. Same validation as
    /// [`YoutubePlayer::load_video_by_id`].
    pub async fn cue_video_by_id(
        &self,
        source: &str,
        start_seconds: Option<f64>,
        end_seconds: Option<f64>,
    ) {
        if let Some(video_id) = self.accept_source(source) {
            if let Some(controller) = self.controller() {
                if let Err(error) = controller
                    .cue_video_by_id(&video_id, start_seconds, end_seconds)
                    .await
                {
                    warn!(%error, "cueVideoById failed");
                }
            }
        }
    }

    // ========================================================================
    // Volume and rate
    // ========================================================================

    pub async fn set_volume(&self, volume: f64) {
        if let Some(controller) = self.controller() {
            if let Err(error) = controller.set_volume(volume).await {
                warn!(%error, "setVolume failed");
            }
        }
    }

    pub async fn get_volume(&self) -> f64 {
        match self.controller() {
            Some(controller) => controller.get_volume().await,
            None => 0.0,
        }
    }

    pub async fn mute(&self) {
        if let Some(controller) = self.controller() {
            if let Err(error) = controller.mute().await {
                warn!(%error, "mute failed");
            }
        }
    }

    pub async fn un_mute(&self) {
        if let Some(controller) = self.controller() {
            if let Err(error) = controller.un_mute().await {
                warn!(%error, "unMute failed");
            }
        }
    }

    pub async fn is_muted(&self) -> bool {
        match self.controller() {
            Some(controller) => controller.is_muted().await,
            None => false,
        }
    }

    pub async fn set_playback_rate(&self, rate: f64) {
        if let Some(controller) = self.controller() {
            if let Err(error) = controller.set_playback_rate(rate).await {
                warn!(%error, "setPlaybackRate failed");
            }
        }
    }

    pub async fn get_playback_rate(&self) -> f64 {
        match self.controller() {
            Some(controller) => controller.get_playback_rate().await,
            None => 1.0,
        }
    }

    pub async fn get_available_playback_rates(&self) -> Vec<f64> {
        match self.controller() {
            Some(controller) => controller.get_available_playback_rates().await,
            None => vec![1.0],
        }
    }

    // ========================================================================
    // Playback position and metadata
    // ========================================================================

    pub async fn get_current_time(&self) -> f64 {
        match self.controller() {
            Some(controller) => controller.get_current_time().await,
            None => 0.0,
        }
    }

    pub async fn get_duration(&self) -> f64 {
        match self.controller() {
            Some(controller) => controller.get_duration().await,
            None => 0.0,
        }
    }

    pub async fn get_video_url(&self) -> String {
        match self.controller() {
            Some(controller) => controller.get_video_url().await,
            None => String::new(),
        }
    }

    pub async fn get_video_embed_code(&self) -> String {
        match self.controller() {
            Some(controller) => controller.get_video_embed_code().await,
            None => String::new(),
        }
    }

    pub async fn get_player_state(&self) -> PlayerState {
        match self.controller() {
            Some(controller) => controller.get_player_state().await,
            None => PlayerState::Unstarted,
        }
    }

    pub async fn get_video_loaded_fraction(&self) -> f64 {
        match self.controller() {
            Some(controller) => controller.get_video_loaded_fraction().await,
            None => 0.0,
        }
    }

    pub async fn set_size(&self, width: f64, height: f64) {
        if let Some(controller) = self.controller() {
            if let Err(error) = controller.set_size(width, height).await {
                warn!(%error, "setSize failed");
            }
        }
    }

    // ========================================================================
    // Progress reporting
    // ========================================================================

    /// Changes the progress reporting cadence. `0` disables reporting.
    ///
    /// The value is only pushed to the player when it actually changes; the
    /// session re-pushes it unconditionally whenever the hosting context is
    /// recreated.
    pub async fn set_progress_interval(&self, interval_ms: u64) {
        let previous = self
            .inner
            .progress_interval_ms
            .swap(interval_ms, Ordering::SeqCst);
        if previous == interval_ms {
            return;
        }
        if let Some(controller) = self.controller() {
            if let Err(error) = controller.update_progress_interval(interval_ms).await {
                warn!(%error, "updateProgressInterval failed");
            }
        }
    }

    // ========================================================================
    // Teardown
    // ========================================================================

    /// Tears the player down: the controller is destroyed and unbound, the
    /// progress cadence reset, and every subscription dropped. Idempotent.
    pub async fn destroy(&self) {
        if self.inner.destroyed.swap(true, Ordering::SeqCst) {
            return;
        }
        let controller = self.inner.controller.lock().take();
        if let Some(controller) = controller {
            if let Err(error) = controller.destroy().await {
                warn!(%error, "controller teardown failed");
            }
        }
        self.inner.progress_interval_ms.store(0, Ordering::SeqCst);
        self.inner.registry.clear();
    }

    fn controller(&self) -> Option<Arc<dyn PlayerController>> {
        if self.is_destroyed() {
            return None;
        }
        self.inner.controller.lock().clone()
    }

    fn accept_source(&self, source: &str) -> Option<String> {
        match resolve_video_source(source) {
            Ok(video_id) => {
                *self.inner.video_id.lock() = video_id.clone();
                Some(video_id)
            }
            Err(error) => {
                self.inner.registry.emit(&PlayerEvent::Error(error));
                None
            }
        }
    }
}
