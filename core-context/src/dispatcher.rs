//! Command execution against the in-context player.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde_json::{json, Value};
use tracing::{debug, warn};

use bridge_traits::{EventSink, IframePlayer};
use core_protocol::{
    Command, CommandArg, CommandEnvelope, EventEnvelope, PlaybackQuality, PlayerError, PlayerInfo,
    PlayerState,
};

use crate::post_event;
use crate::pump::ProgressPump;

/// Executes inbound command envelopes and forwards player callbacks.
///
/// The dispatcher matches over the closed [`Command`] set; a name outside it
/// gets a command-not-found reply (code −4) and a command whose execution
/// fails gets an execution-failed reply (code −5), both keyed to the
/// envelope's correlation id so the host never leaves a caller pending.
///
/// `cleanup` flips the destroyed flag: from then on every command and every
/// player callback is a no-op.
pub struct CommandDispatcher {
    player: Arc<dyn IframePlayer>,
    sink: Arc<dyn EventSink>,
    pump: Arc<ProgressPump>,
    destroyed: AtomicBool,
}

impl CommandDispatcher {
    pub fn new(player: Arc<dyn IframePlayer>, sink: Arc<dyn EventSink>) -> Self {
        let pump = ProgressPump::new(Arc::clone(&player), Arc::clone(&sink));
        Self {
            player,
            sink,
            pump,
            destroyed: AtomicBool::new(false),
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed.load(Ordering::SeqCst)
    }

    /// Parses and executes one raw command payload.
    pub async fn handle_raw(&self, payload: &str) {
        match serde_json::from_str::<CommandEnvelope>(payload) {
            Ok(envelope) => self.execute(envelope).await,
            Err(_) => self.reject(payload),
        }
    }

    async fn execute(&self, envelope: CommandEnvelope) {
        if self.is_destroyed() {
            debug!(
                command = envelope.command.wire_name(),
                "command after cleanup ignored"
            );
            return;
        }

        let CommandEnvelope { command, args, id } = envelope;
        match command {
            Command::Play => self.report(id, self.player.play_video().await),
            Command::Pause => self.report(id, self.player.pause_video().await),
            Command::Stop => self.report(id, self.player.stop_video().await),

            Command::SeekTo => {
                let Some(seconds) = args.first().and_then(CommandArg::as_f64) else {
                    return self.post_execution_failure(id, "seekTo requires a numeric position");
                };
                let allow_seek_ahead = args.get(1).and_then(CommandArg::as_bool).unwrap_or(true);
                match self.player.seek_to(seconds, allow_seek_ahead).await {
                    Ok(()) => self.pump.seek_settled(),
                    Err(error) => self.post_execution_failure(id, error),
                }
            }

            // a non-numeric volume is silently ignored, matching the
            // official player's tolerance for bad input here
            Command::SetVolume => match args.first().and_then(CommandArg::as_f64) {
                Some(volume) => self.report(id, self.player.set_volume(volume).await),
                None => {}
            },
            Command::GetVolume => {
                let result = self.player.get_volume().await;
                self.answer(id, result.map(|v| json!(v.unwrap_or(0.0))));
            }
            Command::Mute => self.report(id, self.player.mute().await),
            Command::UnMute => self.report(id, self.player.un_mute().await),
            Command::IsMuted => {
                let result = self.player.is_muted().await;
                self.answer(id, result.map(|v| json!(v.unwrap_or(false))));
            }

            Command::GetCurrentTime => {
                let result = self.player.get_current_time().await;
                self.answer(id, result.map(|v| json!(v.unwrap_or(0.0))));
            }
            Command::GetDuration => {
                let result = self.player.get_duration().await;
                self.answer(id, result.map(|v| json!(v.unwrap_or(0.0))));
            }
            Command::GetVideoUrl => {
                let result = self.player.get_video_url().await;
                self.answer(id, result.map(|v| json!(v.unwrap_or_default())));
            }
            Command::GetVideoEmbedCode => {
                let result = self.player.get_video_embed_code().await;
                self.answer(id, result.map(|v| json!(v.unwrap_or_default())));
            }

            Command::GetPlaybackRate => {
                let result = self.player.get_playback_rate().await;
                self.answer(id, result.map(|v| json!(v.unwrap_or(1.0))));
            }
            Command::SetPlaybackRate => {
                let Some(rate) = args.first().and_then(CommandArg::as_f64) else {
                    return self.post_execution_failure(id, "setPlaybackRate requires a number");
                };
                self.report(id, self.player.set_playback_rate(rate).await);
            }
            Command::GetAvailablePlaybackRates => {
                let result = self.player.get_available_playback_rates().await;
                self.answer(id, result.map(|v| json!(v.unwrap_or_else(|| vec![1.0]))));
            }

            Command::GetPlayerState => {
                let result = self.player.get_player_state().await;
                self.answer(
                    id,
                    result.map(|v| json!(v.unwrap_or(PlayerState::Unstarted))),
                );
            }
            Command::GetVideoLoadedFraction => {
                let result = self.player.get_video_loaded_fraction().await;
                self.answer(id, result.map(|v| json!(v.unwrap_or(0.0))));
            }

            Command::LoadVideoById => {
                let Some(video_id) = args.first().and_then(CommandArg::as_str) else {
                    return self.post_execution_failure(id, "loadVideoById requires a video id");
                };
                let start = args.get(1).and_then(CommandArg::as_f64);
                let end = args.get(2).and_then(CommandArg::as_f64);
                let result = self.player.load_video_by_id(video_id, start, end).await;
                self.report(id, result);
            }
            Command::CueVideoById => {
                let Some(video_id) = args.first().and_then(CommandArg::as_str) else {
                    return self.post_execution_failure(id, "cueVideoById requires a video id");
                };
                let start = args.get(1).and_then(CommandArg::as_f64);
                let end = args.get(2).and_then(CommandArg::as_f64);
                let result = self.player.cue_video_by_id(video_id, start, end).await;
                self.report(id, result);
            }

            Command::SetSize => {
                let (Some(width), Some(height)) = (
                    args.first().and_then(CommandArg::as_f64),
                    args.get(1).and_then(CommandArg::as_f64),
                ) else {
                    return self.post_execution_failure(id, "setSize requires width and height");
                };
                self.report(id, self.player.set_size(width, height).await);
            }

            Command::UpdateProgressInterval => {
                let Some(interval) = args.first().and_then(CommandArg::as_f64) else {
                    return self
                        .post_execution_failure(id, "updateProgressInterval requires a number");
                };
                self.pump.set_interval(interval.max(0.0) as u64);
            }

            Command::Cleanup => self.shutdown().await,
        }
    }

    /// Tears the context side down: timers stop, the player is destroyed,
    /// and all further traffic is ignored. Idempotent.
    pub async fn shutdown(&self) {
        if self.destroyed.swap(true, Ordering::SeqCst) {
            return;
        }
        self.pump.shutdown();
        if let Err(error) = self.player.destroy().await {
            warn!(%error, "player teardown failed");
        }
    }

    // ========================================================================
    // Player callbacks
    // ========================================================================

    pub fn on_ready(&self, player_info: PlayerInfo) {
        if self.is_destroyed() {
            return;
        }
        self.post(EventEnvelope::Ready { player_info });
        self.pump.on_ready();
    }

    pub async fn on_state_change(&self, state: PlayerState) {
        if self.is_destroyed() {
            return;
        }
        self.post(EventEnvelope::StateChange { state });
        self.pump.on_state_change(state).await;
    }

    /// Official player error callback. Codes outside the documented table
    /// collapse to `UNKNOWN_ERROR` (1004).
    pub fn on_error(&self, code: i32) {
        if self.is_destroyed() {
            return;
        }
        self.post(EventEnvelope::Error {
            id: None,
            error: PlayerError::from_player_code(code),
        });
    }

    pub fn on_playback_rate_change(&self, playback_rate: f64) {
        if self.is_destroyed() {
            return;
        }
        self.post(EventEnvelope::PlaybackRateChange { playback_rate });
    }

    pub fn on_playback_quality_change(&self, quality: PlaybackQuality) {
        if self.is_destroyed() {
            return;
        }
        self.post(EventEnvelope::PlaybackQualityChange { quality });
    }

    pub fn on_autoplay_blocked(&self) {
        if self.is_destroyed() {
            return;
        }
        self.post(EventEnvelope::AutoplayBlocked);
    }

    // ========================================================================
    // Replies
    // ========================================================================

    fn reject(&self, payload: &str) {
        if self.is_destroyed() {
            return;
        }
        let value: Value = serde_json::from_str(payload).unwrap_or(Value::Null);
        let id = value["id"].as_str().map(str::to_owned);
        let error = match value["command"].as_str() {
            // a known name with a malformed envelope is not "not found"
            Some(name)
                if serde_json::from_value::<Command>(Value::String(name.to_owned())).is_err() =>
            {
                PlayerError::command_not_found(name)
            }
            _ => PlayerError::execution_failed("malformed command payload"),
        };
        self.post(EventEnvelope::Error { id, error });
    }

    fn report(&self, id: Option<String>, result: bridge_traits::Result<()>) {
        if let Err(error) = result {
            self.post_execution_failure(id, error);
        }
    }

    fn answer(&self, id: Option<String>, result: bridge_traits::Result<Value>) {
        match result {
            Ok(value) => {
                if let Some(id) = id {
                    self.post(EventEnvelope::CommandResult { id, result: value });
                }
            }
            Err(error) => self.post_execution_failure(id, error),
        }
    }

    fn post_execution_failure(&self, id: Option<String>, detail: impl std::fmt::Display) {
        self.post(EventEnvelope::Error {
            id,
            error: PlayerError::execution_failed(detail),
        });
    }

    fn post(&self, envelope: EventEnvelope) {
        post_event(&self.sink, &envelope);
    }
}
