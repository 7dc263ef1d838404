//! Controller implementation over the serialized command channel.

use std::sync::Arc;

use async_trait::async_trait;

use bridge_traits::error::Result;
use bridge_traits::PlayerController;
use core_protocol::{Command, CommandArg, PlayerState};

use crate::command_channel::CommandChannel;

/// Forwards every controller operation over a [`CommandChannel`].
///
/// Getters translate the channel's `Option<Value>` into the documented
/// defaults, so a missing, null, or timed-out result is indistinguishable
/// from a freshly created player.
pub struct WebviewPlayerController {
    channel: Arc<CommandChannel>,
}

impl WebviewPlayerController {
    pub fn new(channel: Arc<CommandChannel>) -> Self {
        Self { channel }
    }

    async fn fire(&self, command: Command, args: Vec<CommandArg>) -> Result<()> {
        // fire-and-forget: failures are logged by the channel, not surfaced
        self.channel.send(command, args).await;
        Ok(())
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl PlayerController for WebviewPlayerController {
    async fn play(&self) -> Result<()> {
        self.fire(Command::Play, vec![]).await
    }

    async fn pause(&self) -> Result<()> {
        self.fire(Command::Pause, vec![]).await
    }

    async fn stop(&self) -> Result<()> {
        self.fire(Command::Stop, vec![]).await
    }

    async fn seek_to(&self, seconds: f64, allow_seek_ahead: bool) -> Result<()> {
        self.fire(
            Command::SeekTo,
            vec![seconds.into(), allow_seek_ahead.into()],
        )
        .await
    }

    async fn set_volume(&self, volume: f64) -> Result<()> {
        self.fire(Command::SetVolume, vec![volume.into()]).await
    }

    async fn get_volume(&self) -> f64 {
        self.channel
            .send(Command::GetVolume, vec![])
            .await
            .and_then(|value| value.as_f64())
            .unwrap_or(0.0)
    }

    async fn mute(&self) -> Result<()> {
        self.fire(Command::Mute, vec![]).await
    }

    async fn un_mute(&self) -> Result<()> {
        self.fire(Command::UnMute, vec![]).await
    }

    async fn is_muted(&self) -> bool {
        self.channel
            .send(Command::IsMuted, vec![])
            .await
            .and_then(|value| value.as_bool())
            .unwrap_or(false)
    }

    async fn get_current_time(&self) -> f64 {
        self.channel
            .send(Command::GetCurrentTime, vec![])
            .await
            .and_then(|value| value.as_f64())
            .unwrap_or(0.0)
    }

    async fn get_duration(&self) -> f64 {
        self.channel
            .send(Command::GetDuration, vec![])
            .await
            .and_then(|value| value.as_f64())
            .unwrap_or(0.0)
    }

    async fn get_video_url(&self) -> String {
        self.channel
            .send(Command::GetVideoUrl, vec![])
            .await
            .and_then(|value| value.as_str().map(str::to_owned))
            .unwrap_or_default()
    }

    async fn get_video_embed_code(&self) -> String {
        self.channel
            .send(Command::GetVideoEmbedCode, vec![])
            .await
            .and_then(|value| value.as_str().map(str::to_owned))
            .unwrap_or_default()
    }

    async fn get_playback_rate(&self) -> f64 {
        self.channel
            .send(Command::GetPlaybackRate, vec![])
            .await
            .and_then(|value| value.as_f64())
            .unwrap_or(1.0)
    }

    async fn set_playback_rate(&self, rate: f64) -> Result<()> {
        self.fire(Command::SetPlaybackRate, vec![rate.into()]).await
    }

    async fn get_available_playback_rates(&self) -> Vec<f64> {
        self.channel
            .send(Command::GetAvailablePlaybackRates, vec![])
            .await
            .and_then(|value| serde_json::from_value(value).ok())
            .unwrap_or_else(|| vec![1.0])
    }

    async fn get_player_state(&self) -> PlayerState {
        self.channel
            .send(Command::GetPlayerState, vec![])
            .await
            .and_then(|value| serde_json::from_value(value).ok())
            .unwrap_or(PlayerState::Unstarted)
    }

    async fn get_video_loaded_fraction(&self) -> f64 {
        self.channel
            .send(Command::GetVideoLoadedFraction, vec![])
            .await
            .and_then(|value| value.as_f64())
            .unwrap_or(0.0)
    }

    async fn load_video_by_id(
        &self,
        video_id: &str,
        start_seconds: Option<f64>,
        end_seconds: Option<f64>,
    ) -> Result<()> {
        self.fire(
            Command::LoadVideoById,
            vec![video_id.into(), start_seconds.into(), end_seconds.into()],
        )
        .await
    }

    async fn cue_video_by_id(
        &self,
        video_id: &str,
        start_seconds: Option<f64>,
        end_seconds: Option<f64>,
    ) -> Result<()> {
        self.fire(
            Command::CueVideoById,
            vec![video_id.into(), start_seconds.into(), end_seconds.into()],
        )
        .await
    }

    async fn set_size(&self, width: f64, height: f64) -> Result<()> {
        self.fire(Command::SetSize, vec![width.into(), height.into()])
            .await
    }

    async fn update_progress_interval(&self, interval_ms: u64) -> Result<()> {
        self.fire(Command::UpdateProgressInterval, vec![interval_ms.into()])
            .await
    }

    async fn destroy(&self) -> Result<()> {
        self.fire(Command::Cleanup, vec![]).await?;
        // nothing will answer after cleanup; unblock any in-flight getter
        self.channel.fail_all_pending();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_traits::CommandTransport;
    use parking_lot::Mutex;
    use serde_json::{json, Value};

    #[derive(Default)]
    struct RecordingTransport {
        sent: Mutex<Vec<String>>,
    }

    impl RecordingTransport {
        fn sent(&self) -> Vec<Value> {
            self.sent
                .lock()
                .iter()
                .map(|raw| serde_json::from_str(raw).unwrap())
                .collect()
        }
    }

    impl CommandTransport for RecordingTransport {
        fn is_ready(&self) -> bool {
            true
        }

        fn post(&self, payload: String) -> Result<()> {
            self.sent.lock().push(payload);
            Ok(())
        }
    }

    fn controller() -> (WebviewPlayerController, Arc<RecordingTransport>) {
        let transport = Arc::new(RecordingTransport::default());
        let channel = Arc::new(CommandChannel::new(
            Arc::clone(&transport) as Arc<dyn CommandTransport>
        ));
        (WebviewPlayerController::new(channel), transport)
    }

    #[tokio::test]
    async fn mutations_serialize_their_arguments() {
        let (controller, transport) = controller();

        controller.seek_to(42.0, false).await.unwrap();
        controller
            .load_video_by_id("AbZH7XWDW_k", Some(3.0), None)
            .await
            .unwrap();

        let sent = transport.sent();
        assert_eq!(sent[0]["command"], "seekTo");
        assert_eq!(sent[0]["args"], json!([42.0, false]));
        assert_eq!(sent[1]["command"], "loadVideoById");
        assert_eq!(sent[1]["args"], json!(["AbZH7XWDW_k", 3.0, null]));
    }

    #[tokio::test(start_paused = true)]
    async fn timed_out_getters_fall_back_to_defaults() {
        let (controller, _transport) = controller();

        assert_eq!(controller.get_volume().await, 0.0);
        assert!(!controller.is_muted().await);
        assert_eq!(controller.get_playback_rate().await, 1.0);
        assert_eq!(controller.get_available_playback_rates().await, vec![1.0]);
        assert_eq!(controller.get_player_state().await, PlayerState::Unstarted);
        assert_eq!(controller.get_video_url().await, "");
    }

    #[tokio::test]
    async fn destroy_sends_cleanup_and_clears_pending() {
        let (controller, transport) = controller();

        controller.destroy().await.unwrap();

        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0]["command"], "cleanup");
    }
}
