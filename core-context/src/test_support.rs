//! Hand-rolled fakes shared by the dispatcher and pump tests.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use bridge_traits::error::{BridgeError, Result};
use bridge_traits::{EventSink, IframePlayer};
use core_protocol::{EventEnvelope, PlayerState, ProgressData};

/// Scriptable player: records every call, serves configurable readings, and
/// can be switched into a failing mode.
#[derive(Default)]
pub struct FakePlayer {
    pub calls: Mutex<Vec<String>>,
    readings: Mutex<Readings>,
    failing: Mutex<bool>,
}

#[derive(Default)]
struct Readings {
    current_time: f64,
    duration: f64,
    loaded_fraction: f64,
    volume: Option<f64>,
    state: Option<PlayerState>,
}

impl FakePlayer {
    pub fn set_readings(&self, current_time: f64, duration: f64, loaded_fraction: f64) {
        let mut readings = self.readings.lock();
        readings.current_time = current_time;
        readings.duration = duration;
        readings.loaded_fraction = loaded_fraction;
    }

    pub fn set_volume_reading(&self, volume: Option<f64>) {
        self.readings.lock().volume = volume;
    }

    pub fn set_state_reading(&self, state: Option<PlayerState>) {
        self.readings.lock().state = state;
    }

    pub fn fail_everything(&self) {
        *self.failing.lock() = true;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn record(&self, call: impl Into<String>) -> Result<()> {
        if *self.failing.lock() {
            return Err(BridgeError::OperationFailed("player detached".into()));
        }
        self.calls.lock().push(call.into());
        Ok(())
    }
}

#[async_trait]
impl IframePlayer for FakePlayer {
    async fn play_video(&self) -> Result<()> {
        self.record("playVideo")
    }
    async fn pause_video(&self) -> Result<()> {
        self.record("pauseVideo")
    }
    async fn stop_video(&self) -> Result<()> {
        self.record("stopVideo")
    }
    async fn seek_to(&self, seconds: f64, allow_seek_ahead: bool) -> Result<()> {
        self.record(format!("seekTo:{seconds}:{allow_seek_ahead}"))
    }
    async fn set_volume(&self, volume: f64) -> Result<()> {
        self.record(format!("setVolume:{volume}"))
    }
    async fn get_volume(&self) -> Result<Option<f64>> {
        self.record("getVolume")?;
        Ok(self.readings.lock().volume)
    }
    async fn mute(&self) -> Result<()> {
        self.record("mute")
    }
    async fn un_mute(&self) -> Result<()> {
        self.record("unMute")
    }
    async fn is_muted(&self) -> Result<Option<bool>> {
        self.record("isMuted")?;
        Ok(None)
    }
    async fn get_current_time(&self) -> Result<Option<f64>> {
        Ok(Some(self.readings.lock().current_time))
    }
    async fn get_duration(&self) -> Result<Option<f64>> {
        Ok(Some(self.readings.lock().duration))
    }
    async fn get_video_url(&self) -> Result<Option<String>> {
        self.record("getVideoUrl")?;
        Ok(Some("https://youtu.be/AbZH7XWDW_k".into()))
    }
    async fn get_video_embed_code(&self) -> Result<Option<String>> {
        self.record("getVideoEmbedCode")?;
        Ok(None)
    }
    async fn get_playback_rate(&self) -> Result<Option<f64>> {
        self.record("getPlaybackRate")?;
        Ok(None)
    }
    async fn set_playback_rate(&self, rate: f64) -> Result<()> {
        self.record(format!("setPlaybackRate:{rate}"))
    }
    async fn get_available_playback_rates(&self) -> Result<Option<Vec<f64>>> {
        self.record("getAvailablePlaybackRates")?;
        Ok(Some(vec![0.5, 1.0, 2.0]))
    }
    async fn get_player_state(&self) -> Result<Option<PlayerState>> {
        self.record("getPlayerState")?;
        Ok(self.readings.lock().state)
    }
    async fn get_video_loaded_fraction(&self) -> Result<Option<f64>> {
        Ok(Some(self.readings.lock().loaded_fraction))
    }
    async fn load_video_by_id(
        &self,
        video_id: &str,
        start_seconds: Option<f64>,
        _end_seconds: Option<f64>,
    ) -> Result<()> {
        self.record(format!("loadVideoById:{video_id}:{start_seconds:?}"))
    }
    async fn cue_video_by_id(
        &self,
        video_id: &str,
        _start_seconds: Option<f64>,
        _end_seconds: Option<f64>,
    ) -> Result<()> {
        self.record(format!("cueVideoById:{video_id}"))
    }
    async fn set_size(&self, width: f64, height: f64) -> Result<()> {
        self.record(format!("setSize:{width}x{height}"))
    }
    async fn destroy(&self) -> Result<()> {
        self.record("destroy")
    }
}

/// Captures every envelope posted by the context side.
#[derive(Default)]
pub struct RecordingSink {
    pub sent: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn envelopes(&self) -> Vec<EventEnvelope> {
        self.sent
            .lock()
            .iter()
            .map(|raw| serde_json::from_str(raw).unwrap())
            .collect()
    }

    pub fn progress_samples(&self) -> Vec<ProgressData> {
        self.envelopes()
            .into_iter()
            .filter_map(|envelope| match envelope {
                EventEnvelope::Progress { progress } => Some(progress),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for RecordingSink {
    fn post(&self, payload: String) -> Result<()> {
        self.sent.lock().push(payload);
        Ok(())
    }
}

/// Arc helpers so tests read naturally.
pub fn fakes() -> (Arc<FakePlayer>, Arc<RecordingSink>) {
    (
        Arc::new(FakePlayer::default()),
        Arc::new(RecordingSink::default()),
    )
}
