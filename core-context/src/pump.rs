//! Progress sampling.
//!
//! The pump owns two timers: the periodic sampler, running only while the
//! player is in a playing-like state, and the one-shot seek settle timer
//! that captures the position once a seek has landed. Both are detached
//! tasks stopped through cancellation tokens, so the same code runs on the
//! multi-threaded native runtime and the browser event loop.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use bridge_traits::{EventSink, IframePlayer};
use core_async::sync::CancellationToken;
use core_async::time::Duration;
use core_protocol::{EventEnvelope, PlayerState, ProgressData};

use crate::post_event;

/// How long after a seek the position is sampled once, letting the player
/// finish repositioning first.
pub const SEEK_SETTLE_DELAY: Duration = Duration::from_millis(200);

pub struct ProgressPump {
    player: Arc<dyn IframePlayer>,
    sink: Arc<dyn EventSink>,
    interval_ms: AtomicU64,
    playing: AtomicBool,
    run_token: Mutex<Option<CancellationToken>>,
    settle_token: Mutex<Option<CancellationToken>>,
}

impl ProgressPump {
    pub fn new(player: Arc<dyn IframePlayer>, sink: Arc<dyn EventSink>) -> Arc<Self> {
        Arc::new(Self {
            player,
            sink,
            interval_ms: AtomicU64::new(0),
            playing: AtomicBool::new(false),
            run_token: Mutex::new(None),
            settle_token: Mutex::new(None),
        })
    }

    /// Changes the sampling cadence. The running timer is always cancelled;
    /// a new one starts only when the player is currently playing-like.
    /// `0` disables sampling.
    pub fn set_interval(self: &Arc<Self>, interval_ms: u64) {
        self.interval_ms.store(interval_ms, Ordering::SeqCst);
        self.halt();
        if interval_ms > 0 && self.playing.load(Ordering::SeqCst) {
            self.start();
        }
    }

    /// A fresh context announced itself; resume sampling if a cadence is
    /// already configured.
    pub fn on_ready(self: &Arc<Self>) {
        if self.interval_ms.load(Ordering::SeqCst) > 0 {
            self.start();
        }
    }

    /// Drives the start/stop state machine.
    ///
    /// PLAYING and BUFFERING start the sampler; PAUSED, ENDED and CUED stop
    /// it and capture one final sample so the host sees the resting
    /// position.
    pub async fn on_state_change(self: &Arc<Self>, state: PlayerState) {
        self.playing.store(state.is_playing_like(), Ordering::SeqCst);
        if state.is_playing_like() {
            self.start();
            return;
        }

        self.halt();
        let wants_final_sample = matches!(
            state,
            PlayerState::Paused | PlayerState::Ended | PlayerState::Cued
        );
        if wants_final_sample {
            self.sample().await;
        }
    }

    /// Schedules the one-shot post-seek sample. A newer seek supersedes any
    /// settle timer still waiting.
    pub fn seek_settled(self: &Arc<Self>) {
        let token = CancellationToken::new();
        if let Some(previous) = self.settle_token.lock().replace(token.clone()) {
            previous.cancel();
        }

        let pump = Arc::clone(self);
        core_async::spawn(async move {
            core_async::sleep(SEEK_SETTLE_DELAY).await;
            if !token.is_cancelled() {
                pump.sample().await;
            }
        });
    }

    /// Stops both timers. Called on context teardown.
    pub fn shutdown(&self) {
        self.halt();
        if let Some(token) = self.settle_token.lock().take() {
            token.cancel();
        }
    }

    fn start(self: &Arc<Self>) {
        let interval_ms = self.interval_ms.load(Ordering::SeqCst);
        if interval_ms == 0 {
            return;
        }
        self.halt();

        let token = CancellationToken::new();
        *self.run_token.lock() = Some(token.clone());

        let pump = Arc::clone(self);
        core_async::spawn(async move {
            loop {
                core_async::sleep(Duration::from_millis(interval_ms)).await;
                if token.is_cancelled() {
                    break;
                }
                pump.sample().await;
            }
        });
    }

    fn halt(&self) {
        if let Some(token) = self.run_token.lock().take() {
            token.cancel();
        }
    }

    async fn sample(&self) {
        let current_time = self.read_f64(self.player.get_current_time().await);
        let duration = self.read_f64(self.player.get_duration().await);
        let loaded_fraction = self.read_f64(self.player.get_video_loaded_fraction().await);

        let progress = ProgressData::from_readings(current_time, duration, loaded_fraction);
        post_event(&self.sink, &EventEnvelope::Progress { progress });
    }

    fn read_f64(&self, reading: bridge_traits::Result<Option<f64>>) -> f64 {
        reading.ok().flatten().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakePlayer, RecordingSink};
    use tokio::task::yield_now;
    use tokio::time::advance;

    fn pump() -> (Arc<ProgressPump>, Arc<FakePlayer>, Arc<RecordingSink>) {
        let player = Arc::new(FakePlayer::default());
        let sink = Arc::new(RecordingSink::default());
        let pump = ProgressPump::new(
            Arc::clone(&player) as Arc<dyn IframePlayer>,
            Arc::clone(&sink) as Arc<dyn EventSink>,
        );
        (pump, player, sink)
    }

    async fn tick(ms: u64) {
        // let freshly spawned timer tasks register their sleeps first
        yield_now().await;
        advance(Duration::from_millis(ms)).await;
        yield_now().await;
        yield_now().await;
    }

    #[tokio::test(start_paused = true)]
    async fn samples_at_cadence_while_playing() {
        let (pump, player, sink) = pump();
        player.set_readings(30.0, 120.0, 0.5);
        pump.set_interval(100);
        pump.on_state_change(PlayerState::Playing).await;

        for _ in 0..3 {
            tick(100).await;
        }

        let samples = sink.progress_samples();
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0].current_time, 30.0);
        assert_eq!(samples[0].percentage, 25.0);
    }

    #[tokio::test(start_paused = true)]
    async fn buffering_keeps_the_sampler_running() {
        let (pump, _player, sink) = pump();
        pump.set_interval(100);
        pump.on_state_change(PlayerState::Buffering).await;

        tick(100).await;
        assert_eq!(sink.progress_samples().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn playing_buffering_playing_emits_only_periodic_samples() {
        let (pump, _player, sink) = pump();
        pump.set_interval(100);

        pump.on_state_change(PlayerState::Playing).await;
        tick(100).await;
        pump.on_state_change(PlayerState::Buffering).await;
        tick(100).await;
        pump.on_state_change(PlayerState::Playing).await;
        tick(100).await;

        // three cadence ticks, no resting-position sample in between
        assert_eq!(sink.progress_samples().len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn pause_stops_sampling_after_a_final_sample() {
        let (pump, _player, sink) = pump();
        pump.set_interval(100);
        pump.on_state_change(PlayerState::Playing).await;
        tick(100).await;
        assert_eq!(sink.progress_samples().len(), 1);

        pump.on_state_change(PlayerState::Paused).await;
        assert_eq!(sink.progress_samples().len(), 2);

        tick(500).await;
        assert_eq!(sink.progress_samples().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn unstarted_stops_without_a_final_sample() {
        let (pump, _player, sink) = pump();
        pump.set_interval(100);
        pump.on_state_change(PlayerState::Playing).await;
        tick(100).await;

        pump.on_state_change(PlayerState::Unstarted).await;
        assert_eq!(sink.progress_samples().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_interval_disables_sampling() {
        let (pump, _player, sink) = pump();
        pump.set_interval(100);
        pump.on_state_change(PlayerState::Playing).await;
        tick(100).await;
        assert_eq!(sink.progress_samples().len(), 1);

        pump.set_interval(0);
        tick(1000).await;
        assert_eq!(sink.progress_samples().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn pause_emits_a_final_sample_even_when_sampling_is_disabled() {
        let (pump, player, sink) = pump();
        player.set_readings(42.0, 120.0, 0.5);
        pump.on_state_change(PlayerState::Playing).await;
        tick(1000).await;
        assert!(sink.progress_samples().is_empty());

        pump.on_state_change(PlayerState::Paused).await;
        let samples = sink.progress_samples();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].current_time, 42.0);
    }

    #[tokio::test(start_paused = true)]
    async fn interval_change_restarts_only_while_playing() {
        let (pump, _player, sink) = pump();
        pump.set_interval(100);

        // paused: the new cadence is stored but nothing runs
        tick(300).await;
        assert!(sink.progress_samples().is_empty());

        pump.on_state_change(PlayerState::Playing).await;
        pump.set_interval(50);
        tick(50).await;
        assert_eq!(sink.progress_samples().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn ready_resumes_sampling_when_a_cadence_is_configured() {
        let (pump, _player, sink) = pump();
        pump.set_interval(100);

        pump.on_ready();
        tick(100).await;
        assert_eq!(sink.progress_samples().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn seek_settle_samples_once_after_the_delay() {
        let (pump, player, sink) = pump();
        player.set_readings(55.0, 100.0, 0.8);

        pump.seek_settled();
        tick(199).await;
        assert!(sink.progress_samples().is_empty());

        tick(1).await;
        let samples = sink.progress_samples();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].current_time, 55.0);
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_seeks_collapse_to_one_settle_sample() {
        let (pump, _player, sink) = pump();

        pump.seek_settled();
        tick(50).await;
        pump.seek_settled();
        tick(250).await;

        assert_eq!(sink.progress_samples().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_cancels_both_timers() {
        let (pump, _player, sink) = pump();
        pump.set_interval(100);
        pump.on_state_change(PlayerState::Playing).await;
        pump.seek_settled();

        pump.shutdown();
        tick(1000).await;

        assert!(sink.progress_samples().is_empty());
    }
}
