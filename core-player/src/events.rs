//! Typed player events and the subscriber registry.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use core_protocol::{PlaybackQuality, PlayerError, PlayerInfo, PlayerState, ProgressData};

/// An event fanned out to facade subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    Ready(PlayerInfo),
    StateChange(PlayerState),
    Error(PlayerError),
    Progress(ProgressData),
    PlaybackRateChange(f64),
    PlaybackQualityChange(PlaybackQuality),
    AutoplayBlocked,
}

/// Discriminant used as the subscription key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerEventKind {
    Ready,
    StateChange,
    Error,
    Progress,
    PlaybackRateChange,
    PlaybackQualityChange,
    AutoplayBlocked,
}

impl PlayerEvent {
    pub fn kind(&self) -> PlayerEventKind {
        match self {
            PlayerEvent::Ready(_) => PlayerEventKind::Ready,
            PlayerEvent::StateChange(_) => PlayerEventKind::StateChange,
            PlayerEvent::Error(_) => PlayerEventKind::Error,
            PlayerEvent::Progress(_) => PlayerEventKind::Progress,
            PlayerEvent::PlaybackRateChange(_) => PlayerEventKind::PlaybackRateChange,
            PlayerEvent::PlaybackQualityChange(_) => PlayerEventKind::PlaybackQualityChange,
            PlayerEvent::AutoplayBlocked => PlayerEventKind::AutoplayBlocked,
        }
    }
}

/// Callback bound, `Send + Sync` on native targets only.
#[cfg(not(target_arch = "wasm32"))]
pub trait ListenerFn: Fn(&PlayerEvent) + Send + Sync {}
#[cfg(not(target_arch = "wasm32"))]
impl<T: Fn(&PlayerEvent) + Send + Sync + ?Sized> ListenerFn for T {}

#[cfg(target_arch = "wasm32")]
pub trait ListenerFn: Fn(&PlayerEvent) {}
#[cfg(target_arch = "wasm32")]
impl<T: Fn(&PlayerEvent) + ?Sized> ListenerFn for T {}

type Listener = Arc<dyn ListenerFn>;

/// Per-kind callback sets with token-based removal.
///
/// Emission iterates over a snapshot taken under the lock, so a callback may
/// subscribe or unsubscribe freely without corrupting the registry; changes
/// made during an emit take effect from the next emit on.
#[derive(Default)]
pub struct ListenerRegistry {
    next_token: AtomicU64,
    listeners: Mutex<HashMap<PlayerEventKind, Vec<(u64, Listener)>>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback for one event kind.
    ///
    /// Every call gets its own token, so registering the same closure twice
    /// yields two independent subscriptions.
    pub fn subscribe(
        self: &Arc<Self>,
        kind: PlayerEventKind,
        callback: impl ListenerFn + 'static,
    ) -> Subscription {
        let token = self.next_token.fetch_add(1, Ordering::Relaxed) + 1;
        self.listeners
            .lock()
            .entry(kind)
            .or_default()
            .push((token, Arc::new(callback)));
        Subscription {
            registry: Arc::clone(self),
            kind,
            token,
        }
    }

    /// Delivers an event to every subscriber of its kind. No subscribers, no
    /// work.
    pub fn emit(&self, event: &PlayerEvent) {
        let snapshot: Vec<Listener> = {
            let listeners = self.listeners.lock();
            match listeners.get(&event.kind()) {
                Some(entries) => entries.iter().map(|(_, cb)| Arc::clone(cb)).collect(),
                None => return,
            }
        };
        for callback in snapshot {
            callback(event);
        }
    }

    /// Drops every subscription.
    pub fn clear(&self) {
        self.listeners.lock().clear();
    }

    pub fn listener_count(&self, kind: PlayerEventKind) -> usize {
        self.listeners
            .lock()
            .get(&kind)
            .map(Vec::len)
            .unwrap_or(0)
    }

    fn remove(&self, kind: PlayerEventKind, token: u64) {
        let mut listeners = self.listeners.lock();
        if let Some(entries) = listeners.get_mut(&kind) {
            entries.retain(|(t, _)| *t != token);
            if entries.is_empty() {
                listeners.remove(&kind);
            }
        }
    }
}

/// Handle for one registered callback.
///
/// Removal is explicit: dropping the handle leaves the callback subscribed
/// for the life of the registry.
pub struct Subscription {
    registry: Arc<ListenerRegistry>,
    kind: PlayerEventKind,
    token: u64,
}

impl Subscription {
    pub fn unsubscribe(self) {
        self.registry.remove(self.kind, self.token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_protocol::codes;

    fn counter() -> (Arc<Mutex<u32>>, impl Fn(&PlayerEvent) + Send + Sync) {
        let count = Arc::new(Mutex::new(0));
        let observer = Arc::clone(&count);
        (count, move |_: &PlayerEvent| *observer.lock() += 1)
    }

    #[test]
    fn emit_without_subscribers_is_a_no_op() {
        let registry = Arc::new(ListenerRegistry::new());
        registry.emit(&PlayerEvent::AutoplayBlocked);
        registry.emit(&PlayerEvent::StateChange(PlayerState::Playing));
    }

    #[test]
    fn events_only_reach_their_own_kind() {
        let registry = Arc::new(ListenerRegistry::new());
        let (state_count, state_cb) = counter();
        let (error_count, error_cb) = counter();
        let _state = registry.subscribe(PlayerEventKind::StateChange, state_cb);
        let _error = registry.subscribe(PlayerEventKind::Error, error_cb);

        registry.emit(&PlayerEvent::StateChange(PlayerState::Paused));
        registry.emit(&PlayerEvent::StateChange(PlayerState::Playing));

        assert_eq!(*state_count.lock(), 2);
        assert_eq!(*error_count.lock(), 0);
    }

    #[test]
    fn unsubscribe_affects_only_its_own_subscription() {
        let registry = Arc::new(ListenerRegistry::new());
        let (first_count, first_cb) = counter();
        let (second_count, second_cb) = counter();
        let first = registry.subscribe(PlayerEventKind::Progress, first_cb);
        let _second = registry.subscribe(PlayerEventKind::Progress, second_cb);

        first.unsubscribe();
        registry.emit(&PlayerEvent::Progress(ProgressData::from_readings(
            1.0, 10.0, 0.2,
        )));

        assert_eq!(*first_count.lock(), 0);
        assert_eq!(*second_count.lock(), 1);
        assert_eq!(registry.listener_count(PlayerEventKind::Progress), 1);
    }

    #[test]
    fn same_closure_twice_yields_two_subscriptions() {
        let registry = Arc::new(ListenerRegistry::new());
        let (count, _) = counter();
        let observer = Arc::clone(&count);
        let callback = move |_: &PlayerEvent| *observer.lock() += 1;

        let _a = registry.subscribe(PlayerEventKind::Ready, callback.clone());
        let _b = registry.subscribe(PlayerEventKind::Ready, callback);
        registry.emit(&PlayerEvent::Ready(PlayerInfo::default()));

        assert_eq!(*count.lock(), 2);
    }

    #[test]
    fn subscribing_during_emit_takes_effect_next_emit() {
        let registry = Arc::new(ListenerRegistry::new());
        let (late_count, _) = counter();

        let inner_registry = Arc::clone(&registry);
        let late_observer = Arc::clone(&late_count);
        let _outer = registry.subscribe(PlayerEventKind::Error, move |_| {
            let observer = Arc::clone(&late_observer);
            let sub = inner_registry
                .subscribe(PlayerEventKind::Error, move |_| *observer.lock() += 1);
            // keep the inner subscription alive past this callback
            std::mem::forget(sub);
        });

        let error = PlayerEvent::Error(PlayerError::from_player_code(codes::EMBEDDED_RESTRICTED));
        registry.emit(&error);
        assert_eq!(*late_count.lock(), 0);

        registry.emit(&error);
        assert_eq!(*late_count.lock(), 1);
    }

    #[test]
    fn clear_drops_everything() {
        let registry = Arc::new(ListenerRegistry::new());
        let (count, callback) = counter();
        let _sub = registry.subscribe(PlayerEventKind::AutoplayBlocked, callback);

        registry.clear();
        registry.emit(&PlayerEvent::AutoplayBlocked);
        assert_eq!(*count.lock(), 0);
    }
}
