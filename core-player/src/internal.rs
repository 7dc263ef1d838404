//! Session-facing binding surface.
//!
//! These hooks exist so a session adapter can wire a controller into a
//! [`YoutubePlayer`](crate::YoutubePlayer) without widening the public
//! facade. Applications have no reason to call anything here.

use std::sync::atomic::Ordering;
use std::sync::Arc;

use bridge_traits::PlayerController;

use crate::events::ListenerRegistry;
use crate::facade::YoutubePlayer;

pub use crate::events::ListenerFn;

/// Controller lifecycle hooks consumed by session adapters only.
pub trait ControllerBinding {
    /// Attaches the controller all facade operations forward to.
    fn bind_controller(&self, controller: Arc<dyn PlayerController>);

    /// Detaches the controller; subsequent facade operations are no-ops.
    fn unbind_controller(&self);

    /// The registry inbound events are fanned out through.
    fn event_registry(&self) -> Arc<ListenerRegistry>;

    /// The currently configured progress cadence, in milliseconds.
    fn progress_interval_ms(&self) -> u64;
}

impl ControllerBinding for YoutubePlayer {
    fn bind_controller(&self, controller: Arc<dyn PlayerController>) {
        *self.inner.controller.lock() = Some(controller);
    }

    fn unbind_controller(&self) {
        self.inner.controller.lock().take();
    }

    fn event_registry(&self) -> Arc<ListenerRegistry> {
        Arc::clone(&self.inner.registry)
    }

    fn progress_interval_ms(&self) -> u64 {
        self.inner.progress_interval_ms.load(Ordering::SeqCst)
    }
}
