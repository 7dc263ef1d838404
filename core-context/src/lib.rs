//! # Core Context
//!
//! The player-hosting side of the bridge: everything that runs next to the
//! actual embedded player rather than next to the application.
//!
//! ## Architecture
//!
//! ```text
//! raw command JSON ──▶ CommandDispatcher ──▶ IframePlayer (platform-owned)
//!                           │   ▲
//!            error / result │   │ player callbacks (ready, stateChange, …)
//!                           ▼   │
//!                        EventSink ◀── ProgressPump (interval + seek settle)
//! ```
//!
//! [`CommandDispatcher`](dispatcher::CommandDispatcher) executes inbound
//! command envelopes against the player and reports results and failures
//! back through the sink; the command set is closed, so anything outside it
//! is answered with a command-not-found error instead of being looked up
//! dynamically. [`ProgressPump`](pump::ProgressPump) samples playback
//! position on a configurable cadence, driven by player state transitions.
//! [`SharedBootstrap`](bootstrap::SharedBootstrap) makes loading the
//! official player script idempotent for the whole context.

pub mod bootstrap;
pub mod dispatcher;
pub mod pump;

#[cfg(test)]
pub(crate) mod test_support;

pub use bootstrap::SharedBootstrap;
pub use dispatcher::CommandDispatcher;
pub use pump::{ProgressPump, SEEK_SETTLE_DELAY};

use std::sync::Arc;

use bridge_traits::EventSink;
use core_protocol::EventEnvelope;
use tracing::warn;

/// Serializes an envelope onto the sink; delivery failures are logged, not
/// surfaced. The host treats a silent context like a slow one.
pub(crate) fn post_event(sink: &Arc<dyn EventSink>, envelope: &EventEnvelope) {
    let payload = match serde_json::to_string(envelope) {
        Ok(payload) => payload,
        Err(error) => {
            warn!(%error, "failed to serialize event envelope");
            return;
        }
    };
    if let Err(error) = sink.post(payload) {
        warn!(%error, "failed to post event envelope");
    }
}
