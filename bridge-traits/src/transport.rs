//! Text transports between the two bridge ends.
//!
//! Both directions carry single-line JSON envelopes. Delivery is
//! fire-and-forget: a transport reports whether the payload was handed to
//! the platform channel, never whether the far side processed it. Ordering
//! within one transport instance must be preserved.

use crate::error::Result;
use crate::platform::PlatformSendSync;

/// Host-side channel that delivers command envelopes into the
/// player-hosting context.
pub trait CommandTransport: PlatformSendSync {
    /// Whether the far context is loaded and able to receive commands.
    ///
    /// Commands posted while this returns `false` fail with
    /// [`BridgeError::NotAvailable`](crate::BridgeError::NotAvailable);
    /// queueing, if any, is the embedder's concern.
    fn is_ready(&self) -> bool;

    /// Posts one serialized command envelope.
    fn post(&self, payload: String) -> Result<()>;
}

/// Context-side channel that delivers event envelopes back to the host.
pub trait EventSink: PlatformSendSync {
    /// Posts one serialized event envelope.
    fn post(&self, payload: String) -> Result<()>;
}
