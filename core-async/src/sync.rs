//! Synchronization primitives shared by both bridge ends.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

// ============================================================================
// One-shot channels
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
pub use tokio::sync::oneshot;

#[cfg(target_arch = "wasm32")]
pub use futures::channel::oneshot;

// ============================================================================
// Cancellation
// ============================================================================

/// A clonable cancellation flag.
///
/// Periodic bridge tasks check the token between ticks and exit quietly once
/// it is cancelled. There is no waking: a cancelled task finishes its current
/// sleep before observing the flag, which is acceptable because the check
/// happens before any message is produced.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels the token. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
