//! Detached task spawning.
//!
//! Bridge tasks (the progress pump loop, seek settle timers, command
//! timeouts) are all detached: they are stopped through a
//! [`CancellationToken`](crate::sync::CancellationToken), never by joining.
//! The native handle is returned for callers that want it; on `wasm32` the
//! task is handed to the browser event loop and the handle is a unit marker.

// ============================================================================
// Native Implementation (Tokio)
// ============================================================================

#[cfg(not(target_arch = "wasm32"))]
pub use tokio::task::JoinHandle;

#[cfg(not(target_arch = "wasm32"))]
/// Spawns a detached asynchronous task on the Tokio runtime.
pub fn spawn<F>(future: F) -> JoinHandle<F::Output>
where
    F: std::future::Future + Send + 'static,
    F::Output: Send + 'static,
{
    tokio::task::spawn(future)
}

// ============================================================================
// WASM Implementation
// ============================================================================

#[cfg(target_arch = "wasm32")]
/// Marker handle for a task running on the browser event loop.
///
/// Browser tasks cannot be joined or aborted; cancellation goes through a
/// shared token instead.
#[derive(Debug, Clone, Copy)]
pub struct JoinHandle;

#[cfg(target_arch = "wasm32")]
/// Spawns a detached task onto the browser microtask queue.
pub fn spawn<F>(future: F) -> JoinHandle
where
    F: std::future::Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(future);
    JoinHandle
}
