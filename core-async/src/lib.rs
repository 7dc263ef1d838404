//! Runtime-agnostic async layer for the bridge crates.
//!
//! The host side of the bridge runs on a UI-thread event loop (Tokio on
//! native targets); the player-hosting context is a single-threaded browser
//! environment. This crate pins down the small set of async primitives both
//! sides use (sleeping, bounded waits, detached task spawning, one-shot
//! channels, and a cancellation flag) so that `core-player` and
//! `core-context` never depend on a runtime directly.
//!
//! On native targets everything maps to Tokio. On `wasm32`, timers come from
//! `gloo-timers` and tasks are spawned onto the browser microtask queue via
//! `wasm-bindgen-futures`.

pub mod sync;
pub mod task;
pub mod time;

pub use sync::CancellationToken;
pub use task::spawn;
pub use time::{sleep, timeout, Duration};
