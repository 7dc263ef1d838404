//! # Bridge Traits
//!
//! The contract between the bridge core and its platform embedders.
//!
//! ## Overview
//!
//! The bridge spans two isolated script environments. Each capability that
//! differs per platform is a trait here; the core crates only ever hold
//! trait objects:
//!
//! - [`CommandTransport`](transport::CommandTransport) — host-side outbound
//!   text channel into the player-hosting context (webview script
//!   injection, `postMessage`, or an in-process queue on the web target).
//! - [`EventSink`](transport::EventSink) — context-side outbound text
//!   channel back to the host.
//! - [`PlayerController`](controller::PlayerController) — the unified
//!   imperative player surface. Two interchangeable implementations exist:
//!   the serialized webview controller in `core-player` and a direct-call
//!   variant for single-runtime embeddings. The embedding layer picks one
//!   at construction time; nothing inspects types at runtime.
//! - [`IframePlayer`](player::IframePlayer) — the official player API as
//!   seen from inside the hosting context, driven by the command
//!   dispatcher in `core-context`.
//! - [`ApiBootstrap`](player::ApiBootstrap) — loading the official player
//!   script, wrapped with idempotent-init semantics by `core-context`.
//!
//! ## Thread Safety
//!
//! Native implementations must be `Send + Sync`; `wasm32` builds are
//! single-threaded and drop those bounds via the [`platform`] markers.

pub mod controller;
pub mod error;
pub mod platform;
pub mod player;
pub mod transport;

pub use controller::PlayerController;
pub use error::{BridgeError, Result};
pub use platform::{PlatformSend, PlatformSendSync};
pub use player::{ApiBootstrap, IframePlayer};
pub use transport::{CommandTransport, EventSink};
