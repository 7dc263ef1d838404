//! # Core Player
//!
//! The host-side half of the player bridge.
//!
//! ## Architecture
//!
//! ```text
//! Application
//!     │ subscribe / imperative calls
//!     ▼
//! YoutubePlayer (facade) ──── ListenerRegistry ◄── EventChannel ◄── raw JSON
//!     │                                                 │
//!     ▼                                                 │ commandResult /
//! PlayerController (WebviewPlayerController)            │ error-with-id
//!     │                                                 ▼
//! CommandChannel ── correlation ids, pending table, 5 s timeout
//!     │
//!     ▼
//! CommandTransport (platform-owned, fire-and-forget JSON text)
//! ```
//!
//! The facade never rejects: mutating calls swallow transport failures with
//! a diagnostic, getters substitute documented defaults when the player is
//! unbound, destroyed, or slow to answer. All failure the application should
//! see arrives as an [`PlayerEvent::Error`](events::PlayerEvent::Error).
//!
//! [`PlayerSession`](session::PlayerSession) wires the pieces to a concrete
//! transport; the embedding layer owns exactly one session per player.

pub mod command_channel;
pub mod controller;
pub mod event_channel;
pub mod events;
pub mod facade;
pub mod internal;
pub mod session;

pub use command_channel::{CommandChannel, COMMAND_TIMEOUT};
pub use controller::WebviewPlayerController;
pub use event_channel::EventChannel;
pub use events::{ListenerRegistry, PlayerEvent, PlayerEventKind, Subscription};
pub use facade::YoutubePlayer;
pub use session::PlayerSession;
