//! Workspace umbrella crate.
//!
//! This crate exists to expose feature flags that map to the individual
//! workspace crates. Host applications embedding the player depend on
//! `ytbridge-workspace` with the `host` feature; the binary that runs inside
//! the player-hosting web context enables `context` instead. Enabling both is
//! harmless and is the default for single-runtime ("web") embeddings.

pub use bridge_traits as traits;
pub use core_protocol as protocol;

#[cfg(feature = "context")]
pub use core_context as context;
#[cfg(feature = "host")]
pub use core_player as player;
