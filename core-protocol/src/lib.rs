//! # Bridge Wire Protocol
//!
//! Data model for the message channel between the host process and the
//! player-hosting context. Both ends exchange UTF-8 JSON text:
//!
//! ```text
//! host ──(command envelope)──▶ player-hosting context
//! host ◀──(event envelope)─── player-hosting context
//! ```
//!
//! Commands carry a name, positional arguments, and an optional correlation
//! id; the id is present exactly when the caller expects a result envelope
//! back. Events are a tagged union over a `type` discriminant; one of the
//! variants (`commandResult`) closes the loop for result-bearing commands.
//!
//! The channel is text-only and FIFO per direction, with no ordering
//! guarantee between directions. Everything in this crate is plain data;
//! transport and bookkeeping live in `core-player` and `core-context`.

pub mod command;
pub mod envelope;
pub mod error;
pub mod player;
pub mod video_id;

pub use command::{Command, CommandArg, CommandEnvelope};
pub use envelope::EventEnvelope;
pub use error::{codes, PlayerError};
pub use player::{PlaybackQuality, PlayerInfo, PlayerSize, PlayerState, PlayerVars, ProgressData};
pub use video_id::{extract_video_id_from_url, resolve_video_source, validate_video_id};
