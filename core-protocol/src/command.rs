//! Host → context command envelopes.
//!
//! The command set is closed: the in-context dispatcher matches over
//! [`Command`] and reports anything outside the set as a command-not-found
//! error rather than indexing a method table by string.

use serde::{Deserialize, Serialize};

/// Every operation the host may invoke inside the player-hosting context.
///
/// Wire names are the camelCase strings the context dispatcher receives,
/// e.g. `Command::SeekTo` serializes as `"seekTo"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Command {
    Play,
    Pause,
    Stop,
    SeekTo,
    SetVolume,
    GetVolume,
    Mute,
    UnMute,
    IsMuted,
    GetCurrentTime,
    GetDuration,
    GetVideoUrl,
    GetVideoEmbedCode,
    GetPlaybackRate,
    SetPlaybackRate,
    GetAvailablePlaybackRates,
    GetPlayerState,
    GetVideoLoadedFraction,
    LoadVideoById,
    CueVideoById,
    SetSize,
    Cleanup,
    UpdateProgressInterval,
}

impl Command {
    /// Whether the command produces a `commandResult` envelope.
    ///
    /// Result-bearing commands are sent with a correlation id; everything
    /// else is fire-and-forget.
    pub fn needs_result(&self) -> bool {
        matches!(
            self,
            Command::GetVolume
                | Command::IsMuted
                | Command::GetCurrentTime
                | Command::GetDuration
                | Command::GetVideoUrl
                | Command::GetVideoEmbedCode
                | Command::GetPlaybackRate
                | Command::GetAvailablePlaybackRates
                | Command::GetPlayerState
                | Command::GetVideoLoadedFraction
        )
    }

    /// The camelCase wire name.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Command::Play => "play",
            Command::Pause => "pause",
            Command::Stop => "stop",
            Command::SeekTo => "seekTo",
            Command::SetVolume => "setVolume",
            Command::GetVolume => "getVolume",
            Command::Mute => "mute",
            Command::UnMute => "unMute",
            Command::IsMuted => "isMuted",
            Command::GetCurrentTime => "getCurrentTime",
            Command::GetDuration => "getDuration",
            Command::GetVideoUrl => "getVideoUrl",
            Command::GetVideoEmbedCode => "getVideoEmbedCode",
            Command::GetPlaybackRate => "getPlaybackRate",
            Command::SetPlaybackRate => "setPlaybackRate",
            Command::GetAvailablePlaybackRates => "getAvailablePlaybackRates",
            Command::GetPlayerState => "getPlayerState",
            Command::GetVideoLoadedFraction => "getVideoLoadedFraction",
            Command::LoadVideoById => "loadVideoById",
            Command::CueVideoById => "cueVideoById",
            Command::SetSize => "setSize",
            Command::Cleanup => "cleanup",
            Command::UpdateProgressInterval => "updateProgressInterval",
        }
    }
}

/// A positional command argument.
///
/// The channel is JSON text, so arguments are limited to scalars. `Null`
/// stands in for omitted optional arguments (`undefined` positions collapse
/// to `null` when the host serializes the argument array).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommandArg {
    Bool(bool),
    Number(f64),
    Text(String),
    Null,
}

impl CommandArg {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CommandArg::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CommandArg::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CommandArg::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CommandArg::Null)
    }
}

impl From<f64> for CommandArg {
    fn from(value: f64) -> Self {
        CommandArg::Number(value)
    }
}

impl From<u64> for CommandArg {
    fn from(value: u64) -> Self {
        CommandArg::Number(value as f64)
    }
}

impl From<bool> for CommandArg {
    fn from(value: bool) -> Self {
        CommandArg::Bool(value)
    }
}

impl From<&str> for CommandArg {
    fn from(value: &str) -> Self {
        CommandArg::Text(value.to_owned())
    }
}

impl From<String> for CommandArg {
    fn from(value: String) -> Self {
        CommandArg::Text(value)
    }
}

impl<T: Into<CommandArg>> From<Option<T>> for CommandArg {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CommandArg::Null)
    }
}

/// The host → context wire envelope.
///
/// `id` is present iff the caller registered a pending resolver for the
/// command; its absence marks the command as fire-and-forget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandEnvelope {
    pub command: Command,
    #[serde(default)]
    pub args: Vec<CommandArg>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl CommandEnvelope {
    pub fn new(command: Command, args: Vec<CommandArg>) -> Self {
        Self {
            command,
            args,
            id: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_wire_names_round_trip() {
        for command in [
            Command::Play,
            Command::SeekTo,
            Command::UnMute,
            Command::GetAvailablePlaybackRates,
            Command::UpdateProgressInterval,
        ] {
            let json = serde_json::to_string(&command).unwrap();
            assert_eq!(json, format!("\"{}\"", command.wire_name()));
            let back: Command = serde_json::from_str(&json).unwrap();
            assert_eq!(back, command);
        }
    }

    #[test]
    fn queries_need_results_and_mutations_do_not() {
        assert!(Command::GetVolume.needs_result());
        assert!(Command::GetPlayerState.needs_result());
        assert!(!Command::Play.needs_result());
        assert!(!Command::SeekTo.needs_result());
        assert!(!Command::Cleanup.needs_result());
    }

    #[test]
    fn envelope_serializes_exact_wire_shape() {
        let envelope = CommandEnvelope::new(
            Command::SeekTo,
            vec![CommandArg::from(30.0), CommandArg::from(true)],
        )
        .with_id("1");

        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"command": "seekTo", "args": [30.0, true], "id": "1"})
        );
    }

    #[test]
    fn fire_and_forget_envelope_omits_id() {
        let envelope = CommandEnvelope::new(Command::Play, vec![]);
        let json = serde_json::to_string(&envelope).unwrap();
        assert!(!json.contains("\"id\""));
    }

    #[test]
    fn null_args_carry_omitted_optionals() {
        let envelope = CommandEnvelope::new(
            Command::LoadVideoById,
            vec![
                CommandArg::from("AbZH7XWDW_k"),
                CommandArg::from(Some(10.0)),
                CommandArg::from(None::<f64>),
            ],
        );
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["args"], serde_json::json!(["AbZH7XWDW_k", 10.0, null]));
    }

    #[test]
    fn unknown_command_name_fails_to_parse() {
        let raw = r#"{"command": "evalArbitrary", "args": []}"#;
        assert!(serde_json::from_str::<CommandEnvelope>(raw).is_err());
    }
}
