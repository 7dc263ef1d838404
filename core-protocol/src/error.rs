//! Error payloads carried over the event channel.
//!
//! Two code ranges coexist on the wire:
//! - official player error codes (2, 5, 100, 101, 150), passed through with
//!   their documented labels;
//! - bridge-reserved codes: 1000–1004 for transport/validation failures
//!   raised on the host side, and the negative −4/−5 pair used by the
//!   in-context dispatcher for failed command execution.

use serde::{Deserialize, Serialize};

/// Wire error codes, official and bridge-reserved.
pub mod codes {
    // Official player codes.
    pub const INVALID_PARAMETER_VALUE: i32 = 2;
    pub const HTML5_PLAYER_ERROR: i32 = 5;
    pub const VIDEO_NOT_FOUND_OR_PRIVATE: i32 = 100;
    pub const EMBEDDED_PLAYBACK_NOT_ALLOWED: i32 = 101;
    pub const EMBEDDED_RESTRICTED: i32 = 150;

    // Bridge-reserved codes (host side).
    pub const FAILED_TO_PARSE_WEBVIEW_MESSAGE: i32 = 1000;
    pub const WEBVIEW_LOADING_ERROR: i32 = 1001;
    pub const INVALID_YOUTUBE_VIDEO_ID: i32 = 1002;
    pub const FAILED_TO_LOAD_YOUTUBE_API: i32 = 1003;
    pub const UNKNOWN_ERROR: i32 = 1004;

    // Bridge-reserved codes (context dispatcher).
    pub const COMMAND_NOT_FOUND: i32 = -4;
    pub const COMMAND_EXECUTION_FAILED: i32 = -5;
}

/// Label lookup for the fixed code table.
pub fn error_label(code: i32) -> Option<&'static str> {
    match code {
        codes::INVALID_PARAMETER_VALUE => Some("INVALID_PARAMETER_VALUE"),
        codes::HTML5_PLAYER_ERROR => Some("HTML5_PLAYER_ERROR"),
        codes::VIDEO_NOT_FOUND_OR_PRIVATE => Some("VIDEO_NOT_FOUND_OR_PRIVATE"),
        codes::EMBEDDED_PLAYBACK_NOT_ALLOWED => Some("EMBEDDED_PLAYBACK_NOT_ALLOWED"),
        codes::EMBEDDED_RESTRICTED => Some("EMBEDDED_RESTRICTED"),
        codes::FAILED_TO_PARSE_WEBVIEW_MESSAGE => Some("FAILED_TO_PARSE_WEBVIEW_MESSAGE"),
        codes::WEBVIEW_LOADING_ERROR => Some("WEBVIEW_LOADING_ERROR"),
        codes::INVALID_YOUTUBE_VIDEO_ID => Some("INVALID_YOUTUBE_VIDEO_ID"),
        codes::FAILED_TO_LOAD_YOUTUBE_API => Some("FAILED_TO_LOAD_YOUTUBE_API"),
        codes::UNKNOWN_ERROR => Some("UNKNOWN_ERROR"),
        _ => None,
    }
}

/// An error as it travels over the event channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerError {
    pub code: i32,
    pub message: String,
}

impl PlayerError {
    /// Map an official player error callback code to its labeled form.
    ///
    /// Codes outside the documented table collapse to `UNKNOWN_ERROR`
    /// rather than failing.
    pub fn from_player_code(code: i32) -> Self {
        match error_label(code) {
            Some(label) => Self {
                code,
                message: label.to_owned(),
            },
            None => Self {
                code: codes::UNKNOWN_ERROR,
                message: "UNKNOWN_ERROR".to_owned(),
            },
        }
    }

    pub fn parse_failure() -> Self {
        Self::from_player_code(codes::FAILED_TO_PARSE_WEBVIEW_MESSAGE)
    }

    pub fn webview_loading() -> Self {
        Self::from_player_code(codes::WEBVIEW_LOADING_ERROR)
    }

    pub fn invalid_video_id() -> Self {
        Self::from_player_code(codes::INVALID_YOUTUBE_VIDEO_ID)
    }

    pub fn api_load_failed() -> Self {
        Self::from_player_code(codes::FAILED_TO_LOAD_YOUTUBE_API)
    }

    /// Dispatcher response for a command name outside the closed set.
    pub fn command_not_found(name: &str) -> Self {
        Self {
            code: codes::COMMAND_NOT_FOUND,
            message: format!("Command not found: {name}"),
        }
    }

    /// Dispatcher response for a command whose execution failed.
    pub fn execution_failed(detail: impl std::fmt::Display) -> Self {
        Self {
            code: codes::COMMAND_EXECUTION_FAILED,
            message: format!("Execution failed: {detail}"),
        }
    }
}

impl std::fmt::Display for PlayerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "player error {}: {}", self.code, self.message)
    }
}
