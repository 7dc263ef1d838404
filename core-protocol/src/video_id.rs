//! Video identifier resolution.
//!
//! A source is either a bare 11-character id or a URL in one of the known
//! YouTube shapes (`youtu.be/…`, `youtube.com/{embed,v,watch,shorts,live}/…`
//! including the `-nocookie`/`education` domain variants). Anything else is
//! rejected before a command ever reaches the player.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::PlayerError;

static MATCH_URL_YOUTUBE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:youtu\.be/|youtube(?:-nocookie|education)?\.com/(?:embed/|v/|watch/|watch\?v=|watch\?.+&v=|shorts/|live/))([\w-]{11})",
    )
    .expect("video URL pattern is valid")
});

static VIDEO_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w-]{11}$").expect("video id pattern is valid"));

/// Whether `video_id` has the fixed 11-character id shape.
pub fn validate_video_id(video_id: &str) -> bool {
    VIDEO_ID.is_match(video_id)
}

/// Pull the video id out of a known URL shape, if present.
pub fn extract_video_id_from_url(url: &str) -> Option<String> {
    MATCH_URL_YOUTUBE
        .captures(url)
        .map(|captures| captures[1].to_owned())
}

/// Resolve a caller-supplied source into a validated video id.
///
/// Bare ids win over URL extraction; failure maps to the
/// `INVALID_YOUTUBE_VIDEO_ID` wire error rather than a panic or a thrown
/// error, per the bridge's fail-via-event policy.
pub fn resolve_video_source(source: &str) -> Result<String, PlayerError> {
    if validate_video_id(source) {
        return Ok(source.to_owned());
    }
    extract_video_id_from_url(source).ok_or_else(PlayerError::invalid_video_id)
}
