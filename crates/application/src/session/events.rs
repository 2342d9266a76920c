//! Session change events

use chrono::{DateTime, Utc};

/// Events broadcast on session changes, so consumers can re-render on
/// replace/clear instead of polling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// A new token set was installed by a login or refresh.
    Replaced {
        /// First characters of the access token, for display.
        token_preview: String,
        /// When the new access token expires, if declared.
        expires_at: Option<DateTime<Utc>>,
    },
    /// The session was cleared by logout.
    Cleared,
}

impl SessionEvent {
    /// A short preview of an access token (first 8 chars + ellipsis).
    #[must_use]
    pub fn token_preview(token: &str) -> String {
        if token.len() > 12 {
            format!("{}...", &token[..8])
        } else {
            token.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn preview_truncates_long_tokens() {
        assert_eq!(
            SessionEvent::token_preview("abcdefghijklmnop"),
            "abcdefgh..."
        );
        assert_eq!(SessionEvent::token_preview("short"), "short");
    }
}
