//! Request/response types for the server API.

use serde::{Deserialize, Serialize};

/// Connection settings for a music server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL, e.g. `https://music.example.com`
    pub url: String,

    /// Bearer token attached to authenticated requests
    pub access_token: Option<String>,
}

impl ServerConfig {
    /// Create a config for an unauthenticated server.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            access_token: None,
        }
    }

    /// Attach an access token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }
}

/// Body of a play-log submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogPlaybackRequest {
    /// Identity of the listened track
    pub trackhash: String,

    /// Listened-duration threshold the play crossed, in seconds
    pub duration: u32,

    /// Browsing context tag, e.g. `al:<albumhash>`
    pub source: String,
}
