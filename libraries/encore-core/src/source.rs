//! Playback source tags
//!
//! Identifies which browsing context started the current queue. The
//! playback core only passes the tag through to log attribution and to the
//! UI's "is this context already playing" check.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Browsing context that initiated the current queue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackSource {
    /// An album page (`al:<albumhash>`)
    Album(String),

    /// An artist page (`ar:<artisthash>`)
    Artist(String),

    /// A playlist page (`pl:<playlistid>`)
    Playlist(String),

    /// A folder listing (`fo:<path>`)
    Folder(String),

    /// The favorites collection
    Favorites,

    /// Search results
    Search,

    /// Recently played
    Recent,

    /// The queue screen itself (manual queue edits)
    Queue,
}

impl PlaybackSource {
    /// Render the opaque tag recorded with play logs
    pub fn tag(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PlaybackSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackSource::Album(hash) => write!(f, "al:{hash}"),
            PlaybackSource::Artist(hash) => write!(f, "ar:{hash}"),
            PlaybackSource::Playlist(id) => write!(f, "pl:{id}"),
            PlaybackSource::Folder(path) => write!(f, "fo:{path}"),
            PlaybackSource::Favorites => write!(f, "favorites"),
            PlaybackSource::Search => write!(f, "search"),
            PlaybackSource::Recent => write!(f, "recent"),
            PlaybackSource::Queue => write!(f, "queue"),
        }
    }
}
