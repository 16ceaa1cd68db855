//! Track domain type

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Audio track as served by the music server
///
/// Immutable from the playback core's perspective: the core never rewrites
/// a track's fields, and identity comparisons always go through
/// [`Track::track_hash`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Opaque stable identity assigned by the server
    #[serde(rename = "trackhash")]
    pub track_hash: String,

    /// Track title
    pub title: String,

    /// Artist names (servers report one or more)
    pub artists: Vec<String>,

    /// Album name
    pub album: Option<String>,

    /// Track duration in seconds
    #[serde(rename = "duration")]
    pub duration_secs: u32,

    /// Artwork reference (resolved to a URL by the server client)
    pub image: String,

    /// Stream-source path on the server
    pub filepath: String,

    /// Favorite flag (toggled by external collaborators, not the core)
    #[serde(default)]
    pub is_favorite: bool,
}

impl Track {
    /// Get the track duration as a Duration
    pub fn duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.duration_secs))
    }

    /// Check identity against another track
    pub fn is_same(&self, other: &Track) -> bool {
        self.track_hash == other.track_hash
    }
}

/// Entry in a server folder listing
///
/// Explicitly discriminated: a listing mixes folders and tracks, and the
/// variant tag (not the presence of some field) decides which is which.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FolderEntry {
    /// Sub-folder
    Folder {
        /// Server path of the folder
        path: String,
        /// Display name
        name: String,
    },

    /// Playable track
    Track(Track),
}

impl FolderEntry {
    /// Get the track if this entry is one
    pub fn as_track(&self) -> Option<&Track> {
        match self {
            FolderEntry::Track(track) => Some(track),
            FolderEntry::Folder { .. } => None,
        }
    }

    /// Check if this entry is a folder
    pub fn is_folder(&self) -> bool {
        matches!(self, FolderEntry::Folder { .. })
    }
}
