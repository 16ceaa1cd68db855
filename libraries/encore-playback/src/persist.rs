//! Durable player state
//!
//! Snapshot/restore boundary for surviving app restarts. Only the durable
//! data model is serialized; transient fields (pending track, live
//! session, error) never reach storage.

use crate::types::RepeatMode;
use encore_core::{PlaybackSource, Track};
use serde::{Deserialize, Serialize};

/// Serialized player state written to device storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedPlayer {
    /// Queue in playback order
    pub queue: Vec<Track>,

    /// Pre-shuffle canonical order
    pub original_queue: Vec<Track>,

    /// Current position in `queue` (clamped on restore)
    pub current_index: usize,

    /// Shuffle flag
    pub shuffle_mode: bool,

    /// Repeat mode
    pub repeat_mode: RepeatMode,

    /// Browsing context that created the queue
    pub source: Option<PlaybackSource>,
}
