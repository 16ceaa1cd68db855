//! Core types for the playback engine

use encore_core::{PlaybackSource, Track};
use serde::{Deserialize, Serialize};

/// Repeat mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepeatMode {
    /// Stop when queue ends
    #[default]
    Off,

    /// Loop entire queue
    All,

    /// Loop current track only
    One,
}

/// Configuration for the player store
///
/// The thresholds are product policy, not mechanism: the shipped defaults
/// match common player conventions, and tests exercise other values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Continuous listening time before a play qualifies for logging
    /// (default: 30 seconds)
    pub scrobble_threshold_secs: u32,

    /// `previous()` within this many milliseconds of track start restarts
    /// the current track instead of going back (default: 3000)
    pub previous_restart_threshold_ms: u64,

    /// Expected cadence of engine position snapshots (default: 250ms).
    /// Informational; the session tracker works with any cadence.
    pub position_update_interval_ms: u64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            scrobble_threshold_secs: 30,
            previous_restart_threshold_ms: 3000,
            position_update_interval_ms: 250,
        }
    }
}

/// Periodic position snapshot pushed in from the media engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionUpdate {
    /// Identity of the track the engine currently has loaded
    pub track_hash: String,

    /// Playback position in milliseconds
    pub position_ms: u64,

    /// Total duration in milliseconds
    pub duration_ms: u64,

    /// Whether the engine is actively playing (vs. paused/buffering)
    pub is_playing: bool,
}

/// Read-only view of the player for UI rendering
///
/// `pending_track` takes display priority over `current_track` while a
/// load is in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    /// Queue in playback order
    pub queue: Vec<Track>,

    /// Zero-based index of the current track in `queue`
    pub current_index: usize,

    /// Confirmed current track (engine finished loading it)
    pub current_track: Option<Track>,

    /// Track whose load was requested but not yet confirmed
    pub pending_track: Option<Track>,

    /// Whether shuffle is active
    pub shuffle_mode: bool,

    /// Repeat mode
    pub repeat_mode: RepeatMode,

    /// Whether a track load is in flight
    pub is_loading: bool,

    /// Last user-visible failure, cleared by the next successful load
    pub error: Option<String>,

    /// Browsing context that created the queue
    pub source: Option<PlaybackSource>,
}

impl PlayerSnapshot {
    /// Track the UI should display right now
    ///
    /// Pending wins over current so the UI responds before the engine
    /// confirms the load.
    pub fn display_track(&self) -> Option<&Track> {
        self.pending_track.as_ref().or(self.current_track.as_ref())
    }
}
