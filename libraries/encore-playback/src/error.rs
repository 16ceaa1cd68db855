//! Error types for the playback core

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Queue is empty
    #[error("Queue is empty")]
    QueueEmpty,

    /// Media engine failed to load a track
    #[error("Failed to load track {track_hash}: {message}")]
    LoadFailed {
        track_hash: String,
        message: String,
    },

    /// Media engine transport call failed
    #[error("Media engine error: {0}")]
    Engine(String),

    /// Play-log submission failed
    #[error("Play log submission failed: {0}")]
    LogSubmission(String),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
