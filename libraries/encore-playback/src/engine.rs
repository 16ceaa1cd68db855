//! External collaborator contracts
//!
//! The player store drives the native media engine and the play-log
//! endpoint through these traits. Platform glue implements [`MediaEngine`]
//! over the real backend and pushes its position/completion callbacks into
//! the store (`on_position_update` / `on_track_finished`); the server
//! client implements [`PlayLogger`] and [`ArtworkPrefetcher`].

use crate::error::Result;
use async_trait::async_trait;
use encore_core::Track;

/// Narrow transport contract over the native media engine
///
/// `load` replaces whatever media is currently loaded and resolves once
/// the engine has the track ready and playing. Loads may take arbitrary
/// time and complete out of order; the store discards superseded results.
#[async_trait]
pub trait MediaEngine: Send + Sync {
    /// Load `track` from `stream_url` and start playback
    async fn load(&self, track: &Track, stream_url: &str) -> Result<()>;

    /// Resume playback
    async fn play(&self) -> Result<()>;

    /// Pause playback
    async fn pause(&self) -> Result<()>;

    /// Seek to `position_ms` in the loaded track
    async fn seek(&self, position_ms: u64) -> Result<()>;

    /// Set volume in `0.0..=1.0`
    async fn set_volume(&self, volume: f32) -> Result<()>;

    /// Release the loaded media resource
    async fn release(&self) -> Result<()>;
}

/// Resolves a track to the URL the engine streams from
///
/// Kept separate from [`MediaEngine`] so the store stays independent of
/// how the server client builds its endpoints.
pub trait StreamUrlResolver: Send + Sync {
    /// Build the stream URL for `track`
    fn stream_url(&self, track: &Track) -> String;
}

/// Play-history submission endpoint
#[async_trait]
pub trait PlayLogger: Send + Sync {
    /// Submit one "this track was listened to" event
    ///
    /// Fire-and-forget from the store's perspective: the caller swallows
    /// failures after logging them.
    async fn log_playback(
        &self,
        track_hash: &str,
        threshold_secs: u32,
        source_tag: &str,
    ) -> Result<()>;
}

/// Artwork warm-cache collaborator
///
/// Infallible by contract: prefetch failures only cost a cold image cache,
/// never playback correctness, so implementations swallow their own errors.
#[async_trait]
pub trait ArtworkPrefetcher: Send + Sync {
    /// Warm the cache for `image_ref`
    async fn prefetch(&self, image_ref: &str);
}
