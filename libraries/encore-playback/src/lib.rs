//! Encore Player - Playback Core
//!
//! The queue and session engine behind the mobile client: owns what is
//! currently playing, the ordered queue, shuffle/repeat semantics,
//! track-switch sequencing against the media engine, and play-log
//! (scrobble) accounting.
//!
//! # Architecture
//!
//! The crate is platform-agnostic. The native media engine, the play-log
//! endpoint, and the artwork cache are consumed through traits
//! ([`MediaEngine`], [`PlayLogger`], [`ArtworkPrefetcher`]); platform glue
//! implements them and feeds engine callbacks back in through
//! [`PlayerStore::on_position_update`] and
//! [`PlayerStore::on_track_finished`].
//!
//! # Example
//!
//! ```ignore
//! use encore_playback::{PlaybackConfig, PlayerStore};
//! use encore_core::PlaybackSource;
//! use std::sync::Arc;
//!
//! let store = PlayerStore::new(engine, urls, logger, PlaybackConfig::default());
//!
//! // Play an album from its third track
//! store
//!     .set_queue(tracks, 2, false, PlaybackSource::Album("alb1".into()))
//!     .await?;
//!
//! store.next().await?;
//! store.toggle_shuffle().await;
//!
//! let snapshot = store.snapshot().await;
//! println!("now playing: {:?}", snapshot.display_track());
//! ```

mod engine;
mod error;
mod persist;
mod queue;
mod session;
mod shuffle;
mod store;
pub mod types;

// Public exports
pub use engine::{ArtworkPrefetcher, MediaEngine, PlayLogger, StreamUrlResolver};
pub use error::{PlaybackError, Result};
pub use persist::PersistedPlayer;
pub use queue::Queue;
pub use session::PlaybackSession;
pub use shuffle::shuffle_with_pinned;
pub use store::PlayerStore;
pub use types::{PlaybackConfig, PlayerSnapshot, PositionUpdate, RepeatMode};
