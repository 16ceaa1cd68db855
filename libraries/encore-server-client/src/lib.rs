//! Encore Player - Server Client
//!
//! HTTP collaborator for the playback core:
//!
//! - **Play logging**: submits "this track was listened to" events once the
//!   core's session tracker crosses its threshold
//! - **Stream URLs**: resolves a track to the URL the media engine loads
//! - **Artwork prefetch**: fire-and-forget warm-cache fetches
//!
//! The full catalog API (albums, artists, playlists, search, favorites)
//! lives with the screens that render it; this crate only carries the
//! endpoints the playback core depends on.

mod client;
mod error;
mod types;

// Re-export main types
pub use client::EncoreServerClient;
pub use error::{Result, ServerClientError};
pub use types::{LogPlaybackRequest, ServerConfig};
