//! Encore Player - Shared Domain Types
//!
//! Types shared between the playback core, the server client, and the
//! UI bindings:
//! - [`Track`]: library track as served by the music server
//! - [`PlaybackSource`]: opaque tag for the browsing context that started playback
//! - [`FolderEntry`]: tagged folder-listing entry (folder or track)
//!
//! This crate holds plain data only. Queue and playback semantics live in
//! `encore-playback`; HTTP access lives in `encore-server-client`.

mod source;
mod track;

pub use source::PlaybackSource;
pub use track::{FolderEntry, Track};
