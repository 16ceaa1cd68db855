//! Player store - playback orchestration
//!
//! Owns what is currently playing, the queue, shuffle/repeat semantics,
//! and the pending/current split that keeps the UI responsive while the
//! media engine loads asynchronously.
//!
//! Concurrency model: one logical state guarded by an `RwLock`, never held
//! across engine awaits. Every load captures a monotonically increasing
//! generation before the await and re-checks it before committing, so a
//! superseded load can never clobber a newer request's state.

use crate::{
    engine::{ArtworkPrefetcher, MediaEngine, PlayLogger, StreamUrlResolver},
    error::{PlaybackError, Result},
    persist::PersistedPlayer,
    queue::Queue,
    session::PlaybackSession,
    types::{PlaybackConfig, PlayerSnapshot, PositionUpdate, RepeatMode},
};
use encore_core::{PlaybackSource, Track};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Mutable player state behind the store's lock
#[derive(Debug, Default)]
struct PlayerState {
    queue: Queue,
    shuffle_mode: bool,
    repeat_mode: RepeatMode,
    current: Option<Track>,
    pending: Option<Track>,
    session: Option<PlaybackSession>,
    is_loading: bool,
    error: Option<String>,
    source: Option<PlaybackSource>,

    /// Last engine-reported position for the current track, for the
    /// previous-restarts-track check
    last_position_ms: u64,

    /// Monotonic token: loads commit only if they still own the latest value
    load_generation: u64,
}

/// Playback orchestrator
///
/// Cloneable handle; clones share the same state, engine, and
/// collaborators. Platform glue pushes engine callbacks in through
/// [`PlayerStore::on_position_update`] and
/// [`PlayerStore::on_track_finished`].
#[derive(Clone)]
pub struct PlayerStore {
    state: Arc<RwLock<PlayerState>>,
    engine: Arc<dyn MediaEngine>,
    urls: Arc<dyn StreamUrlResolver>,
    logger: Arc<dyn PlayLogger>,
    artwork: Option<Arc<dyn ArtworkPrefetcher>>,
    config: PlaybackConfig,
}

impl PlayerStore {
    /// Create a new player store over the given collaborators
    pub fn new(
        engine: Arc<dyn MediaEngine>,
        urls: Arc<dyn StreamUrlResolver>,
        logger: Arc<dyn PlayLogger>,
        config: PlaybackConfig,
    ) -> Self {
        Self {
            state: Arc::new(RwLock::new(PlayerState::default())),
            engine,
            urls,
            logger,
            artwork: None,
            config,
        }
    }

    /// Attach an artwork prefetcher (optional warm-cache collaborator)
    #[must_use]
    pub fn with_artwork_prefetcher(mut self, artwork: Arc<dyn ArtworkPrefetcher>) -> Self {
        self.artwork = Some(artwork);
        self
    }

    // ===== Queue Playback =====

    /// Replace the queue and start playing from `start_index`
    ///
    /// With `preserve_shuffle` and shuffle mode active, the start track is
    /// pinned first and the rest randomized; otherwise playback follows the
    /// given order (and shuffle mode turns off, since the caller asked for
    /// an explicit order). Empty input is a no-op.
    pub async fn set_queue(
        &self,
        tracks: Vec<Track>,
        start_index: usize,
        preserve_shuffle: bool,
        source: PlaybackSource,
    ) -> Result<()> {
        if tracks.is_empty() {
            return Ok(());
        }

        {
            let mut state = self.state.write().await;

            if !preserve_shuffle {
                state.shuffle_mode = false;
            }
            let shuffle = preserve_shuffle && state.shuffle_mode;

            state.queue.set_tracks(tracks, start_index, shuffle);
            state.source = Some(source);

            debug!(
                len = state.queue.len(),
                index = state.queue.current_index(),
                shuffled = shuffle,
                source = %state.source.as_ref().map(PlaybackSource::tag).unwrap_or_default(),
                "queue replaced"
            );
        }

        self.load_current().await
    }

    /// Advance to the next track
    ///
    /// Repeat semantics: `One` restarts the current track in place; `All`
    /// wraps past the end; `Off` at the last track pauses instead of
    /// advancing out of bounds.
    pub async fn next(&self) -> Result<()> {
        let target = {
            let mut state = self.state.write().await;
            if state.queue.is_empty() {
                return Ok(());
            }

            match state.repeat_mode {
                RepeatMode::One => {
                    self.flush_scrobble(&mut state);
                    None
                }
                RepeatMode::All | RepeatMode::Off => {
                    let next = state.queue.current_index() + 1;
                    if next < state.queue.len() {
                        Some(next)
                    } else if state.repeat_mode == RepeatMode::All {
                        Some(0)
                    } else {
                        // End of queue with repeat off: stop advancing
                        drop(state);
                        debug!("next() at queue end, pausing");
                        return self.engine.pause().await;
                    }
                }
            }
        };

        match target {
            Some(index) => self.jump_to(index).await,
            None => self.restart_current().await,
        }
    }

    /// Go back to the previous track
    ///
    /// Within `previous_restart_threshold_ms` of track start the current
    /// track restarts in place instead: after one tap moves back a track,
    /// a quick second tap restarts the freshly entered track rather than
    /// jumping back two. Repeat `One` always restarts; `All` wraps from
    /// the first track to the last; `Off` at the first track restarts it.
    pub async fn previous(&self) -> Result<()> {
        let target = {
            let state = self.state.read().await;
            if state.queue.is_empty() {
                return Ok(());
            }

            if state.repeat_mode == RepeatMode::One
                || state.last_position_ms <= self.config.previous_restart_threshold_ms
            {
                None
            } else {
                let index = state.queue.current_index();
                if index > 0 {
                    Some(index - 1)
                } else if state.repeat_mode == RepeatMode::All {
                    Some(state.queue.len() - 1)
                } else {
                    None
                }
            }
        };

        match target {
            Some(index) => self.jump_to(index).await,
            None => self.restart_current().await,
        }
    }

    /// Jump straight to `index`, bypassing repeat logic
    ///
    /// Out-of-range is a no-op.
    pub async fn skip_to(&self, index: usize) -> Result<()> {
        {
            let state = self.state.read().await;
            if index >= state.queue.len() {
                return Ok(());
            }
        }
        self.jump_to(index).await
    }

    /// Clear the queue and release the engine's loaded resource
    ///
    /// Hard cancellation point: any in-flight load result is discarded.
    pub async fn clear_queue(&self) -> Result<()> {
        {
            let mut state = self.state.write().await;
            state.load_generation += 1;
            state.queue.clear();
            state.current = None;
            state.pending = None;
            state.session = None;
            state.is_loading = false;
            state.error = None;
            state.source = None;
            state.last_position_ms = 0;
        }

        debug!("queue cleared, releasing engine");
        self.engine.release().await
    }

    // ===== Queue Editing =====

    /// Append a track to the end of the queue
    pub async fn add_to_queue(&self, track: Track) {
        let mut state = self.state.write().await;
        state.queue.add(track);
    }

    /// Insert a track right after the current one
    pub async fn play_next(&self, track: Track) {
        let mut state = self.state.write().await;
        state.queue.insert_next(track);
    }

    /// Remove the track at `index` (never the current one)
    pub async fn remove_from_queue(&self, index: usize) {
        let mut state = self.state.write().await;
        state.queue.remove(index);
    }

    /// Move a track from `from` to `to`
    pub async fn move_queue_item(&self, from: usize, to: usize) {
        let mut state = self.state.write().await;
        state.queue.move_item(from, to);
    }

    // ===== Modes =====

    /// Toggle shuffle, keeping the current track playing in place
    pub async fn toggle_shuffle(&self) {
        let mut state = self.state.write().await;
        if state.shuffle_mode {
            state.queue.disable_shuffle();
            state.shuffle_mode = false;
        } else {
            state.queue.enable_shuffle();
            state.shuffle_mode = true;
        }
        debug!(shuffle = state.shuffle_mode, "shuffle toggled");
    }

    /// Set the repeat mode
    pub async fn set_repeat(&self, mode: RepeatMode) {
        let mut state = self.state.write().await;
        state.repeat_mode = mode;
    }

    // ===== Transport =====

    /// Pause playback
    pub async fn pause(&self) -> Result<()> {
        self.engine.pause().await
    }

    /// Resume playback
    pub async fn resume(&self) -> Result<()> {
        self.engine.play().await
    }

    /// Set volume in `0.0..=1.0`
    pub async fn set_volume(&self, volume: f32) -> Result<()> {
        self.engine.set_volume(volume.clamp(0.0, 1.0)).await
    }

    /// Seek within the current track
    ///
    /// Resets the session's scrobble accounting: a reposition breaks the
    /// continuous-listen assumption.
    pub async fn seek(&self, position_ms: u64) -> Result<()> {
        self.engine.seek(position_ms).await?;

        let mut state = self.state.write().await;
        state.last_position_ms = position_ms;
        if let Some(session) = state.session.as_mut() {
            session.on_seek(position_ms);
        }
        Ok(())
    }

    // ===== Engine Callbacks =====

    /// Ingest a periodic position snapshot from the engine
    ///
    /// Routed by track identity: snapshots for anything but the active
    /// session's track are stale stream tail-ends and are dropped.
    pub async fn on_position_update(&self, update: PositionUpdate) {
        let mut state = self.state.write().await;

        let Some(session) = state.session.as_mut() else {
            return;
        };
        if session.track_hash != update.track_hash {
            return;
        }

        if update.is_playing {
            session.on_position_advance(update.position_ms);
        }
        state.last_position_ms = update.position_ms;

        self.flush_scrobble(&mut state);
    }

    /// Handle the engine's natural-completion notification
    ///
    /// Flushes the finished listen, then advances like `next()`.
    pub async fn on_track_finished(&self) -> Result<()> {
        {
            let mut state = self.state.write().await;
            self.flush_scrobble(&mut state);
        }
        self.next().await
    }

    // ===== State Queries =====

    /// Read-only snapshot for UI rendering
    pub async fn snapshot(&self) -> PlayerSnapshot {
        let state = self.state.read().await;
        PlayerSnapshot {
            queue: state.queue.tracks().to_vec(),
            current_index: state.queue.current_index(),
            current_track: state.current.clone(),
            pending_track: state.pending.clone(),
            shuffle_mode: state.shuffle_mode,
            repeat_mode: state.repeat_mode,
            is_loading: state.is_loading,
            error: state.error.clone(),
            source: state.source.clone(),
        }
    }

    // ===== Persistence =====

    /// Durable snapshot of the queue and modes
    ///
    /// Transients (pending track, live session, error) are deliberately
    /// excluded.
    pub async fn persist(&self) -> PersistedPlayer {
        let state = self.state.read().await;
        PersistedPlayer {
            queue: state.queue.tracks().to_vec(),
            original_queue: state.queue.original().to_vec(),
            current_index: state.queue.current_index(),
            shuffle_mode: state.shuffle_mode,
            repeat_mode: state.repeat_mode,
            source: state.source.clone(),
        }
    }

    /// Restore a persisted snapshot without starting playback
    ///
    /// The saved current track becomes current for display; the engine
    /// stays idle until the next transport operation.
    pub async fn restore(&self, saved: PersistedPlayer) {
        let mut state = self.state.write().await;
        state
            .queue
            .restore(saved.queue, saved.original_queue, saved.current_index);
        state.shuffle_mode = saved.shuffle_mode;
        state.repeat_mode = saved.repeat_mode;
        state.source = saved.source;
        state.current = state.queue.current_track().cloned();
        state.pending = None;
        state.session = None;
        state.is_loading = false;
        state.error = None;
        state.last_position_ms = 0;
    }

    // ===== Internals =====

    /// Move the queue pointer and load that track
    async fn jump_to(&self, index: usize) -> Result<()> {
        {
            let mut state = self.state.write().await;
            if !state.queue.set_current_index(index) {
                return Ok(());
            }
        }
        self.load_current().await
    }

    /// Restart the current track in place (repeat-one / quick-previous)
    async fn restart_current(&self) -> Result<()> {
        {
            let state = self.state.read().await;
            if state.current.is_none() && state.pending.is_none() {
                return Ok(());
            }
        }

        self.engine.seek(0).await?;
        self.engine.play().await?;

        let mut state = self.state.write().await;
        state.last_position_ms = 0;
        if let Some(session) = state.session.as_mut() {
            session.on_seek(0);
        }
        Ok(())
    }

    /// Load and play whatever the queue currently points at
    ///
    /// Marks the track pending immediately, prefetches artwork, then awaits
    /// the engine without holding the lock. The captured generation guards
    /// the commit: a stale completion (success or failure) is discarded,
    /// leaving the newer request's pending marker alone.
    async fn load_current(&self) -> Result<()> {
        let (track, generation) = {
            let mut state = self.state.write().await;
            let Some(track) = state.queue.current_track().cloned() else {
                return Err(PlaybackError::QueueEmpty);
            };

            // Flush the outgoing listen before its session is replaced
            self.flush_scrobble(&mut state);

            state.load_generation += 1;
            state.pending = Some(track.clone());
            state.is_loading = true;
            (track, state.load_generation)
        };

        self.prefetch_artwork(&track);

        let stream_url = self.urls.stream_url(&track);
        let result = self.engine.load(&track, &stream_url).await;

        let mut state = self.state.write().await;
        if state.load_generation != generation {
            debug!(
                track = %track.track_hash,
                "load superseded by a newer request, discarding result"
            );
            return Ok(());
        }

        match result {
            Ok(()) => {
                state.current = state.pending.take();
                state.session = Some(PlaybackSession::start(&track.track_hash));
                state.is_loading = false;
                state.error = None;
                state.last_position_ms = 0;
                debug!(track = %track.track_hash, "track loaded and playing");
                Ok(())
            }
            Err(e) => {
                // The previously current track stays current; only the
                // optimistic pending marker is rolled back.
                state.pending = None;
                state.is_loading = false;
                state.error = Some(e.to_string());
                warn!(track = %track.track_hash, error = %e, "track load failed");
                Err(PlaybackError::LoadFailed {
                    track_hash: track.track_hash,
                    message: e.to_string(),
                })
            }
        }
    }

    /// Fire the play log for the active session if it qualifies
    ///
    /// The latch is set before the submission resolves, so a session gets
    /// at most one attempt no matter how the call ends.
    fn flush_scrobble(&self, state: &mut PlayerState) {
        let threshold = self.config.scrobble_threshold_secs;
        let Some(session) = state.session.as_mut() else {
            return;
        };
        if !session.should_scrobble(threshold) {
            return;
        }
        session.mark_scrobbled();

        let track_hash = session.track_hash.clone();
        let source_tag = state
            .source
            .as_ref()
            .map(PlaybackSource::tag)
            .unwrap_or_default();
        let logger = Arc::clone(&self.logger);

        tokio::spawn(async move {
            debug!(track = %track_hash, source = %source_tag, "submitting play log");
            if let Err(e) = logger
                .log_playback(&track_hash, threshold, &source_tag)
                .await
            {
                // Accepted data loss: the latch stays set either way
                warn!(track = %track_hash, error = %e, "play log submission failed");
            }
        });
    }

    /// Fire-and-forget artwork warm-up for an upcoming track
    fn prefetch_artwork(&self, track: &Track) {
        if let Some(artwork) = &self.artwork {
            let artwork = Arc::clone(artwork);
            let image = track.image.clone();
            tokio::spawn(async move {
                artwork.prefetch(&image).await;
            });
        }
    }
}
