//! Playback session tracking
//!
//! Accumulates listened time for the current track and decides when a play
//! qualifies for log submission. One session per track occupancy: a new
//! session starts the moment a track load begins and is replaced when a
//! different track becomes current.

use serde::{Deserialize, Serialize};

/// Listening accounting for one track occupancy
///
/// `accumulated_ms` only grows while the engine reports forward progress.
/// Seeking invalidates the continuous-listen assumption, so it resets both
/// the accumulation and the one-shot scrobble latch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackSession {
    /// Identity of the track being accounted
    pub track_hash: String,

    /// Last position reported by the engine, in milliseconds
    last_position_ms: u64,

    /// Total time spent actually playing, in milliseconds
    accumulated_ms: u64,

    /// One-shot latch: at most one log attempt per session
    has_scrobbled: bool,
}

impl PlaybackSession {
    /// Start a fresh session for `track_hash`
    pub fn start(track_hash: impl Into<String>) -> Self {
        Self {
            track_hash: track_hash.into(),
            last_position_ms: 0,
            accumulated_ms: 0,
            has_scrobbled: false,
        }
    }

    /// Record a position report from the engine while playing
    ///
    /// Only positive deltas accumulate. A non-positive delta (loop restart,
    /// stall, duplicate report) updates the reference position without
    /// touching the accumulation.
    pub fn on_position_advance(&mut self, new_position_ms: u64) {
        if new_position_ms > self.last_position_ms {
            self.accumulated_ms += new_position_ms - self.last_position_ms;
        }
        self.last_position_ms = new_position_ms;
    }

    /// Record an explicit seek
    ///
    /// A scrobble reflects one continuous listen; repositioning breaks that
    /// continuity, so accumulation and the latch restart from zero.
    pub fn on_seek(&mut self, new_position_ms: u64) {
        self.accumulated_ms = 0;
        self.has_scrobbled = false;
        self.last_position_ms = new_position_ms;
    }

    /// Whether this session currently qualifies for a log submission
    pub fn should_scrobble(&self, threshold_secs: u32) -> bool {
        !self.has_scrobbled && self.accumulated_ms / 1000 >= u64::from(threshold_secs)
    }

    /// Latch the session after firing a log submission
    ///
    /// Set regardless of whether the submission succeeds: at most one
    /// attempt per session, a failed log is simply lost.
    pub fn mark_scrobbled(&mut self) {
        self.has_scrobbled = true;
    }

    /// Accumulated listening time in milliseconds
    pub fn accumulated_ms(&self) -> u64 {
        self.accumulated_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const THRESHOLD: u32 = 30;

    #[test]
    fn fresh_session_does_not_qualify() {
        let session = PlaybackSession::start("abc");
        assert!(!session.should_scrobble(THRESHOLD));
        assert_eq!(session.accumulated_ms(), 0);
    }

    #[test]
    fn monotonic_progress_crosses_threshold() {
        let mut session = PlaybackSession::start("abc");

        for position in (0..=30_000).step_by(5000) {
            session.on_position_advance(position);
        }

        assert_eq!(session.accumulated_ms(), 30_000);
        assert!(session.should_scrobble(THRESHOLD));
    }

    #[test]
    fn qualifies_exactly_at_threshold() {
        let mut session = PlaybackSession::start("abc");

        session.on_position_advance(29_999);
        assert!(!session.should_scrobble(THRESHOLD));

        session.on_position_advance(30_000);
        assert!(session.should_scrobble(THRESHOLD));
    }

    #[test]
    fn backwards_position_never_decrements() {
        let mut session = PlaybackSession::start("abc");

        session.on_position_advance(10_000);
        assert_eq!(session.accumulated_ms(), 10_000);

        // Loop restart: position jumps back to near zero
        session.on_position_advance(500);
        assert_eq!(session.accumulated_ms(), 10_000);

        // Accumulation resumes from the new reference point
        session.on_position_advance(5500);
        assert_eq!(session.accumulated_ms(), 15_000);
    }

    #[test]
    fn duplicate_position_is_ignored() {
        let mut session = PlaybackSession::start("abc");

        session.on_position_advance(1000);
        session.on_position_advance(1000);
        assert_eq!(session.accumulated_ms(), 1000);
    }

    #[test]
    fn seek_resets_accumulation_and_latch() {
        let mut session = PlaybackSession::start("abc");

        session.on_position_advance(35_000);
        assert!(session.should_scrobble(THRESHOLD));

        session.on_seek(120_000);
        assert!(!session.should_scrobble(THRESHOLD));
        assert_eq!(session.accumulated_ms(), 0);

        // 30+ seconds of forward progress from the seek point re-qualifies
        session.on_position_advance(155_000);
        assert!(session.should_scrobble(THRESHOLD));
    }

    #[test]
    fn latch_fires_at_most_once() {
        let mut session = PlaybackSession::start("abc");

        session.on_position_advance(31_000);
        assert!(session.should_scrobble(THRESHOLD));

        session.mark_scrobbled();
        assert!(!session.should_scrobble(THRESHOLD));

        // Further progress does not re-qualify
        session.on_position_advance(90_000);
        assert!(!session.should_scrobble(THRESHOLD));
    }

    #[test]
    fn threshold_is_a_parameter() {
        let mut session = PlaybackSession::start("abc");
        session.on_position_advance(5000);

        assert!(session.should_scrobble(5));
        assert!(!session.should_scrobble(6));
    }
}
