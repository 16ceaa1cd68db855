//! Playback queue
//!
//! Flat ordered track list with a parallel "original" (unshuffled) order
//! and a current index. All mutations keep two invariants:
//! - `current_index < tracks.len()` whenever the queue is non-empty
//! - `original` holds the same track identities as `tracks`

use crate::shuffle::shuffle_with_pinned;
use encore_core::Track;

/// Ordered playback queue
#[derive(Debug, Clone, Default)]
pub struct Queue {
    /// Tracks in playback order
    tracks: Vec<Track>,

    /// Pre-shuffle canonical order (for restoring when shuffle turns off)
    original: Vec<Track>,

    /// Current position in `tracks`
    current_index: usize,
}

impl Queue {
    /// Create new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the queue contents
    ///
    /// Empty input is a no-op. With `shuffle`, the track at `start_index`
    /// is pinned first and the rest randomized; otherwise playback order is
    /// the input order and `current_index = start_index`. `original` always
    /// keeps the unshuffled input.
    pub fn set_tracks(&mut self, tracks: Vec<Track>, start_index: usize, shuffle: bool) {
        if tracks.is_empty() {
            return;
        }

        let start_index = start_index.min(tracks.len() - 1);
        self.original = tracks.clone();

        if shuffle {
            self.tracks = shuffle_with_pinned(&tracks, start_index);
            self.current_index = 0;
        } else {
            self.tracks = tracks;
            self.current_index = start_index;
        }
    }

    /// Restore a previously persisted queue without reordering
    ///
    /// `current_index` is clamped into bounds; a stale snapshot must never
    /// leave the index dangling.
    pub fn restore(&mut self, tracks: Vec<Track>, original: Vec<Track>, current_index: usize) {
        if tracks.is_empty() {
            self.clear();
            return;
        }

        self.current_index = current_index.min(tracks.len() - 1);
        self.original = if original.is_empty() {
            tracks.clone()
        } else {
            original
        };
        self.tracks = tracks;
    }

    /// Append a track to the end of the queue
    pub fn add(&mut self, track: Track) {
        self.tracks.push(track.clone());
        self.original.push(track);
    }

    /// Insert a track immediately after the current one
    pub fn insert_next(&mut self, track: Track) {
        if self.tracks.is_empty() {
            self.add(track);
            return;
        }

        let insert_at = self.current_index + 1;
        self.tracks.insert(insert_at, track.clone());

        // Mirror the placement in the unshuffled order too
        let original_at = self
            .current_track()
            .and_then(|current| {
                self.original
                    .iter()
                    .position(|t| t.track_hash == current.track_hash)
            })
            .map_or(self.original.len(), |pos| pos + 1);
        self.original.insert(original_at, track);
    }

    /// Remove the track at `index`
    ///
    /// No-op when `index` is out of range or points at the current track:
    /// removing "current" must go through track-advance operations, never
    /// through queue editing.
    pub fn remove(&mut self, index: usize) {
        if index >= self.tracks.len() || index == self.current_index {
            return;
        }

        let removed = self.tracks.remove(index);
        if let Some(pos) = self
            .original
            .iter()
            .position(|t| t.track_hash == removed.track_hash)
        {
            self.original.remove(pos);
        }

        if index < self.current_index {
            self.current_index -= 1;
        }
    }

    /// Relocate one track from `from` to `to`
    ///
    /// The current track keeps playing wherever it lands: if it is the one
    /// moved, `current_index` follows it; if the move crosses it, the index
    /// shifts by one. Out-of-range or `from == to` is a no-op.
    pub fn move_item(&mut self, from: usize, to: usize) {
        let len = self.tracks.len();
        if from >= len || to >= len || from == to {
            return;
        }

        let track = self.tracks.remove(from);
        self.tracks.insert(to, track);

        if from == self.current_index {
            self.current_index = to;
        } else if from < self.current_index && to >= self.current_index {
            self.current_index -= 1;
        } else if from > self.current_index && to <= self.current_index {
            self.current_index += 1;
        }
    }

    /// Turn shuffle on: randomize the non-current tracks, current pinned first
    pub fn enable_shuffle(&mut self) {
        if self.tracks.is_empty() {
            return;
        }

        self.tracks = shuffle_with_pinned(&self.tracks, self.current_index);
        self.current_index = 0;
    }

    /// Turn shuffle off: rebuild from the original order
    ///
    /// The current track is re-pointed by identity, so nothing visibly
    /// jumps; with no current track the index resets to 0.
    pub fn disable_shuffle(&mut self) {
        if self.tracks.is_empty() {
            return;
        }

        let current_hash = self
            .current_track()
            .map(|t| t.track_hash.clone());

        self.tracks = self.original.clone();
        self.current_index = current_hash
            .and_then(|hash| self.tracks.iter().position(|t| t.track_hash == hash))
            .unwrap_or(0);
    }

    /// Point the queue at `index`
    ///
    /// Out-of-range is a no-op. Returns true when the index changed target.
    pub fn set_current_index(&mut self, index: usize) -> bool {
        if index >= self.tracks.len() {
            return false;
        }
        self.current_index = index;
        true
    }

    /// Clear the queue entirely
    pub fn clear(&mut self) {
        self.tracks.clear();
        self.original.clear();
        self.current_index = 0;
    }

    /// Track at the current index
    pub fn current_track(&self) -> Option<&Track> {
        self.tracks.get(self.current_index)
    }

    /// Track at `index`
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Current position
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// All tracks in playback order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Unshuffled canonical order
    pub fn original(&self) -> &[Track] {
        &self.original
    }

    /// Number of tracks in the queue
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if queue is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn create_test_track(hash: &str) -> Track {
        Track {
            track_hash: hash.to_string(),
            title: format!("Track {hash}"),
            artists: vec!["Test Artist".to_string()],
            album: Some("Test Album".to_string()),
            duration_secs: 180,
            image: format!("{hash}.webp"),
            filepath: format!("/music/{hash}.flac"),
            is_favorite: false,
        }
    }

    fn tracks(n: usize) -> Vec<Track> {
        (0..n).map(|i| create_test_track(&i.to_string())).collect()
    }

    fn hashes(queue: &Queue) -> Vec<&str> {
        queue.tracks().iter().map(|t| t.track_hash.as_str()).collect()
    }

    #[test]
    fn empty_set_is_noop() {
        let mut queue = Queue::new();
        queue.set_tracks(Vec::new(), 0, false);

        assert!(queue.is_empty());
        assert_eq!(queue.current_index(), 0);
        assert!(queue.current_track().is_none());
    }

    #[test]
    fn set_tracks_unshuffled() {
        let mut queue = Queue::new();
        queue.set_tracks(tracks(3), 1, false);

        assert_eq!(hashes(&queue), vec!["0", "1", "2"]);
        assert_eq!(queue.current_index(), 1);
        assert_eq!(queue.current_track().unwrap().track_hash, "1");
    }

    #[test]
    fn set_tracks_shuffled_pins_start() {
        let mut queue = Queue::new();
        queue.set_tracks(tracks(4), 2, true);

        assert_eq!(queue.current_index(), 0);
        assert_eq!(queue.current_track().unwrap().track_hash, "2");
        assert_eq!(queue.len(), 4);

        // Original keeps input order
        let original: Vec<&str> = queue.original().iter().map(|t| t.track_hash.as_str()).collect();
        assert_eq!(original, vec!["0", "1", "2", "3"]);
    }

    #[test]
    fn add_appends_to_both_lists() {
        let mut queue = Queue::new();
        queue.set_tracks(tracks(2), 0, false);
        queue.add(create_test_track("9"));

        assert_eq!(hashes(&queue), vec!["0", "1", "9"]);
        assert_eq!(queue.original().last().unwrap().track_hash, "9");
    }

    #[test]
    fn insert_next_lands_after_current() {
        let mut queue = Queue::new();
        queue.set_tracks(tracks(3), 1, false);
        queue.insert_next(create_test_track("9"));

        assert_eq!(hashes(&queue), vec!["0", "1", "9", "2"]);
        assert_eq!(queue.current_index(), 1);
    }

    #[test]
    fn insert_next_into_empty_queue() {
        let mut queue = Queue::new();
        queue.insert_next(create_test_track("9"));

        assert_eq!(hashes(&queue), vec!["9"]);
        assert_eq!(queue.current_index(), 0);
    }

    #[test]
    fn remove_current_is_noop() {
        let mut queue = Queue::new();
        queue.set_tracks(tracks(3), 1, false);
        queue.remove(1);

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.current_track().unwrap().track_hash, "1");
    }

    #[test]
    fn remove_before_current_shifts_index() {
        let mut queue = Queue::new();
        queue.set_tracks(tracks(3), 2, false);
        queue.remove(0);

        assert_eq!(queue.current_index(), 1);
        assert_eq!(queue.current_track().unwrap().track_hash, "2");
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn remove_after_current_keeps_index() {
        let mut queue = Queue::new();
        queue.set_tracks(tracks(3), 0, false);
        queue.remove(2);

        assert_eq!(queue.current_index(), 0);
        assert_eq!(hashes(&queue), vec!["0", "1"]);
    }

    #[test]
    fn remove_out_of_range_is_noop() {
        let mut queue = Queue::new();
        queue.set_tracks(tracks(3), 0, false);
        queue.remove(10);

        assert_eq!(queue.len(), 3);
    }

    #[test]
    fn remove_filters_original_too() {
        let mut queue = Queue::new();
        queue.set_tracks(tracks(4), 0, false);
        queue.remove(2);

        let queue_set: HashSet<&str> = queue.tracks().iter().map(|t| t.track_hash.as_str()).collect();
        let original_set: HashSet<&str> =
            queue.original().iter().map(|t| t.track_hash.as_str()).collect();
        assert_eq!(queue_set, original_set);
    }

    #[test]
    fn move_current_track_follows() {
        let mut queue = Queue::new();
        queue.set_tracks(tracks(4), 1, false);
        queue.move_item(1, 3);

        assert_eq!(queue.current_index(), 3);
        assert_eq!(queue.current_track().unwrap().track_hash, "1");
        assert_eq!(hashes(&queue), vec!["0", "2", "3", "1"]);
    }

    #[test]
    fn move_crossing_current_shifts_index() {
        let mut queue = Queue::new();
        queue.set_tracks(tracks(4), 2, false);

        // Move a track from before current to after it
        queue.move_item(0, 3);
        assert_eq!(queue.current_index(), 1);
        assert_eq!(queue.current_track().unwrap().track_hash, "2");

        // And back across the other way
        queue.move_item(3, 0);
        assert_eq!(queue.current_index(), 2);
        assert_eq!(queue.current_track().unwrap().track_hash, "2");
    }

    #[test]
    fn move_same_slot_is_noop() {
        let mut queue = Queue::new();
        queue.set_tracks(tracks(3), 1, false);
        queue.move_item(2, 2);

        assert_eq!(hashes(&queue), vec!["0", "1", "2"]);
        assert_eq!(queue.current_index(), 1);
    }

    #[test]
    fn move_out_of_range_is_noop() {
        let mut queue = Queue::new();
        queue.set_tracks(tracks(3), 1, false);
        queue.move_item(0, 7);
        queue.move_item(7, 0);

        assert_eq!(hashes(&queue), vec!["0", "1", "2"]);
    }

    #[test]
    fn shuffle_round_trip_restores_order() {
        let mut queue = Queue::new();
        queue.set_tracks(tracks(8), 5, false);
        let current = queue.current_track().unwrap().track_hash.clone();

        queue.enable_shuffle();
        assert_eq!(queue.current_index(), 0);
        assert_eq!(queue.current_track().unwrap().track_hash, current);

        queue.disable_shuffle();
        assert_eq!(hashes(&queue), vec!["0", "1", "2", "3", "4", "5", "6", "7"]);
        assert_eq!(queue.current_track().unwrap().track_hash, current);
        assert_eq!(queue.current_index(), 5);
    }

    #[test]
    fn disable_shuffle_on_empty_queue() {
        let mut queue = Queue::new();
        queue.disable_shuffle();
        assert!(queue.is_empty());
    }

    #[test]
    fn restore_clamps_stale_index() {
        let mut queue = Queue::new();
        let saved = tracks(3);
        queue.restore(saved.clone(), saved, 9);

        assert_eq!(queue.current_index(), 2);
    }

    #[test]
    fn clear_resets_everything() {
        let mut queue = Queue::new();
        queue.set_tracks(tracks(3), 2, false);
        queue.clear();

        assert!(queue.is_empty());
        assert_eq!(queue.current_index(), 0);
        assert!(queue.original().is_empty());
    }
}
