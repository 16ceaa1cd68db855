//! Queue shuffle generator
//!
//! Fisher-Yates permutation with support for pinning a chosen start track
//! to position 0, so toggling shuffle never changes what is playing.

use encore_core::Track;
use rand::seq::SliceRandom;
use rand::thread_rng;

/// Produce a uniform random permutation of `tracks` with the track at
/// `pin_index` relocated to position 0
///
/// The input is not mutated. An empty input yields an empty output. An
/// out-of-range `pin_index` degrades to a plain full shuffle; callers
/// always pass a valid index, but the generator stays total.
pub fn shuffle_with_pinned(tracks: &[Track], pin_index: usize) -> Vec<Track> {
    if tracks.is_empty() {
        return Vec::new();
    }

    let mut rng = thread_rng();

    if pin_index >= tracks.len() {
        let mut shuffled = tracks.to_vec();
        shuffled.shuffle(&mut rng);
        return shuffled;
    }

    let mut result = Vec::with_capacity(tracks.len());
    result.push(tracks[pin_index].clone());

    let mut rest: Vec<Track> = tracks
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != pin_index)
        .map(|(_, t)| t.clone())
        .collect();
    rest.shuffle(&mut rng);

    result.extend(rest);
    result
}
