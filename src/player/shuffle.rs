//! Queue randomization.
//!
//! Uses `SliceRandom::shuffle` (Fisher-Yates), so every permutation of the
//! input is equally likely. A comparator-based random sort would not be: its
//! bias depends on the sort's tie handling and it can even duplicate or drop
//! elements under an unstable comparator. Each call draws fresh randomness;
//! reproducing the identity order occasionally is expected and fine.

use rand::seq::SliceRandom;
use rand::thread_rng;

use crate::catalog::Track;

/// Return a uniformly random permutation of `tracks`.
pub(crate) fn shuffled(tracks: &[Track]) -> Vec<Track> {
    let mut order = tracks.to_vec();
    order.shuffle(&mut thread_rng());
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{MediaRef, Track, TrackId};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn track(id: u64) -> Track {
        Track {
            id: TrackId(id),
            title: format!("t{id}"),
            artist: None,
            mood: None,
            duration: None,
            media: MediaRef::new(PathBuf::new()),
            display: format!("t{id}"),
        }
    }

    #[test]
    fn empty_and_single_inputs_pass_through() {
        assert!(shuffled(&[]).is_empty());
        let one = shuffled(&[track(7)]);
        assert_eq!(one.len(), 1);
        assert_eq!(one[0].id, TrackId(7));
    }

    #[test]
    fn shuffle_preserves_membership() {
        let input: Vec<Track> = (0..10).map(track).collect();
        let out = shuffled(&input);
        let mut ids: Vec<TrackId> = out.iter().map(|t| t.id).collect();
        ids.sort();
        let expected: Vec<TrackId> = (0..10).map(TrackId).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn shuffle_is_uniform_over_three_element_permutations() {
        // All 6 permutations of a 3-track queue should appear with frequency
        // close to 1/6. Expected count per permutation is 1000; the bound of
        // ±250 is over 8 standard deviations out, so a correct shuffle
        // essentially never trips it while a biased one reliably does.
        let input: Vec<Track> = (0..3).map(track).collect();
        let runs = 6000;
        let mut counts: HashMap<Vec<u64>, u32> = HashMap::new();
        for _ in 0..runs {
            let perm: Vec<u64> = shuffled(&input).iter().map(|t| t.id.0).collect();
            *counts.entry(perm).or_insert(0) += 1;
        }

        assert_eq!(counts.len(), 6, "every permutation should occur");
        for (perm, n) in counts {
            assert!(
                (750..=1250).contains(&n),
                "permutation {perm:?} occurred {n} times out of {runs}"
            );
        }
    }
}
