//! Repeat-avoiding random selection of a memory

use rand::seq::IndexedRandom;
use rand::Rng;
use uuid::Uuid;

use crate::memory::Memory;

/// Pick a random memory from `candidates`, avoiding the memory whose id
/// equals `exclude` whenever there is an alternative.
///
/// Returns `None` only when `candidates` is empty. A single-element list
/// short-circuits to that element even if it is the excluded one; with no
/// other candidate there is nothing to avoid with. If filtering leaves
/// nothing (a defined fallback that cannot trigger once the list has two or
/// more distinct ids), the pick falls back to the full list.
pub fn pick<'a, R: Rng + ?Sized>(
    candidates: &'a [Memory],
    exclude: Option<Uuid>,
    rng: &mut R,
) -> Option<&'a Memory> {
    if candidates.is_empty() {
        return None;
    }
    if candidates.len() == 1 {
        return candidates.first();
    }

    let filtered: Vec<&Memory> = candidates
        .iter()
        .filter(|memory| Some(memory.id) != exclude)
        .collect();

    if filtered.is_empty() {
        candidates.choose(rng)
    } else {
        filtered.choose(rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn memories(n: usize) -> Vec<Memory> {
        (0..n).map(|i| Memory::new(format!("memory {}", i))).collect()
    }

    #[test]
    fn empty_candidates_yield_none() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(pick(&[], None, &mut rng).is_none());
        assert!(pick(&[], Some(Uuid::new_v4()), &mut rng).is_none());
    }

    #[test]
    fn single_candidate_is_returned_even_when_excluded() {
        let mut rng = StdRng::seed_from_u64(2);
        let candidates = memories(1);

        let picked = pick(&candidates, Some(candidates[0].id), &mut rng).unwrap();
        assert_eq!(picked.id, candidates[0].id);
    }

    #[test]
    fn excluded_memory_is_never_picked() {
        let mut rng = StdRng::seed_from_u64(3);
        let candidates = memories(3);
        let excluded = candidates[1].id;

        for _ in 0..200 {
            let picked = pick(&candidates, Some(excluded), &mut rng).unwrap();
            assert_ne!(picked.id, excluded);
        }
    }

    #[test]
    fn without_exclusion_every_candidate_is_reachable() {
        let mut rng = StdRng::seed_from_u64(4);
        let candidates = memories(4);

        let mut seen = HashSet::new();
        for _ in 0..200 {
            seen.insert(pick(&candidates, None, &mut rng).unwrap().id);
        }
        assert_eq!(seen.len(), candidates.len());
    }

    #[test]
    fn unknown_exclusion_id_falls_through_to_full_list() {
        let mut rng = StdRng::seed_from_u64(5);
        let candidates = memories(2);

        let mut seen = HashSet::new();
        for _ in 0..100 {
            seen.insert(pick(&candidates, Some(Uuid::new_v4()), &mut rng).unwrap().id);
        }
        assert_eq!(seen.len(), 2);
    }
}
