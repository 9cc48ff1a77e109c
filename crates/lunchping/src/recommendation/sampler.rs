use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::Candidate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SamplerError {
    #[error("there is nothing to recommend: the candidate pool is empty")]
    EmptyPool,
}

/// Ids already picked in the current deal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SamplerState {
    seen_ids: BTreeSet<String>,
}

impl SamplerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seen<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            seen_ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.seen_ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.seen_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen_ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.seen_ids.clear();
    }

    pub fn seen_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.seen_ids.iter().map(String::as_str)
    }
}

/// Draws the binding winner from the candidates not yet seen.
///
/// When every candidate has been seen the deal restarts from the full pool
/// with an empty seen set. The returned state is the input state plus the
/// winner; the input is never mutated.
pub fn pick_next<'p, C, R>(
    pool: &'p [C],
    state: &SamplerState,
    rng: &mut R,
) -> Result<(&'p C, SamplerState), SamplerError>
where
    C: Candidate,
    R: Rng + ?Sized,
{
    if pool.is_empty() {
        return Err(SamplerError::EmptyPool);
    }

    let mut seen_ids = state.seen_ids.clone();
    let mut unseen: Vec<&'p C> = pool
        .iter()
        .filter(|candidate| !seen_ids.contains(candidate.candidate_id()))
        .collect();

    if unseen.is_empty() {
        seen_ids.clear();
        unseen = pool.iter().collect();
    }

    let winner = *unseen.choose(rng).ok_or(SamplerError::EmptyPool)?;
    seen_ids.insert(winner.candidate_id().to_string());

    Ok((winner, SamplerState { seen_ids }))
}

/// Cosmetic picks shown while the reveal animation runs.
///
/// Each item is drawn uniformly from the whole pool, ignoring the seen set.
/// Dropping the sequence part-way has no effect on any sampler state.
pub fn flicker<'p, 'r, C, R>(
    pool: &'p [C],
    count: usize,
    rng: &'r mut R,
) -> Result<FlickerSequence<'p, 'r, C, R>, SamplerError>
where
    R: Rng + ?Sized,
{
    if pool.is_empty() {
        return Err(SamplerError::EmptyPool);
    }

    Ok(FlickerSequence {
        pool,
        remaining: count,
        rng,
    })
}

pub struct FlickerSequence<'p, 'r, C, R: ?Sized> {
    pool: &'p [C],
    remaining: usize,
    rng: &'r mut R,
}

impl<'p, 'r, C, R> Iterator for FlickerSequence<'p, 'r, C, R>
where
    R: Rng + ?Sized,
{
    type Item = &'p C;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.pool.choose(&mut *self.rng)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'p, 'r, C, R> ExactSizeIterator for FlickerSequence<'p, 'r, C, R> where R: Rng + ?Sized {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommendation::PoolEntry;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pool(ids: &[&str]) -> Vec<PoolEntry> {
        ids.iter().map(|id| PoolEntry::new(*id)).collect()
    }

    #[test]
    fn picks_only_unseen_candidates() {
        let candidates = pool(&["a", "b", "c"]);
        let state = SamplerState::from_seen(["a", "c"]);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..20 {
            let (winner, next) = pick_next(&candidates, &state, &mut rng).expect("pool not empty");
            assert_eq!(winner.id, "b");
            assert_eq!(next.len(), 3);
        }
        assert_eq!(state.len(), 2, "input state is untouched");
    }

    #[test]
    fn exhaustion_wraps_around() {
        let candidates = pool(&["a", "b"]);
        let state = SamplerState::from_seen(["a", "b"]);
        let mut rng = StdRng::seed_from_u64(11);

        let (winner, next) = pick_next(&candidates, &state, &mut rng).expect("pool not empty");
        assert_eq!(next.len(), 1);
        assert!(next.contains(&winner.id));
    }

    #[test]
    fn stale_ids_do_not_block_new_pool() {
        let candidates = pool(&["x"]);
        let state = SamplerState::from_seen(["a", "b"]);
        let mut rng = StdRng::seed_from_u64(3);

        let (winner, next) = pick_next(&candidates, &state, &mut rng).expect("pool not empty");
        assert_eq!(winner.id, "x");
        assert!(next.contains("a") && next.contains("x"));
    }

    #[test]
    fn empty_pool_is_an_error() {
        let candidates: Vec<PoolEntry> = Vec::new();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            pick_next(&candidates, &SamplerState::new(), &mut rng).err(),
            Some(SamplerError::EmptyPool)
        );
        assert!(flicker(&candidates, 5, &mut rng).is_err());
    }

    #[test]
    fn flicker_yields_exactly_k_members_of_the_pool() {
        let candidates = pool(&["a", "b", "c"]);
        let mut rng = StdRng::seed_from_u64(5);
        let sequence = flicker(&candidates, 20, &mut rng).expect("pool not empty");
        assert_eq!(sequence.len(), 20);

        let picks: Vec<_> = sequence.collect();
        assert_eq!(picks.len(), 20);
        assert!(picks.iter().all(|pick| candidates.contains(pick)));
    }

    #[test]
    fn zero_length_flicker_is_empty() {
        let candidates = pool(&["a"]);
        let mut rng = StdRng::seed_from_u64(5);
        assert_eq!(flicker(&candidates, 0, &mut rng).expect("pool not empty").count(), 0);
    }
}
