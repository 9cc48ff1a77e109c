use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::sampler::{flicker, pick_next, FlickerSequence, SamplerError, SamplerState};
use super::Candidate;

/// What happens to the seen set when the pool's membership changes mid-session,
/// e.g. after the user switches category filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolChangePolicy {
    /// Start a fresh deal over the new pool.
    #[default]
    ResetSeen,
    /// Keep the seen ids; candidates shown under the old pool stay excluded.
    RetainSeen,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Shuffling,
    Settled { winner_id: String },
}

impl SessionPhase {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Shuffling => "shuffling",
            Self::Settled { .. } => "settled",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Sampler(#[from] SamplerError),
    #[error("cannot {action} while the session is {from}")]
    InvalidTransition {
        from: &'static str,
        action: &'static str,
    },
}

/// One open recommendation dialog: `Idle -> Shuffling -> Settled`, with
/// `Settled -> Shuffling` on re-roll and `close` returning to `Idle`.
#[derive(Debug, Clone)]
pub struct RecommendationSession {
    state: SamplerState,
    phase: SessionPhase,
    pool_ids: Option<BTreeSet<String>>,
    policy: PoolChangePolicy,
}

impl Default for RecommendationSession {
    fn default() -> Self {
        Self::new(PoolChangePolicy::default())
    }
}

impl RecommendationSession {
    pub fn new(policy: PoolChangePolicy) -> Self {
        Self {
            state: SamplerState::new(),
            phase: SessionPhase::Idle,
            pool_ids: None,
            policy,
        }
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    pub fn state(&self) -> &SamplerState {
        &self.state
    }

    pub fn policy(&self) -> PoolChangePolicy {
        self.policy
    }

    /// Starts shuffling over `pool`.
    pub fn begin<C: Candidate>(&mut self, pool: &[C]) -> Result<(), SessionError> {
        if matches!(self.phase, SessionPhase::Shuffling) {
            return Err(self.invalid("begin shuffling"));
        }
        if pool.is_empty() {
            return Err(SamplerError::EmptyPool.into());
        }

        self.track_pool(pool);
        self.phase = SessionPhase::Shuffling;
        Ok(())
    }

    /// Cosmetic picks for the reveal animation; leaves the session untouched.
    pub fn flicker<'p, 'r, C, R>(
        &self,
        pool: &'p [C],
        count: usize,
        rng: &'r mut R,
    ) -> Result<FlickerSequence<'p, 'r, C, R>, SessionError>
    where
        R: Rng + ?Sized,
    {
        if !matches!(self.phase, SessionPhase::Shuffling) {
            return Err(self.invalid("flicker"));
        }
        Ok(flicker(pool, count, rng)?)
    }

    /// Fixes the winner and records it as seen.
    pub fn settle<'p, C, R>(&mut self, pool: &'p [C], rng: &mut R) -> Result<&'p C, SessionError>
    where
        C: Candidate,
        R: Rng + ?Sized,
    {
        if !matches!(self.phase, SessionPhase::Shuffling) {
            return Err(self.invalid("settle"));
        }

        self.track_pool(pool);
        let (winner, next) = pick_next(pool, &self.state, rng)?;
        self.state = next;
        self.phase = SessionPhase::Settled {
            winner_id: winner.candidate_id().to_string(),
        };
        Ok(winner)
    }

    /// Picks again straight away, without a mandatory flicker.
    pub fn reroll<'p, C, R>(&mut self, pool: &'p [C], rng: &mut R) -> Result<&'p C, SessionError>
    where
        C: Candidate,
        R: Rng + ?Sized,
    {
        if !matches!(self.phase, SessionPhase::Settled { .. }) {
            return Err(self.invalid("re-roll"));
        }
        self.begin(pool)?;
        self.settle(pool, rng)
    }

    /// Tears the session down; the next session starts a fresh deal.
    pub fn close(&mut self) {
        self.state.clear();
        self.pool_ids = None;
        self.phase = SessionPhase::Idle;
    }

    fn track_pool<C: Candidate>(&mut self, pool: &[C]) {
        let ids: BTreeSet<String> = pool
            .iter()
            .map(|candidate| candidate.candidate_id().to_string())
            .collect();

        let changed = self.pool_ids.as_ref().is_some_and(|previous| *previous != ids);
        if changed && self.policy == PoolChangePolicy::ResetSeen {
            self.state.clear();
        }
        self.pool_ids = Some(ids);
    }

    fn invalid(&self, action: &'static str) -> SessionError {
        SessionError::InvalidTransition {
            from: self.phase.label(),
            action,
        }
    }
}
