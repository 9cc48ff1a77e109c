//! Random lunch picks that do not repeat a restaurant until every candidate
//! in the pool has been shown once.
//!
//! All state is explicit: callers own a [`SamplerState`] (or a
//! [`RecommendationSession`] wrapping one) and pass it into every pick, and
//! randomness is injected as any [`rand::Rng`] so picks are reproducible with
//! a seeded generator.

mod candidate;
mod sampler;
mod session;

pub use candidate::{Candidate, PoolEntry};
pub use sampler::{flicker, pick_next, FlickerSequence, SamplerError, SamplerState};
pub use session::{PoolChangePolicy, RecommendationSession, SessionError, SessionPhase};
