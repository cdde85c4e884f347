//! Shared random source for AI decisions.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Random number generator used by every AI decision (wander offsets, audio
/// rolls, clip choice).
///
/// Owning it as a resource keeps runs reproducible when seeded.
#[derive(Resource)]
pub struct AiRng(pub StdRng);

impl AiRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl Default for AiRng {
    fn default() -> Self {
        Self(StdRng::from_entropy())
    }
}
