//! Enemy-related components.
//!
//! One enemy is one entity. Variant behavior comes from which optional
//! components are present: `RangedAttacker` turns approach into standoff and
//! adds shooting, `AmbientVoice` adds audio cues, `DeathEffect` adds a
//! particle burst on death.

use bevy::prelude::*;

/// Marker component for all enemies.
#[derive(Component)]
pub struct Enemy;

/// Enemy type identifier (matches the RON file name).
#[derive(Component, Clone, Debug)]
pub struct EnemyType(pub String);

/// Behavioral state.
///
/// Fleeing is deliberately not a state: it is a one-shot reaction that
/// re-targets the navigation agent and is never read back.
#[derive(Component, Default, PartialEq, Eq, Clone, Copy, Debug)]
pub enum AiState {
    /// Target not perceived; roaming between random destinations.
    #[default]
    Wandering,
    /// Target perceived; closing in (or holding standoff range).
    Approaching,
}

/// Enemy stats loaded from RON data files.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct EnemyStats {
    /// Perception distance, also the radius of the flee broadcast on death.
    pub sight_range: f32,
    /// Perception cone, in degrees from the forward axis.
    pub sight_angle: f32,
    pub wander_speed: f32,
    pub approach_speed: f32,
    /// Maximum turn rate while approaching, in degrees per second.
    pub angular_speed: f32,
}

impl Default for EnemyStats {
    fn default() -> Self {
        Self {
            sight_range: 20.0,
            sight_angle: 45.0,
            wander_speed: 1.0,
            approach_speed: 2.0,
            angular_speed: 300.0,
        }
    }
}

/// The entity this enemy watches, resolved once at spawn.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct TrackedTarget {
    pub entity: Entity,
    /// Where the target was last seen.
    pub last_known_position: Option<Vec3>,
}

impl TrackedTarget {
    pub fn new(entity: Entity) -> Self {
        Self {
            entity,
            last_known_position: None,
        }
    }
}

/// An enemy whose initialization failed.
///
/// Inert enemies never move, perceive, play audio, or take damage.
#[derive(Component, Debug)]
pub struct Inert;
