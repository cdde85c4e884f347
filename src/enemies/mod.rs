//! Enemies module - enemy entities, AI, and spawning.

mod ai;
pub mod audio;
mod components;
pub mod data;
mod death;
pub mod navigation;
pub mod perception;
mod playback;
mod plugin;
mod ranged;
mod registry;
mod spawning;

pub use ai::turn_towards;
pub use audio::{AmbientVoice, AudioCueThrottle, CueKind, CueRequest, CueStatus};
pub use components::*;
pub use data::{EnemyDefinition, EnemyDefinitions};
pub use death::{DeathEffect, EffectLifetime};
pub use navigation::{FlatNavSurface, NavAgent, NavSurface, NavigationGoal, NavigationSurface};
pub use perception::sees;
pub use playback::EnemyAudioPlugin;
pub use plugin::EnemyPlugin;
pub use ranged::{standoff_point, RangedAttacker};
pub use registry::{EnemyFleet, EnemyRegistry};
pub use spawning::spawn_enemy;
