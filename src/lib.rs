//! Slime Swarm - an enemy AI behavior engine for Bevy.
//!
//! Enemies perceive a single tracked target through a sight cone, wander
//! over a navigation surface until they see it, then close in (or hold a
//! standoff distance and shoot). A death sends every nearby enemy fleeing.
//! Ambient and flee audio cues share one concurrency limit.
//!
//! # Architecture
//!
//! The crate is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, global events, tick ordering, shared randomness
//! - **Combat**: Health, damage, deaths, projectiles
//! - **Enemies**: Perception, navigation, behavior, registry, audio cues
//! - **Player**: The tracked target, first-person movement and camera
//! - **World**: The demo arena and data loading

pub mod combat;
pub mod core;
pub mod enemies;
pub mod player;
pub mod world;

use bevy::prelude::*;

/// Main plugin that adds all sub-plugins.
///
/// Expects `DefaultPlugins`, rapier's physics plugin and kira's `AudioPlugin`.
pub struct SlimeSwarmPlugin;

impl Plugin for SlimeSwarmPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Player systems
            .add_plugins(player::PlayerPlugin)

            // Combat systems
            .add_plugins(combat::CombatPlugin)

            // Enemy systems
            .add_plugins((enemies::EnemyPlugin, enemies::EnemyAudioPlugin))

            // World systems
            .add_plugins(world::WorldPlugin);
    }
}
