//! Enemy plugin - registers all enemy systems.

use bevy::prelude::*;

use super::ai;
use super::audio::{schedule_ambient_cues, AudioCueThrottle, CueRequest};
use super::data::{load_enemy_definitions, EnemyDefinitions};
use super::death::{expire_effects, handle_enemy_death};
use super::navigation::{drive_nav_agents, NavSurface};
use super::ranged::{fire_at_target, hold_standoff};
use super::registry::{prune_despawned_enemies, tally_fleet, EnemyFleet, EnemyRegistry};
use crate::combat::{broadcast_damage_all, CombatSet};
use crate::core::{GameState, SimSet};

/// Enemy plugin - handles enemy AI, ranged attacks, death, and audio cues.
///
/// Playback of granted cues lives in [`EnemyAudioPlugin`](super::EnemyAudioPlugin)
/// so the simulation can run without an audio backend.
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EnemyDefinitions>()
            .init_resource::<EnemyRegistry>()
            .init_resource::<EnemyFleet>()
            .init_resource::<AudioCueThrottle>()
            .init_resource::<NavSurface>()
            .add_event::<CueRequest>()
            .add_systems(OnEnter(GameState::Loading), load_enemy_definitions)
            .add_systems(
                Update,
                (prune_despawned_enemies, ai::initialize_enemies)
                    .chain()
                    .after(broadcast_damage_all)
                    .in_set(SimSet::Setup),
            )
            .add_systems(Update, ai::perceive_target.in_set(SimSet::Sense))
            .add_systems(
                Update,
                (
                    ai::approach_target,
                    ai::wander,
                    hold_standoff,
                    fire_at_target,
                    schedule_ambient_cues,
                )
                    .chain()
                    .in_set(SimSet::Act),
            )
            // Death sequence first, then the flee reactions it queued
            .add_systems(
                Update,
                (handle_enemy_death, ai::react_to_flee, tally_fleet)
                    .chain()
                    .in_set(CombatSet::Deaths),
            )
            .add_systems(
                Update,
                (drive_nav_agents, expire_effects).in_set(SimSet::Backend),
            );
    }
}
