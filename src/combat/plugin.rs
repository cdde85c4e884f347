//! Combat plugin - damage, deaths, and projectiles.

use bevy::prelude::*;
use bevy_rapier3d::prelude::CollisionEvent;

use super::projectile;
use super::systems;
use crate::core::SimSet;

/// System set ordering inside the `Resolve` stage.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum CombatSet {
    /// Turn projectile collisions into damage events.
    Hits,
    /// Apply damage and report deaths.
    Damage,
    /// React to deaths.
    Deaths,
}

/// Combat plugin - handles all damage systems.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app
            // Also registered by rapier; headless apps run without it
            .add_event::<CollisionEvent>()
            .configure_sets(
                Update,
                (CombatSet::Hits, CombatSet::Damage, CombatSet::Deaths)
                    .chain()
                    .in_set(SimSet::Resolve),
            )
            // Snapshot the registry before this tick's spawns register
            .add_systems(Update, systems::broadcast_damage_all.in_set(SimSet::Setup))
            .add_systems(
                Update,
                (projectile::resolve_projectile_hits, projectile::expire_projectiles)
                    .chain()
                    .in_set(CombatSet::Hits),
            )
            .add_systems(Update, systems::apply_damage.in_set(CombatSet::Damage))
            .add_systems(Update, systems::check_deaths.in_set(CombatSet::Deaths));
    }
}
