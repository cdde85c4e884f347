//! Live enemy registry and fleet bookkeeping.

use bevy::prelude::*;

use crate::core::FleetEvent;

use super::components::Enemy;

/// Every live, initialized enemy.
///
/// Entries are plain `Entity` ids; the registry never owns enemies. An enemy
/// is registered once when it finishes initializing and removed once when it
/// dies or is despawned. Anything that iterates the registry while enemies
/// may die takes a [`snapshot`](Self::snapshot) first.
#[derive(Resource, Default, Debug)]
pub struct EnemyRegistry {
    members: Vec<Entity>,
}

impl EnemyRegistry {
    /// Add an enemy. Returns false if it was already registered.
    pub fn register(&mut self, entity: Entity) -> bool {
        if self.contains(entity) {
            return false;
        }
        self.members.push(entity);
        true
    }

    /// Remove an enemy. Returns false if it was not registered.
    pub fn remove(&mut self, entity: Entity) -> bool {
        let Some(index) = self.members.iter().position(|&member| member == entity) else {
            return false;
        };
        self.members.remove(index);
        true
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.members.contains(&entity)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.members.iter().copied()
    }

    /// Copy of the current membership, in registration order.
    pub fn snapshot(&self) -> Vec<Entity> {
        self.members.clone()
    }
}

/// Population counter fed by `FleetEvent`s.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyFleet {
    pub live: usize,
    pub spawned_total: usize,
    pub despawned_total: usize,
}

/// Keep `EnemyFleet` in step with spawn and despawn notifications.
pub fn tally_fleet(mut fleet_events: EventReader<FleetEvent>, mut fleet: ResMut<EnemyFleet>) {
    for event in fleet_events.read() {
        match event {
            FleetEvent::Spawned(_) => {
                fleet.live += 1;
                fleet.spawned_total += 1;
            }
            FleetEvent::Despawned(_) => {
                fleet.live = fleet.live.saturating_sub(1);
                fleet.despawned_total += 1;
            }
        }
    }
}

/// Drop registry entries for enemies despawned outside the death sequence
/// (level cleanup, scripted removal).
pub fn prune_despawned_enemies(
    mut removed: RemovedComponents<Enemy>,
    mut registry: ResMut<EnemyRegistry>,
    mut fleet_events: EventWriter<FleetEvent>,
) {
    for entity in removed.read() {
        if registry.remove(entity) {
            debug!("Pruned despawned enemy {:?} from registry", entity);
            fleet_events.send(FleetEvent::Despawned(entity));
        }
    }
}
