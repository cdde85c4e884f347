//! Global events used for cross-system communication.
//!
//! Events keep the simulation stages decoupled: projectiles and the debug
//! broadcast send `DamageEvent`s, the damage system applies them and reports
//! `DeathEvent`s, and the enemy death sequence turns those into `FleeEvent`s
//! for nearby enemies.

use bevy::prelude::*;

/// Sent when an entity should take damage.
///
/// This is the only way health is ever reduced.
#[derive(Event, Debug, Clone, Copy)]
pub struct DamageEvent {
    /// Entity receiving damage
    pub target: Entity,
    /// Entity that caused the damage, if any
    pub source: Option<Entity>,
    /// Amount of health to remove
    pub amount: i32,
}

/// Sent exactly once when an entity's health first drops to zero or below.
#[derive(Event, Debug, Clone, Copy)]
pub struct DeathEvent {
    /// Entity that died
    pub entity: Entity,
    /// Entity that killed them (if any)
    pub killed_by: Option<Entity>,
}

/// Asks an enemy to run its one-shot flee reaction.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FleeEvent {
    /// Enemy that should flee
    pub entity: Entity,
    /// Enemy whose death caused the reaction
    pub cause: Entity,
}

/// Debug command: every registered enemy loses one point of health.
///
/// Input handling sends this; the combat systems never read raw input.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct DamageAllCommand;

/// Live-count notifications for whoever manages the enemy population.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FleetEvent {
    Spawned(Entity),
    Despawned(Entity),
}
