//! Combat systems - damage application, broadcasts, and deaths.

use bevy::prelude::*;

use super::components::*;
use crate::core::{DamageAllCommand, GameState};
use crate::enemies::{Enemy, EnemyRegistry, Inert};
use crate::player::Player;

/// Expand a `DamageAllCommand` into one unit of damage per registered enemy.
///
/// The registry is copied before any damage is queued, so enemies that die
/// and deregister during this pass are still hit exactly once and enemies
/// spawned later are not hit at all.
pub fn broadcast_damage_all(
    mut commands: EventReader<DamageAllCommand>,
    registry: Res<EnemyRegistry>,
    mut damage_events: EventWriter<DamageEvent>,
) {
    if commands.is_empty() {
        return;
    }
    // Any number of commands in one tick is a single activation.
    commands.clear();

    let snapshot = registry.snapshot();
    debug!("Damage-all broadcast over {} enemies", snapshot.len());

    damage_events.send_batch(snapshot.into_iter().map(|target| DamageEvent {
        target,
        source: None,
        amount: 1,
    }));
}

/// Apply damage to entities.
///
/// Health changes immediately inside the loop, so a second event for an
/// entity killed earlier in the same pass is rejected by `Health` itself.
pub fn apply_damage(
    mut commands: Commands,
    mut damage_events: EventReader<DamageEvent>,
    mut health_query: Query<&mut Health, Without<Inert>>,
    mut death_events: EventWriter<DeathEvent>,
) {
    for event in damage_events.read() {
        let Ok(mut health) = health_query.get_mut(event.target) else {
            continue;
        };

        match health.take_damage(event.amount) {
            DamageOutcome::Rejected => {
                debug!("Ignoring damage to dead entity {:?}", event.target);
            }
            DamageOutcome::Wounded { remaining } => {
                debug!(
                    "{:?} took {} damage, health now {}",
                    event.target, event.amount, remaining
                );
            }
            DamageOutcome::Killed => {
                debug!("{:?} was defeated", event.target);
                commands.entity(event.target).insert(Dead);
                death_events.send(DeathEvent {
                    entity: event.target,
                    killed_by: event.source,
                });
            }
        }
    }
}

/// Handle deaths that are not enemies.
///
/// Enemy deaths run their own sequence in the enemies module.
pub fn check_deaths(
    mut commands: Commands,
    mut death_events: EventReader<DeathEvent>,
    player_query: Query<Entity, With<Player>>,
    enemy_query: Query<Entity, With<Enemy>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for event in death_events.read() {
        if player_query.get(event.entity).is_ok() {
            info!("Player died! Transitioning to Game Over...");
            next_state.set(GameState::GameOver);
        } else if enemy_query.get(event.entity).is_ok() {
            // Handled by the enemy death sequence
        } else {
            commands.entity(event.entity).despawn_recursive();
        }
    }
}
