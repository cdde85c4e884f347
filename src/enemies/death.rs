//! Enemy death sequence and death effects.

use bevy::prelude::*;

use super::components::{Enemy, EnemyStats};
use super::registry::EnemyRegistry;
use crate::combat::{Damageable, DeathEvent, Health};
use crate::core::{FleeEvent, FleetEvent};

/// Default seconds a death effect stays in the world.
pub const DEATH_EFFECT_LIFETIME: f32 = 2.0;

/// Scene spawned where the enemy died.
#[derive(Component, Debug, Clone)]
pub struct DeathEffect {
    pub scene: Handle<Scene>,
    pub lifetime: f32,
}

/// Remaining lifetime of a spawned death effect.
#[derive(Component)]
pub struct EffectLifetime(pub Timer);

/// Run the death sequence for every enemy that died this tick.
///
/// In order: spawn the death effect, tell every other live enemy within sight
/// range to flee, leave the registry, report the despawn, despawn. Flee
/// reactions are queued as events and run after all deaths of the tick.
pub fn handle_enemy_death(
    mut commands: Commands,
    mut death_events: EventReader<DeathEvent>,
    mut registry: ResMut<EnemyRegistry>,
    mut flee_events: EventWriter<FleeEvent>,
    mut fleet_events: EventWriter<FleetEvent>,
    enemies: Query<(&Transform, &EnemyStats, &Health, Option<&DeathEffect>), With<Enemy>>,
) {
    for event in death_events.read() {
        let entity = event.entity;
        let Ok((transform, stats, _, effect)) = enemies.get(entity) else {
            continue;
        };
        let origin = transform.translation;

        if let Some(effect) = effect {
            commands.spawn((
                Name::new("Death Effect"),
                SceneRoot(effect.scene.clone()),
                Transform::from_translation(origin),
                EffectLifetime(Timer::from_seconds(effect.lifetime, TimerMode::Once)),
            ));
        }

        let nearby: Vec<FleeEvent> = registry
            .snapshot()
            .into_iter()
            .filter(|&other| other != entity)
            .filter(|&other| {
                enemies.get(other).is_ok_and(|(other_transform, _, health, _)| {
                    !health.is_dead()
                        && other_transform.translation.distance(origin) <= stats.sight_range
                })
            })
            .map(|other| FleeEvent {
                entity: other,
                cause: entity,
            })
            .collect();

        debug!("Enemy {:?} died, {} nearby enemies flee", entity, nearby.len());
        flee_events.send_batch(nearby);

        if registry.remove(entity) {
            fleet_events.send(FleetEvent::Despawned(entity));
        }

        info!("Enemy {:?} died (killed by {:?})", entity, event.killed_by);
        commands.entity(entity).despawn_recursive();
    }
}

/// Remove death effects whose lifetime ran out.
pub fn expire_effects(
    mut commands: Commands,
    time: Res<Time>,
    mut effects: Query<(Entity, &mut EffectLifetime)>,
) {
    for (entity, mut lifetime) in effects.iter_mut() {
        if lifetime.0.tick(time.delta()).just_finished() {
            commands.entity(entity).despawn_recursive();
        }
    }
}
