//! Ranged attack overlay: hold a standoff distance and shoot on a cooldown.

use bevy::prelude::*;

use super::ai::turn_towards;
use super::components::{AiState, Enemy, EnemyStats, Inert, TrackedTarget};
use super::navigation::{NavAgent, NavigationGoal};
use crate::combat::{spawn_projectile, Dead, ProjectilePrefab, ProjectileVisuals};

/// Turns an enemy into a ranged attacker.
///
/// Replaces the plain approach with a standoff approach and adds shooting
/// while the target is perceived.
#[derive(Component, Debug, Clone)]
pub struct RangedAttacker {
    /// Minimum seconds between two shots.
    pub shoot_cooldown: f32,
    pub projectile_speed: f32,
    /// Distance kept from the target while attacking.
    pub standoff_distance: f32,
    /// Without a prefab the enemy keeps its standoff but never fires.
    pub prefab: Option<ProjectilePrefab>,
    last_shot: Option<f32>,
}

impl RangedAttacker {
    pub fn new(
        shoot_cooldown: f32,
        projectile_speed: f32,
        standoff_distance: f32,
        prefab: Option<ProjectilePrefab>,
    ) -> Self {
        Self {
            shoot_cooldown,
            projectile_speed,
            standoff_distance,
            prefab,
            last_shot: None,
        }
    }

    pub fn last_shot(&self) -> Option<f32> {
        self.last_shot
    }

    /// Whether more than `shoot_cooldown` seconds have passed since the last shot.
    pub fn is_ready(&self, now: f32) -> bool {
        self.last_shot
            .map_or(true, |last| now - last > self.shoot_cooldown)
    }

    /// Consume the cooldown if it has elapsed.
    pub fn try_fire(&mut self, now: f32) -> bool {
        if !self.is_ready(now) {
            return false;
        }
        self.last_shot = Some(now);
        true
    }
}

/// Where a ranged attacker should stand to keep `standoff` from `target`.
///
/// Measured in the horizontal plane; a target straight overhead yields the
/// target's own position.
pub fn standoff_point(position: Vec3, target: Vec3, standoff: f32) -> Vec3 {
    let to_target = target - position;
    let flat = Vec3::new(to_target.x, 0.0, to_target.z).normalize_or_zero();
    target - flat * standoff
}

/// Approach for ranged attackers: stop short of the target.
pub fn hold_standoff(
    time: Res<Time>,
    mut enemies: Query<
        (
            &mut Transform,
            &EnemyStats,
            &AiState,
            &TrackedTarget,
            &RangedAttacker,
            &mut NavAgent,
        ),
        (With<Enemy>, Without<Dead>, Without<Inert>),
    >,
) {
    let dt = time.delta_secs();

    for (mut transform, stats, state, tracked, ranged, mut agent) in enemies.iter_mut() {
        if *state != AiState::Approaching {
            continue;
        }
        let Some(target) = tracked.last_known_position else {
            continue;
        };

        agent.set_face_travel(false);
        agent.set_speed(stats.approach_speed);
        agent.set_destination(standoff_point(
            transform.translation,
            target,
            ranged.standoff_distance,
        ));

        let direction = target - transform.translation;
        turn_towards(&mut transform, direction, stats.angular_speed.to_radians() * dt);
    }
}

/// Fire at the perceived target whenever the cooldown allows.
pub fn fire_at_target(
    mut commands: Commands,
    time: Res<Time>,
    visuals: Option<Res<ProjectileVisuals>>,
    mut enemies: Query<
        (Entity, &Transform, &AiState, &TrackedTarget, &mut RangedAttacker),
        (With<Enemy>, Without<Dead>, Without<Inert>),
    >,
) {
    let now = time.elapsed_secs();

    for (entity, transform, state, tracked, mut ranged) in enemies.iter_mut() {
        if *state != AiState::Approaching {
            continue;
        }
        let Some(target) = tracked.last_known_position else {
            continue;
        };
        let Some(prefab) = ranged.prefab.clone() else {
            warn_once!("Ranged enemy {:?} has no projectile prefab, not firing", entity);
            continue;
        };
        if !ranged.try_fire(now) {
            continue;
        }

        let direction = (target - transform.translation).normalize_or_zero();
        let projectile = spawn_projectile(
            &mut commands,
            &prefab,
            entity,
            transform.translation,
            direction * ranged.projectile_speed,
            visuals.as_deref(),
        );
        debug!("Enemy {:?} fired projectile {:?} at t={:.2}", entity, projectile, now);
    }
}
