//! Enemy AI behavior systems.

use bevy::prelude::*;

use super::audio::{AmbientVoice, AudioCueThrottle, CueRequest};
use super::components::{AiState, Enemy, EnemyStats, Inert, TrackedTarget};
use super::navigation::{wander_to, NavAgent, NavSurface, NavigationGoal};
use super::perception::sees;
use super::ranged::RangedAttacker;
use super::registry::EnemyRegistry;
use crate::combat::{Damageable, Dead, Health};
use crate::core::{AiRng, FleeEvent, FleetEvent};
use crate::player::Player;

/// Below this horizontal distance an enemy stops turning toward its target.
const MIN_TURN_DISTANCE: f32 = 0.1;

/// Finish setting up freshly spawned enemies.
///
/// Resolves the tracked target, registers the enemy, sends it wandering, and
/// delays its first ambient cue. An enemy missing its target or navigation
/// agent is left inert.
pub fn initialize_enemies(
    mut commands: Commands,
    time: Res<Time>,
    mut rng: ResMut<AiRng>,
    surface: Res<NavSurface>,
    mut registry: ResMut<EnemyRegistry>,
    mut fleet_events: EventWriter<FleetEvent>,
    player_query: Query<Entity, With<Player>>,
    mut enemy_query: Query<
        (Entity, &Transform, Option<&mut NavAgent>, Option<&mut AmbientVoice>),
        (With<Enemy>, Without<TrackedTarget>, Without<Inert>),
    >,
) {
    let now = time.elapsed_secs();

    for (entity, transform, agent, voice) in enemy_query.iter_mut() {
        let Ok(player) = player_query.get_single() else {
            error!("Enemy {:?}: no Player to track, disabling AI", entity);
            commands.entity(entity).insert(Inert);
            continue;
        };

        let Some(mut agent) = agent else {
            error!("Enemy {:?}: NavAgent component missing, disabling AI", entity);
            commands.entity(entity).insert(Inert);
            continue;
        };

        commands.entity(entity).insert(TrackedTarget::new(player));

        if registry.register(entity) {
            fleet_events.send(FleetEvent::Spawned(entity));
        }

        wander_to(&mut *agent, transform.translation, &*surface, &mut rng.0);

        if let Some(mut voice) = voice {
            voice.schedule_next(now, &mut rng.0);
        }
    }
}

/// Run the sight test and flip between Wandering and Approaching.
pub fn perceive_target(
    targets: Query<&Transform, Without<Enemy>>,
    mut enemies: Query<
        (Entity, &Transform, &EnemyStats, &mut TrackedTarget, &mut AiState),
        (With<Enemy>, Without<Dead>, Without<Inert>),
    >,
) {
    for (entity, transform, stats, mut tracked, mut state) in enemies.iter_mut() {
        let seen_at = targets.get(tracked.entity).ok().and_then(|target| {
            sees(
                transform.translation,
                *transform.forward(),
                target.translation,
                stats.sight_range,
                stats.sight_angle,
            )
            .then_some(target.translation)
        });

        if let Some(position) = seen_at {
            tracked.last_known_position = Some(position);
        }

        let next = if seen_at.is_some() {
            AiState::Approaching
        } else {
            AiState::Wandering
        };

        if *state != next {
            debug!("Enemy {:?}: {:?} -> {:?}", entity, *state, next);
            *state = next;
        }
    }
}

/// Close in on the target, re-aiming every tick.
pub fn approach_target(
    time: Res<Time>,
    mut enemies: Query<
        (&mut Transform, &EnemyStats, &AiState, &TrackedTarget, &mut NavAgent),
        (With<Enemy>, Without<RangedAttacker>, Without<Dead>, Without<Inert>),
    >,
) {
    let dt = time.delta_secs();

    for (mut transform, stats, state, tracked, mut agent) in enemies.iter_mut() {
        if *state != AiState::Approaching {
            continue;
        }
        let Some(target) = tracked.last_known_position else {
            continue;
        };

        agent.set_face_travel(false);
        agent.set_speed(stats.approach_speed);
        agent.set_destination(target);

        let direction = target - transform.translation;
        turn_towards(&mut transform, direction, stats.angular_speed.to_radians() * dt);
    }
}

/// Roam to a new random point whenever the previous one is reached.
pub fn wander(
    mut rng: ResMut<AiRng>,
    surface: Res<NavSurface>,
    mut enemies: Query<
        (&Transform, &EnemyStats, &AiState, &mut NavAgent),
        (With<Enemy>, With<TrackedTarget>, Without<Dead>, Without<Inert>),
    >,
) {
    for (transform, stats, state, mut agent) in enemies.iter_mut() {
        if *state != AiState::Wandering {
            continue;
        }

        if !agent.is_path_pending() && agent.remaining_distance() <= agent.stopping_distance() {
            wander_to(&mut *agent, transform.translation, &*surface, &mut rng.0);
        }

        agent.set_face_travel(true);
        agent.set_speed(stats.wander_speed);
    }
}

/// One-shot flee reaction: new wander goal right away, and maybe a flee cue.
pub fn react_to_flee(
    mut flee_events: EventReader<FleeEvent>,
    mut rng: ResMut<AiRng>,
    surface: Res<NavSurface>,
    mut throttle: ResMut<AudioCueThrottle>,
    mut cue_requests: EventWriter<CueRequest>,
    mut enemies: Query<
        (&Transform, &Health, &mut NavAgent, Option<&AmbientVoice>),
        (With<Enemy>, With<TrackedTarget>, Without<Inert>),
    >,
) {
    for event in flee_events.read() {
        let Ok((transform, health, mut agent, voice)) = enemies.get_mut(event.entity) else {
            continue;
        };
        if health.is_dead() {
            continue;
        }

        debug!("Enemy {:?} flees from the death of {:?}", event.entity, event.cause);
        agent.set_face_travel(true);
        wander_to(&mut *agent, transform.translation, &*surface, &mut rng.0);

        if let Some(request) =
            voice.and_then(|voice| voice.try_flee(event.entity, &mut throttle, &mut rng.0))
        {
            cue_requests.send(request);
        }
    }
}

/// Yaw `transform` toward the horizontal part of `direction`, by at most
/// `max_radians`.
pub fn turn_towards(transform: &mut Transform, direction: Vec3, max_radians: f32) {
    let flat = Vec3::new(direction.x, 0.0, direction.z);
    if flat.length() <= MIN_TURN_DISTANCE {
        return;
    }

    // Rotation whose forward (-Z) points along `flat`
    let target = Quat::from_rotation_y(f32::atan2(-flat.x, -flat.z));
    let angle = transform.rotation.angle_between(target);

    transform.rotation = if angle <= max_radians {
        target
    } else {
        transform.rotation.slerp(target, max_radians / angle)
    };
}
