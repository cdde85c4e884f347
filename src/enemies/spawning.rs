//! Enemy spawning from definitions.

use bevy::prelude::*;
use bevy_kira_audio::AudioSource;
use bevy_rapier3d::prelude::*;

use super::audio::AmbientVoice;
use super::components::{AiState, Enemy, EnemyType};
use super::data::EnemyDefinition;
use super::death::{DeathEffect, DEATH_EFFECT_LIFETIME};
use super::navigation::NavAgent;
use super::ranged::RangedAttacker;
use crate::combat::{CollisionClass, Health};

/// Spawn one enemy of `enemy_type` at `position`.
///
/// Without an asset server the enemy has no model, no voice and no death
/// effect. Target lookup and registration happen on the next `Setup` stage.
pub fn spawn_enemy(
    commands: &mut Commands,
    enemy_type: &str,
    definition: &EnemyDefinition,
    position: Vec3,
    asset_server: Option<&AssetServer>,
) -> Entity {
    let collider_config = definition.collider.clone().unwrap_or_default();
    let scale = definition.scale.unwrap_or(1.0);

    let mut enemy = commands.spawn((
        Enemy,
        EnemyType(enemy_type.to_string()),
        Name::new(definition.name.clone()),
        AiState::default(),
        definition.to_stats(),
        Health::new(definition.max_health),
        NavAgent::new(definition.stopping_distance).with_angular_speed(definition.angular_speed),
        CollisionClass::Damageable,
        Transform::from_translation(position).with_scale(Vec3::splat(scale)),
        Collider::capsule_y(collider_config.half_height, collider_config.radius),
        RigidBody::KinematicPositionBased,
    ));

    if let Some(ranged) = &definition.ranged {
        enemy.insert(RangedAttacker::new(
            ranged.shoot_cooldown,
            ranged.projectile_speed,
            ranged.standoff_distance,
            ranged.projectile.clone(),
        ));
    }

    if let Some(asset_server) = asset_server {
        if let Some(model_path) = &definition.model_path {
            enemy.insert(SceneRoot(asset_server.load(model_path.clone())));
        }

        if let Some(audio) = &definition.audio {
            let load_all = |paths: &[String]| -> Vec<Handle<AudioSource>> {
                paths.iter().map(|path| asset_server.load(path.clone())).collect()
            };
            enemy.insert(AmbientVoice::new(
                load_all(&audio.ambient_clips),
                load_all(&audio.flee_clips),
                audio.play_range,
                audio.min_delay,
                audio.max_delay,
            ));
        }

        if let Some(scene_path) = &definition.death_effect {
            enemy.insert(DeathEffect {
                scene: asset_server.load(scene_path.clone()),
                lifetime: DEATH_EFFECT_LIFETIME,
            });
        }
    }

    let entity = enemy.id();
    info!("Spawned {} ({}) at {}", definition.name, enemy_type, position);
    entity
}
