//! Projectiles fired by ranged enemies.
//!
//! A projectile ends in exactly one way: it hits something damageable, it hits
//! environment geometry, or its lifetime runs out. Whichever happens first
//! marks it spent, and a spent projectile is inert until its despawn lands.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use serde::Deserialize;

use super::components::{CollisionClass, DamageEvent};

/// Per-archetype projectile description loaded with the enemy definition.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct ProjectilePrefab {
    #[serde(default = "default_damage")]
    pub damage: i32,
    /// Seconds before the projectile removes itself.
    #[serde(default = "default_lifetime")]
    pub lifetime: f32,
    #[serde(default = "default_radius")]
    pub radius: f32,
}

fn default_damage() -> i32 {
    1
}

fn default_lifetime() -> f32 {
    5.0
}

fn default_radius() -> f32 {
    0.2
}

impl Default for ProjectilePrefab {
    fn default() -> Self {
        Self {
            damage: default_damage(),
            lifetime: default_lifetime(),
            radius: default_radius(),
        }
    }
}

/// A live projectile.
#[derive(Component, Debug)]
pub struct Projectile {
    pub damage: i32,
    /// The shooter. Collisions with it are ignored.
    pub owner: Entity,
    spent: bool,
}

impl Projectile {
    pub fn new(damage: i32, owner: Entity) -> Self {
        Self {
            damage,
            owner,
            spent: false,
        }
    }

    pub fn is_spent(&self) -> bool {
        self.spent
    }

    /// Mark the projectile as finished. Returns false if it already was.
    fn spend(&mut self) -> bool {
        !std::mem::replace(&mut self.spent, true)
    }
}

/// Remaining lifetime of a projectile.
#[derive(Component)]
pub struct ProjectileLifetime(pub Timer);

/// Mesh and material used to draw projectiles, when rendering is available.
#[derive(Resource, Clone)]
pub struct ProjectileVisuals {
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
}

/// Spawn a projectile at `origin` moving with `velocity`.
pub fn spawn_projectile(
    commands: &mut Commands,
    prefab: &ProjectilePrefab,
    owner: Entity,
    origin: Vec3,
    velocity: Vec3,
    visuals: Option<&ProjectileVisuals>,
) -> Entity {
    let mut entity = commands.spawn((
        Projectile::new(prefab.damage, owner),
        ProjectileLifetime(Timer::from_seconds(prefab.lifetime, TimerMode::Once)),
        Transform::from_translation(origin),
        RigidBody::Dynamic,
        Collider::ball(prefab.radius),
        // Sensor: the projectile never pushes its shooter, we only want events
        Sensor,
        ActiveEvents::COLLISION_EVENTS,
        GravityScale(0.0),
        Ccd::enabled(),
        Velocity::linear(velocity),
    ));

    if let Some(visuals) = visuals {
        entity.insert((
            Mesh3d(visuals.mesh.clone()),
            MeshMaterial3d(visuals.material.clone()),
        ));
    }

    entity.id()
}

/// Apply projectile collisions.
pub fn resolve_projectile_hits(
    mut commands: Commands,
    mut collision_events: EventReader<CollisionEvent>,
    mut projectiles: Query<&mut Projectile>,
    classes: Query<&CollisionClass>,
    mut damage_events: EventWriter<DamageEvent>,
) {
    for event in collision_events.read() {
        let CollisionEvent::Started(a, b, _) = *event else {
            continue;
        };

        let (projectile_entity, other) = if projectiles.contains(a) {
            (a, b)
        } else if projectiles.contains(b) {
            (b, a)
        } else {
            continue;
        };

        let Ok(mut projectile) = projectiles.get_mut(projectile_entity) else {
            continue;
        };

        if projectile.is_spent() || other == projectile.owner {
            continue;
        }

        match classes.get(other) {
            Ok(CollisionClass::Damageable) => {
                projectile.spend();
                damage_events.send(DamageEvent {
                    target: other,
                    source: Some(projectile.owner),
                    amount: projectile.damage,
                });
                commands.entity(projectile_entity).despawn_recursive();
            }
            Ok(CollisionClass::Environment) => {
                projectile.spend();
                commands.entity(projectile_entity).despawn_recursive();
            }
            Err(_) => {}
        }
    }
}

/// Remove projectiles whose lifetime ran out.
pub fn expire_projectiles(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut Projectile, &mut ProjectileLifetime)>,
) {
    for (entity, mut projectile, mut lifetime) in query.iter_mut() {
        lifetime.0.tick(time.delta());

        if lifetime.0.finished() && projectile.spend() {
            commands.entity(entity).despawn_recursive();
        }
    }
}
