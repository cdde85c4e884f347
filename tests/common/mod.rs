//! Shared fixtures for headless simulation tests.
#![allow(dead_code)]

use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use slime_swarm::combat::{CollisionClass, CombatPlugin, Health};
use slime_swarm::combat::DeathEvent;
use slime_swarm::core::{AiRng, CorePlugin, FleeEvent, FleetEvent, GameState};
use slime_swarm::enemies::{AiState, Enemy, EnemyPlugin, EnemyStats, NavAgent};
use slime_swarm::player::Player;

/// Simulated seconds per `App::update` after the first.
pub const TICK: f32 = 0.25;

/// Builder for a headless app running the enemy simulation.
pub struct SimAppBuilder {
    app: App,
}

impl SimAppBuilder {
    /// `MinimalPlugins`, states, and the simulation plugins, already `InGame`.
    #[must_use]
    pub fn new() -> Self {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .init_resource::<ButtonInput<KeyCode>>()
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f32(
                TICK,
            )))
            .add_plugins((CorePlugin, CombatPlugin, EnemyPlugin))
            .insert_resource(AiRng::seeded(7));
        // Applied by the state transition ahead of the first `Update`
        app.world_mut()
            .resource_mut::<NextState<GameState>>()
            .set(GameState::InGame);
        Self { app }
    }

    /// Spawn the tracked target at `position`.
    #[must_use]
    pub fn with_player(mut self, position: Vec3) -> Self {
        spawn_target(self.app.world_mut(), position);
        self
    }

    #[must_use]
    pub fn build(self) -> App {
        self.app
    }
}

impl Default for SimAppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Stats that keep an enemy in place unless a test moves it.
pub fn stationary_stats(sight_range: f32) -> EnemyStats {
    EnemyStats {
        sight_range,
        sight_angle: 45.0,
        wander_speed: 0.0,
        approach_speed: 0.0,
        angular_speed: 300.0,
    }
}

pub fn spawn_target(world: &mut World, position: Vec3) -> Entity {
    world
        .spawn((
            Player,
            Health::new(10),
            CollisionClass::Damageable,
            Transform::from_translation(position),
        ))
        .id()
}

/// Spawn a bare enemy facing -Z.
pub fn spawn_enemy_at(world: &mut World, position: Vec3, health: i32, stats: EnemyStats) -> Entity {
    world
        .spawn((
            Enemy,
            AiState::default(),
            stats,
            Health::new(health),
            NavAgent::default(),
            CollisionClass::Damageable,
            Transform::from_translation(position),
        ))
        .id()
}

/// Run one update, keeping only that update's events for [`sent_events`].
///
/// Event buffers only rotate after a fixed-timestep pass, so without the
/// clear an inspection could also see the previous update's events.
pub fn step(app: &mut App) {
    let world = app.world_mut();
    world.resource_mut::<Events<FleeEvent>>().clear();
    world.resource_mut::<Events<DeathEvent>>().clear();
    world.resource_mut::<Events<FleetEvent>>().clear();
    app.update();
}

/// Events of type `E` sent during the most recent [`step`].
pub fn sent_events<E: Event + Clone>(app: &App) -> Vec<E> {
    app.world()
        .resource::<Events<E>>()
        .iter_current_update_events()
        .cloned()
        .collect()
}

pub fn health_of(app: &App, entity: Entity) -> Option<i32> {
    app.world().get::<Health>(entity).map(|health| health.current)
}
