//! Behavioural tests for pausing and the debug damage-all key.

mod common;

use bevy::prelude::*;
use common::{health_of, spawn_enemy_at, stationary_stats, step, SimAppBuilder};
use slime_swarm::combat::{Projectile, ProjectilePrefab};
use slime_swarm::core::GameState;
use slime_swarm::enemies::RangedAttacker;

/// Emulate the input plugin's end-of-frame clear, which `MinimalPlugins` lacks.
fn end_input_frame(app: &mut App) {
    app.world_mut().resource_mut::<ButtonInput<KeyCode>>().clear();
}

/// Press and release `key` within one update.
fn tap(app: &mut App, key: KeyCode) {
    app.world_mut().resource_mut::<ButtonInput<KeyCode>>().press(key);
    step(app);
    app.world_mut().resource_mut::<ButtonInput<KeyCode>>().release(key);
    end_input_frame(app);
}

fn state(app: &App) -> GameState {
    *app.world().resource::<State<GameState>>().get()
}

#[test]
fn pause_freezes_virtual_time() {
    let mut app = SimAppBuilder::new()
        .with_player(Vec3::new(0.0, 0.0, 500.0))
        .build();
    step(&mut app);

    tap(&mut app, KeyCode::Escape);
    step(&mut app);
    assert_eq!(state(&app), GameState::Paused);
    assert!(app.world().resource::<Time<Virtual>>().is_paused());

    let frozen_at = app.world().resource::<Time<Virtual>>().elapsed_secs();
    for _ in 0..8 {
        step(&mut app);
    }
    assert_eq!(
        app.world().resource::<Time<Virtual>>().elapsed_secs(),
        frozen_at
    );

    tap(&mut app, KeyCode::Escape);
    step(&mut app);
    step(&mut app);
    assert_eq!(state(&app), GameState::InGame);
    assert!(!app.world().resource::<Time<Virtual>>().is_paused());
    assert!(app.world().resource::<Time<Virtual>>().elapsed_secs() > frozen_at);
}

#[test]
fn cooldown_does_not_elapse_during_pause() {
    let mut app = SimAppBuilder::new()
        .with_player(Vec3::new(0.0, 0.0, -10.0))
        .build();
    let shooter = spawn_enemy_at(app.world_mut(), Vec3::ZERO, 3, stationary_stats(20.0));
    app.world_mut().entity_mut(shooter).insert(RangedAttacker::new(
        2.0,
        10.0,
        5.0,
        Some(ProjectilePrefab::default()),
    ));

    // First sighting fires at t = 0
    step(&mut app);
    tap(&mut app, KeyCode::Escape);

    // Well past the cooldown in wall-clock ticks
    for _ in 0..12 {
        step(&mut app);
    }
    tap(&mut app, KeyCode::Escape);
    step(&mut app);
    step(&mut app);

    assert_eq!(state(&app), GameState::InGame);
    let world = app.world_mut();
    assert_eq!(world.query::<&Projectile>().iter(world).count(), 1);
    let ranged = app.world().get::<RangedAttacker>(shooter).unwrap();
    assert_eq!(ranged.last_shot(), Some(0.0));
}

#[test]
fn held_damage_all_key_fires_once_per_press() {
    let mut app = SimAppBuilder::new()
        .with_player(Vec3::new(0.0, 0.0, 500.0))
        .build();
    let enemy = spawn_enemy_at(app.world_mut(), Vec3::ZERO, 5, stationary_stats(5.0));
    step(&mut app);

    // Press
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(KeyCode::KeyQ);
    step(&mut app);
    assert_eq!(health_of(&app, enemy), Some(4));

    // Hold
    for _ in 0..3 {
        end_input_frame(&mut app);
        step(&mut app);
    }
    assert_eq!(health_of(&app, enemy), Some(4));

    // Release
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .release(KeyCode::KeyQ);
    step(&mut app);
    end_input_frame(&mut app);
    step(&mut app);
    assert_eq!(health_of(&app, enemy), Some(4));

    // Press again
    tap(&mut app, KeyCode::KeyQ);
    assert_eq!(health_of(&app, enemy), Some(3));
}
