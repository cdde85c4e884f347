//! Behavioural tests for the death sequence and the damage-all broadcast.

mod common;

use bevy::prelude::*;
use common::{health_of, sent_events, spawn_enemy_at, stationary_stats, step, SimAppBuilder};
use rstest::{fixture, rstest};
use slime_swarm::combat::{DamageEvent, DeathEvent};
use slime_swarm::core::{DamageAllCommand, FleeEvent, FleetEvent, GameState};
use slime_swarm::enemies::{EnemyFleet, EnemyRegistry, NavAgent};
use slime_swarm::player::Player;

#[fixture]
fn app() -> App {
    // Target far behind everyone, so nobody approaches
    SimAppBuilder::new()
        .with_player(Vec3::new(0.0, 0.0, 500.0))
        .build()
}

fn damage(app: &mut App, target: Entity, amount: i32) {
    app.world_mut().send_event(DamageEvent {
        target,
        source: None,
        amount,
    });
}

fn flee_recipients(app: &App) -> Vec<Entity> {
    let mut recipients: Vec<Entity> = sent_events::<FleeEvent>(app)
        .into_iter()
        .map(|event| event.entity)
        .collect();
    recipients.sort();
    recipients
}

#[rstest]
fn death_sends_nearby_enemies_fleeing(mut app: App) {
    let dying = spawn_enemy_at(app.world_mut(), Vec3::ZERO, 1, stationary_stats(5.0));
    let near = spawn_enemy_at(app.world_mut(), Vec3::new(3.0, 0.0, 0.0), 3, stationary_stats(5.0));
    let on_edge = spawn_enemy_at(app.world_mut(), Vec3::new(0.0, 0.0, 5.0), 3, stationary_stats(5.0));
    let _outside = spawn_enemy_at(app.world_mut(), Vec3::new(5.01, 0.0, 0.0), 3, stationary_stats(5.0));
    step(&mut app);

    damage(&mut app, dying, 1);
    step(&mut app);

    let mut expected = vec![near, on_edge];
    expected.sort();
    assert_eq!(flee_recipients(&app), expected);
    assert!(sent_events::<FleeEvent>(&app)
        .iter()
        .all(|event| event.cause == dying));
}

#[rstest]
fn flee_radius_is_the_dying_enemys_sight_range(mut app: App) {
    // The witness sees far, but the dying enemy's range decides
    let dying = spawn_enemy_at(app.world_mut(), Vec3::ZERO, 1, stationary_stats(2.0));
    let witness = spawn_enemy_at(app.world_mut(), Vec3::new(3.0, 0.0, 0.0), 3, stationary_stats(50.0));
    step(&mut app);

    damage(&mut app, dying, 1);
    step(&mut app);

    assert!(flee_recipients(&app).is_empty());
    assert!(app.world().entities().contains(witness));
}

#[rstest]
fn fleeing_enemy_gets_a_new_wander_goal(mut app: App) {
    let dying = spawn_enemy_at(app.world_mut(), Vec3::ZERO, 1, stationary_stats(5.0));
    let witness = spawn_enemy_at(app.world_mut(), Vec3::new(2.0, 0.0, 0.0), 3, stationary_stats(5.0));
    step(&mut app);
    let before = app.world().get::<NavAgent>(witness).unwrap().destination();

    damage(&mut app, dying, 1);
    step(&mut app);

    let after = app.world().get::<NavAgent>(witness).unwrap().destination();
    assert!(after.is_some());
    assert_ne!(before, after);
}

#[rstest]
fn death_sequence_runs_once(mut app: App) {
    let enemy = spawn_enemy_at(app.world_mut(), Vec3::ZERO, 1, stationary_stats(5.0));
    step(&mut app);

    damage(&mut app, enemy, 1);
    damage(&mut app, enemy, 1);
    step(&mut app);

    let deaths = sent_events::<DeathEvent>(&app);
    assert_eq!(deaths.len(), 1);
    assert_eq!(deaths[0].entity, enemy);
    assert_eq!(
        sent_events::<FleetEvent>(&app),
        vec![FleetEvent::Despawned(enemy)]
    );
    assert!(!app.world().entities().contains(enemy));
    assert!(app.world().resource::<EnemyRegistry>().is_empty());

    // Late damage to the removed entity changes nothing
    damage(&mut app, enemy, 1);
    step(&mut app);
    step(&mut app);

    assert!(sent_events::<DeathEvent>(&app).is_empty());
    let fleet = app.world().resource::<EnemyFleet>();
    assert_eq!((fleet.live, fleet.despawned_total), (0, 1));
}

#[rstest]
fn simultaneous_deaths_do_not_send_each_other_fleeing(mut app: App) {
    let a = spawn_enemy_at(app.world_mut(), Vec3::ZERO, 1, stationary_stats(5.0));
    let b = spawn_enemy_at(app.world_mut(), Vec3::new(1.0, 0.0, 0.0), 1, stationary_stats(5.0));
    let survivor = spawn_enemy_at(app.world_mut(), Vec3::new(0.0, 0.0, 1.0), 3, stationary_stats(5.0));
    step(&mut app);

    damage(&mut app, a, 1);
    damage(&mut app, b, 1);
    step(&mut app);

    // Both deaths reach the survivor, neither reaches the other corpse
    assert_eq!(flee_recipients(&app), vec![survivor, survivor]);
    assert_eq!(app.world().resource::<EnemyRegistry>().len(), 1);
}

#[rstest]
fn damage_all_hits_every_registered_enemy_once(mut app: App) {
    let fragile = spawn_enemy_at(app.world_mut(), Vec3::ZERO, 1, stationary_stats(5.0));
    let sturdy = spawn_enemy_at(app.world_mut(), Vec3::new(2.0, 0.0, 0.0), 2, stationary_stats(5.0));
    let tough = spawn_enemy_at(app.world_mut(), Vec3::new(30.0, 0.0, 0.0), 3, stationary_stats(5.0));
    step(&mut app);

    // Two commands in one tick are one activation
    app.world_mut().send_event(DamageAllCommand);
    app.world_mut().send_event(DamageAllCommand);
    step(&mut app);

    assert!(!app.world().entities().contains(fragile));
    assert_eq!(health_of(&app, sturdy), Some(1));
    assert_eq!(health_of(&app, tough), Some(2));

    let registry = app.world().resource::<EnemyRegistry>();
    assert_eq!(registry.iter().collect::<Vec<_>>(), vec![sturdy, tough]);
    assert_eq!(flee_recipients(&app), vec![sturdy]);
}

#[rstest]
fn damage_all_skips_enemies_spawned_afterwards(mut app: App) {
    let old = spawn_enemy_at(app.world_mut(), Vec3::ZERO, 3, stationary_stats(5.0));
    step(&mut app);

    app.world_mut().send_event(DamageAllCommand);
    let newcomer = spawn_enemy_at(app.world_mut(), Vec3::new(4.0, 0.0, 0.0), 3, stationary_stats(5.0));
    step(&mut app);

    assert_eq!(health_of(&app, old), Some(2));
    assert_eq!(health_of(&app, newcomer), Some(3));
}

#[rstest]
fn damage_all_leaves_the_player_alone(mut app: App) {
    spawn_enemy_at(app.world_mut(), Vec3::ZERO, 3, stationary_stats(5.0));
    step(&mut app);

    app.world_mut().send_event(DamageAllCommand);
    step(&mut app);

    let mut players = app.world_mut().query_filtered::<Entity, With<Player>>();
    let player = players.single(app.world());
    assert_eq!(health_of(&app, player), Some(10));
}

#[rstest]
fn player_death_ends_the_game(mut app: App) {
    let mut players = app.world_mut().query_filtered::<Entity, With<Player>>();
    let player = players.single(app.world());
    step(&mut app);

    damage(&mut app, player, 10);
    step(&mut app);
    step(&mut app);

    assert_eq!(
        *app.world().resource::<State<GameState>>().get(),
        GameState::GameOver
    );
}
