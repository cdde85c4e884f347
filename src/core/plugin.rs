//! Core plugin that sets up game states, events, and the tick ordering.

use bevy::prelude::*;

use super::events::*;
use super::rng::AiRng;
use super::states::*;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, InGame, Paused, GameOver)
/// - The chained `SimSet` stages, active only while `InGame`
/// - Global events (DamageEvent, DeathEvent, FleeEvent, ...)
/// - Pause and debug input
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            // Initialize game states
            .init_state::<GameState>()

            // Shared randomness
            .init_resource::<AiRng>()

            // Register global events
            .add_event::<DamageEvent>()
            .add_event::<DeathEvent>()
            .add_event::<FleeEvent>()
            .add_event::<DamageAllCommand>()
            .add_event::<FleetEvent>()

            // One tick of the simulation
            .configure_sets(
                Update,
                (
                    SimSet::Setup,
                    SimSet::Sense,
                    SimSet::Act,
                    SimSet::Resolve,
                    SimSet::Backend,
                )
                    .chain()
                    .run_if(in_state(GameState::InGame)),
            )

            // Virtual time stands still while paused
            .add_systems(OnEnter(GameState::Paused), pause_clock)
            .add_systems(OnExit(GameState::Paused), resume_clock)

            // Pause/unpause with Escape key
            .add_systems(
                Update,
                handle_pause_input.run_if(in_state(GameState::InGame).or(in_state(GameState::Paused))),
            )

            // Debug: Q damages every enemy once; polled ahead of the tick
            .add_systems(
                Update,
                debug_damage_all_input
                    .before(SimSet::Setup)
                    .run_if(in_state(GameState::InGame)),
            );
    }
}

/// Handle Escape key to pause/unpause the game.
fn handle_pause_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    current_state: Res<State<GameState>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        match current_state.get() {
            GameState::InGame => next_state.set(GameState::Paused),
            GameState::Paused => next_state.set(GameState::InGame),
            _ => {}
        }
    }
}

fn pause_clock(mut time: ResMut<Time<Virtual>>) {
    time.pause();
}

fn resume_clock(mut time: ResMut<Time<Virtual>>) {
    time.unpause();
}

/// Turn a Q press into a `DamageAllCommand`.
///
/// `just_pressed` is edge-triggered, so holding the key fires once.
fn debug_damage_all_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut commands: EventWriter<DamageAllCommand>,
) {
    if keyboard.just_pressed(KeyCode::KeyQ) {
        info!("Debug: damaging every registered enemy");
        commands.send(DamageAllCommand);
    }
}
