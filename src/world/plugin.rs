//! World plugin - arena loading and setup.

use bevy::prelude::*;

use crate::core::GameState;
use crate::enemies::data::load_enemy_definitions;

use super::arena::{load_arena, setup_arena};

/// World plugin - loads the arena layout and builds it when the game starts.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            OnEnter(GameState::Loading),
            (load_arena, finish_loading)
                .chain()
                .after(load_enemy_definitions),
        )
        // Runs once; InGame is re-entered on every unpause
        .add_systems(OnExit(GameState::Loading), setup_arena);
    }
}

/// Everything is read synchronously, so the game can start right away.
fn finish_loading(mut next_state: ResMut<NextState<GameState>>) {
    info!("Loading finished, entering game");
    next_state.set(GameState::InGame);
}
