//! Game state definitions and the per-tick system ordering.
//!
//! States determine which systems run at any given time. The enemy AI only
//! advances while the game is `InGame`. Pausing also pauses virtual time, so
//! cooldowns and cue deadlines do not run out behind a pause screen.

use bevy::prelude::*;

/// Main game states - controls overall game flow.
///
/// - Start in `Loading` to read enemy definitions
/// - Enter `InGame` once definitions are available
/// - `Paused` freezes the simulation but keeps the world visible
/// - `GameOver` when the player dies
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Initial state - loading data files
    #[default]
    Loading,
    /// Active simulation
    InGame,
    /// Simulation is paused
    Paused,
    /// Player has died
    GameOver,
}

/// Ordering of one simulation tick.
///
/// Every entity's behavior for a stage runs to completion before the next
/// stage begins, so no stage ever observes a half-applied previous stage.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimSet {
    /// Late initialization of freshly spawned entities.
    Setup,
    /// Perception and state transitions.
    Sense,
    /// Movement goals, attacks, and cue scheduling.
    Act,
    /// Damage, deaths, and broadcast reactions.
    Resolve,
    /// Navigation, audio, and effect backends catch up with requests.
    Backend,
}
