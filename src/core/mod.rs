//! Core module - states, events, randomness, and the simulation schedule.
//!
//! This module provides the foundation that all other game systems build upon.

mod events;
mod plugin;
mod rng;
mod states;

pub use events::*;
pub use plugin::CorePlugin;
pub use rng::AiRng;
pub use states::*;
