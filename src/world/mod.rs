//! World module - the demo arena and data loading errors.

mod arena;
mod error;
mod plugin;

pub use arena::{load_arena_config, setup_arena, ArenaConfig, EnemySpawn};
pub use error::DataLoadError;
pub use plugin::WorldPlugin;
