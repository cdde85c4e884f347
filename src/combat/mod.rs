//! Combat module - health, damage, deaths, and projectiles.

mod components;
mod plugin;
pub mod projectile;
mod systems;

pub use components::*;
pub use plugin::{CombatPlugin, CombatSet};
pub use projectile::{spawn_projectile, Projectile, ProjectileLifetime, ProjectilePrefab, ProjectileVisuals};
pub use systems::{apply_damage, broadcast_damage_all};
