//! Player-related components.

use bevy::prelude::*;

/// Marker component for the player entity.
///
/// Enemies resolve their tracked target by this marker.
#[derive(Component)]
pub struct Player;

/// Configuration for the first-person controller.
#[derive(Resource)]
pub struct PlayerConfig {
    /// Mouse sensitivity multiplier
    pub mouse_sensitivity: f32,
    /// Invert Y-axis for mouse look
    pub invert_y: bool,
    /// Base movement speed in units per second
    pub move_speed: f32,
    /// Sprint speed multiplier
    pub sprint_multiplier: f32,
    pub max_health: i32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            mouse_sensitivity: 1.5,
            invert_y: false,
            move_speed: 5.0,
            sprint_multiplier: 1.5,
            max_health: 10,
        }
    }
}
