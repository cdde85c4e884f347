//! Combat-related components.

use bevy::prelude::*;

// Re-export from core to avoid duplication
pub use crate::core::{DamageEvent, DeathEvent};

/// Result of a single call to the damage entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// The entity was already dead; nothing changed.
    Rejected,
    /// Damage applied, entity still alive.
    Wounded { remaining: i32 },
    /// This call took health from positive to zero or below.
    Killed,
}

/// Capability of anything that owns health and can be hurt.
pub trait Damageable {
    fn health(&self) -> i32;

    /// The single damage entry point.
    ///
    /// Once health has reached zero every further call is `Rejected`, so the
    /// `Killed` outcome is observed at most once per entity.
    fn take_damage(&mut self, amount: i32) -> DamageOutcome;

    fn is_dead(&self) -> bool {
        self.health() <= 0
    }
}

/// Integer health for enemies and the player.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health {
    pub current: i32,
    pub maximum: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self {
            current: max,
            maximum: max,
        }
    }
}

impl Damageable for Health {
    fn health(&self) -> i32 {
        self.current
    }

    fn take_damage(&mut self, amount: i32) -> DamageOutcome {
        if self.is_dead() {
            return DamageOutcome::Rejected;
        }

        self.current -= amount;

        if self.is_dead() {
            DamageOutcome::Killed
        } else {
            DamageOutcome::Wounded {
                remaining: self.current,
            }
        }
    }
}

/// Marker component for entities that have died (prevents multiple death events).
#[derive(Component)]
pub struct Dead;

/// How a projectile should treat something it touches.
///
/// Entities without this component are ignored by projectiles.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionClass {
    /// Takes damage and stops the projectile.
    Damageable,
    /// Static level geometry; stops the projectile without damage.
    Environment,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_reduces_health_until_death() {
        let mut health = Health::new(3);
        assert_eq!(health.take_damage(1), DamageOutcome::Wounded { remaining: 2 });
        assert_eq!(health.take_damage(2), DamageOutcome::Killed);
        assert_eq!(health.current, 0);
        assert!(health.is_dead());
    }

    #[test]
    fn damage_after_death_is_rejected() {
        let mut health = Health::new(1);
        assert_eq!(health.take_damage(1), DamageOutcome::Killed);

        assert_eq!(health.take_damage(1), DamageOutcome::Rejected);
        assert_eq!(health.take_damage(5), DamageOutcome::Rejected);
        assert_eq!(health.current, 0);
    }

    #[test]
    fn overkill_still_counts_as_single_death() {
        let mut health = Health::new(2);
        assert_eq!(health.take_damage(10), DamageOutcome::Killed);
        assert_eq!(health.current, -8);
        assert_eq!(health.take_damage(1), DamageOutcome::Rejected);
        assert_eq!(health.current, -8);
    }
}
