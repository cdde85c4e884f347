//! Field-of-view sight test.

use bevy::prelude::*;

/// Whether a target at `target_pos` is inside the sight cone.
///
/// The target is seen when it is strictly closer than `sight_range` and the
/// angle between `self_forward` and the direction to it is strictly smaller
/// than `sight_angle` (degrees). A target exactly on either bound is not seen.
pub fn sees(
    self_pos: Vec3,
    self_forward: Vec3,
    target_pos: Vec3,
    sight_range: f32,
    sight_angle: f32,
) -> bool {
    let offset = target_pos - self_pos;
    within_cone(
        offset.length(),
        angle_degrees(self_forward, offset),
        sight_range,
        sight_angle,
    )
}

/// The bound checks behind [`sees`].
pub fn within_cone(distance: f32, angle: f32, sight_range: f32, sight_angle: f32) -> bool {
    distance < sight_range && angle < sight_angle
}

/// Unsigned angle between two vectors in degrees, 0 if either is degenerate.
fn angle_degrees(a: Vec3, b: Vec3) -> f32 {
    let denominator = (a.length_squared() * b.length_squared()).sqrt();
    if denominator <= f32::EPSILON {
        return 0.0;
    }
    // Precise acos, the cone bound is strict.
    (a.dot(b) / denominator).clamp(-1.0, 1.0).acos().to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RANGE: f32 = 20.0;
    const ANGLE: f32 = 45.0;

    #[test]
    fn target_straight_ahead_is_seen() {
        assert!(sees(Vec3::ZERO, Vec3::NEG_Z, Vec3::new(0.0, 0.0, -10.0), RANGE, ANGLE));
    }

    #[test]
    fn target_behind_is_not_seen() {
        assert!(!sees(Vec3::ZERO, Vec3::NEG_Z, Vec3::new(0.0, 0.0, 10.0), RANGE, ANGLE));
    }

    #[test]
    fn target_at_exact_range_is_not_seen() {
        assert!(!sees(Vec3::ZERO, Vec3::NEG_Z, Vec3::new(0.0, 0.0, -20.0), RANGE, ANGLE));
        assert!(sees(Vec3::ZERO, Vec3::NEG_Z, Vec3::new(0.0, 0.0, -19.99), RANGE, ANGLE));
    }

    #[test]
    fn target_at_right_angle_is_not_seen() {
        assert!(!sees(Vec3::ZERO, Vec3::NEG_Z, Vec3::new(5.0, 0.0, 0.0), RANGE, 90.0));
    }

    #[test]
    fn bounds_are_strict() {
        assert!(within_cone(19.9, 44.9, RANGE, ANGLE));
        assert!(!within_cone(20.0, 10.0, RANGE, ANGLE));
        assert!(!within_cone(10.0, 45.0, RANGE, ANGLE));
        assert!(!within_cone(20.0, 45.0, RANGE, ANGLE));
    }

    #[test]
    fn sweep_matches_bounds() {
        for distance in [0.5_f32, 5.0, 10.0, 19.0, 21.0, 30.0] {
            for degrees in [0.0_f32, 20.0, 40.0, 50.0, 90.0, 170.0] {
                let radians = degrees.to_radians();
                let direction = Vec3::new(radians.sin(), 0.0, -radians.cos());
                let seen = sees(Vec3::ZERO, Vec3::NEG_Z, direction * distance, RANGE, ANGLE);
                assert_eq!(
                    seen,
                    distance < RANGE && degrees < ANGLE,
                    "distance {distance}, angle {degrees}"
                );
            }
        }
    }

    #[test]
    fn coincident_target_is_seen() {
        assert!(sees(Vec3::ONE, Vec3::NEG_Z, Vec3::ONE, RANGE, ANGLE));
    }
}
