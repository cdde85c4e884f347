//! Navigation goals over a pluggable pathfinding backend.
//!
//! The behavior systems only talk to [`NavigationGoal`] (per-agent goal
//! control) and [`NavigationSurface`] (point sampling). Everything below those
//! two traits belongs to the backend. The crate ships a straight-line backend
//! over a flat rectangle, which is enough for open arenas; a navmesh backend
//! replaces `NavSurface` and `drive_nav_agents` without touching the AI.

use bevy::prelude::*;
use rand::Rng;

use crate::combat::Dead;

use super::ai::turn_towards;
use super::components::Inert;

/// Half-size of the square a wander offset is drawn from.
pub const WANDER_RADIUS: f32 = 10.0;

/// How far a wander point may be from the walkable surface and still snap to it.
pub const SAMPLE_TOLERANCE: f32 = 2.0;

/// Wander offsets tried per request before holding position.
pub const WANDER_SAMPLE_ATTEMPTS: usize = 5;

/// Default turn rate of an agent steering along its path, in degrees per second.
pub const DEFAULT_ANGULAR_SPEED: f32 = 300.0;

/// Goal-level control of one navigating agent.
pub trait NavigationGoal {
    fn set_speed(&mut self, speed: f32);

    /// Replace the current destination. There is no cancel: the next call wins.
    fn set_destination(&mut self, destination: Vec3);

    /// True while the backend has not yet planned the latest destination.
    fn is_path_pending(&self) -> bool;

    fn remaining_distance(&self) -> f32;

    fn stopping_distance(&self) -> f32;
}

/// Point queries against the walkable surface.
pub trait NavigationSurface: Send + Sync + 'static {
    /// Closest walkable point within `tolerance` of `point`, if any.
    fn sample(&self, point: Vec3, tolerance: f32) -> Option<Vec3>;
}

/// The walkable surface used by every agent.
#[derive(Resource)]
pub struct NavSurface(Box<dyn NavigationSurface>);

impl NavSurface {
    pub fn new(surface: impl NavigationSurface) -> Self {
        Self(Box::new(surface))
    }
}

impl Default for NavSurface {
    fn default() -> Self {
        Self::new(FlatNavSurface::default())
    }
}

impl NavigationSurface for NavSurface {
    fn sample(&self, point: Vec3, tolerance: f32) -> Option<Vec3> {
        self.0.sample(point, tolerance)
    }
}

/// A flat, axis-aligned walkable rectangle at a fixed height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatNavSurface {
    /// Minimum (x, z) corner.
    pub min: Vec2,
    /// Maximum (x, z) corner.
    pub max: Vec2,
    pub height: f32,
}

impl FlatNavSurface {
    pub fn centered(half_extent: f32, height: f32) -> Self {
        Self {
            min: Vec2::splat(-half_extent),
            max: Vec2::splat(half_extent),
            height,
        }
    }
}

impl Default for FlatNavSurface {
    fn default() -> Self {
        Self::centered(50.0, 0.0)
    }
}

impl NavigationSurface for FlatNavSurface {
    fn sample(&self, point: Vec3, tolerance: f32) -> Option<Vec3> {
        let flat = Vec2::new(point.x, point.z);
        let snapped = flat.clamp(self.min, self.max);

        (snapped.distance(flat) <= tolerance).then(|| Vec3::new(snapped.x, self.height, snapped.y))
    }
}

/// Navigation agent state, driven by the backend.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct NavAgent {
    speed: f32,
    /// Degrees per second the backend may turn the agent along its path.
    angular_speed: f32,
    /// When false, the behavior layer owns the heading.
    face_travel: bool,
    stopping_distance: f32,
    destination: Option<Vec3>,
    path_pending: bool,
    remaining_distance: f32,
}

impl NavAgent {
    pub fn new(stopping_distance: f32) -> Self {
        Self {
            speed: 0.0,
            angular_speed: DEFAULT_ANGULAR_SPEED,
            face_travel: true,
            stopping_distance,
            destination: None,
            path_pending: false,
            remaining_distance: 0.0,
        }
    }

    pub fn with_angular_speed(mut self, degrees_per_second: f32) -> Self {
        self.angular_speed = degrees_per_second;
        self
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn angular_speed(&self) -> f32 {
        self.angular_speed
    }

    /// Let the backend turn the agent toward its direction of travel.
    pub fn set_face_travel(&mut self, face_travel: bool) {
        self.face_travel = face_travel;
    }

    pub fn faces_travel(&self) -> bool {
        self.face_travel
    }

    pub fn destination(&self) -> Option<Vec3> {
        self.destination
    }
}

impl Default for NavAgent {
    fn default() -> Self {
        Self::new(0.1)
    }
}

impl NavigationGoal for NavAgent {
    fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    fn set_destination(&mut self, destination: Vec3) {
        self.destination = Some(destination);
        self.path_pending = true;
    }

    fn is_path_pending(&self) -> bool {
        self.path_pending
    }

    fn remaining_distance(&self) -> f32 {
        self.remaining_distance
    }

    fn stopping_distance(&self) -> f32 {
        self.stopping_distance
    }
}

/// Draw random wander points around `origin` until one lands on the surface.
///
/// Gives up after [`WANDER_SAMPLE_ATTEMPTS`] misses.
pub fn pick_wander_destination<S, R>(origin: Vec3, surface: &S, rng: &mut R) -> Option<Vec3>
where
    S: NavigationSurface + ?Sized,
    R: Rng + ?Sized,
{
    (0..WANDER_SAMPLE_ATTEMPTS).find_map(|_| {
        let offset = Vec3::new(
            rng.gen_range(-WANDER_RADIUS..=WANDER_RADIUS),
            0.0,
            rng.gen_range(-WANDER_RADIUS..=WANDER_RADIUS),
        );
        surface.sample(origin + offset, SAMPLE_TOLERANCE)
    })
}

/// Send an agent to a fresh wander point, or hold it at `origin`.
///
/// Returns whether a new wander point was found.
pub fn wander_to<G, S, R>(agent: &mut G, origin: Vec3, surface: &S, rng: &mut R) -> bool
where
    G: NavigationGoal + ?Sized,
    S: NavigationSurface + ?Sized,
    R: Rng + ?Sized,
{
    match pick_wander_destination(origin, surface, rng) {
        Some(destination) => {
            agent.set_destination(destination);
            true
        }
        None => {
            debug!("No walkable wander point near {origin}, holding position");
            agent.set_destination(origin);
            false
        }
    }
}

/// Straight-line backend: plan instantly and walk directly at the destination.
pub fn drive_nav_agents(
    time: Res<Time>,
    mut agents: Query<(&mut Transform, &mut NavAgent), (Without<Dead>, Without<Inert>)>,
) {
    let dt = time.delta_secs();

    for (mut transform, mut agent) in agents.iter_mut() {
        let Some(destination) = agent.destination else {
            continue;
        };
        agent.path_pending = false;

        // Horizontal only; height is owned by the surface
        let to_goal = Vec3::new(
            destination.x - transform.translation.x,
            0.0,
            destination.z - transform.translation.z,
        );
        let distance = to_goal.length();
        let step = (agent.speed * dt).min(distance);

        if step > 0.0 {
            transform.translation += to_goal / distance * step;
            if agent.face_travel {
                turn_towards(&mut transform, to_goal, agent.angular_speed.to_radians() * dt);
            }
        }
        agent.remaining_distance = distance - step;
    }
}
