use serde::Serialize;

use super::dodge::Point;

/// Damped spring parameters, in the units the renderer animates with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
}

impl SpringConfig {
    /// Damping ratio; below 1 overshoots slightly, 1 is critical.
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

/// Position of the roaming NO control.
pub const ROAMING_POSITION: SpringConfig = SpringConfig { stiffness: 130.0, damping: 22.0, mass: 1.15 };
/// Tilt of the roaming NO control.
pub const ROAMING_TILT: SpringConfig = SpringConfig { stiffness: 180.0, damping: 20.0, mass: 0.9 };
/// The card variant's control snaps faster.
pub const CARD_POSITION: SpringConfig = SpringConfig { stiffness: 380.0, damping: 24.0, mass: 1.0 };

const SETTLE_DISTANCE: f64 = 0.5;
const SETTLE_SPEED: f64 = 0.5;

/// Animates a point toward a target so moves glide instead of teleporting.
#[derive(Debug, Clone)]
pub struct SpringMotion {
    config: SpringConfig,
    position: Point,
    velocity: Point,
    target: Point,
}

impl SpringMotion {
    pub fn new(config: SpringConfig, at: Point) -> Self {
        Self {
            config,
            position: at,
            velocity: Point::default(),
            target: at,
        }
    }

    /// Change the destination; current velocity carries over.
    pub fn retarget(&mut self, target: Point) {
        self.target = target;
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn target(&self) -> Point {
        self.target
    }

    /// Advance by `dt` seconds (semi-implicit Euler) and return the new position.
    pub fn step(&mut self, dt: f64) -> Point {
        let SpringConfig { stiffness, damping, mass } = self.config;
        let ax = (-stiffness * (self.position.x - self.target.x) - damping * self.velocity.x) / mass;
        let ay = (-stiffness * (self.position.y - self.target.y) - damping * self.velocity.y) / mass;
        self.velocity.x += ax * dt;
        self.velocity.y += ay * dt;
        self.position.x += self.velocity.x * dt;
        self.position.y += self.velocity.y * dt;
        self.position
    }

    pub fn is_settled(&self) -> bool {
        self.position.distance_to(self.target) < SETTLE_DISTANCE
            && self.velocity.x.hypot(self.velocity.y) < SETTLE_SPEED
    }
}
