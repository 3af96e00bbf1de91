//! Pointer avoidance for the free-roaming NO control.
//!
//! The control flees along the pointer-to-control direction whenever the
//! pointer comes inside the danger radius. Targets are clamped into the
//! viewport; a target that had to be clamped is replaced by a jump back
//! toward the middle of the screen so the control never pins itself to an
//! edge. Approaching from the YES side (hover suppression) never triggers
//! an escape, which is how the control stays catchable.

use std::f64::consts::TAU;

use rand::Rng;

use super::copy::TAUNTS;

pub const HALF_WIDTH: f64 = 90.0;
pub const HALF_HEIGHT: f64 = 28.0;
pub const EDGE_MARGIN: f64 = 8.0;
pub const DANGER_RADIUS: f64 = 170.0;

pub const JUMP_MIN: f64 = 170.0;
pub const JUMP_SPREAD: f64 = 75.0;
/// Full width of the jitter band; each axis moves by up to half of it.
pub const JITTER: f64 = 55.0;
pub const INWARD_JUMP_MIN: f64 = 130.0;
pub const INWARD_JUMP_SPREAD: f64 = 90.0;
pub const INWARD_JITTER: f64 = 36.0;
pub const WALL_EPSILON: f64 = 0.1;
pub const TILT_DEGREES: f64 = 6.0;

/// Resting spot: right of center, a little below the middle.
pub const RESTING_OFFSET_X: f64 = 140.0;
pub const RESTING_Y_RATIO: f64 = 0.55;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Allowed range for the control's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn for_viewport(viewport: Viewport) -> Self {
        Self {
            min_x: EDGE_MARGIN,
            max_x: (viewport.width - EDGE_MARGIN - HALF_WIDTH * 2.0).max(EDGE_MARGIN),
            min_y: EDGE_MARGIN,
            max_y: (viewport.height - EDGE_MARGIN - HALF_HEIGHT * 2.0).max(EDGE_MARGIN),
        }
    }

    pub fn clamp(&self, p: Point) -> Point {
        Point::new(p.x.clamp(self.min_x, self.max_x), p.y.clamp(self.min_y, self.max_y))
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }
}

/// Result of a successful escape, for the renderer and the toast layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Escape {
    pub position: Point,
    pub tilt: f64,
    pub taunt: &'static str,
}

/// Result of the first hover over the inline control.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Activation {
    pub taunt: &'static str,
    pub escape: Option<Escape>,
}

#[derive(Debug, Clone)]
pub struct DodgeEngine {
    viewport: Viewport,
    bounds: Bounds,
    position: Point,
    tilt: f64,
    active: bool,
    hovering_accept: bool,
    moves: u32,
}

impl DodgeEngine {
    pub fn new(viewport: Viewport) -> Self {
        let bounds = Bounds::for_viewport(viewport);
        Self {
            viewport,
            bounds,
            position: Self::resting_position(viewport, &bounds),
            tilt: 0.0,
            active: false,
            hovering_accept: false,
            moves: 0,
        }
    }

    fn resting_position(viewport: Viewport, bounds: &Bounds) -> Point {
        bounds.clamp(Point::new(
            viewport.width * 0.5 + RESTING_OFFSET_X,
            viewport.height * RESTING_Y_RATIO,
        ))
    }

    /// Top-left corner of the control.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn center(&self) -> Point {
        Point::new(self.position.x + HALF_WIDTH, self.position.y + HALF_HEIGHT)
    }

    pub fn tilt(&self) -> f64 {
        self.tilt
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// True once the control has escaped at least once since the last reset.
    pub fn is_runaway(&self) -> bool {
        self.moves > 0
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn is_hovering_accept(&self) -> bool {
        self.hovering_accept
    }

    pub fn set_hovering_accept(&mut self, hovering: bool) {
        self.hovering_accept = hovering;
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.bounds = Bounds::for_viewport(viewport);
        self.position = self.bounds.clamp(self.position);
    }

    /// Back to the inline, inactive state used at the start of a question.
    pub fn reset(&mut self) {
        self.active = false;
        self.moves = 0;
        self.tilt = 0.0;
        self.hovering_accept = false;
        self.position = Self::resting_position(self.viewport, &self.bounds);
    }

    /// First hover over the inline control: take over its on-screen spot,
    /// start roaming, and try to escape right away.
    pub fn activate(&mut self, anchor: Point, pointer: Point, rng: &mut impl Rng) -> Activation {
        self.position = self.bounds.clamp(anchor);
        self.active = true;
        let taunt = pick_taunt(rng);
        let escape = self.evaluate_proximity(pointer, rng);
        Activation { taunt, escape }
    }

    pub fn evaluate_proximity(&mut self, pointer: Point, rng: &mut impl Rng) -> Option<Escape> {
        if !self.active || self.hovering_accept {
            return None;
        }

        let center = self.center();
        let dx = center.x - pointer.x;
        let dy = center.y - pointer.y;
        let distance = dx.hypot(dy);
        if distance > DANGER_RADIUS {
            return None;
        }

        let (ux, uy) = if distance == 0.0 {
            let angle = rng.random_range(0.0..TAU);
            (angle.cos(), angle.sin())
        } else {
            (dx / distance, dy / distance)
        };

        let jump = JUMP_MIN + rng.random::<f64>() * JUMP_SPREAD;
        let next_center = Point::new(
            center.x + ux * jump + jitter(rng, JITTER),
            center.y + uy * jump + jitter(rng, JITTER),
        );
        let raw = Point::new(next_center.x - HALF_WIDTH, next_center.y - HALF_HEIGHT);
        let mut next = self.bounds.clamp(raw);

        let hit_wall = (next.x - raw.x).abs() > WALL_EPSILON || (next.y - raw.y).abs() > WALL_EPSILON;
        if hit_wall {
            next = self.jump_inward(next, rng);
        }

        self.position = next;
        self.tilt = if ux > 0.0 { TILT_DEGREES } else { -TILT_DEGREES };
        self.moves += 1;

        Some(Escape {
            position: next,
            tilt: self.tilt,
            taunt: pick_taunt(rng),
        })
    }

    fn jump_inward(&self, from: Point, rng: &mut impl Rng) -> Point {
        let middle = self.viewport.center();
        let dx = middle.x - (from.x + HALF_WIDTH);
        let dy = middle.y - (from.y + HALF_HEIGHT);
        let len = match dx.hypot(dy) {
            l if l == 0.0 => 1.0,
            l => l,
        };
        let jump = INWARD_JUMP_MIN + rng.random::<f64>() * INWARD_JUMP_SPREAD;
        self.bounds.clamp(Point::new(
            from.x + dx / len * jump + jitter(rng, INWARD_JITTER),
            from.y + dy / len * jump + jitter(rng, INWARD_JITTER),
        ))
    }
}

/// Uniform in `[-width / 2, width / 2)`.
fn jitter(rng: &mut impl Rng, width: f64) -> f64 {
    (rng.random::<f64>() - 0.5) * width
}

pub fn pick_taunt(rng: &mut impl Rng) -> &'static str {
    TAUNTS[rng.random_range(0..TAUNTS.len())]
}
