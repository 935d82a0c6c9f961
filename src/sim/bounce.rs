//! Bouncing icon animation
//!
//! The icon travels in one of four directions inside a fixed canvas. Before
//! every move it checks the edge it is heading for, using the icon size as
//! the margin, and turns a quarter cycle on contact:
//! Left -> Up -> Right -> Down -> Left.
//!
//! Screen coordinates: origin top-left, y grows downward.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::{STEPS_PER_HALF_CANVAS, WOBBLE_DEGREES};
use crate::normalize_degrees;

/// Travel direction of the icon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Direction taken after hitting the edge this one was heading for
    pub fn turned(&self) -> Direction {
        match self {
            Direction::Left => Direction::Up,
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
        }
    }

    /// Icon rotation paired with this direction
    pub fn rotation_degrees(&self) -> i32 {
        match self {
            Direction::Left => 0,
            Direction::Up => 90,
            Direction::Right => 180,
            Direction::Down => 270,
        }
    }

    /// Unit vector in screen coordinates
    pub fn unit(&self) -> IVec2 {
        match self {
            Direction::Left => IVec2::NEG_X,
            Direction::Right => IVec2::X,
            Direction::Up => IVec2::NEG_Y,
            Direction::Down => IVec2::Y,
        }
    }
}

/// A direction change caused by an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounce {
    pub from: Direction,
    pub to: Direction,
}

/// Per-tick movement for a canvas: half the canvas in 30 ticks, at least 1 px
pub fn step_for(canvas: IVec2) -> IVec2 {
    (canvas / 2 / STEPS_PER_HALF_CANVAS).max(IVec2::ONE)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BounceAnimator {
    canvas: IVec2,
    icon: IVec2,
    step: IVec2,
    pos: IVec2,
    direction: Direction,
    rotation_degrees: i32,
    step_phase: i32,
    active: bool,
}

impl BounceAnimator {
    /// Inactive animator with the icon in the bottom-right corner, heading left.
    ///
    /// The icon must fit the canvas and be at least as large as one step
    /// (`Settings::validate`).
    pub fn new(canvas: IVec2, icon: IVec2) -> Self {
        let step = step_for(canvas);
        debug_assert!(icon.cmpge(IVec2::ONE).all());
        debug_assert!(icon.cmple(canvas).all());
        debug_assert!(step.cmple(icon).all());

        Self {
            canvas,
            icon,
            step,
            pos: canvas - icon,
            direction: Direction::Left,
            rotation_degrees: Direction::Left.rotation_degrees(),
            step_phase: WOBBLE_DEGREES,
            active: false,
        }
    }

    /// Top-left corner of the icon
    pub fn pos(&self) -> IVec2 {
        self.pos
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn rotation_degrees(&self) -> i32 {
        self.rotation_degrees
    }

    pub fn step_phase(&self) -> i32 {
        self.step_phase
    }

    /// Rotation to draw: base rotation plus wobble, in [0, 360)
    pub fn rendered_rotation(&self) -> i32 {
        normalize_degrees(self.rotation_degrees + self.step_phase)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn canvas(&self) -> IVec2 {
        self.canvas
    }

    pub fn icon(&self) -> IVec2 {
        self.icon
    }

    /// Largest legal top-left position
    pub fn max_pos(&self) -> IVec2 {
        self.canvas - self.icon
    }

    /// Whether moving in `direction` would reach into the icon-wide margin
    /// at that edge
    fn blocked(&self, direction: Direction) -> bool {
        let max = self.max_pos();
        match direction {
            Direction::Left => self.pos.x - self.icon.x < 0,
            Direction::Right => self.pos.x + self.icon.x > max.x,
            Direction::Up => self.pos.y - self.icon.y < 0,
            Direction::Down => self.pos.y + self.icon.y > max.y,
        }
    }

    /// Advance one tick: collide, turn, move, wobble.
    pub fn advance(&mut self) -> Option<Bounce> {
        if !self.active {
            return None;
        }

        let from = self.direction;
        // On a canvas narrower than three icons two edges can block at once;
        // keep turning, never more than a full cycle.
        for _ in 0..4 {
            if !self.blocked(self.direction) {
                break;
            }
            self.direction = self.direction.turned();
            self.rotation_degrees = self.direction.rotation_degrees();
        }

        if !self.blocked(self.direction) {
            self.pos += self.direction.unit() * self.step;
        }
        debug_assert!(self.pos.cmpge(IVec2::ZERO).all());
        debug_assert!(self.pos.cmple(self.max_pos()).all());

        self.step_phase = -self.step_phase;

        if self.direction != from {
            log::debug!("Icon bounced {:?} -> {:?} at {}", from, self.direction, self.pos);
            Some(Bounce {
                from,
                to: self.direction,
            })
        } else {
            None
        }
    }

    /// Stop and return the icon to the bottom-right corner, heading left
    pub fn reset(&mut self) {
        self.active = false;
        self.pos = self.max_pos();
        self.direction = Direction::Left;
        self.rotation_degrees = Direction::Left.rotation_degrees();
        self.step_phase = WOBBLE_DEGREES;
    }
}
