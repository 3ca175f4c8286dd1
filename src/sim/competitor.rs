//! Competitors: one bit car on the platform plus who drives it

use std::sync::Arc;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::catalog::Archetype;

/// The four driving inputs, settable in any combination
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub accelerate: bool,
    pub brake: bool,
    pub turn_left: bool,
    pub turn_right: bool,
}

impl Controls {
    pub const NONE: Self = Self {
        accelerate: false,
        brake: false,
        turn_left: false,
        turn_right: false,
    };

    /// Build from the `[accelerate, brake, left, right]` bit layout input devices use
    pub fn from_bits(bits: [bool; 4]) -> Self {
        Self {
            accelerate: bits[0],
            brake: bits[1],
            turn_left: bits[2],
            turn_right: bits[3],
        }
    }

    pub fn bits(&self) -> [bool; 4] {
        [self.accelerate, self.brake, self.turn_left, self.turn_right]
    }
}

/// Whether a competitor is still in the match
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Alive,
    /// Fell past the kill depth; state is frozen
    Dead,
}

/// Who drives a competitor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Origin {
    /// Keyboard player reading the given input slot
    Human { slot: usize },
    Autopilot,
}

impl Origin {
    pub fn is_human(&self) -> bool {
        matches!(self, Origin::Human { .. })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Competitor {
    pub name: String,
    pub origin: Origin,
    pub archetype: Arc<Archetype>,
    pub position: Vec3,
    pub velocity: Vec3,
    /// Unit facing direction on the platform plane
    pub heading: Vec2,
    pub status: Status,
    /// Inputs applied on the next kinematics update
    pub controls: Controls,
}

impl Competitor {
    /// A stationary competitor; `heading` is normalized here
    pub fn new(
        name: impl Into<String>,
        origin: Origin,
        archetype: Arc<Archetype>,
        position: Vec3,
        heading: Vec2,
    ) -> Self {
        Self {
            name: name.into(),
            origin,
            archetype,
            position,
            velocity: Vec3::ZERO,
            heading: heading.try_normalize().unwrap_or(Vec2::X),
            status: Status::Alive,
            controls: Controls::NONE,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.status == Status::Alive
    }

    /// Heading as a 3-vector on the platform plane
    #[inline]
    pub fn heading3(&self) -> Vec3 {
        self.heading.extend(0.0)
    }

    /// Current speed over ground and through the air
    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    #[inline]
    pub fn momentum(&self) -> Vec3 {
        self.velocity * self.archetype.mass()
    }
}
