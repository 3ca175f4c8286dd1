//! The square battle platform

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Platform geometry and surface physics, fixed for a whole match
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    /// Side length of the square platform, centered on the origin
    pub size: f32,
    /// Surface friction coefficient
    pub friction: f32,
    /// Gravitational acceleration
    pub gravity: f32,
}

impl Arena {
    pub fn new(size: f32, friction: f32, gravity: f32) -> Self {
        Self {
            size,
            friction,
            gravity,
        }
    }

    /// Distance from the center to each edge
    #[inline]
    pub fn half_extent(&self) -> f32 {
        self.size / 2.0
    }

    /// True while a point is above the platform (edges count as on)
    #[inline]
    pub fn is_over_platform(&self, pos: Vec3) -> bool {
        let half = self.half_extent();
        pos.x.abs() <= half && pos.y.abs() <= half
    }

    /// Deceleration friction applies to a sliding vehicle
    #[inline]
    pub fn friction_decel(&self) -> f32 {
        self.friction * self.gravity
    }

    /// Radius of the starting ring competitors are placed on
    #[inline]
    pub fn spawn_radius(&self) -> f32 {
        self.size / 4.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_bounds() {
        let arena = Arena::new(20.0, 0.75, 9.8);
        assert!(arena.is_over_platform(Vec3::new(10.0, -10.0, 0.0)));
        assert!(!arena.is_over_platform(Vec3::new(10.01, 0.0, 0.0)));
        assert!(!arena.is_over_platform(Vec3::new(0.0, -12.0, 0.0)));
    }

    #[test]
    fn test_friction_decel() {
        let arena = Arena::new(20.0, 0.5, 10.0);
        assert!((arena.friction_decel() - 5.0).abs() < 1e-6);
    }
}
