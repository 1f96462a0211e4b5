//! Ground-plane geometry shared by the path planner and movement.

use serde::{Deserialize, Serialize};

/// Point or direction on the ground plane (x right, z forward)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub z: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, z: 0.0 };

    pub fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }

    /// Unit vector pointing along `angle` radians, measured from +x toward +z
    pub fn from_angle(angle: f32) -> Self {
        Self {
            x: angle.cos(),
            z: angle.sin(),
        }
    }

    pub fn distance_squared(&self, other: &Self) -> f32 {
        let dx = self.x - other.x;
        let dz = self.z - other.z;
        dx * dx + dz * dz
    }

    pub fn distance(&self, other: &Self) -> f32 {
        self.distance_squared(other).sqrt()
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.z * self.z).sqrt()
    }

    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > 0.0 {
            Self {
                x: self.x / len,
                z: self.z / len,
            }
        } else {
            Self::ZERO
        }
    }

    /// Yaw that faces along this direction, `atan2(x, z)`.
    ///
    /// Returns `None` for the zero vector so callers keep their old heading.
    pub fn yaw(&self) -> Option<f32> {
        if self.x == 0.0 && self.z == 0.0 {
            None
        } else {
            Some(self.x.atan2(self.z))
        }
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            z: self.z + other.z,
        }
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            z: self.z - other.z,
        }
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            z: self.z * scalar,
        }
    }
}

/// Axis-aligned rectangle the creature may wander in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WalkBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl Default for WalkBounds {
    fn default() -> Self {
        Self {
            min_x: -2.0,
            max_x: 2.0,
            min_z: -2.0,
            max_z: 2.0,
        }
    }
}

impl WalkBounds {
    pub fn new(min_x: f32, max_x: f32, min_z: f32, max_z: f32) -> Self {
        Self {
            min_x,
            max_x,
            min_z,
            max_z,
        }
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn depth(&self) -> f32 {
        self.max_z - self.min_z
    }

    pub fn contains(&self, point: &Vec2) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.z >= self.min_z
            && point.z <= self.max_z
    }

    /// Clamp each axis independently into the rectangle
    pub fn clamp(&self, point: Vec2) -> Vec2 {
        Vec2 {
            x: point.x.clamp(self.min_x, self.max_x),
            z: point.z.clamp(self.min_z, self.max_z),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec2_operations() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(4.0, 6.0);

        let sum = a + b;
        assert_eq!(sum.x, 5.0);
        assert_eq!(sum.z, 8.0);

        let diff = b - a;
        assert_eq!(diff.x, 3.0);
        assert_eq!(diff.z, 4.0);
        assert_eq!(diff.length(), 5.0);

        let scaled = a * 2.0;
        assert_eq!(scaled.z, 4.0);
    }

    #[test]
    fn test_vec2_normalize() {
        let n = Vec2::new(3.0, 4.0).normalize();
        assert!((n.length() - 1.0).abs() < 0.001);
        assert_eq!(Vec2::ZERO.normalize(), Vec2::ZERO);
    }

    #[test]
    fn test_yaw_faces_travel_direction() {
        assert_eq!(Vec2::new(0.0, 1.0).yaw(), Some(0.0));
        let right = Vec2::new(1.0, 0.0).yaw().unwrap();
        assert!((right - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert_eq!(Vec2::ZERO.yaw(), None);
    }

    #[test]
    fn test_bounds_clamp() {
        let bounds = WalkBounds::default();
        let clamped = bounds.clamp(Vec2::new(5.0, -3.0));
        assert_eq!(clamped, Vec2::new(2.0, -2.0));
        assert!(bounds.contains(&clamped));
        assert!(!bounds.contains(&Vec2::new(2.1, 0.0)));
    }
}
