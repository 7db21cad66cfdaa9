//! Common geometric value types shared by every entity group.

use serde::{Deserialize, Serialize};

/// 3D vector in facility units (metres for lengths, degrees for orientations).
///
/// Serialized as a 3-element array `[x, y, z]`, which is the shape every
/// recipe consumer expects.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
    pub const ONE: Self = Self {
        x: 1.0,
        y: 1.0,
        z: 1.0,
    };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Uniform vector, used for scale factors.
    pub const fn splat(v: f64) -> Self {
        Self { x: v, y: v, z: v }
    }

    /// Yaw-only rotation (degrees about Z).
    pub const fn yaw(degrees: f64) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: degrees,
        }
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from(a: [f64; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }
}

impl From<Vec3> for [f64; 3] {
    fn from(v: Vec3) -> Self {
        v.to_array()
    }
}

impl std::ops::Add for Vec3 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl std::ops::Mul<f64> for Vec3 {
    type Output = Self;
    fn mul(self, scalar: f64) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

/// Axis-aligned rectangle in the 2D coordinates of a facility face.
///
/// `u` runs along the face's horizontal axis, `v` along its vertical axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub u0: f64,
    pub v0: f64,
    pub u1: f64,
    pub v1: f64,
}

impl Rect {
    pub fn new(u0: f64, v0: f64, u1: f64, v1: f64) -> Self {
        Self { u0, v0, u1, v1 }
    }

    pub fn width(&self) -> f64 {
        self.u1 - self.u0
    }

    pub fn height(&self) -> f64 {
        self.v1 - self.v0
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn center_u(&self) -> f64 {
        0.5 * (self.u0 + self.u1)
    }

    pub fn center_v(&self) -> f64 {
        0.5 * (self.v0 + self.v1)
    }

    /// Area shared with `other`; touching edges share nothing.
    pub fn overlap_area(&self, other: &Rect) -> f64 {
        let du = self.u1.min(other.u1) - self.u0.max(other.u0);
        let dv = self.v1.min(other.v1) - self.v0.max(other.v0);
        if du <= 0.0 || dv <= 0.0 {
            0.0
        } else {
            du * dv
        }
    }

    pub fn contains(&self, other: &Rect) -> bool {
        other.u0 >= self.u0 && other.u1 <= self.u1 && other.v0 >= self.v0 && other.v1 <= self.v1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec3_serializes_as_array() {
        let v = Vec3::new(1.0, 2.5, -3.0);
        assert_eq!(serde_json::to_string(&v).unwrap(), "[1.0,2.5,-3.0]");
        let back: Vec3 = serde_json::from_str("[1.0,2.5,-3.0]").unwrap();
        assert_eq!(back, v);
    }

    #[test]
    fn vec3_scaling_halves() {
        assert_eq!(Vec3::new(10.0, 16.0, 8.0) * 0.5, Vec3::new(5.0, 8.0, 4.0));
    }

    #[test]
    fn rect_overlap_ignores_shared_edges() {
        let a = Rect::new(0.0, 0.0, 1.0, 1.0);
        let b = Rect::new(1.0, 0.0, 2.0, 1.0);
        assert_eq!(a.overlap_area(&b), 0.0);
        let c = Rect::new(0.5, 0.5, 2.0, 2.0);
        assert!((a.overlap_area(&c) - 0.25).abs() < 1e-12);
    }
}
