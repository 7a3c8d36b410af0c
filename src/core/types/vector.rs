//! Fixed-size float vector value types and component-wise math

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

/// A pair of 32-bit floats, laid out as two consecutive float32 fields.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

/// A triple of 32-bit floats, laid out as three consecutive float32 fields.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Vector2 { x, y }
    }
}

impl Vector3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Vector3 { x, y, z }
    }
}

impl Add for Vector2 {
    type Output = Vector2;

    fn add(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector2 {
    type Output = Vector2;

    fn sub(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Component-wise product.
impl Mul for Vector2 {
    type Output = Vector2;

    fn mul(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x * rhs.x, self.y * rhs.y)
    }
}

impl Div for Vector2 {
    type Output = Vector2;

    fn div(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.x / rhs.x, self.y / rhs.y)
    }
}

impl Add for Vector3 {
    type Output = Vector3;

    fn add(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3 {
    type Output = Vector3;

    fn sub(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// Component-wise product.
impl Mul for Vector3 {
    type Output = Vector3;

    fn mul(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x * rhs.x, self.y * rhs.y, self.z * rhs.z)
    }
}

impl Div for Vector3 {
    type Output = Vector3;

    fn div(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x / rhs.x, self.y / rhs.y, self.z / rhs.z)
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector2_arithmetic() {
        let a = Vector2::new(1.0, 2.0);
        let b = Vector2::new(4.0, 8.0);

        assert_eq!(a + b, Vector2::new(5.0, 10.0));
        assert_eq!(b - a, Vector2::new(3.0, 6.0));
        assert_eq!(a * b, Vector2::new(4.0, 16.0));
        assert_eq!(b / a, Vector2::new(4.0, 4.0));
    }

    #[test]
    fn test_vector3_arithmetic() {
        let a = Vector3::new(1.0, 2.0, 4.0);
        let b = Vector3::new(2.0, 4.0, 8.0);

        assert_eq!(a + b, Vector3::new(3.0, 6.0, 12.0));
        assert_eq!(b - a, Vector3::new(1.0, 2.0, 4.0));
        assert_eq!(a * b, Vector3::new(2.0, 8.0, 32.0));
        assert_eq!(b / a, Vector3::new(2.0, 2.0, 2.0));
    }

    #[test]
    fn test_multiply_is_a_product_not_a_sum() {
        let a = Vector3::new(3.0, 3.0, 3.0);
        let b = Vector3::new(2.0, 2.0, 2.0);
        assert_eq!(a * b, Vector3::new(6.0, 6.0, 6.0));
        assert_ne!(a * b, a + b);
    }

    #[test]
    fn test_default_is_zero() {
        assert_eq!(Vector2::default(), Vector2::new(0.0, 0.0));
        assert_eq!(Vector3::default(), Vector3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(Vector3::new(1.0, 2.5, -3.0).to_string(), "(1, 2.5, -3)");
    }
}
