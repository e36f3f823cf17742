use serde::{Deserialize, Serialize};

use super::Vector2;

/// A coordinate on the horizontal world plane, in internal units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub z: f64,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub fn new(x: f64, z: f64) -> Self {
        Self { x, z }
    }

    /// Returns `true` if both coordinates are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.z.is_finite()
    }

    /// Returns the vector from the origin to this point.
    #[must_use]
    pub fn to_vector(self) -> Vector2 {
        Vector2::new(self.x, self.z)
    }

    /// Returns this point displaced by `v`.
    #[must_use]
    pub fn offset(self, v: Vector2) -> Self {
        Self::new(self.x + v.x, self.z + v.y)
    }

    /// Returns the vector from `self` to `other`.
    #[must_use]
    pub fn vector_to(self, other: Point) -> Vector2 {
        Vector2::new(other.x - self.x, other.z - self.z)
    }

    /// Euclidean distance between two points.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        self.vector_to(other).norm()
    }
}

impl From<Vector2> for Point {
    fn from(v: Vector2) -> Self {
        Self::new(v.x, v.y)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_x_and_z_keys() {
        let json = serde_json::to_string(&Point::new(1.5, -2.0)).unwrap();
        assert_eq!(json, r#"{"x":1.5,"z":-2.0}"#);
    }

    #[test]
    fn vector_helpers() {
        let a = Point::new(1.0, 1.0);
        let b = Point::new(4.0, 5.0);
        assert!((a.distance(b) - 5.0).abs() < 1e-12);
        let moved = a.offset(a.vector_to(b));
        assert_eq!(moved, b);
    }

    #[test]
    fn non_finite_detection() {
        assert!(Point::new(0.0, 3.0).is_finite());
        assert!(!Point::new(f64::NAN, 3.0).is_finite());
        assert!(!Point::new(0.0, f64::INFINITY).is_finite());
    }
}
