pub mod distance_2d;
pub mod point;
pub mod polygon_2d;

pub use point::Point;

/// 2D vector type used for directions and normals on the floor plane.
///
/// `x` maps to the world `x` axis and `y` maps to the world `z` axis.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Internal distance units per foot. A rendered foot value is `unit / 10`.
pub const UNITS_PER_FOOT: f64 = 10.0;

/// Quantization step applied to vertex positions during interactive edits.
pub const SNAP_GRID: f64 = 5.0;

/// Converts internal units to feet.
#[must_use]
pub fn units_to_feet(units: f64) -> f64 {
    units / UNITS_PER_FOOT
}

/// Converts feet to internal units.
#[must_use]
pub fn feet_to_units(feet: f64) -> f64 {
    feet * UNITS_PER_FOOT
}

/// Rounds a coordinate to the nearest multiple of [`SNAP_GRID`].
#[must_use]
pub fn snap_to_grid(value: f64) -> f64 {
    (value / SNAP_GRID).round() * SNAP_GRID
}

/// Snaps both axes of a point to the grid.
#[must_use]
pub fn snap_point(p: Point) -> Point {
    Point::new(snap_to_grid(p.x), snap_to_grid(p.z))
}
