//! World ↔ screen coordinate mapping.
//!
//! Screen space is what the 2D view draws in: `x` grows right and `y`
//! grows down, matching the world `z` axis. The mapping is a padded
//! translation followed by a uniform scale:
//!
//! ```text
//! screen_x = (world_x - min_x + padding) * scale
//! screen_y = (world_z - min_z + padding) * scale
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::math::{Point, Vector2};
use crate::plan::Outline;

/// Axis-aligned world bounds of a set of outlines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_z: f64,
    pub max_z: f64,
}

impl Bounds {
    /// Bounds used when no valid geometry exists.
    pub const FALLBACK: Self = Self {
        min_x: 0.0,
        max_x: 100.0,
        min_z: 0.0,
        max_z: 100.0,
    };

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_z - self.min_z
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::FALLBACK
    }
}

/// Computes the bounds of every well-formed outline.
///
/// Outlines with an empty polygon or any non-finite coordinate are
/// ignored. Returns [`Bounds::FALLBACK`] when nothing valid remains.
#[must_use]
pub fn calculate_bounds<'a, O>(outlines: impl IntoIterator<Item = &'a O>) -> Bounds
where
    O: Outline + ?Sized + 'a,
{
    let mut bounds: Option<Bounds> = None;
    let mut skipped = 0usize;
    for outline in outlines {
        let polygon = outline.floor_polygon();
        if polygon.is_empty() || !polygon.iter().all(Point::is_finite) {
            skipped += 1;
            continue;
        }
        for p in polygon {
            let b = bounds.get_or_insert(Bounds {
                min_x: p.x,
                max_x: p.x,
                min_z: p.z,
                max_z: p.z,
            });
            b.min_x = b.min_x.min(p.x);
            b.max_x = b.max_x.max(p.x);
            b.min_z = b.min_z.min(p.z);
            b.max_z = b.max_z.max(p.z);
        }
    }
    if skipped > 0 {
        debug!("bounds skipped {skipped} malformed outlines");
    }
    bounds.unwrap_or(Bounds::FALLBACK)
}

/// A position in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Maps a world point to screen space.
#[must_use]
pub fn transform_coordinates(point: Point, bounds: &Bounds, padding: f64, scale: f64) -> ScreenPoint {
    ScreenPoint::new(
        (point.x - bounds.min_x + padding) * scale,
        (point.z - bounds.min_z + padding) * scale,
    )
}

/// Exact inverse of [`transform_coordinates`]. `scale` must be positive.
#[must_use]
pub fn reverse_transform_coordinates(x: f64, y: f64, bounds: &Bounds, padding: f64, scale: f64) -> Point {
    Point::new(x / scale + bounds.min_x - padding, y / scale + bounds.min_z - padding)
}

/// View configuration shared by interactive operations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenTransform {
    pub bounds: Bounds,
    pub padding: f64,
    pub scale: f64,
}

impl Default for ScreenTransform {
    fn default() -> Self {
        Self {
            bounds: Bounds::FALLBACK,
            padding: 0.0,
            scale: 1.0,
        }
    }
}

impl ScreenTransform {
    /// Creates a transform. A zero, negative or non-finite `scale` is
    /// replaced by 1.
    #[must_use]
    pub fn new(bounds: Bounds, padding: f64, scale: f64) -> Self {
        let usable = usable_scale(scale);
        if usable.to_bits() != scale.to_bits() {
            warn!("screen transform scale {scale} is not positive, using {usable}");
        }
        Self {
            bounds,
            padding,
            scale: usable,
        }
    }

    /// Chooses the largest scale that fits `bounds` plus padding on every
    /// side into a `width` × `height` viewport.
    #[must_use]
    pub fn fit(bounds: Bounds, padding: f64, width: f64, height: f64) -> Self {
        let span_x = bounds.width() + 2.0 * padding;
        let span_z = bounds.height() + 2.0 * padding;
        let scale = if span_x > 0.0 && span_z > 0.0 && width > 0.0 && height > 0.0 {
            (width / span_x).min(height / span_z)
        } else {
            1.0
        };
        Self::new(bounds, padding, scale)
    }

    /// World → screen.
    #[must_use]
    pub fn to_screen(&self, point: Point) -> ScreenPoint {
        transform_coordinates(point, &self.bounds, self.padding, usable_scale(self.scale))
    }

    /// Screen → world.
    #[must_use]
    pub fn to_world(&self, p: ScreenPoint) -> Point {
        reverse_transform_coordinates(p.x, p.y, &self.bounds, self.padding, usable_scale(self.scale))
    }

    /// Converts a screen-space displacement to a world-space displacement.
    ///
    /// Reverse-transforms the delta and the origin and subtracts, which
    /// cancels the bounds and padding offset.
    #[must_use]
    pub fn delta_to_world(&self, dx: f64, dy: f64) -> Vector2 {
        let moved = self.to_world(ScreenPoint::new(dx, dy));
        let origin = self.to_world(ScreenPoint::default());
        origin.vector_to(moved)
    }
}

/// `scale` if it can be inverted, else 1. Fields are public and
/// deserialized, so the mapping methods check too.
fn usable_scale(scale: f64) -> f64 {
    if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        1.0
    }
}
