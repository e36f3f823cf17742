use super::{Point, Vector2, TOLERANCE};
use crate::error::{GeometryError, Result};

/// Computes the signed area of a closed polygon (shoelace formula).
///
/// Positive for counter-clockwise winding in the `(x, z)` plane,
/// negative for clockwise.
#[must_use]
pub fn signed_area(points: &[Point]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].z - points[j].x * points[i].z;
    }
    sum * 0.5
}

/// Unsigned polygon area.
#[must_use]
pub fn polygon_area(points: &[Point]) -> f64 {
    signed_area(points).abs()
}

/// Returns `true` if the polygon winds counter-clockwise.
#[must_use]
pub fn is_ccw(points: &[Point]) -> bool {
    signed_area(points) > 0.0
}

/// Axis-aligned extent of a point set as `(width, height)`.
///
/// `width` spans the `x` axis, `height` spans the `z` axis.
#[must_use]
pub fn extent(points: &[Point]) -> (f64, f64) {
    let Some(first) = points.first() else {
        return (0.0, 0.0);
    };
    let (mut min_x, mut max_x, mut min_z, mut max_z) = (first.x, first.x, first.z, first.z);
    for p in &points[1..] {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_z = min_z.min(p.z);
        max_z = max_z.max(p.z);
    }
    (max_x - min_x, max_z - min_z)
}

/// Even-odd point-in-polygon test.
///
/// Points exactly on the boundary may report either side.
#[must_use]
pub fn contains_point(polygon: &[Point], p: Point) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (a, b) = (polygon[i], polygon[j]);
        if (a.z > p.z) != (b.z > p.z) {
            let x_cross = (b.x - a.x) * (p.z - a.z) / (b.z - a.z) + a.x;
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Returns edge `index` of a closed polygon as `(start, end)`.
///
/// # Errors
///
/// Returns `GeometryError::IndexOutOfRange` if `index` is not a valid edge.
pub fn edge(points: &[Point], index: usize) -> Result<(Point, Point)> {
    let n = points.len();
    if index >= n || n < 2 {
        return Err(GeometryError::IndexOutOfRange { index, len: n }.into());
    }
    Ok((points[index], points[(index + 1) % n]))
}

/// Computes the normalized direction from point `a` to point `b`.
///
/// # Errors
///
/// Returns `GeometryError::ZeroVector` if the segment has zero length.
pub fn segment_direction(a: Point, b: Point) -> Result<Vector2> {
    let d = a.vector_to(b);
    let len = d.norm();
    if len < TOLERANCE {
        return Err(GeometryError::ZeroVector.into());
    }
    Ok(d / len)
}

/// Returns the left-pointing normal of a direction vector.
#[must_use]
pub fn left_normal(dir: Vector2) -> Vector2 {
    Vector2::new(-dir.y, dir.x)
}

/// Returns the normal of edge `index` pointing away from the polygon interior.
///
/// # Errors
///
/// Returns an error if the index is invalid or the edge has zero length.
pub fn outward_normal(points: &[Point], index: usize) -> Result<Vector2> {
    let (a, b) = edge(points, index)?;
    let left = left_normal(segment_direction(a, b)?);
    // Interior lies to the left of a counter-clockwise edge.
    Ok(if is_ccw(points) { -left } else { left })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn rect() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 80.0),
            Point::new(0.0, 80.0),
        ]
    }

    fn l_shape() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(60.0, 0.0),
            Point::new(60.0, 20.0),
            Point::new(25.0, 20.0),
            Point::new(25.0, 50.0),
            Point::new(0.0, 50.0),
        ]
    }

    #[test]
    fn signed_area_orientation() {
        let pts = rect();
        assert!((signed_area(&pts) - 8000.0).abs() < TOLERANCE);
        let rev: Vec<Point> = pts.iter().rev().copied().collect();
        assert!((signed_area(&rev) + 8000.0).abs() < TOLERANCE);
        assert!(is_ccw(&pts));
        assert!(!is_ccw(&rev));
    }

    #[test]
    fn signed_area_degenerate() {
        assert!(signed_area(&[]).abs() < TOLERANCE);
        assert!(signed_area(&[Point::new(1.0, 1.0), Point::new(2.0, 2.0)]).abs() < TOLERANCE);
    }

    #[test]
    fn area_invariant_under_rotation_of_start_vertex() {
        let pts = l_shape();
        let base = polygon_area(&pts);
        for k in 1..pts.len() {
            let mut rotated = pts[k..].to_vec();
            rotated.extend_from_slice(&pts[..k]);
            assert!((polygon_area(&rotated) - base).abs() < 1e-9, "k={k}");
        }
    }

    #[test]
    fn area_invariant_under_translation() {
        let pts = l_shape();
        let base = polygon_area(&pts);
        for (dx, dz) in [(13.0, -7.0), (-1000.5, 250.25), (1e4, 1e4)] {
            let moved: Vec<Point> = pts.iter().map(|p| Point::new(p.x + dx, p.z + dz)).collect();
            assert!((polygon_area(&moved) - base).abs() < 1e-6);
        }
    }

    #[test]
    fn extent_of_rect() {
        let (w, h) = extent(&rect());
        assert!((w - 100.0).abs() < TOLERANCE);
        assert!((h - 80.0).abs() < TOLERANCE);
        assert_eq!(extent(&[]), (0.0, 0.0));
    }

    #[test]
    fn containment() {
        let pts = l_shape();
        assert!(contains_point(&pts, Point::new(10.0, 10.0)));
        assert!(contains_point(&pts, Point::new(10.0, 40.0)));
        assert!(!contains_point(&pts, Point::new(40.0, 40.0)));
        assert!(!contains_point(&pts, Point::new(-1.0, 5.0)));
        assert!(!contains_point(&pts[..2], Point::new(0.5, 0.0)));
    }

    #[test]
    fn segment_direction_zero_length() {
        let a = Point::new(1.0, 1.0);
        assert!(segment_direction(a, a).is_err());
        let d = segment_direction(Point::new(0.0, 0.0), Point::new(3.0, 4.0)).unwrap();
        assert!((d.x - 0.6).abs() < TOLERANCE);
        assert!((d.y - 0.8).abs() < TOLERANCE);
    }

    #[test]
    fn outward_normal_points_away_from_interior() {
        let pts = rect();
        // Edge 1 is the right side x = 100.
        let n = outward_normal(&pts, 1).unwrap();
        assert!((n.x - 1.0).abs() < TOLERANCE);
        let rev: Vec<Point> = pts.iter().rev().copied().collect();
        // Reversed edge 0 runs (0,80) -> (100,80), the top side.
        let n = outward_normal(&rev, 0).unwrap();
        assert!((n.y - 1.0).abs() < TOLERANCE);
        assert!(outward_normal(&pts, 9).is_err());
    }
}
