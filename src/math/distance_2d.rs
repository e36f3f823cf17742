use super::Point;

/// Returns the minimum distance from point `p` to the segment `a`→`b`.
#[must_use]
pub fn point_to_segment_dist(p: Point, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dz = b.z - a.z;
    let len_sq = dx * dx + dz * dz;

    if len_sq < 1e-20 {
        // Degenerate segment (zero length).
        return p.distance(a);
    }

    // Project point onto the infinite line, clamp to [0, 1].
    let t = ((p.x - a.x) * dx + (p.z - a.z) * dz) / len_sq;
    let t = t.clamp(0.0, 1.0);

    p.distance(Point::new(a.x + t * dx, a.z + t * dz))
}

/// Returns `true` if two points lie within `tolerance` of each other.
#[must_use]
pub fn points_coincide(a: Point, b: Point, tolerance: f64) -> bool {
    (a.x - b.x).abs() <= tolerance && (a.z - b.z).abs() <= tolerance
}

/// Returns `true` if two segments share both endpoints, in the same or
/// reversed order.
#[must_use]
pub fn segments_coincide(a: (Point, Point), b: (Point, Point), tolerance: f64) -> bool {
    (points_coincide(a.0, b.0, tolerance) && points_coincide(a.1, b.1, tolerance))
        || (points_coincide(a.0, b.1, tolerance) && points_coincide(a.1, b.0, tolerance))
}

/// Returns `true` if segment `inner` lies on segment `outer`.
///
/// Both endpoints of `inner` must be within `tolerance` of `outer`.
#[must_use]
pub fn segment_lies_on(inner: (Point, Point), outer: (Point, Point), tolerance: f64) -> bool {
    point_to_segment_dist(inner.0, outer.0, outer.1) <= tolerance
        && point_to_segment_dist(inner.1, outer.0, outer.1) <= tolerance
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    fn p(x: f64, z: f64) -> Point {
        Point::new(x, z)
    }

    // ── point_to_segment_dist tests ──

    #[test]
    fn segment_dist_perpendicular_projection() {
        // Point (1, 1) to segment (0,0)→(2,0). Closest at (1,0), dist = 1.
        let d = point_to_segment_dist(p(1.0, 1.0), p(0.0, 0.0), p(2.0, 0.0));
        assert!((d - 1.0).abs() < TOL, "d={d}");
    }

    #[test]
    fn segment_dist_endpoint_closest() {
        let d = point_to_segment_dist(p(-1.0, 0.0), p(0.0, 0.0), p(2.0, 0.0));
        assert!((d - 1.0).abs() < TOL, "d={d}");
    }

    #[test]
    fn segment_dist_degenerate() {
        let d = point_to_segment_dist(p(3.0, 4.0), p(0.0, 0.0), p(0.0, 0.0));
        assert!((d - 5.0).abs() < TOL, "d={d}");
    }

    // ── coincidence tests ──

    #[test]
    fn coincide_in_either_order() {
        let a = (p(100.0, 0.0), p(100.0, 80.0));
        let same = (p(100.05, 0.0), p(100.0, 79.95));
        let reversed = (p(100.0, 80.0), p(100.0, 0.0));
        let off = (p(100.0, 0.0), p(100.0, 70.0));
        assert!(segments_coincide(a, same, 0.1));
        assert!(segments_coincide(a, reversed, 0.1));
        assert!(!segments_coincide(a, off, 0.1));
    }

    #[test]
    fn partial_overlap_lies_on() {
        let outer = (p(0.0, 0.0), p(100.0, 0.0));
        assert!(segment_lies_on((p(20.0, 0.0), p(60.0, 0.0)), outer, 0.1));
        assert!(!segment_lies_on((p(20.0, 0.0), p(160.0, 0.0)), outer, 0.1));
        assert!(!segment_lies_on((p(20.0, 5.0), p(60.0, 5.0)), outer, 0.1));
    }
}
