use crate::math::polygon_2d::{is_ccw, left_normal, polygon_area, segment_direction};
use crate::math::{Point, Vector2, TOLERANCE};
use crate::plan::{Room, Wall, WallType};

use super::{WallOptions, MIN_EDGE_LENGTH};

/// Corner cut distance for one end of a wall.
///
/// `corner_angle` is the interior angle at the shared vertex, in radians.
/// The raw miter distance `half_width / sin(angle / 2)` is clamped to
/// `[half_width, length / 3]`. As the angle approaches zero the raw value
/// is unbounded, so a vanishing sine goes straight to the upper clamp
/// instead of dividing.
#[must_use]
pub fn corner_cut(corner_angle: f64, half_width: f64, length: f64) -> f64 {
    let upper = length / 3.0;
    let s = (corner_angle * 0.5).sin().abs();
    let raw = if s < TOLERANCE {
        upper
    } else {
        half_width / s
    };
    // `max` then `min`: the upper clamp wins when `length / 3 < half_width`.
    raw.max(half_width).min(upper)
}

/// Interior angle at a vertex between the incoming direction `d_in` and
/// the outgoing direction `d_out`.
#[must_use]
pub fn corner_angle(d_in: Vector2, d_out: Vector2) -> f64 {
    (-d_in).dot(&d_out).clamp(-1.0, 1.0).acos()
}

/// Builds one wall per non-degenerate edge of a room outline.
///
/// Each wall starts as two rails offset half the thickness to either side
/// of the edge. At every corner the outer rail is advanced and the inner
/// rail retracted by the corner cut (reversed at reflex corners), giving a
/// mitered quadrilateral. With mitering disabled the wall polygon is the
/// raw edge.
#[must_use]
pub fn build_room_walls(room: &Room, options: &WallOptions) -> Vec<Wall> {
    let pts = &room.floor_polygon;
    let n = pts.len();
    if n < 2 {
        return Vec::new();
    }
    let half = options.wall_thickness * 0.5;
    // Degenerate outlines have no winding; treat them as counter-clockwise.
    let ccw = polygon_area(pts) < TOLERANCE || is_ccw(pts);

    let mut walls = Vec::with_capacity(n);
    for i in 0..n {
        let start = pts[i];
        let end = pts[(i + 1) % n];
        let length = start.distance(end);
        if length < MIN_EDGE_LENGTH {
            continue;
        }
        let Ok(dir) = segment_direction(start, end) else {
            continue;
        };

        let floor_polygon = if options.miter_corners {
            let prev = neighbour_direction(pts, i, Step::Back).unwrap_or(dir);
            let next = neighbour_direction(pts, i, Step::Forward).unwrap_or(dir);
            mitered_body(start, end, dir, prev, next, half, ccw)
        } else {
            vec![start, end]
        };

        walls.push(Wall {
            id: format!("wall-{}-{i}", room.id),
            floor_polygon,
            parent_room_id: Some(room.id.clone()),
            shared_with: Vec::new(),
            wall_type: WallType::Exterior,
            length,
            width: options.wall_thickness,
            original_line: [start, end],
            has_mitered_corners: options.miter_corners,
        });
    }
    walls
}

#[derive(Clone, Copy)]
enum Step {
    Back,
    Forward,
}

/// Direction of the nearest non-degenerate edge before or after edge `i`.
fn neighbour_direction(pts: &[Point], i: usize, step: Step) -> Option<Vector2> {
    let n = pts.len();
    for k in 1..n {
        let j = match step {
            Step::Back => (i + n - k) % n,
            Step::Forward => (i + k) % n,
        };
        let (a, b) = (pts[j], pts[(j + 1) % n]);
        if a.distance(b) >= MIN_EDGE_LENGTH {
            return segment_direction(a, b).ok();
        }
    }
    None
}

fn mitered_body(
    start: Point,
    end: Point,
    dir: Vector2,
    prev: Vector2,
    next: Vector2,
    half: f64,
    ccw: bool,
) -> Vec<Point> {
    let length = start.distance(end);
    let outward = if ccw { -left_normal(dir) } else { left_normal(dir) };

    let outer_start = start.offset(outward * half);
    let outer_end = end.offset(outward * half);
    let inner_start = start.offset(-outward * half);
    let inner_end = end.offset(-outward * half);

    let cut_start = corner_cut(corner_angle(prev, dir), half, length);
    let cut_end = corner_cut(corner_angle(dir, next), half, length);

    // +1 advances the outer rail past the corner, -1 pulls it back.
    let start_sign = if is_convex(prev, dir, ccw) { 1.0 } else { -1.0 };
    let end_sign = if is_convex(dir, next, ccw) { 1.0 } else { -1.0 };

    vec![
        outer_start.offset(-dir * (cut_start * start_sign)),
        outer_end.offset(dir * (cut_end * end_sign)),
        inner_end.offset(-dir * (cut_end * end_sign)),
        inner_start.offset(dir * (cut_start * start_sign)),
    ]
}

fn is_convex(d_in: Vector2, d_out: Vector2, ccw: bool) -> bool {
    let cross = d_in.x * d_out.y - d_in.y * d_out.x;
    if cross.abs() < TOLERANCE {
        return true;
    }
    (cross > 0.0) == ccw
}
