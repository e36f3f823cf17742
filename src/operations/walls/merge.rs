use crate::math::distance_2d::{segment_lies_on, segments_coincide};
use crate::math::Point;
use crate::plan::{Wall, WallType};

/// Collapses walls whose original lines coincide into single shared walls.
///
/// Two walls merge when their `original_line` endpoints match within
/// `tolerance` in the same or reversed order and they have no contributing
/// room in common. The surviving record keeps the first wall's body and
/// lists every contributing room in `shared_with`.
#[must_use]
pub fn merge_shared(walls: Vec<Wall>, tolerance: f64) -> Vec<Wall> {
    let mut merged: Vec<Wall> = Vec::with_capacity(walls.len());
    for wall in walls {
        let target = merged.iter_mut().find(|m| {
            segments_coincide(
                (m.original_line[0], m.original_line[1]),
                (wall.original_line[0], wall.original_line[1]),
                tolerance,
            ) && !shares_contributor(m, &wall)
        });
        match target {
            Some(existing) => absorb(existing, &wall),
            None => merged.push(wall),
        }
    }
    merged
}

fn shares_contributor(a: &Wall, b: &Wall) -> bool {
    a.contributors().any(|x| b.contributors().any(|y| x == y))
}

fn absorb(existing: &mut Wall, other: &Wall) {
    let mut ids: Vec<String> = Vec::new();
    for id in existing.contributors().chain(other.contributors()) {
        if !ids.iter().any(|known| known == id) {
            ids.push(id.to_owned());
        }
    }
    existing.shared_with = ids;
    existing.wall_type = WallType::Shared;
}

/// Classifies every non-shared wall as interior or exterior.
///
/// A wall is interior when its original line lies on an edge of a room it
/// does not belong to, or such an edge lies on it. Otherwise it is
/// exterior.
pub fn classify(walls: &mut [Wall], rooms: &[(&str, &[Point])], tolerance: f64) {
    for wall in walls.iter_mut() {
        if wall.wall_type == WallType::Shared {
            continue;
        }
        let line = (wall.original_line[0], wall.original_line[1]);
        let touches_other_room = rooms
            .iter()
            .filter(|(id, _)| !wall.contributors().any(|c| c == *id))
            .any(|(_, polygon)| {
                let n = polygon.len();
                (0..n).any(|i| {
                    let edge = (polygon[i], polygon[(i + 1) % n]);
                    segment_lies_on(line, edge, tolerance) || segment_lies_on(edge, line, tolerance)
                })
            });
        wall.wall_type = if touches_other_room {
            WallType::Interior
        } else {
            WallType::Exterior
        };
    }
}
