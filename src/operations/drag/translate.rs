use tracing::trace;

use crate::math::{Point, Vector2};
use crate::operations::query::{FixturesInside, RecomputeDerived};
use crate::plan::{EntityId, FixtureRef, FloorPlan, Outline};

/// Moves every room by `delta` and carries along each fixture that was
/// inside one of the rooms before the move.
pub(super) fn translate_rooms(plan: &mut FloorPlan, rooms: &[EntityId], delta: Vector2) {
    let before: Vec<Vec<Point>> = rooms
        .iter()
        .filter_map(|&id| plan.entity(id).ok())
        .map(|e| e.floor_polygon().to_vec())
        .collect();
    if before.is_empty() {
        return;
    }
    let attached = FixturesInside::new(&before).execute(plan);

    for &id in rooms {
        if let Ok(entity) = plan.entity_mut(id) {
            entity.translate(delta);
        }
    }
    move_fixtures(plan, &attached, delta);
    trace!(
        "translated {} rooms and {} fixtures by ({:.3}, {:.3})",
        rooms.len(),
        attached.len(),
        delta.x,
        delta.y
    );
    RecomputeDerived::new(rooms).execute(plan);
}

/// Moves fixtures by `delta`. Missing fixtures are ignored.
pub(super) fn move_fixtures(plan: &mut FloorPlan, fixtures: &[FixtureRef], delta: Vector2) {
    for &fixture in fixtures {
        if let Ok(f) = plan.fixture_mut(fixture) {
            f.translate(delta);
        }
    }
}
