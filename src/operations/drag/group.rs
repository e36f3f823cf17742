use crate::math::{Point, Vector2};
use crate::operations::query::RecomputeDerived;
use crate::plan::{EntityId, FloorPlan, Outline};

use super::state::PolygonSnapshot;

/// Captures the current polygon of every room. Walls are left out; their
/// bodies are only ever moved whole.
pub(super) fn capture(plan: &FloorPlan, rooms: &[EntityId]) -> PolygonSnapshot {
    rooms
        .iter()
        .filter_map(|&id| plan.entity(id).ok().map(|e| (id, e)))
        .filter(|(_, e)| e.as_wall().is_none())
        .map(|(id, e)| (id, e.floor_polygon().to_vec()))
        .collect()
}

/// Group vertex resize.
///
/// The primary room's vertex goes to `cursor`. Every other room's vertex
/// with the same index is set to its snapshotted position plus `total`,
/// the world-space movement since the gesture started.
pub(super) fn move_group_vertex(
    plan: &mut FloorPlan,
    primary: EntityId,
    vertex: usize,
    snapshot: &PolygonSnapshot,
    cursor: Point,
    total: Vector2,
) {
    for (id, snap) in snapshot {
        let Some(&original) = snap.get(vertex) else {
            continue;
        };
        let target = if *id == primary {
            cursor
        } else {
            original.offset(total)
        };
        if let Ok(entity) = plan.entity_mut(*id) {
            let polygon = entity.floor_polygon_mut();
            polygon.clone_from(snap);
            polygon[vertex] = target;
        }
    }
    commit(plan, snapshot);
}

/// Group edge resize.
///
/// `normal` was computed once from the primary room's snapshot. The
/// component of `total` along it is applied to the same edge of every
/// room's snapshot.
pub(super) fn push_group_edge(
    plan: &mut FloorPlan,
    edge: (usize, usize),
    normal: Vector2,
    snapshot: &PolygonSnapshot,
    total: Vector2,
) {
    let shift = normal * total.dot(&normal);
    for (id, snap) in snapshot {
        if edge.0 >= snap.len() || edge.1 >= snap.len() {
            continue;
        }
        if let Ok(entity) = plan.entity_mut(*id) {
            let polygon = entity.floor_polygon_mut();
            polygon.clone_from(snap);
            polygon[edge.0] = snap[edge.0].offset(shift);
            polygon[edge.1] = snap[edge.1].offset(shift);
        }
    }
    commit(plan, snapshot);
}

fn commit(plan: &mut FloorPlan, snapshot: &PolygonSnapshot) {
    let ids: Vec<EntityId> = snapshot.iter().map(|(id, _)| *id).collect();
    RecomputeDerived::new(&ids).execute(plan);
}
