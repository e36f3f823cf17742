use crate::math::polygon_2d::outward_normal;
use crate::math::{snap_point, Point, Vector2};
use crate::operations::query::RecomputeDerived;
use crate::plan::{EntityId, FloorPlan};

/// Replaces vertex `vertex` with `cursor` snapped to the grid.
pub(super) fn move_vertex_snapped(plan: &mut FloorPlan, room: EntityId, vertex: usize, cursor: Point) {
    let Ok(entity) = plan.entity_mut(room) else {
        return;
    };
    let Some(v) = entity.floor_polygon_mut().get_mut(vertex) else {
        return;
    };
    *v = snap_point(cursor);
    RecomputeDerived::new(&[room]).execute(plan);
}

/// Slides both vertices of `edge` along the edge's outward normal by the
/// component of `movement` along that normal.
pub(super) fn push_edge(plan: &mut FloorPlan, room: EntityId, edge: (usize, usize), movement: Vector2) {
    let Ok(entity) = plan.entity_mut(room) else {
        return;
    };
    let polygon = entity.floor_polygon_mut();
    if edge.0 >= polygon.len() || edge.1 >= polygon.len() {
        return;
    }
    let Ok(normal) = outward_normal(polygon, edge.0) else {
        return;
    };
    let shift = normal * movement.dot(&normal);
    polygon[edge.0] = polygon[edge.0].offset(shift);
    polygon[edge.1] = polygon[edge.1].offset(shift);
    RecomputeDerived::new(&[room]).execute(plan);
}
