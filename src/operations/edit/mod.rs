//! Vertex insertion and removal on room outlines.

use tracing::debug;

use crate::error::{GeometryError, Result};
use crate::math::polygon_2d::edge;
use crate::math::{snap_point, Point};
use crate::operations::query::RecomputeDerived;
use crate::plan::{EntityId, FloorPlan};

/// Fewest vertices an outline may be reduced to.
pub const MIN_CORNERS: usize = 3;

/// Splits an edge at its snapped midpoint.
///
/// # Example
///
/// ```ignore
/// let index = InsertCorner::new(room, 0).execute(&mut plan)?;
/// ```
#[derive(Debug, Clone, Copy)]
pub struct InsertCorner {
    room: EntityId,
    edge: usize,
}

impl InsertCorner {
    #[must_use]
    pub fn new(room: EntityId, edge: usize) -> Self {
        Self { room, edge }
    }

    /// Inserts the vertex and returns its index.
    ///
    /// # Errors
    ///
    /// Returns an error if the room is missing or `edge` is out of range.
    pub fn execute(&self, plan: &mut FloorPlan) -> Result<usize> {
        let polygon = plan.entity_mut(self.room)?.floor_polygon_mut();
        let (a, b) = edge(polygon, self.edge)?;
        let mid = snap_point(Point::new((a.x + b.x) / 2.0, (a.z + b.z) / 2.0));
        let index = self.edge + 1;
        polygon.insert(index, mid);
        debug!("inserted corner {index} at ({}, {})", mid.x, mid.z);
        RecomputeDerived::new(&[self.room]).execute(plan);
        Ok(index)
    }
}

/// Deletes one vertex of an outline.
#[derive(Debug, Clone, Copy)]
pub struct RemoveCorner {
    room: EntityId,
    vertex: usize,
}

impl RemoveCorner {
    #[must_use]
    pub fn new(room: EntityId, vertex: usize) -> Self {
        Self { room, vertex }
    }

    /// Removes the vertex and returns it.
    ///
    /// # Errors
    ///
    /// Returns an error if the room is missing, `vertex` is out of range,
    /// or the outline already has only [`MIN_CORNERS`] vertices.
    pub fn execute(&self, plan: &mut FloorPlan) -> Result<Point> {
        let polygon = plan.entity_mut(self.room)?.floor_polygon_mut();
        if self.vertex >= polygon.len() {
            return Err(GeometryError::IndexOutOfRange {
                index: self.vertex,
                len: polygon.len(),
            }
            .into());
        }
        if polygon.len() <= MIN_CORNERS {
            return Err(GeometryError::Degenerate(format!(
                "outline needs at least {MIN_CORNERS} corners"
            ))
            .into());
        }
        let removed = polygon.remove(self.vertex);
        RecomputeDerived::new(&[self.room]).execute(plan);
        Ok(removed)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::PlanError;
    use crate::plan::{FloorPlanEntity, Room};
    use approx::assert_relative_eq;

    fn square(plan: &mut FloorPlan) -> EntityId {
        let key = plan.add_entity(FloorPlanEntity::Room(Room::new(
            "r",
            "Office",
            vec![
                Point::new(0.0, 0.0),
                Point::new(33.0, 0.0),
                Point::new(33.0, 40.0),
                Point::new(0.0, 40.0),
            ],
        )));
        plan.refresh_totals();
        key
    }

    #[test]
    fn insert_snaps_midpoint() {
        let mut plan = FloorPlan::new();
        let room = square(&mut plan);
        let index = InsertCorner::new(room, 0).execute(&mut plan).unwrap();
        assert_eq!(index, 1);
        let r = plan.room(room).unwrap();
        assert_eq!(r.floor_polygon.len(), 5);
        // 16.5 snaps to 15.
        assert_eq!(r.floor_polygon[1], Point::new(15.0, 0.0));
        assert_relative_eq!(r.area, 33.0 * 40.0);
    }

    #[test]
    fn insert_on_closing_edge_appends() {
        let mut plan = FloorPlan::new();
        let room = square(&mut plan);
        let index = InsertCorner::new(room, 3).execute(&mut plan).unwrap();
        assert_eq!(index, 4);
        assert_eq!(plan.room(room).unwrap().floor_polygon[4], Point::new(0.0, 20.0));
    }

    #[test]
    fn insert_rejects_bad_edge() {
        let mut plan = FloorPlan::new();
        let room = square(&mut plan);
        let err = InsertCorner::new(room, 9).execute(&mut plan).unwrap_err();
        assert!(matches!(err, PlanError::Geometry(GeometryError::IndexOutOfRange { .. })));
    }

    #[test]
    fn remove_updates_area_and_keeps_triangle() {
        let mut plan = FloorPlan::new();
        let room = square(&mut plan);
        let removed = RemoveCorner::new(room, 2).execute(&mut plan).unwrap();
        assert_eq!(removed, Point::new(33.0, 40.0));
        assert_relative_eq!(plan.room(room).unwrap().area, 33.0 * 40.0 / 2.0);
        assert_relative_eq!(plan.total_area(), 33.0 * 40.0 / 2.0);

        let err = RemoveCorner::new(room, 0).execute(&mut plan).unwrap_err();
        assert!(matches!(err, PlanError::Geometry(GeometryError::Degenerate(_))));
        assert_eq!(plan.room(room).unwrap().floor_polygon.len(), 3);
    }
}
