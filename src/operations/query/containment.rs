use crate::math::polygon_2d::contains_point;
use crate::math::Point;
use crate::plan::{EntityId, FixtureRef, FloorPlan, Outline};

/// Finds every fixture positioned inside at least one of the given
/// polygons.
///
/// Fixtures carry no parent room. This query is how a room's doors,
/// windows, objects and labels are recovered when the room moves.
pub struct FixturesInside<'a> {
    polygons: &'a [Vec<Point>],
}

impl<'a> FixturesInside<'a> {
    /// Creates a new `FixturesInside` query.
    #[must_use]
    pub fn new(polygons: &'a [Vec<Point>]) -> Self {
        Self { polygons }
    }

    /// Executes the query.
    #[must_use]
    pub fn execute(&self, plan: &FloorPlan) -> Vec<FixtureRef> {
        plan.fixture_positions()
            .filter(|(_, pos)| self.polygons.iter().any(|poly| contains_point(poly, *pos)))
            .map(|(fixture, _)| fixture)
            .collect()
    }
}

/// Finds the livable room whose outline contains a point.
///
/// When rooms overlap, the one inserted first wins.
pub struct RoomAt {
    point: Point,
}

impl RoomAt {
    /// Creates a new `RoomAt` query.
    #[must_use]
    pub fn new(point: Point) -> Self {
        Self { point }
    }

    /// Executes the query.
    #[must_use]
    pub fn execute(&self, plan: &FloorPlan) -> Option<EntityId> {
        plan.entities()
            .find(|(_, e)| e.is_livable() && contains_point(e.floor_polygon(), self.point))
            .map(|(id, _)| id)
    }
}
