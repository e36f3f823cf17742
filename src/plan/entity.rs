use crate::math::polygon_2d::{extent, polygon_area};
use crate::math::{Point, Vector2};

use super::wall::Wall;

slotmap::new_key_type! {
    /// Unique identifier for a room-shaped entity in the floor-plan arena.
    pub struct EntityId;
}

/// Wire `room_type` of synthesized and drawn walls.
pub const ROOM_TYPE_WALL: &str = "Wall";
/// Wire `room_type` of plot boundaries.
pub const ROOM_TYPE_BOUNDARY: &str = "Boundary";
/// Wire `room_type` of reference outlines.
pub const ROOM_TYPE_REFERENCE: &str = "Reference";
/// Wire `room_type` of provisional rooms.
pub const ROOM_TYPE_TEMP: &str = "TempRoom";

/// Returns `true` for the non-livable `room_type` values.
#[must_use]
pub fn is_sentinel_room_type(room_type: &str) -> bool {
    matches!(
        room_type,
        ROOM_TYPE_WALL | ROOM_TYPE_BOUNDARY | ROOM_TYPE_REFERENCE | ROOM_TYPE_TEMP
    )
}

/// Shared view over every entity that has an outline on the floor plane.
pub trait Outline {
    /// The persisted string id.
    fn id(&self) -> &str;
    /// The implicitly-closed outline.
    fn floor_polygon(&self) -> &[Point];
}

/// A livable room.
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub id: String,
    pub room_type: String,
    /// Polygon area in square internal units.
    pub area: f64,
    /// Axis-aligned extent along `z`.
    pub height: f64,
    /// Axis-aligned extent along `x`.
    pub width: f64,
    pub floor_polygon: Vec<Point>,
    pub is_regular: Option<bool>,
}

impl Room {
    /// Creates a room and derives its area and extents from the polygon.
    #[must_use]
    pub fn new(id: impl Into<String>, room_type: impl Into<String>, floor_polygon: Vec<Point>) -> Self {
        let mut room = Self {
            id: id.into(),
            room_type: room_type.into(),
            area: 0.0,
            height: 0.0,
            width: 0.0,
            floor_polygon,
            is_regular: None,
        };
        room.recompute_derived();
        room
    }

    /// Recomputes `area`, `width` and `height` from the polygon.
    pub fn recompute_derived(&mut self) {
        let (w, h) = extent(&self.floor_polygon);
        self.width = w;
        self.height = h;
        self.area = polygon_area(&self.floor_polygon);
    }
}

/// Outline record for non-livable sentinels (boundaries, references,
/// provisional rooms). Never carries an area.
#[derive(Debug, Clone, PartialEq)]
pub struct SentinelOutline {
    pub id: String,
    pub height: f64,
    pub width: f64,
    pub floor_polygon: Vec<Point>,
    /// Wire `room_type` when it is not the variant's own sentinel name,
    /// e.g. a `"Plot"` record flagged `isBoundary`.
    pub room_type: Option<String>,
    /// Wire `isBoundary` flag as loaded.
    pub is_boundary: Option<bool>,
}

impl SentinelOutline {
    #[must_use]
    pub fn new(id: impl Into<String>, floor_polygon: Vec<Point>) -> Self {
        let (width, height) = extent(&floor_polygon);
        Self {
            id: id.into(),
            height,
            width,
            floor_polygon,
            room_type: None,
            is_boundary: None,
        }
    }
}

/// Every room-shaped record a floor plan can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum FloorPlanEntity {
    /// A livable room.
    Room(Room),
    /// A wall body, synthesized or drawn.
    Wall(Wall),
    /// A plot boundary.
    Boundary(SentinelOutline),
    /// A reference outline.
    Reference(SentinelOutline),
    /// A provisional room.
    Temp(SentinelOutline),
}

impl FloorPlanEntity {
    /// Human-readable kind name, used in errors and logs.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Room(_) => "room",
            Self::Wall(_) => "wall",
            Self::Boundary(_) => "boundary",
            Self::Reference(_) => "reference",
            Self::Temp(_) => "temp room",
        }
    }

    /// The wire `room_type` of this entity.
    #[must_use]
    pub fn room_type(&self) -> &str {
        match self {
            Self::Room(r) => &r.room_type,
            Self::Wall(_) => ROOM_TYPE_WALL,
            Self::Boundary(s) => s.room_type.as_deref().unwrap_or(ROOM_TYPE_BOUNDARY),
            Self::Reference(s) => s.room_type.as_deref().unwrap_or(ROOM_TYPE_REFERENCE),
            Self::Temp(s) => s.room_type.as_deref().unwrap_or(ROOM_TYPE_TEMP),
        }
    }

    /// Returns `true` only for livable rooms.
    #[must_use]
    pub fn is_livable(&self) -> bool {
        matches!(self, Self::Room(_))
    }

    /// Area counted towards the plan total. Zero for every sentinel.
    #[must_use]
    pub fn area(&self) -> f64 {
        match self {
            Self::Room(r) => r.area,
            _ => 0.0,
        }
    }

    /// Mutable access to the outline.
    pub fn floor_polygon_mut(&mut self) -> &mut Vec<Point> {
        match self {
            Self::Room(r) => &mut r.floor_polygon,
            Self::Wall(w) => &mut w.floor_polygon,
            Self::Boundary(s) | Self::Reference(s) | Self::Temp(s) => &mut s.floor_polygon,
        }
    }

    #[must_use]
    pub fn as_room(&self) -> Option<&Room> {
        match self {
            Self::Room(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_room_mut(&mut self) -> Option<&mut Room> {
        match self {
            Self::Room(r) => Some(r),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_wall(&self) -> Option<&Wall> {
        match self {
            Self::Wall(w) => Some(w),
            _ => None,
        }
    }

    /// Moves the outline by `delta`. A wall's `original_line` moves with
    /// its body.
    pub fn translate(&mut self, delta: Vector2) {
        for p in self.floor_polygon_mut().iter_mut() {
            *p = p.offset(delta);
        }
        if let Self::Wall(w) = self {
            w.original_line = w.original_line.map(|p| p.offset(delta));
            w.length = w.original_line[0].distance(w.original_line[1]);
        }
    }

    /// Recomputes derived fields after a geometry edit.
    ///
    /// Rooms get area and extents. Sentinels only get extents. Walls keep
    /// their thickness in `width`.
    pub fn recompute_derived(&mut self) {
        match self {
            Self::Room(r) => r.recompute_derived(),
            Self::Wall(_) => {}
            Self::Boundary(s) | Self::Reference(s) | Self::Temp(s) => {
                let (w, h) = extent(&s.floor_polygon);
                s.width = w;
                s.height = h;
            }
        }
    }
}

impl Outline for FloorPlanEntity {
    fn id(&self) -> &str {
        match self {
            Self::Room(r) => &r.id,
            Self::Wall(w) => &w.id,
            Self::Boundary(s) | Self::Reference(s) | Self::Temp(s) => &s.id,
        }
    }

    fn floor_polygon(&self) -> &[Point] {
        match self {
            Self::Room(r) => &r.floor_polygon,
            Self::Wall(w) => &w.floor_polygon,
            Self::Boundary(s) | Self::Reference(s) | Self::Temp(s) => &s.floor_polygon,
        }
    }
}

#[cfg(test)]
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

    #[test]
    fn rectangular_room_derived_fields() {
        let room = Room::new("r1", "LivingRoom", rect());
        assert!((room.area - 8000.0).abs() < 1e-9);
        assert!((room.width - 100.0).abs() < 1e-9);
        assert!((room.height - 80.0).abs() < 1e-9);
    }

    #[test]
    fn sentinels_never_report_area() {
        let mut boundary = FloorPlanEntity::Boundary(SentinelOutline::new("b", rect()));
        boundary.recompute_derived();
        assert!(boundary.area().abs() < f64::EPSILON);
        assert!(!boundary.is_livable());
        assert_eq!(boundary.room_type(), ROOM_TYPE_BOUNDARY);
        assert!(is_sentinel_room_type(boundary.room_type()));
    }

    #[test]
    fn outline_view_is_uniform() {
        let entities = [
            FloorPlanEntity::Room(Room::new("r", "Kitchen", rect())),
            FloorPlanEntity::Reference(SentinelOutline::new("ref", rect())),
        ];
        for e in &entities {
            assert_eq!(e.floor_polygon().len(), 4);
        }
        assert_eq!(entities[0].id(), "r");
        assert!(!is_sentinel_room_type("Kitchen"));
    }
}
