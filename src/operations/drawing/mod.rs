//! Two-click creation of rooms, walls and boundaries.
//!
//! The first click anchors the shape, moves update a preview that lives
//! only in the session, and a second click far enough from the first
//! commits a new entity. [`DrawingSession::escape`] throws the preview
//! away without touching the plan.

use tracing::debug;

use crate::math::polygon_2d::{left_normal, segment_direction};
use crate::math::{snap_point, Point};
use crate::plan::{EntityId, FloorPlan, FloorPlanEntity, Outline, Room, SentinelOutline, Wall, WallType};

/// Minimum world distance between the two clicks of a committed shape.
pub const MIN_DRAW_DISTANCE: f64 = 10.0;

/// What a session creates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawingTool {
    /// An axis-aligned livable room of the given type.
    Room { room_type: String },
    /// A free-standing wall of the given thickness.
    Wall { thickness: f64 },
    /// An axis-aligned plan boundary.
    Boundary,
}

impl DrawingTool {
    fn id_prefix(&self) -> &'static str {
        match self {
            Self::Room { .. } => "room",
            Self::Wall { .. } => "wall",
            Self::Boundary => "boundary",
        }
    }
}

/// Result of a pointer-down during a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawOutcome {
    /// First click recorded; the session is now drawing.
    Started,
    /// Second click created this entity; the session is idle again.
    Committed(EntityId),
    /// Second click was too close to the first; still drawing.
    TooShort,
}

/// Preview shape for the current cursor position.
#[derive(Debug, Clone, PartialEq)]
pub enum Preview {
    /// Room or boundary rectangle.
    Rectangle(Vec<Point>),
    /// Wall centreline.
    Line(Point, Point),
}

/// One drawing tool's interaction state.
#[derive(Debug, Clone)]
pub struct DrawingSession {
    tool: DrawingTool,
    start: Option<Point>,
    preview: Option<Preview>,
    created: usize,
}

impl DrawingSession {
    #[must_use]
    pub fn new(tool: DrawingTool) -> Self {
        Self {
            tool,
            start: None,
            preview: None,
            created: 0,
        }
    }

    #[must_use]
    pub fn tool(&self) -> &DrawingTool {
        &self.tool
    }

    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.start.is_some()
    }

    #[must_use]
    pub fn preview(&self) -> Option<&Preview> {
        self.preview.as_ref()
    }

    /// Handles a click at world position `at`.
    pub fn pointer_down(&mut self, plan: &mut FloorPlan, at: Point) -> DrawOutcome {
        let at = snap_point(at);
        let Some(start) = self.start else {
            self.start = Some(at);
            self.preview = None;
            debug!("drawing {:?} from ({}, {})", self.tool, at.x, at.z);
            return DrawOutcome::Started;
        };
        if start.distance(at) <= MIN_DRAW_DISTANCE {
            debug!("drawing ignored click {:.2} units from start", start.distance(at));
            return DrawOutcome::TooShort;
        }
        let id = self.commit(plan, start, at);
        self.start = None;
        self.preview = None;
        DrawOutcome::Committed(id)
    }

    /// Updates the preview. Returns `None` while not drawing.
    pub fn pointer_move(&mut self, at: Point) -> Option<&Preview> {
        let start = self.start?;
        let end = snap_point(at);
        self.preview = Some(match self.tool {
            DrawingTool::Wall { .. } => Preview::Line(start, end),
            DrawingTool::Room { .. } | DrawingTool::Boundary => Preview::Rectangle(rectangle(start, end)),
        });
        self.preview.as_ref()
    }

    /// Abandons the current shape. The plan is never touched.
    pub fn escape(&mut self) {
        if self.start.take().is_some() {
            debug!("drawing cancelled");
        }
        self.preview = None;
    }

    fn commit(&mut self, plan: &mut FloorPlan, start: Point, end: Point) -> EntityId {
        let id = self.next_id(plan);
        let entity = match &self.tool {
            DrawingTool::Room { room_type } => {
                FloorPlanEntity::Room(Room::new(id, room_type.clone(), rectangle(start, end)))
            }
            DrawingTool::Boundary => FloorPlanEntity::Boundary(SentinelOutline::new(id, rectangle(start, end))),
            DrawingTool::Wall { thickness } => FloorPlanEntity::Wall(free_wall(id, start, end, *thickness)),
        };
        debug!("drawing committed {} {}", entity.kind_name(), entity.id());
        let key = plan.add_entity(entity);
        plan.refresh_totals();
        key
    }

    fn next_id(&mut self, plan: &FloorPlan) -> String {
        loop {
            self.created += 1;
            let id = format!("{}-{}", self.tool.id_prefix(), self.created);
            if plan.find(&id).is_none() {
                return id;
            }
        }
    }
}

/// Counter-clockwise axis-aligned rectangle spanned by two corners.
fn rectangle(a: Point, b: Point) -> Vec<Point> {
    let (x0, x1) = (a.x.min(b.x), a.x.max(b.x));
    let (z0, z1) = (a.z.min(b.z), a.z.max(b.z));
    vec![
        Point::new(x0, z0),
        Point::new(x1, z0),
        Point::new(x1, z1),
        Point::new(x0, z1),
    ]
}

/// Unmitered wall body around the segment `start`-`end`.
fn free_wall(id: String, start: Point, end: Point, thickness: f64) -> Wall {
    let floor_polygon = match segment_direction(start, end) {
        Ok(dir) => {
            let n = left_normal(dir) * (thickness / 2.0);
            vec![start.offset(n), end.offset(n), end.offset(-n), start.offset(-n)]
        }
        Err(_) => vec![start, end],
    };
    Wall {
        id,
        floor_polygon,
        parent_room_id: None,
        shared_with: Vec::new(),
        wall_type: WallType::Exterior,
        length: start.distance(end),
        width: thickness,
        original_line: [start, end],
        has_mitered_corners: false,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn plan_with_room() -> FloorPlan {
        let mut plan = FloorPlan::new();
        plan.add_entity(FloorPlanEntity::Room(Room::new(
            "room-1",
            "Kitchen",
            rectangle(Point::new(0.0, 0.0), Point::new(50.0, 50.0)),
        )));
        plan.refresh_totals();
        plan
    }

    #[test]
    fn room_tool_commits_snapped_rectangle() {
        let mut plan = plan_with_room();
        let mut session = DrawingSession::new(DrawingTool::Room {
            room_type: "Bedroom".into(),
        });
        assert_eq!(session.pointer_down(&mut plan, Point::new(101.0, 2.0)), DrawOutcome::Started);
        assert!(session.is_drawing());
        let DrawOutcome::Committed(key) = session.pointer_down(&mut plan, Point::new(159.0, 41.0)) else {
            panic!("expected commit");
        };
        assert!(!session.is_drawing());

        let room = plan.room(key).unwrap();
        // "room-1" is taken.
        assert_eq!(room.id, "room-2");
        assert_eq!(room.floor_polygon[0], Point::new(100.0, 0.0));
        assert_eq!(room.floor_polygon[2], Point::new(160.0, 40.0));
        assert_relative_eq!(room.area, 2400.0);
        assert_eq!(plan.room_count(), 2);
        assert_relative_eq!(plan.total_area(), 2500.0 + 2400.0);
        assert_eq!(plan.room_types(), ["Bedroom", "Kitchen"]);
    }

    #[test]
    fn preview_never_touches_plan() {
        let mut plan = plan_with_room();
        let before = plan.to_data();
        let mut session = DrawingSession::new(DrawingTool::Boundary);
        assert!(session.pointer_move(Point::new(10.0, 10.0)).is_none());

        session.pointer_down(&mut plan, Point::new(200.0, 200.0));
        let preview = session.pointer_move(Point::new(120.0, 140.0)).cloned();
        assert_eq!(
            preview,
            Some(Preview::Rectangle(rectangle(
                Point::new(120.0, 140.0),
                Point::new(200.0, 200.0)
            )))
        );
        session.escape();
        assert!(!session.is_drawing());
        assert!(session.preview().is_none());
        assert_eq!(plan.to_data(), before);
    }

    #[test]
    fn short_second_click_keeps_drawing() {
        let mut plan = FloorPlan::new();
        let mut session = DrawingSession::new(DrawingTool::Boundary);
        session.pointer_down(&mut plan, Point::new(0.0, 0.0));
        assert_eq!(session.pointer_down(&mut plan, Point::new(6.0, 6.0)), DrawOutcome::TooShort);
        assert!(session.is_drawing());
        assert_eq!(plan.entities().count(), 0);

        let DrawOutcome::Committed(key) = session.pointer_down(&mut plan, Point::new(100.0, 0.1)) else {
            panic!("expected commit");
        };
        let boundary = plan.entity(key).unwrap();
        assert!(matches!(boundary, FloorPlanEntity::Boundary(_)));
        assert!(boundary.area().abs() < f64::EPSILON);
        assert!(plan.total_area().abs() < f64::EPSILON);
    }

    #[test]
    fn wall_tool_commits_free_standing_wall() {
        let mut plan = FloorPlan::new();
        let mut session = DrawingSession::new(DrawingTool::Wall { thickness: 6.0 });
        session.pointer_down(&mut plan, Point::new(0.0, 0.0));
        assert_eq!(
            session.pointer_move(Point::new(99.0, 1.0)),
            Some(&Preview::Line(Point::new(0.0, 0.0), Point::new(100.0, 0.0)))
        );
        let DrawOutcome::Committed(key) = session.pointer_down(&mut plan, Point::new(99.0, 1.0)) else {
            panic!("expected commit");
        };
        let wall = plan.entity(key).unwrap().as_wall().unwrap();
        assert!(!wall.is_synthesized());
        assert_relative_eq!(wall.length, 100.0);
        assert_relative_eq!(wall.width, 6.0);
        assert_eq!(wall.floor_polygon.len(), 4);
        assert_relative_eq!(wall.floor_polygon[0].z.abs(), 3.0);
        assert_eq!(plan.entity(key).unwrap().id(), "wall-1");
        assert_eq!(plan.room_count(), 0);
    }
}
