use crate::math::{Point, Vector2};
use crate::plan::{EntityId, FixtureRef};
use crate::view::ScreenPoint;

/// Polygons captured at the start of a group gesture.
pub type PolygonSnapshot = Vec<(EntityId, Vec<Point>)>;

/// The active gesture and the data it needs.
///
/// Being a single enum, at most one kind of drag can be active at a time.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragMode {
    #[default]
    Idle,
    /// Moves every listed room by frame-to-frame deltas.
    Translate { rooms: Vec<EntityId> },
    /// Moves one snapped vertex of one room.
    VertexResize { room: EntityId, vertex: usize },
    /// Pushes or pulls one edge of one room along its normal.
    EdgeResize { room: EntityId, edge: (usize, usize) },
    /// Moves the same vertex index of every selected room relative to a
    /// gesture-start snapshot.
    GroupVertexResize {
        primary: EntityId,
        vertex: usize,
        snapshot: PolygonSnapshot,
    },
    /// Pushes or pulls the same edge of every selected room relative to a
    /// gesture-start snapshot.
    GroupEdgeResize {
        primary: EntityId,
        edge: (usize, usize),
        normal: Vector2,
        snapshot: PolygonSnapshot,
    },
    /// Moves a single door, window, object or label.
    Fixture(FixtureRef),
}

/// Flat name of the active gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    Idle,
    Translate,
    VertexResize,
    EdgeResize,
    GroupVertexResize,
    GroupEdgeResize,
    LabelDrag,
    ObjectDrag,
    DoorDrag,
    WindowDrag,
}

/// Transient drag state. Never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DragState {
    pub mode: DragMode,
    /// Cursor position when the gesture started.
    pub start: ScreenPoint,
    /// Cursor position of the previous frame.
    pub last: ScreenPoint,
}

impl DragState {
    pub(super) fn begin(mode: DragMode, at: ScreenPoint) -> Self {
        Self {
            mode,
            start: at,
            last: at,
        }
    }

    #[must_use]
    pub fn kind(&self) -> DragKind {
        match &self.mode {
            DragMode::Idle => DragKind::Idle,
            DragMode::Translate { .. } => DragKind::Translate,
            DragMode::VertexResize { .. } => DragKind::VertexResize,
            DragMode::EdgeResize { .. } => DragKind::EdgeResize,
            DragMode::GroupVertexResize { .. } => DragKind::GroupVertexResize,
            DragMode::GroupEdgeResize { .. } => DragKind::GroupEdgeResize,
            DragMode::Fixture(FixtureRef::Label(_)) => DragKind::LabelDrag,
            DragMode::Fixture(FixtureRef::Object(_)) => DragKind::ObjectDrag,
            DragMode::Fixture(FixtureRef::Door(_)) => DragKind::DoorDrag,
            DragMode::Fixture(FixtureRef::Window(_)) => DragKind::WindowDrag,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.mode != DragMode::Idle
    }

    #[must_use]
    pub fn is_resizing(&self) -> bool {
        matches!(
            self.mode,
            DragMode::VertexResize { .. }
                | DragMode::EdgeResize { .. }
                | DragMode::GroupVertexResize { .. }
                | DragMode::GroupEdgeResize { .. }
        )
    }

    #[must_use]
    pub fn is_edge_resizing(&self) -> bool {
        matches!(
            self.mode,
            DragMode::EdgeResize { .. } | DragMode::GroupEdgeResize { .. }
        )
    }

    #[must_use]
    pub fn is_group_operation(&self) -> bool {
        matches!(
            self.mode,
            DragMode::GroupVertexResize { .. } | DragMode::GroupEdgeResize { .. }
        )
    }

    /// Rooms whose geometry the gesture edits.
    #[must_use]
    pub fn room_ids(&self) -> Vec<EntityId> {
        match &self.mode {
            DragMode::Idle | DragMode::Fixture(_) => Vec::new(),
            DragMode::Translate { rooms } => rooms.clone(),
            DragMode::VertexResize { room, .. } | DragMode::EdgeResize { room, .. } => vec![*room],
            DragMode::GroupVertexResize { snapshot, .. }
            | DragMode::GroupEdgeResize { snapshot, .. } => {
                snapshot.iter().map(|(id, _)| *id).collect()
            }
        }
    }
}
