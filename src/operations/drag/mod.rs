//! Drag/resize interaction state machine.
//!
//! ```text
//!            down on body ──────────► Translate
//!            down on vertex ────────► VertexResize | GroupVertexResize
//!   Idle ─── down on edge midpoint ─► EdgeResize   | GroupEdgeResize
//!            down on fixture ───────► Label/Object/Door/WindowDrag
//!     ▲
//!     └──── up / cancel / leave (overlap hook runs, nothing rolled back)
//! ```
//!
//! Single-room gestures and translation accumulate frame-to-frame deltas
//! onto the already-mutated geometry. Group resizes apply the total delta
//! since gesture start to a snapshot taken on pointer-down.

mod group;
mod hook;
mod resize;
mod selection;
mod state;
mod translate;

pub use hook::{NoOverlapHook, OverlapHook};
pub use selection::Selection;
pub use state::{DragKind, DragMode, DragState, PolygonSnapshot};

use tracing::debug;

use crate::math::polygon_2d::outward_normal;
use crate::math::Point;
use crate::operations::query::RecomputeDerived;
use crate::plan::{EntityId, FixtureRef, FloorPlan, Outline};
use crate::view::{ScreenPoint, ScreenTransform};

/// What the pointer went down on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    /// The body of a room.
    RoomBody(EntityId),
    /// A vertex handle.
    Vertex { room: EntityId, index: usize },
    /// The midpoint handle of edge `edge` (vertex `edge` to `edge + 1`).
    EdgeMidpoint { room: EntityId, edge: usize },
    /// A door, window, object or label.
    Fixture(FixtureRef),
}

/// Pointer and touch input, unified.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(DragTarget, ScreenPoint),
    Move(ScreenPoint),
    /// Pointer-up or touch-end.
    Up,
    /// Touch-cancel.
    Cancel,
    /// Pointer left the drawing surface.
    Leave,
}

/// Drives room and fixture gestures against a floor plan.
#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
    transform: ScreenTransform,
}

impl DragController {
    /// Creates an idle controller using `transform` for screen ↔ world
    /// conversion.
    #[must_use]
    pub fn new(transform: ScreenTransform) -> Self {
        Self {
            state: DragState::default(),
            transform,
        }
    }

    /// Replaces the view transform, e.g. after zoom or fit.
    pub fn set_transform(&mut self, transform: ScreenTransform) {
        self.transform = transform;
    }

    #[must_use]
    pub fn transform(&self) -> &ScreenTransform {
        &self.transform
    }

    #[must_use]
    pub fn state(&self) -> &DragState {
        &self.state
    }

    #[must_use]
    pub fn kind(&self) -> DragKind {
        self.state.kind()
    }

    /// Dispatches one input event.
    ///
    /// Returns the overlap hook's answer when the event mutated the plan or
    /// ended a gesture.
    pub fn handle(
        &mut self,
        event: PointerEvent,
        plan: &mut FloorPlan,
        selection: &Selection,
        hook: &mut impl OverlapHook,
    ) -> Option<bool> {
        match event {
            PointerEvent::Down(target, at) => {
                self.pointer_down(plan, selection, target, at);
                None
            }
            PointerEvent::Move(at) => self.pointer_move(plan, at, hook),
            PointerEvent::Up | PointerEvent::Cancel | PointerEvent::Leave => {
                self.pointer_up(plan, hook)
            }
        }
    }

    /// Starts a gesture. Returns `false` and stays idle if a gesture is
    /// already running or the target does not exist.
    pub fn pointer_down(
        &mut self,
        plan: &FloorPlan,
        selection: &Selection,
        target: DragTarget,
        at: ScreenPoint,
    ) -> bool {
        if self.state.is_active() {
            return false;
        }
        let Some(mode) = Self::mode_for(plan, selection, target) else {
            debug!("drag ignored: target {target:?} is missing or degenerate");
            return false;
        };
        self.state = DragState::begin(mode, at);
        debug!("drag started: {:?}", self.state.kind());
        true
    }

    fn mode_for(plan: &FloorPlan, selection: &Selection, target: DragTarget) -> Option<DragMode> {
        match target {
            DragTarget::RoomBody(room) => {
                plan.entity(room).ok()?;
                let rooms = if selection.is_group_with(room) {
                    selection.rooms().to_vec()
                } else {
                    vec![room]
                };
                Some(DragMode::Translate { rooms })
            }
            DragTarget::Vertex { room, index } => {
                let len = reshapeable(plan, room)?.len();
                if index >= len {
                    return None;
                }
                if selection.is_group_with(room) {
                    Some(DragMode::GroupVertexResize {
                        primary: room,
                        vertex: index,
                        snapshot: group::capture(plan, selection.rooms()),
                    })
                } else {
                    Some(DragMode::VertexResize { room, vertex: index })
                }
            }
            DragTarget::EdgeMidpoint { room, edge } => {
                let polygon = reshapeable(plan, room)?;
                if edge >= polygon.len() || polygon.len() < 2 {
                    return None;
                }
                let edge_pair = (edge, (edge + 1) % polygon.len());
                let normal = outward_normal(polygon, edge).ok()?;
                if selection.is_group_with(room) {
                    Some(DragMode::GroupEdgeResize {
                        primary: room,
                        edge: edge_pair,
                        normal,
                        snapshot: group::capture(plan, selection.rooms()),
                    })
                } else {
                    Some(DragMode::EdgeResize { room, edge: edge_pair })
                }
            }
            DragTarget::Fixture(fixture) => {
                plan.fixture_position(fixture)?;
                Some(DragMode::Fixture(fixture))
            }
        }
    }

    /// Applies one move frame. No-op while idle.
    pub fn pointer_move(
        &mut self,
        plan: &mut FloorPlan,
        at: ScreenPoint,
        hook: &mut impl OverlapHook,
    ) -> Option<bool> {
        if !self.state.is_active() {
            return None;
        }
        let t = self.transform;
        let frame = t.delta_to_world(at.x - self.state.last.x, at.y - self.state.last.y);
        let total = t.delta_to_world(at.x - self.state.start.x, at.y - self.state.start.y);

        match &self.state.mode {
            DragMode::Idle => {}
            DragMode::Translate { rooms } => translate::translate_rooms(plan, rooms, frame),
            DragMode::VertexResize { room, vertex } => {
                resize::move_vertex_snapped(plan, *room, *vertex, t.to_world(at));
            }
            DragMode::EdgeResize { room, edge } => resize::push_edge(plan, *room, *edge, frame),
            DragMode::GroupVertexResize {
                primary,
                vertex,
                snapshot,
            } => group::move_group_vertex(plan, *primary, *vertex, snapshot, t.to_world(at), total),
            DragMode::GroupEdgeResize {
                edge,
                normal,
                snapshot,
                ..
            } => group::push_group_edge(plan, *edge, *normal, snapshot, total),
            DragMode::Fixture(fixture) => translate::move_fixtures(plan, &[*fixture], frame),
        }
        self.state.last = at;
        resolve_overlaps(plan, hook)
    }

    /// Ends the active gesture and runs the overlap hook. Geometry already
    /// changed during the gesture is kept.
    pub fn pointer_up(&mut self, plan: &mut FloorPlan, hook: &mut impl OverlapHook) -> Option<bool> {
        if !self.state.is_active() {
            return None;
        }
        debug!("drag ended: {:?}", self.state.kind());
        self.state = DragState::default();
        resolve_overlaps(plan, hook)
    }
}

/// Outline of an entity whose vertices may be edited. Wall bodies are
/// derived from their line and can only be moved whole.
fn reshapeable(plan: &FloorPlan, id: EntityId) -> Option<&[Point]> {
    let entity = plan.entity(id).ok()?;
    if entity.as_wall().is_some() {
        return None;
    }
    Some(entity.floor_polygon())
}

/// Runs the hook, then re-derives every entity since the hook may have
/// edited any of them.
fn resolve_overlaps(plan: &mut FloorPlan, hook: &mut impl OverlapHook) -> Option<bool> {
    let answer = hook.resolve(plan);
    let ids: Vec<EntityId> = plan.entities().map(|(id, _)| id).collect();
    RecomputeDerived::new(&ids).execute(plan);
    answer
}
