mod merge;
mod miter;

pub use merge::{classify, merge_shared};
pub use miter::{build_room_walls, corner_angle, corner_cut};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::math::Point;
use crate::plan::{EntityId, FloorPlan, FloorPlanData, FloorPlanEntity, Wall, WallType};

/// Endpoint tolerance when matching walls of neighbouring rooms.
pub const MITER_MATCH_TOLERANCE: f64 = 0.1;

/// Room edges shorter than this produce no wall.
pub const MIN_EDGE_LENGTH: f64 = 0.01;

/// Wall synthesis settings, persisted with camelCase keys.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WallOptions {
    /// Full wall thickness in internal units.
    pub wall_thickness: f64,
    pub merge_shared_walls: bool,
    /// When `false`, walls classified exterior are dropped.
    pub generate_exterior_walls: bool,
    /// When `false`, walls are emitted as raw 2-point centrelines.
    #[serde(rename = "use45DegreeCuts", alias = "guaranteeMiters")]
    pub miter_corners: bool,
}

impl Default for WallOptions {
    fn default() -> Self {
        Self {
            wall_thickness: 5.0,
            merge_shared_walls: true,
            generate_exterior_walls: true,
            miter_corners: true,
        }
    }
}

impl WallOptions {
    #[must_use]
    pub fn with_wall_thickness(mut self, thickness: f64) -> Self {
        self.wall_thickness = thickness;
        self
    }

    #[must_use]
    pub fn with_merge_shared_walls(mut self, merge: bool) -> Self {
        self.merge_shared_walls = merge;
        self
    }

    #[must_use]
    pub fn with_exterior_walls(mut self, generate: bool) -> Self {
        self.generate_exterior_walls = generate;
        self
    }

    #[must_use]
    pub fn with_miter_corners(mut self, miter: bool) -> Self {
        self.miter_corners = miter;
        self
    }
}

/// Derives mitered wall bodies from room outlines.
///
/// Wall generation is always a rebuild. Synthesized walls are discarded
/// and regenerated, then merged and classified as a whole so miters and
/// shared-wall records stay consistent after arbitrary polygon edits.
/// Free-standing walls (no parent room) are carried through untouched.
#[derive(Debug, Default)]
pub struct WallSynthesis {
    options: WallOptions,
}

impl WallSynthesis {
    /// Creates a new wall synthesis operation.
    #[must_use]
    pub fn new(options: WallOptions) -> Self {
        Self { options }
    }

    /// Rebuilds every synthesized wall of the plan.
    ///
    /// Only livable rooms are walled. Boundary, reference and provisional
    /// outlines never get walls.
    #[must_use]
    pub fn execute(&self, plan: &FloorPlan) -> FloorPlan {
        let mut out = plan.clone();
        out.retain_entities(|e| !is_synthesized_wall(e));

        let raw: Vec<Wall> = plan
            .livable_rooms()
            .flat_map(|(_, room)| build_room_walls(room, &self.options))
            .collect();
        let walls = self.finish(raw, plan);
        insert_walls(&mut out, walls);
        out
    }

    /// Rebuilds the walls of one room, then re-runs the merge and
    /// classification pass over the whole wall set.
    ///
    /// Rooms currently sharing a wall with `room` are rebuilt too, since
    /// their shared records have to be split apart before merging again.
    /// Returns an unchanged copy if `room` is not a livable room.
    #[must_use]
    pub fn rebuild_room(&self, plan: &FloorPlan, room: EntityId) -> FloorPlan {
        let Ok(target) = plan.room(room) else {
            debug!("wall rebuild skipped: {room:?} is not a livable room");
            return plan.clone();
        };

        let mut affected: Vec<&str> = vec![target.id.as_str()];
        for (_, wall) in plan.walls() {
            if wall.contributors().any(|c| c == target.id) {
                for c in wall.contributors() {
                    if !affected.contains(&c) {
                        affected.push(c);
                    }
                }
            }
        }

        let touches_affected =
            |w: &Wall| w.is_synthesized() && w.contributors().any(|c| affected.contains(&c));

        let mut walls: Vec<Wall> = plan
            .walls()
            .filter(|(_, w)| w.is_synthesized() && !touches_affected(*w))
            .map(|(_, w)| w.clone())
            .collect();
        walls.extend(
            plan.livable_rooms()
                .filter(|(_, r)| affected.contains(&r.id.as_str()))
                .flat_map(|(_, r)| build_room_walls(r, &self.options)),
        );
        let walls = self.finish(walls, plan);

        let mut out = plan.clone();
        out.retain_entities(|e| !is_synthesized_wall(e));
        insert_walls(&mut out, walls);
        out
    }

    fn finish(&self, walls: Vec<Wall>, plan: &FloorPlan) -> Vec<Wall> {
        let mut walls = if self.options.merge_shared_walls {
            merge_shared(walls, MITER_MATCH_TOLERANCE)
        } else {
            walls
        };

        let rooms: Vec<(&str, &[Point])> = plan
            .livable_rooms()
            .map(|(_, r)| (r.id.as_str(), r.floor_polygon.as_slice()))
            .collect();
        classify(&mut walls, &rooms, MITER_MATCH_TOLERANCE);

        if !self.options.generate_exterior_walls {
            walls.retain(|w| w.wall_type != WallType::Exterior);
        }

        let shared = walls.iter().filter(|w| w.wall_type == WallType::Shared).count();
        debug!(
            "synthesized {} walls ({shared} shared) from {} rooms",
            walls.len(),
            rooms.len()
        );
        walls
    }
}

/// Runs a full wall rebuild on the persisted shape.
#[must_use]
pub fn generate_walls(data: FloorPlanData, options: WallOptions) -> FloorPlanData {
    let plan = FloorPlan::from_data(data);
    WallSynthesis::new(options).execute(&plan).to_data()
}

fn is_synthesized_wall(entity: &FloorPlanEntity) -> bool {
    entity.as_wall().is_some_and(Wall::is_synthesized)
}

fn insert_walls(plan: &mut FloorPlan, walls: Vec<Wall>) {
    for wall in walls {
        plan.add_entity(FloorPlanEntity::Wall(wall));
    }
    plan.refresh_totals();
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::plan::{Room, SentinelOutline};

    fn rect(x0: f64, z0: f64, x1: f64, z1: f64) -> Vec<Point> {
        vec![
            Point::new(x0, z0),
            Point::new(x1, z0),
            Point::new(x1, z1),
            Point::new(x0, z1),
        ]
    }

    fn two_rooms() -> (FloorPlan, EntityId, EntityId) {
        let mut plan = FloorPlan::new();
        let a = plan.add_entity(FloorPlanEntity::Room(Room::new("a", "Kitchen", rect(0.0, 0.0, 100.0, 80.0))));
        let b = plan.add_entity(FloorPlanEntity::Room(Room::new("b", "Bedroom", rect(100.0, 0.0, 180.0, 80.0))));
        plan.refresh_totals();
        (plan, a, b)
    }

    fn shared_walls(plan: &FloorPlan) -> Vec<&Wall> {
        plan.walls()
            .map(|(_, w)| w)
            .filter(|w| w.wall_type == WallType::Shared)
            .collect()
    }

    #[test]
    fn raw_walls_on_shared_edge_match() {
        let (plan, a, b) = two_rooms();
        let options = WallOptions::default();
        let wa = build_room_walls(plan.room(a).unwrap(), &options);
        let wb = build_room_walls(plan.room(b).unwrap(), &options);
        let right_of_a = &wa[1];
        let left_of_b = &wb[3];
        assert!(crate::math::distance_2d::segments_coincide(
            (right_of_a.original_line[0], right_of_a.original_line[1]),
            (left_of_b.original_line[0], left_of_b.original_line[1]),
            MITER_MATCH_TOLERANCE,
        ));
    }

    #[test]
    fn shared_edge_collapses_to_one_shared_wall() {
        let (plan, _, _) = two_rooms();
        let out = WallSynthesis::new(WallOptions::default()).execute(&plan);
        assert_eq!(out.walls().count(), 7);
        let shared = shared_walls(&out);
        assert_eq!(shared.len(), 1);
        assert!(shared[0].shared_with.iter().any(|id| id == "a"));
        assert!(shared[0].shared_with.iter().any(|id| id == "b"));
        let exterior = out.walls().filter(|(_, w)| w.wall_type == WallType::Exterior).count();
        assert_eq!(exterior, 6);
    }

    #[test]
    fn walls_do_not_change_total_area() {
        let (plan, _, _) = two_rooms();
        let out = WallSynthesis::new(WallOptions::default()).execute(&plan);
        assert!((out.total_area() - plan.total_area()).abs() < 1e-9);
        assert_eq!(out.room_count(), 2);
    }

    #[test]
    fn without_merge_both_copies_are_interior() {
        let (plan, _, _) = two_rooms();
        let options = WallOptions::default().with_merge_shared_walls(false);
        let out = WallSynthesis::new(options).execute(&plan);
        assert_eq!(out.walls().count(), 8);
        let interior = out.walls().filter(|(_, w)| w.wall_type == WallType::Interior).count();
        assert_eq!(interior, 2);
    }

    #[test]
    fn exterior_walls_can_be_suppressed() {
        let (plan, _, _) = two_rooms();
        let options = WallOptions::default().with_exterior_walls(false);
        let out = WallSynthesis::new(options).execute(&plan);
        assert_eq!(out.walls().count(), 1);
    }

    #[test]
    fn rerun_replaces_previous_walls() {
        let (plan, _, _) = two_rooms();
        let synth = WallSynthesis::new(WallOptions::default());
        let once = synth.execute(&plan);
        let twice = synth.execute(&once);
        assert_eq!(twice.walls().count(), 7);
    }

    #[test]
    fn free_standing_walls_survive_rebuild() {
        let (mut plan, _, _) = two_rooms();
        let line = [Point::new(300.0, 0.0), Point::new(400.0, 0.0)];
        plan.add_entity(FloorPlanEntity::Wall(Wall {
            id: "drawn".into(),
            floor_polygon: line.to_vec(),
            parent_room_id: None,
            shared_with: Vec::new(),
            wall_type: WallType::Exterior,
            length: 100.0,
            width: 5.0,
            original_line: line,
            has_mitered_corners: false,
        }));
        let out = WallSynthesis::new(WallOptions::default()).execute(&plan);
        assert!(out.find("drawn").is_some());
        assert_eq!(out.walls().count(), 8);
    }

    #[test]
    fn rebuild_room_follows_edit_and_keeps_merge() {
        let (plan, a, _) = two_rooms();
        let synth = WallSynthesis::new(WallOptions::default());
        let mut walled = synth.execute(&plan);

        // Stretch room a downward; its shared edge with b is unchanged.
        {
            let room = walled.room_mut(a).unwrap();
            room.floor_polygon[0].z = -20.0;
            room.floor_polygon[1].z = -20.0;
            room.recompute_derived();
        }
        let rebuilt = synth.rebuild_room(&walled, a);
        // (100,-20)-(100,80) no longer matches b's (100,0)-(100,80).
        assert!(shared_walls(&rebuilt).is_empty());
        assert_eq!(rebuilt.walls().count(), 8);
        let interior = rebuilt
            .walls()
            .filter(|(_, w)| w.wall_type == WallType::Interior)
            .count();
        assert_eq!(interior, 2);
        let bottom = rebuilt.find("wall-a-0").unwrap();
        let bottom = rebuilt.entity(bottom).unwrap().as_wall().unwrap();
        assert!((bottom.original_line[0].z + 20.0).abs() < 1e-9);
    }

    #[test]
    fn sentinel_outlines_get_no_walls() {
        let (mut plan, _, _) = two_rooms();
        plan.add_entity(FloorPlanEntity::Boundary(SentinelOutline::new("bound", rect(-50.0, -50.0, 300.0, 300.0))));
        plan.add_entity(FloorPlanEntity::Temp(SentinelOutline::new("tmp", rect(400.0, 0.0, 450.0, 50.0))));
        let out = WallSynthesis::new(WallOptions::default()).execute(&plan);
        assert_eq!(out.walls().count(), 7);
        assert!(out
            .walls()
            .all(|(_, w)| w.contributors().all(|c| c == "a" || c == "b")));
    }

    #[test]
    fn rebuild_room_on_sentinel_is_noop() {
        let (mut plan, _, _) = two_rooms();
        let reference = plan.add_entity(FloorPlanEntity::Reference(SentinelOutline::new("ref", rect(0.0, 0.0, 1.0, 1.0))));
        let out = WallSynthesis::new(WallOptions::default()).rebuild_room(&plan, reference);
        assert_eq!(out.walls().count(), 0);
    }

    #[test]
    fn generate_on_wire_shape() {
        let (plan, _, _) = two_rooms();
        let data = generate_walls(plan.to_data(), WallOptions::default());
        let walls: Vec<_> = data.rooms.iter().filter(|r| r.room_type == "Wall").collect();
        assert_eq!(walls.len(), 7);
        assert!(walls.iter().all(|w| w.area.abs() < f64::EPSILON));
        assert!((data.total_area - 14400.0).abs() < 1e-9);
    }

    #[test]
    fn options_accept_both_miter_keys() {
        let a: WallOptions = serde_json::from_str(r#"{"use45DegreeCuts": false}"#).unwrap();
        let b: WallOptions = serde_json::from_str(r#"{"guaranteeMiters": false, "wallThickness": 8}"#).unwrap();
        assert!(!a.miter_corners);
        assert!(!b.miter_corners);
        assert!((b.wall_thickness - 8.0).abs() < f64::EPSILON);
        assert!(b.merge_shared_walls);
    }
}
