use serde::{Deserialize, Serialize};

use crate::math::Point;

/// How a wall relates to the rooms around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WallType {
    /// Lies on another room's boundary without being matched edge-for-edge.
    Interior,
    /// Faces outside the plan.
    #[default]
    Exterior,
    /// Merged from coincident edges of two or more rooms.
    Shared,
}

/// A wall body on the floor plane.
#[derive(Debug, Clone, PartialEq)]
pub struct Wall {
    pub id: String,
    /// Mitered quadrilateral, or the raw 2-point centreline when mitering
    /// is disabled.
    pub floor_polygon: Vec<Point>,
    /// Room whose edge produced this wall. `None` for free-standing walls.
    pub parent_room_id: Option<String>,
    /// Every room contributing to a shared wall.
    pub shared_with: Vec<String>,
    pub wall_type: WallType,
    pub length: f64,
    /// Thickness.
    pub width: f64,
    /// The room edge before extrusion.
    pub original_line: [Point; 2],
    pub has_mitered_corners: bool,
}

impl Wall {
    /// Ids of every room this wall belongs to.
    pub fn contributors(&self) -> impl Iterator<Item = &str> {
        self.parent_room_id
            .as_deref()
            .into_iter()
            .chain(self.shared_with.iter().map(String::as_str))
    }

    /// Returns `true` if this wall was derived from a room edge.
    #[must_use]
    pub fn is_synthesized(&self) -> bool {
        self.parent_room_id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contributors_include_parent_and_shared() {
        let wall = Wall {
            id: "w".into(),
            floor_polygon: Vec::new(),
            parent_room_id: Some("a".into()),
            shared_with: vec!["a".into(), "b".into()],
            wall_type: WallType::Shared,
            length: 80.0,
            width: 5.0,
            original_line: [Point::new(100.0, 0.0), Point::new(100.0, 80.0)],
            has_mitered_corners: true,
        };
        let ids: Vec<&str> = wall.contributors().collect();
        assert_eq!(ids, ["a", "a", "b"]);
        assert!(wall.is_synthesized());
    }

    #[test]
    fn wall_type_wire_names() {
        assert_eq!(
            serde_json::to_string(&WallType::Shared).ok().as_deref(),
            Some("\"shared\"")
        );
    }
}
