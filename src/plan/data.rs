//! Persisted floor-plan shape.
//!
//! [`FloorPlanData`] mirrors the JSON consumed and produced by save/load
//! collaborators. Walls, boundaries and references travel as room records
//! tagged with a sentinel `room_type`; [`RoomRecord::into_entity`] and
//! [`RoomRecord::from_entity`] map them to and from [`FloorPlanEntity`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::entity::{
    FloorPlanEntity, Outline, Room, SentinelOutline, ROOM_TYPE_BOUNDARY, ROOM_TYPE_REFERENCE,
    ROOM_TYPE_TEMP, ROOM_TYPE_WALL,
};
use super::fixture::{DimensionLine, Label, Opening, PlanObject};
use super::wall::{Wall, WallType};
use crate::error::{DataError, Result};
use crate::math::Point;

/// Id of the placeholder room produced when a plan cannot be loaded.
pub const FALLBACK_REFERENCE_ID: &str = "reference-fallback";

/// One entry of the `rooms` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomRecord {
    pub id: String,
    pub room_type: String,
    #[serde(default)]
    pub area: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub floor_polygon: Vec<Point>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_regular: Option<bool>,
    #[serde(rename = "isBoundary", default, skip_serializing_if = "Option::is_none")]
    pub is_boundary: Option<bool>,
    #[serde(rename = "parentRoomId", default, skip_serializing_if = "Option::is_none")]
    pub parent_room_id: Option<String>,
    #[serde(rename = "sharedWith", default, skip_serializing_if = "Option::is_none")]
    pub shared_with: Option<Vec<String>>,
    #[serde(rename = "wallType", default, skip_serializing_if = "Option::is_none")]
    pub wall_type: Option<WallType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    #[serde(rename = "originalLine", default, skip_serializing_if = "Option::is_none")]
    pub original_line: Option<[Point; 2]>,
    #[serde(rename = "hasMiteredCorners", default, skip_serializing_if = "Option::is_none")]
    pub has_mitered_corners: Option<bool>,
}

impl RoomRecord {
    fn bare(id: &str, room_type: &str, floor_polygon: &[Point]) -> Self {
        Self {
            id: id.to_owned(),
            room_type: room_type.to_owned(),
            area: 0.0,
            height: 0.0,
            width: 0.0,
            floor_polygon: floor_polygon.to_vec(),
            is_regular: None,
            is_boundary: None,
            parent_room_id: None,
            shared_with: None,
            wall_type: None,
            length: None,
            original_line: None,
            has_mitered_corners: None,
        }
    }

    /// Converts the wire record into a typed entity.
    ///
    /// Sentinel records lose any stored area. A `Wall` record without an
    /// `originalLine` takes its first and last polygon points.
    #[must_use]
    pub fn into_entity(self) -> FloorPlanEntity {
        match self.room_type.as_str() {
            ROOM_TYPE_WALL => {
                let original_line = self.original_line.unwrap_or_else(|| {
                    let first = self.floor_polygon.first().copied().unwrap_or_default();
                    let last = self.floor_polygon.last().copied().unwrap_or(first);
                    [first, last]
                });
                FloorPlanEntity::Wall(Wall {
                    length: self
                        .length
                        .unwrap_or_else(|| original_line[0].distance(original_line[1])),
                    id: self.id,
                    floor_polygon: self.floor_polygon,
                    parent_room_id: self.parent_room_id,
                    shared_with: self.shared_with.unwrap_or_default(),
                    wall_type: self.wall_type.unwrap_or_default(),
                    width: self.width,
                    original_line,
                    has_mitered_corners: self.has_mitered_corners.unwrap_or(false),
                })
            }
            ROOM_TYPE_BOUNDARY => FloorPlanEntity::Boundary(self.into_sentinel(false)),
            ROOM_TYPE_REFERENCE => FloorPlanEntity::Reference(self.into_sentinel(false)),
            ROOM_TYPE_TEMP => FloorPlanEntity::Temp(self.into_sentinel(false)),
            _ if self.is_boundary == Some(true) => FloorPlanEntity::Boundary(self.into_sentinel(true)),
            _ => {
                let mut room = Room {
                    id: self.id,
                    room_type: self.room_type,
                    area: self.area,
                    height: self.height,
                    width: self.width,
                    floor_polygon: self.floor_polygon,
                    is_regular: self.is_regular,
                };
                room.recompute_derived();
                FloorPlanEntity::Room(room)
            }
        }
    }

    /// `keep_type` retains a non-sentinel `room_type` for write-back.
    fn into_sentinel(self, keep_type: bool) -> SentinelOutline {
        let mut outline = SentinelOutline::new(self.id, self.floor_polygon);
        outline.is_boundary = self.is_boundary;
        if keep_type {
            outline.room_type = Some(self.room_type);
        }
        outline
    }

    /// Converts a typed entity back to its wire record.
    #[must_use]
    pub fn from_entity(entity: &FloorPlanEntity) -> Self {
        let mut record = Self::bare(entity.id(), entity.room_type(), entity.floor_polygon());
        match entity {
            FloorPlanEntity::Room(r) => {
                record.area = r.area;
                record.width = r.width;
                record.height = r.height;
                record.is_regular = r.is_regular;
            }
            FloorPlanEntity::Wall(w) => {
                record.width = w.width;
                record.parent_room_id.clone_from(&w.parent_room_id);
                record.shared_with = Some(w.shared_with.clone());
                record.wall_type = Some(w.wall_type);
                record.length = Some(w.length);
                record.original_line = Some(w.original_line);
                record.has_mitered_corners = Some(w.has_mitered_corners);
            }
            FloorPlanEntity::Boundary(s) => {
                record.width = s.width;
                record.height = s.height;
                // A custom room_type is only recognised as a boundary by the flag.
                record.is_boundary = if s.room_type.is_some() { Some(true) } else { s.is_boundary };
            }
            FloorPlanEntity::Reference(s) | FloorPlanEntity::Temp(s) => {
                record.width = s.width;
                record.height = s.height;
                record.is_boundary = s.is_boundary;
            }
        }
        record
    }
}

/// The aggregate root as persisted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FloorPlanData {
    #[serde(default)]
    pub room_count: usize,
    #[serde(default)]
    pub total_area: f64,
    #[serde(default)]
    pub room_types: Vec<String>,
    #[serde(default)]
    pub rooms: Vec<RoomRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<Label>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objects: Option<Vec<PlanObject>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doors: Option<Vec<Opening>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub windows: Option<Vec<Opening>>,
    #[serde(rename = "dimensionLines", default, skip_serializing_if = "Option::is_none")]
    pub dimension_lines: Option<Vec<DimensionLine>>,
    #[serde(rename = "wallWidths", default, skip_serializing_if = "Option::is_none")]
    pub wall_widths: Option<BTreeMap<String, f64>>,
}

impl FloorPlanData {
    /// Parses the persisted JSON shape.
    ///
    /// # Errors
    ///
    /// Returns `DataError::Json` if the text is not a valid floor plan.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| DataError::Json(e).into())
    }

    /// Parses the persisted JSON shape, degrading to [`FloorPlanData::fallback`]
    /// when the text cannot be read.
    #[must_use]
    pub fn from_json_or_fallback(text: &str) -> Self {
        match Self::from_json(text) {
            Ok(data) => data,
            Err(e) => {
                warn!("floor plan load failed, using fallback reference room: {e}");
                Self::fallback()
            }
        }
    }

    /// Serializes to the persisted JSON shape.
    ///
    /// # Errors
    ///
    /// Returns `DataError::Json` if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| DataError::Json(e).into())
    }

    /// A plan holding a single degenerate `Reference` room.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            rooms: vec![RoomRecord::bare(
                FALLBACK_REFERENCE_ID,
                ROOM_TYPE_REFERENCE,
                &[Point::default()],
            )],
            ..Self::default()
        }
    }
}
