use serde::{Deserialize, Serialize};

use crate::math::{Point, Vector2};

slotmap::new_key_type! {
    /// Unique identifier for a door in the floor-plan arena.
    pub struct DoorId;
}

slotmap::new_key_type! {
    /// Unique identifier for a window in the floor-plan arena.
    pub struct WindowId;
}

slotmap::new_key_type! {
    /// Unique identifier for a furniture object in the floor-plan arena.
    pub struct ObjectId;
}

slotmap::new_key_type! {
    /// Unique identifier for a label in the floor-plan arena.
    pub struct LabelId;
}

/// A fixture positioned in world space.
///
/// Fixtures hold no reference to a room. Association is inferred from
/// containment when a room moves.
pub trait Positioned {
    fn position(&self) -> Point;
    fn position_mut(&mut self) -> &mut Point;

    /// Moves the fixture by `delta`.
    fn translate(&mut self, delta: Vector2) {
        let p = self.position_mut();
        *p = p.offset(delta);
    }
}

/// A door or a window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opening {
    pub id: String,
    pub path: String,
    pub position: Point,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default = "unit_scale")]
    pub scale: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub flip_horizontal: bool,
    #[serde(default)]
    pub flip_vertical: bool,
}

impl Opening {
    #[must_use]
    pub fn new(id: impl Into<String>, path: impl Into<String>, position: Point, width: f64) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
            position,
            rotation: 0.0,
            scale: 1.0,
            width,
            flip_horizontal: false,
            flip_vertical: false,
        }
    }
}

/// A furniture or fitting model placed on the plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanObject {
    pub id: String,
    pub object_path: String,
    pub position: Point,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default = "unit_scale")]
    pub scale: f64,
}

impl PlanObject {
    #[must_use]
    pub fn new(id: impl Into<String>, object_path: impl Into<String>, position: Point) -> Self {
        Self {
            id: id.into(),
            object_path: object_path.into(),
            position,
            rotation: 0.0,
            scale: 1.0,
        }
    }
}

/// Free text placed on the plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    pub id: String,
    pub text: String,
    pub position: Point,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    #[serde(default = "default_color")]
    pub color: String,
}

impl Label {
    #[must_use]
    pub fn new(id: impl Into<String>, text: impl Into<String>, position: Point) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            position,
            font_size: default_font_size(),
            color: default_color(),
        }
    }
}

/// A measurement annotation between two points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionLine {
    pub id: String,
    pub start: Point,
    pub end: Point,
    #[serde(default)]
    pub offset: f64,
}

fn unit_scale() -> f64 {
    1.0
}

fn default_font_size() -> f64 {
    14.0
}

fn default_color() -> String {
    "#000000".to_owned()
}

macro_rules! impl_positioned {
    ($($ty:ty),*) => {
        $(impl Positioned for $ty {
            fn position(&self) -> Point {
                self.position
            }

            fn position_mut(&mut self) -> &mut Point {
                &mut self.position
            }
        })*
    };
}

impl_positioned!(Opening, PlanObject, Label);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn opening_wire_shape() {
        let json = r#"{"id":"d1","path":"doors/single.glb","position":{"x":5,"z":0},
            "rotation":90,"scale":1,"width":30,"flipHorizontal":true,"flipVertical":false}"#;
        let door: Opening = serde_json::from_str(json).unwrap();
        assert!(door.flip_horizontal);
        assert!((door.width - 30.0).abs() < f64::EPSILON);
        let back = serde_json::to_value(&door).unwrap();
        assert_eq!(back["flipHorizontal"], serde_json::Value::Bool(true));
    }

    #[test]
    fn label_defaults() {
        let label: Label =
            serde_json::from_str(r#"{"id":"l","text":"Hall","position":{"x":1,"z":2}}"#).unwrap();
        assert!((label.font_size - 14.0).abs() < f64::EPSILON);
        assert_eq!(label.color, "#000000");
    }

    #[test]
    fn translate_moves_position() {
        let mut obj = PlanObject::new("o", "sofa.glb", Point::new(1.0, 1.0));
        obj.translate(Vector2::new(2.0, -3.0));
        assert_eq!(obj.position(), Point::new(3.0, -2.0));
    }
}
