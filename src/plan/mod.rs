pub mod data;
pub mod entity;
pub mod fixture;
pub mod wall;

pub use data::{FloorPlanData, RoomRecord};
pub use entity::{EntityId, FloorPlanEntity, Outline, Room, SentinelOutline};
pub use fixture::{
    DimensionLine, DoorId, Label, LabelId, ObjectId, Opening, PlanObject, Positioned, WindowId,
};
pub use wall::{Wall, WallType};

use std::collections::BTreeMap;

use crate::error::{EntityError, Result};
use crate::math::{units_to_feet, Point};
use slotmap::SlotMap;

/// Reference to any positioned fixture in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixtureRef {
    Door(DoorId),
    Window(WindowId),
    Object(ObjectId),
    Label(LabelId),
}

/// Per-room statistics for livable rooms.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomStats {
    pub id: String,
    pub room_type: String,
    /// Area in square internal units.
    pub area: f64,
    /// Area in square feet.
    pub area_sq_ft: f64,
}

/// Central arena that owns every entity of a floor plan.
///
/// Entities are addressed by typed IDs (generational indices). The
/// persisted string ids stay on the records and can be resolved with
/// [`FloorPlan::find`].
#[derive(Debug, Default, Clone)]
pub struct FloorPlan {
    entities: SlotMap<EntityId, FloorPlanEntity>,
    doors: SlotMap<DoorId, Opening>,
    windows: SlotMap<WindowId, Opening>,
    objects: SlotMap<ObjectId, PlanObject>,
    labels: SlotMap<LabelId, Label>,
    dimension_lines: Vec<DimensionLine>,
    wall_widths: Option<BTreeMap<String, f64>>,
    room_count: usize,
    total_area: f64,
    room_types: Vec<String>,
}

impl FloorPlan {
    /// Creates a new, empty floor plan.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the arena from the persisted shape and re-derives totals.
    #[must_use]
    pub fn from_data(data: FloorPlanData) -> Self {
        let mut plan = Self::new();
        for record in data.rooms {
            plan.entities.insert(record.into_entity());
        }
        for door in data.doors.into_iter().flatten() {
            plan.doors.insert(door);
        }
        for window in data.windows.into_iter().flatten() {
            plan.windows.insert(window);
        }
        for object in data.objects.into_iter().flatten() {
            plan.objects.insert(object);
        }
        for label in data.labels.into_iter().flatten() {
            plan.labels.insert(label);
        }
        plan.dimension_lines = data.dimension_lines.unwrap_or_default();
        plan.wall_widths = data.wall_widths;
        plan.refresh_totals();
        plan
    }

    /// Produces the persisted shape. Empty fixture collections are omitted.
    #[must_use]
    pub fn to_data(&self) -> FloorPlanData {
        fn non_empty<T>(items: impl Iterator<Item = T>) -> Option<Vec<T>> {
            let v: Vec<T> = items.collect();
            (!v.is_empty()).then_some(v)
        }

        FloorPlanData {
            room_count: self.room_count,
            total_area: self.total_area,
            room_types: self.room_types.clone(),
            rooms: self.entities.values().map(RoomRecord::from_entity).collect(),
            labels: non_empty(self.labels.values().cloned()),
            objects: non_empty(self.objects.values().cloned()),
            doors: non_empty(self.doors.values().cloned()),
            windows: non_empty(self.windows.values().cloned()),
            dimension_lines: non_empty(self.dimension_lines.iter().cloned()),
            wall_widths: self.wall_widths.clone(),
        }
    }

    // --- Entity operations ---

    /// Inserts an entity and returns its ID.
    pub fn add_entity(&mut self, entity: FloorPlanEntity) -> EntityId {
        self.entities.insert(entity)
    }

    /// Removes an entity, returning it if present.
    pub fn remove_entity(&mut self, id: EntityId) -> Option<FloorPlanEntity> {
        self.entities.remove(id)
    }

    /// Returns a reference to the entity, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the arena.
    pub fn entity(&self, id: EntityId) -> Result<&FloorPlanEntity> {
        self.entities
            .get(id)
            .ok_or_else(|| EntityError::NotFound(format!("{id:?}")).into())
    }

    /// Returns a mutable reference to the entity, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the arena.
    pub fn entity_mut(&mut self, id: EntityId) -> Result<&mut FloorPlanEntity> {
        self.entities
            .get_mut(id)
            .ok_or_else(|| EntityError::NotFound(format!("{id:?}")).into())
    }

    /// Returns the room with this ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is missing or is not a livable room.
    pub fn room(&self, id: EntityId) -> Result<&Room> {
        let entity = self.entity(id)?;
        entity.as_room().ok_or_else(|| wrong_kind(entity, "room"))
    }

    /// Returns the room with this ID mutably.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is missing or is not a livable room.
    pub fn room_mut(&mut self, id: EntityId) -> Result<&mut Room> {
        let entity = self.entity_mut(id)?;
        if entity.as_room().is_none() {
            return Err(wrong_kind(entity, "room"));
        }
        entity
            .as_room_mut()
            .ok_or_else(|| EntityError::NotFound(format!("{id:?}")).into())
    }

    /// Resolves a persisted string id to its arena ID.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<EntityId> {
        self.entities
            .iter()
            .find(|(_, e)| e.id() == id)
            .map(|(key, _)| key)
    }

    /// Iterates over every entity.
    pub fn entities(&self) -> impl Iterator<Item = (EntityId, &FloorPlanEntity)> {
        self.entities.iter()
    }

    /// Iterates over livable rooms only.
    pub fn livable_rooms(&self) -> impl Iterator<Item = (EntityId, &Room)> {
        self.entities
            .iter()
            .filter_map(|(key, e)| e.as_room().map(|r| (key, r)))
    }

    /// Iterates over every wall.
    pub fn walls(&self) -> impl Iterator<Item = (EntityId, &Wall)> {
        self.entities
            .iter()
            .filter_map(|(key, e)| e.as_wall().map(|w| (key, w)))
    }

    /// Keeps only the entities matching the predicate.
    pub fn retain_entities(&mut self, mut keep: impl FnMut(&FloorPlanEntity) -> bool) {
        self.entities.retain(|_, e| keep(e));
    }

    // --- Fixture operations ---

    /// Inserts a door and returns its ID.
    pub fn add_door(&mut self, door: Opening) -> DoorId {
        self.doors.insert(door)
    }

    /// Inserts a window and returns its ID.
    pub fn add_window(&mut self, window: Opening) -> WindowId {
        self.windows.insert(window)
    }

    /// Inserts an object and returns its ID.
    pub fn add_object(&mut self, object: PlanObject) -> ObjectId {
        self.objects.insert(object)
    }

    /// Inserts a label and returns its ID.
    pub fn add_label(&mut self, label: Label) -> LabelId {
        self.labels.insert(label)
    }

    /// Appends a dimension line.
    pub fn add_dimension_line(&mut self, line: DimensionLine) {
        self.dimension_lines.push(line);
    }

    pub fn doors(&self) -> impl Iterator<Item = (DoorId, &Opening)> {
        self.doors.iter()
    }

    pub fn windows(&self) -> impl Iterator<Item = (WindowId, &Opening)> {
        self.windows.iter()
    }

    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &PlanObject)> {
        self.objects.iter()
    }

    pub fn labels(&self) -> impl Iterator<Item = (LabelId, &Label)> {
        self.labels.iter()
    }

    #[must_use]
    pub fn dimension_lines(&self) -> &[DimensionLine] {
        &self.dimension_lines
    }

    /// Iterates over every positioned fixture with its current position.
    pub fn fixture_positions(&self) -> impl Iterator<Item = (FixtureRef, Point)> + '_ {
        let doors = self.doors.iter().map(|(k, d)| (FixtureRef::Door(k), d.position));
        let windows = self.windows.iter().map(|(k, w)| (FixtureRef::Window(k), w.position));
        let objects = self.objects.iter().map(|(k, o)| (FixtureRef::Object(k), o.position));
        let labels = self.labels.iter().map(|(k, l)| (FixtureRef::Label(k), l.position));
        doors.chain(windows).chain(objects).chain(labels)
    }

    /// Returns a fixture as a mutable [`Positioned`], or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the fixture is not found in the arena.
    pub fn fixture_mut(&mut self, fixture: FixtureRef) -> Result<&mut dyn Positioned> {
        let found: Option<&mut dyn Positioned> = match fixture {
            FixtureRef::Door(id) => self.doors.get_mut(id).map(|d| d as &mut dyn Positioned),
            FixtureRef::Window(id) => self.windows.get_mut(id).map(|w| w as &mut dyn Positioned),
            FixtureRef::Object(id) => self.objects.get_mut(id).map(|o| o as &mut dyn Positioned),
            FixtureRef::Label(id) => self.labels.get_mut(id).map(|l| l as &mut dyn Positioned),
        };
        found.ok_or_else(|| EntityError::NotFound(format!("{fixture:?}")).into())
    }

    /// Returns the current position of a fixture, if it exists.
    #[must_use]
    pub fn fixture_position(&self, fixture: FixtureRef) -> Option<Point> {
        match fixture {
            FixtureRef::Door(id) => self.doors.get(id).map(Positioned::position),
            FixtureRef::Window(id) => self.windows.get(id).map(Positioned::position),
            FixtureRef::Object(id) => self.objects.get(id).map(Positioned::position),
            FixtureRef::Label(id) => self.labels.get(id).map(Positioned::position),
        }
    }

    // --- Aggregates ---

    /// Re-derives `room_count`, `room_types` and `total_area`.
    ///
    /// `total_area` is the sum of every entity's area; sentinels always
    /// contribute zero.
    pub fn refresh_totals(&mut self) {
        self.total_area = self.entities.values().map(FloorPlanEntity::area).sum();
        let mut types: Vec<String> = self
            .livable_rooms()
            .map(|(_, r)| r.room_type.clone())
            .collect();
        self.room_count = types.len();
        types.sort();
        types.dedup();
        self.room_types = types;
    }

    #[must_use]
    pub fn total_area(&self) -> f64 {
        self.total_area
    }

    #[must_use]
    pub fn room_count(&self) -> usize {
        self.room_count
    }

    /// Distinct livable room types, sorted.
    #[must_use]
    pub fn room_types(&self) -> &[String] {
        &self.room_types
    }

    /// Statistics for every livable room.
    #[must_use]
    pub fn room_stats(&self) -> Vec<RoomStats> {
        self.livable_rooms()
            .map(|(_, r)| RoomStats {
                id: r.id.clone(),
                room_type: r.room_type.clone(),
                area: r.area,
                area_sq_ft: units_to_feet(units_to_feet(r.area)),
            })
            .collect()
    }
}

fn wrong_kind(entity: &FloorPlanEntity, expected: &'static str) -> crate::error::PlanError {
    EntityError::WrongKind {
        id: entity.id().to_owned(),
        expected,
        actual: entity.kind_name(),
    }
    .into()
}
