use crate::plan::EntityId;

/// The current multi-room selection.
///
/// Owned by the caller and passed to the drag controller; grabbing a room
/// that is part of a selection of two or more rooms starts a group gesture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    rooms: Vec<EntityId>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects exactly one room.
    pub fn select_only(&mut self, room: EntityId) {
        self.rooms.clear();
        self.rooms.push(room);
    }

    /// Adds a room to the selection.
    pub fn add(&mut self, room: EntityId) {
        if !self.rooms.contains(&room) {
            self.rooms.push(room);
        }
    }

    /// Removes a room from the selection.
    pub fn remove(&mut self, room: EntityId) {
        self.rooms.retain(|&r| r != room);
    }

    /// Toggles a room's membership.
    pub fn toggle(&mut self, room: EntityId) {
        if self.contains(room) {
            self.remove(room);
        } else {
            self.add(room);
        }
    }

    pub fn clear(&mut self) {
        self.rooms.clear();
    }

    #[must_use]
    pub fn contains(&self, room: EntityId) -> bool {
        self.rooms.contains(&room)
    }

    #[must_use]
    pub fn rooms(&self) -> &[EntityId] {
        &self.rooms
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Returns `true` if grabbing `room` should start a group gesture.
    #[must_use]
    pub fn is_group_with(&self, room: EntityId) -> bool {
        self.rooms.len() > 1 && self.contains(room)
    }
}
