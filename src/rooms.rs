//! Local mirror of the server's room list.

use reversi_protocol::{Room, RoomAction, RoomUpdate};
use tracing::{debug, instrument, trace};

/// Rooms keyed by `room_uuid`, kept in the order they were first seen.
///
/// The order is stable across updates so keyboard shortcuts and list
/// positions keep pointing at the same room.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomRegistry {
    rooms: Vec<Room>,
}

impl RoomRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one `ROOM_UPDATED` delta.
    ///
    /// `ADDED` and `UPDATED` both upsert. `DELETED` of an unknown room is a
    /// no-op.
    #[instrument(skip(self, update), fields(room = %update.room_uuid, action = %update.action))]
    pub fn apply(&mut self, update: &RoomUpdate) {
        match update.action {
            RoomAction::Added | RoomAction::Updated => self.upsert(update.room()),
            RoomAction::Deleted => {
                if self.remove(&update.room_uuid).is_none() {
                    trace!("Deleted room was not listed");
                }
            }
        }
    }

    /// Replaces the whole list, as on registration.
    #[instrument(skip_all)]
    pub fn seed(&mut self, rooms: impl IntoIterator<Item = Room>) {
        self.rooms.clear();
        for room in rooms {
            self.upsert(room);
        }
        debug!(listed = self.rooms.len(), "Room list seeded");
    }

    /// Inserts a room or overwrites the entry with the same key in place.
    pub fn upsert(&mut self, room: Room) {
        match self.rooms.iter_mut().find(|r| r.room_uuid == room.room_uuid) {
            Some(existing) => *existing = room,
            None => self.rooms.push(room),
        }
    }

    /// Removes a room, returning it if it was listed.
    pub fn remove(&mut self, room_uuid: &str) -> Option<Room> {
        let index = self.rooms.iter().position(|r| r.room_uuid == room_uuid)?;
        Some(self.rooms.remove(index))
    }

    /// Looks up a room by key.
    pub fn get(&self, room_uuid: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.room_uuid == room_uuid)
    }

    /// Room at a list position.
    pub fn nth(&self, index: usize) -> Option<&Room> {
        self.rooms.get(index)
    }

    /// All rooms in listing order.
    pub fn list(&self) -> &[Room] {
        &self.rooms
    }

    /// Number of listed rooms.
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Returns true if no rooms are listed.
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.rooms.clear();
    }
}
