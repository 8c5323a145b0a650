use std::sync::Arc;

use uuid::Uuid;

use super::registry::RoomRegistry;
use crate::error::Result;

pub const ROOM_PREFIX: &str = "room-";

/// Generates a room name absent from the live registry.
///
/// Uniqueness is soft: nothing reserves the name between the registry check
/// and the room's actual creation by the media service, so two concurrent
/// allocations can still collide. The registry has no reservation primitive;
/// the race is accepted.
pub struct RoomNameAllocator {
    registry: Arc<dyn RoomRegistry>,
}

impl RoomNameAllocator {
    pub fn new(registry: Arc<dyn RoomRegistry>) -> Self {
        Self { registry }
    }

    /// One registry snapshot per call; candidates are regenerated until one
    /// is absent from that snapshot. A registry failure propagates as
    /// `ServiceUnavailable` without retrying.
    pub async fn allocate(&self) -> Result<String> {
        let rooms = self.registry.list_active_rooms().await?;

        let mut candidate = generate_candidate();
        while rooms.contains(&candidate) {
            candidate = generate_candidate();
        }
        Ok(candidate)
    }
}

fn generate_candidate() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("{ROOM_PREFIX}{}", &id[..8])
}
