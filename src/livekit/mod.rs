//! Session provisioning against the real-time media service: room-name
//! allocation and scoped credential issuance.

mod allocator;
mod registry;
mod token;

pub use allocator::{RoomNameAllocator, ROOM_PREFIX};
pub use registry::{LiveKitRegistry, RoomRegistry};
pub use token::{AccessGrant, TokenIssuer};
