mod peer;
mod room;
mod signaling;

pub use peer::{Liveness, PeerId};
pub use room::{InvalidRoomId, RoomId};
pub use signaling::{
    ClientMessage, IceServerConfig, ServerMessage, SignalKind, default_ice_servers,
};
