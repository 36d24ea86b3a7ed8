use switchboard_core::{InvalidRoomId, PeerId};
use thiserror::Error;

/// Failure classes for signaling operations.
///
/// Only `InvalidRoomId` is ever reported back to a client. The delivery
/// failures are races with disconnection; the routing layer logs them and
/// drops the frame instead of propagating.
#[derive(Debug, Error)]
pub enum SignalingError {
    #[error("invalid room id: {0}")]
    InvalidRoomId(#[from] InvalidRoomId),

    #[error("no connected peer {0}")]
    TargetNotFound(PeerId),

    #[error("outbound channel closed for peer {0}")]
    Transport(PeerId),
}
