use async_trait::async_trait;

use switchboard_core::{PeerId, ServerMessage};

use crate::error::SignalingError;

/// Seam between signaling logic and the transport that carries events to
/// clients. The live connection table implements this in production; tests
/// substitute a recording mock.
#[async_trait]
pub trait SignalOutput: Send + Sync {
    /// Deliver one event to one connected peer.
    async fn deliver(&self, to: &PeerId, event: ServerMessage) -> Result<(), SignalingError>;
}
