use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use switchboard_core::{PeerId, ServerMessage, SignalKind};

use crate::error::SignalingError;
use crate::signaling::output::SignalOutput;

/// Relays session negotiation frames between two peers.
///
/// Every relayed frame is stamped with the sender's server-assigned id; the
/// payload is passed through untouched and never inspected. A target that is
/// gone by the time the frame arrives is a normal race with disconnection,
/// so the frame is dropped here instead of bouncing an error to the sender.
#[derive(Clone)]
pub struct SignalingRouter {
    output: Arc<dyn SignalOutput>,
}

impl SignalingRouter {
    pub fn new(output: Arc<dyn SignalOutput>) -> Self {
        Self { output }
    }

    pub async fn route(&self, from: &PeerId, to: &PeerId, kind: SignalKind, payload: Value) {
        let event = ServerMessage::relay(kind, from.clone(), payload);
        match self.output.deliver(to, event).await {
            Ok(()) => {
                debug!("Relayed {} from {} to {}", kind.label(), from, to);
            }
            Err(SignalingError::TargetNotFound(_)) => {
                debug!(
                    "Dropped {} from {}: target {} is not connected",
                    kind.label(),
                    from,
                    to
                );
            }
            Err(e) => {
                warn!("Failed to deliver {} from {} to {}: {}", kind.label(), from, to, e);
            }
        }
    }
}
