use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

use switchboard_core::{PeerId, ServerMessage};
use switchboard_server::{SignalOutput, SignalingError};

/// Mock SignalOutput that captures every delivered event.
#[derive(Clone)]
pub struct MockSignalOutput {
    /// Channel to stream captured deliveries.
    tx: mpsc::UnboundedSender<(PeerId, ServerMessage)>,
    /// All captured deliveries (for verification).
    events: Arc<Mutex<Vec<(PeerId, ServerMessage)>>>,
    /// Peers the mock refuses to deliver to.
    offline: Arc<Mutex<Vec<PeerId>>>,
}

impl MockSignalOutput {
    /// Create a new MockSignalOutput and its receiver channel.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<(PeerId, ServerMessage)>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let output = Self {
            tx,
            events: Arc::new(Mutex::new(Vec::new())),
            offline: Arc::new(Mutex::new(Vec::new())),
        };
        (output, rx)
    }

    /// Create a MockSignalOutput without a receiver (events are only stored).
    pub fn new_stored_only() -> Self {
        let (tx, _rx) = mpsc::unbounded_channel();
        Self {
            tx,
            events: Arc::new(Mutex::new(Vec::new())),
            offline: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Make deliveries to `peer_id` fail with TargetNotFound from now on.
    pub async fn set_offline(&self, peer_id: PeerId) {
        self.offline.lock().await.push(peer_id);
    }

    /// All events delivered to a specific peer, in delivery order.
    pub async fn events_for(&self, peer_id: &PeerId) -> Vec<ServerMessage> {
        self.events
            .lock()
            .await
            .iter()
            .filter(|(to, _)| to == peer_id)
            .map(|(_, event)| event.clone())
            .collect()
    }

    /// Total number of delivered events.
    pub async fn event_count(&self) -> usize {
        self.events.lock().await.len()
    }
}

impl Default for MockSignalOutput {
    fn default() -> Self {
        Self::new_stored_only()
    }
}

#[async_trait]
impl SignalOutput for MockSignalOutput {
    async fn deliver(&self, to: &PeerId, event: ServerMessage) -> Result<(), SignalingError> {
        if self.offline.lock().await.contains(to) {
            return Err(SignalingError::TargetNotFound(to.clone()));
        }

        tracing::debug!("[MockOutput] deliver to {}", to);

        let entry = (to.clone(), event);
        self.events.lock().await.push(entry.clone());
        let _ = self.tx.send(entry);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_output_captures_events() {
        let (output, mut rx) = MockSignalOutput::new();
        let peer_id = PeerId::new();

        output
            .deliver(&peer_id, ServerMessage::SfuMode)
            .await
            .expect("deliver");

        let (to, event) = rx.recv().await.unwrap();
        assert_eq!(to, peer_id);
        assert!(matches!(event, ServerMessage::SfuMode));
        assert_eq!(output.event_count().await, 1);
    }

    #[tokio::test]
    async fn test_mock_output_respects_offline_peers() {
        let output = MockSignalOutput::new_stored_only();
        let peer_id = PeerId::new();
        output.set_offline(peer_id.clone()).await;

        let err = output
            .deliver(&peer_id, ServerMessage::SfuMode)
            .await
            .expect_err("offline");

        assert!(matches!(err, SignalingError::TargetNotFound(_)));
        assert!(output.events_for(&peer_id).await.is_empty());
    }
}
