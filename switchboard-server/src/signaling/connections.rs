use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

use switchboard_core::{Liveness, PeerId, ServerMessage};

use crate::error::SignalingError;
use crate::signaling::output::SignalOutput;

struct PeerHandle {
    tx: mpsc::UnboundedSender<ServerMessage>,
    liveness: Liveness,
}

/// Live connections keyed by server-assigned peer id.
///
/// An entry moves Connected -> Disconnecting -> gone. Marking a peer as
/// disconnecting makes it invisible to routing while its room cleanup is
/// still in flight, so nothing is queued on a channel about to be dropped.
#[derive(Clone)]
pub struct ConnectionTable {
    peers: Arc<DashMap<PeerId, PeerHandle>>,
}

impl ConnectionTable {
    pub fn new() -> Self {
        Self {
            peers: Arc::new(DashMap::new()),
        }
    }

    /// Register a new connection under a fresh id. The returned receiver is
    /// the queue a transport send task drains.
    pub fn register(&self) -> (PeerId, mpsc::UnboundedReceiver<ServerMessage>) {
        let peer_id = PeerId::new();
        let (tx, rx) = mpsc::unbounded_channel();
        self.peers.insert(
            peer_id.clone(),
            PeerHandle {
                tx,
                liveness: Liveness::Connected,
            },
        );
        debug!("Registered connection {}", peer_id);
        (peer_id, rx)
    }

    pub fn mark_disconnecting(&self, peer_id: &PeerId) {
        if let Some(mut handle) = self.peers.get_mut(peer_id) {
            handle.liveness = Liveness::Disconnecting;
        }
    }

    pub fn remove(&self, peer_id: &PeerId) {
        self.peers.remove(peer_id);
    }

    /// Connection state for `peer_id`; absent entries count as closed.
    pub fn liveness_of(&self, peer_id: &PeerId) -> Liveness {
        self.peers
            .get(peer_id)
            .map(|handle| handle.liveness)
            .unwrap_or(Liveness::Closed)
    }

    pub fn is_connected(&self, peer_id: &PeerId) -> bool {
        self.liveness_of(peer_id) == Liveness::Connected
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }
}

impl Default for ConnectionTable {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SignalOutput for ConnectionTable {
    async fn deliver(&self, to: &PeerId, event: ServerMessage) -> Result<(), SignalingError> {
        let Some(handle) = self.peers.get(to) else {
            return Err(SignalingError::TargetNotFound(to.clone()));
        };
        if handle.liveness != Liveness::Connected {
            return Err(SignalingError::TargetNotFound(to.clone()));
        }
        handle
            .tx
            .send(event)
            .map_err(|_| SignalingError::Transport(to.clone()))
    }
}
