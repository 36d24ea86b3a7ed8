use std::sync::Arc;

use tracing::{debug, warn};

use switchboard_core::{PeerId, ServerMessage};

use crate::room::{Departure, RoomRegistry, TopologyMode};
use crate::signaling::output::SignalOutput;

/// Room-side effects of connections joining and dropping.
///
/// Ordering within one join: the old room (if any) learns about the
/// departure, then the joiner gets its membership reply, then the new room's
/// other members learn about the arrival. All frames are built from the same
/// registry snapshot.
pub struct ConnectionLifecycle {
    registry: Arc<RoomRegistry>,
    output: Arc<dyn SignalOutput>,
}

impl ConnectionLifecycle {
    pub fn new(registry: Arc<RoomRegistry>, output: Arc<dyn SignalOutput>) -> Self {
        Self { registry, output }
    }

    pub async fn on_join(&self, peer_id: &PeerId, room: &str) {
        let snapshot = match self.registry.join(room, peer_id) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("Rejected join of {} to '{}': {}", peer_id, room, e);
                self.send(
                    peer_id,
                    ServerMessage::JoinError {
                        reason: e.to_string(),
                    },
                )
                .await;
                return;
            }
        };

        if let Some(departure) = &snapshot.moved_from {
            self.broadcast_departure(peer_id, departure).await;
        }

        let reply = match snapshot.mode {
            TopologyMode::Mesh => ServerMessage::PeersInRoom {
                peers: snapshot.others.clone(),
                room_id: snapshot.room_id.clone(),
            },
            TopologyMode::Forwarding => ServerMessage::SfuMode,
        };
        self.send(peer_id, reply).await;

        if !snapshot.rejoined {
            let arrival = ServerMessage::NewPeer {
                peer_id: peer_id.clone(),
            };
            for other in &snapshot.others {
                self.send(other, arrival.clone()).await;
            }
        }
    }

    pub async fn on_disconnect(&self, peer_id: &PeerId) {
        // A connection that never joined has no room to clean up.
        let Some(departure) = self.registry.leave(peer_id) else {
            return;
        };
        self.broadcast_departure(peer_id, &departure).await;
    }

    async fn broadcast_departure(&self, peer_id: &PeerId, departure: &Departure) {
        let event = ServerMessage::PeerDisconnected {
            peer_id: peer_id.clone(),
        };
        for member in &departure.remaining {
            self.send(member, event.clone()).await;
        }
    }

    /// Best-effort room event delivery. Members can disconnect mid-broadcast;
    /// those frames are dropped like any other stale delivery.
    async fn send(&self, to: &PeerId, event: ServerMessage) {
        if let Err(e) = self.output.deliver(to, event).await {
            debug!("Dropped room event for {}: {}", to, e);
        }
    }
}
