use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use switchboard_core::{ClientMessage, PeerId, ServerMessage, SignalKind};

use crate::config::SignalingConfig;
use crate::room::{RoomRegistry, TopologySelector};
use crate::signaling::connections::ConnectionTable;
use crate::signaling::lifecycle::ConnectionLifecycle;
use crate::signaling::output::SignalOutput;
use crate::signaling::router::SignalingRouter;

struct ServiceInner {
    config: SignalingConfig,
    connections: ConnectionTable,
    registry: Arc<RoomRegistry>,
    router: SignalingRouter,
    lifecycle: ConnectionLifecycle,
}

/// The whole signaling plane behind one cheaply cloneable handle: connection
/// table, room registry, relay router and join/disconnect lifecycle. Axum
/// handlers hold it as state; tests drive it directly without sockets.
#[derive(Clone)]
pub struct SignalingService {
    inner: Arc<ServiceInner>,
}

impl SignalingService {
    pub fn new(config: SignalingConfig) -> Self {
        let connections = ConnectionTable::new();
        let output: Arc<dyn SignalOutput> = Arc::new(connections.clone());
        let registry = Arc::new(RoomRegistry::new(TopologySelector::new(
            config.sfu_threshold,
        )));
        let router = SignalingRouter::new(output.clone());
        let lifecycle = ConnectionLifecycle::new(registry.clone(), output);

        Self {
            inner: Arc::new(ServiceInner {
                config,
                connections,
                registry,
                router,
                lifecycle,
            }),
        }
    }

    /// Register a connection: assign it an id, queue the welcome frame with
    /// that id and the ICE bootstrap, and hand back the outbound queue.
    pub async fn register(&self) -> (PeerId, mpsc::UnboundedReceiver<ServerMessage>) {
        let (peer_id, rx) = self.inner.connections.register();
        let welcome = ServerMessage::Welcome {
            peer_id: peer_id.clone(),
            ice_servers: self.inner.config.ice_servers.clone(),
        };
        if let Err(e) = self.inner.connections.deliver(&peer_id, welcome).await {
            debug!("Connection {} vanished before its welcome: {}", peer_id, e);
        }
        (peer_id, rx)
    }

    /// Route one client frame to the matching handler. The sender is always
    /// the connection the frame arrived on.
    pub async fn dispatch(&self, peer_id: &PeerId, msg: ClientMessage) {
        match msg {
            ClientMessage::JoinRoom { room_id } => {
                self.inner.lifecycle.on_join(peer_id, &room_id).await;
            }
            ClientMessage::Offer { sdp, to } => {
                self.inner
                    .router
                    .route(peer_id, &to, SignalKind::Offer, sdp)
                    .await;
            }
            ClientMessage::Answer { sdp, to } => {
                self.inner
                    .router
                    .route(peer_id, &to, SignalKind::Answer, sdp)
                    .await;
            }
            ClientMessage::IceCandidate { candidate, to } => {
                self.inner
                    .router
                    .route(peer_id, &to, SignalKind::IceCandidate, candidate)
                    .await;
            }
        }
    }

    /// Tear down a connection. It stops being a signal target immediately,
    /// then its room is notified, then the table entry is dropped.
    pub async fn disconnect(&self, peer_id: &PeerId) {
        self.inner.connections.mark_disconnecting(peer_id);
        self.inner.lifecycle.on_disconnect(peer_id).await;
        self.inner.connections.remove(peer_id);
    }

    pub fn registry(&self) -> &RoomRegistry {
        &self.inner.registry
    }

    pub fn connections(&self) -> &ConnectionTable {
        &self.inner.connections
    }

    pub fn config(&self) -> &SignalingConfig {
        &self.inner.config
    }
}
