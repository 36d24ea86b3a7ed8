use crate::model::peer::PeerId;
use crate::model::room::RoomId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IceServerConfig {
    pub urls: Vec<String>,
    pub username: Option<String>,
    pub credential: Option<String>,
}

impl IceServerConfig {
    pub fn stun(url: impl Into<String>) -> Self {
        Self {
            urls: vec![url.into()],
            username: None,
            credential: None,
        }
    }
}

/// ICE servers announced to clients that bring no configuration of their own.
pub fn default_ice_servers() -> Vec<IceServerConfig> {
    vec![IceServerConfig::stun("stun:stun.l.google.com:19302")]
}

/// Which negotiation payload a relayed frame carries. The payloads themselves
/// stay opaque `Value`s end to end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    Offer,
    Answer,
    IceCandidate,
}

impl SignalKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Offer => "offer",
            Self::Answer => "answer",
            Self::IceCandidate => "ice-candidate",
        }
    }
}

/// Frames a client may send. The sender is identified by its connection, so
/// no frame carries a "from" field; `to` names the relay target by the id the
/// server assigned it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", content = "d", rename_all = "kebab-case")]
pub enum ClientMessage {
    #[serde(rename_all = "camelCase")]
    JoinRoom { room_id: String },
    Offer { sdp: Value, to: PeerId },
    Answer { sdp: Value, to: PeerId },
    IceCandidate { candidate: Value, to: PeerId },
}

/// Frames the server sends. Relayed negotiation frames are retagged with the
/// real sender in `from`; whatever the payload claimed is not consulted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", content = "d", rename_all = "kebab-case")]
pub enum ServerMessage {
    #[serde(rename_all = "camelCase")]
    Welcome {
        peer_id: PeerId,
        ice_servers: Vec<IceServerConfig>,
    },
    #[serde(rename_all = "camelCase")]
    PeersInRoom { peers: Vec<PeerId>, room_id: RoomId },
    #[serde(rename_all = "camelCase")]
    NewPeer { peer_id: PeerId },
    SfuMode,
    Offer { sdp: Value, from: PeerId },
    Answer { sdp: Value, from: PeerId },
    IceCandidate { candidate: Value, from: PeerId },
    #[serde(rename_all = "camelCase")]
    PeerDisconnected { peer_id: PeerId },
    JoinError { reason: String },
}

impl ServerMessage {
    /// Build the outbound half of a relayed signal.
    pub fn relay(kind: SignalKind, from: PeerId, payload: Value) -> Self {
        match kind {
            SignalKind::Offer => Self::Offer { sdp: payload, from },
            SignalKind::Answer => Self::Answer { sdp: payload, from },
            SignalKind::IceCandidate => Self::IceCandidate {
                candidate: payload,
                from,
            },
        }
    }
}
