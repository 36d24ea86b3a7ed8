use serde::{Deserialize, Serialize};

/// Room size at which newly joining peers stop meshing and go through the
/// forwarding path instead.
pub const DEFAULT_SFU_THRESHOLD: usize = 5;

/// How a peer exchanges media with the rest of its room.
///
/// The mode is picked once, when the peer joins, and never revisited. Peers
/// that entered a small room keep their mesh links even after the room grows
/// past the threshold, and later joiners forward even if mesh members leave
/// again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TopologyMode {
    /// The peer dials every member that was present when it joined.
    Mesh,
    /// The peer talks to a forwarding unit instead of its roommates.
    Forwarding,
}

#[derive(Debug, Clone, Copy)]
pub struct TopologySelector {
    threshold: usize,
}

impl TopologySelector {
    pub fn new(threshold: usize) -> Self {
        Self { threshold }
    }

    /// Pick the mode for a joining peer. `room_size` counts the joiner.
    pub fn select(&self, room_size: usize) -> TopologyMode {
        if room_size >= self.threshold {
            TopologyMode::Forwarding
        } else {
            TopologyMode::Mesh
        }
    }
}

impl Default for TopologySelector {
    fn default() -> Self {
        Self::new(DEFAULT_SFU_THRESHOLD)
    }
}
