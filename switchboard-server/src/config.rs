use serde::{Deserialize, Serialize};
use switchboard_core::{IceServerConfig, default_ice_servers};

use crate::room::DEFAULT_SFU_THRESHOLD;

/// Tuning for one signaling server instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalingConfig {
    /// Room size (counting the joiner) at which new joiners are told to use
    /// the forwarding path instead of meshing with every member.
    pub sfu_threshold: usize,
    /// ICE servers announced to every client in its welcome frame.
    pub ice_servers: Vec<IceServerConfig>,
}

impl Default for SignalingConfig {
    fn default() -> Self {
        Self {
            sfu_threshold: DEFAULT_SFU_THRESHOLD,
            ice_servers: default_ice_servers(),
        }
    }
}
