use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use tracing::{debug, info};

use switchboard_core::{PeerId, RoomId};

use crate::error::SignalingError;
use crate::room::topology::{TopologyMode, TopologySelector};

/// One membership entry. The mode is fixed at join time and survives any
/// later growth or shrinkage of the room.
#[derive(Debug, Clone)]
pub struct RoomMember {
    pub peer_id: PeerId,
    pub mode: TopologyMode,
}

/// Everything a joining peer needs to know, captured while the registry lock
/// is held so it reflects one consistent instant.
#[derive(Debug, Clone)]
pub struct JoinSnapshot {
    pub room_id: RoomId,
    /// Members other than the joiner, in join order.
    pub others: Vec<PeerId>,
    pub mode: TopologyMode,
    /// Room size counting the joiner.
    pub size: usize,
    /// The peer was already a member of this room; nothing changed.
    pub rejoined: bool,
    /// Set when this join pulled the peer out of another room.
    pub moved_from: Option<Departure>,
}

/// Result of removing a peer from its room.
#[derive(Debug, Clone)]
pub struct Departure {
    pub room_id: RoomId,
    /// Members left behind, in join order.
    pub remaining: Vec<PeerId>,
}

#[derive(Default)]
struct RegistryInner {
    rooms: HashMap<RoomId, Vec<RoomMember>>,
    membership: HashMap<PeerId, RoomId>,
}

/// Authoritative room membership.
///
/// Both directions (room to members, peer to room) live behind one lock so
/// every operation observes and leaves a consistent pair. The topology
/// decision for a joiner is made inside the same critical section, which
/// keeps the member count it is based on exact even under concurrent joins.
/// The lock is never held across an await point.
pub struct RoomRegistry {
    inner: Mutex<RegistryInner>,
    selector: TopologySelector,
}

impl RoomRegistry {
    pub fn new(selector: TopologySelector) -> Self {
        Self {
            inner: Mutex::new(RegistryInner::default()),
            selector,
        }
    }

    /// Add `peer_id` to `room`, creating the room on first join.
    ///
    /// Joining the room the peer is already in changes nothing and replays
    /// the original decision with `rejoined` set. Joining a different room
    /// moves the peer: the old room's departure is returned in `moved_from`
    /// so the caller can notify it. A peer is mapped to at most one room at
    /// any time.
    pub fn join(&self, room: &str, peer_id: &PeerId) -> Result<JoinSnapshot, SignalingError> {
        let room_id = RoomId::parse(room)?;

        let mut guard = self.lock();
        let inner = &mut *guard;

        if let Some(members) = inner.rooms.get(&room_id) {
            if let Some(existing) = members.iter().find(|m| &m.peer_id == peer_id) {
                debug!("Peer {} re-joined its current room '{}'", peer_id, room_id);
                return Ok(JoinSnapshot {
                    room_id: room_id.clone(),
                    others: members
                        .iter()
                        .filter(|m| &m.peer_id != peer_id)
                        .map(|m| m.peer_id.clone())
                        .collect(),
                    mode: existing.mode,
                    size: members.len(),
                    rejoined: true,
                    moved_from: None,
                });
            }
        }

        let moved_from = inner.membership.remove(peer_id).map(|previous| {
            let remaining = remove_member(&mut inner.rooms, &previous, peer_id);
            debug!("Peer {} moved out of room '{}'", peer_id, previous);
            Departure {
                room_id: previous,
                remaining,
            }
        });

        let members = inner.rooms.entry(room_id.clone()).or_default();
        let size = members.len() + 1;
        let mode = self.selector.select(size);
        let others: Vec<PeerId> = members.iter().map(|m| m.peer_id.clone()).collect();
        members.push(RoomMember {
            peer_id: peer_id.clone(),
            mode,
        });
        inner.membership.insert(peer_id.clone(), room_id.clone());

        info!(
            "Peer {} joined room '{}' as member {} ({:?})",
            peer_id, room_id, size, mode
        );

        Ok(JoinSnapshot {
            room_id,
            others,
            mode,
            size,
            rejoined: false,
            moved_from,
        })
    }

    /// Remove `peer_id` from whatever room it is in. Idempotent; `None` means
    /// the peer was not in any room.
    pub fn leave(&self, peer_id: &PeerId) -> Option<Departure> {
        let mut guard = self.lock();
        let inner = &mut *guard;

        let room_id = inner.membership.remove(peer_id)?;
        let remaining = remove_member(&mut inner.rooms, &room_id, peer_id);

        info!(
            "Peer {} left room '{}' ({} remaining)",
            peer_id,
            room_id,
            remaining.len()
        );

        Some(Departure { room_id, remaining })
    }

    /// Current members of `room_id` in join order. Empty for unknown rooms.
    pub fn members_of(&self, room_id: &RoomId) -> Vec<PeerId> {
        self.lock()
            .rooms
            .get(room_id)
            .map(|members| members.iter().map(|m| m.peer_id.clone()).collect())
            .unwrap_or_default()
    }

    /// The room `peer_id` currently belongs to, if any.
    pub fn room_of(&self, peer_id: &PeerId) -> Option<RoomId> {
        self.lock().membership.get(peer_id).cloned()
    }

    /// The topology mode stored for `peer_id` at join time.
    pub fn mode_of(&self, peer_id: &PeerId) -> Option<TopologyMode> {
        let guard = self.lock();
        let room_id = guard.membership.get(peer_id)?;
        guard
            .rooms
            .get(room_id)?
            .iter()
            .find(|m| &m.peer_id == peer_id)
            .map(|m| m.mode)
    }

    pub fn room_count(&self) -> usize {
        self.lock().rooms.len()
    }

    pub fn member_count(&self, room_id: &RoomId) -> usize {
        self.lock().rooms.get(room_id).map(Vec::len).unwrap_or(0)
    }

    fn lock(&self) -> MutexGuard<'_, RegistryInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Drop one member from a room, removing the room itself once empty so the
/// map does not accumulate dead entries.
fn remove_member(
    rooms: &mut HashMap<RoomId, Vec<RoomMember>>,
    room_id: &RoomId,
    peer_id: &PeerId,
) -> Vec<PeerId> {
    let Some(members) = rooms.get_mut(room_id) else {
        return Vec::new();
    };
    members.retain(|m| &m.peer_id != peer_id);
    if members.is_empty() {
        rooms.remove(room_id);
        return Vec::new();
    }
    members.iter().map(|m| m.peer_id.clone()).collect()
}
