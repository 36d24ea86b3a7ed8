use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Why a client-supplied room identifier was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidRoomId {
    #[error("room id is empty or blank")]
    Blank,
    #[error("room id contains control characters")]
    ControlCharacter,
}

/// Room identifier as chosen by clients. Any non-blank string without control
/// characters is accepted verbatim; rooms are never pre-provisioned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomId(String);

impl RoomId {
    /// Validate a raw identifier. Rejection happens before any room state is
    /// touched, so a bad id never creates an entry anywhere.
    pub fn parse(raw: &str) -> Result<Self, InvalidRoomId> {
        if raw.trim().is_empty() {
            return Err(InvalidRoomId::Blank);
        }
        if raw.chars().any(char::is_control) {
            return Err(InvalidRoomId::ControlCharacter);
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
