//! Fixed-size entity identifiers.
//!
//! Identifiers are 12 bytes rendered as 24 lowercase hexadecimal characters,
//! the same shape as a document-store object id, so values minted here are
//! interchangeable with ids a MongoDB deployment would hand out.

use std::fmt;
use std::str::FromStr;
use rand::{rng, Rng};
use serde::{Deserialize, Serialize};
use crate::constants::{ENTITY_ID_HEX_LENGTH, ENTITY_ID_LENGTH, ENTITY_ID_TIMESTAMP_BYTES};

/// Identifier of a stored country, state, LGA or city.
///
/// Memory Layout:
/// - bytes 0..4  - creation time, Unix seconds, big-endian
/// - bytes 4..12 - random
///
/// Serializes as its hexadecimal string so JSON responses and stored
/// documents carry the same representation.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityId([u8; ENTITY_ID_LENGTH]);

/// Reasons a string is not a well-formed [`EntityId`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdParseError {
    /// Wrong number of characters
    InvalidLength(usize),
    /// Contains a character outside `[0-9a-fA-F]`
    InvalidCharacter,
}

impl fmt::Display for IdParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdParseError::InvalidLength(len) => {
                write!(f, "expected {} hex characters, got {}", ENTITY_ID_HEX_LENGTH, len)
            }
            IdParseError::InvalidCharacter => write!(f, "identifier must be hexadecimal"),
        }
    }
}

impl std::error::Error for IdParseError {}

impl EntityId {
    /// Generate a fresh identifier stamped with the current time
    pub fn generate() -> Self {
        let seconds = chrono::Utc::now().timestamp().clamp(0, u32::MAX as i64) as u32;
        let mut bytes = [0u8; ENTITY_ID_LENGTH];
        bytes[..ENTITY_ID_TIMESTAMP_BYTES].copy_from_slice(&seconds.to_be_bytes());
        rng().fill(&mut bytes[ENTITY_ID_TIMESTAMP_BYTES..]);
        EntityId(bytes)
    }

    /// Creation time encoded in the identifier, in Unix seconds
    pub fn timestamp(&self) -> u32 {
        let mut seconds = [0u8; ENTITY_ID_TIMESTAMP_BYTES];
        seconds.copy_from_slice(&self.0[..ENTITY_ID_TIMESTAMP_BYTES]);
        u32::from_be_bytes(seconds)
    }

    /// Lowercase hexadecimal form
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl FromStr for EntityId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != ENTITY_ID_HEX_LENGTH {
            return Err(IdParseError::InvalidLength(s.len()));
        }

        let mut bytes = [0u8; ENTITY_ID_LENGTH];
        hex::decode_to_slice(s, &mut bytes).map_err(|_| IdParseError::InvalidCharacter)?;
        Ok(EntityId(bytes))
    }
}

impl TryFrom<String> for EntityId {
    type Error = IdParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> Self {
        id.to_hex()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
