//! Object identifier (SHA-1 digest)
//!
//! Object IDs are 40-character lowercase hexadecimal strings: the SHA-1 digest
//! of an object's payload. The type tag is stored next to the payload but is not
//! part of the digest.
//!
//! ## Storage
//!
//! Objects are stored flat, one file per id: `<store>/objects/<oid>`

use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::errors::{Result, StoreError};
use sha1::{Digest, Sha1};
use std::str::FromStr;

/// Object identifier
///
/// A validated 40-character hexadecimal string. Immutable once built; the
/// same payload always yields the same id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object ID from a string
    ///
    /// Upper-case hex digits are accepted and normalised to lower case.
    pub fn try_parse(id: impl Into<String>) -> Result<Self> {
        let id = id.into();

        if id.len() != OBJECT_ID_LENGTH {
            return Err(StoreError::InvalidObjectId {
                reason: format!("expected {OBJECT_ID_LENGTH} characters, got {}", id.len()),
                value: id,
            });
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(StoreError::InvalidObjectId {
                value: id,
                reason: "not a hexadecimal string".to_string(),
            });
        }

        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Whether `candidate` is syntactically a full object id.
    pub fn looks_like_oid(candidate: &str) -> bool {
        candidate.len() == OBJECT_ID_LENGTH && candidate.chars().all(|c| c.is_ascii_hexdigit())
    }

    /// Digest of a raw payload.
    pub fn hash(payload: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(payload);

        Self(format!("{:x}", hasher.finalize()))
    }

    /// First 10 characters, the abbreviation used in command output
    pub fn to_short_oid(&self) -> &str {
        &self.0[..10]
    }
}

impl FromStr for ObjectId {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::try_parse(s)
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
