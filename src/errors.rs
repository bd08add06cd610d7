//! Error taxonomy for the store
//!
//! Every fallible operation in the library returns [`StoreError`]. The variants
//! map one-to-one onto the failure classes a caller may want to branch on:
//! missing objects or refs, type mismatches, unresolvable names, corrupted
//! objects and cyclic symbolic refs. I/O failures always carry the path that
//! was being touched.

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// An object or ref that was asked for does not exist.
    #[error("not found: {what}")]
    NotFound { what: String },

    /// A stored object carries a different type tag than the caller expected.
    #[error("object {oid} is a {actual}, expected a {expected}")]
    TypeMismatch {
        oid: ObjectId,
        expected: ObjectType,
        actual: ObjectType,
    },

    /// A name resolves to no ref and is not a literal object id.
    #[error("unknown name {0}")]
    UnknownName(String),

    /// A tree entry tag is neither `blob` nor `tree`.
    #[error("unknown tree entry type {tag:?}")]
    UnknownEntryType { tag: String },

    #[error("malformed {kind} object: {reason}")]
    MalformedObject { kind: ObjectType, reason: String },

    /// A symbolic ref chain loops back onto itself.
    #[error("symbolic ref cycle: {}", chain.join(" -> "))]
    CyclicRef { chain: Vec<String> },

    /// A stored object record has no type separator.
    #[error("corrupt object record: {0}")]
    CorruptRecord(String),

    #[error("invalid object id {value:?}: {reason}")]
    InvalidObjectId { value: String, reason: String },

    #[error("invalid ref name {name:?}: {reason}")]
    InvalidRefName { name: String, reason: String },

    #[error("path {} cannot be stored: {reason}", path.display())]
    InvalidPath { path: PathBuf, reason: String },

    /// `init` found a store already in place.
    #[error("store already initialized at {}", path.display())]
    AlreadyInitialized { path: PathBuf },

    #[error("content merge failed for {}: {reason}", path.display())]
    ContentMerge { path: PathBuf, reason: String },

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Walk(#[from] walkdir::Error),

    #[error(transparent)]
    Regex(#[from] regex::Error),
}

impl StoreError {
    pub fn not_found(what: impl Into<String>) -> Self {
        StoreError::NotFound { what: what.into() }
    }

    pub fn malformed(kind: ObjectType, reason: impl Into<String>) -> Self {
        StoreError::MalformedObject {
            kind,
            reason: reason.into(),
        }
    }
}

/// Attach the offending path to a raw I/O result.
pub trait IoResultExt<T> {
    fn at_path(self, path: &Path) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn at_path(self, path: &Path) -> Result<T> {
        self.map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
