//! Tree object
//!
//! Trees represent directory snapshots. They contain entries for files (blobs)
//! and subdirectories (other trees), each identified by name.
//!
//! ## Format
//!
//! One newline-terminated record per entry, sorted by name:
//!
//! ```text
//! blob <40-hex-oid> <name>
//! tree <40-hex-oid> <name>
//! ```
//!
//! Names may contain spaces (the name is everything after the second space)
//! but never newlines or slashes. Sorting makes the tree id a function of the
//! directory contents alone, independent of filesystem enumeration order.

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{Result, StoreError};
use bytes::Bytes;
use derive_new::new;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Flattened tree: relative file path to blob id
pub type FlatTree = BTreeMap<PathBuf, ObjectId>;

/// Kind of object a tree entry points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Blob,
    Tree,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        self.object_type().as_str()
    }

    pub fn object_type(&self) -> ObjectType {
        match self {
            EntryKind::Blob => ObjectType::Blob,
            EntryKind::Tree => ObjectType::Tree,
        }
    }
}

impl TryFrom<&str> for EntryKind {
    type Error = StoreError;

    fn try_from(value: &str) -> Result<Self> {
        match value {
            "blob" => Ok(EntryKind::Blob),
            "tree" => Ok(EntryKind::Tree),
            _ => Err(StoreError::UnknownEntryType {
                tag: value.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct TreeEntry {
    pub kind: EntryKind,
    pub oid: ObjectId,
}

/// Directory snapshot keyed by entry name
///
/// The `BTreeMap` keeps entries in byte-wise name order, which is the
/// serialization order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: BTreeMap<String, TreeEntry>,
}

impl Tree {
    /// Add an entry, replacing any previous entry with the same name.
    pub fn add_entry(&mut self, name: impl Into<String>, entry: TreeEntry) -> Result<()> {
        let name = name.into();
        Self::validate_name(&name)?;
        self.entries.insert(name, entry);

        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&TreeEntry> {
        self.entries.get(name)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &TreeEntry)> {
        self.entries.iter()
    }

    pub fn into_entries(self) -> impl Iterator<Item = (String, TreeEntry)> {
        self.entries.into_iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn validate_name(name: &str) -> Result<()> {
        let reason = if name.is_empty() {
            Some("empty entry name")
        } else if name == "." || name == ".." {
            Some("relative entry name")
        } else if name.contains('/') {
            Some("entry name contains a slash")
        } else if name.contains('\n') {
            Some("entry name contains a newline")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(StoreError::InvalidPath {
                path: name.into(),
                reason: reason.to_string(),
            }),
            None => Ok(()),
        }
    }
}

impl Packable for Tree {
    fn serialize(&self) -> Bytes {
        self.entries
            .iter()
            .map(|(name, entry)| format!("{} {} {}\n", entry.kind, entry.oid, name))
            .collect::<String>()
            .into()
    }
}

impl Unpackable for Tree {
    fn deserialize(payload: Bytes) -> Result<Self> {
        let content = std::str::from_utf8(&payload)
            .map_err(|e| StoreError::malformed(ObjectType::Tree, e.to_string()))?;

        let mut tree = Tree::default();
        for line in content.lines().filter(|line| !line.is_empty()) {
            let mut fields = line.splitn(3, ' ');
            let (Some(kind), Some(oid), Some(name)) = (fields.next(), fields.next(), fields.next())
            else {
                return Err(StoreError::malformed(
                    ObjectType::Tree,
                    format!("truncated entry {line:?}"),
                ));
            };

            let kind = EntryKind::try_from(kind)?;
            let oid = ObjectId::try_parse(oid)
                .map_err(|e| StoreError::malformed(ObjectType::Tree, e.to_string()))?;

            tree.add_entry(name, TreeEntry::new(kind, oid))
                .map_err(|e| StoreError::malformed(ObjectType::Tree, e.to_string()))?;
        }

        Ok(tree)
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }
}
