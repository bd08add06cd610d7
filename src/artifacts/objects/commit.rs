//! Commit object
//!
//! Commits represent snapshots of the repository. They contain:
//! - A tree object ID (directory snapshot)
//! - Parent commit ID(s) (none for the first commit, two for a merge)
//! - Commit message
//!
//! ## Format
//!
//! ```text
//! tree <tree-sha>
//! parent <parent-sha>
//!
//! <commit message>
//! ```

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::{Result, StoreError};
use bytes::Bytes;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// Tree object ID representing the directory snapshot
    tree_oid: ObjectId,
    /// Parent commit IDs (empty for initial commit, multiple for merge commits)
    parents: Vec<ObjectId>,
    message: String,
}

impl Commit {
    pub fn new(tree_oid: ObjectId, parents: Vec<ObjectId>, message: impl Into<String>) -> Self {
        Commit {
            tree_oid,
            parents,
            message: message.into(),
        }
    }

    pub fn tree_oid(&self) -> &ObjectId {
        &self.tree_oid
    }

    /// First parent, or `None` for a root commit
    pub fn parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// First line of the message, used by one-line listings
    pub fn short_message(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }
}

impl Packable for Commit {
    fn serialize(&self) -> Bytes {
        let mut content = format!("tree {}\n", self.tree_oid);
        for parent in &self.parents {
            content.push_str(&format!("parent {parent}\n"));
        }
        content.push('\n');
        content.push_str(&self.message);
        content.push('\n');

        content.into()
    }
}

impl Unpackable for Commit {
    fn deserialize(payload: Bytes) -> Result<Self> {
        let content = std::str::from_utf8(&payload)
            .map_err(|e| StoreError::malformed(ObjectType::Commit, e.to_string()))?;

        let (header, message) = content
            .split_once("\n\n")
            .ok_or_else(|| StoreError::malformed(ObjectType::Commit, "missing blank line"))?;

        let mut tree_oid = None;
        let mut parents = Vec::new();

        for line in header.lines() {
            let (key, value) = line.split_once(' ').ok_or_else(|| {
                StoreError::malformed(ObjectType::Commit, format!("invalid header {line:?}"))
            })?;
            let oid = ObjectId::try_parse(value)
                .map_err(|e| StoreError::malformed(ObjectType::Commit, e.to_string()))?;

            match key {
                "tree" if tree_oid.is_none() => tree_oid = Some(oid),
                "tree" => {
                    return Err(StoreError::malformed(
                        ObjectType::Commit,
                        "duplicate tree line",
                    ));
                }
                "parent" => parents.push(oid),
                _ => {
                    return Err(StoreError::malformed(
                        ObjectType::Commit,
                        format!("unknown header field {key:?}"),
                    ));
                }
            }
        }

        let tree_oid = tree_oid
            .ok_or_else(|| StoreError::malformed(ObjectType::Commit, "missing tree line"))?;
        let message = message.strip_suffix('\n').unwrap_or(message);

        Ok(Self::new(tree_oid, parents, message))
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }
}
