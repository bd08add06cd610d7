//! Content-addressed object database
//!
//! Every object lives in its own file, `<objects>/<oid>`, holding the framed
//! record `<type>\0<payload>`. The oid is the SHA-1 of the payload, so objects
//! are immutable by construction: writing the same payload twice is a no-op.

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::{EntryKind, FlatTree, Tree};
use crate::errors::{IoResultExt, Result, StoreError};
use bytes::Bytes;
use derive_new::new;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, new)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Store a raw payload under the given type and return its id
    ///
    /// The record is only written when no object with that id exists yet.
    pub fn store_bytes(&self, payload: &[u8], object_type: ObjectType) -> Result<ObjectId> {
        let oid = ObjectId::hash(payload);
        let object_path = self.object_path(&oid);

        // write the object to disk unless it already exists
        if !object_path.exists() {
            self.write_object(&object_path, &object_type.frame(payload))?;
            debug!(%oid, %object_type, size = payload.len(), "stored object");
        }

        Ok(oid)
    }

    pub fn store(&self, object: &impl Object) -> Result<ObjectId> {
        self.store_bytes(&object.serialize(), object.object_type())
    }

    /// Load an object's payload, optionally checking its type tag
    ///
    /// An empty payload passes any type check: the empty blob and the empty
    /// tree share one id, and whichever was stored first owns the record.
    pub fn load(&self, oid: &ObjectId, expected: Option<ObjectType>) -> Result<Bytes> {
        let (actual, payload) = self.read_object(oid)?;

        match expected {
            Some(expected) if expected != actual && !payload.is_empty() => {
                Err(StoreError::TypeMismatch {
                    oid: oid.clone(),
                    expected,
                    actual,
                })
            }
            _ => Ok(payload),
        }
    }

    pub fn contains(&self, oid: &ObjectId) -> bool {
        self.object_path(oid).is_file()
    }

    pub fn parse_object_as_blob(&self, oid: &ObjectId) -> Result<Blob> {
        Blob::deserialize(self.load(oid, Some(ObjectType::Blob))?)
    }

    pub fn parse_object_as_tree(&self, oid: &ObjectId) -> Result<Tree> {
        Tree::deserialize(self.load(oid, Some(ObjectType::Tree))?)
    }

    pub fn parse_object_as_commit(&self, oid: &ObjectId) -> Result<Commit> {
        Commit::deserialize(self.load(oid, Some(ObjectType::Commit))?)
    }

    /// Expand a tree into a flat mapping of path to blob id
    ///
    /// Paths are `base_path` joined with each entry name; sub-trees are
    /// expanded recursively.
    pub fn flatten_tree(&self, oid: &ObjectId, base_path: &Path) -> Result<FlatTree> {
        let mut flat_tree = FlatTree::new();

        for (name, entry) in self.parse_object_as_tree(oid)?.into_entries() {
            let path = base_path.join(name);
            match entry.kind {
                EntryKind::Blob => {
                    flat_tree.insert(path, entry.oid);
                }
                EntryKind::Tree => flat_tree.extend(self.flatten_tree(&entry.oid, &path)?),
            }
        }

        Ok(flat_tree)
    }

    fn object_path(&self, oid: &ObjectId) -> PathBuf {
        self.path.join(oid.as_ref())
    }

    fn read_object(&self, oid: &ObjectId) -> Result<(ObjectType, Bytes)> {
        let object_path = self.object_path(oid);

        let record = match std::fs::read(&object_path) {
            Ok(record) => Bytes::from(record),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::not_found(format!("object {oid}")));
            }
            Err(e) => return Err(e).at_path(&object_path),
        };

        let (object_type, payload) = ObjectType::unframe(&record)?;
        let payload = record.slice_ref(payload);

        Ok((object_type, payload))
    }

    // Write to a temp file next to the target and rename it into place, so
    // a reader never observes a partially written object.
    fn write_object(&self, object_path: &Path, record: &[u8]) -> Result<()> {
        std::fs::create_dir_all(&self.path).at_path(&self.path)?;

        let mut temp_file = tempfile::NamedTempFile::new_in(&self.path).at_path(&self.path)?;
        temp_file.write_all(record).at_path(temp_file.path())?;
        temp_file
            .persist(object_path)
            .map_err(|e| e.error)
            .at_path(object_path)?;

        Ok(())
    }
}
