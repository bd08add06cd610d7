use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{IoResultExt, Result};
use std::path::Path;

impl Repository {
    /// Hash a file's bytes as a blob, storing it when `write` is set
    ///
    /// Relative paths are taken from the working directory root.
    pub fn hash_object(&self, file: &Path, write: bool) -> Result<ObjectId> {
        let file_path = self.path().join(file);
        let content = std::fs::read(&file_path).at_path(&file_path)?;
        let blob = Blob::new(content);

        if write {
            self.database().store(&blob)
        } else {
            Ok(blob.object_id())
        }
    }
}
