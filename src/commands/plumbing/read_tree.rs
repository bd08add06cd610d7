use crate::areas::repository::Repository;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;
use std::path::Path;
use tracing::info;

impl Repository {
    /// Replace the working directory with the contents of a tree
    ///
    /// The tree is flattened before anything is removed, so a corrupt tree
    /// leaves the working directory untouched. Once writing starts, a failure
    /// leaves the files written so far in place.
    pub fn read_tree(&self, tree_oid: &ObjectId) -> Result<()> {
        let flat_tree = self.database().flatten_tree(tree_oid, Path::new(""))?;

        self.workspace().empty()?;
        for (path, blob_oid) in &flat_tree {
            let blob = self.database().parse_object_as_blob(blob_oid)?;
            self.workspace().write_file(path, blob.content())?;
        }
        info!(tree = %tree_oid, files = flat_tree.len(), "read tree into working directory");

        Ok(())
    }
}
