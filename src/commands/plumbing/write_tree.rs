use crate::areas::repository::Repository;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::{EntryKind, FlatTree, Tree, TreeEntry};
use crate::errors::Result;
use std::path::Path;
use tracing::{debug, info};

impl Repository {
    /// Store the working directory as a tree and return the root tree's id
    ///
    /// Regular files become blobs and directories become sub-trees; symlinks
    /// and the store directory are skipped. Directories holding no files are
    /// left out, as a checkout could never recreate them.
    pub fn write_tree(&self) -> Result<ObjectId> {
        let tree = self.build_tree(Path::new(""))?;
        let oid = self.database().store(&tree)?;
        info!(%oid, entries = tree.len(), "wrote working tree");

        Ok(oid)
    }

    /// Flattened view of the working directory, without storing anything
    pub fn get_working_tree(&self) -> Result<FlatTree> {
        self.workspace()
            .list_files()?
            .into_iter()
            .map(|path| {
                let content = self.workspace().read_file(&path)?;
                Ok((path, ObjectId::hash(&content)))
            })
            .collect()
    }

    fn build_tree(&self, dir: &Path) -> Result<Tree> {
        let mut tree = Tree::default();

        for (name, kind) in self.workspace().list_dir(dir)? {
            let path = dir.join(&name);
            let oid = match kind {
                EntryKind::Blob => {
                    let blob = Blob::new(self.workspace().read_file(&path)?);
                    self.database().store(&blob)?
                }
                EntryKind::Tree => {
                    let subtree = self.build_tree(&path)?;
                    if subtree.is_empty() {
                        debug!(dir = %path.display(), "skipped directory without files");
                        continue;
                    }

                    let oid = self.database().store(&subtree)?;
                    debug!(dir = %path.display(), %oid, entries = subtree.len(), "stored tree");
                    oid
                }
            };

            tree.add_entry(name, TreeEntry::new(kind, oid))?;
        }

        Ok(tree)
    }
}
