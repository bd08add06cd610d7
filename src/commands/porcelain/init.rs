use crate::areas::refs::RefValue;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::{BranchName, RefName};
use crate::errors::{IoResultExt, Result, StoreError};
use std::fs;
use tracing::info;

impl Repository {
    /// Create an empty store with HEAD on the configured default branch
    pub fn init(&self) -> Result<()> {
        let store_path = self.config().store_path();
        if self.is_initialized() {
            return Err(StoreError::AlreadyInitialized { path: store_path });
        }

        let objects_path = self.database().objects_path();
        fs::create_dir_all(objects_path).at_path(objects_path)?;

        let heads_path = self.refs().heads_path();
        fs::create_dir_all(&heads_path).at_path(&heads_path)?;

        let tags_path = self.refs().tags_path();
        fs::create_dir_all(&tags_path).at_path(&tags_path)?;

        let default_branch = BranchName::try_parse(self.config().default_branch())?;
        self.refs().update_ref(
            &RefName::head(),
            &RefValue::Symbolic(default_branch.to_branch_ref()),
            false,
        )?;
        info!(path = %store_path.display(), branch = %default_branch, "initialized empty store");

        Ok(())
    }
}
