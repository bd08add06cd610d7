use crate::areas::refs::RefValue;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::RefName;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;
use tracing::info;

impl Repository {
    /// Snapshot the working directory as a commit on top of HEAD
    ///
    /// HEAD is the first parent (none for the first commit) and a pending
    /// `MERGE_HEAD` the second; `MERGE_HEAD` is cleared afterwards. HEAD is
    /// moved through its symbolic chain, so the checked-out branch advances.
    pub fn commit(&self, message: &str) -> Result<ObjectId> {
        let tree_oid = self.write_tree()?;

        let merge_head = self.refs().read_oid(&RefName::merge_head())?;
        let parents = self
            .refs()
            .read_oid(&RefName::head())?
            .into_iter()
            .chain(merge_head.clone())
            .collect::<Vec<_>>();

        let commit = Commit::new(tree_oid, parents, message);
        let commit_oid = self.database().store(&commit)?;

        self.refs().update_ref(
            &RefName::head(),
            &RefValue::Direct(commit_oid.clone()),
            true,
        )?;
        if merge_head.is_some() {
            self.refs().delete_ref(&RefName::merge_head(), false)?;
        }
        info!(
            oid = %commit_oid,
            parents = commit.parents().len(),
            message = commit.short_message(),
            "created commit"
        );

        Ok(commit_oid)
    }

    pub fn get_commit(&self, oid: &ObjectId) -> Result<Commit> {
        self.database().parse_object_as_commit(oid)
    }
}
