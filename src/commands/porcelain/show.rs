use crate::areas::repository::Repository;
use crate::artifacts::diff::tree_diff::{TreeChange, diff_trees};
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;

/// A commit together with what it changed
#[derive(Debug, Clone)]
pub struct CommitDetails {
    pub oid: ObjectId,
    pub commit: Commit,
    /// Paths changed relative to the first parent; a root commit is compared
    /// against an empty tree
    pub changes: Vec<TreeChange>,
}

impl Repository {
    /// Describe the commit `name` resolves to (HEAD when omitted)
    pub fn show(&self, name: Option<&str>) -> Result<CommitDetails> {
        let oid = self.get_oid(name.unwrap_or("@"))?;
        let commit = self.get_commit(&oid)?;

        let parent_tree = self.commit_tree(commit.parent())?;
        let tree = self.commit_tree(Some(&oid))?;

        Ok(CommitDetails {
            changes: diff_trees(&parent_tree, &tree),
            oid,
            commit,
        })
    }
}
