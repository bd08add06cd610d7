use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::{BranchName, RefName};
use crate::artifacts::diff::tree_diff::{ChangeKind, iter_changed_files};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::FlatTree;
use crate::errors::Result;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    /// Checked-out branch, `None` when HEAD is detached
    pub branch: Option<BranchName>,
    pub head: Option<ObjectId>,
    /// Commit being merged, when a merge is waiting to be committed
    pub merge_head: Option<ObjectId>,
    /// Paths that differ between HEAD's tree and the working directory
    pub changes: Vec<(PathBuf, ChangeKind)>,
}

impl Repository {
    pub fn status(&self) -> Result<Status> {
        let head = self.head_oid()?;
        let head_tree = self.commit_tree(head.as_ref())?;
        let working_tree = self.get_working_tree()?;

        Ok(Status {
            branch: self.get_branch_name()?,
            merge_head: self.refs().read_oid(&RefName::merge_head())?,
            changes: iter_changed_files(&head_tree, &working_tree).collect(),
            head,
        })
    }

    /// Flattened tree of a commit, empty for `None`
    pub(crate) fn commit_tree(&self, commit_oid: Option<&ObjectId>) -> Result<FlatTree> {
        match commit_oid {
            Some(oid) => {
                let commit = self.get_commit(oid)?;
                self.database()
                    .flatten_tree(commit.tree_oid(), Path::new(""))
            }
            None => Ok(FlatTree::new()),
        }
    }
}
