use crate::areas::refs::RefValue;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::{BranchName, RefName};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;
use tracing::info;

impl Repository {
    /// Materialize the commit `name` resolves to and move HEAD onto it
    ///
    /// HEAD itself is rewritten: it becomes symbolic when `name` is a branch
    /// and a detached object id otherwise.
    pub fn checkout(&self, name: &str) -> Result<ObjectId> {
        let oid = self.get_oid(name)?;
        let commit = self.get_commit(&oid)?;

        self.read_tree(commit.tree_oid())?;

        let head = if self.is_branch(name)? {
            RefValue::Symbolic(BranchName::try_parse(name)?.to_branch_ref())
        } else {
            RefValue::Direct(oid.clone())
        };
        self.refs().update_ref(&RefName::head(), &head, false)?;
        info!(%name, %oid, detached = !head.is_symbolic(), "checked out");

        Ok(oid)
    }
}
