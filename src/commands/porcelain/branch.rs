use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::{BranchName, RefName};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Result, StoreError};
use tracing::info;

impl Repository {
    /// Create a branch at `start` (HEAD when omitted)
    pub fn create_branch(&self, name: &str, start: Option<&str>) -> Result<ObjectId> {
        let branch_name = BranchName::try_parse(name)?;
        let oid = self.get_oid(start.unwrap_or("@"))?;

        self.refs().create_branch(&branch_name, oid.clone())?;
        info!(branch = %branch_name, %oid, "created branch");

        Ok(oid)
    }

    /// Remove a branch; the checked-out branch cannot be deleted
    pub fn delete_branch(&self, name: &str) -> Result<()> {
        let branch_name = BranchName::try_parse(name)?;
        if self.get_branch_name()?.as_ref() == Some(&branch_name) {
            return Err(StoreError::InvalidRefName {
                name: name.to_string(),
                reason: "cannot delete the checked-out branch".to_string(),
            });
        }

        self.refs().delete_ref(&branch_name.to_branch_ref(), false)
    }

    /// Branch HEAD symbolically points at, `None` when detached
    pub fn get_branch_name(&self) -> Result<Option<BranchName>> {
        self.refs().current_branch()
    }

    pub fn iter_branch_names(&self) -> Result<Vec<BranchName>> {
        self.refs().list_branches()
    }

    pub fn is_branch(&self, name: &str) -> Result<bool> {
        self.refs().is_branch(name)
    }

    /// Object id HEAD resolves to, `None` before the first commit
    pub fn head_oid(&self) -> Result<Option<ObjectId>> {
        self.refs().read_oid(&RefName::head())
    }
}
