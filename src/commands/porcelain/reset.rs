use crate::areas::refs::RefValue;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::RefName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;
use tracing::info;

impl Repository {
    /// Move HEAD (through its chain) to `name` without touching the working directory
    pub fn reset(&self, name: &str) -> Result<ObjectId> {
        let oid = self.get_oid(name)?;
        // only commits may become HEAD
        self.get_commit(&oid)?;

        self.refs()
            .update_ref(&RefName::head(), &RefValue::Direct(oid.clone()), true)?;
        info!(%oid, "reset HEAD");

        Ok(oid)
    }
}
