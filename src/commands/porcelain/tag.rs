use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::{BranchName, TAGS_PREFIX};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;
use tracing::info;

impl Repository {
    /// Create a tag at `target` (HEAD when omitted)
    pub fn create_tag(&self, name: &str, target: Option<&str>) -> Result<ObjectId> {
        let tag_name = BranchName::try_parse(name)?;
        let oid = self.get_oid(target.unwrap_or("@"))?;

        self.refs().create_tag(&tag_name, oid.clone())?;
        info!(tag = %tag_name, %oid, "created tag");

        Ok(oid)
    }

    /// Tag names, sorted
    pub fn list_tags(&self) -> Result<Vec<String>> {
        Ok(self
            .show_refs(TAGS_PREFIX)?
            .into_iter()
            .filter_map(|(name, _)| name.as_ref().strip_prefix(TAGS_PREFIX).map(str::to_string))
            .collect())
    }
}
