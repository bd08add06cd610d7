use crate::areas::refs::RefValue;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::RefName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;

impl Repository {
    /// Point the ref `name` (through its symbolic chain) at what `target` resolves to
    pub fn update_ref(&self, name: &str, target: &str) -> Result<ObjectId> {
        let ref_name = RefName::try_parse(name)?;
        let oid = self.get_oid(target)?;

        self.refs()
            .update_ref(&ref_name, &RefValue::Direct(oid.clone()), true)?;

        Ok(oid)
    }

    /// Point the ref `name` itself at another ref
    pub fn symbolic_ref(&self, name: &str, target: &str) -> Result<()> {
        let ref_name = RefName::try_parse(name)?;
        let target = RefName::try_parse(target)?;

        self.refs()
            .update_ref(&ref_name, &RefValue::Symbolic(target), false)
    }
}
