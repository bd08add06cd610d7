use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::RefName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;
use std::collections::HashMap;

impl Repository {
    /// Every ref under `prefix` with the object id its chain ends at, sorted by name
    ///
    /// Refs whose chain ends nowhere (a branch with no commits yet) are left out.
    pub fn show_refs(&self, prefix: &str) -> Result<Vec<(RefName, ObjectId)>> {
        let mut refs = self
            .refs()
            .iter_refs(prefix, true)
            .filter_map(|entry| match entry {
                Ok((name, value)) => value
                    .and_then(|value| value.oid().cloned())
                    .map(|oid| Ok((name, oid))),
                Err(e) => Some(Err(e)),
            })
            .collect::<Result<Vec<_>>>()?;
        refs.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(refs)
    }

    /// Ref names grouped by the object id they resolve to
    pub fn reverse_refs(&self) -> Result<HashMap<ObjectId, Vec<RefName>>> {
        let mut reverse_refs: HashMap<ObjectId, Vec<RefName>> = HashMap::new();

        for (name, oid) in self.show_refs("")? {
            reverse_refs.entry(oid).or_default().push(name);
        }

        Ok(reverse_refs)
    }
}
