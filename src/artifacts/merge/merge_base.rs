use crate::areas::database::Database;
use crate::artifacts::log::rev_list::RevList;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;
use std::collections::HashSet;
use tracing::debug;

/// First commit reachable from `other` that is also reachable from `head`
///
/// "Reachable" includes the commit itself, so the base of a commit and one
/// of its descendants is the commit. Candidates are tried in the
/// breadth-first order of the walk from `other`. Returns `None` for
/// unrelated histories.
pub fn merge_base(
    database: &Database,
    head: &ObjectId,
    other: &ObjectId,
) -> Result<Option<ObjectId>> {
    let head_ancestors = RevList::new(database, [head.clone()])
        .oids()
        .collect::<Result<HashSet<_>>>()?;

    for oid in RevList::new(database, [other.clone()]).oids() {
        let oid = oid?;
        if head_ancestors.contains(&oid) {
            debug!(%head, %other, base = %oid, "found merge base");
            return Ok(Some(oid));
        }
    }

    Ok(None)
}
