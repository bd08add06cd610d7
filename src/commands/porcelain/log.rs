use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::RefName;
use crate::artifacts::log::rev_list::RevList;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;

/// One commit of a history listing, with the refs pointing at it
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub oid: ObjectId,
    pub commit: Commit,
    pub refs: Vec<RefName>,
}

impl Repository {
    /// Breadth-first walk over `start_oids` and all their ancestors
    pub fn iter_commits_and_parents(
        &self,
        start_oids: impl IntoIterator<Item = ObjectId>,
    ) -> RevList<'_> {
        RevList::new(self.database(), start_oids)
    }

    /// History reachable from `start` (HEAD when omitted), decorated with ref names
    pub fn log<'r>(
        &'r self,
        start: Option<&str>,
    ) -> Result<impl Iterator<Item = Result<LogEntry>> + use<'r>> {
        let start_oid = self.get_oid(start.unwrap_or("@"))?;
        let mut reverse_refs = self.reverse_refs()?;

        Ok(self
            .iter_commits_and_parents([start_oid])
            .map(move |entry| {
                let (oid, commit) = entry?;
                let refs = reverse_refs.remove(&oid).unwrap_or_default();

                Ok(LogEntry { oid, commit, refs })
            }))
    }
}
