use crate::areas::database::Database;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;
use std::collections::{HashSet, VecDeque};
use tracing::debug;

/// Breadth-first walk over commits and their parents
///
/// Every commit is yielded at most once. A failure to load a commit is
/// yielded as an error and ends the walk.
#[derive(Debug)]
pub struct RevList<'d> {
    database: &'d Database,
    queue: VecDeque<ObjectId>,
    visited: HashSet<ObjectId>,
    failed: bool,
}

impl<'d> RevList<'d> {
    pub fn new(database: &'d Database, start_oids: impl IntoIterator<Item = ObjectId>) -> Self {
        RevList {
            database,
            queue: start_oids.into_iter().collect(),
            visited: HashSet::new(),
            failed: false,
        }
    }

    /// Consume the walk, keeping only the commit ids
    pub fn oids(self) -> impl Iterator<Item = Result<ObjectId>> + 'd {
        self.map(|entry| entry.map(|(oid, _)| oid))
    }
}

impl Iterator for RevList<'_> {
    type Item = Result<(ObjectId, Commit)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        while let Some(oid) = self.queue.pop_front() {
            if !self.visited.insert(oid.clone()) {
                continue;
            }

            let commit = match self.database.parse_object_as_commit(&oid) {
                Ok(commit) => commit,
                Err(e) => {
                    self.failed = true;
                    return Some(Err(e));
                }
            };

            self.queue.extend(
                commit
                    .parents()
                    .iter()
                    .filter(|parent| !self.visited.contains(*parent))
                    .cloned(),
            );
            debug!(%oid, pending = self.queue.len(), "visited commit");

            return Some(Ok((oid, commit)));
        }

        None
    }
}
