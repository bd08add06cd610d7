use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::{HEADS_PREFIX, RefName, TAGS_PREFIX};
use crate::artifacts::branch::{ANCESTOR_REGEX, PARENT_REGEX, REF_ALIASES};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Result, StoreError};
use tracing::debug;

/// A revision expression naming a commit (or any object, for plain names)
///
/// Supported forms:
/// - Ref names, looked up as `<name>`, `refs/<name>`, `refs/tags/<name>` and
///   `refs/heads/<name>`, in that order
/// - `@`, an alias for `HEAD`
/// - Full 40-character object ids, accepted when no ref of that name exists
/// - `<revision>^`, the first parent of a commit
/// - `<revision>~<n>`, the n-th first-parent ancestor of a commit
///
/// # Examples
///
/// ```ignore
/// let rev = Revision::try_parse("master~2")?;
/// let oid = rev.resolve(&repository)?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Revision {
    /// A ref name or literal object id, resolved lazily
    Ref(String),
    /// The first parent of a revision (e.g. `HEAD^`)
    Parent(Box<Revision>),
    /// The n-th first-parent ancestor of a revision (e.g. `HEAD~3`)
    Ancestor(Box<Revision>, usize),
}

impl Revision {
    pub fn try_parse(revision: &str) -> Result<Revision> {
        if let Some(caps) = regex::Regex::new(PARENT_REGEX)?.captures(revision) {
            let base_revision = Self::try_parse(&caps[1])?;

            return Ok(Revision::Parent(Box::new(base_revision)));
        }

        if let Some(caps) = regex::Regex::new(ANCESTOR_REGEX)?.captures(revision) {
            let generations = caps[2]
                .parse::<usize>()
                .map_err(|_| StoreError::UnknownName(revision.to_string()))?;
            let base_revision = Self::try_parse(&caps[1])?;

            return Ok(Revision::Ancestor(Box::new(base_revision), generations));
        }

        let resolved_name = REF_ALIASES.get(revision).copied().unwrap_or(revision);
        Ok(Revision::Ref(resolved_name.to_string()))
    }

    pub fn resolve(&self, repository: &Repository) -> Result<ObjectId> {
        match self {
            Revision::Ref(name) => Self::resolve_name(name, repository),
            Revision::Parent(base_revision) => {
                let oid = base_revision.resolve(repository)?;
                self.first_parent_of(&oid, repository)
            }
            Revision::Ancestor(base_revision, generations) => {
                let mut oid = base_revision.resolve(repository)?;
                for _ in 0..*generations {
                    oid = self.first_parent_of(&oid, repository)?;
                }

                Ok(oid)
            }
        }
    }

    fn resolve_name(name: &str, repository: &Repository) -> Result<ObjectId> {
        let candidates = [
            name.to_string(),
            format!("refs/{name}"),
            format!("{TAGS_PREFIX}{name}"),
            format!("{HEADS_PREFIX}{name}"),
        ];

        for candidate in candidates {
            // names that can never be refs are simply not candidates
            let Ok(ref_name) = RefName::try_parse(candidate) else {
                continue;
            };

            if let Some(oid) = repository.refs().read_oid(&ref_name)? {
                debug!(name, %ref_name, %oid, "resolved name through ref");
                return Ok(oid);
            }
        }

        if ObjectId::looks_like_oid(name) {
            return ObjectId::try_parse(name);
        }

        Err(StoreError::UnknownName(name.to_string()))
    }

    fn first_parent_of(&self, oid: &ObjectId, repository: &Repository) -> Result<ObjectId> {
        repository
            .database()
            .parse_object_as_commit(oid)?
            .parent()
            .cloned()
            .ok_or_else(|| StoreError::UnknownName(self.to_string()))
    }
}

impl std::fmt::Display for Revision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Revision::Ref(name) => write!(f, "{name}"),
            Revision::Parent(base) => write!(f, "{base}^"),
            Revision::Ancestor(base, generations) => write!(f, "{base}~{generations}"),
        }
    }
}
