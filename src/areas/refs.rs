//! References (branches, HEAD, tags)
//!
//! References are human-readable names pointing into the object namespace.
//! A reference is either:
//! - Direct: containing an object id
//! - Symbolic: naming another reference (e.g., HEAD -> refs/heads/master)
//!
//! ## File Format
//!
//! One file per ref under the store root (`HEAD`, `MERGE_HEAD`,
//! `refs/heads/*`, `refs/tags/*`) holding either:
//! - A 40-character SHA-1 hash (direct reference)
//! - `ref: <name>` for symbolic references
//!
//! ## Updates
//!
//! Writes go through a temp file and a rename, under an exclusive lock on
//! `<store>/refs.lock`, so concurrent writers serialize and readers never see
//! a torn ref.

use crate::artifacts::branch::branch_name::{BranchName, HEADS_PREFIX, RefName};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{IoResultExt, Result, StoreError};
use derive_new::new;
use file_guard::Lock;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref: (.+)$";

const LOCK_FILE_NAME: &str = "refs.lock";

/// Value stored in a ref file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefValue {
    Direct(ObjectId),
    Symbolic(RefName),
}

impl RefValue {
    pub fn oid(&self) -> Option<&ObjectId> {
        match self {
            RefValue::Direct(oid) => Some(oid),
            RefValue::Symbolic(_) => None,
        }
    }

    pub fn is_symbolic(&self) -> bool {
        matches!(self, RefValue::Symbolic(_))
    }

    fn parse(content: &str) -> Result<Option<RefValue>> {
        let content = content.trim();

        if content.is_empty() {
            return Ok(None);
        }

        match regex::Regex::new(SYMREF_REGEX)?.captures(content) {
            Some(symref_match) => Ok(Some(RefValue::Symbolic(RefName::try_parse(
                symref_match[1].trim(),
            )?))),
            None => Ok(Some(RefValue::Direct(ObjectId::try_parse(content)?))),
        }
    }

    fn to_record(&self) -> String {
        match self {
            RefValue::Direct(oid) => format!("{oid}\n"),
            RefValue::Symbolic(target) => format!("ref: {target}\n"),
        }
    }
}

impl std::fmt::Display for RefValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RefValue::Direct(oid) => write!(f, "{oid}"),
            RefValue::Symbolic(target) => write!(f, "ref: {target}"),
        }
    }
}

/// Reference store rooted at the store directory
#[derive(Debug, new)]
pub struct Refs {
    path: Box<Path>,
}

impl Refs {
    /// Point `name` at `value`
    ///
    /// With `deref`, the symbolic chain starting at `name` is followed first and
    /// the last ref in the chain is the one rewritten; updating `HEAD` while it
    /// names `refs/heads/master` moves the branch. Without `deref`, `name`
    /// itself is rewritten.
    pub fn update_ref(&self, name: &RefName, value: &RefValue, deref: bool) -> Result<()> {
        let _guard = self.lock()?;

        let (physical_name, _) = self.resolve(name, deref)?;
        self.write_ref_file(&physical_name, value)?;
        debug!(name = %name, physical = %physical_name, value = %value, "updated ref");

        Ok(())
    }

    /// Read `name`, following symbolic refs when `deref` is set
    ///
    /// Returns `None` when the ref (or, with `deref`, the end of its chain) has
    /// no record. A dereferenced value is never symbolic.
    pub fn get_ref(&self, name: &RefName, deref: bool) -> Result<Option<RefValue>> {
        Ok(self.resolve(name, deref)?.1)
    }

    /// Read `name` through its whole chain and return the object id it ends at
    pub fn read_oid(&self, name: &RefName) -> Result<Option<ObjectId>> {
        Ok(self.get_ref(name, true)?.and_then(|value| value.oid().cloned()))
    }

    /// Remove the record reached from `name`
    pub fn delete_ref(&self, name: &RefName, deref: bool) -> Result<()> {
        let _guard = self.lock()?;

        let (physical_name, value) = self.resolve(name, deref)?;
        if value.is_none() {
            return Err(StoreError::not_found(format!("ref {physical_name}")));
        }

        let ref_path = self.ref_path(&physical_name);
        std::fs::remove_file(&ref_path).at_path(&ref_path)?;
        self.prune_empty_parent_dirs(&ref_path)?;
        debug!(name = %name, physical = %physical_name, "deleted ref");

        Ok(())
    }

    /// Enumerate every ref whose name starts with `prefix`
    ///
    /// Yields `HEAD` and `MERGE_HEAD` (when present) followed by everything
    /// under `refs/`, each resolved according to `deref`. Values are read
    /// lazily, as the iterator advances.
    pub fn iter_refs(
        &self,
        prefix: &str,
        deref: bool,
    ) -> impl Iterator<Item = Result<(RefName, Option<RefValue>)>> + '_ {
        let prefix = prefix.to_string();

        let top_level = [RefName::head(), RefName::merge_head()]
            .into_iter()
            .filter(move |name| self.ref_path(name).is_file())
            .map(Ok);

        let refs_path = self.refs_path();
        let nested = refs_path
            .is_dir()
            .then(|| WalkDir::new(&refs_path).sort_by_file_name())
            .into_iter()
            .flatten()
            .filter_map(move |entry| match entry {
                Ok(entry) if entry.file_type().is_file() && !Self::is_hidden(entry.path()) => {
                    Some(self.ref_name_for(entry.path()))
                }
                Ok(_) => None,
                Err(e) => Some(Err(e.into())),
            });

        top_level
            .chain(nested)
            .filter(move |name| {
                name.as_ref()
                    .map_or(true, |name| name.as_ref().starts_with(&prefix))
            })
            .map(move |name| {
                let name = name?;
                let (_, value) = self.resolve(&name, deref)?;
                Ok((name, value))
            })
    }

    pub fn create_branch(&self, name: &BranchName, oid: ObjectId) -> Result<()> {
        self.create_ref(&name.to_branch_ref(), oid, "branch")
    }

    pub fn create_tag(&self, name: &BranchName, oid: ObjectId) -> Result<()> {
        self.create_ref(&name.to_tag_ref(), oid, "tag")
    }

    pub fn is_branch(&self, name: &str) -> Result<bool> {
        let Ok(branch) = BranchName::try_parse(name) else {
            return Ok(false);
        };

        Ok(self.read_oid(&branch.to_branch_ref())?.is_some())
    }

    /// Branch HEAD points at, or `None` when HEAD is detached or missing
    pub fn current_branch(&self) -> Result<Option<BranchName>> {
        match self.get_ref(&RefName::head(), false)? {
            Some(RefValue::Symbolic(target)) => Ok(target.branch_name()),
            _ => Ok(None),
        }
    }

    /// All branch names, sorted
    pub fn list_branches(&self) -> Result<Vec<BranchName>> {
        let mut branches = self
            .iter_refs(HEADS_PREFIX, false)
            .map(|entry| entry.map(|(name, _)| name.branch_name()))
            .filter_map(Result::transpose)
            .collect::<Result<Vec<_>>>()?;
        branches.sort();

        Ok(branches)
    }

    pub fn head_path(&self) -> PathBuf {
        self.ref_path(&RefName::head())
    }

    pub fn refs_path(&self) -> PathBuf {
        self.path.join("refs")
    }

    pub fn heads_path(&self) -> PathBuf {
        self.refs_path().join("heads")
    }

    pub fn tags_path(&self) -> PathBuf {
        self.refs_path().join("tags")
    }

    /// Follow the chain from `name`, returning the last ref visited and its value
    fn resolve(&self, name: &RefName, deref: bool) -> Result<(RefName, Option<RefValue>)> {
        let mut chain = Vec::new();
        let mut current = name.clone();

        loop {
            if chain.contains(&current) {
                chain.push(current);
                return Err(StoreError::CyclicRef {
                    chain: chain.iter().map(ToString::to_string).collect(),
                });
            }
            chain.push(current.clone());

            match self.read_ref_file(&current)? {
                Some(RefValue::Symbolic(target)) if deref => current = target,
                value => return Ok((current, value)),
            }
        }
    }

    // The existence check and the write happen under one lock, so of two
    // concurrent creators only one succeeds.
    fn create_ref(&self, name: &RefName, oid: ObjectId, kind: &str) -> Result<()> {
        let _guard = self.lock()?;

        if self.read_ref_file(name)?.is_some() {
            return Err(StoreError::InvalidRefName {
                name: name.to_string(),
                reason: format!("a {kind} with that name already exists"),
            });
        }

        self.write_ref_file(name, &RefValue::Direct(oid))?;
        debug!(name = %name, "created ref");

        Ok(())
    }

    fn read_ref_file(&self, name: &RefName) -> Result<Option<RefValue>> {
        let ref_path = self.ref_path(name);

        if !ref_path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&ref_path).at_path(&ref_path)?;
        RefValue::parse(&content)
    }

    fn write_ref_file(&self, name: &RefName, value: &RefValue) -> Result<()> {
        let ref_path = self.ref_path(name);
        let parent = ref_path.parent().unwrap_or(&self.path);

        // create all the parent directories if they don't exist
        std::fs::create_dir_all(parent).at_path(parent)?;

        let mut temp_file = tempfile::NamedTempFile::new_in(parent).at_path(parent)?;
        temp_file
            .write_all(value.to_record().as_bytes())
            .at_path(temp_file.path())?;
        temp_file
            .persist(&ref_path)
            .map_err(|e| e.error)
            .at_path(&ref_path)?;

        Ok(())
    }

    fn lock(&self) -> Result<file_guard::FileGuard<Box<std::fs::File>>> {
        std::fs::create_dir_all(&self.path).at_path(&self.path)?;

        let lock_path = self.path.join(LOCK_FILE_NAME);
        let lock_file = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .at_path(&lock_path)?;

        file_guard::lock(Box::new(lock_file), Lock::Exclusive, 0, 1).at_path(&lock_path)
    }

    fn ref_path(&self, name: &RefName) -> PathBuf {
        self.path.join(name.as_ref_path())
    }

    fn ref_name_for(&self, path: &Path) -> Result<RefName> {
        let relative_path = path
            .strip_prefix(&self.path)
            .map_err(|_| StoreError::InvalidPath {
                path: path.to_path_buf(),
                reason: "ref outside the store".to_string(),
            })?;

        let name = relative_path
            .components()
            .map(|component| component.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        RefName::try_parse(name)
    }

    fn is_hidden(path: &Path) -> bool {
        path.file_name()
            .is_some_and(|name| name.to_string_lossy().starts_with('.'))
    }

    fn prune_empty_parent_dirs(&self, path: &Path) -> Result<()> {
        let refs_path = self.refs_path();

        if let Some(parent) = path.parent()
            && parent.starts_with(&refs_path)
            && parent != refs_path
            && parent != self.heads_path()
            && parent != self.tags_path()
            && parent.read_dir().at_path(parent)?.next().is_none()
        {
            std::fs::remove_dir(parent).at_path(parent)?;
            self.prune_empty_parent_dirs(parent)?;
        }

        Ok(())
    }
}
