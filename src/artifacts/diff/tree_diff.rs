use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::FlatTree;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    New,
    Deleted,
    Modified,
}

impl ChangeKind {
    pub fn from_entries(old: Option<&ObjectId>, new: Option<&ObjectId>) -> Option<Self> {
        match (old, new) {
            (None, Some(_)) => Some(ChangeKind::New),
            (Some(_), None) => Some(ChangeKind::Deleted),
            (Some(old), Some(new)) if old != new => Some(ChangeKind::Modified),
            _ => None,
        }
    }

    /// Single-letter code used by name-status output
    pub fn status_code(&self) -> char {
        match self {
            ChangeKind::New => 'A',
            ChangeKind::Deleted => 'D',
            ChangeKind::Modified => 'M',
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::New => "new file",
            ChangeKind::Deleted => "deleted",
            ChangeKind::Modified => "modified",
        }
    }
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeChange {
    pub path: PathBuf,
    pub kind: ChangeKind,
    pub old_oid: Option<ObjectId>,
    pub new_oid: Option<ObjectId>,
}

/// Line up several flattened trees path by path
///
/// Yields every path present in at least one tree, in path order, with the blob
/// id each tree holds for it (`None` where the tree lacks the path).
pub fn compare_trees<'t>(
    trees: &'t [&'t FlatTree],
) -> impl Iterator<Item = (&'t Path, Vec<Option<&'t ObjectId>>)> + 't {
    let paths = trees
        .iter()
        .flat_map(|tree| tree.keys())
        .map(PathBuf::as_path)
        .collect::<BTreeSet<_>>();

    paths.into_iter().map(move |path| {
        let oids = trees.iter().map(|tree| tree.get(path)).collect();
        (path, oids)
    })
}

/// Every path whose blob differs between `old` and `new`
pub fn diff_trees(old: &FlatTree, new: &FlatTree) -> Vec<TreeChange> {
    compare_trees(&[old, new])
        .filter_map(|(path, oids)| {
            let (old_oid, new_oid) = (oids[0], oids[1]);
            ChangeKind::from_entries(old_oid, new_oid).map(|kind| TreeChange {
                path: path.to_path_buf(),
                kind,
                old_oid: old_oid.cloned(),
                new_oid: new_oid.cloned(),
            })
        })
        .collect()
}

/// Changed paths between `old` and `new` with their change kind
pub fn iter_changed_files(
    old: &FlatTree,
    new: &FlatTree,
) -> impl Iterator<Item = (PathBuf, ChangeKind)> {
    diff_trees(old, new)
        .into_iter()
        .map(|change| (change.path, change.kind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn flat(entries: &[(&str, &str)]) -> FlatTree {
        entries
            .iter()
            .map(|(path, content)| (PathBuf::from(path), ObjectId::hash(content.as_bytes())))
            .collect()
    }

    #[test]
    fn compare_trees_covers_the_union_of_paths() {
        let left = flat(&[("a", "1"), ("b", "2")]);
        let right = flat(&[("b", "2"), ("c", "3")]);

        let paths = compare_trees(&[&left, &right])
            .map(|(path, oids)| (path.to_path_buf(), oids.iter().map(Option::is_some).collect()))
            .collect::<Vec<(PathBuf, Vec<bool>)>>();

        assert_eq!(
            paths,
            vec![
                (PathBuf::from("a"), vec![true, false]),
                (PathBuf::from("b"), vec![true, true]),
                (PathBuf::from("c"), vec![false, true]),
            ]
        );
    }

    #[test]
    fn changes_are_classified_by_which_side_is_absent() {
        let old = flat(&[("kept", "same"), ("gone", "x"), ("edited", "before")]);
        let new = flat(&[("kept", "same"), ("added", "y"), ("edited", "after")]);

        assert_eq!(
            iter_changed_files(&old, &new).collect::<Vec<_>>(),
            vec![
                (PathBuf::from("added"), ChangeKind::New),
                (PathBuf::from("edited"), ChangeKind::Modified),
                (PathBuf::from("gone"), ChangeKind::Deleted),
            ]
        );
    }

    #[test]
    fn identical_trees_have_no_changes() {
        let tree = flat(&[("a", "1"), ("dir/b", "2")]);
        assert!(diff_trees(&tree, &tree).is_empty());
    }
}
