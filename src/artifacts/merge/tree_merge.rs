use crate::areas::database::Database;
use crate::artifacts::diff::tree_diff::compare_trees;
use crate::artifacts::merge::content_merge::ContentMerger;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::FlatTree;
use crate::errors::Result;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Merged working tree contents: relative path to file bytes
pub type MergedTree = BTreeMap<PathBuf, Bytes>;

/// Three-way merge of the trees `base`, `head` and `other`
///
/// `base` is `None` for unrelated histories, which merges against an empty
/// tree. Every path in the union of the three trees goes through `merger`
/// exactly once; paths it drops are absent from the result.
pub fn merge_trees(
    database: &Database,
    merger: &dyn ContentMerger,
    base: Option<&ObjectId>,
    head: &ObjectId,
    other: &ObjectId,
) -> Result<MergedTree> {
    let base_tree = match base {
        Some(base) => database.flatten_tree(base, Path::new(""))?,
        None => FlatTree::new(),
    };
    let head_tree = database.flatten_tree(head, Path::new(""))?;
    let other_tree = database.flatten_tree(other, Path::new(""))?;

    let mut merged = MergedTree::new();
    for (path, oids) in compare_trees(&[&base_tree, &head_tree, &other_tree]) {
        let base_blob = load_blob(database, oids[0])?;
        let head_blob = load_blob(database, oids[1])?;
        let other_blob = load_blob(database, oids[2])?;

        let content = merger.merge(
            path,
            base_blob.as_deref(),
            head_blob.as_deref(),
            other_blob.as_deref(),
        )?;

        match content {
            Some(content) => {
                merged.insert(path.to_path_buf(), content);
            }
            None => debug!(path = %path.display(), "path dropped by merge"),
        }
    }

    Ok(merged)
}

fn load_blob(database: &Database, oid: Option<&ObjectId>) -> Result<Option<Bytes>> {
    oid.map(|oid| database.parse_object_as_blob(oid).map(|blob| blob.into_content()))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::merge::content_merge::WholeFileMerger;
    use crate::artifacts::objects::object_type::ObjectType;
    use crate::artifacts::objects::tree::{EntryKind, Tree, TreeEntry};
    use assert_fs::TempDir;
    use pretty_assertions::assert_eq;

    fn tree(db: &Database, files: &[(&str, &str)]) -> ObjectId {
        let mut tree = Tree::default();
        for (name, content) in files {
            let oid = db.store_bytes(content.as_bytes(), ObjectType::Blob).unwrap();
            tree.add_entry(*name, TreeEntry::new(EntryKind::Blob, oid))
                .unwrap();
        }
        db.store(&tree).unwrap()
    }

    fn merged(files: &[(&str, &str)]) -> MergedTree {
        files
            .iter()
            .map(|(path, content)| (PathBuf::from(path), Bytes::copy_from_slice(content.as_bytes())))
            .collect()
    }

    #[test]
    fn identical_sides_merge_to_head() {
        let dir = TempDir::new().unwrap();
        let db = Database::new(dir.path().to_path_buf().into_boxed_path());

        let base = tree(&db, &[("a", "1"), ("b", "2")]);
        let side = tree(&db, &[("a", "1"), ("c", "3")]);

        assert_eq!(
            merge_trees(&db, &WholeFileMerger, Some(&base), &side, &side).unwrap(),
            merged(&[("a", "1"), ("c", "3")])
        );
    }

    #[test]
    fn each_side_contributes_its_own_changes() {
        let dir = TempDir::new().unwrap();
        let db = Database::new(dir.path().to_path_buf().into_boxed_path());

        let base = tree(&db, &[("shared", "base"), ("doomed", "x")]);
        let head = tree(&db, &[("shared", "ours"), ("doomed", "x"), ("mine", "m")]);
        let other = tree(&db, &[("shared", "base"), ("theirs", "t")]);

        assert_eq!(
            merge_trees(&db, &WholeFileMerger, Some(&base), &head, &other).unwrap(),
            merged(&[("mine", "m"), ("shared", "ours"), ("theirs", "t")])
        );
    }

    #[test]
    fn unrelated_trees_merge_against_an_empty_base() {
        let dir = TempDir::new().unwrap();
        let db = Database::new(dir.path().to_path_buf().into_boxed_path());

        let head = tree(&db, &[("a", "ours\n")]);
        let other = tree(&db, &[("a", "theirs\n"), ("b", "b")]);

        let result = merge_trees(&db, &WholeFileMerger, None, &head, &other).unwrap();
        assert_eq!(
            result[Path::new("a")],
            Bytes::from_static(b"<<<<<<< HEAD\nours\n=======\ntheirs\n>>>>>>> MERGE_HEAD\n")
        );
        assert_eq!(result[Path::new("b")], Bytes::from_static(b"b"));
    }
}
