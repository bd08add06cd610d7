use crate::areas::refs::RefValue;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::RefName;
use crate::artifacts::merge::content_merge::ContentMerger;
use crate::artifacts::merge::merge_base;
use crate::artifacts::merge::tree_merge::{MergedTree, merge_trees};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Result, StoreError};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// `other` is already reachable from HEAD
    UpToDate,
    /// HEAD was an ancestor of `other` and now points at it
    FastForward { from: ObjectId, to: ObjectId },
    /// Merged contents were written and `MERGE_HEAD` set, awaiting a commit
    Merged {
        base: Option<ObjectId>,
        other: ObjectId,
    },
}

impl Repository {
    pub fn merge_base(&self, left: &str, right: &str) -> Result<Option<ObjectId>> {
        let left = self.get_oid(left)?;
        let right = self.get_oid(right)?;

        merge_base::merge_base(self.database(), &left, &right)
    }

    /// Merge the commit `other` resolves to into HEAD
    pub fn merge(&self, other: &str, merger: &dyn ContentMerger) -> Result<MergeOutcome> {
        let head = self
            .head_oid()?
            .ok_or_else(|| StoreError::not_found("HEAD commit"))?;
        let other = self.get_oid(other)?;
        let base = merge_base::merge_base(self.database(), &head, &other)?;

        if base.as_ref() == Some(&other) {
            info!(%head, %other, "already up to date");
            return Ok(MergeOutcome::UpToDate);
        }

        if base.as_ref() == Some(&head) {
            let other_commit = self.get_commit(&other)?;
            self.read_tree(other_commit.tree_oid())?;
            self.refs()
                .update_ref(&RefName::head(), &RefValue::Direct(other.clone()), true)?;
            info!(from = %head, to = %other, "fast-forward merge");

            return Ok(MergeOutcome::FastForward {
                from: head,
                to: other,
            });
        }

        let base_tree = base
            .as_ref()
            .map(|oid| self.get_commit(oid))
            .transpose()?
            .map(|commit| commit.tree_oid().clone());
        let head_commit = self.get_commit(&head)?;
        let other_commit = self.get_commit(&other)?;

        let merged = merge_trees(
            self.database(),
            merger,
            base_tree.as_ref(),
            head_commit.tree_oid(),
            other_commit.tree_oid(),
        )?;
        self.write_merged_tree(&merged)?;

        self.refs()
            .update_ref(&RefName::merge_head(), &RefValue::Direct(other.clone()), false)?;
        info!(%head, %other, files = merged.len(), "merged, awaiting commit");

        Ok(MergeOutcome::Merged { base, other })
    }

    fn write_merged_tree(&self, merged: &MergedTree) -> Result<()> {
        self.workspace().empty()?;
        for (path, content) in merged {
            self.workspace().write_file(path, content)?;
        }

        Ok(())
    }
}
