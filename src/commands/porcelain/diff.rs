use crate::areas::repository::Repository;
use crate::artifacts::diff::tree_diff::{TreeChange, diff_trees};
use crate::errors::Result;

impl Repository {
    /// Changed paths between two commits
    ///
    /// `from` defaults to HEAD (an empty tree before the first commit); a
    /// missing `to` compares against the working directory.
    pub fn diff(&self, from: Option<&str>, to: Option<&str>) -> Result<Vec<TreeChange>> {
        let from_oid = match from {
            Some(name) => Some(self.get_oid(name)?),
            None => self.head_oid()?,
        };
        let from_tree = self.commit_tree(from_oid.as_ref())?;

        let to_tree = match to {
            Some(name) => self.commit_tree(Some(&self.get_oid(name)?))?,
            None => self.get_working_tree()?,
        };

        Ok(diff_trees(&from_tree, &to_tree))
    }
}
