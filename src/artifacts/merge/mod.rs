//! Three-way merge
//!
//! - `merge_base`: common ancestor of two commits
//! - `tree_merge`: per-path merge of three flattened trees
//! - `content_merge`: the pluggable per-file content merge
//!
//! The tree merge itself never decides how two edits of one file combine. It
//! hands every path in the union of the three trees to a [`ContentMerger`]
//! and records whatever comes back; conflicts surface as markers in the
//! merged content, not as errors.
//!
//! [`ContentMerger`]: content_merge::ContentMerger

pub mod content_merge;
pub mod merge_base;
pub mod tree_merge;
