//! Store operations
//!
//! Every operation is an `impl Repository` block, split the way git splits its
//! commands:
//!
//! - `plumbing`: object and ref primitives (hash-object, cat-file, write-tree,
//!   read-tree, rev-parse, update-ref, show-ref)
//! - `porcelain`: history workflows built on them (init, commit, checkout,
//!   branch, tag, log, status, diff, reset, merge)

pub mod plumbing;
pub mod porcelain;
