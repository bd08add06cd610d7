//! Commit history traversal
//!
//! - `rev_list`: breadth-first walk over the ancestry DAG
//!
//! ## Algorithm
//!
//! Starting from a set of commits, parents are queued in the order a commit
//! lists them and each commit is yielded once, however many paths reach it.
//! Diamond histories therefore terminate and never repeat the shared ancestor.

pub mod rev_list;
