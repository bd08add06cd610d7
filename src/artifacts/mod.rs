//! Store data types and algorithms
//!
//! - `branch`: ref names, branch names and revision expressions
//! - `diff`: comparison of flattened trees
//! - `log`: ancestry traversal
//! - `merge`: merge base, three-way tree merge and content mergers
//! - `objects`: object ids and the blob, tree and commit objects

pub mod branch;
pub mod diff;
pub mod log;
pub mod merge;
pub mod objects;
