//! Plumbing operations
//!
//! ## Commands
//!
//! - `hash-object`: store a file as a blob
//! - `cat-file`: print an object's payload
//! - `write-tree`: snapshot the working directory as a tree
//! - `read-tree`: replace the working directory with a tree
//! - `rev-parse`: resolve a revision expression to an object id
//! - `update-ref` / `show-ref`: write and list refs

pub mod cat_file;
pub mod hash_object;
pub mod read_tree;
pub mod rev_parse;
pub mod show_ref;
pub mod update_ref;
pub mod write_tree;
