//! Porcelain operations
//!
//! ## Commands
//!
//! - `init`: create an empty store
//! - `commit`: snapshot the working directory on top of HEAD
//! - `checkout`: materialize a commit and move HEAD
//! - `branch` / `tag`: name commits
//! - `log`: walk history from a commit
//! - `show`: one commit and the paths it changed
//! - `status` / `diff`: compare HEAD with the working directory
//! - `reset`: move the current branch without touching files
//! - `merge`: three-way merge of another commit into HEAD

pub mod branch;
pub mod checkout;
pub mod commit;
pub mod diff;
pub mod init;
pub mod log;
pub mod merge;
pub mod reset;
pub mod show;
pub mod status;
pub mod tag;
