//! A small content-addressed version-control store
//!
//! A [`Repository`](areas::repository::Repository) snapshots a working
//! directory into blob, tree and commit objects, names commits through
//! symbolic and direct refs, walks commit history and merges divergent
//! histories three ways.
//!
//! ```no_run
//! use twig::areas::config::StoreConfig;
//! use twig::areas::repository::Repository;
//!
//! # fn main() -> twig::Result<()> {
//! let repository = Repository::open(StoreConfig::new("/tmp/project"))?;
//! repository.init()?;
//! let first = repository.commit("first")?;
//! assert_eq!(repository.get_oid("@")?, first);
//! # Ok(())
//! # }
//! ```

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;

pub use errors::{Result, StoreError};
