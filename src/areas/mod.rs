//! Core store components
//!
//! - `config`: Owned store configuration (work dir, store dir name, default branch)
//! - `database`: Object database for storing blobs, trees, and commits
//! - `refs`: Reference management (branches, HEAD, tags)
//! - `repository`: Store handle coordinating the other areas
//! - `workspace`: Working directory file system operations

pub mod config;
pub mod database;
pub mod refs;
pub mod repository;
pub mod workspace;
