//! Object types and operations
//!
//! All content is stored as objects identified by the SHA-1 of their payload:
//!
//! - **Blob**: File content (raw bytes)
//! - **Tree**: Directory listing (entry kind, object ID and name per line)
//! - **Commit**: Snapshot pointer with parent commits and a message
//!
//! On disk every object is framed as `<type>\0<payload>`.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tree;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;
