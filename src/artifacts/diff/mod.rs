//! Tree comparison
//!
//! - `tree_diff`: union of flattened trees and per-path change classification
//!
//! Comparison happens on flattened trees (path to blob id), so it reports which
//! files changed, never what changed inside them.

pub mod tree_diff;
