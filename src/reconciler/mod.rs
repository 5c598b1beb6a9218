//! Reconciler - Drives component lifecycles from node tree changes.
//!
//! The reconciler owns every live component instance. It walks the mounted
//! tree against the next node tree depth-first, synchronously, one position
//! at a time:
//!
//! - [`Tree`] - Mounted tree, positional reconciliation, unmount
//! - [`Operation`] - Child-list changes handed to native updates
//!
//! # Lifecycle guarantees
//!
//! - `create` runs once per instance, before anything else
//! - a native `update` never recreates its mount
//! - a native `remove` runs exactly once, after which the instance is dropped

mod operation;
mod tree;

pub use operation::{diff_mounts, Operation};
pub use tree::{PassStats, Tree};
