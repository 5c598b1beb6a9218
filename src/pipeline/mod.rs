//! Reactive Pipeline
//!
//! This module connects node trees to signals and to the host container.
//!
//! # Pipeline Architecture
//!
//! ```text
//! view() -> Node -> reconcile effect -> Tree::update -> Host::apply
//! ```
//!
//! ## Data Flow
//!
//! 1. **view** - User closure building a fresh node tree, reads signals
//! 2. **reconcile effect** - Re-runs when those signals change, diffs against
//!    the mounted tree
//! 3. **host** - Receives operations on the root mount list
//!
//! Reconciler settings live in [`config`] as signals of their own.

pub mod config;
pub mod mount;

// Re-exports
pub use config::{
    reset_config, set_verify_mounts, set_warn_duplicate_keys, verify_mounts, warn_duplicate_keys,
};
pub use mount::{mount, unmount, Host, MountHandle};
