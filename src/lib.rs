//! # spark-reconcile
//!
//! Node trees, structural equality and reconciliation for spark UIs.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for fine-grained reactivity.
//!
//! ## Architecture
//!
//! A UI is described as an immutable tree of [`Node`]s. Each node is either a
//! [`Composite`], whose component renders more nodes, or a [`Native`], whose
//! component owns a platform object (its [`Mount`]). Components are plain
//! types implementing [`CompositeComponent`] or [`NativeComponent`].
//!
//! Re-rendering produces a new tree. The reconciler compares it with the
//! mounted one and only touches what changed:
//! ```text
//! Node tree -> nodes_equal / node_changes -> Tree::update -> Vec<Operation>
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Core types (Behavior, NativeType, ComponentType, Changes)
//! - [`node`] - Node, Composite, Native, type-erased properties, equality
//! - [`reconciler`] - Mounted trees and child operations
//! - [`pipeline`] - Reactive mount and settings

pub mod node;
pub mod pipeline;
pub mod reconciler;
pub mod types;

#[cfg(test)]
mod testing;

// Re-export commonly used items
pub use types::*;

pub use node::{
    nodes_equal, node_changes, partial_eq, sequences_equal, Composite, CompositeComponent,
    CompositeInstance, EqualFn, Mount, MountError, Multiple, Native, NativeComponent,
    NativeInstance, Node, NoProperties, Properties, PropertiesError, Rendered, Single,
};

pub use reconciler::{diff_mounts, Operation, PassStats, Tree};

pub use pipeline::{
    mount, reset_config, set_verify_mounts, set_warn_duplicate_keys, unmount, verify_mounts,
    warn_duplicate_keys, Host, MountHandle,
};
