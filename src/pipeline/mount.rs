//! Mount API - Reactive root and host attachment.
//!
//! This module provides the entry point for mounting a node tree into a host
//! container. It sets up the reconcile effect: the view function and every
//! composite render run inside a `spark_signals` effect, so any signal they
//! read schedules another pass. Each pass after the first is a
//! [`Tree::refresh`]: composites render again even when their node compared
//! equal, so a render reading a signal sees the new value.
//!
//! # Example
//!
//! ```ignore
//! use spark_reconcile::pipeline::mount;
//! use spark_signals::signal;
//!
//! let count = signal(0);
//! let count_view = count.clone();
//!
//! let handle = mount::mount(
//!     move || counter(count_view.get()),
//!     window.root_container(),
//! );
//!
//! // Re-renders and reconciles; the host receives only the root changes.
//! count.set(1);
//!
//! // Tear down: every native component is removed once.
//! handle.unmount();
//! ```
//!
//! # Reentrancy
//!
//! Reconciliation is not reentrant. Component `create`, `render` and
//! `update` must not write to a signal the view depends on.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use spark_signals::effect;

use crate::node::Node;
use crate::reconciler::{diff_mounts, Operation, Tree};

// =============================================================================
// Host
// =============================================================================

/// The container the root mounts are attached to.
///
/// Receives the operations on the root mount list after every pass.
pub trait Host {
    fn apply(&mut self, operations: &[Operation]);
}

// =============================================================================
// Mount Handle
// =============================================================================

/// Handle returned by [`mount`] that allows unmounting.
///
/// Holds references to:
/// - The reconcile effect stop function
/// - The mounted tree
/// - The host
///
/// Dropping the handle stops the effect but leaves the platform objects in
/// place. Call [`MountHandle::unmount`] to tear them down.
pub struct MountHandle {
    stop_effect: Option<Box<dyn FnOnce()>>,
    tree: Rc<RefCell<Option<Tree>>>,
    host: Rc<RefCell<dyn Host>>,
    passes: Rc<Cell<usize>>,
}

impl MountHandle {
    /// Stop the reconcile effect and tear the tree down.
    ///
    /// This will:
    /// 1. Stop the reconcile effect
    /// 2. Hand the host `Remove` operations for the root mounts
    /// 3. Remove every native component, children first
    pub fn unmount(mut self) {
        if let Some(stop) = self.stop_effect.take() {
            stop();
        }

        let Some(tree) = self.tree.borrow_mut().take() else {
            return;
        };

        let operations = diff_mounts(&tree.mounts(), &[]);
        if !operations.is_empty() {
            self.host.borrow_mut().apply(&operations);
        }

        let stats = tree.unmount();
        log::debug!("unmounted after {} passes: {:?}", self.passes.get(), stats);
    }

    /// Check if the reconcile effect is still running.
    pub fn is_mounted(&self) -> bool {
        self.stop_effect.is_some()
    }

    /// Number of reconcile passes run so far (the initial mount included).
    pub fn passes(&self) -> usize {
        self.passes.get()
    }

    /// The node currently mounted at the root.
    pub fn root(&self) -> Option<Node> {
        self.tree
            .borrow()
            .as_ref()
            .and_then(|tree| tree.root().cloned())
    }
}

impl Drop for MountHandle {
    fn drop(&mut self) {
        if let Some(stop) = self.stop_effect.take() {
            stop();
        }
    }
}

// =============================================================================
// Mount Function
// =============================================================================

/// Mount a reactive view into `host`.
///
/// This sets up the ONE reconcile effect:
/// 1. The first run mounts the tree and hands the host `Insert`s for every
///    root mount
/// 2. Later runs refresh the tree against the new view, rendering every
///    composite again, and hand the host the root operations, if any
///
/// Returns a [`MountHandle`] for cleanup.
pub fn mount<V, H>(view: V, host: H) -> MountHandle
where
    V: Fn() -> Node + 'static,
    H: Host + 'static,
{
    let tree: Rc<RefCell<Option<Tree>>> = Rc::new(RefCell::new(None));
    let host: Rc<RefCell<dyn Host>> = Rc::new(RefCell::new(host));
    let passes = Rc::new(Cell::new(0));

    let tree_effect = tree.clone();
    let host_effect = host.clone();
    let passes_effect = passes.clone();

    let stop_fn = effect(move || {
        // Read the view (creates dependencies)
        let next = view();

        let mut slot = tree_effect.borrow_mut();
        let (mounted, operations) = match slot.take() {
            Some(mut mounted) => {
                let operations = mounted.refresh(next);
                (mounted, operations)
            }
            None => {
                let mounted = Tree::mount(next);
                let operations = diff_mounts(&[], &mounted.mounts());
                (mounted, operations)
            }
        };
        *slot = Some(mounted);
        drop(slot);

        // Attach to the host (side effect!)
        if !operations.is_empty() {
            host_effect.borrow_mut().apply(&operations);
        }

        passes_effect.set(passes_effect.get() + 1);
        log::debug!(
            "reconcile pass {} applied {} root operations",
            passes_effect.get(),
            operations.len()
        );
    });

    MountHandle {
        stop_effect: Some(Box::new(stop_fn)),
        tree,
        host,
        passes,
    }
}

/// Unmount and clean up.
pub fn unmount(handle: MountHandle) {
    handle.unmount();
}

// =============================================================================
// Tests
// =============================================================================
