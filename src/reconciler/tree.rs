//! Tree - A mounted node tree and the positional reconciler.
//!
//! A [`Tree`] keeps, for every mounted position, the node that was mounted
//! there, the live component instance, and the mounted children. Updating the
//! tree walks old and new depth-first, classifying each position with
//! [`node_changes`]:
//!
//! | Changes                          | Action                                        |
//! |----------------------------------|-----------------------------------------------|
//! | none                             | keep the whole subtree                        |
//! | behavior, component type or key  | unmount old subtree, mount new one            |
//! | properties and/or children only  | composite: re-create and re-render            |
//! |                                  | native: reconcile children, then `update`     |
//!
//! Child lists are reconciled by position. Keys take part only through
//! equality: a different key at the same position means a replacement.
//!
//! [`Tree::refresh`] runs the same walk but renders every composite again,
//! including those whose node compared equal. Use it when a render may read
//! state that is not part of its properties, such as a signal.

use std::collections::HashSet;

use super::operation::{diff_mounts, Operation};
use crate::node::{node_changes, CompositeInstance, Mount, NativeInstance, Node};
use crate::pipeline::config;
use crate::types::Changes;

// =============================================================================
// Pass Statistics
// =============================================================================

/// Lifecycle calls made during one reconcile pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PassStats {
    /// Component instances created (composite and native).
    pub created: usize,
    /// Composite renders.
    pub rendered: usize,
    /// Native updates.
    pub updated: usize,
    /// Native removals.
    pub removed: usize,
    /// Subtrees kept untouched because they compared equal.
    pub reused: usize,
}

// =============================================================================
// Mounted Nodes
// =============================================================================

/// Which equal subtrees a pass descends into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Refresh {
    /// Keep equal subtrees untouched.
    Changed,
    /// Render every composite again.
    All,
}

enum MountedKind {
    Composite(Box<dyn CompositeInstance>),
    Native {
        instance: Box<dyn NativeInstance>,
        mount: Mount,
    },
}

struct Mounted {
    node: Node,
    kind: MountedKind,
    children: Vec<Mounted>,
}

impl Mounted {
    /// Instantiate `node` and everything below it.
    fn mount(node: Node, stats: &mut PassStats) -> Self {
        let (kind, children) = match &node {
            Node::Composite(composite) => {
                let instance = composite.create();
                let rendered = instance.render().into_nodes();
                stats.created += 1;
                stats.rendered += 1;
                log::trace!(
                    "create composite {} key={:?} rendered={}",
                    composite.component_type(),
                    composite.key(),
                    rendered.len()
                );

                let children = mount_children(rendered, stats);
                (MountedKind::Composite(instance), children)
            }
            Node::Native(native) => {
                let children = mount_children(native.children().to_vec(), stats);
                let instance = native.create(collect_mounts(&children));
                let mount = instance.render();
                stats.created += 1;
                log::trace!(
                    "create native {} ({}) key={:?} children={}",
                    native.component_type(),
                    native.native_type(),
                    native.key(),
                    children.len()
                );

                (MountedKind::Native { instance, mount }, children)
            }
        };

        Mounted {
            node,
            kind,
            children,
        }
    }

    /// Push the top-level platform objects of this subtree.
    ///
    /// A native contributes its own mount; a composite contributes those of
    /// whatever it rendered.
    fn collect_into(&self, out: &mut Vec<Mount>) {
        match &self.kind {
            MountedKind::Native { mount, .. } => out.push(mount.clone()),
            MountedKind::Composite(_) => {
                for child in &self.children {
                    child.collect_into(out);
                }
            }
        }
    }

    /// Tear down this subtree, children first.
    fn unmount(self, stats: &mut PassStats) {
        let Mounted {
            node,
            kind,
            children,
        } = self;

        for child in children {
            child.unmount(stats);
        }

        if let MountedKind::Native { mut instance, mount } = kind {
            log::trace!(
                "remove native {} key={:?}",
                node.component_type(),
                node.key()
            );
            instance.remove(mount);
            stats.removed += 1;
        }
    }

    /// Bring this subtree in line with `next`.
    fn reconcile(self, next: Node, refresh: Refresh, stats: &mut PassStats) -> Self {
        let changes = node_changes(&self.node, &next);

        if changes.is_empty() && refresh == Refresh::Changed {
            stats.reused += 1;
            return self;
        }

        if changes.is_replacement() {
            log::trace!(
                "replace {} key={:?} with {} key={:?} ({:?})",
                self.node.component_type(),
                self.node.key(),
                next.component_type(),
                next.key(),
                changes
            );
            self.unmount(stats);
            return Mounted::mount(next, stats);
        }

        let Mounted {
            node,
            kind,
            children,
        } = self;

        match (kind, next) {
            (MountedKind::Composite(instance), Node::Composite(composite)) => {
                let instance = if changes.is_empty() {
                    instance
                } else {
                    stats.created += 1;
                    composite.create()
                };
                let rendered = instance.render().into_nodes();
                stats.rendered += 1;
                log::trace!(
                    "re-render composite {} key={:?} ({:?})",
                    composite.component_type(),
                    composite.key(),
                    changes
                );

                let children = reconcile_children(children, rendered, refresh, stats);
                Mounted {
                    node: Node::Composite(composite),
                    kind: MountedKind::Composite(instance),
                    children,
                }
            }
            (MountedKind::Native { mut instance, mount }, Node::Native(native)) => {
                let old_mounts = collect_mounts(&children);
                let children =
                    reconcile_children(children, native.children().to_vec(), refresh, stats);
                let operations = diff_mounts(&old_mounts, &collect_mounts(&children));

                if changes.contains(Changes::PROPERTIES) || !operations.is_empty() {
                    log::trace!(
                        "update native {} key={:?} operations={}",
                        native.component_type(),
                        native.key(),
                        operations.len()
                    );
                    instance.update(native.properties(), operations);
                    stats.updated += 1;

                    if config::verify_mounts() {
                        assert!(
                            instance.render().same(&mount),
                            "native component {} changed its mount during update",
                            native.component_type()
                        );
                    }
                }

                Mounted {
                    node: Node::Native(native),
                    kind: MountedKind::Native { instance, mount },
                    children,
                }
            }
            // Matching behaviors imply matching flavors; replace if they ever diverge.
            (kind, next) => {
                Mounted {
                    node,
                    kind,
                    children,
                }
                .unmount(stats);
                Mounted::mount(next, stats)
            }
        }
    }
}

fn collect_mounts(children: &[Mounted]) -> Vec<Mount> {
    let mut mounts = Vec::with_capacity(children.len());
    for child in children {
        child.collect_into(&mut mounts);
    }
    mounts
}

fn mount_children(nodes: Vec<Node>, stats: &mut PassStats) -> Vec<Mounted> {
    check_duplicate_keys(&nodes);
    nodes
        .into_iter()
        .map(|node| Mounted::mount(node, stats))
        .collect()
}

/// Reconcile a child list by position.
///
/// Shared prefix is reconciled pairwise, extra old entries are unmounted and
/// extra new entries are mounted.
fn reconcile_children(
    old: Vec<Mounted>,
    next: Vec<Node>,
    refresh: Refresh,
    stats: &mut PassStats,
) -> Vec<Mounted> {
    check_duplicate_keys(&next);

    let mut result = Vec::with_capacity(next.len());
    let mut old = old.into_iter();
    let mut next = next.into_iter();

    loop {
        match (old.next(), next.next()) {
            (Some(mounted), Some(node)) => result.push(mounted.reconcile(node, refresh, stats)),
            (Some(mounted), None) => mounted.unmount(stats),
            (None, Some(node)) => result.push(Mounted::mount(node, stats)),
            (None, None) => break,
        }
    }

    result
}

fn check_duplicate_keys(nodes: &[Node]) {
    if nodes.len() < 2 || !config::warn_duplicate_keys() {
        return;
    }

    let mut seen = HashSet::new();
    for key in nodes.iter().filter_map(Node::key) {
        if !seen.insert(key) {
            log::warn!(
                "Duplicate key detected among siblings: {:?}. Keys should be unique.",
                key
            );
        }
    }
}

// =============================================================================
// Tree
// =============================================================================

/// A mounted tree of components.
///
/// Holds a list of roots, usually one. The roots' top-level platform objects
/// ([`Tree::mounts`]) belong to whatever container the host attaches them to;
/// [`Tree::update`] reports how that list changed.
///
/// # Example
///
/// ```ignore
/// let mut tree = Tree::mount(app(&state));
/// container.attach(tree.mounts());
///
/// state.count += 1;
/// let operations = tree.update(app(&state));
/// container.apply(&operations);
///
/// let removed = tree.unmount();
/// ```
pub struct Tree {
    roots: Vec<Mounted>,
    last_pass: PassStats,
}

impl Tree {
    /// Mount a single root.
    pub fn mount(node: Node) -> Self {
        Self::mount_all(vec![node])
    }

    /// Mount a list of roots, in order.
    pub fn mount_all(nodes: Vec<Node>) -> Self {
        let mut stats = PassStats::default();
        let roots = mount_children(nodes, &mut stats);
        log::debug!("mounted tree: {:?}", stats);

        Self {
            roots,
            last_pass: stats,
        }
    }

    /// Reconcile against a new single root.
    ///
    /// Returns the operations on the root mount list.
    pub fn update(&mut self, next: Node) -> Vec<Operation> {
        self.update_all(vec![next])
    }

    /// Reconcile against a new list of roots.
    pub fn update_all(&mut self, next: Vec<Node>) -> Vec<Operation> {
        self.reconcile_roots(next, Refresh::Changed)
    }

    /// Reconcile against a new single root, rendering every composite again.
    ///
    /// Equal natives are still left alone unless their child mounts change.
    pub fn refresh(&mut self, next: Node) -> Vec<Operation> {
        self.refresh_all(vec![next])
    }

    /// [`Tree::refresh`] for a list of roots.
    pub fn refresh_all(&mut self, next: Vec<Node>) -> Vec<Operation> {
        self.reconcile_roots(next, Refresh::All)
    }

    fn reconcile_roots(&mut self, next: Vec<Node>, refresh: Refresh) -> Vec<Operation> {
        let old_mounts = self.mounts();
        let mut stats = PassStats::default();

        let roots = std::mem::take(&mut self.roots);
        self.roots = reconcile_children(roots, next, refresh, &mut stats);

        let operations = diff_mounts(&old_mounts, &self.mounts());
        log::debug!(
            "reconciled tree ({:?}): {:?}, root operations={}",
            refresh,
            stats,
            operations.len()
        );
        self.last_pass = stats;
        operations
    }

    /// Remove every native component, children first.
    pub fn unmount(self) -> PassStats {
        let mut stats = PassStats::default();
        for root in self.roots {
            root.unmount(&mut stats);
        }
        log::debug!("unmounted tree: {:?}", stats);
        stats
    }

    /// Top-level platform objects of the roots.
    pub fn mounts(&self) -> Vec<Mount> {
        collect_mounts(&self.roots)
    }

    /// Nodes currently mounted at the roots.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.roots.iter().map(|root| &root.node)
    }

    /// The first root node.
    pub fn root(&self) -> Option<&Node> {
        self.nodes().next()
    }

    /// Statistics of the most recent mount or update.
    pub fn last_pass(&self) -> PassStats {
        self.last_pass
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
