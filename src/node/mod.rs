//! Nodes - The uniform view over every element in a UI tree.
//!
//! A [`Node`] is either a [`Composite`] (rendered by user logic) or a
//! [`Native`] (backed by a platform object). Every node exposes the same five
//! attributes, and tree equality is defined over exactly those:
//!
//! ```text
//! behavior        Composite | Native(NativeType)
//! component_type  TypeId of the concrete component
//! key             Option<&str>
//! equal           fn(&Properties, &Properties) -> bool
//! children        &[Node]
//! ```
//!
//! # Equality
//!
//! Two nodes are equal when their behaviors, component types and keys match,
//! the left node's `equal` accepts both property payloads, and their children
//! are equal position by position. Equality is structural, never identity.
//! There is no key matching across positions at this level.

mod composite;
mod native;
mod properties;

pub use composite::*;
pub use native::*;
pub use properties::*;

use std::fmt;

use crate::types::{Behavior, Changes, ComponentType};

// =============================================================================
// Node
// =============================================================================

/// Any element of a UI tree.
///
/// Cloning is cheap: properties and children are shared.
#[derive(Clone)]
pub enum Node {
    Composite(Composite),
    Native(Native),
}

impl Node {
    /// Ordered child nodes.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Composite(node) => node.children(),
            Node::Native(node) => node.children(),
        }
    }

    /// Identity of the concrete component implementation.
    pub fn component_type(&self) -> ComponentType {
        match self {
            Node::Composite(node) => node.component_type(),
            Node::Native(node) => node.component_type(),
        }
    }

    /// Property equality of the component behind this node.
    pub fn equal(&self) -> EqualFn {
        match self {
            Node::Composite(node) => node.equal(),
            Node::Native(node) => node.equal(),
        }
    }

    /// Optional stable identity.
    pub fn key(&self) -> Option<&str> {
        match self {
            Node::Composite(node) => node.key(),
            Node::Native(node) => node.key(),
        }
    }

    /// Kind of node.
    pub fn behavior(&self) -> Behavior {
        match self {
            Node::Composite(node) => node.behavior(),
            Node::Native(node) => node.behavior(),
        }
    }

    /// Type-erased property payload.
    pub fn properties(&self) -> &Properties {
        match self {
            Node::Composite(node) => node.properties(),
            Node::Native(node) => node.properties(),
        }
    }

    pub fn as_composite(&self) -> Option<&Composite> {
        match self {
            Node::Composite(node) => Some(node),
            Node::Native(_) => None,
        }
    }

    pub fn as_native(&self) -> Option<&Native> {
        match self {
            Node::Composite(_) => None,
            Node::Native(node) => Some(node),
        }
    }
}

impl From<Composite> for Node {
    fn from(node: Composite) -> Self {
        Node::Composite(node)
    }
}

impl From<Native> for Node {
    fn from(node: Native) -> Self {
        Node::Native(node)
    }
}

/// Structural equality, see [`nodes_equal`].
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        nodes_equal(self, other)
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Composite(node) => fmt::Debug::fmt(node, f),
            Node::Native(node) => fmt::Debug::fmt(node, f),
        }
    }
}

// =============================================================================
// Tree Equality
// =============================================================================

/// Check if two nodes can be reused for each other.
///
/// Compares, in order and short-circuiting: behavior, component type, key,
/// properties (through `a`'s equality function), then children.
pub fn nodes_equal(a: &Node, b: &Node) -> bool {
    a.behavior() == b.behavior()
        && a.component_type() == b.component_type()
        && a.key() == b.key()
        && (a.equal())(a.properties(), b.properties())
        && sequences_equal(a.children(), b.children())
}

/// Check if two node sequences are equal position by position.
///
/// Different lengths are unequal without comparing any element.
pub fn sequences_equal(xs: &[Node], ys: &[Node]) -> bool {
    if xs.len() != ys.len() {
        return false;
    }

    xs.iter().zip(ys).all(|(x, y)| nodes_equal(x, y))
}

/// Report which of the equality rules fail between `a` and `b`.
///
/// Empty exactly when [`nodes_equal`] holds.
pub fn node_changes(a: &Node, b: &Node) -> Changes {
    let mut changes = Changes::NONE;

    if a.behavior() != b.behavior() {
        changes |= Changes::BEHAVIOR;
    }
    if a.component_type() != b.component_type() {
        changes |= Changes::COMPONENT;
    }
    if a.key() != b.key() {
        changes |= Changes::KEY;
    }
    if !(a.equal())(a.properties(), b.properties()) {
        changes |= Changes::PROPERTIES;
    }
    if !sequences_equal(a.children(), b.children()) {
        changes |= Changes::CHILDREN;
    }

    changes
}

// =============================================================================
// Tests
// =============================================================================
