//! Native nodes - Nodes backed by host platform objects.
//!
//! A native component owns one platform object (its [`Mount`]) from `create`
//! until `remove`. The reconciler drives the lifecycle:
//!
//! ```text
//! Uninstantiated ──create()/render()──► Mounted ──remove()──► Removed
//!                                        │    ▲
//!                                        └────┘
//!                                  update(properties, operations)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use spark_reconcile::{Mount, Native, NativeComponent, NativeType, Operation};
//!
//! struct Label {
//!     widget: Rc<RefCell<Widget>>,
//! }
//!
//! impl NativeComponent for Label {
//!     const TYPE: NativeType = NativeType::from_u128(0x0190_5a7e_3c1b_7d4e_9f00_0000_0000_0001);
//!     type Properties = LabelProps;
//!
//!     fn create(properties: &LabelProps, children: Vec<Mount>) -> Self { ... }
//!     fn update(&mut self, properties: &LabelProps, operations: Vec<Operation>) { ... }
//!     fn remove(&mut self, mount: Mount) { ... }
//!     fn render(&self) -> Mount { Mount::from_rc(self.widget.clone()) }
//! }
//!
//! let node = Native::new::<Label>(LabelProps { text: "Hello".into() }, vec![]);
//! ```

use std::any::{type_name, Any};
use std::fmt;
use std::rc::Rc;

use thiserror::Error;

use super::properties::{compare_as, expect_typed, EqualFn, Properties};
use super::Node;
use crate::reconciler::Operation;
use crate::types::{Behavior, ComponentType, NativeType};

// =============================================================================
// Mount - Platform object handle
// =============================================================================

/// Error returned when reading a mount as the wrong type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MountError {
    #[error("mount holds `{actual}`, not `{expected}`")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },
}

/// A shared, type-erased platform object.
///
/// Two mounts are equal only when they are the same object.
#[derive(Clone)]
pub struct Mount {
    object: Rc<dyn Any>,
    type_name: &'static str,
}

impl Mount {
    /// Wrap a platform object.
    pub fn new<T: 'static>(object: T) -> Self {
        Self::from_rc(Rc::new(object))
    }

    /// Wrap an already shared platform object, keeping its identity.
    pub fn from_rc<T: 'static>(object: Rc<T>) -> Self {
        Self {
            object,
            type_name: type_name::<T>(),
        }
    }

    /// Get the platform object as `T`.
    pub fn downcast<T: 'static>(&self) -> Result<Rc<T>, MountError> {
        self.object
            .clone()
            .downcast::<T>()
            .map_err(|_| MountError::TypeMismatch {
                expected: type_name::<T>(),
                actual: self.type_name,
            })
    }

    /// Borrow the platform object as `T`, if it is one.
    #[inline]
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.object.downcast_ref::<T>()
    }

    /// Check if both handles point at the same platform object.
    #[inline]
    pub fn same(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.object, &other.object)
    }

    /// Type name of the platform object.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl PartialEq for Mount {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl Eq for Mount {}

impl fmt::Debug for Mount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mount")
            .field("type", &self.type_name)
            .field("ptr", &Rc::as_ptr(&self.object).cast::<()>())
            .finish()
    }
}

// =============================================================================
// NativeComponent - Host capability contract
// =============================================================================

/// A host platform component.
///
/// Calls against one instance always follow `create`, then any number of
/// `update`/`render`, then at most one `remove`. Calls never overlap.
pub trait NativeComponent: Sized + 'static {
    /// Platform component class this component implements.
    const TYPE: NativeType;

    /// Strongly-typed properties.
    type Properties: PartialEq + 'static;

    /// Build the component and its platform object.
    ///
    /// `children` are the mounts of the node's rendered children, in order.
    fn create(properties: &Self::Properties, children: Vec<Mount>) -> Self;

    /// Semantic equality between two property values.
    ///
    /// Override when differently-shaped values mean the same thing
    /// (normalized colors, case-insensitive names).
    fn equal(a: &Self::Properties, b: &Self::Properties) -> bool {
        a == b
    }

    /// Apply new properties and child operations to the existing mount.
    fn update(&mut self, properties: &Self::Properties, operations: Vec<Operation>);

    /// Release or detach the platform object. Called once.
    fn remove(&mut self, mount: Mount);

    /// The platform object. Must keep its identity across updates.
    fn render(&self) -> Mount;
}

/// Type-erased view of a live native component, as held by the reconciler.
pub trait NativeInstance {
    /// Apply new properties and child operations.
    fn update(&mut self, properties: &Properties, operations: Vec<Operation>);

    /// Release the platform object.
    fn remove(&mut self, mount: Mount);

    /// The platform object.
    fn render(&self) -> Mount;
}

impl<C: NativeComponent> NativeInstance for C {
    fn update(&mut self, properties: &Properties, operations: Vec<Operation>) {
        NativeComponent::update(self, expect_typed::<C::Properties>(properties), operations);
    }

    fn remove(&mut self, mount: Mount) {
        NativeComponent::remove(self, mount);
    }

    fn render(&self) -> Mount {
        NativeComponent::render(self)
    }
}

/// Factory building a native instance from erased properties and child mounts.
pub type CreateNative = fn(&Properties, Vec<Mount>) -> Box<dyn NativeInstance>;

fn create_native<C: NativeComponent>(properties: &Properties, children: Vec<Mount>) -> Box<dyn NativeInstance> {
    Box::new(C::create(expect_typed::<C::Properties>(properties), children))
}

fn equal_native<C: NativeComponent>(a: &Properties, b: &Properties) -> bool {
    compare_as::<C::Properties>(a, b, C::equal)
}

// =============================================================================
// Native Node
// =============================================================================

/// A node rendered by a [`NativeComponent`].
#[derive(Clone)]
pub struct Native {
    create: CreateNative,
    equal: EqualFn,
    component_type: ComponentType,
    native_type: NativeType,
    properties: Properties,
    children: Rc<[Node]>,
    key: Option<Rc<str>>,
}

impl Native {
    /// Native node for component `C`.
    pub fn new<C: NativeComponent>(properties: C::Properties, children: Vec<Node>) -> Self {
        Self {
            create: create_native::<C>,
            equal: equal_native::<C>,
            component_type: ComponentType::of::<C>(),
            native_type: C::TYPE,
            properties: Properties::new(properties),
            children: children.into(),
            key: None,
        }
    }

    /// Set the reconciliation key.
    pub fn with_key(mut self, key: impl Into<Rc<str>>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Instantiate the component with the mounts of its rendered children.
    pub fn create(&self, children: Vec<Mount>) -> Box<dyn NativeInstance> {
        (self.create)(&self.properties, children)
    }

    /// Platform component class.
    #[inline]
    pub fn native_type(&self) -> NativeType {
        self.native_type
    }

    #[inline]
    pub fn behavior(&self) -> Behavior {
        Behavior::Native(self.native_type)
    }

    #[inline]
    pub fn component_type(&self) -> ComponentType {
        self.component_type
    }

    #[inline]
    pub fn equal(&self) -> EqualFn {
        self.equal
    }

    #[inline]
    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    #[inline]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    #[inline]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }
}

impl fmt::Debug for Native {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Native")
            .field("component", &self.component_type)
            .field("native_type", &self.native_type)
            .field("key", &self.key)
            .field("properties", &self.properties)
            .field("children", &self.children)
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
