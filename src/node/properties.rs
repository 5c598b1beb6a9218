//! Properties - Type-erased property payloads.
//!
//! Every component declares its own strongly-typed properties structure. The
//! tree layer only sees [`Properties`], a shared `Rc<dyn Any>` handle, plus
//! an [`EqualFn`] captured when the node was built. The concrete type is
//! recovered inside the matching component implementation.

use std::any::{type_name, Any};
use std::fmt;
use std::rc::Rc;

use thiserror::Error;

// =============================================================================
// Equality Function
// =============================================================================

/// Compares two type-erased property payloads for semantic equality.
///
/// Nodes store one of these, monomorphized for their component's property
/// type, so no reflection happens at compare time.
pub type EqualFn = fn(&Properties, &Properties) -> bool;

/// Compare two payloads as `T` using `eq`.
///
/// A payload that is not a `T` never compares equal.
pub fn compare_as<T: 'static>(a: &Properties, b: &Properties, eq: impl Fn(&T, &T) -> bool) -> bool {
    match (a.get::<T>(), b.get::<T>()) {
        (Some(a), Some(b)) => eq(a, b),
        _ => false,
    }
}

/// [`EqualFn`] for any `PartialEq` property type.
pub fn partial_eq<T: PartialEq + 'static>(a: &Properties, b: &Properties) -> bool {
    compare_as::<T>(a, b, |a, b| a == b)
}

// =============================================================================
// NoProperties
// =============================================================================

/// Empty marker for components that take no properties.
///
/// Always equal to itself, so nodes carrying it never differ by properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NoProperties;

// =============================================================================
// Errors
// =============================================================================

/// Error returned when reading a payload as the wrong type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PropertiesError {
    #[error("properties hold `{actual}`, not `{expected}`")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },
}

// =============================================================================
// Properties
// =============================================================================

/// A shared, type-erased property payload.
///
/// Cloning shares the payload. Two payloads are compared through the owning
/// component's [`EqualFn`], never by identity.
#[derive(Clone)]
pub struct Properties {
    value: Rc<dyn Any>,
    type_name: &'static str,
}

impl Properties {
    /// Wrap a typed payload.
    pub fn new<T: 'static>(value: T) -> Self {
        Self {
            value: Rc::new(value),
            type_name: type_name::<T>(),
        }
    }

    /// The empty payload ([`NoProperties`]).
    pub fn none() -> Self {
        Self::new(NoProperties)
    }

    /// Check if the payload is a `T`.
    #[inline]
    pub fn is<T: 'static>(&self) -> bool {
        self.value.is::<T>()
    }

    /// Borrow the payload as `T`, if it is one.
    #[inline]
    pub fn get<T: 'static>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// Borrow the payload as `T`.
    pub fn downcast_ref<T: 'static>(&self) -> Result<&T, PropertiesError> {
        self.get::<T>().ok_or(PropertiesError::TypeMismatch {
            expected: type_name::<T>(),
            actual: self.type_name,
        })
    }

    /// Type name of the payload.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Check if both handles share one payload allocation.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.value, &other.value)
    }
}

impl Default for Properties {
    fn default() -> Self {
        Self::none()
    }
}

impl fmt::Debug for Properties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Properties").field(&self.type_name).finish()
    }
}

/// Borrow a payload handed to a component factory.
///
/// Typed node constructors always pair a factory with its own property type,
/// so a mismatch here is a programmer error.
pub(crate) fn expect_typed<T: 'static>(properties: &Properties) -> &T {
    match properties.downcast_ref::<T>() {
        Ok(value) => value,
        Err(err) => panic!("component factory received foreign properties: {err}"),
    }
}

// =============================================================================
// Tests
// =============================================================================
