//! Core types for spark-reconcile.
//!
//! These types are carried by every node. They identify what kind of node
//! something is and which component implements it, and describe how two
//! nodes differ.

use std::any::{type_name, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

use ulid::Ulid;

// =============================================================================
// NativeType - Platform component class identifier
// =============================================================================

/// Identifier of a platform component class.
///
/// Backed by a ULID so hosts can mint identifiers without a central registry.
/// Native components declare theirs as an associated constant:
///
/// ```ignore
/// impl NativeComponent for Label {
///     const TYPE: NativeType = NativeType::from_u128(0x0190_5a7e_3c1b_7d4e_9f00_0000_0000_0001);
///     // ...
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NativeType(Ulid);

impl NativeType {
    /// Create an identifier from its raw 128-bit value.
    pub const fn from_u128(value: u128) -> Self {
        Self(Ulid(value))
    }

    /// Mint a fresh identifier (for component classes registered at runtime).
    pub fn generate() -> Self {
        Self(Ulid::new())
    }

    /// The underlying ULID.
    #[inline]
    pub const fn ulid(&self) -> Ulid {
        self.0
    }
}

impl From<Ulid> for NativeType {
    fn from(ulid: Ulid) -> Self {
        Self(ulid)
    }
}

impl fmt::Display for NativeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// =============================================================================
// Behavior - Node kind discriminant
// =============================================================================

/// What kind of node this is.
///
/// Native nodes carry the class identifier of their platform component, so two
/// native nodes only share a behavior when they target the same class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Behavior {
    /// Renders into other nodes through user logic.
    Composite,
    /// Renders into a platform object.
    Native(NativeType),
}

impl Behavior {
    /// Check if this is a composite behavior.
    #[inline]
    pub const fn is_composite(&self) -> bool {
        matches!(self, Self::Composite)
    }

    /// Check if this is a native behavior.
    #[inline]
    pub const fn is_native(&self) -> bool {
        matches!(self, Self::Native(_))
    }

    /// Platform class identifier, if native.
    #[inline]
    pub const fn native_type(&self) -> Option<NativeType> {
        match self {
            Self::Composite => None,
            Self::Native(native_type) => Some(*native_type),
        }
    }
}

// =============================================================================
// ComponentType - Concrete component identity
// =============================================================================

/// Identity of the concrete component implementation behind a node.
///
/// Compares by `TypeId` only. The type name is kept for logs and debug output.
#[derive(Clone, Copy)]
pub struct ComponentType {
    id: TypeId,
    name: &'static str,
}

impl ComponentType {
    /// Component type of `T`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// The `TypeId` of the component.
    #[inline]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Full type name of the component.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Type name without its module path (`Label` for `app::widgets::Label`).
    pub fn short_name(&self) -> &'static str {
        let base = self.name.split('<').next().unwrap_or(self.name);
        match base.rfind("::") {
            Some(pos) => &self.name[pos + 2..],
            None => self.name,
        }
    }

    /// Check if this is the component type of `T`.
    #[inline]
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for ComponentType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ComponentType {}

impl Hash for ComponentType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ComponentType").field(&self.name).finish()
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

// =============================================================================
// Changes (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Which parts of two nodes differ.
    ///
    /// Empty means the nodes are equal. Any bit in [`Changes::IDENTITY`] means
    /// the old node cannot be reused at that position.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Changes: u8 {
        const NONE = 0;
        const BEHAVIOR = 1 << 0;
        const COMPONENT = 1 << 1;
        const KEY = 1 << 2;
        const PROPERTIES = 1 << 3;
        const CHILDREN = 1 << 4;

        const IDENTITY = Self::BEHAVIOR.bits() | Self::COMPONENT.bits() | Self::KEY.bits();
    }
}

impl Changes {
    /// Check if the old node must be torn down and recreated.
    #[inline]
    pub fn is_replacement(&self) -> bool {
        self.intersects(Self::IDENTITY)
    }
}

// =============================================================================
// Tests
// =============================================================================
