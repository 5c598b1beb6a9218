//! Composite nodes - Nodes rendered by user logic.
//!
//! A composite component turns its properties and child nodes into the
//! next level of the tree. It owns no platform object; whatever it renders
//! is mounted in its place.
//!
//! - [`Single`] components render exactly one node.
//! - [`Multiple`] components render an ordered list of nodes.
//!
//! # Example
//!
//! ```ignore
//! use spark_reconcile::{Composite, CompositeComponent, Node, Single};
//!
//! struct Greeting { name: String }
//!
//! impl CompositeComponent for Greeting {
//!     type Properties = String;
//!
//!     fn create(name: &String, _children: &[Node]) -> Self {
//!         Self { name: name.clone() }
//!     }
//! }
//!
//! impl Single for Greeting {
//!     fn render(&self) -> Node {
//!         label(&format!("Hello, {}", self.name))
//!     }
//! }
//!
//! let node = Composite::single::<Greeting>("world".to_string(), vec![]);
//! ```

use std::fmt;
use std::rc::Rc;

use super::properties::{compare_as, expect_typed, EqualFn, Properties};
use super::Node;
use crate::types::{Behavior, ComponentType};

// =============================================================================
// Component Traits
// =============================================================================

/// A user-defined component that renders into other nodes.
///
/// `create` should only build internal state from its inputs. The reconciler
/// creates a fresh instance whenever the node's properties or children change.
/// A refresh pass renders the existing instance again.
pub trait CompositeComponent: Sized + 'static {
    /// Strongly-typed properties.
    type Properties: PartialEq + 'static;

    /// Build the component.
    fn create(properties: &Self::Properties, children: &[Node]) -> Self;

    /// Semantic equality between two property values.
    fn equal(a: &Self::Properties, b: &Self::Properties) -> bool {
        a == b
    }
}

/// A composite component that renders exactly one node.
pub trait Single: CompositeComponent {
    fn render(&self) -> Node;
}

/// A composite component that renders an ordered list of nodes.
pub trait Multiple: CompositeComponent {
    fn render(&self) -> Vec<Node>;
}

// =============================================================================
// Rendered
// =============================================================================

/// Output of a composite render.
#[derive(Debug, Clone)]
pub enum Rendered {
    Single(Node),
    Multiple(Vec<Node>),
}

impl Rendered {
    /// The rendered nodes, in order.
    pub fn into_nodes(self) -> Vec<Node> {
        match self {
            Rendered::Single(node) => vec![node],
            Rendered::Multiple(nodes) => nodes,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Rendered::Single(_) => 1,
            Rendered::Multiple(nodes) => nodes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Node> for Rendered {
    fn from(node: Node) -> Self {
        Rendered::Single(node)
    }
}

impl From<Vec<Node>> for Rendered {
    fn from(nodes: Vec<Node>) -> Self {
        Rendered::Multiple(nodes)
    }
}

// =============================================================================
// Erased Instances
// =============================================================================

/// Type-erased view of a composite component, as held by the reconciler.
pub trait CompositeInstance {
    fn render(&self) -> Rendered;
}

struct SingleInstance<C>(C);

impl<C: Single> CompositeInstance for SingleInstance<C> {
    fn render(&self) -> Rendered {
        Rendered::Single(self.0.render())
    }
}

struct MultipleInstance<C>(C);

impl<C: Multiple> CompositeInstance for MultipleInstance<C> {
    fn render(&self) -> Rendered {
        Rendered::Multiple(self.0.render())
    }
}

/// Factory building a composite instance from erased properties and children.
pub type CreateComposite = fn(&Properties, &[Node]) -> Box<dyn CompositeInstance>;

fn create_single<C: Single>(properties: &Properties, children: &[Node]) -> Box<dyn CompositeInstance> {
    Box::new(SingleInstance(C::create(
        expect_typed::<C::Properties>(properties),
        children,
    )))
}

fn create_multiple<C: Multiple>(properties: &Properties, children: &[Node]) -> Box<dyn CompositeInstance> {
    Box::new(MultipleInstance(C::create(
        expect_typed::<C::Properties>(properties),
        children,
    )))
}

fn equal_composite<C: CompositeComponent>(a: &Properties, b: &Properties) -> bool {
    compare_as::<C::Properties>(a, b, C::equal)
}

// =============================================================================
// Composite Node
// =============================================================================

/// A node rendered by a [`CompositeComponent`].
#[derive(Clone)]
pub struct Composite {
    create: CreateComposite,
    equal: EqualFn,
    component_type: ComponentType,
    properties: Properties,
    children: Rc<[Node]>,
    key: Option<Rc<str>>,
}

impl Composite {
    /// Composite node for a [`Single`] component.
    pub fn single<C: Single>(properties: C::Properties, children: Vec<Node>) -> Self {
        Self::build::<C>(create_single::<C>, properties, children)
    }

    /// Composite node for a [`Multiple`] component.
    pub fn multiple<C: Multiple>(properties: C::Properties, children: Vec<Node>) -> Self {
        Self::build::<C>(create_multiple::<C>, properties, children)
    }

    fn build<C: CompositeComponent>(
        create: CreateComposite,
        properties: C::Properties,
        children: Vec<Node>,
    ) -> Self {
        Self {
            create,
            equal: equal_composite::<C>,
            component_type: ComponentType::of::<C>(),
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

    /// Instantiate the component from this node's properties and children.
    pub fn create(&self) -> Box<dyn CompositeInstance> {
        (self.create)(&self.properties, &self.children)
    }

    #[inline]
    pub fn behavior(&self) -> Behavior {
        Behavior::Composite
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

impl fmt::Debug for Composite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Composite")
            .field("component", &self.component_type)
            .field("key", &self.key)
            .field("properties", &self.properties)
            .field("children", &self.children)
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NoProperties;
    use crate::testing::{
        fragment, greeting, journal, label, reset_journal, Fragment, Greeting, GreetingProps,
    };

    #[test]
    fn test_single_renders_one_node() {
        reset_journal();

        let node = Composite::single::<Greeting>(
            GreetingProps {
                name: "Ada".to_string(),
            },
            vec![],
        );
        let rendered = node.create().render();

        assert_eq!(journal(), vec!["create Greeting Ada"]);
        assert_eq!(rendered.len(), 1);
        assert_eq!(rendered.into_nodes(), vec![label("Hello, Ada")]);
    }

    #[test]
    fn test_multiple_receives_children() {
        reset_journal();

        let node = Composite::multiple::<Fragment>(NoProperties, vec![label("a"), label("b")]);
        let rendered = node.create().render();

        assert_eq!(journal(), vec!["create Fragment children=2"]);
        assert!(matches!(rendered, Rendered::Multiple(_)));
        assert_eq!(rendered.into_nodes(), vec![label("a"), label("b")]);
    }

    #[test]
    fn test_render_is_repeatable() {
        let instance = greeting("Ada").as_composite().map(Composite::create);
        let instance = instance.expect("greeting is a composite");

        assert_eq!(
            instance.render().into_nodes(),
            instance.render().into_nodes()
        );
    }

    #[test]
    fn test_empty_multiple() {
        let rendered = fragment(vec![])
            .as_composite()
            .map(|c| c.create().render())
            .expect("fragment is a composite");

        assert!(rendered.is_empty());
    }

    #[test]
    fn test_composite_attributes() {
        let node = Composite::single::<Greeting>(
            GreetingProps {
                name: "Ada".to_string(),
            },
            vec![label("child")],
        )
        .with_key("greeting");

        assert_eq!(node.behavior(), Behavior::Composite);
        assert!(node.component_type().is::<Greeting>());
        assert_eq!(node.key(), Some("greeting"));
        assert_eq!(node.children().len(), 1);
        assert!(node.properties().is::<GreetingProps>());
    }

    #[test]
    fn test_no_properties_compare_equal() {
        let a = Composite::multiple::<Fragment>(NoProperties, vec![]);
        let b = Composite::multiple::<Fragment>(NoProperties, vec![]);
        assert!((a.equal())(a.properties(), b.properties()));
    }
}
