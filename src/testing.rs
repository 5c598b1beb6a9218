//! Test components shared by the node, reconciler and pipeline tests.
//!
//! Every lifecycle call is appended to a thread-local journal so tests can
//! assert exactly which calls the reconciler made, and in which order.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::node::{
    Composite, CompositeComponent, Mount, Multiple, Native, NativeComponent, NoProperties, Node,
    Single,
};
use crate::reconciler::Operation;
use crate::types::NativeType;

// =============================================================================
// Journal
// =============================================================================

thread_local! {
    static JOURNAL: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

pub fn record(entry: String) {
    JOURNAL.with(|journal| journal.borrow_mut().push(entry));
}

pub fn journal() -> Vec<String> {
    JOURNAL.with(|journal| journal.borrow().clone())
}

/// Return the journal and clear it.
pub fn take_journal() -> Vec<String> {
    JOURNAL.with(|journal| std::mem::take(&mut *journal.borrow_mut()))
}

pub fn reset_journal() {
    JOURNAL.with(|journal| journal.borrow_mut().clear());
}

// =============================================================================
// Widget - Fake platform object
// =============================================================================

pub struct Widget {
    kind: &'static str,
    text: RefCell<String>,
    children: RefCell<Vec<Mount>>,
    removed: Cell<bool>,
}

impl Widget {
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            text: RefCell::new(String::new()),
            children: RefCell::new(Vec::new()),
            removed: Cell::new(false),
        }
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn text(&self) -> String {
        self.text.borrow().clone()
    }

    pub fn children(&self) -> Vec<Mount> {
        self.children.borrow().clone()
    }

    /// Texts of the children, for compact assertions.
    pub fn child_texts(&self) -> Vec<String> {
        self.children()
            .iter()
            .filter_map(|mount| mount.downcast_ref::<Widget>().map(Widget::text))
            .collect()
    }

    pub fn is_removed(&self) -> bool {
        self.removed.get()
    }
}

// =============================================================================
// Label - Native leaf
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct LabelProps {
    pub text: String,
    pub color: String,
}

impl LabelProps {
    pub fn new(text: &str, color: &str) -> Self {
        Self {
            text: text.to_string(),
            color: color.to_string(),
        }
    }
}

pub struct Label {
    widget: Rc<Widget>,
}

impl NativeComponent for Label {
    const TYPE: NativeType = NativeType::from_u128(0x0190_5a7e_3c1b_7d4e_9f00_0000_0000_0001);
    type Properties = LabelProps;

    fn create(properties: &LabelProps, _children: Vec<Mount>) -> Self {
        record(format!("create Label {}", properties.text));
        let widget = Widget::new("label");
        *widget.text.borrow_mut() = properties.text.clone();
        Self {
            widget: Rc::new(widget),
        }
    }

    fn update(&mut self, properties: &LabelProps, operations: Vec<Operation>) {
        record(format!(
            "update Label {} ops={}",
            properties.text,
            operations.len()
        ));
        *self.widget.text.borrow_mut() = properties.text.clone();
    }

    fn remove(&mut self, _mount: Mount) {
        record(format!("remove Label {}", self.widget.text()));
        self.widget.removed.set(true);
    }

    fn render(&self) -> Mount {
        Mount::from_rc(self.widget.clone())
    }
}

pub fn label(text: &str) -> Node {
    Native::new::<Label>(LabelProps::new(text, "black"), vec![]).into()
}

pub fn keyed_label(key: &str, text: &str) -> Node {
    Native::new::<Label>(LabelProps::new(text, "black"), vec![])
        .with_key(key)
        .into()
}

// =============================================================================
// Swatch - Native leaf with semantic property equality
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct SwatchProps {
    pub color: String,
}

impl SwatchProps {
    pub fn new(color: &str) -> Self {
        Self {
            color: color.to_string(),
        }
    }
}

pub struct Swatch {
    widget: Rc<Widget>,
}

impl NativeComponent for Swatch {
    const TYPE: NativeType = NativeType::from_u128(0x0190_5a7e_3c1b_7d4e_9f00_0000_0000_0002);
    type Properties = SwatchProps;

    fn create(properties: &SwatchProps, _children: Vec<Mount>) -> Self {
        record(format!("create Swatch {}", properties.color));
        let widget = Widget::new("swatch");
        *widget.text.borrow_mut() = properties.color.clone();
        Self {
            widget: Rc::new(widget),
        }
    }

    /// Colors are case-insensitive.
    fn equal(a: &SwatchProps, b: &SwatchProps) -> bool {
        a.color.eq_ignore_ascii_case(&b.color)
    }

    fn update(&mut self, properties: &SwatchProps, _operations: Vec<Operation>) {
        record(format!("update Swatch {}", properties.color));
        *self.widget.text.borrow_mut() = properties.color.clone();
    }

    fn remove(&mut self, _mount: Mount) {
        record(format!("remove Swatch {}", self.widget.text()));
        self.widget.removed.set(true);
    }

    fn render(&self) -> Mount {
        Mount::from_rc(self.widget.clone())
    }
}

// =============================================================================
// View - Native container
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ViewProps {
    pub name: String,
}

pub struct View {
    name: String,
    widget: Rc<Widget>,
}

impl NativeComponent for View {
    const TYPE: NativeType = NativeType::from_u128(0x0190_5a7e_3c1b_7d4e_9f00_0000_0000_0003);
    type Properties = ViewProps;

    fn create(properties: &ViewProps, children: Vec<Mount>) -> Self {
        record(format!(
            "create View {} children={}",
            properties.name,
            children.len()
        ));
        let widget = Widget::new("view");
        *widget.text.borrow_mut() = properties.name.clone();
        *widget.children.borrow_mut() = children;
        Self {
            name: properties.name.clone(),
            widget: Rc::new(widget),
        }
    }

    fn update(&mut self, properties: &ViewProps, operations: Vec<Operation>) {
        record(format!(
            "update View {} ops={}",
            properties.name,
            operations.len()
        ));
        self.name = properties.name.clone();
        *self.widget.text.borrow_mut() = properties.name.clone();
        Operation::apply(&operations, &mut self.widget.children.borrow_mut());
    }

    fn remove(&mut self, _mount: Mount) {
        record(format!("remove View {}", self.name));
        self.widget.removed.set(true);
    }

    fn render(&self) -> Mount {
        Mount::from_rc(self.widget.clone())
    }
}

pub fn view(name: &str, children: Vec<Node>) -> Node {
    Native::new::<View>(
        ViewProps {
            name: name.to_string(),
        },
        children,
    )
    .into()
}

// =============================================================================
// Greeting - Composite rendering one node
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct GreetingProps {
    pub name: String,
}

pub struct Greeting {
    name: String,
}

impl CompositeComponent for Greeting {
    type Properties = GreetingProps;

    fn create(properties: &GreetingProps, _children: &[Node]) -> Self {
        record(format!("create Greeting {}", properties.name));
        Self {
            name: properties.name.clone(),
        }
    }
}

impl Single for Greeting {
    fn render(&self) -> Node {
        label(&format!("Hello, {}", self.name))
    }
}

pub fn greeting(name: &str) -> Node {
    Composite::single::<Greeting>(
        GreetingProps {
            name: name.to_string(),
        },
        vec![],
    )
    .into()
}

// =============================================================================
// Fragment - Composite rendering its children
// =============================================================================

pub struct Fragment {
    children: Vec<Node>,
}

impl CompositeComponent for Fragment {
    type Properties = NoProperties;

    fn create(_properties: &NoProperties, children: &[Node]) -> Self {
        record(format!("create Fragment children={}", children.len()));
        Self {
            children: children.to_vec(),
        }
    }
}

impl Multiple for Fragment {
    fn render(&self) -> Vec<Node> {
        self.children.clone()
    }
}

pub fn fragment(children: Vec<Node>) -> Node {
    Composite::multiple::<Fragment>(NoProperties, children).into()
}

/// The widget behind a mount.
pub fn widget(mount: &Mount) -> Rc<Widget> {
    match mount.downcast::<Widget>() {
        Ok(widget) => widget,
        Err(err) => panic!("{err}"),
    }
}
