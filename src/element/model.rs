use std::{fmt, rc::Rc};

use crate::{
    element::props::Props, foundation::error::SelResult, selection::selection::Selection,
};

type ComponentFn = dyn Fn(&Selection, &Props, &[Node]) -> SelResult<Rendered>;

/// A render function: `(parent, props, children) -> Rendered`.
///
/// Components are shared handles; cloning one clones the handle. They may be invoked
/// any number of times per render pass and must not rely on being called once.
#[derive(Clone)]
pub struct Component {
    name: Option<Rc<str>>,
    func: Rc<ComponentFn>,
}

impl Component {
    /// Wrap a closure or function as a component.
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&Selection, &Props, &[Node]) -> SelResult<Rendered> + 'static,
    {
        Self {
            name: None,
            func: Rc::new(func),
        }
    }

    /// Like [`Component::new`], with a name used in logs and `Debug` output.
    pub fn named<F>(name: &str, func: F) -> Self
    where
        F: Fn(&Selection, &Props, &[Node]) -> SelResult<Rendered> + 'static,
    {
        Self {
            name: Some(Rc::from(name)),
            func: Rc::new(func),
        }
    }

    /// Name given at construction, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Invoke the component.
    pub fn call(
        &self,
        parent: &Selection,
        props: &Props,
        children: &[Node],
    ) -> SelResult<Rendered> {
        (self.func)(parent, props, children)
    }

    /// Whether both handles wrap the same function.
    pub fn ptr_eq(&self, other: &Component) -> bool {
        Rc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "Component({name})"),
            None => f.write_str("Component(<anonymous>)"),
        }
    }
}

impl<F> From<F> for Component
where
    F: Fn(&Selection, &Props, &[Node]) -> SelResult<Rendered> + 'static,
{
    fn from(func: F) -> Self {
        Self::new(func)
    }
}

/// A renderable tree node: a bare component or an element.
#[derive(Clone, Debug)]
pub enum Node {
    /// Invoked with empty props and no children.
    Component(Component),
    /// Invoked with the element's props and children.
    Element(Element),
}

impl From<Component> for Node {
    fn from(component: Component) -> Self {
        Self::Component(component)
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

/// What a component produced.
#[derive(Clone, Debug)]
pub enum Rendered {
    /// A selection; the element's children are rendered into it.
    Selection(Selection),
    /// Another element, rendered against the same parent.
    Element(Element),
    /// An already built selection plus the children to render into it.
    AttachChildren(Selection, Vec<Node>),
    /// Nothing: the parent is passed through and children are skipped.
    Empty,
}

impl From<Selection> for Rendered {
    fn from(selection: Selection) -> Self {
        Self::Selection(selection)
    }
}

impl From<Element> for Rendered {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

/// An immutable "render `component` with `props` and `children`" descriptor.
///
/// Built with [`Element::new`] and the consuming builder methods, or with
/// [`create_element`]. Once built there is no way to change it.
#[derive(Clone, Debug)]
pub struct Element {
    component: Component,
    props: Props,
    children: Vec<Node>,
}

impl Element {
    /// An element with empty props and no children.
    pub fn new(component: impl Into<Component>) -> Self {
        Self {
            component: component.into(),
            props: Props::empty(),
            children: Vec::new(),
        }
    }

    /// Replace the props.
    pub fn with_props(mut self, props: Props) -> Self {
        self.props = props;
        self
    }

    /// Forward an explicit null as props.
    pub fn with_null_props(self) -> Self {
        self.with_props(Props::null())
    }

    /// Append one child.
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append children in order.
    pub fn with_children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// The component to invoke.
    pub fn component(&self) -> &Component {
        &self.component
    }

    /// Props passed to the component.
    pub fn props(&self) -> &Props {
        &self.props
    }

    /// Children, in render order.
    pub fn children(&self) -> &[Node] {
        &self.children
    }
}

/// The props argument of [`create_element`].
#[derive(Clone, Debug, Default, PartialEq)]
pub enum PropsArg {
    /// No props given: the element gets `{}`.
    #[default]
    Omitted,
    /// Explicit null, forwarded to the component as-is.
    Null,
    /// Explicit props.
    Props(Props),
}

impl From<Props> for PropsArg {
    fn from(props: Props) -> Self {
        Self::Props(props)
    }
}

/// Build an element from a component, props and an ordered list of children.
///
/// Omitted props become the empty mapping; an explicit null is forwarded as-is.
pub fn create_element(
    component: impl Into<Component>,
    props: impl Into<PropsArg>,
    children: Vec<Node>,
) -> Element {
    let props = match props.into() {
        PropsArg::Omitted => Props::empty(),
        PropsArg::Null => Props::null(),
        PropsArg::Props(props) => props,
    };
    Element {
        component: component.into(),
        props,
        children,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/element/model.rs"]
mod tests;
