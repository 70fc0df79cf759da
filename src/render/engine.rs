use crate::{
    element::model::{Element, Node, Rendered},
    element::props::Props,
    foundation::error::SelResult,
    selection::selection::Selection,
};

/// Render `node` under `parent` and return the selection it produced.
///
/// - A bare component is called with empty props and no children.
/// - An element's component is called with its props and children; when it yields a
///   selection, each child is rendered into that selection, in order.
/// - [`Rendered::AttachChildren`] renders the carried children into the carried
///   selection without calling anything else.
/// - [`Rendered::Element`] is rendered again against the original `parent`, so chains
///   of composition components bottom out at whatever selection the innermost yields.
/// - [`Rendered::Empty`] returns `parent` unchanged and skips the node's children.
///
/// The engine itself never touches the document; all mutation happens in components.
/// A component that keeps returning an element wrapping itself never terminates.
#[tracing::instrument(level = "debug", skip_all)]
pub fn render(node: &Node, parent: &Selection) -> SelResult<Selection> {
    render_node(node, parent)
}

fn render_node(node: &Node, parent: &Selection) -> SelResult<Selection> {
    match node {
        Node::Component(component) => {
            tracing::trace!(component = ?component, "render bare component");
            let rendered = component.call(parent, &Props::empty(), &[])?;
            settle(rendered, &[], parent)
        }
        Node::Element(element) => render_element(element, parent),
    }
}

fn render_element(element: &Element, parent: &Selection) -> SelResult<Selection> {
    tracing::trace!(
        component = ?element.component(),
        children = element.children().len(),
        "render element"
    );
    let rendered = element
        .component()
        .call(parent, element.props(), element.children())?;
    settle(rendered, element.children(), parent)
}

fn settle(rendered: Rendered, children: &[Node], parent: &Selection) -> SelResult<Selection> {
    match rendered {
        Rendered::Selection(selection) => {
            render_children(children, &selection)?;
            Ok(selection)
        }
        Rendered::AttachChildren(selection, attached) => {
            render_children(&attached, &selection)?;
            Ok(selection)
        }
        Rendered::Element(next) => render_element(&next, parent),
        Rendered::Empty => Ok(parent.clone()),
    }
}

fn render_children(children: &[Node], selection: &Selection) -> SelResult<()> {
    for child in children {
        render_node(child, selection)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/engine.rs"]
mod tests;
