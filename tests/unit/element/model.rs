use std::{cell::RefCell, rc::Rc};

use serde_json::json;

use super::*;
use crate::Document;

fn passthrough() -> Component {
    Component::named("passthrough", |parent, _props, _children| {
        Ok(Rendered::Selection(parent.clone()))
    })
}

#[test]
fn omitted_props_become_empty_object() {
    let element = create_element(passthrough(), PropsArg::Omitted, vec![]);
    assert_eq!(element.props(), &Props::empty());
    assert!(!element.props().is_null());
}

#[test]
fn explicit_null_props_are_forwarded() {
    let element = create_element(passthrough(), PropsArg::Null, vec![]);
    assert!(element.props().is_null());
    assert!(Element::new(passthrough()).with_null_props().props().is_null());
}

#[test]
fn explicit_props_are_kept() {
    let props = Props::empty().with("width", 100);
    let element = create_element(passthrough(), props.clone(), vec![]);
    assert_eq!(element.props(), &props);
}

#[test]
fn children_keep_their_order() {
    let a = Component::named("a", |p, _, _| Ok(p.clone().into()));
    let b = Component::named("b", |p, _, _| Ok(p.clone().into()));
    let element = Element::new(passthrough())
        .child(a.clone())
        .with_children([Element::new(b.clone()), Element::new(a.clone())]);
    let names: Vec<Option<&str>> = element
        .children()
        .iter()
        .map(|child| match child {
            Node::Component(c) => c.name(),
            Node::Element(e) => e.component().name(),
        })
        .collect();
    assert_eq!(names, vec![Some("a"), Some("b"), Some("a")]);
}

#[test]
fn builder_and_create_element_agree() {
    let child = passthrough();
    let built = Element::new(passthrough()).child(child.clone());
    let created = create_element(passthrough(), PropsArg::Omitted, vec![child.into()]);
    assert_eq!(built.props(), created.props());
    assert_eq!(built.children().len(), created.children().len());
}

#[test]
fn clones_share_the_function() {
    let c = passthrough();
    let d = c.clone();
    assert!(c.ptr_eq(&d));
    assert!(!c.ptr_eq(&passthrough()));
}

#[test]
fn debug_shows_the_name() {
    assert_eq!(format!("{:?}", passthrough()), "Component(passthrough)");
    let anonymous = Component::new(|_, _, _| Ok(Rendered::Empty));
    assert_eq!(format!("{anonymous:?}"), "Component(<anonymous>)");
}

#[test]
fn call_forwards_arguments() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&seen);
    let component = Component::new(move |_, props, children| {
        log.borrow_mut()
            .push((props.get("k").cloned(), children.len()));
        Ok(Rendered::Empty)
    });
    let doc = Document::new();
    let props = Props::empty().with("k", "v");
    let children = vec![Node::from(passthrough())];
    let rendered = component
        .call(&doc.select_body(), &props, &children)
        .unwrap();
    assert!(matches!(rendered, Rendered::Empty));
    assert_eq!(*seen.borrow(), vec![(Some(json!("v")), 1)]);
}

#[test]
fn functions_convert_into_components() {
    fn plain(parent: &Selection, _: &Props, _: &[Node]) -> SelResult<Rendered> {
        Ok(Rendered::Selection(parent.clone()))
    }
    let element = Element::new(plain);
    assert_eq!(element.component().name(), None);
}
