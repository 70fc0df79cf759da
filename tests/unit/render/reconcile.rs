use super::*;
use crate::{Document, datum_to_string};

fn container() -> (Document, Selection) {
    let doc = Document::new();
    let body = doc.select_body();
    (doc, body)
}

fn svg_with(values: &[i64]) -> (Selection, Selection) {
    let (_doc, body) = container();
    let svg = body.append("svg").unwrap();
    for v in values {
        svg.append("g").unwrap().attr("data-value", v).unwrap();
    }
    (body, svg)
}

fn bind_values(selection: &Selection) {
    selection
        .attr_with("data-value", |d, _| d.map(datum_to_string))
        .unwrap();
}

const ONE_TWO_THREE: &str =
    r#"<svg><g data-value="1"></g><g data-value="2"></g><g data-value="3"></g></svg>"#;

#[test]
fn append_one_enters_when_absent() {
    let (_doc, body) = container();
    append_one(&body, "svg", None)
        .unwrap()
        .attr("width", 100)
        .unwrap()
        .attr("height", 100)
        .unwrap();
    assert_eq!(body.html(), r#"<svg width="100" height="100"></svg>"#);
}

#[test]
fn append_one_updates_an_existing_node() {
    let (_doc, body) = container();
    let existing = body.append("svg").unwrap();
    let svg = append_one(&body, "svg", None).unwrap();
    svg.attr("width", 100).unwrap().attr("height", 100).unwrap();
    assert_eq!(svg.node(), existing.node());
    assert_eq!(body.html(), r#"<svg width="100" height="100"></svg>"#);
}

#[test]
fn append_one_removes_extra_nodes() {
    let (_doc, body) = container();
    let svg = body.append("svg").unwrap();
    svg.append("g").unwrap().attr("fill", "pink").unwrap();
    svg.append("g").unwrap().attr("id", "hello").unwrap();
    append_one(&svg, "g", None)
        .unwrap()
        .attr("id", "world")
        .unwrap();
    assert_eq!(body.html(), r#"<svg><g fill="pink" id="world"></g></svg>"#);
}

#[test]
fn append_one_accepts_a_selector() {
    let (_doc, body) = container();
    let svg = body.append("svg").unwrap();
    svg.append("g").unwrap();
    svg.append("g").unwrap().attr("id", "hello").unwrap();
    append_one(&body, "g", Some("g#hello"))
        .unwrap()
        .attr("fill", "pink")
        .unwrap();
    assert_eq!(
        body.html(),
        r#"<svg><g></g><g id="hello" fill="pink"></g></svg>"#
    );
}

#[test]
fn append_one_is_idempotent() {
    let (_doc, body) = container();
    let first = append_one(&body, "svg", None).unwrap();
    first.attr("width", 1).unwrap();
    let before = body.html();
    let second = append_one(&body, "svg", None).unwrap();
    assert_eq!(first, second);
    assert_eq!(body.html(), before);
}

#[test]
fn append_rebinds_existing_nodes() {
    let (body, svg) = svg_with(&[4, 5, 6]);
    bind_values(&append(&svg, [1, 2, 3], "g", None).unwrap());
    assert_eq!(body.html(), ONE_TWO_THREE);
}

#[test]
fn append_enters_missing_nodes() {
    let (body, svg) = svg_with(&[4]);
    let joined = append(&svg, [1, 2, 3], "g", None).unwrap();
    assert_eq!(joined.size(), 3);
    bind_values(&joined);
    assert_eq!(body.html(), ONE_TWO_THREE);
}

#[test]
fn append_removes_surplus_nodes() {
    let (body, svg) = svg_with(&[1, 4, 5, 6]);
    bind_values(&append(&svg, [1, 2, 3], "g", None).unwrap());
    assert_eq!(body.html(), ONE_TWO_THREE);
}

#[test]
fn append_selector_scopes_the_join() {
    let (_doc, body) = container();
    let svg = body.append("svg").unwrap();
    svg.append("g").unwrap().attr("class", "data").unwrap();
    svg.append("g").unwrap().attr("data-value", 4).unwrap();
    svg.append("g").unwrap().attr("class", "data").unwrap();
    svg.append("g").unwrap().attr("data-value", 6).unwrap();

    let joined = append(&svg, [1, 2, 3], "g", Some("g.data")).unwrap();
    bind_values(&joined);
    joined.attr("class", "data").unwrap();

    assert_eq!(
        body.html(),
        concat!(
            "<svg>",
            r#"<g class="data" data-value="1"></g>"#,
            r#"<g data-value="4"></g>"#,
            r#"<g class="data" data-value="2"></g>"#,
            r#"<g data-value="6"></g>"#,
            r#"<g data-value="3" class="data"></g>"#,
            "</svg>"
        )
    );
}

#[test]
fn append_with_no_data_clears_matching_nodes() {
    let (body, svg) = svg_with(&[1, 2]);
    svg.append("rect").unwrap();
    let joined = append(&svg, Vec::<Value>::new(), "g", None).unwrap();
    assert!(joined.is_empty());
    assert_eq!(body.html(), "<svg><rect></rect></svg>");
}

#[test]
fn append_returns_nodes_in_data_order_with_data_bound() {
    let (_body, svg) = svg_with(&[9]);
    let joined = append(&svg, ["a", "b"], "g", None).unwrap();
    assert_eq!(
        joined.data_values(),
        vec![Some(Value::from("a")), Some(Value::from("b"))]
    );
}

#[test]
fn append_rejects_invalid_selectors_before_touching_the_document() {
    let (body, svg) = svg_with(&[1]);
    let before = body.html();
    assert!(append(&svg, [1], "g", Some("g[")).is_err());
    assert!(append(&svg, [1], "not a tag", None).is_err());
    assert_eq!(body.html(), before);
}

#[test]
fn repeated_enter_and_exit_keeps_the_store_bounded() {
    let (doc, body) = container();
    for round in 0..1000 {
        let data = if round % 2 == 0 { vec![1; 50] } else { Vec::new() };
        append(&body, data, "p", None).unwrap();
    }
    assert!(doc.children(doc.body()).is_empty());
    assert_eq!(doc.node_count(), 3);
}
