use serde_json::json;

use super::*;

fn container() -> (Document, Selection) {
    let doc = Document::new();
    let body = doc.select_body();
    (doc, body)
}

#[test]
fn append_and_attr_chain() {
    let (_doc, body) = container();
    body.append("svg")
        .unwrap()
        .attr("width", 640)
        .unwrap()
        .attr("height", 480)
        .unwrap();
    assert_eq!(body.html(), r#"<svg width="640" height="480"></svg>"#);
}

#[test]
fn append_on_multi_node_selection_appends_under_each() {
    let (_doc, body) = container();
    let svg = body.append("svg").unwrap();
    svg.append("g").unwrap();
    svg.append("g").unwrap();
    let rects = svg.select_all("g").unwrap().append("rect").unwrap();
    assert_eq!(rects.size(), 2);
    assert_eq!(
        body.html(),
        "<svg><g><rect></rect></g><g><rect></rect></g></svg>"
    );
}

#[test]
fn select_all_groups_by_parent() {
    let (_doc, body) = container();
    let a = body.append("g").unwrap();
    let b = body.append("g").unwrap();
    a.append("rect").unwrap();
    a.append("rect").unwrap();
    b.append("rect").unwrap();

    let rects = body.select_all("g").unwrap().select_all("rect").unwrap();
    assert_eq!(rects.groups().len(), 2);
    assert_eq!(rects.groups()[0].parent, a.node());
    assert_eq!(rects.groups()[0].slots.len(), 2);
    assert_eq!(rects.groups()[1].slots.len(), 1);
    assert_eq!(rects.size(), 3);
}

#[test]
fn select_keeps_grouping_and_propagates_datum() {
    let (doc, body) = container();
    let g = body.append("g").unwrap();
    let rect = g.append("rect").unwrap();
    doc.set_datum(g.node().unwrap(), Some(json!(7))).unwrap();

    let selected = g.select("rect").unwrap();
    assert_eq!(selected.node(), rect.node());
    assert_eq!(selected.datum(), Some(json!(7)));

    let missing = g.select("circle").unwrap();
    assert!(missing.is_empty());
    assert_eq!(missing.groups()[0].slots, vec![None]);
}

#[test]
fn append_inherits_parent_datum() {
    let (doc, body) = container();
    let g = body.append("g").unwrap();
    doc.set_datum(g.node().unwrap(), Some(json!("x"))).unwrap();
    assert_eq!(g.append("rect").unwrap().datum(), Some(json!("x")));
}

#[test]
fn attr_with_uses_datum_and_index_and_none_removes() {
    let (_doc, body) = container();
    let joined = body.select_all("p").unwrap().data([10, 20]).unwrap();
    let ps = joined.enter().append("p").unwrap();
    ps.attr("stale", "1").unwrap();
    ps.attr_with("data-v", |d, i| d.map(|d| format!("{d}@{i}")))
        .unwrap()
        .attr_with("stale", |_, _| None)
        .unwrap();
    assert_eq!(
        body.html(),
        r#"<p data-v="10@0"></p><p data-v="20@1"></p>"#
    );
}

#[test]
fn classed_adds_and_removes_classes() {
    let (_doc, body) = container();
    let g = body.append("g").unwrap().attr("class", "a b").unwrap();
    g.classed("c", true).unwrap();
    g.classed("a", false).unwrap();
    g.classed("b", true).unwrap();
    assert_eq!(body.html(), r#"<g class="c b"></g>"#);
}

#[test]
fn remove_and_clear() {
    let (_doc, body) = container();
    let svg = body.append("svg").unwrap();
    let g = svg.append("g").unwrap();
    g.remove().unwrap();
    assert_eq!(body.html(), "<svg></svg>");
    body.clear().unwrap();
    assert_eq!(body.html(), "");
}

#[test]
fn merge_fills_empty_slots_from_other() {
    let (doc, body) = container();
    let a = body.append("a").unwrap().node();
    let b = body.append("b").unwrap().node();
    let left = Selection::new(
        doc.clone(),
        vec![Group {
            parent: Some(doc.body()),
            slots: vec![a, None],
        }],
    );
    let right = Selection::new(
        doc.clone(),
        vec![Group {
            parent: Some(doc.body()),
            slots: vec![None, b],
        }],
    );
    let merged = left.merge(&right).unwrap();
    assert_eq!(merged.nodes(), vec![a.unwrap(), b.unwrap()]);
}

#[test]
fn merge_across_documents_fails() {
    let (_doc, body) = container();
    let other = Document::new().select_body();
    let err = body.merge(&other).unwrap_err();
    assert!(err.to_string().starts_with("dom error:"));
}

#[test]
fn invalid_selector_propagates() {
    let (_doc, body) = container();
    assert!(body.select_all("g >").is_err());
    assert!(body.select("").is_err());
}

#[test]
fn equality_is_by_document_and_slots() {
    let (doc, body) = container();
    assert_eq!(body, doc.select_body());
    assert_ne!(body, doc.select_root());
    assert_ne!(body, Document::new().select_body());
}

#[test]
fn html_of_empty_selection_is_empty() {
    let (_doc, body) = container();
    assert_eq!(body.select("svg").unwrap().html(), "");
}
