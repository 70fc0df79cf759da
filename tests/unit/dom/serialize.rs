use crate::Document;

use super::*;

fn sample() -> Document {
    let doc = Document::new();
    let svg = doc.create_element("svg").unwrap();
    doc.append_child(doc.body(), svg).unwrap();
    doc.set_attribute(svg, "width", "100").unwrap();
    for label in ["a", "b"] {
        let g = doc.create_element("g").unwrap();
        doc.append_child(svg, g).unwrap();
        let text = doc.create_element("text").unwrap();
        doc.append_child(g, text).unwrap();
        doc.set_text(text, label).unwrap();
    }
    doc
}

#[test]
fn compact_output_is_single_line() {
    let doc = sample();
    assert_eq!(
        doc.inner_html(doc.body(), MarkupOptions::compact()),
        r#"<svg width="100"><g><text>a</text></g><g><text>b</text></g></svg>"#
    );
}

#[test]
fn pretty_output_indents_elements_but_keeps_text_inline() {
    let doc = sample();
    let expected = [
        r#"<svg width="100">"#,
        "  <g>",
        "    <text>a</text>",
        "  </g>",
        "  <g>",
        "    <text>b</text>",
        "  </g>",
        "</svg>",
    ]
    .join("\n");
    assert_eq!(doc.inner_html(doc.body(), MarkupOptions::pretty(2)), expected);
}

#[test]
fn attribute_values_escape_ampersand_and_quote() {
    let doc = Document::new();
    let a = doc.create_element("a").unwrap();
    doc.append_child(doc.body(), a).unwrap();
    doc.set_attribute(a, "title", r#"Tom & "Jerry" <3"#).unwrap();
    assert_eq!(
        doc.inner_html(doc.body(), MarkupOptions::compact()),
        r#"<a title="Tom &amp; &quot;Jerry&quot; <3"></a>"#
    );
}

#[test]
fn void_elements_have_no_closing_tag() {
    let doc = Document::new();
    for tag in ["br", "img", "div"] {
        let node = doc.create_element(tag).unwrap();
        doc.append_child(doc.body(), node).unwrap();
    }
    assert_eq!(
        doc.inner_html(doc.body(), MarkupOptions::compact()),
        "<br><img><div></div>"
    );
}

#[test]
fn outer_html_includes_the_node_itself() {
    let doc = sample();
    let svg = doc.children(doc.body())[0];
    let g = doc.children(svg)[1];
    assert_eq!(
        doc.outer_html(g, MarkupOptions::compact()),
        "<g><text>b</text></g>"
    );
}
