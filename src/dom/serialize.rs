use crate::{
    dom::document::{Arena, NodeKind},
    foundation::core::NodeId,
};

/// Options for writing a subtree as markup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MarkupOptions {
    /// Spaces per nesting level; `None` writes everything on one line.
    pub indent: Option<usize>,
}

impl MarkupOptions {
    /// Single-line output, byte-for-byte what `innerHTML` would produce.
    pub fn compact() -> Self {
        Self { indent: None }
    }

    /// One element per line, indented by `indent` spaces per level.
    pub fn pretty(indent: usize) -> Self {
        Self {
            indent: Some(indent),
        }
    }
}

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

pub(crate) fn inner_html(arena: &Arena, id: NodeId, options: MarkupOptions) -> String {
    let mut out = String::new();
    write_children(arena, id, options, 0, &mut out);
    out.trim_start_matches('\n').to_string()
}

pub(crate) fn outer_html(arena: &Arena, id: NodeId, options: MarkupOptions) -> String {
    let mut out = String::new();
    write_node(arena, id, options, 0, &mut out);
    out
}

fn write_node(arena: &Arena, id: NodeId, options: MarkupOptions, depth: usize, out: &mut String) {
    let Some(node) = arena.get(id) else {
        return;
    };
    match &node.kind {
        NodeKind::Text(text) => escape_text(text, out),
        NodeKind::Element { tag, attrs } => {
            out.push('<');
            out.push_str(tag);
            for (name, value) in attrs {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                escape_attr(value, out);
                out.push('"');
            }
            out.push('>');
            if node.children.is_empty() && VOID_ELEMENTS.contains(&tag.as_str()) {
                return;
            }
            let block = write_children(arena, id, options, depth + 1, out);
            if block {
                newline(options, depth, out);
            }
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
    }
}

/// Returns whether the children were laid out one per line.
fn write_children(
    arena: &Arena,
    id: NodeId,
    options: MarkupOptions,
    depth: usize,
    out: &mut String,
) -> bool {
    let children = arena.children(id);
    let block = options.indent.is_some() && children.iter().any(|c| arena.is_element(*c));
    for child in children {
        if block {
            newline(options, depth, out);
        }
        write_node(arena, *child, options, depth, out);
    }
    block
}

fn newline(options: MarkupOptions, depth: usize, out: &mut String) {
    if let Some(indent) = options.indent {
        out.push('\n');
        out.extend(std::iter::repeat_n(' ', indent * depth));
    }
}

fn escape_attr(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            c => out.push(c),
        }
    }
}

fn escape_text(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            c => out.push(c),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dom/serialize.rs"]
mod tests;
