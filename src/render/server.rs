use crate::{
    dom::{document::Document, serialize::MarkupOptions},
    element::model::Node,
    foundation::error::SelResult,
    render::engine::render,
};

/// Render `node` into the `<body>` of a fresh document and return the body markup.
pub fn server_render(node: &Node) -> SelResult<String> {
    server_render_with(node, MarkupOptions::compact())
}

/// Like [`server_render`], with explicit formatting options.
#[tracing::instrument(level = "debug", skip(node))]
pub fn server_render_with(node: &Node, options: MarkupOptions) -> SelResult<String> {
    let document = Document::new();
    let body = document.select_body();
    render(node, &body)?;
    Ok(body.html_with(options))
}

/// Render `node` into a fresh document and return the whole page, doctype included.
#[tracing::instrument(level = "debug", skip(node))]
pub fn render_document(node: &Node, options: MarkupOptions) -> SelResult<String> {
    let document = Document::new();
    render(node, &document.select_body())?;
    Ok(document.to_html(options))
}

#[cfg(test)]
#[path = "../../tests/unit/render/server.rs"]
mod tests;
