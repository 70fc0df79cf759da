//! selact is a small declarative rendering layer over d3-style selections.
//!
//! A tree of [`Element`]s is reconciled against an in-memory [`Document`] through
//! [`Selection`]s, in the spirit of a virtual-DOM renderer, except that components
//! build their output with selection calls instead of returning raw nodes.
//!
//! # Pieces
//!
//! 1. **Document + selections**: [`Document`] stores the tree; [`Selection`] offers
//!    `select`, `select_all`, `data` (enter/update/exit), `append`, `merge`, `attr`
//!    and markup serialization.
//! 2. **Elements**: [`Element`] / [`create_element`] describe "render this
//!    [`Component`] with these [`Props`] and children".
//! 3. **Reconciliation**: [`append`] and [`append_one`] do an index-keyed data join
//!    for one tag under a parent selection.
//! 4. **Rendering**: [`render`] walks a [`Node`] tree. Components return a
//!    [`Rendered`] value: a selection, another element, a selection with children to
//!    attach, or nothing.
//!
//! # Example
//!
//! ```
//! use selact::{Component, Element, Node, Props, Rendered, append_one, server_render};
//!
//! let svg = Component::new(|parent, props, _children| {
//!     let svg = append_one(parent, "svg", None)?
//!         .attr("width", props.i64_or("width", 640))?
//!         .attr("height", props.i64_or("height", 480))?;
//!     Ok(Rendered::Selection(svg))
//! });
//! let group = Component::new(|parent, _props, _children| {
//!     Ok(parent.append("g")?.into())
//! });
//!
//! let tree = Element::new(svg)
//!     .with_props(Props::from_iter([("width", 100), ("height", 100)]))
//!     .child(group.clone())
//!     .child(group);
//!
//! let markup = server_render(&Node::from(tree))?;
//! assert_eq!(markup, r#"<svg width="100" height="100"><g></g><g></g></svg>"#);
//! # Ok::<(), selact::SelError>(())
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod dom;
mod element;
mod foundation;
mod markup;
mod render;
mod selection;

pub use dom::document::Document;
pub use dom::selector::SelectorList;
pub use dom::serialize::MarkupOptions;
pub use element::model::{Component, Element, Node, PropsArg, Rendered, create_element};
pub use element::props::Props;
pub use foundation::core::{NodeId, datum_to_string};
pub use foundation::error::{SelError, SelResult};
pub use markup::model::{DATUM_PLACEHOLDER, MarkupNode, tag_component};
pub use render::engine::render;
pub use render::reconcile::{append, append_one};
pub use render::server::{render_document, server_render, server_render_with};
pub use selection::data::{EnterSelection, JoinedSelection};
pub use selection::selection::Selection;
