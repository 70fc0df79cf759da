use std::{cell::RefCell, fmt, rc::Rc};

use serde_json::Value;
use slotmap::SlotMap;

use crate::{
    dom::{
        selector::SelectorList,
        serialize::{self, MarkupOptions},
    },
    foundation::core::{NodeId, validate_name},
    foundation::error::{SelError, SelResult},
    selection::selection::{Group, Selection},
};

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum NodeKind {
    Element {
        tag: String,
        attrs: Vec<(String, String)>, // insertion order
    },
    Text(String),
}

#[derive(Clone, Debug)]
pub(crate) struct NodeData {
    pub(crate) kind: NodeKind,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) datum: Option<Value>,
}

/// Node storage backing a [`Document`].
///
/// Removed subtrees are freed; their slots are reused under a new generation.
#[derive(Debug, Default)]
pub(crate) struct Arena {
    nodes: SlotMap<NodeId, NodeData>,
}

impl Arena {
    fn push(&mut self, kind: NodeKind) -> NodeId {
        self.nodes.insert(NodeData {
            kind,
            parent: None,
            children: Vec::new(),
            datum: None,
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id)
    }

    fn get_mut(&mut self, id: NodeId) -> SelResult<&mut NodeData> {
        self.nodes
            .get_mut(id)
            .ok_or_else(|| missing(id))
    }

    pub(crate) fn check(&self, id: NodeId) -> SelResult<()> {
        if self.nodes.contains_key(id) {
            Ok(())
        } else {
            Err(missing(id))
        }
    }

    pub(crate) fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    pub(crate) fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
    }

    pub(crate) fn tag(&self, id: NodeId) -> Option<&str> {
        match &self.get(id)?.kind {
            NodeKind::Element { tag, .. } => Some(tag.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    pub(crate) fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        match &self.get(id)?.kind {
            NodeKind::Element { attrs, .. } => attrs
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    pub(crate) fn datum(&self, id: NodeId) -> Option<&Value> {
        self.get(id).and_then(|n| n.datum.as_ref())
    }

    pub(crate) fn is_element(&self, id: NodeId) -> bool {
        self.tag(id).is_some()
    }

    /// Element descendants of `id` in document (pre-)order, excluding `id` itself.
    pub(crate) fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            if self.is_element(next) {
                out.push(next);
            }
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    pub(crate) fn text_content(&self, id: NodeId) -> String {
        let Some(node) = self.get(id) else {
            return String::new();
        };
        match &node.kind {
            NodeKind::Text(t) => t.clone(),
            NodeKind::Element { .. } => node
                .children
                .iter()
                .map(|c| self.text_content(*c))
                .collect(),
        }
    }

    pub(crate) fn create_element(&mut self, tag: &str) -> SelResult<NodeId> {
        validate_name("tag", tag)?;
        Ok(self.push(NodeKind::Element {
            tag: tag.to_string(),
            attrs: Vec::new(),
        }))
    }

    pub(crate) fn detach(&mut self, id: NodeId) -> SelResult<()> {
        let Some(parent) = self.get_mut(id)?.parent.take() else {
            return Ok(());
        };
        self.get_mut(parent)?.children.retain(|c| *c != id);
        Ok(())
    }

    /// Insert `child` under `parent`, before `next` when it is a child of `parent`,
    /// otherwise at the end.
    pub(crate) fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        next: Option<NodeId>,
    ) -> SelResult<()> {
        self.check(parent)?;
        self.check(child)?;
        if !self.is_element(parent) {
            return Err(SelError::dom("cannot insert into a text node"));
        }
        let mut cursor = Some(parent);
        while let Some(ancestor) = cursor {
            if ancestor == child {
                return Err(SelError::dom(format!(
                    "inserting node {child:?} under node {parent:?} would create a cycle"
                )));
            }
            cursor = self.parent(ancestor);
        }

        self.detach(child)?;
        let siblings = &mut self.get_mut(parent)?.children;
        let at = next
            .and_then(|n| siblings.iter().position(|c| *c == n))
            .unwrap_or(siblings.len());
        siblings.insert(at, child);
        self.get_mut(child)?.parent = Some(parent);
        Ok(())
    }

    pub(crate) fn set_attr(&mut self, id: NodeId, name: &str, value: String) -> SelResult<()> {
        validate_name("attribute", name)?;
        match &mut self.get_mut(id)?.kind {
            NodeKind::Element { attrs, .. } => {
                match attrs.iter_mut().find(|(k, _)| k == name) {
                    Some((_, v)) => *v = value,
                    None => attrs.push((name.to_string(), value)),
                }
                Ok(())
            }
            NodeKind::Text(_) => Err(SelError::dom("text nodes have no attributes")),
        }
    }

    pub(crate) fn remove_attr(&mut self, id: NodeId, name: &str) -> SelResult<()> {
        if let NodeKind::Element { attrs, .. } = &mut self.get_mut(id)?.kind {
            attrs.retain(|(k, _)| k != name);
        }
        Ok(())
    }

    pub(crate) fn set_datum(&mut self, id: NodeId, datum: Option<Value>) -> SelResult<()> {
        self.get_mut(id)?.datum = datum;
        Ok(())
    }

    /// Detach `id` and free it together with its whole subtree.
    ///
    /// Unknown or already freed ids are ignored so overlapping selections can be
    /// removed in any order.
    pub(crate) fn remove(&mut self, id: NodeId) -> SelResult<()> {
        if !self.nodes.contains_key(id) {
            return Ok(());
        }
        self.detach(id)?;
        self.free(id);
        Ok(())
    }

    fn free(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes.remove(next) {
                stack.extend(node.children);
            }
        }
    }

    /// Free every child subtree of `id`.
    pub(crate) fn clear_children(&mut self, id: NodeId) -> SelResult<()> {
        let children = std::mem::take(&mut self.get_mut(id)?.children);
        for child in children {
            self.free(child);
        }
        Ok(())
    }

    pub(crate) fn set_text(&mut self, id: NodeId, text: &str) -> SelResult<()> {
        if !self.is_element(id) {
            return Err(SelError::dom("cannot set text content of a text node"));
        }
        self.clear_children(id)?;
        if !text.is_empty() {
            let node = self.push(NodeKind::Text(text.to_string()));
            self.insert_before(id, node, None)?;
        }
        Ok(())
    }
}

fn missing(id: NodeId) -> SelError {
    SelError::dom(format!("node {id:?} does not exist"))
}

/// An in-memory document tree shared by every selection made from it.
///
/// A fresh document has the shape `<html><head></head><body></body></html>`.
/// Cloning a `Document` clones the handle, not the tree. The handle is `!Send`,
/// which keeps all mutation on one thread.
#[derive(Clone)]
pub struct Document {
    arena: Rc<RefCell<Arena>>,
    root: NodeId,
    head: NodeId,
    body: NodeId,
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.arena.borrow().len())
            .finish_non_exhaustive()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty HTML document.
    pub fn new() -> Self {
        let mut arena = Arena::default();
        let root = arena.push(NodeKind::Element {
            tag: "html".to_string(),
            attrs: Vec::new(),
        });
        let head = arena.push(NodeKind::Element {
            tag: "head".to_string(),
            attrs: Vec::new(),
        });
        let body = arena.push(NodeKind::Element {
            tag: "body".to_string(),
            attrs: Vec::new(),
        });
        for child in [head, body] {
            arena.nodes[child].parent = Some(root);
            arena.nodes[root].children.push(child);
        }
        Self {
            arena: Rc::new(RefCell::new(arena)),
            root,
            head,
            body,
        }
    }

    /// The `<html>` element.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The `<head>` element.
    pub fn head(&self) -> NodeId {
        self.head
    }

    /// The `<body>` element.
    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Whether both handles point at the same tree.
    pub fn same_document(&self, other: &Document) -> bool {
        Rc::ptr_eq(&self.arena, &other.arena)
    }

    /// Single-node selection over `<body>`, the usual render root.
    pub fn select_body(&self) -> Selection {
        self.single(self.body)
    }

    /// Single-node selection over `<html>`.
    pub fn select_root(&self) -> Selection {
        self.single(self.root)
    }

    /// Single-node selection over an arbitrary node of this document.
    pub fn select_node(&self, id: NodeId) -> SelResult<Selection> {
        self.arena.borrow().check(id)?;
        Ok(self.single(id))
    }

    /// First element in the whole document matching `selector`, as a one-slot selection.
    ///
    /// Top-level selections have no parent, so entering data on them fails instead of
    /// writing under `<html>`.
    pub fn select(&self, selector: &str) -> SelResult<Selection> {
        let list = SelectorList::parse(selector)?;
        let found = self.with_arena(|arena| {
            std::iter::once(self.root)
                .chain(arena.descendants(self.root))
                .find(|id| list.matches(arena, *id))
        });
        Ok(Selection::new(
            self.clone(),
            vec![Group {
                parent: None,
                slots: vec![found],
            }],
        ))
    }

    /// Every element in the whole document matching `selector`, in document order.
    pub fn select_all(&self, selector: &str) -> SelResult<Selection> {
        let list = SelectorList::parse(selector)?;
        let slots = self.with_arena(|arena| {
            std::iter::once(self.root)
                .chain(arena.descendants(self.root))
                .filter(|id| list.matches(arena, *id))
                .map(Some)
                .collect()
        });
        Ok(Selection::new(
            self.clone(),
            vec![Group {
                parent: None,
                slots,
            }],
        ))
    }

    fn single(&self, id: NodeId) -> Selection {
        let parent = self.arena.borrow().parent(id);
        Selection::new(
            self.clone(),
            vec![Group {
                parent,
                slots: vec![Some(id)],
            }],
        )
    }

    pub(crate) fn with_arena<R>(&self, f: impl FnOnce(&Arena) -> R) -> R {
        f(&self.arena.borrow())
    }

    pub(crate) fn with_arena_mut<R>(&self, f: impl FnOnce(&mut Arena) -> R) -> R {
        f(&mut self.arena.borrow_mut())
    }

    /// Create a detached element; attach it with [`Document::append_child`].
    pub fn create_element(&self, tag: &str) -> SelResult<NodeId> {
        self.with_arena_mut(|arena| arena.create_element(tag))
    }

    /// Move `child` to the end of `parent`'s children.
    pub fn append_child(&self, parent: NodeId, child: NodeId) -> SelResult<()> {
        self.insert_before(parent, child, None)
    }

    /// Move `child` under `parent`, before `next` (or last when `next` is `None`).
    pub fn insert_before(
        &self,
        parent: NodeId,
        child: NodeId,
        next: Option<NodeId>,
    ) -> SelResult<()> {
        self.with_arena_mut(|arena| arena.insert_before(parent, child, next))
    }

    /// Remove a node and free its subtree.
    ///
    /// The ids of freed nodes become stale: later calls with them fail with
    /// [`SelError::Dom`]. Removing an already removed node does nothing. The
    /// `<html>`, `<head>` and `<body>` skeleton cannot be removed.
    pub fn remove(&self, id: NodeId) -> SelResult<()> {
        self.check_not_skeleton(id, "remove")?;
        self.with_arena_mut(|arena| arena.remove(id))
    }

    /// Parent node, if attached.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.with_arena(|arena| arena.parent(id))
    }

    /// Child nodes (elements and text) in order.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.with_arena(|arena| arena.children(id).to_vec())
    }

    /// Tag name, or `None` for text nodes and unknown ids.
    pub fn tag_name(&self, id: NodeId) -> Option<String> {
        self.with_arena(|arena| arena.tag(id).map(str::to_string))
    }

    /// Attribute value, if set.
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<String> {
        self.with_arena(|arena| arena.attr(id, name).map(str::to_string))
    }

    /// All attributes in insertion order.
    pub fn attributes(&self, id: NodeId) -> Vec<(String, String)> {
        self.with_arena(|arena| match arena.get(id).map(|n| &n.kind) {
            Some(NodeKind::Element { attrs, .. }) => attrs.clone(),
            _ => Vec::new(),
        })
    }

    /// Set an attribute, keeping its position when it already exists.
    pub fn set_attribute(&self, id: NodeId, name: &str, value: impl Into<String>) -> SelResult<()> {
        let value = value.into();
        self.with_arena_mut(|arena| arena.set_attr(id, name, value))
    }

    /// Remove an attribute; missing attributes are ignored.
    pub fn remove_attribute(&self, id: NodeId, name: &str) -> SelResult<()> {
        self.with_arena_mut(|arena| arena.remove_attr(id, name))
    }

    /// Datum bound to the node by a data join, if any.
    pub fn datum(&self, id: NodeId) -> Option<Value> {
        self.with_arena(|arena| arena.datum(id).cloned())
    }

    /// Bind (or clear) the datum of a node.
    pub fn set_datum(&self, id: NodeId, datum: Option<Value>) -> SelResult<()> {
        self.with_arena_mut(|arena| arena.set_datum(id, datum))
    }

    /// Replace all children with a single text node.
    pub fn set_text(&self, id: NodeId, text: &str) -> SelResult<()> {
        self.with_arena_mut(|arena| arena.set_text(id, text))
    }

    /// Concatenated text of the subtree.
    pub fn text_content(&self, id: NodeId) -> String {
        self.with_arena(|arena| arena.text_content(id))
    }

    /// Remove and free every child of `id`.
    pub fn clear_children(&self, id: NodeId) -> SelResult<()> {
        if id == self.root {
            return Err(SelError::dom("cannot clear the children of <html>"));
        }
        self.with_arena_mut(|arena| arena.clear_children(id))
    }

    /// Number of live nodes, detached ones included.
    pub fn node_count(&self) -> usize {
        self.with_arena(Arena::len)
    }

    fn check_not_skeleton(&self, id: NodeId, action: &str) -> SelResult<()> {
        if [self.root, self.head, self.body].contains(&id) {
            return Err(SelError::dom(format!(
                "cannot {action} the document skeleton node {id:?}"
            )));
        }
        Ok(())
    }

    /// Markup of the children of `id`.
    pub fn inner_html(&self, id: NodeId, options: MarkupOptions) -> String {
        self.with_arena(|arena| serialize::inner_html(arena, id, options))
    }

    /// Markup of `id` itself, including its own tag.
    pub fn outer_html(&self, id: NodeId, options: MarkupOptions) -> String {
        self.with_arena(|arena| serialize::outer_html(arena, id, options))
    }

    /// The whole document, prefixed with an HTML doctype.
    pub fn to_html(&self, options: MarkupOptions) -> String {
        let mut out = String::from("<!DOCTYPE html>");
        if options.indent.is_some() {
            out.push('\n');
        }
        out.push_str(&self.outer_html(self.root, options));
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dom/document.rs"]
mod tests;
