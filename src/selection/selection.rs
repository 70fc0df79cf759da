use std::fmt;

use serde_json::Value;

use crate::{
    dom::{document::Document, selector::SelectorList, serialize::MarkupOptions},
    foundation::core::NodeId,
    foundation::error::{SelError, SelResult},
};

/// One group of a selection: index-aligned slots under a common parent.
///
/// Empty slots are kept so that enter, update and merged selections stay aligned by index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Group {
    pub(crate) parent: Option<NodeId>,
    pub(crate) slots: Vec<Option<NodeId>>,
}

/// A handle over zero or more nodes of a [`Document`], grouped by parent.
///
/// Selections are cheap values; every operation returns a new selection (or the same
/// one, for mutators) so calls chain:
///
/// ```
/// use selact::Document;
///
/// let doc = Document::new();
/// let body = doc.select_body();
/// body.append("svg")?.attr("width", 100)?.attr("height", 100)?;
/// assert_eq!(body.html(), r#"<svg width="100" height="100"></svg>"#);
/// # Ok::<(), selact::SelError>(())
/// ```
#[derive(Clone)]
pub struct Selection {
    doc: Document,
    groups: Vec<Group>,
}

impl PartialEq for Selection {
    fn eq(&self, other: &Self) -> bool {
        self.doc.same_document(&other.doc) && self.groups == other.groups
    }
}

impl fmt::Debug for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selection")
            .field("groups", &self.groups)
            .finish_non_exhaustive()
    }
}

impl Selection {
    pub(crate) fn new(doc: Document, groups: Vec<Group>) -> Self {
        Self { doc, groups }
    }

    pub(crate) fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// The document this selection points into.
    pub fn document(&self) -> &Document {
        &self.doc
    }

    fn map_groups<F>(&self, mut f: F) -> SelResult<Selection>
    where
        F: FnMut(NodeId) -> SelResult<Option<NodeId>>,
    {
        let mut groups = Vec::with_capacity(self.groups.len());
        for group in &self.groups {
            let mut slots = Vec::with_capacity(group.slots.len());
            for slot in &group.slots {
                slots.push(match slot {
                    Some(node) => f(*node)?,
                    None => None,
                });
            }
            groups.push(Group {
                parent: group.parent,
                slots,
            });
        }
        Ok(Selection::new(self.doc.clone(), groups))
    }

    fn for_each_node<F>(&self, mut f: F) -> SelResult<()>
    where
        F: FnMut(NodeId, usize) -> SelResult<()>,
    {
        for group in &self.groups {
            for (i, slot) in group.slots.iter().enumerate() {
                if let Some(node) = slot {
                    f(*node, i)?;
                }
            }
        }
        Ok(())
    }

    /// For each node, the first descendant matching `selector`.
    ///
    /// Grouping is preserved and the parent's datum is propagated to the match.
    pub fn select(&self, selector: &str) -> SelResult<Selection> {
        let list = SelectorList::parse(selector)?;
        self.map_groups(|node| {
            let found = self.doc.with_arena(|arena| {
                arena
                    .descendants(node)
                    .into_iter()
                    .find(|d| list.matches(arena, *d))
            });
            if let Some(found) = found {
                if let Some(datum) = self.doc.datum(node) {
                    self.doc.set_datum(found, Some(datum))?;
                }
            }
            Ok(found)
        })
    }

    /// For each node, every descendant matching `selector`, one group per node.
    pub fn select_all(&self, selector: &str) -> SelResult<Selection> {
        let list = SelectorList::parse(selector)?;
        let groups = self.doc.with_arena(|arena| {
            self.groups
                .iter()
                .flat_map(|g| g.slots.iter().flatten())
                .map(|node| Group {
                    parent: Some(*node),
                    slots: arena
                        .descendants(*node)
                        .into_iter()
                        .filter(|d| list.matches(arena, *d))
                        .map(Some)
                        .collect(),
                })
                .collect()
        });
        Ok(Selection::new(self.doc.clone(), groups))
    }

    /// Append a new `tag` element as the last child of every node.
    ///
    /// The new elements inherit the datum of their parent node.
    pub fn append(&self, tag: &str) -> SelResult<Selection> {
        self.map_groups(|node| {
            let child = self.doc.create_element(tag)?;
            self.doc.append_child(node, child)?;
            if let Some(datum) = self.doc.datum(node) {
                self.doc.set_datum(child, Some(datum))?;
            }
            Ok(Some(child))
        })
    }

    /// Slot-wise union: empty slots of `self` are filled from `other`.
    pub fn merge(&self, other: &Selection) -> SelResult<Selection> {
        if !self.doc.same_document(&other.doc) {
            return Err(SelError::dom(
                "cannot merge selections from different documents",
            ));
        }
        let groups = self
            .groups
            .iter()
            .enumerate()
            .map(|(j, group)| {
                let theirs = other.groups.get(j);
                let slots = group
                    .slots
                    .iter()
                    .enumerate()
                    .map(|(i, slot)| {
                        (*slot)
                            .or_else(|| theirs.and_then(|g| g.slots.get(i).copied().flatten()))
                    })
                    .collect();
                Group {
                    parent: group.parent,
                    slots,
                }
            })
            .collect();
        Ok(Selection::new(self.doc.clone(), groups))
    }

    /// Set an attribute to the same value on every node.
    pub fn attr(&self, name: &str, value: impl fmt::Display) -> SelResult<Selection> {
        let value = value.to_string();
        self.for_each_node(|node, _| self.doc.set_attribute(node, name, value.clone()))?;
        Ok(self.clone())
    }

    /// Set an attribute per node from its datum and index; `None` removes it.
    pub fn attr_with<F>(&self, name: &str, mut f: F) -> SelResult<Selection>
    where
        F: FnMut(Option<&Value>, usize) -> Option<String>,
    {
        self.for_each_node(|node, i| {
            let datum = self.doc.datum(node);
            match f(datum.as_ref(), i) {
                Some(value) => self.doc.set_attribute(node, name, value),
                None => self.doc.remove_attribute(node, name),
            }
        })?;
        Ok(self.clone())
    }

    /// Add or remove one class on every node.
    pub fn classed(&self, class: &str, on: bool) -> SelResult<Selection> {
        self.for_each_node(|node, _| {
            let current = self.doc.attribute(node, "class").unwrap_or_default();
            let mut classes: Vec<&str> = current
                .split_whitespace()
                .filter(|c| *c != class)
                .collect();
            if on {
                classes.push(class);
            }
            self.doc.set_attribute(node, "class", classes.join(" "))
        })?;
        Ok(self.clone())
    }

    /// Replace the children of every node with a text node.
    pub fn text(&self, text: impl fmt::Display) -> SelResult<Selection> {
        let text = text.to_string();
        self.for_each_node(|node, _| self.doc.set_text(node, &text))?;
        Ok(self.clone())
    }

    /// Remove every node from the document and free its subtree.
    ///
    /// The returned selection still names the removed nodes; their ids are stale.
    pub fn remove(&self) -> SelResult<Selection> {
        self.for_each_node(|node, _| self.doc.remove(node))?;
        Ok(self.clone())
    }

    /// Remove every child of every node (`html("")`).
    pub fn clear(&self) -> SelResult<Selection> {
        self.for_each_node(|node, _| self.doc.clear_children(node))?;
        Ok(self.clone())
    }

    /// Number of non-empty slots.
    pub fn size(&self) -> usize {
        self.groups
            .iter()
            .map(|g| g.slots.iter().flatten().count())
            .sum()
    }

    /// Whether no slot holds a node.
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Selected nodes in group order.
    pub fn nodes(&self) -> Vec<NodeId> {
        self.groups
            .iter()
            .flat_map(|g| g.slots.iter().flatten().copied())
            .collect()
    }

    /// First selected node.
    pub fn node(&self) -> Option<NodeId> {
        self.groups
            .iter()
            .flat_map(|g| g.slots.iter().flatten())
            .next()
            .copied()
    }

    /// Datum of the first selected node.
    pub fn datum(&self) -> Option<Value> {
        self.node().and_then(|n| self.doc.datum(n))
    }

    /// Datum of every selected node, in order.
    pub fn data_values(&self) -> Vec<Option<Value>> {
        self.nodes().into_iter().map(|n| self.doc.datum(n)).collect()
    }

    /// Inner markup of the first selected node (empty when nothing is selected).
    pub fn html(&self) -> String {
        self.html_with(MarkupOptions::compact())
    }

    /// Like [`Selection::html`] with explicit formatting options.
    pub fn html_with(&self, options: MarkupOptions) -> String {
        self.node()
            .map(|n| self.doc.inner_html(n, options))
            .unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/selection/selection.rs"]
mod tests;
