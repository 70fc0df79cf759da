use serde_json::Value;

use crate::{
    dom::document::Document,
    foundation::core::NodeId,
    foundation::error::{SelError, SelResult},
    selection::selection::{Group, Selection},
};

/// A datum waiting for a node, plus the update node it must be inserted before.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct EnterNode {
    pub(crate) datum: Value,
    pub(crate) next: Option<NodeId>,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct EnterGroup {
    pub(crate) parent: Option<NodeId>,
    pub(crate) slots: Vec<Option<EnterNode>>,
}

/// Placeholders for data that had no existing node in a join.
#[derive(Clone, Debug)]
pub struct EnterSelection {
    doc: Document,
    groups: Vec<EnterGroup>,
}

impl EnterSelection {
    /// Number of pending data.
    pub fn size(&self) -> usize {
        self.groups
            .iter()
            .map(|g| g.slots.iter().flatten().count())
            .sum()
    }

    /// Whether every datum found a node.
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Pending data in order.
    pub fn data_values(&self) -> Vec<Value> {
        self.groups
            .iter()
            .flat_map(|g| g.slots.iter().flatten().map(|e| e.datum.clone()))
            .collect()
    }

    /// Materialize every placeholder as a new `tag` element bound to its datum.
    ///
    /// Each element goes under its group's parent, before the next update node of the
    /// join, or last when there is none. The result keeps the enter slot layout so it
    /// can be merged with the update selection.
    pub fn append(&self, tag: &str) -> SelResult<Selection> {
        let mut groups = Vec::with_capacity(self.groups.len());
        for group in &self.groups {
            let mut slots = Vec::with_capacity(group.slots.len());
            for slot in &group.slots {
                let Some(enter) = slot else {
                    slots.push(None);
                    continue;
                };
                let parent = group
                    .parent
                    .ok_or_else(|| SelError::dom("enter placeholder has no parent node"))?;
                let child = self.doc.create_element(tag)?;
                self.doc.insert_before(parent, child, enter.next)?;
                self.doc.set_datum(child, Some(enter.datum.clone()))?;
                slots.push(Some(child));
            }
            groups.push(Group {
                parent: group.parent,
                slots,
            });
        }
        Ok(Selection::new(self.doc.clone(), groups))
    }
}

/// The three partitions produced by [`Selection::data`].
#[derive(Clone, Debug)]
pub struct JoinedSelection {
    update: Selection,
    enter: EnterSelection,
    exit: Selection,
}

impl JoinedSelection {
    /// Existing nodes that received a datum.
    pub fn update(&self) -> &Selection {
        &self.update
    }

    /// Data with no existing node.
    pub fn enter(&self) -> &EnterSelection {
        &self.enter
    }

    /// Existing nodes with no datum left for them.
    pub fn exit(&self) -> &Selection {
        &self.exit
    }

    /// Split into `(update, enter, exit)`.
    pub fn into_parts(self) -> (Selection, EnterSelection, Selection) {
        (self.update, self.enter, self.exit)
    }
}

impl Selection {
    /// Join `values` against the selected nodes by index, in every group.
    ///
    /// Node `i` of a group is bound to `values[i]`. Surplus nodes form the exit
    /// selection and surplus values the enter selection. Binding is immediate: update
    /// nodes carry their new datum as soon as this returns.
    pub fn data<I, V>(&self, values: I) -> SelResult<JoinedSelection>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        let doc = self.document().clone();

        let mut update_groups = Vec::with_capacity(self.groups().len());
        let mut enter_groups = Vec::with_capacity(self.groups().len());
        let mut exit_groups = Vec::with_capacity(self.groups().len());

        for group in self.groups() {
            let mut update = vec![None; values.len()];
            let mut enter: Vec<Option<EnterNode>> = vec![None; values.len()];
            let mut exit = vec![None; group.slots.len()];

            for (i, datum) in values.iter().enumerate() {
                match group.slots.get(i).copied().flatten() {
                    Some(node) => {
                        doc.set_datum(node, Some(datum.clone()))?;
                        update[i] = Some(node);
                    }
                    None => {
                        enter[i] = Some(EnterNode {
                            datum: datum.clone(),
                            next: None,
                        });
                    }
                }
            }
            for (i, slot) in group.slots.iter().enumerate().skip(values.len()) {
                exit[i] = *slot;
            }

            // Link each placeholder to the next update node so appended nodes land
            // in data order.
            for i in 0..enter.len() {
                if let Some(placeholder) = enter[i].as_mut() {
                    placeholder.next = update[i + 1..].iter().flatten().next().copied();
                }
            }

            update_groups.push(Group {
                parent: group.parent,
                slots: update,
            });
            enter_groups.push(EnterGroup {
                parent: group.parent,
                slots: enter,
            });
            exit_groups.push(Group {
                parent: group.parent,
                slots: exit,
            });
        }

        Ok(JoinedSelection {
            update: Selection::new(doc.clone(), update_groups),
            enter: EnterSelection {
                doc: doc.clone(),
                groups: enter_groups,
            },
            exit: Selection::new(doc, exit_groups),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/selection/data.rs"]
mod tests;
