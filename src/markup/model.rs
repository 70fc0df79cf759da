use std::{fs::File, io::BufReader, path::Path};

use serde_json::{Map, Value};

use crate::{
    dom::selector::SelectorList,
    element::model::{Component, Element, Rendered},
    element::props::Props,
    foundation::core::{datum_to_string, validate_name},
    foundation::error::{SelError, SelResult},
    render::reconcile::append,
};

/// Attribute value that is replaced by each node's bound datum.
pub const DATUM_PLACEHOLDER: &str = "{datum}";

/// A declarative markup tree, the JSON input format of the `selact` CLI.
///
/// ```json
/// { "tag": "svg", "attrs": { "width": 100 },
///   "children": [ { "tag": "g", "data": [1, 2], "attrs": { "data-value": "{datum}" } } ] }
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MarkupNode {
    /// Element tag name.
    pub tag: String,
    /// Attributes in write order; non-string values are stringified.
    #[serde(default)]
    pub attrs: Map<String, Value>,
    /// Text content, replacing any children written by the node itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// When set, one node per datum is reconciled with [`crate::append`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Value>>,
    /// Selector scoping the data join (defaults to `tag`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
    /// Child nodes, rendered into every node this one produced.
    #[serde(default)]
    pub children: Vec<MarkupNode>,
}

impl MarkupNode {
    /// Parse a tree from JSON.
    pub fn from_reader<R: std::io::Read>(r: R) -> SelResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| SelError::serde(format!("parse markup tree JSON: {e}")))
    }

    /// Parse a tree from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> SelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            SelError::serde(format!("open markup tree JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check tag names, attribute names and selectors of the whole tree.
    pub fn validate(&self) -> SelResult<()> {
        validate_name("tag", &self.tag)?;
        for name in self.attrs.keys() {
            validate_name("attribute", name)?;
        }
        if let Some(selector) = &self.selector {
            if self.data.is_none() {
                return Err(SelError::dom(format!(
                    "<{}> has a selector but no data to join",
                    self.tag
                )));
            }
            SelectorList::parse(selector)?;
        }
        self.children.iter().try_for_each(MarkupNode::validate)
    }

    /// Number of tree nodes, this one included.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(MarkupNode::count).sum::<usize>()
    }

    /// Props handed to [`tag_component`] for this node.
    pub fn props(&self) -> Props {
        let mut props = Props::empty()
            .with("tag", self.tag.as_str())
            .with("attrs", Value::Object(self.attrs.clone()));
        if let Some(text) = &self.text {
            props = props.with("text", text.as_str());
        }
        if let Some(data) = &self.data {
            props = props.with("data", Value::Array(data.clone()));
        }
        if let Some(selector) = &self.selector {
            props = props.with("selector", selector.as_str());
        }
        props
    }

    /// Convert into an element tree built from [`tag_component`].
    pub fn to_element(&self) -> Element {
        Element::new(tag_component())
            .with_props(self.props())
            .with_children(self.children.iter().map(MarkupNode::to_element))
    }
}

/// A selection component driven entirely by props: `tag`, `attrs`, `text`, `data`
/// and `selector` (see [`MarkupNode`]).
///
/// Renders nothing when `tag` is missing.
pub fn tag_component() -> Component {
    Component::named("tag", |parent, props, _children| {
        let Some(tag) = props.get("tag").and_then(Value::as_str) else {
            return Ok(Rendered::Empty);
        };
        let mut selection = match props.get("data") {
            Some(Value::Array(data)) => append(
                parent,
                data.iter().cloned(),
                tag,
                props.get("selector").and_then(Value::as_str),
            )?,
            Some(other) => {
                return Err(SelError::component(format!(
                    "<{tag}> data must be an array, got {other}"
                )));
            }
            None => parent.append(tag)?,
        };
        if let Some(Value::Object(attrs)) = props.get("attrs") {
            for (name, value) in attrs {
                selection = if value.as_str() == Some(DATUM_PLACEHOLDER) {
                    selection.attr_with(name, |d, _| d.map(datum_to_string))?
                } else {
                    selection.attr(name, datum_to_string(value))?
                };
            }
        }
        if let Some(text) = props.get("text").and_then(Value::as_str) {
            selection = selection.text(text)?;
        }
        Ok(Rendered::Selection(selection))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/markup/model.rs"]
mod tests;
