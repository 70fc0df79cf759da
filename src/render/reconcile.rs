use serde_json::Value;

use crate::{foundation::error::SelResult, selection::selection::Selection};

/// Make the `selector`-matching descendants of `parent` line up with `data`, one
/// `tag` node per datum, and return them in data order.
///
/// `selector` defaults to `tag`. Existing nodes are reused by index and rebound to
/// the new datum, surplus nodes are removed, and missing ones are appended after the
/// existing children. Nodes not matching `selector` are left alone, so several groups
/// of the same tag can live under one parent.
///
/// ```
/// use selact::{Document, append};
///
/// let doc = Document::new();
/// let body = doc.select_body();
/// append(&body, [1, 2, 3], "p", None)?
///     .attr_with("data-value", |d, _| d.map(selact::datum_to_string))?;
/// append(&body, [7], "p", None)?;
/// assert_eq!(body.html(), r#"<p data-value="1"></p>"#);
/// # Ok::<(), selact::SelError>(())
/// ```
#[tracing::instrument(level = "debug", skip(parent, data))]
pub fn append<I, V>(
    parent: &Selection,
    data: I,
    tag: &str,
    selector: Option<&str>,
) -> SelResult<Selection>
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    let selector = selector.unwrap_or(tag);
    let joined = parent.select_all(selector)?.data(data)?;
    tracing::debug!(
        update = joined.update().size(),
        enter = joined.enter().size(),
        exit = joined.exit().size(),
        "data join"
    );

    joined.exit().remove()?;
    joined.enter().append(tag)?.merge(joined.update())
}

/// Ensure exactly one `selector`-matching `tag` node exists under `parent`.
///
/// Creates it when absent and leaves an existing one in place, so repeated calls
/// cause no document churn.
pub fn append_one(parent: &Selection, tag: &str, selector: Option<&str>) -> SelResult<Selection> {
    append(parent, [true], tag, selector)
}

#[cfg(test)]
#[path = "../../tests/unit/render/reconcile.rs"]
mod tests;
