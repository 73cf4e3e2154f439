//! Search form.

use launch_core::Messages;
use launch_dom::{Document, DomError, Element, NodeId, SubmitHandler};

/// Build the search form: a `query` input pre-filled with `query` and a
/// submit button.
pub fn search_form(query: Option<&str>, messages: &Messages) -> Element {
    Element::new("form")
        .child(
            Element::new("input")
                .attr("name", "query")
                .attr("value", query.unwrap_or_default()),
        )
        .child(Element::new("button").child(messages.search_button.as_str()))
}

/// Mount the search form under `parent` and attach `handler` to its submit
/// event. No validation: an empty query is submitted like any other.
pub fn render_search_form(
    doc: &mut Document,
    parent: NodeId,
    handler: SubmitHandler,
    query: Option<&str>,
    messages: &Messages,
) -> Result<NodeId, DomError> {
    let form = doc.append(parent, search_form(query, messages))?;
    doc.add_submit_listener(form, handler)?;
    Ok(form)
}
