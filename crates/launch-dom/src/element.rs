//! Detached element trees.
//!
//! An `Element` is a plain value: building one touches no document. Mount it
//! with `Document::append`.

/// A node in a detached tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

impl From<&String> for Node {
    fn from(text: &String) -> Self {
        Node::Text(text.clone())
    }
}

/// Empty attribute list for `el`.
pub const NO_ATTRS: [(&str, &str); 0] = [];

/// An element with attributes (in insertion order) and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    /// Create an empty element.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute. Setting an existing name replaces its value in place.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value,
            None => self.attrs.push((name, value)),
        }
        self
    }

    /// Shorthand for `attr("class", ..)`.
    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    /// Append a child.
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append several children in order.
    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn attrs(&self) -> &[(String, String)] {
        &self.attrs
    }

    pub fn child_nodes(&self) -> &[Node] {
        &self.children
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }

    pub(crate) fn into_parts(self) -> (String, Vec<(String, String)>, Vec<Node>) {
        (self.tag, self.attrs, self.children)
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => collect_text(&element.children, out),
        }
    }
}

/// Build an element from a tag, an attribute mapping and children.
///
/// ```
/// use launch_dom::{el, Node};
///
/// let link = el("a", [("href", "/")], ["Back"]);
/// let item = el("li", [("class", "back")], [Node::from(link)]);
/// assert_eq!(item.text_content(), "Back");
/// ```
pub fn el<A, K, V, C>(tag: &str, attrs: A, children: C) -> Element
where
    A: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
    C: IntoIterator,
    C::Item: Into<Node>,
{
    attrs
        .into_iter()
        .fold(Element::new(tag), |element, (k, v)| element.attr(k, v))
        .children(children)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_el_applies_attrs_and_children_in_order() {
        let form = el(
            "form",
            NO_ATTRS,
            [
                Node::from(el("input", [("name", "query"), ("value", "")], Vec::<Node>::new())),
                Node::from(el("button", NO_ATTRS, ["Search"])),
            ],
        );

        assert_eq!(form.tag(), "form");
        assert_eq!(form.child_nodes().len(), 2);
        match &form.child_nodes()[0] {
            Node::Element(input) => {
                assert_eq!(input.tag(), "input");
                assert_eq!(input.attribute("name"), Some("query"));
                assert_eq!(input.attribute("value"), Some(""));
            }
            other => panic!("expected input element, got {:?}", other),
        }
        assert_eq!(form.text_content(), "Search");
    }

    #[test]
    fn test_attr_replaces_existing() {
        let element = Element::new("div").class("a").attr("id", "x").class("b");
        assert_eq!(
            element.attrs(),
            &[
                ("class".to_string(), "b".to_string()),
                ("id".to_string(), "x".to_string())
            ]
        );
    }

    #[test]
    fn test_text_content_is_recursive() {
        let element = Element::new("li")
            .child(Element::new("a").child("Apollo 1"))
            .child(" / ")
            .child(Element::new("span").child("Mercury"));
        assert_eq!(element.text_content(), "Apollo 1 / Mercury");
    }
}
