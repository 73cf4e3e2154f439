//! Arena-backed document tree.
//!
//! Nodes live in a `Vec` and are addressed by `NodeId`. Removing a node frees
//! its whole subtree; ids of freed nodes are never reused, so a stale id
//! reports `DomError::StaleNode` instead of aliasing a newer node.

use std::collections::HashMap;
use std::fmt;

use crate::{DomError, Element, Node, Selector, SubmitEvent, SubmitHandler};

/// Handle to a node mounted in a `Document`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug)]
enum NodeKind {
    Element {
        tag: String,
        attrs: Vec<(String, String)>,
    },
    Text(String),
}

#[derive(Debug)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Elements that never have a closing tag.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

/// A mounted tree rooted at `<body>`.
pub struct Document {
    nodes: Vec<Option<NodeData>>,
    root: NodeId,
    submit_listeners: HashMap<NodeId, Vec<SubmitHandler>>,
}

impl Document {
    /// Create a document with an empty `<body>` root.
    pub fn new() -> Self {
        let body = NodeData {
            kind: NodeKind::Element {
                tag: "body".to_string(),
                attrs: Vec::new(),
            },
            parent: None,
            children: Vec::new(),
        };
        Self {
            nodes: vec![Some(body)],
            root: NodeId(0),
            submit_listeners: HashMap::new(),
        }
    }

    /// The `<body>` element.
    pub fn body(&self) -> NodeId {
        self.root
    }

    /// Whether the node is still part of the document.
    pub fn contains(&self, id: NodeId) -> bool {
        matches!(self.nodes.get(id.0), Some(Some(_)))
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Mount a detached node as the last child of `parent`.
    pub fn append(&mut self, parent: NodeId, node: impl Into<Node>) -> Result<NodeId, DomError> {
        self.element_data(parent)?;
        let id = self.mount(node.into(), parent);
        self.data_mut(parent)?.children.push(id);
        Ok(id)
    }

    fn mount(&mut self, node: Node, parent: NodeId) -> NodeId {
        let id = NodeId(self.nodes.len());
        match node {
            Node::Text(text) => {
                self.nodes.push(Some(NodeData {
                    kind: NodeKind::Text(text),
                    parent: Some(parent),
                    children: Vec::new(),
                }));
            }
            Node::Element(element) => {
                let (tag, attrs, children) = element.into_parts();
                self.nodes.push(Some(NodeData {
                    kind: NodeKind::Element { tag, attrs },
                    parent: Some(parent),
                    children: Vec::new(),
                }));
                let child_ids: Vec<NodeId> = children
                    .into_iter()
                    .map(|child| self.mount(child, id))
                    .collect();
                if let Some(Some(data)) = self.nodes.get_mut(id.0) {
                    data.children = child_ids;
                }
            }
        }
        id
    }

    /// Detach a node and free its subtree, including its listeners.
    pub fn remove(&mut self, id: NodeId) -> Result<(), DomError> {
        if id == self.root {
            return Err(DomError::RootRemoval);
        }
        let parent = self.data(id)?.parent;
        if let Some(parent) = parent {
            if let Ok(parent) = self.data_mut(parent) {
                parent.children.retain(|child| *child != id);
            }
        }

        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            if let Some(data) = self.nodes.get_mut(next.0).and_then(Option::take) {
                pending.extend(data.children);
            }
            self.submit_listeners.remove(&next);
        }
        Ok(())
    }

    /// Set or replace an attribute.
    pub fn set_attribute(
        &mut self,
        id: NodeId,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), DomError> {
        let value = value.into();
        let attrs = self.attrs_mut(id)?;
        match attrs.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value,
            None => attrs.push((name.to_string(), value)),
        }
        Ok(())
    }

    /// Remove an attribute. Returns whether it was present.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Result<bool, DomError> {
        let attrs = self.attrs_mut(id)?;
        let before = attrs.len();
        attrs.retain(|(n, _)| n != name);
        Ok(attrs.len() != before)
    }

    /// Attach a submit handler to an element.
    pub fn add_submit_listener(
        &mut self,
        id: NodeId,
        handler: SubmitHandler,
    ) -> Result<(), DomError> {
        self.element_data(id)?;
        self.submit_listeners.entry(id).or_default().push(handler);
        Ok(())
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Tag name, or `None` for text nodes and removed nodes.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match &self.data(id).ok()?.kind {
            NodeKind::Element { tag, .. } => Some(tag.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        match &self.data(id).ok()?.kind {
            NodeKind::Element { attrs, .. } => attrs
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.attribute(id, name).is_some()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.data(id).ok()?.parent
    }

    /// Child ids in order. Empty for removed nodes.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.data(id)
            .map(|data| data.children.as_slice())
            .unwrap_or(&[])
    }

    /// Concatenated text of the node and its descendants.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        let Ok(data) = self.data(id) else {
            return;
        };
        match &data.kind {
            NodeKind::Text(text) => out.push_str(text),
            NodeKind::Element { .. } => {
                for child in &data.children {
                    self.collect_text(*child, out);
                }
            }
        }
    }

    /// Nearest ancestor-or-self element with the given tag.
    pub fn closest(&self, id: NodeId, tag: &str) -> Option<NodeId> {
        let mut current = Some(id);
        while let Some(node) = current {
            if self.tag(node).is_some_and(|t| t.eq_ignore_ascii_case(tag)) {
                return Some(node);
            }
            current = self.parent(node);
        }
        None
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// First descendant of `scope` (document order) matching `selector`.
    pub fn query_selector(&self, scope: NodeId, selector: &str) -> Result<Option<NodeId>, DomError> {
        let selector = Selector::parse(selector)?;
        Ok(self.select(scope, &selector))
    }

    /// All descendants of `scope` matching `selector`, in document order.
    pub fn query_selector_all(&self, scope: NodeId, selector: &str) -> Result<Vec<NodeId>, DomError> {
        let selector = Selector::parse(selector)?;
        Ok(self.select_all(scope, &selector))
    }

    pub fn select(&self, scope: NodeId, selector: &Selector) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|id| self.matches(*id, selector))
    }

    pub fn select_all(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|id| self.matches(*id, selector))
            .collect()
    }

    fn matches(&self, id: NodeId, selector: &Selector) -> bool {
        match self.data(id).map(|data| &data.kind) {
            Ok(NodeKind::Element { tag, attrs }) => selector.matches(tag, attrs),
            _ => false,
        }
    }

    /// Pre-order descendants, excluding `scope` itself.
    fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(scope).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Build the submit event for a form together with its handlers.
    ///
    /// Handlers are returned rather than called so the caller can release
    /// any lock on the document first.
    pub fn prepare_submit(
        &self,
        form: NodeId,
    ) -> Result<(SubmitEvent, Vec<SubmitHandler>), DomError> {
        self.element_data(form)?;
        let values = self
            .descendants(form)
            .into_iter()
            .filter(|id| self.tag(*id) == Some("input"))
            .filter_map(|id| {
                let name = self.attribute(id, "name")?;
                let value = self.attribute(id, "value").unwrap_or_default();
                Some((name.to_string(), value.to_string()))
            })
            .collect();
        let handlers = self
            .submit_listeners
            .get(&form)
            .cloned()
            .unwrap_or_default();
        Ok((SubmitEvent::new(form, values), handlers))
    }

    // =========================================================================
    // Serialization
    // =========================================================================

    /// Serialize a node and its subtree as HTML.
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_html(id, &mut out);
        out
    }

    /// Serialize a node's children as HTML.
    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        for child in self.children(id) {
            self.write_html(*child, &mut out);
        }
        out
    }

    fn write_html(&self, id: NodeId, out: &mut String) {
        let Ok(data) = self.data(id) else {
            return;
        };
        match &data.kind {
            NodeKind::Text(text) => escape_into(text, false, out),
            NodeKind::Element { tag, attrs } => {
                out.push('<');
                out.push_str(tag);
                for (name, value) in attrs {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    escape_into(value, true, out);
                    out.push('"');
                }
                out.push('>');
                if VOID_ELEMENTS.contains(&tag.as_str()) {
                    return;
                }
                for child in &data.children {
                    self.write_html(*child, out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn data(&self, id: NodeId) -> Result<&NodeData, DomError> {
        self.nodes
            .get(id.0)
            .and_then(Option::as_ref)
            .ok_or(DomError::StaleNode(id))
    }

    fn data_mut(&mut self, id: NodeId) -> Result<&mut NodeData, DomError> {
        self.nodes
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(DomError::StaleNode(id))
    }

    fn element_data(&self, id: NodeId) -> Result<&NodeData, DomError> {
        let data = self.data(id)?;
        match data.kind {
            NodeKind::Element { .. } => Ok(data),
            NodeKind::Text(_) => Err(DomError::NotAnElement(id)),
        }
    }

    fn attrs_mut(&mut self, id: NodeId) -> Result<&mut Vec<(String, String)>, DomError> {
        match &mut self.data_mut(id)?.kind {
            NodeKind::Element { attrs, .. } => Ok(attrs),
            NodeKind::Text(_) => Err(DomError::NotAnElement(id)),
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("html", &self.outer_html(self.root))
            .field("listeners", &self.submit_listeners.len())
            .finish()
    }
}

fn escape_into(text: &str, attribute: bool, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::el;
    use std::sync::Arc;

    fn sample() -> (Document, NodeId) {
        let mut doc = Document::new();
        let main = doc
            .append(
                doc.body(),
                Element::new("main")
                    .child(Element::new("h1").child("Title"))
                    .child(
                        Element::new("ul")
                            .class("results")
                            .child(Element::new("li").class("result").child("one"))
                            .child(Element::new("li").class("result").child("two")),
                    ),
            )
            .unwrap();
        (doc, main)
    }

    #[test]
    fn test_append_and_query() {
        let (doc, main) = sample();
        assert_eq!(doc.tag(main), Some("main"));
        assert_eq!(doc.parent(main), Some(doc.body()));

        let found = doc.query_selector(doc.body(), "main").unwrap();
        assert_eq!(found, Some(main));

        let items = doc.query_selector_all(main, "li.result").unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(doc.text_content(items[0]), "one");
        assert_eq!(doc.text_content(items[1]), "two");
    }

    #[test]
    fn test_query_excludes_scope() {
        let (doc, main) = sample();
        assert_eq!(doc.query_selector(main, "main").unwrap(), None);
    }

    #[test]
    fn test_remove_frees_subtree() {
        let (mut doc, main) = sample();
        let list = doc.query_selector(main, ".results").unwrap().unwrap();
        let item = doc.children(list)[0];

        doc.remove(list).unwrap();

        assert!(!doc.contains(list));
        assert!(!doc.contains(item));
        assert_eq!(doc.query_selector(main, ".results").unwrap(), None);
        assert_eq!(doc.children(main).len(), 1);
        assert_eq!(doc.remove(list), Err(DomError::StaleNode(list)));
    }

    #[test]
    fn test_cannot_remove_root() {
        let mut doc = Document::new();
        assert_eq!(doc.remove(doc.body()), Err(DomError::RootRemoval));
    }

    #[test]
    fn test_attributes() {
        let (mut doc, main) = sample();
        doc.set_attribute(main, "data-state", "idle").unwrap();
        assert_eq!(doc.attribute(main, "data-state"), Some("idle"));

        doc.set_attribute(main, "data-state", "loading").unwrap();
        assert_eq!(doc.attribute(main, "data-state"), Some("loading"));

        assert!(doc.remove_attribute(main, "data-state").unwrap());
        assert!(!doc.remove_attribute(main, "data-state").unwrap());
        assert!(!doc.has_attribute(main, "data-state"));
    }

    #[test]
    fn test_text_nodes_reject_attributes() {
        let mut doc = Document::new();
        let text = doc.append(doc.body(), "hello").unwrap();
        assert_eq!(
            doc.set_attribute(text, "class", "x"),
            Err(DomError::NotAnElement(text))
        );
        assert_eq!(doc.append(text, "child"), Err(DomError::NotAnElement(text)));
    }

    #[test]
    fn test_closest() {
        let (doc, main) = sample();
        let item = doc.query_selector(main, "li").unwrap().unwrap();
        assert_eq!(doc.closest(item, "main"), Some(main));
        assert_eq!(doc.closest(item, "li"), Some(item));
        assert_eq!(doc.closest(item, "form"), None);
    }

    #[test]
    fn test_prepare_submit_collects_named_inputs() {
        let mut doc = Document::new();
        let form = doc
            .append(
                doc.body(),
                el(
                    "form",
                    [("class", "search")],
                    [
                        Node::from(Element::new("input").attr("name", "query").attr("value", "apollo")),
                        Node::from(Element::new("input").attr("value", "ignored")),
                        Node::from(Element::new("button").child("Search")),
                    ],
                ),
            )
            .unwrap();
        doc.add_submit_listener(form, Arc::new(|_| {})).unwrap();

        let (event, handlers) = doc.prepare_submit(form).unwrap();
        assert_eq!(event.form(), form);
        assert_eq!(event.value("query"), Some("apollo"));
        assert_eq!(handlers.len(), 1);
    }

    #[test]
    fn test_remove_drops_listeners() {
        let mut doc = Document::new();
        let form = doc.append(doc.body(), Element::new("form")).unwrap();
        doc.add_submit_listener(form, Arc::new(|_| {})).unwrap();
        doc.remove(form).unwrap();
        assert!(matches!(
            doc.prepare_submit(form),
            Err(DomError::StaleNode(id)) if id == form
        ));
    }

    #[test]
    fn test_html_serialization() {
        let mut doc = Document::new();
        doc.append(
            doc.body(),
            Element::new("ul")
                .class("launch")
                .child(Element::new("li").child("Fish & <chips>"))
                .child(Element::new("img").attr("src", "a\"b.png").attr("alt", "")),
        )
        .unwrap();

        insta::assert_snapshot!(
            doc.outer_html(doc.body()),
            @r#"<body><ul class="launch"><li>Fish &amp; &lt;chips&gt;</li><img src="a&quot;b.png" alt=""></ul></body>"#
        );
    }
}
