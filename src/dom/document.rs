//! In-memory page implementation.
//!
//! [`Document`] is an arena of element and text nodes plus the bits of global page
//! state the accessibility layer touches: root classes, root style properties and
//! the listener registry. It implements every trait of [`Page`](super::Page).
//!
//! # Example
//!
//! ```rust
//! use inclusive_board::dom::{Document, ElementTree};
//!
//! let mut doc = Document::new();
//! let body = doc.body();
//! let button = doc.element(body, "button");
//! doc.text(button, "Apply now");
//!
//! assert_eq!(doc.inner_text(button), "Apply now");
//! assert!(doc.contains(body, button));
//! ```

use super::{ElementTree, EventHub, EventKind, ListenerId, LiveRegions, NodeId, Politeness, Presentation};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone)]
enum NodeKind {
    Element {
        tag: String,
        attributes: BTreeMap<String, String>,
        hidden: bool,
    },
    Text(String),
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena-backed page.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<NodeData>,
    root: NodeId,
    body: NodeId,
    root_classes: BTreeSet<String>,
    root_style: BTreeMap<String, String>,
    listeners: BTreeMap<ListenerId, EventKind>,
    next_listener: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates a page with an `html` root and an empty `body`.
    #[must_use]
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            root: NodeId(0),
            body: NodeId(0),
            root_classes: BTreeSet::new(),
            root_style: BTreeMap::new(),
            listeners: BTreeMap::new(),
            next_listener: 1,
        };
        doc.root = doc.create_element("html");
        doc.body = doc.element(doc.root, "body");
        doc
    }

    /// Creates a page that also carries the two visually hidden live regions.
    #[must_use]
    pub fn with_live_regions() -> Self {
        let mut doc = Self::new();
        let body = doc.body;
        for (politeness, live) in [(Politeness::Polite, "polite"), (Politeness::Assertive, "assertive")] {
            let region = doc.element(body, "div");
            doc.set_attribute(region, "id", politeness.region_id());
            doc.set_attribute(region, "class", "sr-only");
            doc.set_attribute(region, "aria-live", live);
            doc.set_attribute(region, "aria-atomic", "true");
        }
        doc
    }

    #[must_use]
    pub const fn body(&self) -> NodeId {
        self.body
    }

    /// Creates a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeKind::Element {
            tag: tag.to_ascii_lowercase(),
            attributes: BTreeMap::new(),
            hidden: false,
        })
    }

    /// Creates a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeKind::Text(text.to_string()))
    }

    /// Appends `child` to `parent`, detaching it from any previous parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(old) = self.nodes.get(child.0).and_then(|n| n.parent) {
            if let Some(old_parent) = self.nodes.get_mut(old.0) {
                old_parent.children.retain(|c| *c != child);
            }
        }
        if let Some(node) = self.nodes.get_mut(child.0) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(parent.0) {
            node.children.push(child);
        }
    }

    /// Creates an element and appends it to `parent`.
    pub fn element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let id = self.create_element(tag);
        self.append_child(parent, id);
        id
    }

    /// Creates a text node and appends it to `parent`.
    pub fn text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let id = self.create_text(text);
        self.append_child(parent, id);
        id
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(NodeKind::Element { attributes, .. }) = self.nodes.get_mut(node.0).map(|n| &mut n.kind) {
            attributes.insert(name.to_string(), value.to_string());
        }
    }

    /// Marks an element as not rendered (`display: none`). Its text still counts
    /// towards `text_content` but not `inner_text`.
    pub fn set_hidden(&mut self, node: NodeId, value: bool) {
        if let Some(NodeKind::Element { hidden, .. }) = self.nodes.get_mut(node.0).map(|n| &mut n.kind) {
            *hidden = value;
        }
    }

    /// Replaces all children of `node` with a single text node.
    pub fn set_text_content(&mut self, node: NodeId, text: &str) {
        let Some(data) = self.nodes.get_mut(node.0) else {
            return;
        };
        let old_children = std::mem::take(&mut data.children);
        for child in old_children {
            if let Some(c) = self.nodes.get_mut(child.0) {
                c.parent = None;
            }
        }
        self.text(node, text);
    }

    /// Depth-first search for the element whose `id` attribute equals `id`.
    #[must_use]
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        let mut stack = vec![self.root];
        while let Some(node) = stack.pop() {
            if self.attribute(node, "id") == Some(id) {
                return Some(node);
            }
            if let Some(data) = self.nodes.get(node.0) {
                stack.extend(data.children.iter().rev().copied());
            }
        }
        None
    }

    /// Current text of a live region, `None` if the region is not in the page.
    #[must_use]
    pub fn live_region_text(&self, politeness: Politeness) -> Option<String> {
        self.get_element_by_id(politeness.region_id())
            .map(|node| self.text_content(node))
    }

    #[must_use]
    pub fn has_root_class(&self, class: &str) -> bool {
        self.root_classes.contains(class)
    }

    #[must_use]
    pub fn root_style_property(&self, name: &str) -> Option<&str> {
        self.root_style.get(name).map(String::as_str)
    }

    /// Number of registered listeners for `kind`.
    #[must_use]
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.values().filter(|k| **k == kind).count()
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    fn collect_text(&self, node: NodeId, skip_hidden: bool, out: &mut String) {
        let Some(data) = self.nodes.get(node.0) else {
            return;
        };
        match &data.kind {
            NodeKind::Text(text) => out.push_str(text),
            NodeKind::Element { hidden, .. } => {
                if skip_hidden && *hidden {
                    return;
                }
                for child in &data.children {
                    self.collect_text(*child, skip_hidden, out);
                }
            }
        }
    }
}

impl ElementTree for Document {
    fn root(&self) -> NodeId {
        self.root
    }

    fn tag_name(&self, node: NodeId) -> Option<&str> {
        match self.nodes.get(node.0).map(|n| &n.kind) {
            Some(NodeKind::Element { tag, .. }) => Some(tag.as_str()),
            _ => None,
        }
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        match self.nodes.get(node.0).map(|n| &n.kind) {
            Some(NodeKind::Element { attributes, .. }) => attributes.get(name).map(String::as_str),
            _ => None,
        }
    }

    fn inner_text(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, true, &mut out);
        out
    }

    fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, false, &mut out);
        out
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0).and_then(|n| n.parent)
    }
}

impl LiveRegions for Document {
    fn write_region(&mut self, politeness: Politeness, text: &str) -> bool {
        match self.get_element_by_id(politeness.region_id()) {
            Some(region) => {
                self.set_text_content(region, text);
                true
            }
            None => false,
        }
    }
}

impl Presentation for Document {
    fn toggle_root_class(&mut self, class: &str, on: bool) {
        if on {
            self.root_classes.insert(class.to_string());
        } else {
            self.root_classes.remove(class);
        }
    }

    fn set_root_style_property(&mut self, name: &str, value: &str) {
        self.root_style.insert(name.to_string(), value.to_string());
    }
}

impl EventHub for Document {
    fn add_listener(&mut self, kind: EventKind) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.insert(id, kind);
        id
    }

    fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(&id).is_some()
    }
}
