//! Host page abstraction.
//!
//! The accessibility layer never touches a real browser DOM. It talks to the page
//! through four small traits, which a host implements over whatever UI it has:
//!
//! - [`ElementTree`]: read-only element queries (tags, attributes, text, ancestry)
//! - [`LiveRegions`]: writes to the assertive and polite live regions
//! - [`Presentation`]: root class and CSS custom property updates
//! - [`EventHub`]: global listener registration
//!
//! [`Page`] bundles all four. [`Document`] is a complete in-memory implementation
//! used by the tests and by hosts that mirror their UI into an arena.
//!
//! Elements are identified by [`NodeId`]. Identity, not content, decides whether
//! two events refer to the same element.

pub mod document;

pub use document::Document;

/// Identity of a node within a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Read-only view of the element tree.
///
/// Tag names are reported in lowercase.
pub trait ElementTree {
    /// The document root element (`html`).
    fn root(&self) -> NodeId;

    /// Lowercase tag name, `None` for text nodes or unknown ids.
    fn tag_name(&self, node: NodeId) -> Option<&str>;

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str>;

    /// Rendered text: descendant text, skipping hidden subtrees.
    fn inner_text(&self, node: NodeId) -> String;

    /// Raw text of every descendant text node, hidden or not.
    fn text_content(&self, node: NodeId) -> String;

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Whether `node` is `ancestor` or lies inside its subtree.
    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Nearest element, starting at `node` itself, whose tag is one of `tags`.
    fn closest(&self, node: NodeId, tags: &[&str]) -> Option<NodeId> {
        let mut current = Some(node);
        while let Some(id) = current {
            if self.tag_name(id).is_some_and(|tag| tags.contains(&tag)) {
                return Some(id);
            }
            current = self.parent(id);
        }
        None
    }
}

/// Urgency of a live-region announcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Politeness {
    /// Interrupts the screen reader (`aria-live="assertive"`).
    Assertive,
    /// Waits for a pause (`aria-live="polite"`), used for status text.
    Polite,
}

impl Politeness {
    /// Element id of the region carrying this politeness level.
    #[must_use]
    pub const fn region_id(self) -> &'static str {
        match self {
            Self::Assertive => "a11y-announcer",
            Self::Polite => "a11y-status",
        }
    }
}

/// Sink for live-region text.
pub trait LiveRegions {
    /// Replaces the region's text. Returns `false` when the region is missing,
    /// which callers treat as a silent no-op.
    fn write_region(&mut self, politeness: Politeness, text: &str) -> bool;
}

/// Root-level styling hooks.
pub trait Presentation {
    fn toggle_root_class(&mut self, class: &str, on: bool);

    fn set_root_style_property(&mut self, name: &str, value: &str);
}

/// Global events the accessibility layer listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    FocusIn,
    PointerOver,
    PointerOut,
}

impl EventKind {
    #[must_use]
    pub const fn dom_name(self) -> &'static str {
        match self {
            Self::FocusIn => "focusin",
            Self::PointerOver => "pointerover",
            Self::PointerOut => "pointerout",
        }
    }
}

/// Handle returned by [`EventHub::add_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// Registry of document-level listeners.
pub trait EventHub {
    fn add_listener(&mut self, kind: EventKind) -> ListenerId;

    /// Returns `false` if the id was not registered.
    fn remove_listener(&mut self, id: ListenerId) -> bool;
}

/// Everything the accessibility layer needs from a host page.
pub trait Page: ElementTree + LiveRegions + Presentation + EventHub {}

impl<T: ElementTree + LiveRegions + Presentation + EventHub> Page for T {}
