//! Speakable-text extraction.
//!
//! Turns an arbitrary element into one human-readable string for speech and the
//! sign overlay. Pages rarely carry reliable semantics, so the extractor walks a
//! fixed priority list and takes the first candidate that is non-empty once
//! trimmed:
//!
//! 1. `aria-label`
//! 2. `title`
//! 3. rendered text
//! 4. raw text content
//! 5. label or text of the nearest enclosing `button` / `a`

use crate::dom::{ElementTree, NodeId};

/// Tags whose label describes their descendants when those carry no text.
const INTERACTIVE_TAGS: &[&str] = &["button", "a"];

/// Containers too large to read out as a whole.
const PAGE_CONTAINER_TAGS: &[&str] = &["html", "body", "main"];

/// Minimum trimmed length for an element to be worth reading.
const MIN_READABLE_CHARS: usize = 2;

fn non_empty(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Derives the speakable text of `node`, or `None` if nothing usable is found.
///
/// # Examples
///
/// ```rust
/// use inclusive_board::a11y::extract_speakable_text;
/// use inclusive_board::dom::Document;
///
/// let mut doc = Document::new();
/// let button = doc.element(doc.body(), "button");
/// doc.set_attribute(button, "aria-label", "  Save job ");
/// doc.text(button, "♥");
///
/// assert_eq!(extract_speakable_text(&doc, button).as_deref(), Some("Save job"));
/// ```
pub fn extract_speakable_text<T: ElementTree + ?Sized>(tree: &T, node: NodeId) -> Option<String> {
    tree.attribute(node, "aria-label")
        .and_then(non_empty)
        .or_else(|| tree.attribute(node, "title").and_then(non_empty))
        .or_else(|| non_empty(&tree.inner_text(node)))
        .or_else(|| non_empty(&tree.text_content(node)))
        .or_else(|| {
            let clickable = tree.closest(node, INTERACTIVE_TAGS)?;
            tree.attribute(clickable, "aria-label")
                .and_then(non_empty)
                .or_else(|| non_empty(&tree.text_content(clickable)))
        })
}

/// Whether `node` is a page-wide container (`html`, `body`, `main` landmark).
pub fn is_page_container<T: ElementTree + ?Sized>(tree: &T, node: NodeId) -> bool {
    node == tree.root()
        || tree.tag_name(node).map_or(true, |tag| PAGE_CONTAINER_TAGS.contains(&tag))
        || tree.attribute(node, "role") == Some("main")
}

/// Whether focus or hover on `node` should produce any accessibility output.
///
/// Page containers are never readable. Other elements need a label or text of
/// at least two characters after trimming. Characters are Unicode scalar
/// values, not UTF-16 units, so a lone emoji such as `🙂` is not readable.
pub fn is_readable<T: ElementTree + ?Sized>(tree: &T, node: NodeId) -> bool {
    if is_page_container(tree, node) {
        return false;
    }

    let candidate = tree
        .attribute(node, "aria-label")
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .or_else(|| Some(tree.inner_text(node)).filter(|t| !t.is_empty()))
        .unwrap_or_else(|| tree.text_content(node));

    candidate.trim().chars().count() >= MIN_READABLE_CHARS
}
