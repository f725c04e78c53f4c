//! HTML element tree produced by the converter.
//!
//! The tree is a closed two-case sum type:
//!
//! - **Leaf**: a value with an optional tag. An untagged leaf renders as its
//!   raw value, which is how plain text sits between tagged siblings.
//! - **Parent**: a mandatory tag wrapping an ordered list of children.
//!
//! Every element owns its children outright; there is no sharing and no
//! back-reference, so a tree is built by plain moves and dropped in one go.

use std::borrow::Cow;
use std::fmt;

/// Tag names are almost always literals; the root tag is configurable.
pub type TagName = Cow<'static, str>;

/// Insertion-ordered HTML attributes.
///
/// Rendered as `key="value"` pairs separated by single spaces, in the
/// order they were added. Adding a key that is already present replaces
/// its value in place.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Attrs {
    entries: Vec<(TagName, String)>,
}

impl Attrs {
    /// Create an empty attribute list.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Set an attribute, keeping the original position of an existing key.
    pub fn insert(&mut self, key: impl Into<TagName>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Look up an attribute value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (&**k, v.as_str()))
    }

    fn write_to(&self, out: &mut String) {
        for (key, value) in &self.entries {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(value);
            out.push('"');
        }
    }
}

impl<K: Into<TagName>, V: Into<String>> FromIterator<(K, V)> for Attrs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Attrs::new();
        for (k, v) in iter {
            attrs.insert(k, v);
        }
        attrs
    }
}

/// A node in the rendered HTML tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    /// Terminal node. `value` is always present, possibly empty (images).
    Leaf {
        /// Tag name, or `None` for raw text.
        tag: Option<TagName>,
        /// Content placed between the tags (or emitted as-is when untagged).
        value: String,
        /// Attributes in insertion order.
        attrs: Attrs,
    },
    /// Container node. An empty `children` list renders as an empty tag pair.
    Parent {
        /// Tag name.
        tag: TagName,
        /// Child elements in document order.
        children: Vec<Element>,
        /// Attributes in insertion order.
        attrs: Attrs,
    },
}

impl Element {
    /// Create a tagged leaf.
    pub fn leaf(tag: impl Into<TagName>, value: impl Into<String>) -> Self {
        Element::Leaf {
            tag: Some(tag.into()),
            value: value.into(),
            attrs: Attrs::new(),
        }
    }

    /// Create an untagged leaf that renders as its raw value.
    pub fn text(value: impl Into<String>) -> Self {
        Element::Leaf {
            tag: None,
            value: value.into(),
            attrs: Attrs::new(),
        }
    }

    /// Create a parent node.
    pub fn parent(tag: impl Into<TagName>, children: Vec<Element>) -> Self {
        Element::Parent {
            tag: tag.into(),
            children,
            attrs: Attrs::new(),
        }
    }

    /// Add an attribute, builder style.
    pub fn with_attr(mut self, key: impl Into<TagName>, value: impl Into<String>) -> Self {
        self.attrs_mut().insert(key, value);
        self
    }

    /// Tag name, `None` for raw text leaves.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Element::Leaf { tag, .. } => tag.as_deref(),
            Element::Parent { tag, .. } => Some(tag.as_ref()),
        }
    }

    /// Leaf value, `None` for parents.
    pub fn value(&self) -> Option<&str> {
        match self {
            Element::Leaf { value, .. } => Some(value.as_str()),
            Element::Parent { .. } => None,
        }
    }

    pub fn attrs(&self) -> &Attrs {
        match self {
            Element::Leaf { attrs, .. } | Element::Parent { attrs, .. } => attrs,
        }
    }

    pub fn attrs_mut(&mut self) -> &mut Attrs {
        match self {
            Element::Leaf { attrs, .. } | Element::Parent { attrs, .. } => attrs,
        }
    }

    /// Children of a parent; leaves have none.
    pub fn children(&self) -> &[Element] {
        match self {
            Element::Leaf { .. } => &[],
            Element::Parent { children, .. } => children.as_slice(),
        }
    }

    /// Mutable children of a parent, `None` for leaves.
    pub fn children_mut(&mut self) -> Option<&mut Vec<Element>> {
        match self {
            Element::Leaf { .. } => None,
            Element::Parent { children, .. } => Some(children),
        }
    }

    /// Append a child. Returns `false` (and drops `child`) on a leaf.
    pub fn push(&mut self, child: Element) -> bool {
        match self.children_mut() {
            Some(children) => {
                children.push(child);
                true
            }
            None => false,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Element::Leaf { .. })
    }

    /// Render the tree to an HTML string.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(64);
        self.render_into(&mut out);
        out
    }

    /// Render the tree, appending to an existing buffer.
    pub fn render_into(&self, out: &mut String) {
        match self {
            Element::Leaf {
                tag: None, value, ..
            } => out.push_str(value),
            Element::Leaf {
                tag: Some(tag),
                value,
                attrs,
            } => {
                open_tag(out, tag, attrs);
                out.push_str(value);
                close_tag(out, tag);
            }
            Element::Parent {
                tag,
                children,
                attrs,
            } => {
                open_tag(out, tag, attrs);
                for child in children {
                    child.render_into(out);
                }
                close_tag(out, tag);
            }
        }
    }
}

#[inline]
fn open_tag(out: &mut String, tag: &str, attrs: &Attrs) {
    out.push('<');
    out.push_str(tag);
    attrs.write_to(out);
    out.push('>');
}

#[inline]
fn close_tag(out: &mut String, tag: &str) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
