//! Nested list construction from indentation.
//!
//! Each line of a list block is one item. Its nesting level is
//! `leading_spaces / 2`. Items are placed with a stack of open containers:
//! the root list sits at level 0, and a deeper item opens a new list inside
//! the last item of the container above it. When a line at level `n`
//! follows a line at level `n - 2` or shallower, the skipped levels get an
//! empty `<li>` placeholder to host the deeper list.

use crate::element::{Element, TagName};
use crate::error::Result;
use crate::render::inline_elements;

/// Ordered (`<ol>`) or unordered (`<ul>`) list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Ordered,
    Unordered,
}

impl ListKind {
    /// Container tag for this list kind.
    pub fn tag(self) -> &'static str {
        match self {
            ListKind::Ordered => "ol",
            ListKind::Unordered => "ul",
        }
    }

    /// Strip the item marker from an already left-trimmed line.
    ///
    /// Unordered lines drop `- ` or `* `; ordered lines drop everything up
    /// to and including the first `.`. Lines without a marker are kept.
    pub fn strip_marker(self, line: &str) -> &str {
        match self {
            ListKind::Unordered => line
                .strip_prefix("- ")
                .or_else(|| line.strip_prefix("* "))
                .unwrap_or(line)
                .trim(),
            ListKind::Ordered => match line.find('.') {
                Some(dot) => line[dot + 1..].trim(),
                None => line,
            },
        }
    }
}

/// Indentation level of a list line: two spaces per level.
#[inline]
pub fn indent_level(line: &str) -> usize {
    line.bytes().take_while(|&b| b == b' ').count() / 2
}

/// One rendered list item and the level it belongs at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListNode {
    pub level: usize,
    pub item: Element,
}

/// An open list container on the builder stack.
struct Frame {
    level: usize,
    container: Element,
}

/// Build a (possibly nested) list element from the lines of a list block.
pub fn build_list(block: &str, kind: ListKind) -> Result<Element> {
    let nodes = block
        .lines()
        .map(|line| list_node(line, kind))
        .collect::<Result<Vec<_>>>()?;

    let mut builder = ListBuilder::new(kind);
    for node in nodes {
        builder.push(node);
    }
    Ok(builder.finish())
}

/// Parse one list line into an `<li>` with its level.
pub fn list_node(line: &str, kind: ListKind) -> Result<ListNode> {
    let level = indent_level(line);
    let text = kind.strip_marker(line.trim_start());
    let item = Element::parent("li", inline_elements(text)?);
    Ok(ListNode { level, item })
}

struct ListBuilder {
    kind: ListKind,
    root: Frame,
    /// Open nested containers, innermost last.
    open: Vec<Frame>,
}

impl ListBuilder {
    fn new(kind: ListKind) -> Self {
        Self {
            kind,
            root: Frame {
                level: 0,
                container: Element::parent(kind.tag(), Vec::new()),
            },
            open: Vec::new(),
        }
    }

    fn top(&self) -> &Frame {
        self.open.last().unwrap_or(&self.root)
    }

    fn top_mut(&mut self) -> &mut Frame {
        match self.open.last_mut() {
            Some(frame) => frame,
            None => &mut self.root,
        }
    }

    fn push(&mut self, node: ListNode) {
        while !self.open.is_empty() && self.top().level > node.level {
            self.close();
        }

        while self.top().level < node.level {
            let tag: TagName = self.kind.tag().into();
            let top = self.top_mut();
            if top.container.children().is_empty() {
                top.container.push(Element::parent("li", Vec::new()));
            }
            let level = top.level + 1;
            log::trace!("opening nested <{}> at level {}", tag, level);
            self.open.push(Frame {
                level,
                container: Element::parent(tag, Vec::new()),
            });
        }

        self.top_mut().container.push(node.item);
    }

    /// Close the innermost open container, attaching it to the last item
    /// of its parent.
    fn close(&mut self) {
        let Some(frame) = self.open.pop() else {
            return;
        };
        let parent = self.top_mut();
        if let Some(host) = parent
            .container
            .children_mut()
            .and_then(|items| items.last_mut())
        {
            host.push(frame.container);
        }
    }

    fn finish(mut self) -> Element {
        while !self.open.is_empty() {
            self.close();
        }
        self.root.container
    }
}
