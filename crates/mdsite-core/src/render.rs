//! Block rendering: one classified block in, one element subtree out.

use crate::block::{Block, BlockKind};
use crate::element::Element;
use crate::error::Result;
use crate::inline::{tokenize, InlineSpan};
use crate::list::{build_list, ListKind};

const HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

const CODE_FENCE: &str = "```";

/// Map an inline span to its element.
pub fn span_to_element(span: InlineSpan<'_>) -> Element {
    match span {
        InlineSpan::Plain(text) => Element::text(text),
        InlineSpan::Bold(text) => Element::leaf("b", text),
        InlineSpan::Italic(text) => Element::leaf("i", text),
        InlineSpan::Code(text) => Element::leaf("code", text),
        InlineSpan::Link { text, url } => Element::leaf("a", text).with_attr("href", url),
        InlineSpan::Image { alt, url } => Element::leaf("img", "")
            .with_attr("src", url)
            .with_attr("alt", alt),
    }
}

/// Tokenize `text` and map every span to an element.
pub fn inline_elements(text: &str) -> Result<Vec<Element>> {
    Ok(tokenize(text)?.into_iter().map(span_to_element).collect())
}

/// Render a classified block.
pub fn render_block(block: &Block<'_>) -> Result<Element> {
    match block.kind {
        BlockKind::Paragraph => render_paragraph(block.text),
        BlockKind::Heading(level) => render_heading(block.text, level),
        BlockKind::Code => Ok(render_code(block.text)),
        BlockKind::Quote => render_quote(block.text),
        BlockKind::UnorderedList => build_list(block.text, ListKind::Unordered),
        BlockKind::OrderedList => build_list(block.text, ListKind::Ordered),
    }
}

/// Collapse all whitespace runs (newlines included) to single spaces.
fn render_paragraph(text: &str) -> Result<Element> {
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    Ok(Element::parent("p", inline_elements(&text)?))
}

fn render_heading(text: &str, level: u8) -> Result<Element> {
    let hashes = text.bytes().take_while(|&b| b == b'#').count();
    let content = text[hashes..].trim_start();
    let tag = HEADING_TAGS[(level.clamp(1, 6) - 1) as usize];
    Ok(Element::parent(tag, inline_elements(content)?))
}

/// Fenced code is kept verbatim: no inline parsing, inner indentation kept.
fn render_code(text: &str) -> Element {
    let inner = text.strip_prefix(CODE_FENCE).unwrap_or(text);
    let inner = inner.strip_suffix(CODE_FENCE).unwrap_or(inner);
    let inner = inner
        .strip_prefix("\r\n")
        .or_else(|| inner.strip_prefix('\n'))
        .unwrap_or(inner);
    let inner = inner
        .strip_suffix("\r\n")
        .or_else(|| inner.strip_suffix('\n'))
        .unwrap_or(inner);

    Element::parent(
        "pre",
        vec![Element::parent("code", vec![Element::text(inner)])],
    )
}

/// Quote lines lose their `>` and one following space, then are
/// tokenized as a single unit.
fn render_quote(text: &str) -> Result<Element> {
    let body = text
        .lines()
        .map(|line| {
            let line = line.strip_prefix('>').unwrap_or(line);
            line.strip_prefix(' ').unwrap_or(line)
        })
        .collect::<Vec<_>>()
        .join("\n");
    Ok(Element::parent("blockquote", inline_elements(&body)?))
}
