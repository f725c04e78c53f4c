//! Block segmentation and classification.
//!
//! A document is cut into blocks at blank lines, then each block is given
//! exactly one [`BlockKind`]. Classification rules are tried in a fixed
//! precedence order and the first match wins:
//!
//! 1. heading (`#` to `######` followed by a space)
//! 2. fenced code (starts and ends with three backticks)
//! 3. quote (every line starts with `>`)
//! 4. unordered list (every line starts with `- ` or `* ` after indentation)
//! 5. ordered list (every line starts with `1. `, `2. `, ... in sequence)
//! 6. paragraph

use crate::lexer::Lexer;
use crate::list::ListKind;
use crate::span::Span;

/// The kind of a markdown block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// Plain text paragraph.
    Paragraph,
    /// ATX heading with its level (1-6).
    Heading(u8),
    /// Fenced code block.
    Code,
    /// Block quotation.
    Quote,
    /// Bulleted list (`-` or `*`).
    UnorderedList,
    /// Numbered list.
    OrderedList,
}

impl BlockKind {
    /// The list kind for list blocks.
    pub fn list_kind(self) -> Option<ListKind> {
        match self {
            BlockKind::UnorderedList => Some(ListKind::Unordered),
            BlockKind::OrderedList => Some(ListKind::Ordered),
            _ => None,
        }
    }

    /// Short lowercase name, used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            BlockKind::Paragraph => "paragraph",
            BlockKind::Heading(_) => "heading",
            BlockKind::Code => "code",
            BlockKind::Quote => "quote",
            BlockKind::UnorderedList => "unordered_list",
            BlockKind::OrderedList => "ordered_list",
        }
    }
}

/// A classified block of markdown text, borrowed from the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block<'a> {
    /// Block text with surrounding whitespace trimmed.
    pub text: &'a str,
    /// Classification result.
    pub kind: BlockKind,
    /// Location of `text` in the source document.
    pub span: Span,
}

impl<'a> Block<'a> {
    /// Classify `text` as a standalone block.
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            kind: classify(text),
            span: Span::new(0, text.len()),
        }
    }

    /// Build a block with an explicit kind, bypassing classification.
    pub fn with_kind(text: &'a str, kind: BlockKind) -> Self {
        Self {
            text,
            kind,
            span: Span::new(0, text.len()),
        }
    }
}

/// Split a document into classified blocks.
///
/// Blocks are separated by one or more blank (whitespace-only) lines.
/// Each block is trimmed; empty or whitespace-only input yields no blocks.
pub fn split_blocks(input: &str) -> Vec<Block<'_>> {
    let mut lexer = Lexer::new(input);
    let mut blocks = Vec::with_capacity(16);

    while let Some(span) = lexer.next_run() {
        let raw = lexer.slice(span);
        let text = raw.trim();
        if text.is_empty() {
            continue;
        }

        let start = span.start + (raw.len() - raw.trim_start().len());
        let block = Block {
            text,
            kind: classify(text),
            span: Span::new(start, start + text.len()),
        };
        log::trace!(
            "block {} at {}..{}",
            block.kind.name(),
            block.span.start,
            block.span.end
        );
        blocks.push(block);
    }

    blocks
}

/// Classify a single block of text.
pub fn classify(block: &str) -> BlockKind {
    if let Some(level) = heading_level(block) {
        return BlockKind::Heading(level);
    }
    if is_code(block) {
        return BlockKind::Code;
    }
    if is_quote(block) {
        return BlockKind::Quote;
    }
    if is_unordered_list(block) {
        return BlockKind::UnorderedList;
    }
    if is_ordered_list(block) {
        return BlockKind::OrderedList;
    }
    BlockKind::Paragraph
}

/// Heading level of a block, if it opens with 1-6 `#` and a space.
pub fn heading_level(block: &str) -> Option<u8> {
    let hashes = block.bytes().take_while(|&b| b == b'#').count();
    if (1..=6).contains(&hashes) && block.as_bytes().get(hashes) == Some(&b' ') {
        Some(hashes as u8)
    } else {
        None
    }
}

#[inline]
fn is_code(block: &str) -> bool {
    block.starts_with("```") && block.ends_with("```")
}

#[inline]
fn is_quote(block: &str) -> bool {
    block.split('\n').all(|line| line.starts_with('>'))
}

#[inline]
fn is_unordered_list(block: &str) -> bool {
    block.split('\n').all(|line| {
        let line = line.trim_start();
        line.starts_with("- ") || line.starts_with("* ")
    })
}

fn is_ordered_list(block: &str) -> bool {
    block.split('\n').enumerate().all(|(i, line)| {
        let line = line.trim_start();
        let number = (i + 1).to_string();
        line.strip_prefix(number.as_str())
            .is_some_and(|rest| rest.starts_with(". "))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_levels() {
        for level in 1..=6u8 {
            let block = format!("{} Heading", "#".repeat(level as usize));
            assert_eq!(classify(&block), BlockKind::Heading(level));
        }
    }

    #[test]
    fn test_seven_hashes_is_paragraph() {
        assert_eq!(classify("####### Too deep"), BlockKind::Paragraph);
    }

    #[test]
    fn test_hash_without_space_is_paragraph() {
        assert_eq!(classify("#hashtag"), BlockKind::Paragraph);
    }

    #[test]
    fn test_code_block() {
        assert_eq!(classify("```\nfn main() {}\n```"), BlockKind::Code);
        assert_eq!(classify("```inline```"), BlockKind::Code);
        assert_eq!(classify("```\nunterminated"), BlockKind::Paragraph);
    }

    #[test]
    fn test_heading_beats_code() {
        assert_eq!(classify("# ```title```"), BlockKind::Heading(1));
    }

    #[test]
    fn test_quote_requires_every_line() {
        assert_eq!(classify("> one\n> two"), BlockKind::Quote);
        assert_eq!(classify("> one\ntwo"), BlockKind::Paragraph);
    }

    #[test]
    fn test_unordered_list_markers() {
        assert_eq!(classify("- a\n* b\n  - nested"), BlockKind::UnorderedList);
        assert_eq!(classify("- a\nb"), BlockKind::Paragraph);
        assert_eq!(classify("-a"), BlockKind::Paragraph);
    }

    #[test]
    fn test_ordered_list_must_count_from_one() {
        assert_eq!(classify("1. a\n2. b\n3. c"), BlockKind::OrderedList);
        assert_eq!(classify("2. a\n3. b"), BlockKind::Paragraph);
        assert_eq!(classify("1. a\n3. b"), BlockKind::Paragraph);
        assert_eq!(classify("1.a"), BlockKind::Paragraph);
    }

    #[test]
    fn test_ordered_list_past_nine() {
        let block: Vec<String> = (1..=11).map(|i| format!("{}. item", i)).collect();
        assert_eq!(classify(&block.join("\n")), BlockKind::OrderedList);
    }

    #[test]
    fn test_split_on_blank_lines() {
        let doc = "# Title\n\n\n\nFirst para\nstill first\n\n- item";
        let blocks = split_blocks(doc);
        let texts: Vec<_> = blocks.iter().map(|b| b.text).collect();
        assert_eq!(texts, vec!["# Title", "First para\nstill first", "- item"]);
        let kinds: Vec<_> = blocks.iter().map(|b| b.kind).collect();
        assert_eq!(
            kinds,
            vec![
                BlockKind::Heading(1),
                BlockKind::Paragraph,
                BlockKind::UnorderedList
            ]
        );
    }

    #[test]
    fn test_split_trims_and_tracks_spans() {
        let doc = "\n\n   indented para  \n\n";
        let blocks = split_blocks(doc);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text, "indented para");
        assert_eq!(blocks[0].span.slice(doc), "indented para");
    }

    #[test]
    fn test_whitespace_only_lines_separate_blocks() {
        let blocks = split_blocks("one\n   \ntwo");
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn test_empty_input() {
        assert!(split_blocks("").is_empty());
        assert!(split_blocks(" \n\n \t\n").is_empty());
    }
}
