//! Inline span tokenizer.
//!
//! Text is split into typed spans by a fixed pipeline of passes. Each pass
//! only looks at spans that are still [`InlineSpan::Plain`]; anything an
//! earlier pass typed is carried through untouched. The order matters:
//!
//! 1. code spans (`` ` ``), so code is never parsed further
//! 2. images (`![alt](url)`), before links since a link is an image minus the `!`
//! 3. links (`[text](url)`)
//! 4. italic (`_`)
//! 5. bold (`**`)
//!
//! All spans borrow from the text handed to [`tokenize`].

use memchr::{memchr2, memchr_iter, memmem};

use crate::error::{Error, Result};

/// Delimiter for inline code.
pub const CODE_DELIMITER: &str = "`";
/// Delimiter for italic text.
pub const ITALIC_DELIMITER: &str = "_";
/// Delimiter for bold text.
pub const BOLD_DELIMITER: &str = "**";

/// A typed fragment of inline text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineSpan<'a> {
    Plain(&'a str),
    Bold(&'a str),
    Italic(&'a str),
    Code(&'a str),
    Link { text: &'a str, url: &'a str },
    Image { alt: &'a str, url: &'a str },
}

/// Discriminant of [`InlineSpan`], used to select a delimiter pass target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    Plain,
    Bold,
    Italic,
    Code,
    Link,
    Image,
}

impl<'a> InlineSpan<'a> {
    pub fn kind(&self) -> SpanKind {
        match self {
            InlineSpan::Plain(_) => SpanKind::Plain,
            InlineSpan::Bold(_) => SpanKind::Bold,
            InlineSpan::Italic(_) => SpanKind::Italic,
            InlineSpan::Code(_) => SpanKind::Code,
            InlineSpan::Link { .. } => SpanKind::Link,
            InlineSpan::Image { .. } => SpanKind::Image,
        }
    }

    /// The visible text of the span (alt text for images).
    pub fn text(&self) -> &'a str {
        match *self {
            InlineSpan::Plain(t)
            | InlineSpan::Bold(t)
            | InlineSpan::Italic(t)
            | InlineSpan::Code(t) => t,
            InlineSpan::Link { text, .. } => text,
            InlineSpan::Image { alt, .. } => alt,
        }
    }

    /// Build a text-only span of the given kind.
    ///
    /// Links and images need a URL and cannot come out of a delimiter pass.
    fn delimited(kind: SpanKind, text: &'a str) -> Result<Self> {
        match kind {
            SpanKind::Plain => Ok(InlineSpan::Plain(text)),
            SpanKind::Bold => Ok(InlineSpan::Bold(text)),
            SpanKind::Italic => Ok(InlineSpan::Italic(text)),
            SpanKind::Code => Ok(InlineSpan::Code(text)),
            SpanKind::Link | SpanKind::Image => {
                Err(Error::UnsupportedSpanKind(format!("{:?}", kind)))
            }
        }
    }
}

/// Tokenize a flat string into inline spans.
///
/// An empty string yields no spans. A delimiter with no closing pair is an
/// error rather than being left as literal text.
pub fn tokenize(text: &str) -> Result<Vec<InlineSpan<'_>>> {
    let spans = vec![InlineSpan::Plain(text)];

    let spans = split_delimiter(spans, CODE_DELIMITER, SpanKind::Code)?;
    let spans = split_images(spans);
    let spans = split_links(spans);
    let spans = split_delimiter(spans, ITALIC_DELIMITER, SpanKind::Italic)?;
    let spans = split_delimiter(spans, BOLD_DELIMITER, SpanKind::Bold)?;

    log::trace!("tokenized {} bytes into {} spans", text.len(), spans.len());
    Ok(spans)
}

/// Split every plain span on `delimiter`, typing the enclosed pieces as `kind`.
///
/// Pieces alternate plain/typed starting with plain. Empty plain pieces are
/// dropped; empty typed pieces are kept (`****` is an empty bold span).
pub fn split_delimiter<'a>(
    spans: Vec<InlineSpan<'a>>,
    delimiter: &str,
    kind: SpanKind,
) -> Result<Vec<InlineSpan<'a>>> {
    if delimiter.is_empty() {
        return Ok(spans);
    }

    let finder = memmem::Finder::new(delimiter);
    let mut out = Vec::with_capacity(spans.len() + 2);

    for span in spans {
        let InlineSpan::Plain(text) = span else {
            out.push(span);
            continue;
        };

        let mut pieces = Vec::with_capacity(3);
        let mut start = 0;
        for pos in finder.find_iter(text.as_bytes()) {
            pieces.push(&text[start..pos]);
            start = pos + delimiter.len();
        }
        pieces.push(&text[start..]);

        if pieces.len() % 2 == 0 {
            return Err(Error::unbalanced(delimiter, text));
        }

        if pieces.len() == 1 {
            if !text.is_empty() {
                out.push(span);
            }
            continue;
        }

        for (i, piece) in pieces.into_iter().enumerate() {
            if i % 2 == 0 {
                if !piece.is_empty() {
                    out.push(InlineSpan::Plain(piece));
                }
            } else {
                out.push(InlineSpan::delimited(kind, piece)?);
            }
        }
    }

    Ok(out)
}

/// Split `![alt](url)` patterns out of plain spans.
pub fn split_images(spans: Vec<InlineSpan<'_>>) -> Vec<InlineSpan<'_>> {
    split_pattern(spans, Pattern::Image)
}

/// Split `[text](url)` patterns out of plain spans. Image patterns are skipped.
pub fn split_links(spans: Vec<InlineSpan<'_>>) -> Vec<InlineSpan<'_>> {
    split_pattern(spans, Pattern::Link)
}

/// Every `(alt, url)` image pattern in `text`, in order.
pub fn extract_images(text: &str) -> Vec<(&str, &str)> {
    PatternIter::new(text, Pattern::Image)
        .map(|m| (m.label, m.url))
        .collect()
}

/// Every `(text, url)` link pattern in `text`, in order, ignoring images.
pub fn extract_links(text: &str) -> Vec<(&str, &str)> {
    PatternIter::new(text, Pattern::Link)
        .map(|m| (m.label, m.url))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pattern {
    Image,
    Link,
}

/// One `[label](url)` occurrence, with `start..end` covering the full
/// pattern (including the `!` of an image).
#[derive(Debug, Clone, Copy)]
struct PatternMatch<'a> {
    start: usize,
    end: usize,
    label: &'a str,
    url: &'a str,
}

struct PatternIter<'a> {
    text: &'a str,
    pattern: Pattern,
    pos: usize,
}

impl<'a> PatternIter<'a> {
    fn new(text: &'a str, pattern: Pattern) -> Self {
        Self {
            text,
            pattern,
            pos: 0,
        }
    }

    /// Try to match `[label](url)` with the opening bracket at `open`.
    ///
    /// The label may not contain brackets and the url may not contain
    /// parentheses.
    fn match_at(&self, open: usize) -> Option<PatternMatch<'a>> {
        let text = self.text;
        let bytes = text.as_bytes();

        let label_start = open + 1;
        let close = label_start + memchr2(b'[', b']', &bytes[label_start..])?;
        if bytes[close] != b']' || bytes.get(close + 1) != Some(&b'(') {
            return None;
        }

        let url_start = close + 2;
        let url_end = url_start + memchr2(b'(', b')', &bytes[url_start..])?;
        if bytes[url_end] != b')' {
            return None;
        }

        Some(PatternMatch {
            start: open,
            end: url_end + 1,
            label: &text[label_start..close],
            url: &text[url_start..url_end],
        })
    }
}

impl<'a> Iterator for PatternIter<'a> {
    type Item = PatternMatch<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let text = self.text;
        let bytes = text.as_bytes();

        for offset in memchr_iter(b'[', &bytes[self.pos..]) {
            let open = self.pos + offset;
            let after_bang = open > 0 && bytes[open - 1] == b'!';

            let wanted = match self.pattern {
                Pattern::Image => after_bang,
                Pattern::Link => !after_bang,
            };
            if !wanted {
                continue;
            }

            if let Some(mut m) = self.match_at(open) {
                if self.pattern == Pattern::Image {
                    m.start -= 1;
                }
                self.pos = m.end;
                return Some(m);
            }
        }

        self.pos = bytes.len();
        None
    }
}

fn split_pattern(spans: Vec<InlineSpan<'_>>, pattern: Pattern) -> Vec<InlineSpan<'_>> {
    let mut out = Vec::with_capacity(spans.len());

    for span in spans {
        let InlineSpan::Plain(text) = span else {
            out.push(span);
            continue;
        };

        let mut rest_start = 0;
        for m in PatternIter::new(text, pattern) {
            if m.start > rest_start {
                out.push(InlineSpan::Plain(&text[rest_start..m.start]));
            }
            out.push(match pattern {
                Pattern::Image => InlineSpan::Image {
                    alt: m.label,
                    url: m.url,
                },
                Pattern::Link => InlineSpan::Link {
                    text: m.label,
                    url: m.url,
                },
            });
            rest_start = m.end;
        }

        if rest_start == 0 {
            // No occurrences: keep the original span.
            out.push(span);
        } else if rest_start < text.len() {
            out.push(InlineSpan::Plain(&text[rest_start..]));
        }
    }

    out
}
