//! Line scanner shared by the block segmenter and the title extractor.
//!
//! Newlines are located with `memchr`. Lines borrow from the input, lose
//! their `\n` / `\r\n` terminator, and remember the byte span they came from.

use memchr::memchr;

use crate::span::Span;

/// One input line without its terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    pub text: &'a str,
    pub span: Span,
}

impl Line<'_> {
    /// Whitespace-only lines separate blocks.
    #[inline]
    pub fn is_blank(&self) -> bool {
        self.text.bytes().all(|b| b.is_ascii_whitespace())
    }
}

/// Iterator over the lines of a document with one line of lookahead.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    input: &'a str,
    /// Start of the first line not yet returned or peeked.
    cursor: usize,
    lookahead: Option<Line<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            cursor: 0,
            lookahead: None,
        }
    }

    /// The next line, left in place.
    pub fn peek_line(&mut self) -> Option<&Line<'a>> {
        if self.lookahead.is_none() {
            self.lookahead = self.scan();
        }
        self.lookahead.as_ref()
    }

    pub fn next_line(&mut self) -> Option<Line<'a>> {
        self.lookahead.take().or_else(|| self.scan())
    }

    /// Consume blank lines up to the next non-blank one.
    pub fn skip_blank_lines(&mut self) -> usize {
        let mut skipped = 0;
        while self.peek_line().is_some_and(Line::is_blank) {
            self.lookahead = None;
            skipped += 1;
        }
        skipped
    }

    /// Consume a run of non-blank lines and return the span it covers.
    ///
    /// Leading blank lines are skipped first. `None` at end of input.
    pub fn next_run(&mut self) -> Option<Span> {
        self.skip_blank_lines();
        let mut span = self.next_line()?.span;
        while let Some(line) = self.peek_line().copied() {
            if line.is_blank() {
                break;
            }
            span = span.merge(line.span);
            self.lookahead = None;
        }
        Some(span)
    }

    pub fn slice(&self, span: Span) -> &'a str {
        span.slice(self.input)
    }

    /// Everything not yet consumed. A peeked line is still unconsumed.
    pub fn remaining(&self) -> &'a str {
        let from = self
            .lookahead
            .map_or(self.cursor, |line| line.span.start);
        &self.input[from..]
    }

    fn scan(&mut self) -> Option<Line<'a>> {
        let rest = &self.input.as_bytes()[self.cursor..];
        if rest.is_empty() {
            return None;
        }

        let start = self.cursor;
        let (mut end, next) = match memchr(b'\n', rest) {
            Some(at) => (start + at, start + at + 1),
            None => (self.input.len(), self.input.len()),
        };
        if end > start && self.input.as_bytes()[end - 1] == b'\r' {
            end -= 1;
        }
        self.cursor = next;

        // Line bounds sit on ASCII `\r`/`\n` bytes or the input ends.
        Some(Line {
            text: &self.input[start..end],
            span: Span::new(start, end),
        })
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Line<'a>;

    fn next(&mut self) -> Option<Line<'a>> {
        self.next_line()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_drop_terminators() {
        let lines: Vec<_> = Lexer::new("ab\r\ncd\n\nef").map(|l| l.text).collect();
        assert_eq!(lines, vec!["ab", "cd", "", "ef"]);
    }

    #[test]
    fn test_line_spans() {
        let mut lexer = Lexer::new("ab\r\ncd");
        assert_eq!(lexer.next_line().unwrap().span, Span::new(0, 2));
        let second = lexer.next_line().unwrap();
        assert_eq!(second.span, Span::new(4, 6));
        assert_eq!(lexer.slice(second.span), "cd");
        assert!(lexer.next_line().is_none());
    }

    #[test]
    fn test_runs_split_on_blank_lines() {
        let input = "one\ntwo\n  \n\nthree\n";
        let mut lexer = Lexer::new(input);
        assert_eq!(lexer.next_run().map(|s| s.slice(input)), Some("one\ntwo"));
        assert_eq!(lexer.next_run().map(|s| s.slice(input)), Some("three"));
        assert_eq!(lexer.next_run(), None);
    }

    #[test]
    fn test_remaining_includes_peeked_line() {
        let mut lexer = Lexer::new("a\nb\nc");
        lexer.next_line();
        lexer.peek_line();
        assert_eq!(lexer.remaining(), "b\nc");
        assert_eq!(lexer.skip_blank_lines(), 0);
    }
}
