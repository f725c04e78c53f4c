//! Title extraction from a raw markdown document.
//!
//! Two sources are tried in order:
//!
//! 1. a `title:` key inside a leading `---` frontmatter block
//! 2. a level-1 ATX heading (`# Title`)
//!
//! The frontmatter helpers here are also used by the converter to keep the
//! metadata block out of the rendered content.

use crate::error::{Error, Result};
use crate::lexer::Lexer;

const FRONTMATTER_FENCE: &str = "---";
const TITLE_KEY: &str = "title:";

/// Which lines may supply a `# ` heading title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeadingScope {
    /// The first `# ` line anywhere in the document.
    #[default]
    AnyLine,
    /// Only the first non-blank line after any frontmatter.
    FirstLine,
}

/// Extract the document title.
///
/// Fails with [`Error::TitleNotFound`] when neither a frontmatter `title:`
/// nor a matching `# ` heading exists.
pub fn extract_title(markdown: &str, scope: HeadingScope) -> Result<String> {
    if let Some(title) = frontmatter_title(markdown) {
        log::debug!("title from frontmatter: {:?}", title);
        return Ok(title.to_string());
    }

    if scope == HeadingScope::FirstLine {
        let mut lexer = Lexer::new(strip_frontmatter(markdown));
        lexer.skip_blank_lines();
        return lexer
            .next_line()
            .and_then(|line| heading_title(line.text))
            .map(str::to_string)
            .ok_or(Error::TitleNotFound);
    }

    // Every line counts here, frontmatter included.
    match Lexer::new(markdown).find_map(|line| heading_title(line.text)) {
        Some(title) => {
            log::debug!("title from heading: {:?}", title);
            Ok(title.to_string())
        }
        None => Err(Error::TitleNotFound),
    }
}

/// The text of a `# ` heading line, trimmed. Empty headings don't count.
fn heading_title(line: &str) -> Option<&str> {
    line.trim_start()
        .strip_prefix("# ")
        .map(str::trim)
        .filter(|title| !title.is_empty())
}

/// The `title:` value of a leading frontmatter block.
///
/// Keys match case-insensitively; values are trimmed and unquoted. When the
/// key repeats, the last occurrence wins. An empty value counts as absent.
pub fn frontmatter_title(markdown: &str) -> Option<&str> {
    let mut lexer = Lexer::new(markdown);
    if lexer.next_line()?.text.trim() != FRONTMATTER_FENCE {
        return None;
    }

    let mut title = None;
    while let Some(line) = lexer.next_line() {
        if line.text.trim() == FRONTMATTER_FENCE {
            return title.filter(|t: &&str| !t.is_empty());
        }
        if let Some(value) = title_value(line.text) {
            title = Some(value);
        }
    }

    // never closed: not frontmatter
    None
}

/// Value of a top-level `title:` line. Indented (nested) keys don't match.
fn title_value(line: &str) -> Option<&str> {
    let key = line.get(..TITLE_KEY.len())?;
    if !key.eq_ignore_ascii_case(TITLE_KEY) {
        return None;
    }
    Some(unquote(line[TITLE_KEY.len()..].trim()))
}

fn unquote(value: &str) -> &str {
    value.trim_matches('"').trim_matches('\'').trim()
}

/// Remove a leading `---` frontmatter block.
///
/// Input without frontmatter, or whose frontmatter is never closed, is
/// returned unchanged.
pub fn strip_frontmatter(markdown: &str) -> &str {
    let mut lexer = Lexer::new(markdown);
    match lexer.next_line() {
        Some(line) if line.text.trim() == FRONTMATTER_FENCE => {}
        _ => return markdown,
    }

    while let Some(line) = lexer.next_line() {
        if line.text.trim() == FRONTMATTER_FENCE {
            return lexer.remaining();
        }
    }

    markdown
}

#[cfg(test)]
mod tests {
    use super::*;

    fn title(markdown: &str) -> Result<String> {
        extract_title(markdown, HeadingScope::AnyLine)
    }

    #[test]
    fn test_basic_header() {
        assert_eq!(title("# My Title\n\nSome body text.").unwrap(), "My Title");
    }

    #[test]
    fn test_header_whitespace_is_trimmed() {
        assert_eq!(title("# My Title   \n\nbody").unwrap(), "My Title");
        assert_eq!(title("   # My Title\n\nbody").unwrap(), "My Title");
        assert_eq!(title("# A\n").unwrap(), "A");
    }

    #[test]
    fn test_unicode_title() {
        assert_eq!(title("# Hér er titill\n").unwrap(), "Hér er titill");
    }

    #[test]
    fn test_no_header() {
        assert_eq!(
            title("Some body text.\nNo header here."),
            Err(Error::TitleNotFound)
        );
        assert_eq!(title(""), Err(Error::TitleNotFound));
    }

    #[test]
    fn test_multiple_hashes_do_not_match() {
        assert_eq!(title("## My Subtitle\nBody text."), Err(Error::TitleNotFound));
        assert_eq!(title("## Sub\n\n# Main").unwrap(), "Main");
    }

    #[test]
    fn test_heading_anywhere() {
        assert_eq!(title("Body text.\n# Title").unwrap(), "Title");
    }

    #[test]
    fn test_first_line_scope() {
        let scope = HeadingScope::FirstLine;
        assert_eq!(
            extract_title("Body text.\n# Title", scope),
            Err(Error::TitleNotFound)
        );
        assert_eq!(extract_title("\n\n# Title\nbody", scope).unwrap(), "Title");
        assert_eq!(
            extract_title("---\nauthor: me\n---\n# After meta", scope).unwrap(),
            "After meta"
        );
    }

    #[test]
    fn test_frontmatter_wins_over_heading() {
        assert_eq!(title("---\ntitle: Hello\n---\n# Other").unwrap(), "Hello");
    }

    #[test]
    fn test_frontmatter_quotes_and_case() {
        assert_eq!(title("---\nTitle: \"Quoted\"\n---\n").unwrap(), "Quoted");
        assert_eq!(title("---\nTITLE: 'Single'\n---\n").unwrap(), "Single");
    }

    #[test]
    fn test_frontmatter_without_title_falls_back() {
        assert_eq!(
            title("---\nauthor: me\ntitle:\n---\n\n# Heading").unwrap(),
            "Heading"
        );
    }

    #[test]
    fn test_title_after_closing_fence_is_ignored() {
        assert_eq!(
            frontmatter_title("---\nauthor: me\n---\ntitle: late\n"),
            None
        );
    }

    #[test]
    fn test_nested_title_key_is_ignored() {
        let doc = "---\ntitle: Real\nseo:\n  title: SEO\n---\nbody";
        assert_eq!(title(doc).unwrap(), "Real");
        assert_eq!(frontmatter_title("---\nseo:\n  title: SEO\n---\n"), None);
    }

    #[test]
    fn test_heading_inside_frontmatter_counts() {
        assert_eq!(title("---\nauthor: x\n# Note\n---\nbody").unwrap(), "Note");
        assert_eq!(
            extract_title("---\nauthor: x\n# Note\n---\nbody", HeadingScope::FirstLine),
            Err(Error::TitleNotFound)
        );
    }

    #[test]
    fn test_empty_heading_is_skipped() {
        assert_eq!(title("# \n# Real").unwrap(), "Real");
        assert_eq!(title("#   \n"), Err(Error::TitleNotFound));
    }

    #[test]
    fn test_unclosed_frontmatter_is_not_metadata() {
        assert_eq!(frontmatter_title("---\ntitle: Open"), None);
        assert_eq!(title("---\ntitle: Open\n# Heading").unwrap(), "Heading");
    }

    #[test]
    fn test_strip_frontmatter() {
        assert_eq!(strip_frontmatter("---\ntitle: x\n---\n# Body"), "# Body");
        assert_eq!(strip_frontmatter("# No meta"), "# No meta");
        assert_eq!(strip_frontmatter("---\nnever closed"), "---\nnever closed");
        assert_eq!(strip_frontmatter("---\n---"), "");
    }
}
