//! Document conversion entry point.

use crate::block::split_blocks;
use crate::element::{Element, TagName};
use crate::error::Result;
use crate::render::render_block;
use crate::title::{extract_title, strip_frontmatter, HeadingScope};

/// Conversion settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Tag of the element wrapping all blocks.
    pub root_tag: TagName,
    /// Drop a leading `---` frontmatter block before rendering content.
    pub strip_frontmatter: bool,
    /// Which `# ` headings may supply the title.
    pub heading_scope: HeadingScope,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            root_tag: TagName::Borrowed("div"),
            strip_frontmatter: true,
            heading_scope: HeadingScope::AnyLine,
        }
    }
}

/// A converted document: the element tree plus its title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub title: String,
    pub root: Element,
}

impl Page {
    /// Render the element tree to HTML.
    pub fn html(&self) -> String {
        self.root.render()
    }
}

/// Markdown to HTML converter.
///
/// Holds no state between calls; one converter can be shared across
/// threads and reused for any number of documents.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    /// Create a converter with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a converter from explicit options.
    pub fn with_options(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// Set the tag of the root element.
    pub fn root_tag(mut self, tag: impl Into<TagName>) -> Self {
        self.options.root_tag = tag.into();
        self
    }

    /// Enable or disable frontmatter stripping.
    pub fn strip_frontmatter(mut self, strip: bool) -> Self {
        self.options.strip_frontmatter = strip;
        self
    }

    /// Set which headings may supply the title.
    pub fn heading_scope(mut self, scope: HeadingScope) -> Self {
        self.options.heading_scope = scope;
        self
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert a document to its element tree.
    ///
    /// Every block becomes one child of the root, in document order.
    pub fn to_element(&self, markdown: &str) -> Result<Element> {
        let content = if self.options.strip_frontmatter {
            strip_frontmatter(markdown)
        } else {
            markdown
        };

        let blocks = split_blocks(content);
        log::debug!("split document into {} blocks", blocks.len());

        let children = blocks
            .iter()
            .map(render_block)
            .collect::<Result<Vec<_>>>()?;

        Ok(Element::parent(self.options.root_tag.clone(), children))
    }

    /// Extract the title from the raw document.
    pub fn title(&self, markdown: &str) -> Result<String> {
        extract_title(markdown, self.options.heading_scope)
    }

    /// Convert a document and extract its title.
    pub fn convert(&self, markdown: &str) -> Result<Page> {
        let root = self.to_element(markdown)?;
        let title = self.title(markdown)?;
        Ok(Page { title, root })
    }
}

/// Convert markdown straight to an HTML string with default options.
pub fn markdown_to_html(markdown: &str) -> Result<String> {
    Ok(Converter::new().to_element(markdown)?.render())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_tag_option() {
        let html = Converter::new()
            .root_tag("article")
            .to_element("hello")
            .unwrap()
            .render();
        assert_eq!(html, "<article><p>hello</p></article>");
    }

    #[test]
    fn test_frontmatter_is_not_rendered() {
        let doc = "---\ntitle: Meta\n---\n\nBody";
        assert_eq!(markdown_to_html(doc).unwrap(), "<div><p>Body</p></div>");

        let kept = Converter::new()
            .strip_frontmatter(false)
            .to_element(doc)
            .unwrap();
        assert_eq!(kept.children().len(), 2);
    }

    #[test]
    fn test_convert_returns_both_outputs() {
        let page = Converter::new().convert("# Hi\n\ntext").unwrap();
        assert_eq!(page.title, "Hi");
        assert_eq!(page.html(), "<div><h1>Hi</h1><p>text</p></div>");
    }

    #[test]
    fn test_convert_fails_without_title() {
        assert!(Converter::new().convert("just text").is_err());
    }
}
