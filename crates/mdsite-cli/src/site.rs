//! Site generation: static asset copying and templated page rendering.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use mdsite_core::Converter;
use thiserror::Error;

use crate::config::SiteConfig;

pub const TITLE_PLACEHOLDER: &str = "{{ Title }}";
pub const CONTENT_PLACEHOLDER: &str = "{{ Content }}";

const MARKDOWN_EXTENSION: &str = "md";

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("not a markdown file: {0}")]
    NotMarkdown(PathBuf),

    #[error("template {template} has no {placeholder} placeholder")]
    MissingPlaceholder {
        template: PathBuf,
        placeholder: &'static str,
    },

    #[error("failed to convert {path}: {source}")]
    Convert {
        path: PathBuf,
        source: mdsite_core::Error,
    },

    #[error("I/O error at {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
}

impl SiteError {
    fn io(path: &Path) -> impl FnOnce(io::Error) -> SiteError + '_ {
        move |source| SiteError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Page template with `{{ Title }}` and `{{ Content }}` placeholders.
#[derive(Debug, Clone)]
pub struct Template {
    path: PathBuf,
    text: String,
}

impl Template {
    /// Load and validate a template file.
    pub fn load(path: &Path) -> Result<Self, SiteError> {
        let text = fs::read_to_string(path).map_err(SiteError::io(path))?;
        Self::from_text(path, text)
    }

    /// Validate template text. Both placeholders must be present.
    pub fn from_text(path: &Path, text: String) -> Result<Self, SiteError> {
        for placeholder in [TITLE_PLACEHOLDER, CONTENT_PLACEHOLDER] {
            if !text.contains(placeholder) {
                return Err(SiteError::MissingPlaceholder {
                    template: path.to_path_buf(),
                    placeholder,
                });
            }
        }
        Ok(Self {
            path: path.to_path_buf(),
            text,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Fill in the placeholders and point root-relative links at `base_path`.
    pub fn render(&self, title: &str, content: &str, base_path: &str) -> String {
        let page = self
            .text
            .replace(TITLE_PLACEHOLDER, title)
            .replace(CONTENT_PLACEHOLDER, content);
        rewrite_base_path(&page, base_path)
    }
}

/// Normalize a base path to start and end with `/`.
pub fn normalize_base_path(base_path: &str) -> String {
    let trimmed = base_path.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", trimmed)
    }
}

/// Rewrite `href="/` and `src="/` prefixes to use `base_path`.
pub fn rewrite_base_path(html: &str, base_path: &str) -> String {
    if base_path == "/" {
        return html.to_string();
    }
    html.replace("href=\"/", &format!("href=\"{}", base_path))
        .replace("src=\"/", &format!("src=\"{}", base_path))
}

/// Counts reported at the end of a build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub pages: usize,
    pub assets: usize,
}

/// Renders markdown pages through a template.
pub struct SiteGenerator<'a> {
    converter: &'a Converter,
    template: Template,
    base_path: String,
}

impl<'a> SiteGenerator<'a> {
    pub fn new(converter: &'a Converter, template: Template, base_path: &str) -> Self {
        Self {
            converter,
            template,
            base_path: normalize_base_path(base_path),
        }
    }

    /// Render one markdown file to `dest`.
    ///
    /// The title comes from the raw document (frontmatter included); the
    /// content is rendered per the converter's options.
    pub fn generate_page(&self, from: &Path, dest: &Path) -> Result<(), SiteError> {
        log::info!(
            "Generating page from {} to {} using {}",
            from.display(),
            dest.display(),
            self.template.path().display()
        );

        let markdown = fs::read_to_string(from).map_err(SiteError::io(from))?;
        let convert_err = |source| SiteError::Convert {
            path: from.to_path_buf(),
            source,
        };

        let content = self
            .converter
            .to_element(&markdown)
            .map_err(convert_err)?
            .render();
        let title = self.converter.title(&markdown).map_err(convert_err)?;

        let page = self.template.render(&title, &content, &self.base_path);

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(SiteError::io(parent))?;
        }
        fs::write(dest, page).map_err(SiteError::io(dest))?;
        Ok(())
    }

    /// Render every markdown file under `content_dir` into `dest_dir`,
    /// mirroring the directory structure. Any other file fails the build.
    pub fn generate_pages_recursive(
        &self,
        content_dir: &Path,
        dest_dir: &Path,
    ) -> Result<usize, SiteError> {
        let mut pages = 0;

        for entry in sorted_entries(content_dir)? {
            let dest = dest_dir.join(entry.file_name().unwrap_or_default());

            if entry.is_dir() {
                if !dest.exists() {
                    fs::create_dir_all(&dest).map_err(SiteError::io(&dest))?;
                }
                pages += self.generate_pages_recursive(&entry, &dest)?;
                continue;
            }

            if entry.extension().and_then(|ext| ext.to_str()) != Some(MARKDOWN_EXTENSION) {
                return Err(SiteError::NotMarkdown(entry));
            }

            self.generate_page(&entry, &dest.with_extension("html"))?;
            pages += 1;
        }

        Ok(pages)
    }
}

/// Replace `output_dir` with a fresh copy of `static_dir`.
///
/// The output directory is always recreated empty first; a missing static
/// directory leaves it empty.
pub fn copy_static(static_dir: &Path, output_dir: &Path) -> Result<usize, SiteError> {
    if output_dir.exists() {
        log::debug!("Removing existing directory tree: {}", output_dir.display());
        fs::remove_dir_all(output_dir).map_err(SiteError::io(output_dir))?;
    }
    fs::create_dir_all(output_dir).map_err(SiteError::io(output_dir))?;

    if !static_dir.is_dir() {
        log::warn!(
            "static directory {} not found, skipping asset copy",
            static_dir.display()
        );
        return Ok(0);
    }

    copy_tree(static_dir, output_dir)
}

fn copy_tree(from: &Path, to: &Path) -> Result<usize, SiteError> {
    let mut copied = 0;
    for entry in sorted_entries(from)? {
        let dest = to.join(entry.file_name().unwrap_or_default());
        if entry.is_dir() {
            fs::create_dir_all(&dest).map_err(SiteError::io(&dest))?;
            copied += copy_tree(&entry, &dest)?;
        } else {
            log::debug!("Copying file: {} to {}", entry.display(), dest.display());
            fs::copy(&entry, &dest).map_err(SiteError::io(&entry))?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Directory entries sorted by path so builds are reproducible.
fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, SiteError> {
    let mut entries = fs::read_dir(dir)
        .map_err(SiteError::io(dir))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(SiteError::io(dir))?;
    entries.sort();
    Ok(entries)
}

/// Full build: fresh output tree, static assets, then every page.
pub fn build(site: &SiteConfig, converter: &Converter) -> Result<BuildSummary, SiteError> {
    let template = Template::load(&site.template)?;
    let assets = copy_static(&site.static_dir, &site.output)?;

    let generator = SiteGenerator::new(converter, template, &site.base_path);
    let pages = generator.generate_pages_recursive(&site.content, &site.output)?;

    Ok(BuildSummary { pages, assets })
}
