use std::fs;
use std::path::{Path, PathBuf};

use mdsite_core::{Converter, HeadingScope};
use serde::Deserialize;
use thiserror::Error;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "mdsite.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file at {config_path}: {source}")]
    Read {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file at {config_path}: {source}")]
    Parse {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SiteConfig {
    /// Root of the markdown sources.
    pub content: PathBuf,
    /// Assets copied verbatim into the output.
    #[serde(rename = "static")]
    pub static_dir: PathBuf,
    /// Destination root. Cleared at the start of every build.
    pub output: PathBuf,
    /// HTML template with `{{ Title }}` and `{{ Content }}` placeholders.
    pub template: PathBuf,
    /// Prefix substituted for root-relative `href`/`src` attributes.
    pub base_path: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content: PathBuf::from("content"),
            static_dir: PathBuf::from("static"),
            output: PathBuf::from("docs"),
            template: PathBuf::from("template.html"),
            base_path: "/".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    pub root_tag: String,
    pub strip_frontmatter: bool,
    pub title_scope: TitleScope,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            root_tag: "div".to_string(),
            strip_frontmatter: true,
            title_scope: TitleScope::AnyLine,
        }
    }
}

impl RenderConfig {
    /// Build a converter for these settings.
    pub fn converter(&self) -> Converter {
        Converter::new()
            .root_tag(self.root_tag.clone())
            .strip_frontmatter(self.strip_frontmatter)
            .heading_scope(self.title_scope.into())
    }
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TitleScope {
    #[default]
    AnyLine,
    FirstLine,
}

impl From<TitleScope> for HeadingScope {
    fn from(scope: TitleScope) -> Self {
        match scope {
            TitleScope::AnyLine => HeadingScope::AnyLine,
            TitleScope::FirstLine => HeadingScope::FirstLine,
        }
    }
}

impl Config {
    /// Load the config file.
    ///
    /// An explicit path must exist. Without one, `mdsite.toml` in the
    /// working directory is used if present, defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load_from_path(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILE);
                if path.exists() {
                    Self::load_from_path(path)
                } else {
                    log::debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Self, ConfigError> {
        let config_path = config_path.as_ref();

        let content = fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
            config_path: config_path.to_path_buf(),
            source,
        })?;

        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            config_path: config_path.to_path_buf(),
            source,
        })?;

        log::debug!("loaded config from {}", config_path.display());
        Ok(config)
    }
}
