//! mdsite - Render markdown pages into a static HTML site
//!
//! Usage:
//!   mdsite [OPTIONS] <COMMAND>
//!
//! Commands:
//!   build   Generate the site from the content tree
//!   render  Print the HTML (or element tree) of one document
//!   title   Print the title of one document
//!   blocks  List the blocks of one document

mod config;
mod site;

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use mdsite_core::{split_blocks, Block, Converter, Element};
use serde::Serialize;

use crate::config::Config;

#[derive(Debug, Parser)]
#[command(name = "mdsite", version, about = "Render markdown pages into a static HTML site")]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to ./mdsite.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate the site: copy static assets, then render every page
    Build(BuildArgs),
    /// Print the HTML of one document
    Render {
        file: PathBuf,
        /// Print the element tree as JSON instead
        #[arg(short, long)]
        json: bool,
    },
    /// Print the title of one document
    Title { file: PathBuf },
    /// List the blocks of one document with their kind and byte span
    Blocks { file: PathBuf },
}

#[derive(Debug, Args)]
struct BuildArgs {
    /// Prefix for root-relative links, e.g. `/my-repo/`
    #[arg(long)]
    base_path: Option<String>,
    #[arg(long, value_name = "DIR")]
    content: Option<PathBuf>,
    #[arg(long = "static", value_name = "DIR")]
    static_dir: Option<PathBuf>,
    #[arg(long, value_name = "DIR")]
    output: Option<PathBuf>,
    #[arg(long, value_name = "FILE")]
    template: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("error: {:#}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    let converter = config.render.converter();

    match cli.command {
        Command::Build(args) => {
            apply_overrides(&mut config, args);
            cmd_build(&config, &converter)
        }
        Command::Render { file, json } => cmd_render(&converter, &file, json),
        Command::Title { file } => cmd_title(&converter, &file),
        Command::Blocks { file } => cmd_blocks(&converter, &file),
    }
}

fn apply_overrides(config: &mut Config, args: BuildArgs) {
    let site = &mut config.site;
    if let Some(base_path) = args.base_path {
        site.base_path = base_path;
    }
    if let Some(content) = args.content {
        site.content = content;
    }
    if let Some(static_dir) = args.static_dir {
        site.static_dir = static_dir;
    }
    if let Some(output) = args.output {
        site.output = output;
    }
    if let Some(template) = args.template {
        site.template = template;
    }
}

fn read_document(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read '{}'", path.display()))
}

// =============================================================================
// Build Command
// =============================================================================

fn cmd_build(config: &Config, converter: &Converter) -> Result<()> {
    let site = &config.site;
    log::info!(
        "Building {} into {} (base path {})",
        site.content.display(),
        site.output.display(),
        site.base_path
    );

    let summary = site::build(site, converter).context("site build failed")?;

    println!("Pages generated: {}", summary.pages);
    println!("Files copied:    {}", summary.assets);
    Ok(())
}

// =============================================================================
// Render Command
// =============================================================================

fn cmd_render(converter: &Converter, file: &Path, json: bool) -> Result<()> {
    let input = read_document(file)?;
    let root = converter
        .to_element(&input)
        .with_context(|| format!("failed to convert '{}'", file.display()))?;

    if json {
        let tree = JsonElement::from(&root);
        println!("{}", serde_json::to_string_pretty(&tree)?);
    } else {
        println!("{}", root);
    }
    Ok(())
}

// =============================================================================
// Title Command
// =============================================================================

fn cmd_title(converter: &Converter, file: &Path) -> Result<()> {
    let input = read_document(file)?;
    let title = converter
        .title(&input)
        .with_context(|| format!("no title in '{}'", file.display()))?;
    println!("{}", title);
    Ok(())
}

// =============================================================================
// Blocks Command
// =============================================================================

fn cmd_blocks(converter: &Converter, file: &Path) -> Result<()> {
    let input = read_document(file)?;
    let lines = block_summary(converter, &input);

    println!("Blocks: {}", lines.len());
    for (i, line) in lines.iter().enumerate() {
        println!("  [{}] {}", i + 1, line);
    }
    Ok(())
}

/// One description per rendered block, with spans as offsets into `input`.
fn block_summary(converter: &Converter, input: &str) -> Vec<String> {
    let content = if converter.options().strip_frontmatter {
        mdsite_core::strip_frontmatter(input)
    } else {
        input
    };
    // `content` is a suffix of `input`
    let offset = input.len() - content.len();

    split_blocks(content)
        .iter()
        .map(|block| describe_block(block, offset))
        .collect()
}

fn describe_block(block: &Block, offset: usize) -> String {
    let kind = match block.kind {
        mdsite_core::BlockKind::Heading(level) => format!("heading (level {})", level),
        other => other.name().to_string(),
    };
    format!(
        "{} {}..{}: {}",
        kind,
        block.span.start + offset,
        block.span.end + offset,
        preview(block.text, 60)
    )
}

fn preview(text: &str, max_chars: usize) -> String {
    let head: String = text.chars().take(max_chars).collect();
    let ellipsis = if text.chars().count() > max_chars { "..." } else { "" };
    format!("{}{}", head.replace('\n', "\\n"), ellipsis)
}

// =============================================================================
// JSON Output
// =============================================================================

#[derive(Debug, Serialize, PartialEq)]
#[serde(tag = "type")]
enum JsonElement<'a> {
    Leaf {
        tag: Option<&'a str>,
        value: &'a str,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        attrs: Vec<(&'a str, &'a str)>,
    },
    Parent {
        tag: &'a str,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        attrs: Vec<(&'a str, &'a str)>,
        children: Vec<JsonElement<'a>>,
    },
}

impl<'a> From<&'a Element> for JsonElement<'a> {
    fn from(element: &'a Element) -> Self {
        match element {
            Element::Leaf { tag, value, attrs } => JsonElement::Leaf {
                tag: tag.as_deref(),
                value,
                attrs: attrs.iter().collect(),
            },
            Element::Parent {
                tag,
                children,
                attrs,
            } => JsonElement::Parent {
                tag,
                attrs: attrs.iter().collect(),
                children: children.iter().map(JsonElement::from).collect(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cli_parses_build_overrides() {
        let cli = Cli::try_parse_from([
            "mdsite",
            "-v",
            "build",
            "--base-path",
            "/repo/",
            "--static",
            "assets",
        ])
        .unwrap();
        assert!(cli.verbose);

        let Command::Build(args) = cli.command else {
            panic!("expected build command");
        };
        let mut config = Config::default();
        apply_overrides(&mut config, args);
        assert_eq!(config.site.base_path, "/repo/");
        assert_eq!(config.site.static_dir, PathBuf::from("assets"));
        assert_eq!(config.site.content, PathBuf::from("content"));
    }

    #[test]
    fn test_json_element_tree() {
        let root = Converter::new().to_element("![a](/i.png) *x*").unwrap();
        let json = serde_json::to_value(JsonElement::from(&root)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "Parent",
                "tag": "div",
                "children": [{
                    "type": "Parent",
                    "tag": "p",
                    "children": [
                        {
                            "type": "Leaf",
                            "tag": "img",
                            "value": "",
                            "attrs": [["src", "/i.png"], ["alt", "a"]]
                        },
                        { "type": "Leaf", "tag": null, "value": " *x*" }
                    ]
                }]
            })
        );
    }

    #[test]
    fn test_describe_block() {
        let blocks = split_blocks("## Sub\n\n- a\n- b");
        assert_eq!(describe_block(&blocks[0], 0), "heading (level 2) 0..6: ## Sub");
        assert_eq!(describe_block(&blocks[1], 0), "unordered_list 8..15: - a\\n- b");
    }

    #[test]
    fn test_block_spans_are_file_offsets_after_frontmatter() {
        let input = "---\ntitle: T\n---\n# Body";
        assert_eq!(
            block_summary(&Converter::new(), input),
            vec!["heading (level 1) 17..23: # Body"]
        );
        assert_eq!(&input[17..23], "# Body");

        let kept = Converter::new().strip_frontmatter(false);
        assert_eq!(block_summary(&kept, input)[0], "paragraph 0..23: ---\\ntitle: T\\n---\\n# Body");
    }
}
