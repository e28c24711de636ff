mod archive;
mod export;
mod importer;
mod renderer;
mod utils;

use clap::Parser;
use eyre::{Context, Result, eyre};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use utils::{EntryOrder, ExportConfig, ExportError, TitleSource};

const DEFAULT_STYLESHEET: &str = "https://unpkg.com/sakura.css/css/sakura-dark.css";

/// Export a Journey journal backup to a single static HTML page.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the ZIP backup, or to a directory already containing
    /// the per-entry .json files.
    #[arg(value_name = "SOURCE")]
    source: PathBuf,

    /// Output HTML file.
    /// Defaults to index.html inside the (extracted) entry directory.
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Path to a specific configuration file.
    /// Defaults to $XDG_CONFIG_HOME/journey-export/config.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Stylesheet URL or file name referenced from the page head.
    #[arg(long, value_name = "URL")]
    stylesheet: Option<String>,

    /// What each entry heading is built from.
    #[arg(long, value_enum, value_name = "SOURCE")]
    title_source: Option<TitleSource>,

    /// Insert entry text as escaped plain text instead of rendered Markdown.
    #[arg(long)]
    plain_text: bool,

    /// How entries are ordered in the page.
    #[arg(long, value_enum, value_name = "ORDER")]
    order: Option<EntryOrder>,

    /// Print a line for every entry loaded.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress the final summary.
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Deserialize, Default)]
struct FileConfig {
    stylesheet: Option<String>,
    title_source: Option<TitleSource>,
    render_markdown: Option<bool>,
    order: Option<EntryOrder>,
}

fn load_file_config(explicit_path: Option<&Path>) -> Result<FileConfig> {
    let path = if let Some(p) = explicit_path {
        if !p.exists() {
            return Err(eyre!("Config file not found: {}", p.display()));
        }
        Some(p.to_path_buf())
    } else {
        // Search: XDG/OS config dir, then nothing
        dirs::config_dir()
            .map(|d| d.join("journey-export/config.toml"))
            .filter(|p| p.exists())
    };

    match path {
        None => Ok(FileConfig::default()),
        Some(p) => {
            let content = fs::read_to_string(&p)
                .wrap_err_with(|| format!("Failed to read config: {}", p.display()))?;
            toml::from_str(&content)
                .wrap_err_with(|| format!("Failed to parse config: {}", p.display()))
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // 1. Load config file (CLI path > default path)
    let file_cfg = load_file_config(cli.config.as_deref())?;

    // 2. Resolve each option (CLI > Config > Default)
    let config = ExportConfig {
        source: cli.source,
        output: cli.output,
        stylesheet: cli
            .stylesheet
            .or(file_cfg.stylesheet)
            .unwrap_or_else(|| DEFAULT_STYLESHEET.to_string()),
        title_source: cli
            .title_source
            .or(file_cfg.title_source)
            .unwrap_or_default(),
        render_markdown: if cli.plain_text {
            false
        } else {
            file_cfg.render_markdown.unwrap_or(true)
        },
        order: cli.order.or(file_cfg.order).unwrap_or_default(),
        verbose: cli.verbose,
        quiet: cli.quiet,
    };

    // 3. Run the pipeline
    export::execute(config)
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        let code = err
            .downcast_ref::<ExportError>()
            .map_or(20, ExportError::exit_code);
        std::process::exit(code);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_config_parses_every_key() {
        let cfg: FileConfig = toml::from_str(
            r#"
                stylesheet = "journey.css"
                title_source = "text-prefix"
                render_markdown = false
                order = "name"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.stylesheet.as_deref(), Some("journey.css"));
        assert_eq!(cfg.title_source, Some(TitleSource::TextPrefix));
        assert_eq!(cfg.render_markdown, Some(false));
        assert_eq!(cfg.order, Some(EntryOrder::Name));
    }

    #[test]
    fn empty_file_config_leaves_everything_unset() {
        let cfg: FileConfig = toml::from_str("").unwrap();
        assert!(cfg.stylesheet.is_none());
        assert!(cfg.title_source.is_none());
        assert!(cfg.render_markdown.is_none());
        assert!(cfg.order.is_none());
    }
}
