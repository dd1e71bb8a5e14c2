//! styledoc — generate a style-guide JSON document from annotated source files.
//!
//! - `styledoc src/components/*.jsx` prints the document to stdout
//! - `styledoc -n nav.json -o public/styleguide.json src/ styles/**/*.scss`
//!   merges into a navigation template and writes the result to a file

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use styledoc::{Config, Pipeline};

#[derive(Parser)]
#[command(
    name = "styledoc",
    version,
    about = "Generate style-guide documentation from @tag comment blocks"
)]
struct Cli {
    /// Input files, directories or glob patterns
    #[arg(required = true)]
    files: Vec<String>,

    /// Output file (stdout when omitted)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Navigation template (JSON) to merge the documentation into
    #[arg(short = 'n', long)]
    nav: Option<PathBuf>,

    /// Config file (default: ./styledoc.toml when present)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Library name recorded on @prop entries
    #[arg(long)]
    prop_library: Option<String>,

    /// Category for components without @category
    #[arg(long)]
    default_category: Option<String>,

    /// Keep entries without renderable content
    #[arg(long)]
    no_filter: bool,

    /// Category kept even when empty. Can be given multiple times;
    /// replaces the configured list.
    #[arg(long = "static-category")]
    static_categories: Vec<String>,

    /// Write compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let config = apply_overrides(load_config(cli.config.as_deref())?, &cli);
    let pipeline = Pipeline::from_config(&config);

    let nav = cli
        .nav
        .as_ref()
        .or(config.navigation.as_ref())
        .map(|path| {
            styledoc::load_navigation(path)
                .with_context(|| format!("failed to load navigation template {}", path.display()))
        })
        .transpose()?;

    let input_files = styledoc::expand_inputs(&cli.files)?;
    let sources = styledoc::read_sources(&input_files)?;
    tracing::info!(files = sources.len(), "extracting documentation");

    let document = pipeline.run(&sources, nav.as_ref());
    let json = styledoc::to_json(&document, config.pretty)?;

    match &cli.output {
        Some(path) => styledoc::write_output(path, &json)
            .with_context(|| format!("failed to write output {}", path.display()))?,
        None => print!("{json}"),
    }
    Ok(())
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_line_number(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

/// Explicit `--config` must exist; otherwise look for `styledoc.toml` in the
/// working directory and fall back to defaults.
fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from_path(path)?
            .with_context(|| format!("config file not found: {}", path.display())),
        None => {
            let cwd = std::env::current_dir().context("failed to read working directory")?;
            Ok(Config::discover(&cwd)?.unwrap_or_default())
        }
    }
}

/// Command-line flags win over the config file.
fn apply_overrides(mut config: Config, cli: &Cli) -> Config {
    if let Some(library) = &cli.prop_library {
        config.prop_library = library.clone();
    }
    if let Some(category) = &cli.default_category {
        config.default_category = category.clone();
    }
    if cli.no_filter {
        config.filter = false;
    }
    if !cli.static_categories.is_empty() {
        config.static_categories = cli.static_categories.clone();
    }
    if cli.compact {
        config.pretty = false;
    }
    config
}
