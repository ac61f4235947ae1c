use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use callflow_core::{analyze, Config, Language};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Callflow - render function call relationships as a Mermaid flowchart
#[derive(Parser, Debug)]
#[command(name = "callflow")]
#[command(version)] // Auto-pull version from Cargo.toml
#[command(about = "Extract function calls from source code and draw them as a flowchart", long_about = None)]
struct Cli {
    /// Directory to scan recursively
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Source files, comma separated (used when --dir is not given)
    #[arg(long, value_delimiter = ',')]
    files: Vec<PathBuf>,

    /// Directory the diagram is saved to [default: ./files]
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Function names to leave out of the diagram, comma separated
    #[arg(long, value_delimiter = ',')]
    ignore: Vec<String>,

    /// Languages to analyze, comma separated [default: go]
    #[arg(long = "lang", value_delimiter = ',')]
    languages: Vec<Language>,

    /// TOML config file; command-line flags take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// Only write the diagram file, do not print it
    #[arg(long)]
    no_print: bool,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_toml_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => Config::default(),
        };

        // an explicit file list on the command line replaces a configured dir
        if self.dir.is_some() {
            config.dir = self.dir;
        } else if !self.files.is_empty() {
            config.dir = None;
        }
        if !self.files.is_empty() {
            config.files = self.files;
        }
        if let Some(out_dir) = self.out_dir {
            config.out_dir = out_dir;
        }
        if !self.ignore.is_empty() {
            config.ignore = self.ignore;
        }
        if !self.languages.is_empty() {
            config.languages = self.languages;
        }
        if self.no_print {
            config.print = false;
        }
        Ok(config)
    }
}

fn init_tracing(verbose: bool) {
    // stdout carries the diagram, so logs go to stderr
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

fn write_diagram(path: &Path, diagram: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, diagram).with_context(|| format!("failed to write {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.into_config()?;
    let report = analyze(&config).context("call graph extraction failed")?;
    let diagram = report.mermaid();

    if config.print {
        println!("{diagram}");
    }
    let output = config.output_path();
    write_diagram(&output, &diagram)?;
    info!(path = %output.display(), calls = report.calls.len(), "diagram written");

    Ok(())
}
