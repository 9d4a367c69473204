//! Quill CLI - blog post renderer.
//!
//! Provides commands for:
//! - `render`: Render a post to HTML, table of contents and UI tree (JSON)
//! - `toc`: Extract a post's table of contents (JSON)
//! - `slug`: Slugify text the way heading anchors do

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{RenderArgs, SlugArgs, TocArgs};
use error::CliError;
use output::Output;

/// Quill - blog post renderer.
#[derive(Parser, Debug)]
#[command(name = "quill", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a post to JSON `{ html, toc, tree }`.
    Render(RenderArgs),
    /// Print a post's table of contents as JSON.
    Toc(TocArgs),
    /// Print the slug for a piece of text.
    Slug(SlugArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Render(args) => args.config.verbose,
            Self::Toc(args) => args.config.verbose,
            Self::Slug(_) => false,
        }
    }

    fn execute(self) -> Result<(), CliError> {
        match self {
            Self::Render(args) => {
                let rt = tokio::runtime::Runtime::new()?;
                rt.block_on(args.execute())
            }
            Self::Toc(args) => args.execute(),
            Self::Slug(args) => args.execute(),
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.verbose() {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = cli.command.execute() {
        output.error(&format!("Error: {err}"));
        output.info("Run with --verbose or RUST_LOG=debug for details.");
        std::process::exit(1);
    }
}
