//! `quill toc` command implementation.

use std::path::PathBuf;

use clap::Args;
use quill_config::CliSettings;
use quill_headings::{TocItem, extract_table_of_contents, extract_table_of_contents_dom};
use quill_post::{SourceFormat, compile_markdown};

use super::ConfigArgs;
use crate::error::CliError;
use crate::output::write_json;

/// Arguments for the toc command.
#[derive(Args, Debug)]
pub(crate) struct TocArgs {
    /// Post source file.
    file: PathBuf,

    /// Source format (default: from the file extension).
    #[arg(short, long)]
    format: Option<SourceFormat>,

    /// Extract from a parsed document instead of scanning the HTML text.
    #[arg(long)]
    client: bool,

    /// Print compact JSON.
    #[arg(long)]
    compact: bool,

    #[command(flatten)]
    pub config: ConfigArgs,
}

impl TocArgs {
    /// Execute the toc command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or reading fails, or if `--client`
    /// is used in a build without DOM support.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        // Anchor labels are irrelevant here; skip the messages check.
        let overrides = CliSettings {
            anchors: Some(false),
            ..CliSettings::default()
        };
        let config = self.config.load(overrides)?;
        let options = config.slug_options();

        let source = std::fs::read_to_string(&self.file)?;
        let html = match self.format.unwrap_or_else(|| SourceFormat::from_path(&self.file)) {
            SourceFormat::Markdown => compile_markdown(&source, config.render.gfm),
            SourceFormat::Html => source,
        };

        let toc: Vec<TocItem> = if self.client {
            extract_table_of_contents_dom(&html, &options)?
        } else {
            extract_table_of_contents(&html, &options)
        };
        write_json(&toc, !self.compact)
    }
}
