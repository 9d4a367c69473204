//! `quill render` command implementation.

use std::path::PathBuf;

use clap::Args;
use quill_config::{CliSettings, Config};
use quill_headings::{FsLoader, StaticLoader, TranslationLoader};
use quill_post::{PostOptions, PostRenderer, SourceFormat};

use super::ConfigArgs;
use crate::error::CliError;
use crate::output::write_json;

/// Arguments for the render command.
#[derive(Args, Debug)]
pub(crate) struct RenderArgs {
    /// Post source file.
    file: PathBuf,

    /// Source format (default: from the file extension).
    #[arg(short, long)]
    format: Option<SourceFormat>,

    /// Do not inject heading anchors.
    #[arg(long)]
    no_anchors: bool,

    /// Do not sanitize the HTML.
    #[arg(long)]
    no_sanitize: bool,

    /// Print compact JSON.
    #[arg(long)]
    compact: bool,

    #[command(flatten)]
    pub config: ConfigArgs,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// Prints `{ html, toc, tree }` as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, reading or rendering fails.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let overrides = CliSettings {
            anchors: self.no_anchors.then_some(false),
            ..CliSettings::default()
        };
        let config = self.config.load(overrides)?;

        let options = PostOptions {
            slug: config.slug_options(),
            anchors: config.render.anchors,
            sanitize: config.render.sanitize && !self.no_sanitize,
            gfm: config.render.gfm,
        };

        match &config.i18n_resolved.messages_dir {
            Some(dir) => self.render(FsLoader::new(dir), options, &config).await,
            None => self.render(StaticLoader::builtin(), options, &config).await,
        }
    }

    async fn render<L: TranslationLoader>(
        &self,
        loader: L,
        options: PostOptions,
        config: &Config,
    ) -> Result<(), CliError> {
        tracing::info!(file = %self.file.display(), locale = config.locale(), "Rendering post");
        let post = PostRenderer::new(loader)
            .with_options(options)
            .render_file(&self.file, self.format)
            .await?;
        write_json(&post, !self.compact)
    }
}
