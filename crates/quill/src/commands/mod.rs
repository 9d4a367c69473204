//! CLI command implementations.

pub(crate) mod render;
pub(crate) mod slug;
pub(crate) mod toc;

use std::path::PathBuf;

use clap::Args;
use quill_config::{CliSettings, Config, ConfigError};

pub(crate) use render::RenderArgs;
pub(crate) use slug::SlugArgs;
pub(crate) use toc::TocArgs;

/// Options shared by commands that read `quill.toml`.
#[derive(Args, Debug)]
pub(crate) struct ConfigArgs {
    /// Path to configuration file (default: auto-discover quill.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Locale for slugs and anchor labels (overrides config).
    #[arg(short, long, env = "QUILL_LOCALE")]
    locale: Option<String>,

    /// Directory of `{locale}.json` message files (overrides config).
    #[arg(long)]
    messages_dir: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl ConfigArgs {
    /// Load configuration with these arguments and extra overrides applied.
    pub(crate) fn load(&self, overrides: CliSettings) -> Result<Config, ConfigError> {
        let settings = CliSettings {
            locale: self.locale.clone(),
            messages_dir: self.messages_dir.clone(),
            ..overrides
        };
        let config = Config::load(self.config.as_deref(), Some(&settings))?;
        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Loaded configuration");
        }
        Ok(config)
    }
}
