//! `quill slug` command implementation.

use clap::Args;
use quill_slug::{SlugOptions, create_slug, create_slug_id};

use crate::error::CliError;
use crate::output::write_line;

/// Arguments for the slug command.
#[derive(Args, Debug)]
pub(crate) struct SlugArgs {
    /// Text (or heading HTML) to slugify.
    text: String,

    /// Keep only ASCII letters and digits.
    #[arg(long)]
    strict: bool,

    /// Locale for transliteration (e.g. `de`: `ä` → `ae`).
    #[arg(short, long, env = "QUILL_LOCALE")]
    locale: Option<String>,

    /// Print the heading ID for this level instead, with fallback for empty slugs.
    #[arg(long, value_parser = clap::value_parser!(u8).range(2..=4))]
    level: Option<u8>,
}

impl SlugArgs {
    /// Execute the slug command.
    ///
    /// # Errors
    ///
    /// Returns an error if stdout cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let mut options = SlugOptions::default().with_strict(self.strict);
        if let Some(locale) = self.locale {
            options = options.with_locale(locale);
        }

        let slug = match self.level {
            Some(level) => create_slug_id(&self.text, level, &options),
            None => create_slug(&self.text, &options),
        };
        write_line(&slug)
    }
}
