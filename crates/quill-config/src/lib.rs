//! Configuration management for Quill.
//!
//! Parses `quill.toml` with serde and discovers it in the current directory
//! or its parents. [`CliSettings`] are applied on top of the loaded file.
//!
//! ## Environment Variable Expansion
//!
//! `${VAR}` and `${VAR:-default}` are expanded in:
//! - `slug.locale`
//! - `slug.namespace`
//! - `i18n.default_locale`
//! - `i18n.messages_dir`

mod expand;

use std::path::{Path, PathBuf};

use quill_headings::{DEFAULT_LOCALE, StaticLoader};
use quill_slug::SlugOptions;
use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "quill.toml";

/// CLI settings that override configuration file values.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the slug and translation locale.
    pub locale: Option<String>,
    /// Override the translation messages directory.
    pub messages_dir: Option<PathBuf>,
    /// Override anchor injection.
    pub anchors: Option<bool>,
    /// Override strict slugs.
    pub strict: Option<bool>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Slug options shared by anchors and the table of contents.
    pub slug: SlugOptions,
    #[serde(default)]
    i18n: I18nConfigRaw,
    /// Rendering switches.
    pub render: RenderConfig,

    /// Resolved translation configuration (set after loading).
    #[serde(skip)]
    pub i18n_resolved: I18nConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct I18nConfigRaw {
    default_locale: Option<String>,
    messages_dir: Option<String>,
}

/// Resolved translation configuration.
#[derive(Debug)]
pub struct I18nConfig {
    /// Locale used when `slug.locale` is not set.
    pub default_locale: String,
    /// Directory of `{locale}.json` message files.
    pub messages_dir: Option<PathBuf>,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_locale: DEFAULT_LOCALE.to_owned(),
            messages_dir: None,
        }
    }
}

/// Rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Inject heading anchors.
    pub anchors: bool,
    /// Sanitize HTML before building the UI tree.
    pub sanitize: bool,
    /// GFM extensions for markdown.
    pub gfm: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            anchors: true,
            sanitize: true,
            gfm: true,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`slug.locale`").
        field: String,
        /// Error message (e.g., "${`BLOG_LOCALE`} not set").
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// for `quill.toml` in the current directory and its parents, falling back
    /// to defaults. CLI settings take precedence over file values; the result
    /// is validated last.
    ///
    /// # Errors
    ///
    /// Returns error if an explicit `config_path` doesn't exist, parsing or
    /// expansion fails, or the final configuration is invalid.
    pub fn load(config_path: Option<&Path>, cli_settings: Option<&CliSettings>) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Locale for slugs and anchor labels.
    #[must_use]
    pub fn locale(&self) -> &str {
        self.slug
            .locale
            .as_deref()
            .unwrap_or(self.i18n_resolved.default_locale.as_str())
    }

    /// Slug options with the effective locale filled in.
    #[must_use]
    pub fn slug_options(&self) -> SlugOptions {
        SlugOptions {
            locale: Some(self.locale().to_owned()),
            ..self.slug.clone()
        }
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the locale is empty, or if anchors
    /// are enabled for a locale without built-in messages and no messages
    /// directory is configured.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.i18n_resolved.default_locale, "i18n.default_locale")?;
        if let Some(locale) = &self.slug.locale {
            require_non_empty(locale, "slug.locale")?;
        }

        let locale = self.locale();
        if self.render.anchors
            && self.i18n_resolved.messages_dir.is_none()
            && !StaticLoader::builtin().has_locale(locale)
        {
            return Err(ConfigError::Validation(format!(
                "i18n.messages_dir is required for locale `{locale}` when render.anchors is enabled"
            )));
        }
        Ok(())
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(locale) = &settings.locale {
            self.slug.locale = Some(locale.clone());
        }
        if let Some(messages_dir) = &settings.messages_dir {
            self.i18n_resolved.messages_dir = Some(messages_dir.clone());
        }
        if let Some(anchors) = settings.anchors {
            self.render.anchors = anchors;
        }
        if let Some(strict) = settings.strict {
            self.slug.strict = strict;
        }
    }

    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        expand::expand_optional(&mut self.slug.locale, "slug.locale")?;
        expand::expand_optional(&mut self.slug.namespace, "slug.namespace")?;
        expand::expand_optional(&mut self.i18n.default_locale, "i18n.default_locale")?;
        expand::expand_optional(&mut self.i18n.messages_dir, "i18n.messages_dir")?;
        Ok(())
    }

    /// Resolve the messages directory relative to the config directory.
    fn resolve(&mut self, config_dir: &Path) {
        self.i18n_resolved = I18nConfig {
            default_locale: self
                .i18n
                .default_locale
                .clone()
                .unwrap_or_else(|| DEFAULT_LOCALE.to_owned()),
            messages_dir: self.i18n.messages_dir.as_deref().map(|dir| config_dir.join(dir)),
        };
    }
}
