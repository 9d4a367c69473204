//! Translation catalogs for anchor labels.
//!
//! Messages are nested JSON objects addressed by dotted keys
//! (`accessibility.anchorLink.title`). Values may contain `{name}`
//! placeholders filled from the arguments passed to [`Translate::translate`].

use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};

/// Locale used when none is configured.
pub const DEFAULT_LOCALE: &str = "en";

/// Error looking up or loading translations.
#[derive(Debug, thiserror::Error)]
pub enum I18nError {
    /// The catalog has no string at this key.
    #[error("Missing translation for `{key}` in locale `{locale}`")]
    MissingKey { key: String, locale: String },
    /// No messages exist for the locale or its base language.
    #[error("No messages for locale `{0}`")]
    UnknownLocale(String),
    /// Reading a messages file failed.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A messages file is not valid JSON.
    #[error("Invalid messages JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Resolves message keys to localized strings.
pub trait Translate {
    /// Look up `key` and interpolate `args` into its `{name}` placeholders.
    ///
    /// # Errors
    ///
    /// Returns [`I18nError::MissingKey`] if no string exists at `key`.
    fn translate(&self, key: &str, args: &[(&str, &str)]) -> Result<String, I18nError>;
}

/// Messages for one locale.
#[derive(Clone, Debug)]
pub struct Catalog {
    locale: String,
    namespace: Option<String>,
    messages: Value,
}

impl Catalog {
    /// Create a catalog from parsed messages.
    #[must_use]
    pub fn new(locale: impl Into<String>, messages: Value) -> Self {
        Self {
            locale: locale.into(),
            namespace: None,
            messages,
        }
    }

    /// Parse a catalog from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`I18nError::Json`] if `json` is not valid JSON.
    pub fn from_json(locale: impl Into<String>, json: &str) -> Result<Self, I18nError> {
        Ok(Self::new(locale, serde_json::from_str(json)?))
    }

    /// Scope lookups under `namespace`.
    ///
    /// Keys missing from the namespace fall back to the catalog root, so
    /// shared messages need not be duplicated per namespace.
    #[must_use]
    pub fn with_namespace(mut self, namespace: Option<&str>) -> Self {
        self.namespace = namespace.filter(|ns| !ns.is_empty()).map(str::to_owned);
        self
    }

    /// Locale of this catalog.
    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    fn lookup(&self, key: &str) -> Option<&str> {
        if let Some(namespace) = &self.namespace {
            let scoped = lookup_path(&self.messages, namespace)
                .and_then(|scope| lookup_path(scope, key))
                .and_then(Value::as_str);
            if scoped.is_some() {
                return scoped;
            }
        }
        lookup_path(&self.messages, key).and_then(Value::as_str)
    }
}

impl Translate for Catalog {
    fn translate(&self, key: &str, args: &[(&str, &str)]) -> Result<String, I18nError> {
        let template = self.lookup(key).ok_or_else(|| I18nError::MissingKey {
            key: key.to_owned(),
            locale: self.locale.clone(),
        })?;
        Ok(interpolate(template, args))
    }
}

fn lookup_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |node, segment| node.get(segment))
}

/// Replace `{name}` placeholders. Unknown placeholders are kept verbatim.
fn interpolate(template: &str, args: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            rest = &rest[open..];
            break;
        };
        let name = &after[..close];
        match args.iter().find(|(arg, _)| *arg == name) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[open..=open + 1 + close]),
        }
        rest = &after[close + 1..];
    }

    out.push_str(rest);
    out
}

/// Loads the catalog for a locale.
pub trait TranslationLoader {
    /// Load messages for `locale`, scoped to `namespace`.
    ///
    /// A region-qualified locale (`de-AT`) falls back to its language (`de`).
    fn load(
        &self,
        locale: &str,
        namespace: Option<&str>,
    ) -> impl Future<Output = Result<Catalog, I18nError>> + Send;
}

/// Candidate locale names, most specific first.
fn locale_candidates(locale: &str) -> Vec<&str> {
    let mut candidates = vec![locale];
    if let Some((language, _)) = locale.split_once(['-', '_']) {
        candidates.push(language);
    }
    candidates
}

/// In-memory catalogs.
#[derive(Clone, Debug, Default)]
pub struct StaticLoader {
    catalogs: HashMap<String, Value>,
}

impl StaticLoader {
    /// Create a loader without any messages.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loader with the built-in English messages.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new().with_messages(DEFAULT_LOCALE, builtin_messages())
    }

    /// Add or replace the messages for `locale`.
    #[must_use]
    pub fn with_messages(mut self, locale: impl Into<String>, messages: Value) -> Self {
        self.catalogs.insert(locale.into(), messages);
        self
    }

    /// Whether messages exist for `locale` or its base language.
    #[must_use]
    pub fn has_locale(&self, locale: &str) -> bool {
        locale_candidates(locale)
            .into_iter()
            .any(|candidate| self.catalogs.contains_key(candidate))
    }

    fn resolve(&self, locale: &str, namespace: Option<&str>) -> Result<Catalog, I18nError> {
        locale_candidates(locale)
            .into_iter()
            .find_map(|candidate| {
                self.catalogs
                    .get(candidate)
                    .map(|messages| Catalog::new(candidate, messages.clone()))
            })
            .map(|catalog| catalog.with_namespace(namespace))
            .ok_or_else(|| I18nError::UnknownLocale(locale.to_owned()))
    }
}

impl TranslationLoader for StaticLoader {
    async fn load(&self, locale: &str, namespace: Option<&str>) -> Result<Catalog, I18nError> {
        self.resolve(locale, namespace)
    }
}

/// Catalogs read from `{dir}/{locale}.json`.
#[derive(Clone, Debug)]
pub struct FsLoader {
    dir: PathBuf,
}

impl FsLoader {
    /// Create a loader reading from `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Messages directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl TranslationLoader for FsLoader {
    async fn load(&self, locale: &str, namespace: Option<&str>) -> Result<Catalog, I18nError> {
        for candidate in locale_candidates(locale) {
            let path = self.dir.join(format!("{candidate}.json"));
            match tokio::fs::read_to_string(&path).await {
                Ok(json) => {
                    tracing::debug!(path = %path.display(), "Loaded messages");
                    return Ok(Catalog::from_json(candidate, &json)?.with_namespace(namespace));
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(source) => return Err(I18nError::Io { path, source }),
            }
        }
        Err(I18nError::UnknownLocale(locale.to_owned()))
    }
}

/// English messages shipped with the crate.
#[must_use]
pub fn builtin_messages() -> Value {
    json!({
        "accessibility": {
            "anchorLink": {
                "ariaLabel": "Link to section: {heading}",
                "title": "Copy link to \u{201c}{heading}\u{201d}"
            }
        }
    })
}
