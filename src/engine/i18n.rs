//! Pluralization / localization gateway.
//!
//! Message ids are the English source strings. A `Catalog` holds one TOML
//! file per locale, each declaring its plural rule and translated forms:
//!
//! ```toml
//! plural_rule = "one_other"
//!
//! [messages]
//! "Pass" = "Passo"
//! "{number} card" = ["{number} carta", "{number} cartas"]
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::engine::config::{read_toml, ConfigError};

pub trait Localizer: Send + Sync {
    fn gettext(&self, locale: &str, msgid: &str) -> String;

    /// `singular` doubles as the message id.
    fn ngettext(&self, locale: &str, singular: &str, plural: &str, n: u64) -> String;
}

/// How a count selects a grammatical form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PluralRule {
    /// Singular only for exactly one.
    #[default]
    OneOther,
    /// Singular for zero and one.
    ZeroOneOther,
    /// Languages without grammatical number.
    Single,
}

impl PluralRule {
    pub fn form_index(self, n: u64) -> usize {
        match self {
            PluralRule::OneOther => usize::from(n != 1),
            PluralRule::ZeroOneOther => usize::from(n > 1),
            PluralRule::Single => 0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Forms {
    One(String),
    Many(Vec<String>),
}

impl Forms {
    fn pick(&self, index: usize) -> Option<&str> {
        match self {
            Forms::One(s) => Some(s.as_str()),
            Forms::Many(forms) => forms
                .get(index)
                .or_else(|| forms.last())
                .map(String::as_str),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LocaleCatalog {
    #[serde(default)]
    pub plural_rule: PluralRule,
    #[serde(default)]
    pub messages: HashMap<String, Forms>,
}

impl LocaleCatalog {
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// In-memory set of locale catalogs. Untranslated text falls back to the
/// English source with the one/other rule.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    locales: HashMap<String, LocaleCatalog>,
}

fn normalize(locale: &str) -> String {
    locale.trim().replace('-', "_")
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, locale: &str, catalog: LocaleCatalog) {
        self.locales.insert(normalize(locale), catalog);
    }

    pub fn locales(&self) -> Vec<String> {
        let mut names: Vec<String> = self.locales.keys().cloned().collect();
        names.sort();
        names
    }

    /// Exact locale first, then its bare language (`pt_BR` -> `pt`).
    fn resolve(&self, locale: &str) -> Option<&LocaleCatalog> {
        let locale = normalize(locale);
        self.locales.get(&locale).or_else(|| {
            let language = locale.split('_').next()?;
            self.locales.get(language)
        })
    }
}

impl Localizer for Catalog {
    fn gettext(&self, locale: &str, msgid: &str) -> String {
        self.resolve(locale)
            .and_then(|c| c.messages.get(msgid))
            .and_then(|forms| forms.pick(0))
            .unwrap_or(msgid)
            .to_string()
    }

    fn ngettext(&self, locale: &str, singular: &str, plural: &str, n: u64) -> String {
        if let Some(catalog) = self.resolve(locale) {
            if let Some(form) = catalog
                .messages
                .get(singular)
                .and_then(|forms| forms.pick(catalog.plural_rule.form_index(n)))
            {
                return form.to_string();
            }
        }
        if PluralRule::OneOther.form_index(n) == 0 {
            singular.to_string()
        } else {
            plural.to_string()
        }
    }
}

/// Load every `<locale>.toml` in `dir`.
pub fn load_catalog_dir(dir: &Path) -> Result<Catalog, ConfigError> {
    let entries = std::fs::read_dir(dir).map_err(|e| ConfigError::Read {
        path: dir.display().to_string(),
        source: e,
    })?;

    let mut catalog = Catalog::new();
    for entry in entries.filter_map(|e| e.ok()) {
        let path = entry.path();
        if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
            let Some(locale) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let locale_catalog: LocaleCatalog = read_toml(&path)?;
            tracing::debug!(locale, messages = locale_catalog.messages.len(), "loaded locale catalog");
            catalog.insert(locale, locale_catalog);
        }
    }
    Ok(catalog)
}

/// A localizer bound to one locale for the duration of a request.
#[derive(Clone, Copy)]
pub struct Tr<'a> {
    localizer: &'a dyn Localizer,
    locale: &'a str,
}

impl<'a> Tr<'a> {
    pub fn new(localizer: &'a dyn Localizer, locale: &'a str) -> Self {
        Self { localizer, locale }
    }

    pub fn locale(&self) -> &str {
        self.locale
    }

    pub fn t(&self, msgid: &str) -> String {
        self.localizer.gettext(self.locale, msgid)
    }

    pub fn n(&self, singular: &str, plural: &str, n: u64) -> String {
        self.localizer.ngettext(self.locale, singular, plural, n)
    }
}

/// Substitute `{name}` placeholders in one pass over the template. Values are
/// emitted verbatim; unknown placeholders are kept.
pub fn fill(template: &str, args: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let value = after.find('}').and_then(|close| {
            let key = &after[..close];
            args.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, value)| (*value, close))
        });
        match value {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
