// src/core/symbol_table.rs
use crate::core::tables::{builtin_locales, DIGITS, PUNCTUATION};
use crate::core::types::{is_valid_token, LocaleId, LocaleTable, MorseError, SignalToken};
use log::{debug, warn};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Canonical (lowercased) form of a key character. Characters whose
/// lowercase expands to several code points are kept as-is.
pub(crate) fn canonical(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

/// One mapping layer: forward and inverse maps plus the pairs the inverse
/// map had to drop.
#[derive(Debug, Clone)]
struct Layer {
    entries: Vec<(char, SignalToken)>,
    forward: HashMap<char, SignalToken>,
    inverse: HashMap<SignalToken, char>,
    collisions: Vec<(char, SignalToken)>,
}

impl Layer {
    fn build<I>(name: &str, pairs: I) -> Self
    where
        I: IntoIterator<Item = (char, SignalToken)>,
    {
        let mut layer = Layer {
            entries: Vec::new(),
            forward: HashMap::new(),
            inverse: HashMap::new(),
            collisions: Vec::new(),
        };

        for (c, token) in pairs {
            let key = canonical(c);
            if layer.forward.contains_key(&key) {
                warn!("table '{}': duplicate character '{}' ignored", name, key);
                continue;
            }
            layer.forward.insert(key, token.clone());

            // Earliest association keeps the token; later ones are discarded.
            if let Some(&existing) = layer.inverse.get(&token) {
                warn!(
                    "table '{}': token '{}' already maps to '{}', '{}' not decodable",
                    name, token, existing, key
                );
                layer.collisions.push((key, token.clone()));
            } else {
                layer.inverse.insert(token.clone(), key);
            }
            layer.entries.push((key, token));
        }
        layer
    }

    fn from_static(name: &str, pairs: &[(char, &str)]) -> Self {
        Self::build(name, pairs.iter().map(|&(c, s)| (c, s.to_string())))
    }
}

/// Locale-indexed Morse tables with the shared digit and punctuation tables.
///
/// Lookups in both directions consult digits, then punctuation, then the
/// locale's own table. Tables are immutable once inserted; replacing a
/// locale swaps in a fully built layer.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    digits: Layer,
    punctuation: Layer,
    locales: BTreeMap<LocaleId, Layer>,
}

impl SymbolTable {
    /// A table with only the shared digit and punctuation layers.
    pub fn new() -> Self {
        Self {
            digits: Layer::from_static("digits", DIGITS),
            punctuation: Layer::from_static("punctuation", PUNCTUATION),
            locales: BTreeMap::new(),
        }
    }

    pub fn with_builtin_locales() -> Self {
        let mut table = Self::new();
        for locale in builtin_locales() {
            let layer = Layer::build(&locale.locale, locale.entries);
            table.locales.insert(locale.locale, layer);
        }
        table
    }

    /// Validates and installs a locale table, replacing any existing one.
    pub fn insert_locale(&mut self, table: LocaleTable) -> Result<(), MorseError> {
        if let Some((c, token)) = table.entries.iter().find(|(_, t)| !is_valid_token(t)) {
            return Err(MorseError::InvalidSignalToken { character: *c, token: token.clone() });
        }
        let layer = Layer::build(&table.locale, table.entries);
        debug!("installed locale '{}' with {} characters", table.locale, layer.entries.len());
        self.locales.insert(table.locale, layer);
        Ok(())
    }

    /// Maps a requested identifier onto an installed locale: exact match,
    /// then normalized (`en-US` → `en_us`), then the language prefix.
    pub fn resolve_locale<'a>(&'a self, locale: &str) -> Option<&'a str> {
        if let Some((key, _)) = self.locales.get_key_value(locale) {
            return Some(key.as_str());
        }
        let normalized = locale.replace('-', "_").to_lowercase();
        let language = normalized.split('_').next().unwrap_or_default();
        self.locales
            .keys()
            .find(|k| k.to_lowercase() == normalized)
            .or_else(|| self.locales.keys().find(|k| k.to_lowercase() == language))
            .map(String::as_str)
    }

    pub fn has_locale(&self, locale: &str) -> bool {
        self.resolve_locale(locale).is_some()
    }

    /// Installed locale identifiers, sorted.
    pub fn supported_locales(&self) -> Vec<&str> {
        self.locales.keys().map(String::as_str).collect()
    }

    fn layer(&self, locale: &str) -> Option<&Layer> {
        self.resolve_locale(locale).and_then(|key| self.locales.get(key))
    }

    fn layers<'a>(&'a self, locale: &str) -> impl Iterator<Item = &'a Layer> {
        [Some(&self.digits), Some(&self.punctuation), self.layer(locale)]
            .into_iter()
            .flatten()
    }

    /// Case-insensitive character → token lookup.
    pub fn lookup_signal(&self, character: char, locale: &str) -> Option<&str> {
        let key = canonical(character);
        self.layers(locale)
            .find_map(|layer| layer.forward.get(&key))
            .map(String::as_str)
    }

    /// Token → character lookup through the inverse maps.
    pub fn lookup_character(&self, token: &str, locale: &str) -> Option<char> {
        self.layers(locale).find_map(|layer| layer.inverse.get(token).copied())
    }

    pub fn is_allowed(&self, character: char, locale: &str) -> bool {
        self.lookup_signal(character, locale).is_some()
    }

    /// Every character encodable under `locale`.
    pub fn allowed_characters(&self, locale: &str) -> HashSet<char> {
        self.layers(locale)
            .flat_map(|layer| layer.forward.keys().copied())
            .collect()
    }

    /// Pairs of `locale`'s own table that cannot be decoded back because an
    /// earlier character holds the same token.
    pub fn collisions(&self, locale: &str) -> &[(char, SignalToken)] {
        self.layer(locale).map(|l| l.collisions.as_slice()).unwrap_or(&[])
    }

    /// Ordered export of one locale table.
    pub fn locale_table(&self, locale: &str) -> Option<LocaleTable> {
        let key = self.resolve_locale(locale)?;
        let layer = self.locales.get(key)?;
        Some(LocaleTable { locale: key.to_string(), entries: layer.entries.clone() })
    }

    pub fn locale_tables(&self) -> Vec<LocaleTable> {
        self.locales
            .iter()
            .map(|(id, layer)| LocaleTable { locale: id.clone(), entries: layer.entries.clone() })
            .collect()
    }
}
