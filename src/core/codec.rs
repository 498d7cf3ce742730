// src/core/codec.rs
use crate::core::symbol_table::SymbolTable;
use crate::core::types::{MorseError, SEPARATOR, UNSUPPORTED_LOCALE};

/// Text ↔ Morse conversion over a borrowed [`SymbolTable`].
///
/// Both directions are best effort: a character or token without a mapping
/// is skipped, only a missing locale table fails the whole call.
pub struct Codec<'a> {
    table: &'a SymbolTable,
}

impl<'a> Codec<'a> {
    pub fn new(table: &'a SymbolTable) -> Self {
        Self { table }
    }

    /// Encodes `text`, joining tokens with a single space.
    pub fn try_encode(&self, text: &str, locale: &str) -> Result<String, MorseError> {
        if !self.table.has_locale(locale) {
            return Err(MorseError::UnsupportedLocale(locale.to_string()));
        }

        let mut morse = String::with_capacity(text.len() * 4);
        for c in text.to_lowercase().chars() {
            if let Some(token) = self.table.lookup_signal(c, locale) {
                if !morse.is_empty() {
                    morse.push(SEPARATOR);
                }
                morse.push_str(token);
            }
        }
        Ok(morse)
    }

    /// Decodes a space-separated signal string.
    pub fn try_decode(&self, signal: &str, locale: &str) -> Result<String, MorseError> {
        if !self.table.has_locale(locale) {
            return Err(MorseError::UnsupportedLocale(locale.to_string()));
        }

        Ok(signal
            .split(SEPARATOR)
            .filter(|token| !token.is_empty())
            .filter_map(|token| self.table.lookup_character(token, locale))
            .collect())
    }

    /// Like [`Codec::try_encode`], with [`UNSUPPORTED_LOCALE`] standing in
    /// for a missing table.
    pub fn encode(&self, text: &str, locale: &str) -> String {
        self.try_encode(text, locale)
            .unwrap_or_else(|_| UNSUPPORTED_LOCALE.to_string())
    }

    pub fn decode(&self, signal: &str, locale: &str) -> String {
        self.try_decode(signal, locale)
            .unwrap_or_else(|_| UNSUPPORTED_LOCALE.to_string())
    }
}
