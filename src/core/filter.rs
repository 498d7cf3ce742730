// src/core/filter.rs
use crate::core::symbol_table::SymbolTable;
use crate::core::types::{DASH, DOT, SEPARATOR};
use log::debug;

/// Characters accepted when the input is itself Morse code.
pub const MORSE_ALPHABET: [char; 3] = [DOT, DASH, SEPARATOR];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterMode {
    /// Natural-language text about to be encoded.
    PlainText,
    /// Morse input about to be decoded.
    Morse,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    pub accepted: String,
    /// Every dropped character, in input order.
    pub rejected: Vec<char>,
}

impl FilterOutcome {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Strips characters the active locale cannot represent.
pub struct InputFilter<'a> {
    table: &'a SymbolTable,
}

impl<'a> InputFilter<'a> {
    pub fn new(table: &'a SymbolTable) -> Self {
        Self { table }
    }

    pub fn filter(&self, text: &str, locale: &str, mode: FilterMode) -> FilterOutcome {
        let mut outcome = FilterOutcome {
            accepted: String::with_capacity(text.len()),
            rejected: Vec::new(),
        };

        for c in text.chars() {
            let allowed = match mode {
                FilterMode::PlainText => self.table.is_allowed(c, locale),
                FilterMode::Morse => MORSE_ALPHABET.contains(&c),
            };
            if allowed {
                outcome.accepted.push(c);
            } else {
                debug!("rejected {:?} under locale '{}' ({:?})", c, locale, mode);
                outcome.rejected.push(c);
            }
        }
        outcome
    }
}
