// src/core/types.rs
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A locale identifier such as `"en"` or `"ru_RU"`.
pub type LocaleId = String;

/// A Morse signal token: a non-empty run of `.` and `-` for one character.
pub type SignalToken = String;

pub const DOT: char = '.';
pub const DASH: char = '-';
pub const SEPARATOR: char = ' ';

/// Returned by the codec in place of a conversion when no table exists for
/// the requested locale.
pub const UNSUPPORTED_LOCALE: &str = "unsupportedLocale";

/// The failure raised by an actuator that could not change state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("actuator fault: {message}")]
pub struct ActuatorFault {
    pub message: String,
}

impl ActuatorFault {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

#[derive(Debug, Error)]
pub enum MorseError {
    #[error("no signal table for locale '{0}'")]
    UnsupportedLocale(LocaleId),

    #[error("character '{0}' has no signal mapping")]
    UnmappableCharacter(char),

    #[error("signal token '{0}' has no character mapping")]
    UnresolvableToken(SignalToken),

    #[error("invalid signal token '{token}' for character '{character}'")]
    InvalidSignalToken { character: char, token: SignalToken },

    #[error(transparent)]
    ActuatorFault(#[from] ActuatorFault),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot encoding error: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One locale's character table in insertion order.
/// Order decides which character wins when two share a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleTable {
    pub locale: LocaleId,
    pub entries: Vec<(char, SignalToken)>,
}

impl LocaleTable {
    pub fn new(locale: impl Into<LocaleId>) -> Self {
        Self { locale: locale.into(), entries: Vec::new() }
    }

    pub fn from_pairs(locale: impl Into<LocaleId>, pairs: &[(char, &str)]) -> Self {
        Self {
            locale: locale.into(),
            entries: pairs.iter().map(|&(c, s)| (c, s.to_string())).collect(),
        }
    }

    pub fn push(&mut self, character: char, token: impl Into<SignalToken>) {
        self.entries.push((character, token.into()));
    }
}

/// True if `token` is a non-empty run of dots and dashes.
pub fn is_valid_token(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c == DOT || c == DASH)
}
