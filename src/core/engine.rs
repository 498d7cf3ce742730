// src/core/engine.rs
use crate::config::EngineConfig;
use crate::core::codec::Codec;
use crate::core::filter::{FilterMode, InputFilter};
use crate::core::symbol_table::SymbolTable;
use crate::core::types::{LocaleTable, MorseError};
use crate::persistence::load_table_source;
use crate::player::{Actuator, CancelHandle, Pacer, PlaybackObserver, PlayerState, SignalPlayer, Timing};
use log::{info, warn};
use std::path::Path;
use std::sync::Arc;

/// Result of one full-buffer conversion.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Conversion {
    /// The input after filtering.
    pub input: String,
    pub output: String,
    pub rejected: Vec<char>,
}

// The engine wires the table, codec, filter and player together for one
// active locale. Tables are shared behind an Arc and only ever swapped whole.
pub struct MorseEngine {
    table: Arc<SymbolTable>,
    locale: String,
    timing: Timing,
    player: SignalPlayer,
}

impl MorseEngine {
    pub fn new(config: &EngineConfig, actuator: impl Actuator + 'static) -> Self {
        Self::with_player(config, SignalPlayer::new(actuator))
    }

    pub fn with_pacer(
        config: &EngineConfig,
        actuator: impl Actuator + 'static,
        pacer: impl Pacer + 'static,
    ) -> Self {
        Self::with_player(config, SignalPlayer::with_pacer(actuator, pacer))
    }

    fn with_player(config: &EngineConfig, player: SignalPlayer) -> Self {
        let mut table = SymbolTable::with_builtin_locales();
        if let Some(path) = &config.tables_path {
            // A broken table file must not keep the engine from starting.
            match load_table_source(Path::new(path)) {
                Ok(tables) => {
                    for locale in tables {
                        if let Err(e) = table.insert_locale(locale) {
                            warn!("skipping table from {}: {}", path.display(), e);
                        }
                    }
                }
                Err(e) => warn!("could not load tables from {}: {}", path.display(), e),
            }
        }

        let engine = Self {
            table: Arc::new(table),
            locale: config.locale.clone(),
            timing: config.timing(),
            player,
        };
        if !engine.is_locale_supported() {
            warn!("locale '{}' has no signal table", engine.locale);
        }
        engine
    }

    /// Shared handle to the current tables.
    pub fn table(&self) -> Arc<SymbolTable> {
        Arc::clone(&self.table)
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn is_locale_supported(&self) -> bool {
        self.table.has_locale(&self.locale)
    }

    pub fn supported_locales(&self) -> Vec<String> {
        self.table.supported_locales().into_iter().map(String::from).collect()
    }

    /// Switches the active locale. Playback is stopped first.
    pub fn set_locale(&mut self, locale: &str) {
        if self.locale == locale {
            return;
        }
        self.player.cancel();
        if !self.table.has_locale(locale) {
            warn!("locale '{}' has no signal table", locale);
        }
        info!("locale changed: {} -> {}", self.locale, locale);
        self.locale = locale.to_string();
    }

    /// Installs or replaces a locale table. Readers holding the previous
    /// [`SymbolTable`] keep seeing it unchanged.
    pub fn register_locale(&mut self, locale: LocaleTable) -> Result<(), MorseError> {
        let mut next = (*self.table).clone();
        next.insert_locale(locale)?;
        self.table = Arc::new(next);
        Ok(())
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    pub fn set_timing(&mut self, timing: Timing) {
        self.timing = timing;
    }

    /// Filters raw text and encodes what is left.
    pub fn text_to_morse(&self, raw: &str) -> Conversion {
        let filtered = InputFilter::new(&self.table).filter(raw, &self.locale, FilterMode::PlainText);
        let output = Codec::new(&self.table).encode(&filtered.accepted, &self.locale);
        Conversion { input: filtered.accepted, output, rejected: filtered.rejected }
    }

    /// Filters raw Morse input and decodes what is left.
    pub fn morse_to_text(&self, raw: &str) -> Conversion {
        let filtered = InputFilter::new(&self.table).filter(raw, &self.locale, FilterMode::Morse);
        let output = Codec::new(&self.table).decode(&filtered.accepted, &self.locale);
        Conversion { input: filtered.accepted, output, rejected: filtered.rejected }
    }

    pub fn play<O>(&self, signal: &str, observer: O) -> Result<(), MorseError>
    where
        O: PlaybackObserver + 'static,
    {
        self.player.play(signal, self.timing, observer)
    }

    pub fn stop(&self) {
        self.player.cancel();
    }

    pub fn wait(&self) {
        self.player.wait();
    }

    pub fn player_state(&self) -> PlayerState {
        self.player.state()
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.player.cancel_handle()
    }
}
