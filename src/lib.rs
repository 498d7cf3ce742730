// src/lib.rs

pub mod core;
pub mod config;
pub mod player;
pub mod persistence;
pub mod c_api;
pub use crate::config::EngineConfig;
pub use crate::core::codec::Codec;
pub use crate::core::engine::{Conversion, MorseEngine};
pub use crate::core::filter::{FilterMode, FilterOutcome, InputFilter};
pub use crate::core::symbol_table::SymbolTable;
pub use crate::core::types::{ActuatorFault, LocaleTable, MorseError, UNSUPPORTED_LOCALE};
pub use crate::player::{Actuator, PlaybackEvent, SignalPlayer, Timing};
