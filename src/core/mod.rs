// src/core/mod.rs
pub mod codec;
pub mod engine;
pub mod filter;
pub mod symbol_table;
pub mod tables;
pub mod types;
