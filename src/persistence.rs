// File: src/persistence.rs
use crate::core::symbol_table::SymbolTable;
use crate::core::types::{LocaleTable, MorseError};
use log::debug;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// On-disk form of the locale tables. Digits and punctuation are fixed and
/// never stored.
#[derive(Clone, serde::Serialize, serde::Deserialize)]
struct TableSnapshot {
    locales: Vec<LocaleTable>,
}

pub fn save_tables(table: &SymbolTable, path: &Path) -> Result<(), MorseError> {
    let parent_dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent_dir)?;

    let snapshot = TableSnapshot { locales: table.locale_tables() };

    let mut temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(&mut temp_file);
        bincode::serialize_into(&mut writer, &snapshot)?;
        writer.flush()?;
    }

    temp_file.persist(path).map_err(|e| e.error)?;
    debug!("saved {} locale tables to {}", snapshot.locales.len(), path.display());
    Ok(())
}

pub fn load_tables(path: &Path) -> Result<SymbolTable, MorseError> {
    let reader = BufReader::new(File::open(path)?);
    let snapshot: TableSnapshot = bincode::deserialize_from(reader)?;

    let mut table = SymbolTable::new();
    for locale in snapshot.locales {
        table.insert_locale(locale)?;
    }
    Ok(table)
}

/// Reads one locale table from JSON:
/// `{"locale": "eo", "entries": [["ĉ", "-.-.."], ...]}`.
pub fn load_locale_json(path: &Path) -> Result<LocaleTable, MorseError> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Loads extra locale tables from either format, picked by extension.
pub fn load_table_source(path: &Path) -> Result<Vec<LocaleTable>, MorseError> {
    let is_json = path
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        Ok(vec![load_locale_json(path)?])
    } else {
        Ok(load_tables(path)?.locale_tables())
    }
}
