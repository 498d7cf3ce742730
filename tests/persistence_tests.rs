//! Table snapshot and JSON import tests

use morse_core::core::types::{LocaleTable, MorseError};
use morse_core::persistence::{load_locale_json, load_table_source, load_tables, save_tables};
use morse_core::SymbolTable;
use std::fs;

#[test]
fn test_snapshot_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tables.bin");
    let original = SymbolTable::with_builtin_locales();

    save_tables(&original, &path).unwrap();
    let restored = load_tables(&path).unwrap();

    assert_eq!(restored.supported_locales(), original.supported_locales());
    assert_eq!(restored.locale_tables(), original.locale_tables());
    assert_eq!(restored.lookup_character(".", "ru"), Some('е'));
    assert_eq!(restored.collisions("ru"), original.collisions("ru"));
}

#[test]
fn test_snapshot_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deeper").join("tables.bin");

    save_tables(&SymbolTable::with_builtin_locales(), &path).unwrap();
    assert!(path.exists());
}

#[test]
fn test_snapshot_overwrites_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tables.bin");

    save_tables(&SymbolTable::with_builtin_locales(), &path).unwrap();
    let mut smaller = SymbolTable::new();
    smaller.insert_locale(LocaleTable::from_pairs("en", &[('e', ".")])).unwrap();
    save_tables(&smaller, &path).unwrap();

    let restored = load_tables(&path).unwrap();
    assert_eq!(restored.supported_locales(), vec!["en"]);
}

#[test]
fn test_load_missing_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_tables(&dir.path().join("missing.bin"));
    assert!(matches!(result, Err(MorseError::Io(_))));
}

#[test]
fn test_load_corrupt_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tables.bin");
    fs::write(&path, [0xffu8; 7]).unwrap();
    assert!(load_tables(&path).is_err());
}

#[test]
fn test_load_locale_json_keeps_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("eo.json");
    fs::write(
        &path,
        r#"{"locale": "eo", "entries": [["ĉ", "-.-.."], ["ĝ", "--.-."], ["x", "-.-.."]]}"#,
    )
    .unwrap();

    let locale = load_locale_json(&path).unwrap();
    assert_eq!(locale.locale, "eo");
    assert_eq!(locale.entries.len(), 3);
    assert_eq!(locale.entries[0], ('ĉ', "-.-..".to_string()));

    let mut table = SymbolTable::new();
    table.insert_locale(locale).unwrap();
    assert_eq!(table.lookup_character("-.-..", "eo"), Some('ĉ'));
    assert_eq!(table.collisions("eo"), &[('x', "-.-..".to_string())]);
}

#[test]
fn test_load_locale_json_rejects_bad_shape() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, r#"{"locale": "eo", "entries": [["ab", ".-"]]}"#).unwrap();
    assert!(matches!(load_locale_json(&path), Err(MorseError::Json(_))));
}

#[test]
fn test_table_source_by_extension() {
    let dir = tempfile::tempdir().unwrap();

    let json = dir.path().join("tables.JSON");
    fs::write(&json, r#"{"locale": "tlh", "entries": [["q", "--.-"]]}"#).unwrap();
    let from_json = load_table_source(&json).unwrap();
    assert_eq!(from_json, vec![LocaleTable::from_pairs("tlh", &[('q', "--.-")])]);

    let bin = dir.path().join("tables.bin");
    save_tables(&SymbolTable::with_builtin_locales(), &bin).unwrap();
    let from_bin = load_table_source(&bin).unwrap();
    assert_eq!(from_bin.len(), 5);
}
