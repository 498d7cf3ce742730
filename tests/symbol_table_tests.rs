//! SymbolTable lookup and collision tests

use morse_core::core::types::{LocaleTable, MorseError};
use morse_core::SymbolTable;

#[test]
fn test_supported_locales_are_sorted() {
    let table = SymbolTable::with_builtin_locales();
    assert_eq!(table.supported_locales(), vec!["de", "en", "es", "fr", "ru"]);
}

#[test]
fn test_empty_table_has_no_locales() {
    let table = SymbolTable::new();
    assert!(table.supported_locales().is_empty());
    assert!(!table.has_locale("en"));
    // Shared tables still answer.
    assert_eq!(table.lookup_signal('7', "en"), Some("--..."));
    assert_eq!(table.lookup_character("..--..", "en"), Some('?'));
}

#[test]
fn test_lookup_signal_is_case_insensitive() {
    let table = SymbolTable::with_builtin_locales();
    assert_eq!(table.lookup_signal('a', "en"), Some(".-"));
    assert_eq!(table.lookup_signal('A', "en"), Some(".-"));
    assert_eq!(table.lookup_signal('Ж', "ru"), Some("...-"));
    assert_eq!(table.lookup_signal('Ä', "de"), Some(".-.-"));
}

#[test]
fn test_lookup_signal_not_found() {
    let table = SymbolTable::with_builtin_locales();
    assert_eq!(table.lookup_signal('ж', "en"), None);
    assert_eq!(table.lookup_signal('#', "en"), None);
    assert_eq!(table.lookup_signal(' ', "en"), None);
}

#[test]
fn test_digits_and_punctuation_are_universal() {
    let table = SymbolTable::with_builtin_locales();
    for locale in ["en", "de", "es", "fr", "ru"] {
        assert_eq!(table.lookup_signal('0', locale), Some("-----"));
        assert_eq!(table.lookup_signal('9', locale), Some("----."));
        assert_eq!(table.lookup_signal(',', locale), Some("--..--"));
        assert_eq!(table.lookup_character(".----", locale), Some('1'));
    }
}

#[test]
fn test_earliest_character_wins_on_decode() {
    let table = SymbolTable::with_builtin_locales();
    // ё shares "." with е, which was inserted first.
    assert_eq!(table.lookup_signal('ё', "ru"), Some("."));
    assert_eq!(table.lookup_character(".", "ru"), Some('е'));
    assert_eq!(table.collisions("ru"), &[('ё', ".".to_string())]);
}

#[test]
fn test_punctuation_beats_locale_on_decode() {
    let table = SymbolTable::with_builtin_locales();
    assert_eq!(table.lookup_signal('ъ', "ru"), Some(".--.-."));
    assert_eq!(table.lookup_character(".--.-.", "ru"), Some('@'));
}

#[test]
fn test_builtin_locales_round_trip_except_known_collisions() {
    let table = SymbolTable::with_builtin_locales();
    let exceptions = [("ru", 'ё', 'е'), ("ru", 'ъ', '@')];

    for locale in table.supported_locales() {
        let locale_table = table.locale_table(locale).unwrap();
        for (c, token) in &locale_table.entries {
            let expected = exceptions
                .iter()
                .find(|(l, from, _)| *l == locale && from == c)
                .map_or(*c, |(_, _, to)| *to);
            assert_eq!(table.lookup_signal(*c, locale), Some(token.as_str()));
            assert_eq!(
                table.lookup_character(token, locale),
                Some(expected),
                "locale {} char {}",
                locale,
                c
            );
        }
    }
}

#[test]
fn test_only_russian_has_in_table_collisions() {
    let table = SymbolTable::with_builtin_locales();
    for locale in ["en", "de", "es", "fr"] {
        assert!(table.collisions(locale).is_empty(), "{}", locale);
    }
}

#[test]
fn test_resolve_locale_variants() {
    let table = SymbolTable::with_builtin_locales();
    assert_eq!(table.resolve_locale("en"), Some("en"));
    assert_eq!(table.resolve_locale("EN"), Some("en"));
    assert_eq!(table.resolve_locale("en_US"), Some("en"));
    assert_eq!(table.resolve_locale("ru-RU"), Some("ru"));
    assert_eq!(table.resolve_locale("ja_JP"), None);
    assert_eq!(table.resolve_locale(""), None);
}

#[test]
fn test_lookup_through_regional_locale() {
    let table = SymbolTable::with_builtin_locales();
    assert_eq!(table.lookup_signal('ñ', "es_MX"), Some("--.--"));
    assert_eq!(table.lookup_character("--.--", "es_MX"), Some('ñ'));
}

#[test]
fn test_allowed_characters() {
    let table = SymbolTable::with_builtin_locales();
    let en = table.allowed_characters("en");
    assert!(en.contains(&'a'));
    assert!(en.contains(&'0'));
    assert!(en.contains(&'@'));
    assert!(!en.contains(&'ж'));
    assert!(!en.contains(&' '));
    assert_eq!(en.len(), 26 + 10 + 18);

    // Unknown locale: shared tables only.
    assert_eq!(table.allowed_characters("xx").len(), 10 + 18);
}

#[test]
fn test_insert_locale_replaces_table() {
    let mut table = SymbolTable::with_builtin_locales();
    table
        .insert_locale(LocaleTable::from_pairs("en", &[('a', "-"), ('b', ".")]))
        .unwrap();
    assert_eq!(table.lookup_signal('a', "en"), Some("-"));
    assert_eq!(table.lookup_signal('c', "en"), None);
    assert_eq!(table.lookup_character(".", "en"), Some('b'));
}

#[test]
fn test_insert_locale_lowercases_keys() {
    let mut table = SymbolTable::new();
    table
        .insert_locale(LocaleTable::from_pairs("eo", &[('Ĉ', "-.-.."), ('ĝ', "--.-.")]))
        .unwrap();
    assert_eq!(table.lookup_signal('ĉ', "eo"), Some("-.-.."));
    assert_eq!(table.lookup_character("-.-..", "eo"), Some('ĉ'));
}

#[test]
fn test_insert_locale_rejects_invalid_tokens() {
    let mut table = SymbolTable::new();
    let result = table.insert_locale(LocaleTable::from_pairs("xx", &[('a', ".-"), ('b', ".x")]));
    match result {
        Err(MorseError::InvalidSignalToken { character, token }) => {
            assert_eq!(character, 'b');
            assert_eq!(token, ".x");
        }
        other => panic!("unexpected result: {:?}", other),
    }
    assert!(!table.has_locale("xx"));

    let empty = table.insert_locale(LocaleTable::from_pairs("xx", &[('a', "")]));
    assert!(empty.is_err());
}

#[test]
fn test_locale_table_export_keeps_order() {
    let table = SymbolTable::with_builtin_locales();
    let ru = table.locale_table("ru").unwrap();
    assert_eq!(ru.locale, "ru");
    assert_eq!(ru.entries[0], ('а', ".-".to_string()));
    assert_eq!(ru.entries[5], ('е', ".".to_string()));
    assert_eq!(ru.entries[6], ('ё', ".".to_string()));
    assert_eq!(ru.entries.len(), 33);
}
