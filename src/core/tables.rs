// src/core/tables.rs
//! Built-in signal tables. Every list is ordered; the order is the
//! tie-break when two characters share a token.

use crate::core::types::LocaleTable;

pub const DIGITS: &[(char, &str)] = &[
    ('0', "-----"), ('1', ".----"), ('2', "..---"), ('3', "...--"),
    ('4', "....-"), ('5', "....."), ('6', "-...."), ('7', "--..."),
    ('8', "---.."), ('9', "----."),
];

pub const PUNCTUATION: &[(char, &str)] = &[
    ('.', ".-.-.-"), (',', "--..--"), ('?', "..--.."), ('\'', ".----."),
    ('!', "-.-.--"), ('/', "-..-."), ('(', "-.--."), (')', "-.--.-"),
    ('&', ".-..."), (':', "---..."), (';', "-.-.-."), ('=', "-...-"),
    ('+', ".-.-."), ('-', "-....-"), ('_', "..--.-"), ('"', ".-..-."),
    ('$', "...-..-"), ('@', ".--.-."),
];

const LATIN: &[(char, &str)] = &[
    ('a', ".-"), ('b', "-..."), ('c', "-.-."), ('d', "-.."), ('e', "."),
    ('f', "..-."), ('g', "--."), ('h', "...."), ('i', ".."), ('j', ".---"),
    ('k', "-.-"), ('l', ".-.."), ('m', "--"), ('n', "-."), ('o', "---"),
    ('p', ".--."), ('q', "--.-"), ('r', ".-."), ('s', "..."), ('t', "-"),
    ('u', "..-"), ('v', "...-"), ('w', ".--"), ('x', "-..-"), ('y', "-.--"),
    ('z', "--.."),
];

const GERMAN_EXTRA: &[(char, &str)] = &[
    ('ä', ".-.-"), ('ö', "---."), ('ü', "..--"), ('ß', "...--.."),
];

const SPANISH_EXTRA: &[(char, &str)] = &[
    ('á', ".--.-"), ('é', "..-.."), ('ñ', "--.--"), ('ó', "---."), ('ü', "..--"),
];

const FRENCH_EXTRA: &[(char, &str)] = &[
    ('à', ".--.-"), ('ç', "-.-.."), ('è', ".-..-"), ('é', "..-.."),
];

// ё shares "." with е and ъ shares ".--.-." with '@'.
const CYRILLIC: &[(char, &str)] = &[
    ('а', ".-"), ('б', "-..."), ('в', ".--"), ('г', "--."), ('д', "-.."),
    ('е', "."), ('ё', "."), ('ж', "...-"), ('з', "--.."), ('и', ".."),
    ('й', ".---"), ('к', "-.-"), ('л', ".-.."), ('м', "--"), ('н', "-."),
    ('о', "---"), ('п', ".--."), ('р', ".-."), ('с', "..."), ('т', "-"),
    ('у', "..-"), ('ф', "..-."), ('х', "...."), ('ц', "-.-."), ('ч', "---."),
    ('ш', "----"), ('щ', "--.-"), ('ъ', ".--.-."), ('ы', "-.--"), ('ь', "-..-"),
    ('э', "..-.."), ('ю', "..--"), ('я', ".-.-"),
];

fn latin_with(locale: &str, extra: &[(char, &str)]) -> LocaleTable {
    let mut table = LocaleTable::from_pairs(locale, LATIN);
    for &(c, token) in extra {
        table.push(c, token);
    }
    table
}

/// The locale tables shipped with the engine.
pub fn builtin_locales() -> Vec<LocaleTable> {
    vec![
        LocaleTable::from_pairs("en", LATIN),
        latin_with("de", GERMAN_EXTRA),
        latin_with("es", SPANISH_EXTRA),
        latin_with("fr", FRENCH_EXTRA),
        LocaleTable::from_pairs("ru", CYRILLIC),
    ]
}
