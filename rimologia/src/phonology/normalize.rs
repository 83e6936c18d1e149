//! Text normalization ahead of phonetic analysis.

use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Characters removed anywhere in the text before transcription. Greek accent
/// marks live on precomposed vowel codepoints, so none of these touch them.
const PUNCTUATION: &str = r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~«»…—–"##;

/// Characters trimmed from the end of a verse line before rhyme-domain
/// extraction.
const LINE_TRAILING_PUNCTUATION: &[char] = &[
    '.', ',', ';', '!', '?', ':', '–', '—', '“', '”', '«', '»', '\'', '"', '(', ')', '[', ']',
    '…', '-', '·', '•',
];

lazy_static! {
    static ref MULTI_SPACE: Regex = Regex::new(r" {2,}").unwrap();
}

/// Lowercase and NFC-normalize. Every analysis entry point starts here so
/// that accent marks sit on single precomposed codepoints.
pub fn nfc_lower(text: &str) -> String {
    text.to_lowercase().nfc().collect()
}

/// Prepare text for transcription: lowercase, NFC, strip punctuation, and
/// collapse the space runs the removal can leave behind.
pub fn clean_for_transcription(text: &str) -> String {
    let normalized = nfc_lower(text.trim());
    let kept: String = normalized
        .chars()
        .filter(|c| !PUNCTUATION.contains(*c))
        .collect();
    MULTI_SPACE.replace_all(&kept, " ").into_owned()
}

/// Trim a verse line and drop trailing punctuation marks.
pub fn strip_line_punctuation(line: &str) -> &str {
    line.trim().trim_end_matches(LINE_TRAILING_PUNCTUATION)
}

/// Remove combining diacritics, leaving decomposed base letters.
pub fn strip_diacritics(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).collect()
}
