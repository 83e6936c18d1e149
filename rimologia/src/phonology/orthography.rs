//! Greek orthography tables: grapheme-to-phoneme mappings and the character
//! classes used by syllabification, stress detection and rhyme extraction.
//!
//! "Diphthongs" are treated either as vowel digraphs (monophthongs) or as
//! vowel+consonant sequences whose realization depends on the following sound.

use lazy_static::lazy_static;
use std::collections::{HashMap, HashSet};

/// Accented vowel letters that mark primary word stress.
pub const PRIMARY_ACCENTS: &str = "άέήίόύώ";

/// Accented vowel letters including the dialytika+tonos forms.
pub const ACCENTED_VOWELS: &str = "άέήίόύώΐΰ";

/// Unaccented vowel letters, the fallback anchor when no accent is present.
pub const UNACCENTED_VOWELS: &str = "αεηιουω";

lazy_static! {
    /// Vowel digraphs that collapse to a single vowel sound.
    /// The ει/οι/υι cluster is iotacism: all of them surface as [i].
    pub static ref VOWEL_DIGRAPHS: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        for digraph in ["ει", "εί", "οι", "οί", "υι", "υί"] {
            m.insert(digraph, "i");
        }
        m.insert("αι", "e");
        m.insert("αί", "e");
        m.insert("ου", "u");
        m.insert("ού", "u");
        m
    };

    /// Vowel+consonant sequences with context-dependent voicing,
    /// stored as (voiced, voiceless) realizations.
    pub static ref VOWEL_CONSONANT_SEQUENCES: HashMap<&'static str, (&'static str, &'static str)> = {
        let mut m = HashMap::new();
        m.insert("αυ", ("av", "af"));
        m.insert("αύ", ("av", "af"));
        m.insert("ευ", ("ev", "ef"));
        m.insert("εύ", ("ev", "ef"));
        m.insert("ηυ", ("iv", "if"));
        m.insert("ηύ", ("iv", "if"));
        m
    };

    /// Two-letter consonant clusters read as a single sound. Only the
    /// full transcriber applies these; rhyme-part extraction keeps the
    /// letters separate.
    pub static ref CONSONANT_DIGRAPHS: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("μπ", "b");
        m.insert("ντ", "d");
        m.insert("γκ", "g");
        m.insert("γγ", "ŋg");
        m.insert("τσ", "ts");
        m.insert("τζ", "dz");
        m
    };

    /// Single vowel letters, accented and unaccented.
    pub static ref VOWELS: HashMap<char, &'static str> = {
        let mut m = HashMap::new();
        for c in "ηιυήίύϊϋΐΰ".chars() {
            m.insert(c, "i");
        }
        for c in "εέ".chars() {
            m.insert(c, "e");
        }
        for c in "οωόώ".chars() {
            m.insert(c, "o");
        }
        m.insert('α', "a");
        m.insert('ά', "a");
        m
    };

    /// Single consonant letters.
    pub static ref CONSONANTS: HashMap<char, &'static str> = {
        let mappings = [
            ('β', "v"),
            ('γ', "ɣ"),
            ('δ', "ð"),
            ('ζ', "z"),
            ('θ', "θ"),
            ('κ', "k"),
            ('λ', "l"),
            ('μ', "m"),
            ('ν', "n"),
            ('ξ', "ks"),
            ('π', "p"),
            ('ρ', "r"),
            ('σ', "s"),
            ('ς', "s"),
            ('τ', "t"),
            ('φ', "f"),
            ('χ', "x"),
            ('ψ', "ps"),
        ];
        mappings.iter().cloned().collect()
    };

    /// Consonant letters that trigger the voiceless reading of αυ/ευ/ηυ.
    pub static ref VOICELESS_CONSONANTS: HashSet<char> = "θκξπσςτφχψ".chars().collect();

    /// IPA-only symbols and their ASCII stand-ins. The ASCII notation is what
    /// every comparison downstream operates on.
    pub static ref ASCII_SUBSTITUTES: HashMap<char, char> = {
        let mut m = HashMap::new();
        m.insert('θ', 'T');
        m.insert('ð', 'D');
        m.insert('ɣ', 'G');
        m.insert('x', 'X');
        m.insert('ŋ', 'N');
        m.insert('ʝ', 'J');
        m
    };
}

/// True for the five vowel symbols of the phonetic notation.
pub fn is_vowel_phone(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// True when the text carries any accented vowel.
pub fn has_accent(text: &str) -> bool {
    text.chars().any(|c| ACCENTED_VOWELS.contains(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iotacism_digraphs_all_map_to_i() {
        for digraph in ["ει", "εί", "οι", "οί", "υι", "υί"] {
            assert_eq!(VOWEL_DIGRAPHS[digraph], "i");
        }
    }

    #[test]
    fn sigma_variants_share_a_sound() {
        assert_eq!(CONSONANTS[&'σ'], CONSONANTS[&'ς']);
    }

    #[test]
    fn accent_detection() {
        assert!(has_accent("καρδιά"));
        assert!(has_accent("καΐκι"));
        assert!(!has_accent("μου"));
    }
}
