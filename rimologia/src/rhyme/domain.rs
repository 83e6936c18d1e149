//! Rhyme-domain extraction from verse lines.

use serde::Serialize;

use crate::phonology::g2p::g2p;
use crate::phonology::normalize::{nfc_lower, strip_line_punctuation};
use crate::phonology::orthography::{has_accent, is_vowel_phone, ACCENTED_VOWELS, UNACCENTED_VOWELS};
use crate::phonology::stress::{detect_stress_positions, StressClass};

/// The phonologically relevant tail of a line, the unit of rhyme comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RhymeDomain {
    /// The domain text: the final word, or two words after clitic absorption.
    pub text: String,
    /// Primary (synizesis-preferring) stress class of the domain.
    pub stress: StressClass,
    /// Constituent words.
    pub words: Vec<String>,
    /// ASCII phonetic transcription of the domain.
    pub phonetic: String,
    /// True when the domain spans a word boundary.
    pub is_potential_mosaic: bool,
}

/// Extract the rhyme domain of a verse line.
///
/// The domain is normally the last word. When the last word carries no
/// accent and the word before it does, the last word is read as a clitic
/// leaning on that word, and the domain extends across both ("όνομά της").
/// That extension is what makes mosaic rhymes detectable. Stress is then
/// re-derived from the whole phrase, whose rightmost accent anchors it.
pub fn extract_rhyme_domain(line: &str) -> RhymeDomain {
    let trimmed = strip_line_punctuation(line);
    let words: Vec<&str> = trimmed.split_whitespace().collect();

    if words.is_empty() {
        return RhymeDomain {
            text: String::new(),
            stress: StressClass::M,
            words: Vec::new(),
            phonetic: String::new(),
            is_potential_mosaic: false,
        };
    }

    let last_word = words[words.len() - 1];
    let mut stress = detect_stress_positions(last_word).primary().stress;
    let mut domain_words = vec![last_word.to_string()];
    let mut text = last_word.to_string();

    if !has_accent(&nfc_lower(last_word)) {
        let prev_word = if words.len() >= 2 { Some(words[words.len() - 2]) } else { None };
        match prev_word {
            Some(prev) if has_accent(&nfc_lower(prev)) => {
                // Clitic absorption.
                domain_words = vec![prev.to_string(), last_word.to_string()];
                text = format!("{} {}", prev, last_word);
                stress = detect_stress_positions(&text).primary().stress;
                log::debug!("clitic domain {:?} stressed {}", text, stress);
            }
            Some(_) => {
                // Two unaccented words in a row; keep the last-word reading.
            }
            None => {
                // A lone unaccented word, usually a function word.
                stress = StressClass::M;
            }
        }
    }

    let is_potential_mosaic = domain_words.len() > 1;
    let phonetic = g2p(&text);

    RhymeDomain {
        text,
        stress,
        words: domain_words,
        phonetic,
        is_potential_mosaic,
    }
}

/// The vowel phoneme of the syllable immediately before the rhyme part.
///
/// Two rhyming lines whose pre-rhyme vowels also agree get the secondary
/// IDV mark in corpus labels. Returns `None` when the stressed vowel is
/// text-initial or no vowel exists before it.
pub fn pre_rhyme_vowel(text: &str) -> Option<char> {
    let normalized = nfc_lower(text);
    let chars: Vec<char> = normalized.chars().collect();

    let anchor = chars
        .iter()
        .rposition(|c| ACCENTED_VOWELS.contains(*c))
        .or_else(|| chars.iter().rposition(|c| UNACCENTED_VOWELS.contains(*c)))?;
    if anchor == 0 {
        return None;
    }

    let prefix: String = chars[..anchor].iter().collect();
    let phonetic = g2p(&prefix);
    phonetic.chars().rev().find(|c| is_vowel_phone(*c))
}
