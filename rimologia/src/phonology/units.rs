//! Shared unit tokenizer for syllable counting and rhyme-part extraction.

use super::orthography::{
    ACCENTED_VOWELS, CONSONANTS, VOICELESS_CONSONANTS, VOWELS, VOWEL_CONSONANT_SEQUENCES,
    VOWEL_DIGRAPHS,
};

/// How a tokenized span behaves for syllabification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    /// A syllable nucleus: single vowel letter or vowel digraph.
    Vowel,
    /// A vowel+consonant sequence such as αυ. One nucleus, closed.
    VowelConsonant,
    /// Everything else, including spaces and unknown characters.
    Consonant,
}

/// A tokenized span of normalized text with its phonetic value.
#[derive(Debug, Clone)]
pub struct Unit {
    /// Character offset of the span start in the normalized text.
    pub start: usize,
    /// Character offset one past the span end.
    pub end: usize,
    /// The orthographic span itself.
    pub text: String,
    /// Phonetic value, before ASCII substitution.
    pub phone: String,
    pub kind: UnitKind,
}

impl Unit {
    /// True when the unit supplies a syllable nucleus.
    pub fn is_vocalic(&self) -> bool {
        self.kind != UnitKind::Consonant
    }

    /// True when the span carries an accent mark.
    pub fn is_accented(&self) -> bool {
        self.text.chars().any(|c| ACCENTED_VOWELS.contains(c))
    }
}

/// Tokenize normalized (lowercased, NFC) text into vowel and consonant units.
///
/// Greedy two-character lookup first: vowel digraphs, then vowel+consonant
/// sequences whose voicing depends on the character after them. Consonant
/// clusters such as μπ are not fused here; rhyme comparison treats their
/// letters independently. Unknown characters become consonant units that
/// carry themselves as their phone.
pub fn tokenize_units(text: &str) -> Vec<Unit> {
    let chars: Vec<char> = text.chars().collect();
    let mut units = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        if i + 2 <= chars.len() {
            let pair: String = chars[i..i + 2].iter().collect();

            if let Some(&sound) = VOWEL_DIGRAPHS.get(pair.as_str()) {
                units.push(Unit {
                    start: i,
                    end: i + 2,
                    text: pair,
                    phone: sound.to_string(),
                    kind: UnitKind::Vowel,
                });
                i += 2;
                continue;
            }

            if let Some(&(voiced, voiceless)) = VOWEL_CONSONANT_SEQUENCES.get(pair.as_str()) {
                // Devoiced before a voiceless consonant or at end of text.
                let devoiced = match chars.get(i + 2) {
                    Some(next) => VOICELESS_CONSONANTS.contains(next),
                    None => true,
                };
                units.push(Unit {
                    start: i,
                    end: i + 2,
                    text: pair,
                    phone: if devoiced { voiceless } else { voiced }.to_string(),
                    kind: UnitKind::VowelConsonant,
                });
                i += 2;
                continue;
            }
        }

        let c = chars[i];
        if let Some(&sound) = VOWELS.get(&c) {
            units.push(Unit {
                start: i,
                end: i + 1,
                text: c.to_string(),
                phone: sound.to_string(),
                kind: UnitKind::Vowel,
            });
        } else {
            let phone = match CONSONANTS.get(&c) {
                Some(&sound) => sound.to_string(),
                None => c.to_string(),
            };
            units.push(Unit {
                start: i,
                end: i + 1,
                text: c.to_string(),
                phone,
                kind: UnitKind::Consonant,
            });
        }
        i += 1;
    }

    units
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phones(text: &str) -> Vec<String> {
        tokenize_units(text).iter().map(|u| u.phone.clone()).collect()
    }

    #[test]
    fn digraph_wins_over_single_vowels() {
        let units = tokenize_units("παιδιά");
        let spans: Vec<&str> = units.iter().map(|u| u.text.as_str()).collect();
        assert_eq!(spans, vec!["π", "αι", "δ", "ι", "ά"]);
    }

    #[test]
    fn vc_sequence_voicing_depends_on_next_char() {
        // γ after αυ keeps it voiced, τ devoices it, so does the text end
        assert_eq!(phones("αυγή"), vec!["av", "ɣ", "i"]);
        assert_eq!(phones("αυτός"), vec!["af", "t", "o", "s"]);
        assert_eq!(phones("γκαυ"), vec!["ɣ", "k", "af"]);
    }

    #[test]
    fn consonant_clusters_stay_separate_letters() {
        let units = tokenize_units("μπάτης");
        assert_eq!(units[0].phone, "m");
        assert_eq!(units[1].phone, "p");
    }

    #[test]
    fn spans_cover_the_text() {
        let units = tokenize_units("καρδιά");
        assert_eq!(units.first().unwrap().start, 0);
        assert_eq!(units.last().unwrap().end, 6);
    }

    #[test]
    fn accent_marks_are_seen_inside_digraphs() {
        let units = tokenize_units("ναί");
        assert!(units[1].is_accented());
        assert!(!units[0].is_accented());
    }
}
