//! Splitting a rhyme domain into rhyme part and onset.

use crate::phonology::g2p::to_ascii;
use crate::phonology::normalize::nfc_lower;
use crate::phonology::orthography::{ACCENTED_VOWELS, UNACCENTED_VOWELS};
use crate::phonology::units::tokenize_units;

/// Split `text` into `(rhyme_part, onset)`.
///
/// The rhyme part runs from the stressed vowel's phonetic unit to the end
/// of the text, spaces included; callers strip them when comparing. The
/// onset is the run of consonant phonemes directly before that vowel,
/// stopping at the previous vowel unit.
///
/// The anchor is the rightmost accent mark, so enclitic phrases with two
/// accents anchor on the second. Unaccented text falls back to its last
/// vowel letter. Returns `None` when no anchor exists at all; callers must
/// treat that as undecidable rather than an error.
pub fn rhyme_part_and_onset(text: &str) -> Option<(String, String)> {
    let normalized = nfc_lower(text);
    let chars: Vec<char> = normalized.chars().collect();

    let anchor = chars
        .iter()
        .rposition(|c| ACCENTED_VOWELS.contains(*c))
        .or_else(|| chars.iter().rposition(|c| UNACCENTED_VOWELS.contains(*c)))?;

    let units = tokenize_units(&normalized);
    let target = units.iter().position(|u| u.start <= anchor && anchor < u.end)?;

    let mut rhyme_part = String::new();
    for unit in &units[target..] {
        rhyme_part.push_str(&to_ascii(&unit.phone));
    }

    let mut onset = String::new();
    for unit in units[..target].iter().rev() {
        if unit.is_vocalic() {
            break;
        }
        onset.insert_str(0, &to_ascii(&unit.phone));
    }

    Some((rhyme_part, onset))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(text: &str) -> (String, String) {
        rhyme_part_and_onset(text).unwrap()
    }

    #[test]
    fn part_runs_from_stressed_vowel() {
        assert_eq!(split("ουρανός"), ("os".to_string(), "n".to_string()));
        assert_eq!(split("καρδιά"), ("a".to_string(), String::new()));
        assert_eq!(split("ξαφνίζει"), ("izi".to_string(), "fn".to_string()));
    }

    #[test]
    fn onset_stops_at_previous_vowel() {
        // the vowel before the stressed one cuts the onset to nothing
        assert_eq!(split("θεός"), ("os".to_string(), String::new()));
        assert_eq!(split("χάνεται"), ("anete".to_string(), "X".to_string()));
    }

    #[test]
    fn onset_collects_whole_cluster() {
        assert_eq!(split("αστρί"), ("i".to_string(), "str".to_string()));
    }

    #[test]
    fn vc_unit_blocks_the_onset_walk() {
        // αυ is a vowel unit for anchoring purposes, so the onset is only γ
        assert_eq!(split("αυγή"), ("i".to_string(), "G".to_string()));
        assert_eq!(split("ναυγή"), ("i".to_string(), "G".to_string()));
    }

    #[test]
    fn enclitic_phrase_keeps_the_space_in_the_part() {
        assert_eq!(split("όνομά της"), ("a tis".to_string(), "m".to_string()));
        assert_eq!(split("ο μπάτης"), ("atis".to_string(), " mp".to_string()));
    }

    #[test]
    fn unaccented_text_anchors_on_last_vowel() {
        assert_eq!(split("φως"), ("os".to_string(), "f".to_string()));
        assert_eq!(split("μου"), ("u".to_string(), "m".to_string()));
    }

    #[test]
    fn no_vowel_at_all_is_undecidable() {
        assert_eq!(rhyme_part_and_onset(""), None);
        assert_eq!(rhyme_part_and_onset("στν"), None);
    }
}
