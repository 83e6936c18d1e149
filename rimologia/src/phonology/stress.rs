//! Syllable counting and stress-position analysis.
//!
//! Greek orthography does not say whether an unstressed /i/ next to another
//! vowel is a glide (synizesis) or a syllable of its own (diaeresis), so a
//! word has a set of admissible syllable counts and, downstream of that, a
//! set of admissible stress classifications.

use std::fmt;
use std::ops::RangeInclusive;

use serde::Serialize;

use super::normalize::nfc_lower;
use super::orthography::PRIMARY_ACCENTS;
use super::units::{tokenize_units, UnitKind};

/// Stress position class: the number of syllables after the stressed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub enum StressClass {
    /// Oxytone, stress on the final syllable.
    #[default]
    M,
    /// Paroxytone, one syllable after the stress.
    F2,
    /// Proparoxytone, two or more syllables after the stress.
    F3,
}

impl StressClass {
    pub fn code(&self) -> &'static str {
        match self {
            StressClass::M => "M",
            StressClass::F2 => "F2",
            StressClass::F3 => "F3",
        }
    }
}

impl fmt::Display for StressClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The admissible syllable counts of a span of text, as a contiguous range.
///
/// `min` has every synizesis applied, `max` is full diaeresis. Both floor
/// at 1 so that even vowel-less input counts as one syllable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SyllableCounts {
    min: usize,
    max: usize,
}

impl SyllableCounts {
    /// Fewest possible syllables (synizesis-preferring reading).
    pub fn min(&self) -> usize {
        self.min
    }

    /// Most possible syllables (full diaeresis).
    pub fn max(&self) -> usize {
        self.max
    }

    pub fn contains(&self, count: usize) -> bool {
        self.min <= count && count <= self.max
    }

    pub fn iter(&self) -> RangeInclusive<usize> {
        self.min..=self.max
    }

    /// True when synizesis and diaeresis readings disagree.
    pub fn is_ambiguous(&self) -> bool {
        self.min != self.max
    }
}

/// One admissible stress reading: the 1-based syllable distance of the
/// stress from the end, and its class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StressPosition {
    pub distance: usize,
    pub stress: StressClass,
}

/// Ordered stress readings for a word, synizesis-preferring option first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StressAnalysis {
    options: Vec<StressPosition>,
}

impl StressAnalysis {
    /// The default reading. Always present; prefers synizesis, hence the
    /// fewest syllables after the stress.
    pub fn primary(&self) -> StressPosition {
        self.options[0]
    }

    /// All admissible readings, ascending by distance, deduplicated.
    pub fn options(&self) -> &[StressPosition] {
        &self.options
    }
}

/// Compute the possible syllable counts of `text`.
///
/// Counts vowel units as nuclei, then finds synizesis opportunities: an
/// unaccented /i/ nucleus standing directly before another vowel unit can
/// surface as a glide instead, dropping the count by one. The range spans
/// all opportunities applied to none applied. With several adjacent
/// ambiguous vowels this over-approximates; the corner is rare enough in
/// verse that the range is still the honest answer.
pub fn possible_syllable_counts(text: &str) -> SyllableCounts {
    let normalized = nfc_lower(text);
    let units = tokenize_units(&normalized);

    let mut base_nuclei = 0usize;
    let mut opportunities = 0usize;

    for (idx, unit) in units.iter().enumerate() {
        if !unit.is_vocalic() {
            continue;
        }
        base_nuclei += 1;

        let is_plain_i = unit.kind == UnitKind::Vowel && unit.phone == "i";
        let next_is_vowel = units.get(idx + 1).map(|u| u.is_vocalic()).unwrap_or(false);
        if is_plain_i && !unit.is_accented() && next_is_vowel {
            opportunities += 1;
        }
    }

    SyllableCounts {
        min: base_nuclei.saturating_sub(opportunities).max(1),
        max: base_nuclei.max(1),
    }
}

/// Syllable count with synizesis applied wherever possible.
pub fn count_syllables(text: &str) -> usize {
    possible_syllable_counts(text).min()
}

/// Detect the stress position of a word or short phrase.
///
/// The rightmost accent mark wins, which anchors enclitic phrases carrying
/// two accents ("όνομά της") on the second one. Words with no accent fall
/// back to a fixed heuristic: oxytone when monosyllabic, paroxytone
/// otherwise. Each admissible syllable count of the suffix from the accent
/// yields one reading: 0 syllables after the stress is M, 1 is F2, more
/// is F3.
pub fn detect_stress_positions(word: &str) -> StressAnalysis {
    let normalized = nfc_lower(word);
    let chars: Vec<char> = normalized.chars().collect();
    let accent_idx = chars.iter().rposition(|c| PRIMARY_ACCENTS.contains(*c));

    let mut options: Vec<StressPosition> = Vec::new();
    match accent_idx {
        None => {
            for count in possible_syllable_counts(&normalized).iter() {
                let pos = if count == 1 {
                    StressPosition { distance: 1, stress: StressClass::M }
                } else {
                    StressPosition { distance: 2, stress: StressClass::F2 }
                };
                if !options.contains(&pos) {
                    options.push(pos);
                }
            }
        }
        Some(idx) => {
            let suffix: String = chars[idx..].iter().collect();
            for count in possible_syllable_counts(&suffix).iter() {
                let pos = match count - 1 {
                    0 => StressPosition { distance: 1, stress: StressClass::M },
                    1 => StressPosition { distance: 2, stress: StressClass::F2 },
                    _ => StressPosition { distance: 3, stress: StressClass::F3 },
                };
                if !options.contains(&pos) {
                    options.push(pos);
                }
            }
        }
    }

    options.sort_by_key(|p| p.distance);
    StressAnalysis { options }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(text: &str) -> (usize, usize) {
        let c = possible_syllable_counts(text);
        (c.min(), c.max())
    }

    fn stresses(word: &str) -> Vec<StressClass> {
        detect_stress_positions(word).options().iter().map(|o| o.stress).collect()
    }

    #[test]
    fn unambiguous_counts() {
        assert_eq!(counts("γάτα"), (2, 2));
        assert_eq!(counts("ουρανός"), (3, 3));
        assert_eq!(counts("αυτός"), (2, 2));
        assert_eq!(counts("ευχαριστώ"), (4, 4));
        assert_eq!(counts("είναι"), (2, 2));
    }

    #[test]
    fn synizesis_gives_a_range() {
        assert_eq!(counts("ποιος"), (1, 2));
        assert_eq!(counts("τέτοιος"), (2, 3));
        assert_eq!(counts("παιδιά"), (2, 3));
        assert_eq!(counts("δουλειά"), (2, 3));
        assert_eq!(counts("αύριο"), (2, 3));
    }

    #[test]
    fn dialytika_vowels_stay_separate() {
        assert_eq!(counts("καΐκι"), (3, 3));
        assert_eq!(counts("θεϊκός"), (3, 3));
    }

    #[test]
    fn i_after_a_vowel_is_not_an_opportunity() {
        // only /i/ standing BEFORE another vowel can turn into a glide
        assert_eq!(counts("γάιδαρος"), (4, 4));
    }

    #[test]
    fn accented_i_never_merges() {
        assert_eq!(counts("θεία"), (2, 2));
        assert_eq!(counts("μαρία"), (3, 3));
    }

    #[test]
    fn count_floor_is_one() {
        assert_eq!(counts(""), (1, 1));
        assert_eq!(counts("στν"), (1, 1));
    }

    #[test]
    fn count_syllables_prefers_synizesis() {
        assert_eq!(count_syllables("παιδιά"), 2);
        assert_eq!(count_syllables("ουρανός"), 3);
    }

    #[test]
    fn stress_classes() {
        assert_eq!(stresses("ουρανός"), vec![StressClass::M]);
        assert_eq!(stresses("σπίτι"), vec![StressClass::F2]);
        assert_eq!(stresses("θάλασσα"), vec![StressClass::F3]);
    }

    #[test]
    fn ambiguous_words_list_both_readings() {
        assert_eq!(stresses("τέτοιος"), vec![StressClass::F2, StressClass::F3]);
        assert_eq!(stresses("παιδιά"), vec![StressClass::M]);
    }

    #[test]
    fn unaccented_fallback() {
        assert_eq!(stresses("μου"), vec![StressClass::M]);
        assert_eq!(stresses("νερα"), vec![StressClass::F2]);
    }

    #[test]
    fn enclitic_phrase_uses_last_accent() {
        let analysis = detect_stress_positions("όνομά της");
        assert_eq!(analysis.primary().stress, StressClass::F2);
    }

    #[test]
    fn options_are_sorted_and_deduplicated() {
        for word in ["τέτοιος", "ποιος", "καινούρια", "θάλασσα"] {
            let opts = detect_stress_positions(word);
            let distances: Vec<usize> = opts.options().iter().map(|o| o.distance).collect();
            let mut sorted = distances.clone();
            sorted.sort();
            sorted.dedup();
            assert_eq!(distances, sorted);
            assert!(!distances.is_empty());
        }
    }
}
