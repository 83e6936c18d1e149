//! Mosaic rhyme analysis: rhymes whose domain spans a word boundary.

use serde::Serialize;

use super::domain::{extract_rhyme_domain, RhymeDomain};
use super::part::rhyme_part_and_onset;
use crate::phonology::normalize::strip_diacritics;

/// Breakdown of a line pair with respect to word-boundary rhyming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MosaicResult {
    pub line1: String,
    pub line2: String,
    pub domain1: RhymeDomain,
    pub domain2: RhymeDomain,
    /// Primary stress classes agree.
    pub stress_match: bool,
    /// Both domains span a word boundary.
    pub both_multi_word: bool,
    /// At least one domain is multi-word and the rhyme parts match.
    pub candidate: bool,
    /// Present when at least one domain is multi-word.
    pub explanation: Option<String>,
}

impl MosaicResult {
    /// Human-readable breakdown in the ASCII notation.
    pub fn report(&self) -> String {
        let check = if self.candidate {
            "YES - rhyme spans words"
        } else {
            "NO - single word rhyme"
        };
        format!(
            "PHONETIC ANALYSIS (Stress: {} / {}):\n\n\
             Line 1 final: \"{}\"\n  → Sound: {}\n\n\
             Line 2 final: \"{}\"\n  → Sound: {}\n\n\
             MOSAIC CHECK: {}\n",
            self.domain1.stress,
            self.domain2.stress,
            self.domain1.words.join(" | "),
            self.domain1.phonetic,
            self.domain2.words.join(" | "),
            self.domain2.phonetic,
            check,
        )
    }
}

/// Analyze a line pair for a mosaic rhyme.
///
/// Only meaningful when at least one extracted domain spans a word
/// boundary; the check itself is the pure-rhyme equality test on the
/// space-stripped rhyme parts.
pub fn analyze_mosaic(line1: &str, line2: &str) -> MosaicResult {
    let domain1 = extract_rhyme_domain(line1);
    let domain2 = extract_rhyme_domain(line2);

    let stress_match = domain1.stress == domain2.stress;
    let both_multi_word = domain1.is_potential_mosaic && domain2.is_potential_mosaic;

    let mut candidate = false;
    let mut explanation = None;

    if domain1.is_potential_mosaic || domain2.is_potential_mosaic {
        let part1 = rhyme_part_and_onset(&domain1.text).map(|(part, _)| part);
        let part2 = rhyme_part_and_onset(&domain2.text).map(|(part, _)| part);

        match (part1, part2) {
            (Some(part1), Some(part2))
                if part1.replace(' ', "") == part2.replace(' ', "") =>
            {
                candidate = true;
                explanation = Some(format!("MOSAIC MATCH: {} == {}", part1, part2));
            }
            (part1, part2) => {
                explanation = Some(format!(
                    "MOSAIC MISMATCH: {} != {}",
                    part1.unwrap_or_default(),
                    part2.unwrap_or_default()
                ));
            }
        }
    }

    MosaicResult {
        line1: line1.to_string(),
        line2: line2.to_string(),
        domain1,
        domain2,
        stress_match,
        both_multi_word,
        candidate,
        explanation,
    }
}

/// True when two rhyme domains are near-identical repetitions rather than
/// rhymes: one normalized form (apostrophes dropped, lowercased, diacritics
/// stripped, words joined) is a suffix of the other. Corpus builders use
/// this to filter out a word rhyming against itself.
pub fn is_repetition(words1: &[String], words2: &[String]) -> bool {
    let a = normalize_for_repetition(words1);
    let b = normalize_for_repetition(words2);
    a == b || a.ends_with(&b) || b.ends_with(&a)
}

fn normalize_for_repetition(words: &[String]) -> String {
    let joined = words.concat().to_lowercase().replace('\'', "").replace('’', "");
    strip_diacritics(&joined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phonology::stress::StressClass;

    #[test]
    fn mosaic_match_across_word_boundary() {
        let result = analyze_mosaic("γράψαμε τ' όνομά της", "φυσάει ο μπάτης");
        assert!(result.candidate);
        assert!(result.stress_match);
        assert!(!result.both_multi_word);
        assert_eq!(result.domain1.stress, StressClass::F2);
        assert_eq!(
            result.explanation.as_deref(),
            Some("MOSAIC MATCH: a tis == atis")
        );
    }

    #[test]
    fn single_word_domains_are_not_candidates() {
        let result = analyze_mosaic("ο ουρανός", "η καρδιά");
        assert!(!result.candidate);
        assert!(result.explanation.is_none());
    }

    #[test]
    fn multi_word_domains_can_still_mismatch() {
        let result = analyze_mosaic("τ' όνομά της", "δώσε μου");
        assert!(!result.candidate);
        assert!(result.both_multi_word);
        assert!(!result.stress_match);
        let explanation = result.explanation.unwrap();
        assert!(explanation.starts_with("MOSAIC MISMATCH"));
    }

    #[test]
    fn repetition_filter_catches_suffixes() {
        let w1 = vec!["μενα".to_string(), "λουλούδι".to_string()];
        let w2 = vec!["λουλούδι".to_string()];
        assert!(is_repetition(&w1, &w2));

        let w3 = vec!["όνομά".to_string(), "της".to_string()];
        let w4 = vec!["ο".to_string(), "μπάτης".to_string()];
        assert!(!is_repetition(&w3, &w4));
    }

    #[test]
    fn report_mentions_the_mosaic_check() {
        let result = analyze_mosaic("γράψαμε τ' όνομά της", "φυσάει ο μπάτης");
        let report = result.report();
        assert!(report.contains("MOSAIC CHECK: YES"));
        assert!(report.contains("όνομά | της"));
    }
}
