//! Rhyme pair classification.
//!
//! The decision procedure compares two rhyme domains in a fixed order:
//! stress agreement, rhyme-part equality (PURE, upgraded to RICH on a
//! shared onset), then the bounded imperfect patterns IMP-V, IMP-C and
//! IMP-0. The strict and permissive variants differ in exactly one
//! branch, the open-against-closed syllable case.

use std::collections::HashMap;
use std::fmt;

use lazy_static::lazy_static;
use serde::Serialize;

use super::part::rhyme_part_and_onset;
use crate::phonology::orthography::is_vowel_phone;
use crate::phonology::stress::{detect_stress_positions, StressClass};

lazy_static! {
    /// Consonant features as (place, manner).
    /// Place: 1 labial, 2 dental/alveolar, 3 velar/palatal.
    /// Manner: 1 stop, 2 fricative, 3 nasal, 4 liquid.
    static ref CONSONANT_FEATURES: HashMap<char, (u8, u8)> = {
        let features = [
            ('p', (1, 1)),
            ('b', (1, 1)),
            ('f', (1, 2)),
            ('v', (1, 2)),
            ('m', (1, 3)),
            ('t', (2, 1)),
            ('d', (2, 1)),
            ('T', (2, 2)),
            ('D', (2, 2)),
            ('s', (2, 2)),
            ('z', (2, 2)),
            ('n', (2, 3)),
            ('l', (2, 4)),
            ('r', (2, 4)),
            ('k', (3, 1)),
            ('g', (3, 1)),
            ('x', (3, 2)),
            ('G', (3, 2)),
        ];
        features.iter().cloned().collect()
    };
}

/// Which empty-consonant policy the classifier applies. The variants agree
/// everywhere except when one rhyme part ends in an open syllable and the
/// other in a closed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Open-against-closed tails never rhyme.
    #[default]
    Strict,
    /// Open-against-closed tails are accepted as IMP-0F, after Topintzi.
    Permissive,
}

/// The controlled mismatch that still counts as a rhyme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ImperfectKind {
    /// Stressed vowels differ, everything after them matches.
    #[serde(rename = "IMP-V")]
    ImpV,
    /// Same vowel skeleton, consonants differ but are feature-compatible.
    #[serde(rename = "IMP-C")]
    ImpC,
    /// Same vowel skeleton, one consonant sequence is a subsequence of the
    /// other (a deletion or insertion).
    #[serde(rename = "IMP-0")]
    Imp0,
    /// Open syllable against closed, permissive variant only.
    #[serde(rename = "IMP-0F-TOPINTZI")]
    Imp0fTopintzi,
}

impl ImperfectKind {
    pub fn code(&self) -> &'static str {
        match self {
            ImperfectKind::ImpV => "IMP-V",
            ImperfectKind::ImpC => "IMP-C",
            ImperfectKind::Imp0 => "IMP-0",
            ImperfectKind::Imp0fTopintzi => "IMP-0F-TOPINTZI",
        }
    }
}

impl fmt::Display for ImperfectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Why a pair was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoRhymeReason {
    /// Primary stress classes differ.
    StressMismatch,
    /// Two bare stressed vowels with nothing after them, mere assonance.
    BareVowelMismatch,
    /// One rhyme part ends open, the other closed (strict variant).
    OpenClosedMismatch,
    /// Consonant sequences are not feature-compatible.
    IncompatibleConsonants,
    /// No recognized relation between the rhyme parts.
    NoPattern { part1: String, part2: String },
}

impl fmt::Display for NoRhymeReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoRhymeReason::StressMismatch => write!(f, "stress mismatch"),
            NoRhymeReason::BareVowelMismatch => write!(f, "single vowel mismatch"),
            NoRhymeReason::OpenClosedMismatch => write!(f, "open against closed syllable"),
            NoRhymeReason::IncompatibleConsonants => write!(f, "incompatible consonants"),
            NoRhymeReason::NoPattern { part1, part2 } => {
                write!(f, "no pattern: {} vs {}", part1, part2)
            }
        }
    }
}

/// The outcome of comparing two rhyme domains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum Classification {
    None {
        reason: NoRhymeReason,
    },
    /// A rhyme part could not be extracted from one of the domains.
    Unknown,
    /// Identical rhyme parts.
    Pure { stress: StressClass },
    /// Identical rhyme parts and identical non-empty onsets.
    Rich { stress: StressClass, onset: String },
    /// A bounded mismatch that still rhymes.
    Imperfect {
        stress: StressClass,
        kind: ImperfectKind,
        details: String,
    },
}

impl Classification {
    /// The coarse type code, e.g. "PURE".
    pub fn type_code(&self) -> &'static str {
        match self {
            Classification::None { .. } => "NONE",
            Classification::Unknown => "UNKNOWN",
            Classification::Pure { .. } => "PURE",
            Classification::Rich { .. } => "RICH",
            Classification::Imperfect { .. } => "IMPERFECT",
        }
    }

    /// The shared stress subtype, absent for NONE and UNKNOWN.
    pub fn stress(&self) -> Option<StressClass> {
        match self {
            Classification::Pure { stress }
            | Classification::Rich { stress, .. }
            | Classification::Imperfect { stress, .. } => Some(*stress),
            _ => None,
        }
    }

    pub fn imperfect_kind(&self) -> Option<ImperfectKind> {
        match self {
            Classification::Imperfect { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// True for any accepted rhyme.
    pub fn is_rhyme(&self) -> bool {
        matches!(
            self,
            Classification::Pure { .. }
                | Classification::Rich { .. }
                | Classification::Imperfect { .. }
        )
    }

    /// Corpus label, e.g. "F2-PURE" or "M-IMP-V-IMPERFECT". The IDV mark is
    /// appended only to accepted rhymes.
    pub fn code(&self, idv: bool) -> String {
        let base = match self {
            Classification::None { .. } => "NONE".to_string(),
            Classification::Unknown => "UNKNOWN".to_string(),
            Classification::Pure { stress } => format!("{}-PURE", stress),
            Classification::Rich { stress, .. } => format!("{}-RICH", stress),
            Classification::Imperfect { stress, kind, .. } => {
                format!("{}-{}-IMPERFECT", stress, kind.code())
            }
        };
        if idv && self.is_rhyme() {
            format!("{}-IDV", base)
        } else {
            base
        }
    }
}

/// Classify two rhyme domains with the strict policy.
pub fn classify(domain1: &str, domain2: &str) -> Classification {
    classify_with_variant(domain1, domain2, Variant::Strict)
}

/// Classify two rhyme domains under the given variant.
pub fn classify_with_variant(domain1: &str, domain2: &str, variant: Variant) -> Classification {
    let stress1 = detect_stress_positions(domain1).primary().stress;
    let stress2 = detect_stress_positions(domain2).primary().stress;
    if stress1 != stress2 {
        return Classification::None {
            reason: NoRhymeReason::StressMismatch,
        };
    }
    let stress = stress1;

    let (raw_part1, onset1) = match rhyme_part_and_onset(domain1) {
        Some(split) => split,
        None => return Classification::Unknown,
    };
    let (raw_part2, onset2) = match rhyme_part_and_onset(domain2) {
        Some(split) => split,
        None => return Classification::Unknown,
    };

    // Mosaic domains carry a space at the word boundary.
    let part1: String = raw_part1.chars().filter(|c| *c != ' ').collect();
    let part2: String = raw_part2.chars().filter(|c| *c != ' ').collect();

    if part1 == part2 {
        if !onset1.is_empty() && onset1 == onset2 {
            return Classification::Rich { stress, onset: onset1 };
        }
        return Classification::Pure { stress };
    }

    let (vowels1, consonants1) = cv_split(&part1);
    let (vowels2, consonants2) = cv_split(&part2);

    // IMP-V: the stressed vowel differs, everything else lines up.
    if part1.chars().count() > 1 && part2.chars().count() > 1 {
        if let ([v1, rest1 @ ..], [v2, rest2 @ ..]) = (vowels1.as_slice(), vowels2.as_slice()) {
            if rest1 == rest2 && consonants1 == consonants2 && v1 != v2 {
                if consonants1.is_empty() && rest1.is_empty() {
                    // Two bare vowels is assonance, not rhyme.
                    return Classification::None {
                        reason: NoRhymeReason::BareVowelMismatch,
                    };
                }
                return Classification::Imperfect {
                    stress,
                    kind: ImperfectKind::ImpV,
                    details: format!("{}-{}", v1, v2),
                };
            }
        }
    }

    // IMP-C family: same vowel skeleton, consonants differ.
    if vowels1 == vowels2 && consonants1 != consonants2 {
        let details = format!(
            "{}-{}",
            consonants1.iter().collect::<String>(),
            consonants2.iter().collect::<String>()
        );
        return match consonant_tail_kind(&consonants1, &consonants2, variant) {
            Ok(kind) => Classification::Imperfect { stress, kind, details },
            Err(reason) => Classification::None { reason },
        };
    }

    Classification::None {
        reason: NoRhymeReason::NoPattern { part1, part2 },
    }
}

fn cv_split(part: &str) -> (Vec<char>, Vec<char>) {
    let mut vowels = Vec::new();
    let mut consonants = Vec::new();
    for c in part.chars() {
        if is_vowel_phone(c) {
            vowels.push(c);
        } else {
            consonants.push(c);
        }
    }
    (vowels, consonants)
}

fn is_subsequence(needle: &[char], haystack: &[char]) -> bool {
    let mut rest = haystack.iter();
    needle.iter().all(|c| rest.any(|h| h == c))
}

/// Decide what a consonant-sequence mismatch amounts to.
fn consonant_tail_kind(
    cs1: &[char],
    cs2: &[char],
    variant: Variant,
) -> Result<ImperfectKind, NoRhymeReason> {
    if cs1.is_empty() || cs2.is_empty() {
        return match variant {
            Variant::Strict => Err(NoRhymeReason::OpenClosedMismatch),
            Variant::Permissive => Ok(ImperfectKind::Imp0fTopintzi),
        };
    }

    if cs1.len() != cs2.len() {
        let (shorter, longer) = if cs1.len() < cs2.len() { (cs1, cs2) } else { (cs2, cs1) };
        if is_subsequence(shorter, longer) {
            return Ok(ImperfectKind::Imp0);
        }
        return Err(NoRhymeReason::IncompatibleConsonants);
    }

    for (&a, &b) in cs1.iter().zip(cs2.iter()) {
        if a == b {
            continue;
        }
        // Unknown symbols fail closed.
        let (fa, fb) = match (CONSONANT_FEATURES.get(&a), CONSONANT_FEATURES.get(&b)) {
            (Some(&fa), Some(&fb)) => (fa, fb),
            _ => {
                log::debug!("no feature entry for {:?}/{:?}, rejecting", a, b);
                return Err(NoRhymeReason::IncompatibleConsonants);
            }
        };

        if fa.0 == fb.0 || fa.1 == fb.1 {
            continue;
        }

        // Neither place nor manner shared: acceptable only inside one
        // sonority class, never obstruent against sonorant.
        let obstruent_a = fa.1 <= 2;
        let obstruent_b = fb.1 <= 2;
        if obstruent_a != obstruent_b {
            return Err(NoRhymeReason::IncompatibleConsonants);
        }
    }

    Ok(ImperfectKind::ImpC)
}
