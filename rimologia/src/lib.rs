//! Phonological analysis of Modern Greek poetry.
//!
//! Converts Greek text to phonemes, counts syllables with synizesis
//! ambiguity, locates the stress, and classifies rhyme pairs from strict
//! PURE/RICH matches down to the imperfect families. On top of the pair
//! classifier sit a mosaic-rhyme analyzer and a rhyme-scheme detector for
//! whole poems.

pub mod phonology;
pub mod rhyme;

pub use phonology::g2p::{g2p, g2p_with_mode, to_ascii};
pub use phonology::stress::{
    count_syllables, detect_stress_positions, possible_syllable_counts, StressAnalysis,
    StressClass, StressPosition, SyllableCounts,
};
pub use rhyme::classify::{
    classify, classify_with_variant, Classification, ImperfectKind, NoRhymeReason, Variant,
};
pub use rhyme::domain::{extract_rhyme_domain, pre_rhyme_vowel, RhymeDomain};
pub use rhyme::mosaic::{analyze_mosaic, is_repetition, MosaicResult};
pub use rhyme::part::rhyme_part_and_onset;
pub use rhyme::scheme::{
    detect_scheme, detect_scheme_with, identify_pattern, RhymeConnection, RhymeQuality,
    SchemeOptions, SchemeResult,
};
