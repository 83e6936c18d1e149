//! Phonological analysis: orthography tables, grapheme-to-phoneme
//! conversion, syllable counting and stress detection.

pub mod g2p;
pub mod normalize;
pub mod orthography;
pub mod stress;
pub mod units;
