//! Rhyme analysis for Modern Greek verse.
//!
//! The pipeline runs domain extraction (which word or phrase of a line
//! rhymes), part/onset splitting, pair classification, mosaic checks and
//! whole-poem scheme detection.

pub mod classify;
pub mod domain;
pub mod mosaic;
pub mod part;
pub mod scheme;
