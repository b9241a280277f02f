//! Test Helper Utilities
//!
//! Shared fixtures for carlex-ner integration tests

#![allow(dead_code)]

pub mod taggers;

pub use taggers::{FlakyTagger, ScriptedTagger, SentenceFailingTagger};

use carlex_common::ReferenceDictionary;
use carlex_ner::tagger::Tagger;
use carlex_ner::Pipeline;
use std::sync::Arc;

/// Small brand/model lexicon covering the test sentences
pub fn test_dictionary() -> ReferenceDictionary {
    ReferenceDictionary::from_brands([
        ("toyota", vec!["camry", "corolla", "supra"]),
        ("honda", vec!["civic", "fit", "accord"]),
        ("kia", vec!["rio", "soul"]),
        ("mini", vec!["cooper"]),
        ("bmw", vec!["mini", "x5"]),
        ("volkswagen", vec!["up", "golf"]),
    ])
    .unwrap()
}

/// Pipeline with default rules over `test_dictionary()`
pub fn test_pipeline(tagger: Arc<dyn Tagger>) -> Pipeline {
    Pipeline::with_defaults(Arc::new(test_dictionary()), tagger)
}
