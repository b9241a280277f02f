//! carlex-ner library interface
//!
//! Automotive named-entity extraction: text cleaning, sentence segmentation,
//! tagger/dictionary fusion and ambiguity filtering. The `job` module drives
//! the pipeline over scraped discussion threads.

pub mod error;
pub mod filter;
pub mod fusion;
pub mod job;
pub mod pipeline;
pub mod tagger;
pub mod text;
pub mod types;

pub use crate::error::{NerError, NerResult};
pub use crate::pipeline::Pipeline;
pub use crate::types::{EntityGroup, EntityMention, SectionOutput, SentenceRecord, TaggedRecord};
