//! Error types for carlex-ner

use thiserror::Error;

/// Pipeline error type
#[derive(Debug, Error)]
pub enum NerError {
    /// Tagger call failed; the whole section is abandoned
    ///
    /// `sentence_index` counts only sentences that kept tokens after cleaning,
    /// so it is the position the sentence would have had in the section output.
    #[error("Tagger '{tagger}' failed on sentence {sentence_index}: {source}")]
    Tagger {
        tagger: &'static str,
        sentence_index: usize,
        #[source]
        source: anyhow::Error,
    },

    /// Section sequences differ in length
    #[error("Misaligned section: {sentences} token lists vs {entity_lists} entity lists")]
    Alignment {
        sentences: usize,
        entity_lists: usize,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// carlex-common error
    #[error("Common error: {0}")]
    Common(#[from] carlex_common::Error),
}

/// Result type for pipeline operations
pub type NerResult<T> = Result<T, NerError>;
