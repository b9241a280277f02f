// Statistical Entity Taggers
//
// The tagger is an opaque sequence labeller run on the raw (uncleaned)
// sentence. Its labels are generic and may be wrong; fusion fixes them up.

use crate::types::TaggedRecord;
use anyhow::Result;
use async_trait::async_trait;
use carlex_common::config::{TaggerConfig, TaggerKind};
use std::sync::Arc;

pub mod dictionary_only;
pub mod http_tagger;

pub use dictionary_only::DictionaryOnlyTagger;
pub use http_tagger::HttpTagger;

/// Tagger trait - every tagger backend implements this
#[async_trait]
pub trait Tagger: Send + Sync {
    /// Tagger identifier (e.g., "HTTP", "DictionaryOnly")
    fn tagger_id(&self) -> &'static str;

    /// Tag one raw sentence
    ///
    /// # Arguments
    /// * `raw_sentence` - Original sentence text (casing and punctuation intact)
    ///
    /// # Returns
    /// * `Ok(records)` - Candidate mentions in sentence order; malformed records
    ///   are allowed and dropped downstream
    /// * `Err(_)` - Tagger unavailable or failed; aborts the current section
    async fn tag(&self, raw_sentence: &str) -> Result<Vec<TaggedRecord>>;

    /// Check if the tagger can be called (endpoint configured, etc.)
    fn is_available(&self) -> bool {
        true // Default: assume available
    }
}

/// Build the tagger named by configuration
///
/// `api_token` is passed separately because it may come from the environment.
pub fn build_tagger(config: &TaggerConfig, api_token: Option<String>) -> Result<Arc<dyn Tagger>> {
    match config.kind {
        TaggerKind::DictionaryOnly => Ok(Arc::new(DictionaryOnlyTagger)),
        TaggerKind::Http => Ok(Arc::new(HttpTagger::from_config(config, api_token)?)),
    }
}
