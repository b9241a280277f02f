// Dictionary-Only Tagger
//
// Emits no candidates. Every mention then comes from dictionary back-fill.

use super::Tagger;
use crate::types::TaggedRecord;
use anyhow::Result;
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, Default)]
pub struct DictionaryOnlyTagger;

#[async_trait]
impl Tagger for DictionaryOnlyTagger {
    fn tagger_id(&self) -> &'static str {
        "DictionaryOnly"
    }

    async fn tag(&self, _raw_sentence: &str) -> Result<Vec<TaggedRecord>> {
        Ok(Vec::new())
    }
}
