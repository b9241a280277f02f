// Pipeline Orchestrator - Sentence-by-Sentence Extraction
//
// segment → (per surviving sentence) tag raw text → fuse → filter
// Output: one token list and one mention list per surviving sentence, in order.

use crate::error::{NerError, NerResult};
use crate::filter::FilterRules;
use crate::fusion::fuse_mentions;
use crate::tagger::Tagger;
use crate::text::{Lemmatizer, Segmenter, StopwordSet};
use crate::types::{EntityMention, SectionOutput, SentenceRecord};
use carlex_common::config::TomlConfig;
use carlex_common::ReferenceDictionary;
use std::sync::Arc;
use tracing::debug;

/// Entity extraction pipeline
///
/// Holds only read-only state; one instance can serve concurrent documents.
#[derive(Clone)]
pub struct Pipeline {
    dictionary: Arc<ReferenceDictionary>,
    tagger: Arc<dyn Tagger>,
    segmenter: Segmenter,
    rules: FilterRules,
}

impl Pipeline {
    /// Assemble a pipeline from explicit parts
    pub fn new(
        dictionary: Arc<ReferenceDictionary>,
        tagger: Arc<dyn Tagger>,
        stopwords: StopwordSet,
        rules: FilterRules,
    ) -> Self {
        let lemmatizer = Lemmatizer::new()
            .with_protected(dictionary.brand_names())
            .with_protected(dictionary.model_names());

        Self {
            segmenter: Segmenter::new(stopwords, lemmatizer),
            dictionary,
            tagger,
            rules,
        }
    }

    /// Pipeline with built-in stopwords and filter rules
    pub fn with_defaults(dictionary: Arc<ReferenceDictionary>, tagger: Arc<dyn Tagger>) -> Self {
        Self::new(dictionary, tagger, StopwordSet::english(), FilterRules::default())
    }

    /// Pipeline configured from the `[text]` and `[filter]` sections
    pub fn from_config(
        dictionary: Arc<ReferenceDictionary>,
        tagger: Arc<dyn Tagger>,
        config: &TomlConfig,
    ) -> Self {
        Self::new(
            dictionary,
            tagger,
            StopwordSet::with_extra(&config.text.extra_stopwords),
            FilterRules::from_config(&config.filter),
        )
    }

    pub fn dictionary(&self) -> &ReferenceDictionary {
        &self.dictionary
    }

    pub fn tagger_id(&self) -> &'static str {
        self.tagger.tagger_id()
    }

    /// Mentions for one raw sentence: tag, fuse, filter
    ///
    /// # Arguments
    /// * `raw_sentence` - Original sentence text
    /// * `sentence_index` - Position among the section's kept sentences (for error reporting)
    pub async fn extract_entities(
        &self,
        raw_sentence: &str,
        sentence_index: usize,
    ) -> NerResult<Vec<EntityMention>> {
        let records = self
            .tagger
            .tag(raw_sentence)
            .await
            .map_err(|source| NerError::Tagger {
                tagger: self.tagger.tagger_id(),
                sentence_index,
                source,
            })?;

        let total = records.len();
        let mentions: Vec<EntityMention> = records
            .into_iter()
            .filter_map(EntityMention::from_record)
            .collect();
        if mentions.len() < total {
            debug!(
                "Sentence {}: dropped {} malformed tagger records",
                sentence_index,
                total - mentions.len()
            );
        }

        let fused = fuse_mentions(raw_sentence, mentions, &self.dictionary);
        Ok(self.rules.filter_mentions(fused, raw_sentence, &self.dictionary))
    }

    /// Per-sentence records for one text
    ///
    /// Sentences with no tokens after cleaning produce no record and are never
    /// sent to the tagger. A tagger failure aborts the whole text.
    pub async fn process_sentences(&self, text: &str) -> NerResult<Vec<SentenceRecord>> {
        let mut records = Vec::new();

        for (index, sentence) in self.segmenter.segment(text).into_iter().enumerate() {
            let entities = self.extract_entities(sentence.raw, index).await?;
            records.push(SentenceRecord {
                raw_text: sentence.raw.to_string(),
                cleaned_tokens: sentence.tokens,
                entities,
            });
        }

        debug!("Processed section: {} sentences kept", records.len());
        Ok(records)
    }

    /// Aligned token and mention sequences for one document section
    pub async fn process_section(&self, text: &str) -> NerResult<SectionOutput> {
        Ok(SectionOutput::from(self.process_sentences(text).await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tagger::DictionaryOnlyTagger;
    use crate::types::EntityGroup;

    fn pipeline() -> Pipeline {
        let dictionary =
            ReferenceDictionary::from_brands([("toyota", vec!["camry"]), ("mercedes", vec!["sprinter"])])
                .unwrap();
        Pipeline::with_defaults(Arc::new(dictionary), Arc::new(DictionaryOnlyTagger))
    }

    #[tokio::test]
    async fn test_dictionary_only_section() {
        let output = pipeline()
            .process_section("I love my 2015 Toyota Camry")
            .await
            .unwrap();
        assert_eq!(output.len(), 1);
        assert_eq!(output.cleaned_sentences_tokens()[0], vec!["love", "2015", "toyota", "camry"]);
        let groups: Vec<_> = output.ner_entities()[0]
            .iter()
            .map(|m| (m.word.as_str(), m.entity_group))
            .collect();
        assert_eq!(
            groups,
            vec![("toyota", EntityGroup::CarBrand), ("camry", EntityGroup::CarModel)]
        );
    }

    #[tokio::test]
    async fn test_known_names_not_lemmatized() {
        let output = pipeline().process_section("Mercedes vans everywhere.").await.unwrap();
        assert_eq!(output.cleaned_sentences_tokens()[0], vec!["mercedes", "van", "everywhere"]);
    }

    #[tokio::test]
    async fn test_empty_text() {
        let output = pipeline().process_section("   ").await.unwrap();
        assert!(output.is_empty());
        assert!(output.ner_entities().is_empty());
    }
}
