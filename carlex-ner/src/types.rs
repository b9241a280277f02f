//! Mention, sentence and section types shared across the pipeline

use crate::error::NerError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Confidence score (0.0-1.0)
pub type Score = f64;

/// Entity category attached to a mention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityGroup {
    CarBrand,
    CarModel,
    Person,
    Org,
    Misc,
    Other,
}

impl EntityGroup {
    /// Map a tagger label to a group
    ///
    /// BIO prefixes are ignored (`B-ORG` → `Org`). Labels with no counterpart
    /// (e.g. `LOC`) become `Other`.
    pub fn from_label(label: &str) -> Self {
        let label = label.trim().to_ascii_uppercase();
        let label = ["B-", "I-", "E-", "S-"]
            .iter()
            .find_map(|prefix| label.strip_prefix(prefix))
            .unwrap_or(&label);

        match label {
            "CAR_BRAND" => EntityGroup::CarBrand,
            "CAR_MODEL" => EntityGroup::CarModel,
            "PER" | "PERSON" => EntityGroup::Person,
            "ORG" | "ORGANIZATION" => EntityGroup::Org,
            "MISC" => EntityGroup::Misc,
            _ => EntityGroup::Other,
        }
    }

    /// Brand or model
    pub fn is_car(&self) -> bool {
        matches!(self, EntityGroup::CarBrand | EntityGroup::CarModel)
    }
}

impl fmt::Display for EntityGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityGroup::CarBrand => write!(f, "CAR_BRAND"),
            EntityGroup::CarModel => write!(f, "CAR_MODEL"),
            EntityGroup::Person => write!(f, "PERSON"),
            EntityGroup::Org => write!(f, "ORG"),
            EntityGroup::Misc => write!(f, "MISC"),
            EntityGroup::Other => write!(f, "OTHER"),
        }
    }
}

/// One record as returned by a tagger
///
/// Every field is optional on the wire; `EntityMention::from_record` decides
/// whether the record is usable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaggedRecord {
    #[serde(default)]
    pub word: Option<String>,

    #[serde(default, alias = "entity")]
    pub entity_group: Option<String>,

    #[serde(default)]
    pub score: Option<Score>,
}

impl TaggedRecord {
    pub fn new(word: &str, entity_group: &str, score: Score) -> Self {
        Self {
            word: Some(word.to_string()),
            entity_group: Some(entity_group.to_string()),
            score: Some(score),
        }
    }
}

/// A detected entity occurrence within one sentence
///
/// `word` is always lowercase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityMention {
    pub word: String,
    pub entity_group: EntityGroup,
    pub score: Score,
}

impl EntityMention {
    pub fn new(word: &str, entity_group: EntityGroup, score: Score) -> Self {
        Self {
            word: word.to_lowercase(),
            entity_group,
            score: score.clamp(0.0, 1.0),
        }
    }

    /// Mention added from the reference dictionary
    pub fn synthesized(word: &str, entity_group: EntityGroup) -> Self {
        Self::new(word, entity_group, 1.0)
    }

    /// Convert a tagger record, or `None` if it lacks a word or label
    pub fn from_record(record: TaggedRecord) -> Option<Self> {
        let word = record.word?;
        let label = record.entity_group?;
        let word = word.trim();
        if word.is_empty() {
            return None;
        }
        let score = record.score.filter(|s| s.is_finite()).unwrap_or(0.0);
        Some(Self::new(word, EntityGroup::from_label(&label), score))
    }
}

/// One sentence that survived cleaning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceRecord {
    pub raw_text: String,
    pub cleaned_tokens: Vec<String>,
    pub entities: Vec<EntityMention>,
}

/// Serialized shape of a section, validated on the way in
#[derive(Deserialize)]
struct SectionOutputWire {
    cleaned_sentences_tokens: Vec<Vec<String>>,
    ner_entities: Vec<Vec<EntityMention>>,
}

/// Per-section output: two index-aligned sequences
///
/// Both sequences always have the same length; the fields are private so the
/// only ways in are `push` and the validating conversions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SectionOutputWire")]
pub struct SectionOutput {
    cleaned_sentences_tokens: Vec<Vec<String>>,
    ner_entities: Vec<Vec<EntityMention>>,
}

impl SectionOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one sentence's tokens and entities
    pub fn push(&mut self, tokens: Vec<String>, entities: Vec<EntityMention>) {
        self.cleaned_sentences_tokens.push(tokens);
        self.ner_entities.push(entities);
    }

    pub fn cleaned_sentences_tokens(&self) -> &[Vec<String>] {
        &self.cleaned_sentences_tokens
    }

    pub fn ner_entities(&self) -> &[Vec<EntityMention>] {
        &self.ner_entities
    }

    /// Number of sentences
    pub fn len(&self) -> usize {
        self.cleaned_sentences_tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cleaned_sentences_tokens.is_empty()
    }

    /// All mentions across sentences, in order
    pub fn mentions(&self) -> impl Iterator<Item = &EntityMention> {
        self.ner_entities.iter().flatten()
    }
}

impl TryFrom<SectionOutputWire> for SectionOutput {
    type Error = NerError;

    fn try_from(wire: SectionOutputWire) -> Result<Self, Self::Error> {
        if wire.cleaned_sentences_tokens.len() != wire.ner_entities.len() {
            return Err(NerError::Alignment {
                sentences: wire.cleaned_sentences_tokens.len(),
                entity_lists: wire.ner_entities.len(),
            });
        }
        Ok(Self {
            cleaned_sentences_tokens: wire.cleaned_sentences_tokens,
            ner_entities: wire.ner_entities,
        })
    }
}

impl From<Vec<SentenceRecord>> for SectionOutput {
    fn from(records: Vec<SentenceRecord>) -> Self {
        let mut output = Self::new();
        for record in records {
            output.push(record.cleaned_tokens, record.entities);
        }
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_mapping() {
        assert_eq!(EntityGroup::from_label("ORG"), EntityGroup::Org);
        assert_eq!(EntityGroup::from_label("B-PER"), EntityGroup::Person);
        assert_eq!(EntityGroup::from_label("i-misc"), EntityGroup::Misc);
        assert_eq!(EntityGroup::from_label("CAR_BRAND"), EntityGroup::CarBrand);
        assert_eq!(EntityGroup::from_label("LOC"), EntityGroup::Other);
    }

    #[test]
    fn test_group_serializes_screaming_snake() {
        let json = serde_json::to_string(&EntityGroup::CarModel).unwrap();
        assert_eq!(json, "\"CAR_MODEL\"");
        assert_eq!(EntityGroup::Org.to_string(), "ORG");
    }

    #[test]
    fn test_record_without_word_or_label_is_dropped() {
        let no_word = TaggedRecord {
            word: None,
            entity_group: Some("ORG".into()),
            score: Some(0.9),
        };
        let no_label = TaggedRecord {
            word: Some("Toyota".into()),
            entity_group: None,
            score: Some(0.9),
        };
        let blank = TaggedRecord::new("   ", "ORG", 0.9);
        assert!(EntityMention::from_record(no_word).is_none());
        assert!(EntityMention::from_record(no_label).is_none());
        assert!(EntityMention::from_record(blank).is_none());
    }

    #[test]
    fn test_record_word_lowercased_and_score_clamped() {
        let mention = EntityMention::from_record(TaggedRecord::new("Toyota", "ORG", 1.7)).unwrap();
        assert_eq!(mention.word, "toyota");
        assert_eq!(mention.entity_group, EntityGroup::Org);
        assert_eq!(mention.score, 1.0);

        let unscored = TaggedRecord {
            score: None,
            ..TaggedRecord::new("Ford", "ORG", 0.0)
        };
        assert_eq!(EntityMention::from_record(unscored).unwrap().score, 0.0);
    }

    #[test]
    fn test_record_accepts_entity_alias() {
        let record: TaggedRecord =
            serde_json::from_str(r#"{"word": "Camry", "entity": "B-MISC", "score": 0.5}"#).unwrap();
        assert_eq!(record.entity_group.as_deref(), Some("B-MISC"));
    }

    #[test]
    fn test_section_output_rejects_misaligned_json() {
        let json = r#"{"cleaned_sentences_tokens": [["love"]], "ner_entities": []}"#;
        assert!(serde_json::from_str::<SectionOutput>(json).is_err());

        let json = r#"{"cleaned_sentences_tokens": [["love"]], "ner_entities": [[]]}"#;
        let section: SectionOutput = serde_json::from_str(json).unwrap();
        assert_eq!(section.len(), 1);
    }
}
