// Sentence & Token Segmenter
//
// Sentence boundaries follow Unicode UAX #29. Each sentence is cleaned,
// split on whitespace, filtered against the stopword set and lemmatized.
// Sentences left with no tokens are dropped.

use super::{clean, Lemmatizer, StopwordSet};
use unicode_segmentation::UnicodeSegmentation;

/// A sentence that kept at least one token
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentedSentence<'a> {
    /// Original sentence text, trimmed, before cleaning
    pub raw: &'a str,
    pub tokens: Vec<String>,
}

/// Splits text into cleaned, tokenized sentences
#[derive(Debug, Clone, Default)]
pub struct Segmenter {
    stopwords: StopwordSet,
    lemmatizer: Lemmatizer,
}

impl Segmenter {
    pub fn new(stopwords: StopwordSet, lemmatizer: Lemmatizer) -> Self {
        Self {
            stopwords,
            lemmatizer,
        }
    }

    /// Raw sentence units (trimmed, non-blank)
    pub fn sentences<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.unicode_sentences()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Clean, tokenize, drop stopwords and lemmatize one sentence
    pub fn tokens(&self, sentence: &str) -> Vec<String> {
        clean(sentence)
            .split_whitespace()
            .filter(|token| !self.stopwords.contains(token))
            .map(|token| self.lemmatizer.lemmatize(token))
            .collect()
    }

    /// Sentences of `text` that survive cleaning, in order
    pub fn segment<'a>(&self, text: &'a str) -> Vec<SegmentedSentence<'a>> {
        self.sentences(text)
            .into_iter()
            .filter_map(|raw| {
                let tokens = self.tokens(raw);
                if tokens.is_empty() {
                    None
                } else {
                    Some(SegmentedSentence { raw, tokens })
                }
            })
            .collect()
    }
}
