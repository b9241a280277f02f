//! Mock taggers
//!
//! `ScriptedTagger` answers from a fixed table and records every call.
//! `FlakyTagger` fails a set number of times before delegating.
//! `SentenceFailingTagger` fails only on sentences containing a given phrase.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use carlex_ner::tagger::Tagger;
use carlex_ner::TaggedRecord;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Tagger with canned answers per raw sentence
#[derive(Default)]
pub struct ScriptedTagger {
    responses: HashMap<String, Vec<TaggedRecord>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedTagger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `records` when tagging exactly `sentence`
    pub fn with_response(mut self, sentence: &str, records: Vec<TaggedRecord>) -> Self {
        self.responses.insert(sentence.to_string(), records);
        self
    }

    /// Sentences seen so far, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Tagger for ScriptedTagger {
    fn tagger_id(&self) -> &'static str {
        "Scripted"
    }

    async fn tag(&self, raw_sentence: &str) -> Result<Vec<TaggedRecord>> {
        self.calls.lock().unwrap().push(raw_sentence.to_string());
        Ok(self.responses.get(raw_sentence).cloned().unwrap_or_default())
    }
}

/// Fails the first `failures` calls (or every call when `None`)
pub struct FlakyTagger {
    failures: Option<usize>,
    attempts: AtomicUsize,
}

impl FlakyTagger {
    pub fn always_failing() -> Self {
        Self {
            failures: None,
            attempts: AtomicUsize::new(0),
        }
    }

    pub fn failing_first(failures: usize) -> Self {
        Self {
            failures: Some(failures),
            attempts: AtomicUsize::new(0),
        }
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Tagger for FlakyTagger {
    fn tagger_id(&self) -> &'static str {
        "Flaky"
    }

    async fn tag(&self, _raw_sentence: &str) -> Result<Vec<TaggedRecord>> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
        match self.failures {
            Some(failures) if attempt >= failures => Ok(vec![]),
            _ => Err(anyhow!("model server unavailable (attempt {})", attempt + 1)),
        }
    }
}

/// Fails on any sentence containing `phrase`, answers nothing otherwise
pub struct SentenceFailingTagger {
    phrase: String,
    calls: Mutex<Vec<String>>,
}

impl SentenceFailingTagger {
    pub fn new(phrase: &str) -> Self {
        Self {
            phrase: phrase.to_string(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Tagger for SentenceFailingTagger {
    fn tagger_id(&self) -> &'static str {
        "SentenceFailing"
    }

    async fn tag(&self, raw_sentence: &str) -> Result<Vec<TaggedRecord>> {
        self.calls.lock().unwrap().push(raw_sentence.to_string());
        if raw_sentence.contains(&self.phrase) {
            Err(anyhow!("model rejected sentence"))
        } else {
            Ok(vec![])
        }
    }
}
