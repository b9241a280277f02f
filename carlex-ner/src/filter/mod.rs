// Ambiguity Filter - Drop Noisy Mentions
//
// Rules, first match drops the mention:
//   1. always-excluded function word
//   2. sub-word continuation fragment ("##...")
//   3. short (≤ 2 chars) or known-ambiguous token without supporting context
//   4. punctuation only
//   5. digits only
// Empty surface forms are dropped before any rule runs.

pub mod context;

use crate::text::is_punctuation;
use crate::types::EntityMention;
use carlex_common::config::FilterConfig;
use carlex_common::ReferenceDictionary;
use std::collections::HashSet;
use tracing::debug;

pub use context::ContextWindow;

/// Function words that are never entities
pub const ALWAYS_EXCLUDE: &[&str] = &["i", "is", "it", "a", "an", "the", "am", "are", "was", "be"];

/// Model names that collide with everyday English words
pub const AMBIGUOUS_TOKENS: &[&str] = &[
    "go", "up", "one", "fit", "ram", "mini", "smart", "edge", "focus", "golf", "note", "leaf",
    "soul", "spark", "ranger", "escape", "pilot", "passport", "express", "journey", "compass",
    "charger", "sonic", "city", "life", "beat", "cube", "rogue", "legacy", "model", "like",
];

/// Sub-word continuation marker emitted by word-piece taggers
pub const SUBWORD_MARKER: &str = "##";

/// Why a mention was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    Empty,
    AlwaysExcluded,
    SubwordFragment,
    UnsupportedAmbiguous,
    Punctuation,
    Numeric,
}

/// Fixed rule configuration for the ambiguity filter
#[derive(Debug, Clone)]
pub struct FilterRules {
    pub always_exclude: HashSet<String>,
    pub ambiguous_tokens: HashSet<String>,
    /// Surface forms up to this many characters need context
    pub short_token_max_len: usize,
    pub subword_marker: String,
    pub window: ContextWindow,
}

impl Default for FilterRules {
    fn default() -> Self {
        Self {
            always_exclude: ALWAYS_EXCLUDE.iter().map(|w| w.to_string()).collect(),
            ambiguous_tokens: AMBIGUOUS_TOKENS.iter().map(|w| w.to_string()).collect(),
            short_token_max_len: 2,
            subword_marker: SUBWORD_MARKER.to_string(),
            window: ContextWindow::default(),
        }
    }
}

impl FilterRules {
    /// Built-in rules extended by the `[filter]` config section
    pub fn from_config(config: &FilterConfig) -> Self {
        let mut rules = Self::default();
        rules.always_exclude.extend(lowercase_all(&config.extra_always_exclude));
        rules.ambiguous_tokens.extend(lowercase_all(&config.extra_ambiguous_tokens));
        rules.window = ContextWindow {
            radius: config.context_window,
            years: config.min_year..=config.max_year,
        };
        rules
    }

    /// First rule that drops `mention`, or `None` if it is kept
    pub fn drop_reason(
        &self,
        mention: &EntityMention,
        raw_sentence: &str,
        dictionary: &ReferenceDictionary,
    ) -> Option<DropReason> {
        let word = mention.word.to_lowercase();

        if word.is_empty() {
            return Some(DropReason::Empty);
        }
        if self.always_exclude.contains(&word) {
            return Some(DropReason::AlwaysExcluded);
        }
        if word.starts_with(&self.subword_marker) {
            return Some(DropReason::SubwordFragment);
        }
        if (word.chars().count() <= self.short_token_max_len || self.ambiguous_tokens.contains(&word))
            && !self.window.validate(&word, raw_sentence, dictionary)
        {
            return Some(DropReason::UnsupportedAmbiguous);
        }
        if word.chars().all(is_punctuation) {
            return Some(DropReason::Punctuation);
        }
        if word.chars().all(|c| c.is_ascii_digit()) {
            return Some(DropReason::Numeric);
        }
        None
    }

    /// Keep mentions no rule drops, preserving order
    pub fn filter_mentions(
        &self,
        mentions: Vec<EntityMention>,
        raw_sentence: &str,
        dictionary: &ReferenceDictionary,
    ) -> Vec<EntityMention> {
        mentions
            .into_iter()
            .filter(|mention| match self.drop_reason(mention, raw_sentence, dictionary) {
                Some(reason) => {
                    debug!("Dropped mention '{}' ({:?})", mention.word, reason);
                    false
                }
                None => true,
            })
            .collect()
    }
}

fn lowercase_all(words: &[String]) -> impl Iterator<Item = String> + '_ {
    words
        .iter()
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty())
}
