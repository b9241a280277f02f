// Context Validation - Windowed Evidence for Ambiguous Tokens
//
// An ambiguous token is kept only if, around one of its verbatim occurrences
// in the raw sentence, a nearby word is a plausible model year or a known
// brand/model name.

use carlex_common::ReferenceDictionary;
use std::ops::RangeInclusive;

/// Window parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextWindow {
    /// Words inspected on each side of the occurrence
    pub radius: usize,
    /// Accepted model-year range
    pub years: RangeInclusive<u32>,
}

impl Default for ContextWindow {
    fn default() -> Self {
        Self {
            radius: 3,
            years: 1900..=2030,
        }
    }
}

impl ContextWindow {
    /// Four ASCII digits inside the year range
    pub fn is_model_year(&self, word: &str) -> bool {
        word.len() == 4
            && word.bytes().all(|b| b.is_ascii_digit())
            && word
                .parse::<u32>()
                .map(|year| self.years.contains(&year))
                .unwrap_or(false)
    }

    /// Does any occurrence of `surface` in `raw_sentence` have supporting context?
    ///
    /// The sentence is split on whitespace and case-folded; occurrences must
    /// match `surface` exactly. No occurrence means no support.
    pub fn validate(&self, surface: &str, raw_sentence: &str, dictionary: &ReferenceDictionary) -> bool {
        let words: Vec<String> = raw_sentence
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();
        let surface = surface.to_lowercase();

        words
            .iter()
            .enumerate()
            .filter(|(_, word)| **word == surface)
            .any(|(position, _)| {
                let start = position.saturating_sub(self.radius);
                let end = (position + self.radius).min(words.len() - 1);
                (start..=end)
                    .filter(|&i| i != position)
                    .any(|i| self.is_model_year(&words[i]) || dictionary.is_known(&words[i]))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dictionary() -> ReferenceDictionary {
        ReferenceDictionary::from_brands([("kia", vec!["rio"]), ("honda", vec!["fit"])]).unwrap()
    }

    #[test]
    fn test_model_year() {
        let window = ContextWindow::default();
        assert!(window.is_model_year("2015"));
        assert!(window.is_model_year("1900"));
        assert!(window.is_model_year("2030"));
        assert!(!window.is_model_year("1899"));
        assert!(!window.is_model_year("2031"));
        assert!(!window.is_model_year("201"));
        assert!(!window.is_model_year("2015,"));
        assert!(!window.is_model_year("+201"));
    }

    #[test]
    fn test_year_within_window() {
        let window = ContextWindow::default();
        assert!(window.validate("go", "my 2015 car will go fast", &dictionary()));
        assert!(!window.validate("go", "in 2015 my old car did not go fast", &dictionary()));
    }

    #[test]
    fn test_dictionary_word_within_window() {
        let window = ContextWindow::default();
        assert!(window.validate("go", "the Kia can go", &dictionary()));
        assert!(window.validate("go", "go Honda", &dictionary()));
    }

    #[test]
    fn test_token_itself_is_not_context() {
        let window = ContextWindow::default();
        assert!(!window.validate("fit", "it did not fit in the garage", &dictionary()));
    }

    #[test]
    fn test_no_verbatim_occurrence_fails() {
        let window = ContextWindow::default();
        assert!(!window.validate("go", "Let's go! 2015 was great", &dictionary()));
        assert!(!window.validate("go", "", &dictionary()));
    }

    #[test]
    fn test_any_occurrence_suffices() {
        let window = ContextWindow::default();
        let sentence = "go on and on and on and on then my 2012 fit will go";
        assert!(window.validate("go", sentence, &dictionary()));
    }
}
