// Lemmatizer - Noun Base Forms by Rule
//
// Irregular plural table first, then suffix detachment. Output is a best
// effort base form; grammatical correctness is not guaranteed.

use std::collections::{HashMap, HashSet};

/// Irregular plurals → singular
const IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("men", "man"),
    ("women", "woman"),
    ("children", "child"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("geese", "goose"),
    ("mice", "mouse"),
    ("wives", "wife"),
    ("knives", "knife"),
    ("lives", "life"),
    ("leaves", "leaf"),
    ("halves", "half"),
    ("shelves", "shelf"),
    ("wolves", "wolf"),
    ("indices", "index"),
    ("matrices", "matrix"),
];

/// Endings that look plural but are not (glass, bus, axis)
const SINGULAR_ENDINGS: &[&str] = &["ss", "us", "is"];

/// (suffix, replacement), tried in order
const SUFFIX_RULES: &[(&str, &str)] = &[
    ("ies", "y"),
    ("sses", "ss"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("xes", "x"),
    ("zes", "z"),
    ("s", ""),
];

/// Rule-based noun lemmatizer
#[derive(Debug, Clone)]
pub struct Lemmatizer {
    irregular: HashMap<&'static str, &'static str>,
    /// Words returned unchanged (brand and model names)
    protected: HashSet<String>,
}

impl Default for Lemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lemmatizer {
    pub fn new() -> Self {
        Self {
            irregular: IRREGULAR_PLURALS.iter().copied().collect(),
            protected: HashSet::new(),
        }
    }

    /// Never rewrite any of `words`
    pub fn with_protected<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.protected
            .extend(words.into_iter().map(|w| w.as_ref().to_lowercase()));
        self
    }

    /// Reduce a lowercase token to its base form
    pub fn lemmatize(&self, token: &str) -> String {
        if self.protected.contains(token) {
            return token.to_string();
        }
        if let Some(singular) = self.irregular.get(token) {
            return singular.to_string();
        }
        if token.chars().count() <= 3
            || !token.chars().all(char::is_alphabetic)
            || SINGULAR_ENDINGS.iter().any(|ending| token.ends_with(ending))
        {
            return token.to_string();
        }

        for (suffix, replacement) in SUFFIX_RULES {
            if let Some(stem) = token.strip_suffix(suffix) {
                if stem.chars().count() >= 2 {
                    return format!("{}{}", stem, replacement);
                }
            }
        }
        token.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_plurals() {
        let lemmatizer = Lemmatizer::new();
        assert_eq!(lemmatizer.lemmatize("cars"), "car");
        assert_eq!(lemmatizer.lemmatize("brakes"), "brake");
        assert_eq!(lemmatizer.lemmatize("miles"), "mile");
        assert_eq!(lemmatizer.lemmatize("batteries"), "battery");
        assert_eq!(lemmatizer.lemmatize("benches"), "bench");
        assert_eq!(lemmatizer.lemmatize("boxes"), "box");
        assert_eq!(lemmatizer.lemmatize("glasses"), "glass");
    }

    #[test]
    fn test_unchanged_forms() {
        let lemmatizer = Lemmatizer::new();
        for word in ["love", "glass", "bus", "axis", "gas", "camry", "328i", "f-150", "driving"] {
            assert_eq!(lemmatizer.lemmatize(word), word);
        }
    }

    #[test]
    fn test_irregular_plurals() {
        let lemmatizer = Lemmatizer::new();
        assert_eq!(lemmatizer.lemmatize("men"), "man");
        assert_eq!(lemmatizer.lemmatize("knives"), "knife");
    }

    #[test]
    fn test_protected_words_untouched() {
        let lemmatizer = Lemmatizer::new().with_protected(["Mercedes", "hondas"]);
        assert_eq!(lemmatizer.lemmatize("mercedes"), "mercedes");
        assert_eq!(lemmatizer.lemmatize("hondas"), "hondas");
        assert_eq!(lemmatizer.lemmatize("toyotas"), "toyota");
    }
}
