//! Reference dictionary of car brands and their models
//!
//! Loaded once at startup from `{"brands": {brand: [model, ...]}}` and
//! read-only afterwards. All lookups are case-insensitive; names are stored
//! lowercase.

use crate::{Error, Result};
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use tracing::info;

/// On-disk shape of the dictionary source
#[derive(Debug, Deserialize)]
struct DictionarySource {
    brands: BTreeMap<String, Vec<String>>,
}

/// Immutable brand → models lexicon
#[derive(Debug, Clone, Default)]
pub struct ReferenceDictionary {
    /// Brand name → ordered, de-duplicated model names
    brands: BTreeMap<String, Vec<String>>,
    brand_names: HashSet<String>,
    model_names: HashSet<String>,
}

impl ReferenceDictionary {
    /// Load the dictionary from a JSON or TOML file
    ///
    /// The format is chosen by extension (`.toml` → TOML, anything else →
    /// JSON). A missing or malformed source is an error; callers treat it as
    /// fatal.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Dictionary(format!("Cannot read {}: {}", path.display(), e))
        })?;

        let is_toml = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("toml"))
            .unwrap_or(false);

        let dictionary = if is_toml {
            Self::from_toml_str(&content)
        } else {
            Self::from_json_str(&content)
        }
        .map_err(|e| Error::Dictionary(format!("{}: {}", path.display(), e)))?;

        info!(
            "Reference dictionary loaded from {}: {} brands, {} models",
            path.display(),
            dictionary.brand_count(),
            dictionary.model_count()
        );
        Ok(dictionary)
    }

    /// Parse a JSON dictionary source
    pub fn from_json_str(content: &str) -> Result<Self> {
        let source: DictionarySource = serde_json::from_str(content)?;
        Self::from_brands(source.brands)
    }

    /// Parse a TOML dictionary source (`[brands]` table)
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let source: DictionarySource = toml::from_str(content)?;
        Self::from_brands(source.brands)
    }

    /// Build from brand → model names
    ///
    /// Names are trimmed and lowercased. Brands that collide after
    /// lowercasing have their model lists merged. Empty names are rejected.
    pub fn from_brands<I, B, M, S>(brands: I) -> Result<Self>
    where
        I: IntoIterator<Item = (B, M)>,
        B: AsRef<str>,
        M: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dictionary = Self::default();

        for (brand, models) in brands {
            let brand = normalize_name(brand.as_ref())
                .ok_or_else(|| Error::Dictionary("Empty brand name".to_string()))?;

            let entry = dictionary.brands.entry(brand.clone()).or_default();
            for model in models {
                let model = normalize_name(model.as_ref()).ok_or_else(|| {
                    Error::Dictionary(format!("Empty model name under brand '{}'", brand))
                })?;
                if !entry.contains(&model) {
                    dictionary.model_names.insert(model.clone());
                    entry.push(model);
                }
            }
            dictionary.brand_names.insert(brand);
        }

        Ok(dictionary)
    }

    /// Is `word` a known brand (case-insensitive)?
    pub fn is_brand(&self, word: &str) -> bool {
        self.brand_names.contains(&word.to_lowercase())
    }

    /// Is `word` a known model (case-insensitive)?
    pub fn is_model(&self, word: &str) -> bool {
        self.model_names.contains(&word.to_lowercase())
    }

    /// Is `word` a known brand or model (case-insensitive)?
    pub fn is_known(&self, word: &str) -> bool {
        let word = word.to_lowercase();
        self.brand_names.contains(&word) || self.model_names.contains(&word)
    }

    /// Models of `brand`, in source order; empty for an unknown brand
    pub fn models_of(&self, brand: &str) -> &[String] {
        self.brands
            .get(&brand.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All brand names, lowercase
    pub fn brand_names(&self) -> &HashSet<String> {
        &self.brand_names
    }

    /// All model names across brands, lowercase
    pub fn model_names(&self) -> &HashSet<String> {
        &self.model_names
    }

    pub fn brand_count(&self) -> usize {
        self.brand_names.len()
    }

    pub fn model_count(&self) -> usize {
        self.model_names.len()
    }
}

fn normalize_name(name: &str) -> Option<String> {
    let name = name.trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ReferenceDictionary {
        ReferenceDictionary::from_json_str(
            r#"{"brands": {"Toyota": ["Camry", "Corolla", "camry"], "Mini": ["Cooper"], "BMW": ["328i", "Mini"]}}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_lookups_are_case_insensitive() {
        let dict = sample();
        assert!(dict.is_brand("TOYOTA"));
        assert!(dict.is_brand("toyota"));
        assert!(dict.is_model("CaMrY"));
        assert!(!dict.is_model("toyota"));
        assert!(dict.is_known("Cooper"));
        assert!(!dict.is_known("civic"));
    }

    #[test]
    fn test_models_keep_order_and_collapse_duplicates() {
        let dict = sample();
        assert_eq!(dict.models_of("Toyota"), &["camry".to_string(), "corolla".to_string()]);
        assert!(dict.models_of("honda").is_empty());
    }

    #[test]
    fn test_name_in_both_sets() {
        let dict = sample();
        assert!(dict.is_brand("mini"));
        assert!(dict.is_model("mini"));
        assert_eq!(dict.models_of("bmw"), &["328i".to_string(), "mini".to_string()]);
    }

    #[test]
    fn test_counts() {
        let dict = sample();
        assert_eq!(dict.brand_count(), 3);
        assert_eq!(dict.model_count(), 5);
    }

    #[test]
    fn test_missing_brands_field_is_error() {
        let result = ReferenceDictionary::from_json_str(r#"{"makes": {}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_model_name_is_error() {
        let result = ReferenceDictionary::from_json_str(r#"{"brands": {"ford": ["  "]}}"#);
        assert!(matches!(result, Err(Error::Dictionary(_))));
    }

    #[test]
    fn test_toml_source() {
        let dict = ReferenceDictionary::from_toml_str(
            "[brands]\nhonda = [\"Civic\", \"Accord\"]\n",
        )
        .unwrap();
        assert!(dict.is_brand("Honda"));
        assert_eq!(dict.models_of("honda").len(), 2);
    }
}
