// Lexicon Matching - Dictionary Lookup over Mention Collections
//
// Scan existing mentions → lowercase present-set → append dictionary hits that
// are absent. Shared by sentence fusion and by output aggregation.

use crate::types::{EntityGroup, EntityMention};
use carlex_common::ReferenceDictionary;
use std::collections::HashSet;

/// Anything that carries a surface form
pub trait SurfaceForm {
    fn surface(&self) -> &str;
}

impl SurfaceForm for EntityMention {
    fn surface(&self) -> &str {
        &self.word
    }
}

/// Lowercased surface forms present in `mentions`
pub fn present_forms<'a, M, I>(mentions: I) -> HashSet<String>
where
    M: SurfaceForm + 'a,
    I: IntoIterator<Item = &'a M>,
{
    mentions
        .into_iter()
        .map(|m| m.surface().to_lowercase())
        .collect()
}

/// Dictionary hits among `words`
///
/// Returns brand hits in discovery order, then model hits in discovery order,
/// each form once. A form that is both a brand and a model is only reported as
/// a brand.
pub fn lexicon_candidates<'w, I>(words: I, dictionary: &ReferenceDictionary) -> Vec<(String, EntityGroup)>
where
    I: IntoIterator<Item = &'w str>,
{
    let words: Vec<String> = words.into_iter().map(str::to_lowercase).collect();
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    let brands = words
        .iter()
        .filter(|w| dictionary.brand_names().contains(*w))
        .map(|w| (w, EntityGroup::CarBrand));
    let models = words
        .iter()
        .filter(|w| dictionary.model_names().contains(*w))
        .map(|w| (w, EntityGroup::CarModel));

    for (word, group) in brands.chain(models) {
        if seen.insert(word.clone()) {
            candidates.push((word.clone(), group));
        }
    }
    candidates
}

/// Append each candidate whose form is not yet present
///
/// `synthesize` builds the new element. Returns the number appended.
pub fn backfill_absent<M, I, F>(mentions: &mut Vec<M>, candidates: I, mut synthesize: F) -> usize
where
    M: SurfaceForm,
    I: IntoIterator<Item = (String, EntityGroup)>,
    F: FnMut(&str, EntityGroup) -> M,
{
    let mut present = present_forms(mentions.iter());
    let mut added = 0;

    for (word, group) in candidates {
        let key = word.to_lowercase();
        if present.contains(&key) {
            continue;
        }
        mentions.push(synthesize(&key, group));
        present.insert(key);
        added += 1;
    }
    added
}
