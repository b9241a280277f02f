// Entity Fusion - Reconcile Tagger Output with the Reference Dictionary
//
// Step 1 (relabel): known brand → CAR_BRAND, else known model → CAR_MODEL,
//                   else keep the tagger label. Brand wins ties.
// Step 2 (back-fill): whitespace words of the raw sentence that are known
//                   brands/models and not yet mentioned are appended with
//                   score 1.0.
// Mentions are never removed here.

pub mod lexicon_match;

use crate::types::{EntityGroup, EntityMention};
use carlex_common::ReferenceDictionary;
use tracing::debug;

pub use lexicon_match::{backfill_absent, lexicon_candidates, present_forms, SurfaceForm};

/// Force car labels on mentions the dictionary knows
///
/// # Returns
/// * Number of mentions whose label changed
pub fn relabel(mentions: &mut [EntityMention], dictionary: &ReferenceDictionary) -> usize {
    let mut changed = 0;
    for mention in mentions.iter_mut() {
        let group = if dictionary.is_brand(&mention.word) {
            EntityGroup::CarBrand
        } else if dictionary.is_model(&mention.word) {
            EntityGroup::CarModel
        } else {
            continue;
        };
        if mention.entity_group != group {
            mention.entity_group = group;
            changed += 1;
        }
    }
    changed
}

/// Fuse tagger mentions with dictionary matches for one sentence
///
/// # Arguments
/// * `raw_sentence` - Original sentence text
/// * `mentions` - Tagger mentions (already lowercased)
/// * `dictionary` - Reference dictionary
///
/// # Returns
/// * Relabeled tagger mentions first, then back-filled mentions in discovery
///   order
pub fn fuse_mentions(
    raw_sentence: &str,
    mut mentions: Vec<EntityMention>,
    dictionary: &ReferenceDictionary,
) -> Vec<EntityMention> {
    let relabeled = relabel(&mut mentions, dictionary);

    let candidates = lexicon_candidates(raw_sentence.split_whitespace(), dictionary);
    let added = backfill_absent(&mut mentions, candidates, EntityMention::synthesized);

    debug!(
        "Fusion: {} relabeled, {} back-filled, {} total",
        relabeled,
        added,
        mentions.len()
    );
    mentions
}
