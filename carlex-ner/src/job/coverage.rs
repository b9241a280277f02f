// Entity Coverage - Unique Car Names Seen Across a File
//
// Aggregates section outputs into the set of distinct brand and model surface
// forms. Used for the per-file summary log line.

use crate::fusion::present_forms;
use crate::types::{EntityGroup, SectionOutput};
use std::collections::BTreeSet;

/// Distinct car brand and model forms detected
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityCoverage {
    pub brands: BTreeSet<String>,
    pub models: BTreeSet<String>,
}

impl EntityCoverage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the car mentions of one section
    pub fn observe(&mut self, section: &SectionOutput) {
        let of_group = |group: EntityGroup| {
            present_forms(section.mentions().filter(move |m| m.entity_group == group))
        };
        self.brands.extend(of_group(EntityGroup::CarBrand));
        self.models.extend(of_group(EntityGroup::CarModel));
    }

    pub fn merge(&mut self, other: EntityCoverage) {
        self.brands.extend(other.brands);
        self.models.extend(other.models);
    }

    pub fn brand_count(&self) -> usize {
        self.brands.len()
    }

    pub fn model_count(&self) -> usize {
        self.models.len()
    }
}
