//! Lens name normalization
//!
//! The same lens is often reported with different spelling across bodies and
//! firmware versions ("RF24-105mm F4 L IS USM" vs "RF24-105mm F4 L  IS USM",
//! "Lumix G Vario" vs "LUMIX G VARIO"). Names are grouped case-insensitively
//! with whitespace collapsed, and each group is shown under its most common
//! original spelling.

use std::collections::{BTreeMap, HashMap};

/// Comparison key for a lens name: lowercase, single spaces, trimmed
pub fn normalize_lens_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Maps every observed lens spelling to one canonical display name
#[derive(Debug, Clone, Default)]
pub struct LensNormalizer {
    canonical: HashMap<String, String>,
}

impl LensNormalizer {
    /// Build from every lens name observed in a run
    ///
    /// The canonical name of a group is its most frequent spelling; equally
    /// frequent spellings resolve to the alphabetically smallest.
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut variations: HashMap<String, BTreeMap<&'a str, usize>> = HashMap::new();
        for name in names {
            *variations
                .entry(normalize_lens_name(name))
                .or_default()
                .entry(name)
                .or_insert(0) += 1;
        }

        let canonical = variations
            .into_iter()
            .filter_map(|(normalized, spellings)| {
                // max_by_key returns the last maximum; iterate in reverse so
                // ties go to the smallest spelling
                spellings
                    .into_iter()
                    .rev()
                    .max_by_key(|&(_, count)| count)
                    .map(|(spelling, _)| (normalized, spelling.to_string()))
            })
            .collect();

        Self { canonical }
    }

    /// Canonical display name for `name`
    ///
    /// Names that were not part of the build set are returned unchanged.
    pub fn canonical(&self, name: &str) -> String {
        self.canonical
            .get(&normalize_lens_name(name))
            .cloned()
            .unwrap_or_else(|| name.to_string())
    }

    /// Number of distinct lenses after normalization
    pub fn group_count(&self) -> usize {
        self.canonical.len()
    }
}
