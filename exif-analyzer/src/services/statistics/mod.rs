//! Photography statistics
//!
//! Reduces the extracted [`FileRecord`]s into ranked frequency tables. Runs
//! once, single-threaded, after every extraction has finished.
//!
//! A record only counts towards the tables whose attribute it has; the
//! per-lens tables additionally need a lens. Lens names go through
//! [`LensNormalizer`] first, so every lens-keyed table uses the same
//! canonical names.

pub mod frequency;

pub use frequency::{percentage, FrequencyTable, GroupedFrequencyTable, RankedEntry};

use super::lens_normalizer::LensNormalizer;
use crate::models::{Aperture, FileRecord, FocalLength, Iso, ShutterSpeed};

/// Entries shown per table in the report
pub const TOP_N: usize = 10;

/// All statistics for one run
#[derive(Debug, Clone, Default)]
pub struct PhotoStatistics {
    /// Records the statistics were computed from
    pub total_photos: usize,
    pub cameras: FrequencyTable<String>,
    pub lenses: FrequencyTable<String>,
    pub iso_values: FrequencyTable<Iso>,
    pub shutter_speeds: FrequencyTable<ShutterSpeed>,
    pub apertures: FrequencyTable<Aperture>,
    pub focal_lengths: FrequencyTable<FocalLength>,
    pub apertures_by_lens: GroupedFrequencyTable<Aperture>,
    pub focal_lengths_by_lens: GroupedFrequencyTable<FocalLength>,
}

impl PhotoStatistics {
    /// Compute every table from `records`
    ///
    /// The result does not depend on the order of `records`.
    pub fn from_records(records: &[FileRecord]) -> Self {
        let normalizer =
            LensNormalizer::from_names(records.iter().filter_map(|r| r.lens.as_deref()));

        // Canonical lens per record, computed once and shared by the lens tables
        let lenses: Vec<Option<String>> = records
            .iter()
            .map(|r| r.lens.as_deref().map(|name| normalizer.canonical(name)))
            .collect();

        let stats = Self {
            total_photos: records.len(),
            cameras: records.iter().filter_map(|r| r.camera.clone()).collect(),
            lenses: lenses.iter().flatten().cloned().collect(),
            iso_values: records.iter().filter_map(|r| r.iso).collect(),
            shutter_speeds: records.iter().filter_map(|r| r.shutter_speed.clone()).collect(),
            apertures: records.iter().filter_map(|r| r.aperture).collect(),
            focal_lengths: records.iter().filter_map(|r| r.focal_length).collect(),
            apertures_by_lens: records
                .iter()
                .zip(&lenses)
                .filter_map(|(r, lens)| Some((lens.clone()?, r.aperture?)))
                .collect(),
            focal_lengths_by_lens: records
                .iter()
                .zip(&lenses)
                .filter_map(|(r, lens)| Some((lens.clone()?, r.focal_length?)))
                .collect(),
        };

        tracing::debug!(
            photos = stats.total_photos,
            cameras = stats.cameras.len(),
            lenses = normalizer.group_count(),
            "Statistics computed"
        );

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(lens: Option<&str>, aperture: Option<f64>) -> FileRecord {
        FileRecord {
            lens: lens.map(str::to_string),
            aperture: aperture.and_then(Aperture::new),
            ..FileRecord::new("x.CR3")
        }
    }

    #[test]
    fn test_aperture_by_lens_example() {
        let mut records = Vec::new();
        records.extend((0..3).map(|_| record(Some("A"), Some(4.0))));
        records.extend((0..2).map(|_| record(Some("A"), Some(5.6))));
        records.extend((0..5).map(|_| record(Some("B"), Some(8.0))));

        let stats = PhotoStatistics::from_records(&records);

        let a = stats.apertures_by_lens.get("A").unwrap();
        let ranked: Vec<_> = a
            .ranked()
            .iter()
            .map(|e| (e.value.to_string(), e.count, format!("{:.1}", e.percentage)))
            .collect();
        assert_eq!(
            ranked,
            vec![
                ("f/4.0".to_string(), 3, "60.0".to_string()),
                ("f/5.6".to_string(), 2, "40.0".to_string()),
            ]
        );

        let b = stats.apertures_by_lens.get("B").unwrap();
        let top = b.top(TOP_N);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].value.to_string(), "f/8.0");
        assert_eq!(top[0].count, 5);
        assert_eq!(format!("{:.1}", top[0].percentage), "100.0");
    }

    #[test]
    fn test_missing_attributes_are_excluded() {
        let records = vec![
            record(Some("A"), Some(4.0)),
            record(Some("A"), None),
            record(None, Some(2.8)),
            record(None, None),
        ];

        let stats = PhotoStatistics::from_records(&records);

        assert_eq!(stats.total_photos, 4);
        assert_eq!(stats.lenses.total(), 2);
        assert_eq!(stats.apertures.total(), 2);
        // Only the record with both lens and aperture is grouped
        assert_eq!(stats.apertures_by_lens.total(), 1);
        assert!(stats.cameras.is_empty());
    }

    #[test]
    fn test_lens_spellings_are_merged() {
        let records = vec![
            record(Some("Lumix G Vario"), Some(4.0)),
            record(Some("LUMIX  G VARIO"), Some(5.6)),
            record(Some("Lumix G Vario"), Some(4.0)),
        ];

        let stats = PhotoStatistics::from_records(&records);

        assert_eq!(stats.lenses.len(), 1);
        assert_eq!(stats.lenses.count(&"Lumix G Vario".to_string()), 3);
        assert_eq!(stats.apertures_by_lens.len(), 1);
        assert_eq!(stats.apertures_by_lens.get("Lumix G Vario").unwrap().total(), 3);
    }

    #[test]
    fn test_order_independent() {
        let mut records = vec![
            record(Some("B"), Some(8.0)),
            record(Some("A"), Some(4.0)),
            record(Some("a"), Some(5.6)),
            record(Some("C"), Some(2.0)),
        ];
        let forward = PhotoStatistics::from_records(&records);
        records.reverse();
        let backward = PhotoStatistics::from_records(&records);

        assert_eq!(forward.lenses, backward.lenses);
        assert_eq!(forward.apertures_by_lens, backward.apertures_by_lens);
        assert_eq!(forward.apertures, backward.apertures);
    }
}
