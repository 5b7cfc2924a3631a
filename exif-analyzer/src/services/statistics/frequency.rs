//! Frequency tables and ranking
//!
//! A table counts occurrences of category values. Ranking orders entries by
//! count, most frequent first; equal counts fall back to the value's own
//! ordering (alphabetical for names, numeric for exposure values), so the
//! result never depends on the order records were counted in.

use std::collections::BTreeMap;

/// Percentage of `count` in `total`, 0.0 for an empty table
pub fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

/// One ranked table row
#[derive(Debug, Clone, PartialEq)]
pub struct RankedEntry<'a, K> {
    /// 1-based position in the full ranking
    pub rank: usize,
    pub value: &'a K,
    pub count: usize,
    /// Share of the table total, 0-100
    pub percentage: f64,
}

/// Occurrence counts of category values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable<K: Ord> {
    counts: BTreeMap<K, usize>,
    total: usize,
}

impl<K: Ord> Default for FrequencyTable<K> {
    fn default() -> Self {
        Self {
            counts: BTreeMap::new(),
            total: 0,
        }
    }
}

impl<K: Ord> FromIterator<K> for FrequencyTable<K> {
    fn from_iter<I: IntoIterator<Item = K>>(values: I) -> Self {
        let mut counts = BTreeMap::new();
        let mut total = 0;
        for value in values {
            *counts.entry(value).or_insert(0) += 1;
            total += 1;
        }
        Self { counts, total }
    }
}

impl<K: Ord> FrequencyTable<K> {
    /// Number of counted values (sum of all counts)
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of distinct values
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Occurrences of `value` (0 if never seen)
    pub fn count(&self, value: &K) -> usize {
        self.counts.get(value).copied().unwrap_or(0)
    }

    /// Every entry, most frequent first
    pub fn ranked(&self) -> Vec<RankedEntry<'_, K>> {
        let mut entries: Vec<(&K, usize)> = self.counts.iter().map(|(k, &c)| (k, c)).collect();
        // Stable sort: equal counts keep the map's ascending value order
        entries.sort_by(|a, b| b.1.cmp(&a.1));

        entries
            .into_iter()
            .enumerate()
            .map(|(index, (value, count))| RankedEntry {
                rank: index + 1,
                value,
                count,
                percentage: percentage(count, self.total),
            })
            .collect()
    }

    /// The `n` most frequent entries; percentages still use the full total
    pub fn top(&self, n: usize) -> Vec<RankedEntry<'_, K>> {
        let mut ranked = self.ranked();
        ranked.truncate(n);
        ranked
    }
}

/// Frequency tables partitioned by a grouping key (the lens name)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedFrequencyTable<K: Ord> {
    groups: BTreeMap<String, FrequencyTable<K>>,
}

impl<K: Ord> Default for GroupedFrequencyTable<K> {
    fn default() -> Self {
        Self {
            groups: BTreeMap::new(),
        }
    }
}

impl<K: Ord> FromIterator<(String, K)> for GroupedFrequencyTable<K> {
    fn from_iter<I: IntoIterator<Item = (String, K)>>(pairs: I) -> Self {
        let mut partitions: BTreeMap<String, Vec<K>> = BTreeMap::new();
        for (group, value) in pairs {
            partitions.entry(group).or_default().push(value);
        }

        let groups = partitions
            .into_iter()
            .map(|(group, values)| (group, values.into_iter().collect()))
            .collect();

        Self { groups }
    }
}

impl<K: Ord> GroupedFrequencyTable<K> {
    /// Groups in alphabetical order
    pub fn groups(&self) -> impl Iterator<Item = (&str, &FrequencyTable<K>)> {
        self.groups.iter().map(|(group, table)| (group.as_str(), table))
    }

    pub fn get(&self, group: &str) -> Option<&FrequencyTable<K>> {
        self.groups.get(group)
    }

    /// Sum of all group totals
    pub fn total(&self) -> usize {
        self.groups.values().map(FrequencyTable::total).sum()
    }

    /// Number of groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_and_total() {
        let table: FrequencyTable<&str> = ["a", "b", "a", "c", "a"].into_iter().collect();
        assert_eq!(table.total(), 5);
        assert_eq!(table.len(), 3);
        assert_eq!(table.count(&"a"), 3);
        assert_eq!(table.count(&"z"), 0);
    }

    #[test]
    fn test_ranking_ties_use_value_order() {
        let table: FrequencyTable<u32> = [800, 100, 400, 100, 800, 400].into_iter().collect();
        let ranked: Vec<_> = table.ranked().iter().map(|e| (*e.value, e.count, e.rank)).collect();
        assert_eq!(ranked, vec![(100, 2, 1), (400, 2, 2), (800, 2, 3)]);
    }

    #[test]
    fn test_top_keeps_full_total_percentages() {
        let values = (0..12u32).chain([0, 0, 0]);
        let table: FrequencyTable<u32> = values.collect();
        let top = table.top(10);

        assert_eq!(top.len(), 10);
        assert_eq!(*top[0].value, 0);
        assert_eq!(top[0].count, 4);
        assert!((top[0].percentage - 4.0 / 15.0 * 100.0).abs() < 1e-9);

        let sum: f64 = table.ranked().iter().map(|e| e.percentage).sum();
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_table() {
        let table: FrequencyTable<String> = FrequencyTable::default();
        assert!(table.is_empty());
        assert!(table.ranked().is_empty());
        assert_eq!(percentage(0, 0), 0.0);
    }

    #[test]
    fn test_grouped_table() {
        let pairs = vec![
            ("B".to_string(), 8u32),
            ("A".to_string(), 4),
            ("A".to_string(), 5),
            ("A".to_string(), 4),
        ];
        let grouped: GroupedFrequencyTable<u32> = pairs.into_iter().collect();

        let names: Vec<_> = grouped.groups().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(grouped.get("A").unwrap().count(&4), 2);
        assert_eq!(grouped.total(), 4);
        assert!(grouped.get("C").is_none());
    }
}
