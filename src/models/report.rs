// Nested category -> metric report and its merged (flat) view

use indexmap::IndexMap;
use serde::Serialize;

use super::Metric;
use crate::metrics::Category;

/// Five fixed categories, each an ordered mapping of metrics.
/// Insertion order is the declared order of [`crate::metrics::MetricName::ALL`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Report {
    categories: IndexMap<String, IndexMap<String, Metric>>,
}

impl Default for Report {
    fn default() -> Self {
        Self::new()
    }
}

impl Report {
    /// Empty report with all five categories present.
    pub fn new() -> Self {
        let categories = Category::ALL
            .iter()
            .map(|c| (c.as_str().to_string(), IndexMap::new()))
            .collect();
        Self { categories }
    }

    pub(crate) fn insert(&mut self, category: Category, key: &str, value: Metric) {
        self.categories
            .entry(category.as_str().to_string())
            .or_default()
            .insert(key.to_string(), value);
    }

    pub fn category(&self, category: Category) -> Option<&IndexMap<String, Metric>> {
        self.categories.get(category.as_str())
    }

    pub fn get(&self, category: Category, key: &str) -> Option<&Metric> {
        self.category(category)?.get(key)
    }

    pub fn categories(&self) -> impl Iterator<Item = (&str, &IndexMap<String, Metric>)> {
        self.categories.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Category and metric names in order, without values. Two reports of the
    /// same machine always share this shape even when readings drift.
    pub fn shape(&self) -> Vec<(String, Vec<String>)> {
        self.categories
            .iter()
            .map(|(name, metrics)| (name.clone(), metrics.keys().cloned().collect()))
            .collect()
    }

    /// Flat view: `<category><CapitalizedMetric>`, e.g. `cpuCores`, `ramTotal`.
    pub fn merged(&self) -> IndexMap<String, Metric> {
        let mut merged = IndexMap::new();
        for (category, metrics) in &self.categories {
            for (key, value) in metrics {
                merged.insert(merged_key(category, key), value.clone());
            }
        }
        merged
    }
}

pub fn merged_key(category: &str, key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => format!("{}{}{}", category, first.to_ascii_uppercase(), chars.as_str()),
        None => category.to_string(),
    }
}
