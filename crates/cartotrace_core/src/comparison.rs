use std::fmt;

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{MapAccess, Visitor},
    ser::SerializeMap,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmMetrics {
    pub distance: f64,

    /// Elapsed time, in `time_unit` when the service reports one
    pub time: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_display: Option<String>,

    pub operations: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_unit: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodes: Option<u64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub route: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Distance,
    Time,
    Operations,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Distance, Metric::Time, Metric::Operations];

    pub fn value(&self, metrics: &AlgorithmMetrics) -> f64 {
        match self {
            Metric::Distance => metrics.distance,
            Metric::Time => metrics.time,
            Metric::Operations => metrics.operations as f64,
        }
    }

    pub fn chart_title(&self) -> &'static str {
        match self {
            Metric::Distance => "Distance (km)",
            Metric::Time => "Time (s)",
            Metric::Operations => "Operations",
        }
    }

    pub fn column_title(&self) -> &'static str {
        match self {
            Metric::Distance => "Distance (km)",
            Metric::Time => "Time",
            Metric::Operations => "Operations",
        }
    }
}

/// One comparison run: algorithm label to metrics, in the order the service sent them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComparisonResult {
    entries: Vec<(String, AlgorithmMetrics)>,
}

impl ComparisonResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the metrics of an already present label in place.
    pub fn insert(&mut self, label: impl Into<String>, metrics: AlgorithmMetrics) {
        let label = label.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == label) {
            Some((_, existing)) => *existing = metrics,
            None => self.entries.push((label, metrics)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AlgorithmMetrics)> {
        self.entries
            .iter()
            .map(|(label, metrics)| (label.as_str(), metrics))
    }

    pub fn get(&self, label: &str) -> Option<&AlgorithmMetrics> {
        self.iter()
            .find(|(existing, _)| *existing == label)
            .map(|(_, metrics)| metrics)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lowest value of the metric; every metric is lower-is-better.
    pub fn best(&self, metric: Metric) -> Option<f64> {
        self.iter()
            .map(|(_, metrics)| metric.value(metrics))
            .fold(None, |best, value| match best {
                Some(best) if best <= value => Some(best),
                _ => Some(value),
            })
    }

    pub fn max(&self, metric: Metric) -> Option<f64> {
        self.iter()
            .map(|(_, metrics)| metric.value(metrics))
            .fold(None, |max, value| match max {
                Some(max) if max >= value => Some(max),
                _ => Some(value),
            })
    }
}

impl<L: Into<String>> FromIterator<(L, AlgorithmMetrics)> for ComparisonResult {
    fn from_iter<T: IntoIterator<Item = (L, AlgorithmMetrics)>>(iter: T) -> Self {
        let mut result = ComparisonResult::new();
        for (label, metrics) in iter {
            result.insert(label, metrics);
        }
        result
    }
}

impl Serialize for ComparisonResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, metrics) in &self.entries {
            map.serialize_entry(label, metrics)?;
        }
        map.end()
    }
}

struct ComparisonResultVisitor;

impl<'de> Visitor<'de> for ComparisonResultVisitor {
    type Value = ComparisonResult;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of algorithm label to metrics")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut result = ComparisonResult::new();
        while let Some((label, metrics)) = access.next_entry::<String, AlgorithmMetrics>()? {
            result.insert(label, metrics);
        }
        Ok(result)
    }
}

impl<'de> Deserialize<'de> for ComparisonResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ComparisonResultVisitor)
    }
}
