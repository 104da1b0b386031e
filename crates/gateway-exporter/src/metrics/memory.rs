use std::collections::BTreeMap;
use std::sync::Mutex;

use super::Metric;
use super::MetricSink;

type SeriesKey = (Metric, Vec<String>);

/// In-memory sink with the same last-write-wins semantics as the Prometheus
/// one, for driving the pipeline without an exposition layer.
#[derive(Debug, Default)]
pub struct MemorySink {
    series: Mutex<BTreeMap<SeriesKey, f64>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, metric: Metric, label_values: &[&str]) -> Option<f64> {
        let key = (
            metric,
            label_values.iter().map(|v| v.to_string()).collect(),
        );
        self.series.lock().expect("poisoned").get(&key).copied()
    }

    /// Number of distinct series written so far
    pub fn len(&self) -> usize {
        self.series.lock().expect("poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of every series, ordered by metric then label values
    pub fn snapshot(&self) -> Vec<(Metric, Vec<String>, f64)> {
        self.series
            .lock()
            .expect("poisoned")
            .iter()
            .map(|((metric, labels), value)| (*metric, labels.clone(), *value))
            .collect()
    }
}

impl MetricSink for MemorySink {
    fn observe(&self, metric: Metric, label_values: &[&str], value: f64) {
        let key = (
            metric,
            label_values.iter().map(|v| v.to_string()).collect(),
        );
        self.series.lock().expect("poisoned").insert(key, value);
    }
}
