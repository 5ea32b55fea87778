use analysis_core::{CanonicalMetric, Observation, RawFacts};
use serde::{Deserialize, Serialize};

/// Time series of one metric: newest first, one entry per period end,
/// 10-K/10-Q observations only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricSeries {
    observations: Vec<Observation>,
}

impl MetricSeries {
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Observation> {
        self.observations.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.observations.iter()
    }
}

impl<'a> IntoIterator for &'a MetricSeries {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.observations.iter()
    }
}

/// Concepts to try for a metric name. Unknown names are used as the concept itself.
pub fn concepts_for(metric_name: &str) -> Vec<&str> {
    match CanonicalMetric::from_name(metric_name) {
        Some(metric) => metric.concepts().to_vec(),
        None => vec![metric_name],
    }
}

/// Build the series for a canonical metric name from raw company facts.
///
/// Absent or malformed concepts are skipped. An empty series means no usable data.
pub fn extract(facts: &RawFacts, metric_name: &str) -> MetricSeries {
    let concepts = concepts_for(metric_name);

    let mut observations: Vec<Observation> = Vec::new();
    for concept in &concepts {
        match facts.usd_observations(concept) {
            Some(found) => observations.extend(found),
            None => tracing::trace!("{}: concept {} not available", metric_name, concept),
        }
    }

    observations.retain(|o| o.form.is_periodic_report());

    // Stable: on equal end dates the earlier-preferred concept stays in front
    observations.sort_by(|a, b| b.end.cmp(&a.end));
    observations.dedup_by_key(|o| o.end);

    if !observations.is_empty() {
        let mut sources: Vec<&str> = Vec::new();
        for o in &observations {
            if !sources.contains(&o.source_concept.as_str()) {
                sources.push(&o.source_concept);
            }
        }
        tracing::debug!(
            "{}: {} periods using {}",
            metric_name,
            observations.len(),
            sources.join(", ")
        );
    }

    MetricSeries { observations }
}

pub fn extract_metric(facts: &RawFacts, metric: CanonicalMetric) -> MetricSeries {
    extract(facts, metric.as_str())
}
