//! Prometheus-backed metric sink

use std::collections::HashMap;

use prometheus::Encoder;
use prometheus::GaugeVec;
use prometheus::Opts;
use prometheus::Registry;
use prometheus::TextEncoder;

use super::Metric;
use super::MetricSink;
use super::NAMESPACE;

/// Gauges for every [`Metric`], registered in a registry owned by this sink.
///
/// Each labeled series is an independent atomic gauge, so writes from the
/// scraper never block a concurrent `/metrics` render for longer than a
/// single series lookup.
pub struct PrometheusSink {
    registry: Registry,
    gauges: HashMap<Metric, GaugeVec>,
}

impl PrometheusSink {
    /// Create the sink and register the full metric schema
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();
        let mut gauges = HashMap::with_capacity(Metric::ALL.len());

        for metric in Metric::ALL {
            let gauge = GaugeVec::new(
                Opts::new(metric.name(), metric.help()).namespace(NAMESPACE),
                metric.label_names(),
            )?;
            registry.register(Box::new(gauge.clone()))?;
            gauges.insert(metric, gauge);
        }

        Ok(Self { registry, gauges })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Render every series in the text exposition format
    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }

    /// Current value of one series, if it has been written
    pub fn value(&self, metric: Metric, label_values: &[&str]) -> Option<f64> {
        let family = self
            .registry
            .gather()
            .into_iter()
            .find(|family| family.get_name() == metric.full_name())?;

        family
            .get_metric()
            .iter()
            .find(|series| {
                let labels = series.get_label();
                labels.len() == label_values.len()
                    && metric
                        .label_names()
                        .iter()
                        .zip(label_values)
                        .all(|(name, value)| {
                            labels
                                .iter()
                                .any(|pair| pair.get_name() == *name && pair.get_value() == *value)
                        })
            })
            .map(|series| series.get_gauge().get_value())
    }
}

impl MetricSink for PrometheusSink {
    fn observe(&self, metric: Metric, label_values: &[&str], value: f64) {
        let Some(gauge_vec) = self.gauges.get(&metric) else {
            tracing::error!(%metric, "Metric is not registered");
            return;
        };

        match gauge_vec.get_metric_with_label_values(label_values) {
            Ok(gauge) => gauge.set(value),
            Err(e) => {
                tracing::error!(%metric, ?label_values, "Failed to resolve series: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use similar_asserts::assert_eq;

    use super::*;

    #[test]
    fn registers_full_schema() {
        let sink = PrometheusSink::new().expect("should create sink");
        for metric in Metric::ALL {
            sink.observe(metric, &vec!["x"; metric.label_names().len()], 1.0);
        }

        let names: Vec<String> = sink
            .registry()
            .gather()
            .iter()
            .map(|family| family.get_name().to_string())
            .collect();
        for metric in Metric::ALL {
            assert!(
                names.contains(&metric.full_name()),
                "{} missing from registry",
                metric.full_name()
            );
        }
    }

    #[test]
    fn last_write_wins_per_series() {
        let sink = PrometheusSink::new().expect("should create sink");

        sink.observe(Metric::Rsrp, &["4g", "b2"], -100.0);
        sink.observe(Metric::Rsrp, &["4g", "b66"], -95.0);
        sink.observe(Metric::Rsrp, &["4g", "b2"], -90.0);

        assert_eq!(sink.value(Metric::Rsrp, &["4g", "b2"]), Some(-90.0));
        assert_eq!(sink.value(Metric::Rsrp, &["4g", "b66"]), Some(-95.0));
        assert_eq!(sink.value(Metric::Rsrp, &["5g", "b2"]), None);
    }

    #[test]
    fn wrong_label_arity_is_dropped() {
        let sink = PrometheusSink::new().expect("should create sink");

        sink.observe(Metric::UptimeSeconds, &["S1", "extra"], 10.0);

        assert_eq!(sink.value(Metric::UptimeSeconds, &["S1"]), None);
    }

    #[test]
    fn encodes_text_exposition() {
        let sink = PrometheusSink::new().expect("should create sink");
        sink.observe(Metric::Up, &[], 1.0);
        sink.observe(Metric::UptimeSeconds, &["S1"], 3600.0);
        sink.observe(Metric::Rsrp, &["4g", "B2"], -90.0);

        let text = sink.encode().expect("should encode");

        assert!(text.contains("# HELP tmobile_gateway_gateway_up Gateway is able to be scraped"));
        assert!(text.contains("# TYPE tmobile_gateway_uptime_seconds gauge"));
        assert!(text.contains("tmobile_gateway_gateway_up 1"));
        assert!(text.contains("tmobile_gateway_uptime_seconds{serial=\"S1\"} 3600"));
        assert!(text.contains("tmobile_gateway_rsrp{band=\"B2\",type=\"4g\"} -90"));
    }
}
