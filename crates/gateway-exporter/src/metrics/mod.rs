//! Metric schema and the write interface the scrape pipeline reports through.
//!
//! Every metric has a fixed set of label keys declared here once. The
//! exposition format requires all series of one metric to carry the same
//! keys, so translation only ever supplies label *values* in schema order.

use derive_more::Display;

pub mod memory;
pub mod registry;
pub mod translate;

pub use memory::MemorySink;
pub use registry::PrometheusSink;
pub use translate::translate;

/// Prefix shared by every exported metric name
pub const NAMESPACE: &str = "tmobile_gateway";

/// Technology tag used in the `type` label for LTE readings
pub const TECH_4G: &str = "4g";
/// Technology tag used in the `type` label for NR readings
pub const TECH_5G: &str = "5g";

/// Every gauge this exporter publishes.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Metric {
    #[display("gateway_up")]
    Up,
    #[display("uptime_seconds")]
    UptimeSeconds,
    /// Presence marker, value is always 1
    #[display("software_info")]
    SoftwareInfo,
    /// Presence marker, value is always 1
    #[display("hardware_info")]
    HardwareInfo,
    #[display("channel_id")]
    ChannelId,
    #[display("rsrp")]
    Rsrp,
    #[display("rsrq")]
    Rsrq,
    #[display("rssi")]
    Rssi,
    #[display("snr")]
    Snr,
    #[display("bars")]
    Bars,
}

impl Metric {
    pub const ALL: [Metric; 10] = [
        Metric::Up,
        Metric::UptimeSeconds,
        Metric::SoftwareInfo,
        Metric::HardwareInfo,
        Metric::ChannelId,
        Metric::Rsrp,
        Metric::Rsrq,
        Metric::Rssi,
        Metric::Snr,
        Metric::Bars,
    ];

    /// Per-band radio metrics, emitted once per active band per technology
    pub const RADIO: [Metric; 6] = [
        Metric::ChannelId,
        Metric::Rsrp,
        Metric::Rsrq,
        Metric::Rssi,
        Metric::Snr,
        Metric::Bars,
    ];

    /// Name without the namespace prefix
    pub fn name(self) -> String {
        self.to_string()
    }

    /// Name as it appears in the exposition output
    pub fn full_name(self) -> String {
        format!("{NAMESPACE}_{self}")
    }

    pub fn help(self) -> &'static str {
        match self {
            Metric::Up => "Gateway is able to be scraped",
            Metric::UptimeSeconds => "How many seconds a gateway has been continuously powered on.",
            Metric::SoftwareInfo => "Gateway software information",
            Metric::HardwareInfo => "Gateway hardware information",
            Metric::ChannelId => "Cellular channel number",
            Metric::Rsrp => "Cellular reference signal RX power",
            Metric::Rsrq => "Cellular reference signal RX quality",
            Metric::Rssi => "Cellular received signal strength indicator",
            Metric::Snr => "Cellular signal to noise ratio",
            Metric::Bars => "Cellular signal strength in bars",
        }
    }

    /// Label keys in the order label values must be supplied
    pub fn label_names(self) -> &'static [&'static str] {
        match self {
            Metric::Up => &[],
            Metric::UptimeSeconds => &["serial"],
            Metric::SoftwareInfo => &["serial", "version"],
            Metric::HardwareInfo => &["serial", "name", "model", "version"],
            Metric::ChannelId
            | Metric::Rsrp
            | Metric::Rsrq
            | Metric::Rssi
            | Metric::Snr
            | Metric::Bars => &["type", "band"],
        }
    }
}

/// One labeled data point produced by a scrape.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub metric: Metric,
    /// Values for [`Metric::label_names`], same order and length
    pub label_values: Vec<String>,
    pub value: f64,
}

impl Observation {
    pub fn new<I, S>(metric: Metric, label_values: I, value: f64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            metric,
            label_values: label_values.into_iter().map(Into::into).collect(),
            value,
        }
    }
}

/// Write side of the process-wide metric registry.
///
/// Implementations keep the latest value per (metric, label values) and must
/// be safe to write from the scraper while the server reads concurrently.
pub trait MetricSink: Send + Sync {
    fn observe(&self, metric: Metric, label_values: &[&str], value: f64);

    fn record(&self, observation: &Observation) {
        let label_values: Vec<&str> = observation.label_values.iter().map(String::as_str).collect();
        self.observe(observation.metric, &label_values, observation.value);
    }
}
