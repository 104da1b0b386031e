use super::Metric;
use super::Observation;
use super::TECH_4G;
use super::TECH_5G;
use crate::gateway::types::Radio;
use crate::gateway::StatusDocument;

/// Flatten one status document into gauge observations.
///
/// Device identity is carried in labels of the `*_info` gauges whose value is
/// always 1. Radio readings are per technology, not per band, but each one is
/// repeated under every currently active band so a reading can be correlated
/// with the band set it was taken on. A technology with no active bands
/// produces no radio observations at all.
pub fn translate(status: &StatusDocument) -> Vec<Observation> {
    let device = &status.device;
    let serial = device.serial.as_str();

    let mut observations = vec![
        Observation::new(
            Metric::UptimeSeconds,
            [serial],
            status.time.up_time as f64,
        ),
        Observation::new(
            Metric::SoftwareInfo,
            [serial, device.software_version.as_str()],
            1.0,
        ),
        Observation::new(
            Metric::HardwareInfo,
            [
                serial,
                device.name.as_str(),
                device.model.as_str(),
                device.hardware_version.as_str(),
            ],
            1.0,
        ),
    ];

    radio_observations(TECH_4G, &status.signal.four_g, &mut observations);
    radio_observations(TECH_5G, &status.signal.five_g, &mut observations);

    observations
}

fn radio_observations(tech: &str, radio: &Radio, out: &mut Vec<Observation>) {
    // same order as Metric::RADIO
    let readings = [
        radio.cid,
        radio.rsrp,
        radio.rsrq,
        radio.rssi,
        radio.sinr,
        radio.bars,
    ];

    for band in &radio.bands {
        for (metric, value) in Metric::RADIO.into_iter().zip(readings) {
            out.push(Observation::new(metric, [tech, band.as_str()], value as f64));
        }
    }
}
