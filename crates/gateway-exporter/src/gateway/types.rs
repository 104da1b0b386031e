//! Wire types for the gateway `TMI/v1/gateway?get=all` document.
//!
//! The gateway omits empty fields, so every struct defaults missing keys to
//! their zero value. An explicit `null` decodes the same way as a missing key.
//! An absent `upTime` and a freshly booted device reporting `0` decode to the
//! same value.

use serde::Deserialize;
use serde::Deserializer;

/// Decode `null` as the type's zero value
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Full status snapshot returned by one fetch
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StatusDocument {
    #[serde(deserialize_with = "null_as_default")]
    pub device: Device,
    #[serde(deserialize_with = "null_as_default")]
    pub time: Time,
    #[serde(deserialize_with = "null_as_default")]
    pub signal: Signal,
}

/// Identity and inventory of the gateway itself
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Device {
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pub manufacturer: String,
    #[serde(rename = "manufacturerOUI", deserialize_with = "null_as_default")]
    pub manufacturer_oui: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub friendly_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub is_enabled: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub index: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub is_mesh_supported: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub hardware_version: String,
    #[serde(deserialize_with = "null_as_default")]
    pub software_version: String,
    #[serde(deserialize_with = "null_as_default")]
    pub model: String,
    #[serde(deserialize_with = "null_as_default")]
    pub serial: String,
    #[serde(deserialize_with = "null_as_default")]
    pub mac_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub update_state: String,
    #[serde(deserialize_with = "null_as_default")]
    pub role: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Time {
    /// Seconds since boot
    #[serde(deserialize_with = "null_as_default")]
    pub up_time: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub local_time: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub local_time_zone: String,
    #[serde(deserialize_with = "null_as_default")]
    pub daylight_savings: DaylightSavings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DaylightSavings {
    #[serde(deserialize_with = "null_as_default")]
    pub is_used: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Signal {
    #[serde(deserialize_with = "null_as_default")]
    pub generic: Generic,
    #[serde(rename = "4g", deserialize_with = "null_as_default")]
    pub four_g: Radio,
    #[serde(rename = "5g", deserialize_with = "null_as_default")]
    pub five_g: Radio,
}

/// Carrier-level connection details
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Generic {
    #[serde(deserialize_with = "null_as_default")]
    pub apn: String,
    #[serde(deserialize_with = "null_as_default")]
    pub roaming: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub registration: String,
    #[serde(rename = "hasIPv6", deserialize_with = "null_as_default")]
    pub has_ipv6: bool,
}

/// Radio state for one technology.
///
/// The 4G block names its base station `eNBID` and the 5G block `gNBID`.
/// Both keys are accepted in either block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Radio {
    #[serde(rename = "eNBID", deserialize_with = "null_as_default")]
    pub enb_id: i64,
    #[serde(rename = "gNBID", deserialize_with = "null_as_default")]
    pub gnb_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub cid: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub sinr: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub rsrp: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub rsrq: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub rssi: i64,
    /// Currently active frequency bands, e.g. `["b2", "b66"]`
    #[serde(deserialize_with = "null_as_default")]
    pub bands: Vec<String>,
    /// Coarse 0-5 strength indicator
    #[serde(deserialize_with = "null_as_default")]
    pub bars: i64,
}

#[cfg(test)]
mod tests {
    use similar_asserts::assert_eq;

    use super::*;

    const FULL_STATUS: &str = r#"{
        "device": {
            "friendlyName": "5G Gateway",
            "hardwareVersion": "R01",
            "index": 1,
            "isEnabled": true,
            "isMeshSupported": true,
            "macId": "AA:BB:CC:DD:EE:FF",
            "manufacturer": "Arcadyan",
            "manufacturerOUI": "001A2B",
            "model": "KVD21",
            "name": "5G Gateway",
            "role": "gateway",
            "serial": "ABC123",
            "softwareVersion": "1.2103.00.0338",
            "type": "HSID",
            "updateState": "latest"
        },
        "signal": {
            "4g": {
                "bands": ["b2"],
                "bars": 4,
                "cid": 12,
                "eNBID": 310463,
                "rsrp": -98,
                "rsrq": -11,
                "rssi": -86,
                "sinr": 9
            },
            "5g": {
                "bands": ["n41"],
                "bars": 5,
                "cid": 310,
                "gNBID": 1076,
                "rsrp": -85,
                "rsrq": -10,
                "rssi": -75,
                "sinr": 20
            },
            "generic": {
                "apn": "FBB.HOME",
                "hasIPv6": true,
                "registration": "registered",
                "roaming": false
            }
        },
        "time": {
            "daylightSavings": { "isUsed": true },
            "localTime": 1700000000,
            "localTimeZone": "<-05>5",
            "upTime": 86400
        }
    }"#;

    #[test]
    fn decode_full_status_document() {
        let status: StatusDocument =
            serde_json::from_str(FULL_STATUS).expect("should decode full status document");

        assert_eq!(status.device.kind, "HSID");
        assert_eq!(status.device.manufacturer_oui, "001A2B");
        assert_eq!(status.device.serial, "ABC123");
        assert_eq!(status.device.software_version, "1.2103.00.0338");
        assert!(status.device.is_mesh_supported);
        assert_eq!(status.time.up_time, 86400);
        assert_eq!(status.time.local_time_zone, "<-05>5");
        assert!(status.time.daylight_savings.is_used);
        assert!(status.signal.generic.has_ipv6);
        assert_eq!(status.signal.generic.apn, "FBB.HOME");
        assert_eq!(status.signal.four_g.enb_id, 310463);
        assert_eq!(status.signal.four_g.bands, vec!["b2".to_string()]);
        assert_eq!(status.signal.five_g.gnb_id, 1076);
        assert_eq!(status.signal.five_g.rsrp, -85);
        assert_eq!(status.signal.five_g.bars, 5);
    }

    #[test]
    fn missing_fields_decode_to_zero_values() {
        let status: StatusDocument =
            serde_json::from_str(r#"{"device":{"serial":"S1"}}"#).expect("should decode");

        assert_eq!(status.device.serial, "S1");
        assert_eq!(status.time, Time::default());
        assert_eq!(status.signal, Signal::default());
        assert!(status.signal.five_g.bands.is_empty());
    }

    #[test]
    fn empty_object_is_a_valid_document() {
        let status: StatusDocument = serde_json::from_str("{}").expect("should decode");
        assert_eq!(status, StatusDocument::default());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let status: StatusDocument = serde_json::from_str(
            r#"{"cell": {"4g": {}}, "time": {"upTime": 5, "uptimeTimestamp": 12}}"#,
        )
        .expect("should ignore unknown fields");
        assert_eq!(status.time.up_time, 5);
    }

    #[test]
    fn mistyped_field_is_rejected() {
        let result = serde_json::from_str::<StatusDocument>(r#"{"time":{"upTime":"soon"}}"#);
        assert!(result.is_err(), "string uptime should fail to decode");
    }

    #[test]
    fn null_fields_decode_to_zero_values() {
        let status: StatusDocument = serde_json::from_str(
            r#"{
                "device": {"serial": "S1", "name": null, "index": null},
                "time": null,
                "signal": {"4g": {"bands": null, "cid": 1}, "5g": null, "generic": {"roaming": null}}
            }"#,
        )
        .expect("null should decode like a missing field");

        assert_eq!(status.device.serial, "S1");
        assert_eq!(status.device.name, "");
        assert_eq!(status.device.index, 0);
        assert_eq!(status.time, Time::default());
        assert_eq!(status.signal.four_g.cid, 1);
        assert!(status.signal.four_g.bands.is_empty());
        assert_eq!(status.signal.five_g, Radio::default());
        assert!(!status.signal.generic.roaming);
    }

    #[test]
    fn null_sections_decode_to_zero_values() {
        let status: StatusDocument =
            serde_json::from_str(r#"{"device": null, "signal": null}"#).expect("should decode");
        assert_eq!(status, StatusDocument::default());
    }

    #[test]
    fn block_with_both_base_station_ids_decodes() {
        let status: StatusDocument =
            serde_json::from_str(r#"{"signal": {"5g": {"eNBID": 12, "gNBID": 34, "cid": 5}}}"#)
                .expect("both base station keys should be accepted");

        assert_eq!(status.signal.five_g.enb_id, 12);
        assert_eq!(status.signal.five_g.gnb_id, 34);
        assert_eq!(status.signal.five_g.cid, 5);
    }
}
