//! Domain types shared across the toolkit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Frequency unit tag with its fixed multiplier to Hz.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
pub enum FrequencyUnit {
    #[default]
    #[strum(serialize = "Hz")]
    Hz,
    #[serde(rename = "kHz")]
    #[strum(serialize = "kHz")]
    KHz,
    #[strum(serialize = "MHz")]
    MHz,
    #[strum(serialize = "GHz")]
    GHz,
}

impl FrequencyUnit {
    pub fn multiplier(self) -> f64 {
        match self {
            FrequencyUnit::Hz => 1.0,
            FrequencyUnit::KHz => 1e3,
            FrequencyUnit::MHz => 1e6,
            FrequencyUnit::GHz => 1e9,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrequencyValue {
    pub value: f64,
    pub unit: FrequencyUnit,
}

impl FrequencyValue {
    pub fn new(value: f64, unit: FrequencyUnit) -> Self {
        Self { value, unit }
    }

    pub fn to_hz(self) -> f64 {
        self.value * self.unit.multiplier()
    }
}

/// Power / voltage unit tag used by the unit converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum PowerUnit {
    #[serde(rename = "dBm")]
    #[strum(serialize = "dBm")]
    Dbm,
    #[serde(rename = "dBW")]
    #[strum(serialize = "dBW")]
    Dbw,
    #[strum(serialize = "Watts")]
    Watts,
    #[serde(rename = "mWatts")]
    #[strum(serialize = "mWatts")]
    MilliWatts,
    #[serde(rename = "V-RMS")]
    #[strum(serialize = "V-RMS")]
    VoltsRms,
    #[serde(rename = "V-Peak")]
    #[strum(serialize = "V-Peak")]
    VoltsPeak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum NetworkType {
    #[serde(rename = "2G")]
    #[strum(serialize = "2G")]
    TwoG,
    #[serde(rename = "3G")]
    #[strum(serialize = "3G")]
    ThreeG,
    #[serde(rename = "4G")]
    #[strum(serialize = "4G")]
    FourG,
    #[serde(rename = "5G")]
    #[strum(serialize = "5G")]
    FiveG,
    #[serde(rename = "LTE")]
    #[strum(serialize = "LTE")]
    Lte,
    #[serde(rename = "NR")]
    #[strum(serialize = "NR")]
    Nr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum DuplexMode {
    #[serde(rename = "FDD")]
    #[strum(serialize = "FDD")]
    Fdd,
    #[serde(rename = "TDD")]
    #[strum(serialize = "TDD")]
    Tdd,
}

/// A detected cell site. Immutable once built by the scan service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellTower {
    pub id: String,
    pub mcc: u16,
    pub mnc: u16,
    pub lac: u32,
    pub cid: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pci: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tac: Option<u32>,
    pub band: String,
    pub network_type: NetworkType,
    pub duplex: DuplexMode,
    pub frequency: TowerFrequency,
    pub signal: SignalMetrics,
    pub location: TowerLocation,
    pub provider: Provider,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TowerFrequency {
    pub dl: FrequencyValue,
    pub ul: FrequencyValue,
    /// Channel bandwidth in MHz.
    pub bandwidth: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalMetrics {
    pub rssi: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rsrp: Option<f64>,
    pub rsrq: f64,
    pub sinr: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rscp: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ecio: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TowerLocation {
    pub lat: f64,
    pub lon: f64,
    pub azimuth: f64,
    pub beamwidth: f64,
    /// Advertised cell range in meters.
    pub range: f64,
}

impl TowerLocation {
    pub fn point(&self) -> geo::Point {
        geo::Point::new(self.lon, self.lat)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub name: String,
    pub country: String,
    pub network: String,
}

/// Result of one simulated network scan, built atomically by the scan service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkScanResult {
    pub towers: Vec<CellTower>,
    pub serving_cell: Option<CellTower>,
    pub neighbor_cells: Vec<CellTower>,
    pub scan_time: DateTime<Utc>,
    pub location: LocationEstimate,
    pub metrics: LinkMetrics,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationEstimate {
    pub lat: f64,
    pub lon: f64,
    /// Estimated accuracy in meters.
    pub accuracy: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkMetrics {
    pub download_speed: f64,
    pub upload_speed: f64,
    pub latency: f64,
    pub jitter: f64,
}

/// One turn of the assistant conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A citation returned alongside grounded advice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub uri: String,
    pub title: String,
}

/// One sweep of the spectrum simulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectrumData {
    pub frequencies: Vec<f64>,
    pub amplitudes: Vec<f64>,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_multipliers() {
        assert_eq!(FrequencyUnit::Hz.multiplier(), 1.0);
        assert_eq!(FrequencyUnit::KHz.multiplier(), 1e3);
        assert_eq!(FrequencyUnit::MHz.multiplier(), 1e6);
        assert_eq!(FrequencyUnit::GHz.multiplier(), 1e9);
    }

    #[test]
    fn frequency_value_to_hz() {
        let f = FrequencyValue::new(1930.0, FrequencyUnit::MHz);
        assert_eq!(f.to_hz(), 1_930_000_000.0);
    }

    #[test]
    fn unit_tags_parse_case_sensitive() {
        assert_eq!("MHz".parse::<FrequencyUnit>(), Ok(FrequencyUnit::MHz));
        assert_eq!("kHz".parse::<FrequencyUnit>(), Ok(FrequencyUnit::KHz));
        assert!("mhz".parse::<FrequencyUnit>().is_err());
        assert_eq!("V-RMS".parse::<PowerUnit>(), Ok(PowerUnit::VoltsRms));
    }

    #[test]
    fn network_type_wire_names() {
        let json = serde_json::to_string(&NetworkType::Nr).unwrap();
        assert_eq!(json, "\"NR\"");
        let parsed: NetworkType = serde_json::from_str("\"2G\"").unwrap();
        assert_eq!(parsed, NetworkType::TwoG);
    }

    #[test]
    fn message_roles_are_lowercase_on_the_wire() {
        let json = serde_json::to_string(&Message {
            role: Role::Assistant,
            content: "73".into(),
        })
        .unwrap();
        assert!(json.contains("\"assistant\""));
    }
}
