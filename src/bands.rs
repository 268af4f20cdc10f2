//! ITU frequency-allocation reference table.
//!
//! Loaded once at startup and never mutated. Band ranges are half-open
//! `[start, end)` Hz, ascending and non-overlapping.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrequencyBand {
    pub name: &'static str,
    pub start: u64,
    pub end: u64,
    pub allocation: &'static str,
    pub service: &'static str,
    pub region: &'static str,
}

pub static FREQUENCY_BANDS: [FrequencyBand; 8] = [
    FrequencyBand {
        name: "VLF",
        start: 3_000,
        end: 30_000,
        allocation: "Navigation",
        service: "Maritime",
        region: "Global",
    },
    FrequencyBand {
        name: "LF",
        start: 30_000,
        end: 300_000,
        allocation: "Amateur, Time Signals",
        service: "Navigation",
        region: "Global",
    },
    FrequencyBand {
        name: "MF",
        start: 300_000,
        end: 3_000_000,
        allocation: "AM Broadcast",
        service: "Maritime/Aviation",
        region: "Global",
    },
    FrequencyBand {
        name: "HF",
        start: 3_000_000,
        end: 30_000_000,
        allocation: "Amateur, Shortwave",
        service: "Military/Maritime",
        region: "Global",
    },
    FrequencyBand {
        name: "VHF",
        start: 30_000_000,
        end: 300_000_000,
        allocation: "FM Broadcast, Airband",
        service: "Aviation/Maritime",
        region: "Global",
    },
    FrequencyBand {
        name: "UHF",
        start: 300_000_000,
        end: 3_000_000_000,
        allocation: "Cellular, WiFi (2.4GHz)",
        service: "Public Safety",
        region: "Global",
    },
    FrequencyBand {
        name: "SHF",
        start: 3_000_000_000,
        end: 30_000_000_000,
        allocation: "WiFi (5GHz), Satellite",
        service: "Commercial",
        region: "Global",
    },
    FrequencyBand {
        name: "EHF",
        start: 30_000_000_000,
        end: 300_000_000_000,
        allocation: "5G, Radio Astronomy",
        service: "Scientific",
        region: "Global",
    },
];

/// Band containing the given frequency, if any.
pub fn lookup(hz: f64) -> Option<&'static FrequencyBand> {
    FREQUENCY_BANDS
        .iter()
        .find(|b| hz >= b.start as f64 && hz < b.end as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_ascending_and_non_overlapping() {
        for pair in FREQUENCY_BANDS.windows(2) {
            assert!(pair[0].start < pair[0].end);
            assert!(pair[0].end <= pair[1].start);
            assert!(pair[0].start < pair[1].start);
        }
        let last = FREQUENCY_BANDS.last().unwrap();
        assert!(last.start < last.end);
    }

    #[test]
    fn lookup_finds_the_containing_band() {
        assert_eq!(lookup(144e6).map(|b| b.name), Some("VHF"));
        assert_eq!(lookup(2.437e9).map(|b| b.name), Some("UHF"));
        assert_eq!(lookup(28e9).map(|b| b.name), Some("SHF"));
        // below VLF and above EHF fall outside the table
        assert!(lookup(100.0).is_none());
        assert!(lookup(1e12).is_none());
    }

    #[test]
    fn band_edges_belong_to_the_upper_band() {
        assert_eq!(lookup(30e6).map(|b| b.name), Some("VHF"));
    }
}
