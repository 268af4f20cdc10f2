//! Pure RF unit math.
//!
//! Every function here is total over f64: out-of-domain inputs propagate
//! IEEE-754 specials (NaN, infinities) instead of failing, and the display
//! layer decides how to render them. See [`format_magnitude`].

use serde::{Deserialize, Serialize};

use crate::model::{FrequencyUnit, PowerUnit};

pub const SPEED_OF_LIGHT: f64 = 299_792_458.0; // m/s

/// Converts a frequency to Hz. Negative values pass through unchecked.
pub fn to_hz(value: f64, unit: FrequencyUnit) -> f64 {
    value * unit.multiplier()
}

/// Wavelength in meters. Returns 0 at 0 Hz by convention instead of
/// producing an infinity.
pub fn wavelength(hz: f64) -> f64 {
    if hz == 0.0 {
        return 0.0;
    }
    SPEED_OF_LIGHT / hz
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AntennaKind {
    Quarter,
    Half,
}

impl AntennaKind {
    fn factor(self) -> f64 {
        match self {
            AntennaKind::Quarter => 0.25,
            AntennaKind::Half => 0.5,
        }
    }
}

/// Physical element length in meters. The velocity factor is caller-supplied
/// and not clamped; 0.95 is typical for wire in air, 0.66-0.8 for coax.
pub fn antenna_length(hz: f64, kind: AntennaKind, velocity_factor: f64) -> f64 {
    wavelength(hz) * kind.factor() * velocity_factor
}

/// Converts a power or voltage reading to Watts at the given impedance.
///
/// Callers must validate `impedance > 0` for the voltage branches; this
/// function does not raise and will propagate infinities or negative
/// magnitudes if misused.
pub fn to_watts(value: f64, unit: PowerUnit, impedance: f64) -> f64 {
    match unit {
        PowerUnit::Dbm => 10f64.powf((value - 30.0) / 10.0),
        PowerUnit::Dbw => 10f64.powf(value / 10.0),
        PowerUnit::Watts => value,
        PowerUnit::MilliWatts => value / 1000.0,
        PowerUnit::VoltsRms => value.powi(2) / impedance,
        PowerUnit::VoltsPeak => (value / 2f64.sqrt()).powi(2) / impedance,
    }
}

/// A power level expressed in every unit of the converter at once.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerReadings {
    pub dbm: f64,
    pub dbw: f64,
    pub watts: f64,
    pub milliwatts: f64,
    pub volts_rms: f64,
    pub volts_peak: f64,
}

/// Expands a wattage into all converter units. For `watts <= 0` the log
/// fields come out non-finite; they are never clamped here.
pub fn watts_to_all(watts: f64, impedance: f64) -> PowerReadings {
    let volts_rms = (watts * impedance).sqrt();
    PowerReadings {
        dbm: 10.0 * watts.log10() + 30.0,
        dbw: 10.0 * watts.log10(),
        watts,
        milliwatts: watts * 1000.0,
        volts_rms,
        volts_peak: volts_rms * 2f64.sqrt(),
    }
}

/// Display formatting shared with the frontend: "---" for non-finite
/// values, scientific notation outside [0.001, 100000], fixed otherwise.
pub fn format_magnitude(v: f64) -> String {
    if !v.is_finite() {
        return "---".to_string();
    }
    if v == 0.0 {
        return "0".to_string();
    }
    if v.abs() < 0.001 || v.abs() > 100_000.0 {
        format!("{v:.4e}")
    } else {
        format!("{v:.4}")
    }
}

/// Human-readable frequency with the largest fitting unit.
pub fn format_frequency(hz: f64) -> String {
    if hz >= 1e9 {
        format!("{:.3} GHz", hz / 1e9)
    } else if hz >= 1e6 {
        format!("{:.3} MHz", hz / 1e6)
    } else if hz >= 1e3 {
        format!("{:.3} kHz", hz / 1e3)
    } else {
        format!("{hz:.0} Hz")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_hz_scales_with_the_unit_multiplier() {
        assert_eq!(to_hz(144.0, FrequencyUnit::MHz), 144_000_000.0);
        assert_eq!(
            to_hz(7.1, FrequencyUnit::MHz),
            1e6 * to_hz(7.1, FrequencyUnit::Hz)
        );
        // negative values pass through unchecked
        assert_eq!(to_hz(-5.0, FrequencyUnit::KHz), -5_000.0);
    }

    #[test]
    fn wavelength_inverts_to_the_speed_of_light() {
        for hz in [1e3, 144e6, 2.4e9, 28e9] {
            assert!((wavelength(hz) * hz - SPEED_OF_LIGHT).abs() < 1e-3);
        }
        assert_eq!(wavelength(0.0), 0.0);
    }

    #[test]
    fn two_meter_band_scenario() {
        let hz = to_hz(144.0, FrequencyUnit::MHz);
        assert!((wavelength(hz) - 2.08189).abs() < 1e-4);
        let quarter = antenna_length(hz, AntennaKind::Quarter, 0.95);
        assert!((quarter - 0.4944).abs() < 1e-4);
    }

    #[test]
    fn half_wave_is_twice_the_quarter_wave() {
        for hz in [1.8e6, 146e6, 5.8e9] {
            let quarter = antenna_length(hz, AntennaKind::Quarter, 1.0);
            let half = antenna_length(hz, AntennaKind::Half, 1.0);
            assert!((half - 2.0 * quarter).abs() < 1e-12);
        }
    }

    #[test]
    fn zero_dbm_is_one_milliwatt() {
        let watts = to_watts(0.0, PowerUnit::Dbm, 50.0);
        assert!((watts - 0.001).abs() < 1e-15);
        let readings = watts_to_all(watts, 50.0);
        assert!(readings.dbm.abs() < 1e-9);
    }

    #[test]
    fn dbm_round_trips_at_fixed_impedance() {
        for dbm in [-137.0, -30.0, 0.0, 13.7, 47.0] {
            let watts = to_watts(dbm, PowerUnit::Dbm, 50.0);
            let back = watts_to_all(watts, 50.0).dbm;
            assert!((back - dbm).abs() < 1e-9, "{dbm} -> {back}");
        }
    }

    #[test]
    fn voltage_branches_use_the_impedance() {
        // 1 V-RMS into 50 ohms is 20 mW
        assert!((to_watts(1.0, PowerUnit::VoltsRms, 50.0) - 0.02).abs() < 1e-12);
        // peak voltage is RMS * sqrt(2) at the same power
        let w = to_watts(1.0, PowerUnit::VoltsRms, 50.0);
        let readings = watts_to_all(w, 50.0);
        assert!((readings.volts_peak - 2f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn negative_power_yields_non_finite_log_fields() {
        let readings = watts_to_all(-1.0, 50.0);
        assert!(readings.dbm.is_nan());
        assert!(readings.volts_rms.is_nan());
        let floor = watts_to_all(0.0, 50.0);
        assert!(floor.dbm.is_infinite() && floor.dbm < 0.0);
    }

    #[test]
    fn format_magnitude_thresholds() {
        assert_eq!(format_magnitude(f64::NAN), "---");
        assert_eq!(format_magnitude(f64::INFINITY), "---");
        assert_eq!(format_magnitude(0.0), "0");
        assert_eq!(format_magnitude(1.5), "1.5000");
        assert_eq!(format_magnitude(0.001), "0.0010");
        assert!(format_magnitude(0.0005).contains('e'));
        assert!(format_magnitude(2_400_000.0).contains('e'));
        assert_eq!(format_magnitude(100_000.0), "100000.0000");
    }

    #[test]
    fn format_frequency_picks_the_largest_unit() {
        assert_eq!(format_frequency(144e6), "144.000 MHz");
        assert_eq!(format_frequency(2.437e9), "2.437 GHz");
        assert_eq!(format_frequency(7_100.0), "7.100 kHz");
        assert_eq!(format_frequency(433.0), "433 Hz");
    }
}
