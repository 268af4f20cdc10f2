//! 2.4 GHz spectrum sweep simulator.
//!
//! Reproduces the dashboard's simulated analyzer trace: a noisy floor
//! around -100 dBm with a Gaussian carrier bump on Wi-Fi channel 6.

use std::sync::Mutex;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::model::SpectrumData;

const POINTS: usize = 100;
const SWEEP_START_MHZ: f64 = 2400.0;
const CARRIER_MHZ: f64 = 2437.0;
const CARRIER_HALF_WIDTH_MHZ: f64 = 10.0;
const NOISE_FLOOR_DBM: f64 = -100.0;

/// One 100-point sweep from 2400 MHz in 1 MHz steps.
pub fn sweep<R: Rng>(rng: &mut R) -> SpectrumData {
    let mut frequencies = Vec::with_capacity(POINTS);
    let mut amplitudes = Vec::with_capacity(POINTS);

    for i in 0..POINTS {
        let f = SWEEP_START_MHZ + i as f64;
        let mut amp = NOISE_FLOOR_DBM + rng.gen::<f64>() * 5.0;
        if (f - CARRIER_MHZ).abs() < CARRIER_HALF_WIDTH_MHZ {
            amp += 40.0 * (-(f - CARRIER_MHZ).powi(2) / 20.0).exp();
        }
        frequencies.push(f);
        amplitudes.push(amp);
    }

    SpectrumData {
        frequencies,
        amplitudes,
        timestamp: Utc::now(),
    }
}

/// Simulator handle shared with the HTTP layer; owns the sweep PRNG.
pub struct SpectrumSim {
    rng: Mutex<StdRng>,
}

impl SpectrumSim {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }

    pub fn sweep(&self) -> SpectrumData {
        let mut rng = self.rng.lock().expect("spectrum rng lock poisoned");
        sweep(&mut *rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweep_covers_the_band_in_one_mhz_steps() {
        let mut rng = StdRng::seed_from_u64(1);
        let data = sweep(&mut rng);

        assert_eq!(data.frequencies.len(), POINTS);
        assert_eq!(data.amplitudes.len(), POINTS);
        assert_eq!(data.frequencies[0], 2400.0);
        assert_eq!(data.frequencies[99], 2499.0);
    }

    #[test]
    fn carrier_bump_rises_well_above_the_noise_floor() {
        let mut rng = StdRng::seed_from_u64(1);
        let data = sweep(&mut rng);

        let at_carrier = data.amplitudes[37];
        let at_edge = data.amplitudes[0];
        assert!(at_carrier > at_edge + 30.0, "{at_carrier} vs {at_edge}");
        // noise floor stays within its 5 dB band away from the carrier
        assert!(at_edge >= NOISE_FLOOR_DBM && at_edge < NOISE_FLOOR_DBM + 5.0);
    }

    #[test]
    fn seeded_sweeps_are_deterministic() {
        let a = sweep(&mut StdRng::seed_from_u64(9));
        let b = sweep(&mut StdRng::seed_from_u64(9));
        assert_eq!(a.amplitudes, b.amplitudes);
    }
}
