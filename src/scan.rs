//! Simulated cell-network scan.
//!
//! No radio hardware is touched: `start_scan` sleeps for a configured
//! latency and then resolves with a roster of mock towers whose signal
//! metrics are perturbed from a seedable PRNG, so tests can pin exact
//! output sequences.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::model::{
    CellTower, DuplexMode, FrequencyUnit, FrequencyValue, LinkMetrics, LocationEstimate,
    NetworkScanResult, NetworkType, Provider, SignalMetrics, TowerFrequency, TowerLocation,
};

pub const HISTORY_CAPACITY: usize = 10;
const DEFAULT_LATENCY_MS: u64 = 1500;

// Fixed estimate reported in place of a real geolocation fix.
const USER_LAT: f64 = 37.7749;
const USER_LON: f64 = -122.4194;
const USER_ACCURACY_M: f64 = 35.0;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Simulated hardware latency in milliseconds.
    pub latency_ms: u64,
    /// Seed for the perturbation PRNG; entropy-seeded when absent.
    pub seed: Option<u64>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            latency_ms: DEFAULT_LATENCY_MS,
            seed: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("scan timed out before any tower responded")]
    Timeout,
}

/// Injectable failure mode. The real dashboard never fails a scan, but the
/// variants let tests exercise the empty-roster and error paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FaultInjection {
    #[default]
    None,
    NoTowers,
    Timeout,
}

pub struct ScanService {
    latency: Duration,
    scanning: AtomicBool,
    rng: Mutex<StdRng>,
    history: Mutex<VecDeque<NetworkScanResult>>,
    fault: FaultInjection,
}

impl ScanService {
    pub fn new(config: &ScanConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            latency: Duration::from_millis(config.latency_ms),
            scanning: AtomicBool::new(false),
            rng: Mutex::new(rng),
            history: Mutex::new(VecDeque::new()),
            fault: FaultInjection::None,
        }
    }

    pub fn with_fault(mut self, fault: FaultInjection) -> Self {
        self.fault = fault;
        self
    }

    /// True while a scan is sleeping out its simulated latency. The service
    /// holds no re-entry lock; preventing concurrent scans is the caller's
    /// job, and a second call would simply run its own independent timer.
    pub fn is_scanning(&self) -> bool {
        self.scanning.load(Ordering::Relaxed)
    }

    /// Runs one simulated scan. Resolves after the configured latency with
    /// the towers found, `towers[0]` designated as the serving cell and the
    /// rest as neighbors. Successful results are recorded in the bounded
    /// history; a timeout is not.
    pub async fn start_scan(&self) -> Result<NetworkScanResult, ScanError> {
        self.scanning.store(true, Ordering::Relaxed);
        tokio::time::sleep(self.latency).await;
        self.scanning.store(false, Ordering::Relaxed);

        if self.fault == FaultInjection::Timeout {
            return Err(ScanError::Timeout);
        }

        let result = {
            let mut rng = self.rng.lock().expect("scan rng lock poisoned");
            self.build_result(&mut rng)
        };

        let mut history = self.history.lock().expect("scan history lock poisoned");
        history.push_front(result.clone());
        history.truncate(HISTORY_CAPACITY);
        drop(history);

        info!(
            towers = result.towers.len(),
            serving = result.serving_cell.is_some(),
            "network scan complete"
        );
        Ok(result)
    }

    /// Most-recent-first copy of the bounded scan history.
    pub fn history(&self) -> Vec<NetworkScanResult> {
        self.history
            .lock()
            .expect("scan history lock poisoned")
            .iter()
            .cloned()
            .collect()
    }

    fn build_result(&self, rng: &mut StdRng) -> NetworkScanResult {
        let towers = if self.fault == FaultInjection::NoTowers {
            Vec::new()
        } else {
            roster(rng)
        };

        let serving_cell = towers.first().cloned();
        let neighbor_cells = towers.iter().skip(1).cloned().collect();

        NetworkScanResult {
            towers,
            serving_cell,
            neighbor_cells,
            scan_time: Utc::now(),
            location: LocationEstimate {
                lat: USER_LAT,
                lon: USER_LON,
                accuracy: USER_ACCURACY_M,
            },
            metrics: LinkMetrics {
                download_speed: 52.4 + rng.gen_range(-8.0..=8.0),
                upload_speed: 14.8 + rng.gen_range(-3.0..=3.0),
                latency: 32.0 + rng.gen_range(-6.0..=6.0),
                jitter: 4.0 + rng.gen_range(-1.0..=1.0),
            },
        }
    }
}

/// The fixed two-tower roster of the reference dashboard, with per-scan
/// fading applied to the signal block.
fn roster(rng: &mut StdRng) -> Vec<CellTower> {
    let mut towers = vec![
        CellTower {
            id: "cell-1".into(),
            mcc: 310,
            mnc: 410,
            lac: 12345,
            cid: 67890,
            pci: Some(123),
            tac: Some(45678),
            band: "B2".into(),
            network_type: NetworkType::Lte,
            duplex: DuplexMode::Fdd,
            frequency: TowerFrequency {
                dl: FrequencyValue::new(1930.0, FrequencyUnit::MHz),
                ul: FrequencyValue::new(1850.0, FrequencyUnit::MHz),
                bandwidth: 20.0,
            },
            signal: SignalMetrics {
                rssi: -65.0,
                rsrp: Some(-85.0),
                rsrq: -12.0,
                sinr: 22.0,
                rscp: None,
                ecio: None,
            },
            location: TowerLocation {
                lat: 37.7749,
                lon: -122.4194,
                azimuth: 120.0,
                beamwidth: 65.0,
                range: 1500.0,
            },
            provider: Provider {
                name: "AT&T".into(),
                country: "US".into(),
                network: "AT&T Mobility".into(),
            },
        },
        CellTower {
            id: "cell-2".into(),
            mcc: 310,
            mnc: 260,
            lac: 11111,
            cid: 22222,
            pci: Some(456),
            tac: Some(55555),
            band: "n71".into(),
            network_type: NetworkType::Nr,
            duplex: DuplexMode::Fdd,
            frequency: TowerFrequency {
                dl: FrequencyValue::new(600.0, FrequencyUnit::MHz),
                ul: FrequencyValue::new(600.0, FrequencyUnit::MHz),
                bandwidth: 10.0,
            },
            signal: SignalMetrics {
                rssi: -72.0,
                rsrp: Some(-98.0),
                rsrq: -15.0,
                sinr: 14.0,
                rscp: None,
                ecio: None,
            },
            location: TowerLocation {
                lat: 37.7800,
                lon: -122.4250,
                azimuth: 0.0,
                beamwidth: 120.0,
                range: 3000.0,
            },
            provider: Provider {
                name: "T-Mobile".into(),
                country: "US".into(),
                network: "T-Mobile US".into(),
            },
        },
    ];

    for tower in &mut towers {
        let fading = rng.gen_range(-2.0..=2.0);
        tower.signal.rssi += fading;
        if let Some(rsrp) = &mut tower.signal.rsrp {
            *rsrp += fading;
        }
        tower.signal.rsrq += rng.gen_range(-1.0..=1.0);
        tower.signal.sinr += rng.gen_range(-1.0..=1.0);
    }

    towers
}
