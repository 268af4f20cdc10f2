//! Great-circle distance and a coarse tower-coverage heuristic.

use geo::Point;
use serde::{Deserialize, Serialize};

use crate::model::CellTower;

const EARTH_RADIUS: f64 = 6_371_000.0; // m

// Free-space-like path loss offset and the quality cutoffs are fixed
// engineering heuristics carried over from the dashboard; they are not a
// propagation-accurate model and must not be tuned.
const PATH_LOSS_OFFSET: f64 = 147.55;
const DEFAULT_RSRP: f64 = -85.0;
const GOOD_THRESHOLD_DBM: f64 = -95.0;
const FAIR_THRESHOLD_DBM: f64 = -110.0;

/// Haversine distance in meters between two (lon, lat) points.
///
/// Hand-rolled rather than `geo::HaversineDistance` because the toolkit
/// pins the Earth radius at 6371 km while geo uses the IUGG mean radius.
pub fn haversine_meters(a: Point, b: Point) -> f64 {
    let (lon1, lat1) = a.x_y();
    let (lon2, lat2) = b.x_y();

    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();

    let h = (d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS * c
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quality {
    Good,
    Fair,
    Poor,
}

/// Quality tag for an estimated signal level. Comparisons are strict, so
/// exactly -95 dBm is Fair and exactly -110 dBm is Poor.
pub fn quality_for(signal_dbm: f64) -> Quality {
    if signal_dbm > GOOD_THRESHOLD_DBM {
        Quality::Good
    } else if signal_dbm > FAIR_THRESHOLD_DBM {
        Quality::Fair
    } else {
        Quality::Poor
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageEstimate {
    pub distance_m: f64,
    pub estimated_signal_dbm: f64,
    pub quality: Quality,
}

/// Estimates received signal at `user` from `tower` with a simplified
/// free-space path loss.
pub fn estimate(tower: &CellTower, user: Point) -> CoverageEstimate {
    let distance = haversine_meters(tower.location.point(), user);

    let dl_hz = tower.frequency.dl.to_hz();
    let path_loss = 20.0 * distance.log10() + 20.0 * dl_hz.log10() - PATH_LOSS_OFFSET;
    let rsrp = tower.signal.rsrp.unwrap_or(DEFAULT_RSRP);
    let signal = rsrp - (path_loss / 10.0).max(0.0);

    CoverageEstimate {
        distance_m: distance.round(),
        estimated_signal_dbm: signal.round(),
        // quality is judged on the unrounded estimate
        quality: quality_for(signal),
    }
}
