//! JSON endpoints consumed by the dashboard frontend.

use actix_web::{get, post, web, HttpResponse, Responder};
use geo::Point;
use serde::{Deserialize, Serialize};

use crate::advice::AdviceGateway;
use crate::bands::{self, FrequencyBand};
use crate::coverage::{self, CoverageEstimate};
use crate::model::{CellTower, FrequencyUnit, Message, PowerUnit};
use crate::rf::{self, AntennaKind, PowerReadings};
use crate::scan::ScanService;
use crate::spectrum::SpectrumSim;

fn default_velocity_factor() -> f64 {
    0.95
}

fn default_impedance() -> f64 {
    50.0
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FrequencyRequest {
    value: f64,
    /// Unit tag; unknown tags fall back to Hz instead of failing.
    unit: String,
    #[serde(default = "default_velocity_factor")]
    velocity_factor: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FrequencyResponse {
    hz: f64,
    formatted: String,
    wavelength_m: f64,
    quarter_wave_m: f64,
    half_wave_m: f64,
    band: Option<&'static FrequencyBand>,
}

#[post("/v1/frequency")]
pub async fn frequency(req: web::Json<FrequencyRequest>) -> impl Responder {
    let req = req.into_inner();
    let unit = req.unit.parse::<FrequencyUnit>().unwrap_or_default();
    let hz = rf::to_hz(req.value, unit);

    HttpResponse::Ok().json(FrequencyResponse {
        hz,
        formatted: rf::format_frequency(hz),
        wavelength_m: rf::wavelength(hz),
        quarter_wave_m: rf::antenna_length(hz, AntennaKind::Quarter, req.velocity_factor),
        half_wave_m: rf::antenna_length(hz, AntennaKind::Half, req.velocity_factor),
        band: bands::lookup(hz),
    })
}

#[derive(Debug, Deserialize)]
struct PowerRequest {
    value: f64,
    unit: PowerUnit,
    #[serde(default = "default_impedance")]
    impedance: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PowerResponse {
    readings: PowerReadings,
    formatted: FormattedReadings,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FormattedReadings {
    dbm: String,
    dbw: String,
    watts: String,
    milliwatts: String,
    volts_rms: String,
    volts_peak: String,
}

impl From<PowerReadings> for FormattedReadings {
    fn from(r: PowerReadings) -> Self {
        Self {
            dbm: rf::format_magnitude(r.dbm),
            dbw: rf::format_magnitude(r.dbw),
            watts: rf::format_magnitude(r.watts),
            milliwatts: rf::format_magnitude(r.milliwatts),
            volts_rms: rf::format_magnitude(r.volts_rms),
            volts_peak: rf::format_magnitude(r.volts_peak),
        }
    }
}

#[post("/v1/power")]
pub async fn power(req: web::Json<PowerRequest>) -> impl Responder {
    let req = req.into_inner();
    let watts = rf::to_watts(req.value, req.unit, req.impedance);
    let readings = rf::watts_to_all(watts, req.impedance);

    HttpResponse::Ok().json(PowerResponse {
        readings,
        formatted: readings.into(),
    })
}

#[derive(Debug, Deserialize)]
struct CoverageRequest {
    tower: CellTower,
    location: LatLon,
}

#[derive(Debug, Deserialize)]
struct LatLon {
    lat: f64,
    lon: f64,
}

#[post("/v1/coverage")]
pub async fn estimate_coverage(req: web::Json<CoverageRequest>) -> impl Responder {
    let req = req.into_inner();
    let user = Point::new(req.location.lon, req.location.lat);
    let estimate: CoverageEstimate = coverage::estimate(&req.tower, user);
    HttpResponse::Ok().json(estimate)
}

#[post("/v1/scan")]
pub async fn scan(service: web::Data<ScanService>) -> impl Responder {
    match service.start_scan().await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => {
            HttpResponse::ServiceUnavailable().json(serde_json::json!({ "error": e.to_string() }))
        }
    }
}

#[get("/v1/scan/history")]
pub async fn scan_history(service: web::Data<ScanService>) -> impl Responder {
    HttpResponse::Ok().json(service.history())
}

#[get("/v1/spectrum")]
pub async fn spectrum_sweep(sim: web::Data<SpectrumSim>) -> impl Responder {
    HttpResponse::Ok().json(sim.sweep())
}

#[get("/v1/bands")]
pub async fn band_table() -> impl Responder {
    HttpResponse::Ok().json(&bands::FREQUENCY_BANDS)
}

#[derive(Debug, Deserialize)]
struct AdviceRequest {
    messages: Vec<Message>,
}

const UNCONFIGURED_TEXT: &str = "RF advice is not configured on this server.";

#[post("/v1/advice")]
pub async fn advice(
    gateway: web::Data<Option<AdviceGateway>>,
    req: web::Json<AdviceRequest>,
) -> impl Responder {
    match gateway.as_ref() {
        Some(gateway) => HttpResponse::Ok().json(gateway.advise(&req.messages).await),
        None => HttpResponse::Ok().json(serde_json::json!({ "text": UNCONFIGURED_TEXT })),
    }
}
