use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::advice::GatewayConfig;
use crate::scan::ScanConfig;

#[derive(Deserialize)]
pub struct Config {
    pub http_port: u16,

    #[serde(default)]
    pub scan: ScanConfig,

    // the advice endpoint answers with a fixed message when absent
    pub gateway: Option<GatewayConfig>,
}

pub fn load(path: &Path) -> Result<Config> {
    let data = fs::read_to_string(path).context("Failed to read config")?;
    let config = toml::from_str(&data).context("Failed to parse config")?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_defaults_the_scan_section() {
        let config: Config = toml::from_str("http_port = 8080").unwrap();
        assert_eq!(config.http_port, 8080);
        assert_eq!(config.scan.latency_ms, 1500);
        assert!(config.scan.seed.is_none());
        assert!(config.gateway.is_none());
    }

    #[test]
    fn gateway_section_defaults_model_and_endpoint() {
        let config: Config = toml::from_str(
            "http_port = 8080\n\n[gateway]\napi_key = \"k\"",
        )
        .unwrap();
        let gateway = config.gateway.unwrap();
        assert_eq!(gateway.api_key, "k");
        assert!(!gateway.model.is_empty());
        assert!(gateway.endpoint.starts_with("https://"));
    }
}
