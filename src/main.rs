use std::path::{Path, PathBuf};

use actix_web::{web, App, HttpServer};
use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod advice;
mod api;
mod bands;
mod config;
mod coverage;
mod model;
mod rf;
mod scan;
mod spectrum;

use advice::AdviceGateway;
use scan::{ScanConfig, ScanService};
use spectrum::SpectrumSim;

#[derive(Debug, Parser)]
struct Cli {
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP API for the dashboard
    Serve { port: Option<u16> },
    /// Run one mock scan and print the result as JSON
    Scan {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the frequency-allocation reference table
    Bands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { port } => {
            let path = match cli.config.as_deref() {
                Some(x) => x,
                None => Path::new("config.toml"),
            };
            let config = config::load(path)?;
            let port = port.unwrap_or(config.http_port);

            let scan_service = web::Data::new(ScanService::new(&config.scan));
            let spectrum_sim = web::Data::new(SpectrumSim::new(config.scan.seed));
            let gateway = web::Data::new(config.gateway.map(AdviceGateway::new));

            info!(port, "starting rf-toolkit api");
            HttpServer::new(move || {
                App::new()
                    .app_data(scan_service.clone())
                    .app_data(spectrum_sim.clone())
                    .app_data(gateway.clone())
                    .service(api::frequency)
                    .service(api::power)
                    .service(api::estimate_coverage)
                    .service(api::scan)
                    .service(api::scan_history)
                    .service(api::spectrum_sweep)
                    .service(api::band_table)
                    .service(api::advice)
            })
            .bind(("0.0.0.0", port))?
            .run()
            .await?;
        }

        Command::Scan { seed } => {
            let service = ScanService::new(&ScanConfig {
                seed,
                ..ScanConfig::default()
            });
            let result = service.start_scan().await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }

        Command::Bands => {
            for band in &bands::FREQUENCY_BANDS {
                println!(
                    "{:>4}  {:>12} - {:<12}  {}",
                    band.name,
                    rf::format_frequency(band.start as f64),
                    rf::format_frequency(band.end as f64),
                    band.allocation
                );
            }
        }
    };

    Ok(())
}
