//! Reference Data Server
//!
//! Serves the geographic reference API, or with `--seed` runs the upstream
//! import once and exits.
use anyhow::Context;
use clap::{Arg, ArgAction, Command};

use refdata_core::core::{create_app_state, init_logging, shutdown_signal, Config, Service};
use refdata_core::log_info;
use refdata_server::{api, import, HttpReferenceSource};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let matches = Command::new("refdata-server")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Geographic reference data API")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .action(ArgAction::SetTrue)
                .help("Import countries, states and LGAs from the upstream source, then exit")
        )
        .get_matches();

    // Load configuration
    let config_path = matches.get_one::<String>("config").map(|s| s.as_str());
    let config = Config::load(Service::Geo, config_path).context("Failed to load configuration")?;

    init_logging(&config.logging);
    log_info!("Starting reference data server v{}", env!("CARGO_PKG_VERSION"));
    log_info!("{}", Config::describe_source(config_path));

    // The upstream is only needed for a seed run
    let source = if matches.get_flag("seed") {
        Some(HttpReferenceSource::from_config(&config)?)
    } else {
        None
    };

    // Create AppState using factory pattern
    let configured_app_state = create_app_state(config)
        .await
        .context("Failed to connect to the document store")?;
    log_info!("AppState created with {} store", configured_app_state.backend_name());

    if let Some(source) = source {
        log_info!("Seeding from {}", source.base_url());
        let report = import::seed(&configured_app_state, &source)
            .await
            .context("Import failed")?;
        println!("Seed complete: {}", report);
        return Ok(());
    }

    api::start_server(configured_app_state, shutdown_signal())
        .await
        .context("HTTP server failed")?;

    log_info!("Shutdown complete");
    Ok(())
}
